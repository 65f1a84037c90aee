use std::collections::{BTreeMap, HashMap};

use super::schema::{
    EVENT_STORE_FORMAT_VERSION, KEY_COLLECTION_ENCODINGS, KEY_CONVERTER_INFO,
    KEY_CREATION_TIMESTAMP, KEY_DETECTOR_NAME, KEY_FORMAT_VERSION, KEY_RUN_NUMBER,
};

/// Run-level metadata embedded in the event store footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterMetadata {
    /// Run number of every event in the file
    pub run_number: u32,
    /// Detector setup label
    pub detector_name: String,
    /// Collection name to cell ID layout descriptor
    pub collection_encodings: BTreeMap<String, String>,
}

impl FooterMetadata {
    /// Serialize into Parquet key/value pairs, stamping version and creation time
    pub fn to_parquet_metadata(&self) -> Result<HashMap<String, String>, serde_json::Error> {
        let mut metadata = HashMap::new();

        metadata.insert(
            KEY_FORMAT_VERSION.to_string(),
            EVENT_STORE_FORMAT_VERSION.to_string(),
        );
        metadata.insert(
            KEY_CREATION_TIMESTAMP.to_string(),
            chrono::Utc::now().to_rfc3339(),
        );
        metadata.insert(
            KEY_CONVERTER_INFO.to_string(),
            format!("pixgear v{}", env!("CARGO_PKG_VERSION")),
        );
        metadata.insert(KEY_RUN_NUMBER.to_string(), self.run_number.to_string());
        metadata.insert(KEY_DETECTOR_NAME.to_string(), self.detector_name.clone());
        metadata.insert(
            KEY_COLLECTION_ENCODINGS.to_string(),
            serde_json::to_string(&self.collection_encodings)?,
        );

        Ok(metadata)
    }

    /// Parse from Parquet key/value pairs
    pub fn from_parquet_metadata(metadata: &HashMap<String, String>) -> Result<Self, String> {
        let get = |key: &str| {
            metadata
                .get(key)
                .ok_or_else(|| format!("footer is missing '{key}'"))
        };

        let run_number = get(KEY_RUN_NUMBER)?
            .parse()
            .map_err(|e| format!("invalid run number: {e}"))?;
        let detector_name = get(KEY_DETECTOR_NAME)?.clone();
        let collection_encodings = serde_json::from_str(get(KEY_COLLECTION_ENCODINGS)?)
            .map_err(|e| format!("invalid collection encodings: {e}"))?;

        Ok(Self {
            run_number,
            detector_name,
            collection_encodings,
        })
    }
}
