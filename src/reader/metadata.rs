use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::Schema;
use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::writer::{FooterMetadata, KEY_CONVERTER_INFO, KEY_CREATION_TIMESTAMP, KEY_FORMAT_VERSION};

use super::{EventStoreReader, ReaderError};

/// Metadata extracted from an event store
#[derive(Debug, Clone)]
pub struct StoreMetadata {
    /// Format version string
    pub format_version: String,
    /// Writer name and version, if recorded
    pub converter_info: Option<String>,
    /// Creation time, if recorded
    pub creation_timestamp: Option<String>,
    /// Total number of rows, one per (event, collection)
    pub total_rows: i64,
    /// Number of row groups
    pub num_row_groups: usize,
    /// Schema of the Parquet file
    pub schema: Arc<Schema>,
    /// Raw key-value metadata from Parquet footer
    pub key_value_metadata: HashMap<String, String>,
    /// Parsed run-level metadata
    pub footer: FooterMetadata,
}

impl EventStoreReader {
    /// Extract metadata from a Parquet reader
    pub(super) fn extract_store_metadata<R: parquet::file::reader::ChunkReader + 'static>(
        reader: &SerializedFileReader<R>,
    ) -> Result<StoreMetadata, ReaderError> {
        let parquet_metadata = reader.metadata();
        let file_meta = parquet_metadata.file_metadata();
        let schema = parquet::arrow::parquet_to_arrow_schema(
            file_meta.schema_descr(),
            file_meta.key_value_metadata(),
        )?;

        let mut kv_metadata = HashMap::new();
        if let Some(kv_list) = file_meta.key_value_metadata() {
            for kv in kv_list {
                if let Some(value) = &kv.value {
                    kv_metadata.insert(kv.key.clone(), value.clone());
                }
            }
        }

        let format_version = kv_metadata
            .get(KEY_FORMAT_VERSION)
            .cloned()
            .ok_or_else(|| {
                ReaderError::InvalidFormat("not an event store: no format version".to_string())
            })?;
        let footer =
            FooterMetadata::from_parquet_metadata(&kv_metadata).map_err(ReaderError::MetadataError)?;

        let total_rows: i64 = (0..parquet_metadata.num_row_groups())
            .map(|i| parquet_metadata.row_group(i).num_rows())
            .sum();

        Ok(StoreMetadata {
            format_version,
            converter_info: kv_metadata.get(KEY_CONVERTER_INFO).cloned(),
            creation_timestamp: kv_metadata.get(KEY_CREATION_TIMESTAMP).cloned(),
            total_rows,
            num_row_groups: parquet_metadata.num_row_groups(),
            schema: Arc::new(schema),
            key_value_metadata: kv_metadata,
            footer,
        })
    }
}
