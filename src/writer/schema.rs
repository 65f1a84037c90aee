//! Arrow schema and footer keys of the event store.
//!
//! The store uses a "wide" layout: one row per (event, collection), with the
//! per-pixel values held in list columns. Empty collections are rows with
//! empty lists, so they survive a round trip.
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | run_number | `UInt32` | Run number |
//! | event_number | `UInt64` | Event number |
//! | event_type | `Int32` | Event type tag |
//! | collection | `Utf8` | Collection name |
//! | collection_type | `Utf8` | Element type of the collection |
//! | cell_id | `List<UInt64>` | Packed cell IDs |
//! | pixel_x | `List<UInt32>` | Pixel columns |
//! | pixel_y | `List<UInt32>` | Pixel rows |
//! | signal | `List<Float64>` | Collected signal |
//! | time | `List<Float64>` | Local hit time in ns |
//! | global_time | `List<Float64>` | Global hit time in ns |

use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};

/// Current event store format version
pub const EVENT_STORE_FORMAT_VERSION: &str = "1.0.0";

/// Conventional file extension for event stores
pub const EVENT_STORE_EXTENSION: &str = ".pixgear.parquet";

/// Footer key: format version
pub const KEY_FORMAT_VERSION: &str = "pixgear:format_version";
/// Footer key: converter name and version
pub const KEY_CONVERTER_INFO: &str = "pixgear:converter_info";
/// Footer key: RFC 3339 creation time
pub const KEY_CREATION_TIMESTAMP: &str = "pixgear:creation_timestamp";
/// Footer key: run number
pub const KEY_RUN_NUMBER: &str = "pixgear:run_number";
/// Footer key: detector setup label
pub const KEY_DETECTOR_NAME: &str = "pixgear:detector_name";
/// Footer key: JSON object mapping collection names to cell ID layouts
pub const KEY_COLLECTION_ENCODINGS: &str = "pixgear:collection_encodings";

/// Column names
pub mod columns {
    /// Run number
    pub const RUN_NUMBER: &str = "run_number";
    /// Event number
    pub const EVENT_NUMBER: &str = "event_number";
    /// Event type tag
    pub const EVENT_TYPE: &str = "event_type";
    /// Collection name
    pub const COLLECTION: &str = "collection";
    /// Collection element type
    pub const COLLECTION_TYPE: &str = "collection_type";
    /// Packed cell IDs
    pub const CELL_ID: &str = "cell_id";
    /// Pixel columns
    pub const PIXEL_X: &str = "pixel_x";
    /// Pixel rows
    pub const PIXEL_Y: &str = "pixel_y";
    /// Collected signal
    pub const SIGNAL: &str = "signal";
    /// Local hit time
    pub const TIME: &str = "time";
    /// Global hit time
    pub const GLOBAL_TIME: &str = "global_time";
}

/// Columns holding per-pixel lists
pub const LIST_COLUMNS: [&str; 6] = [
    columns::CELL_ID,
    columns::PIXEL_X,
    columns::PIXEL_Y,
    columns::SIGNAL,
    columns::TIME,
    columns::GLOBAL_TIME,
];

pub(crate) fn list_item(data_type: DataType) -> Arc<Field> {
    Arc::new(Field::new("item", data_type, false))
}

/// Create the event store schema
///
/// ```
/// use pixgear::writer::create_event_schema;
///
/// let schema = create_event_schema();
/// assert_eq!(schema.fields().len(), 11);
/// ```
pub fn create_event_schema() -> Schema {
    let fields = vec![
        Field::new(columns::RUN_NUMBER, DataType::UInt32, false),
        Field::new(columns::EVENT_NUMBER, DataType::UInt64, false),
        Field::new(columns::EVENT_TYPE, DataType::Int32, false),
        Field::new(columns::COLLECTION, DataType::Utf8, false),
        Field::new(columns::COLLECTION_TYPE, DataType::Utf8, false),
        Field::new(
            columns::CELL_ID,
            DataType::List(list_item(DataType::UInt64)),
            false,
        ),
        Field::new(
            columns::PIXEL_X,
            DataType::List(list_item(DataType::UInt32)),
            false,
        ),
        Field::new(
            columns::PIXEL_Y,
            DataType::List(list_item(DataType::UInt32)),
            false,
        ),
        Field::new(
            columns::SIGNAL,
            DataType::List(list_item(DataType::Float64)),
            false,
        ),
        Field::new(
            columns::TIME,
            DataType::List(list_item(DataType::Float64)),
            false,
        ),
        Field::new(
            columns::GLOBAL_TIME,
            DataType::List(list_item(DataType::Float64)),
            false,
        ),
    ];

    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        EVENT_STORE_FORMAT_VERSION.to_string(),
    );

    Schema::new(fields).with_metadata(metadata)
}

/// Returns an Arc-wrapped event store schema for shared ownership
pub fn create_event_schema_arc() -> Arc<Schema> {
    Arc::new(create_event_schema())
}
