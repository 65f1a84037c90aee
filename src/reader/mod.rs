//! # Event Store Reader
//!
//! Reads event stores written by [`EventStoreWriter`](crate::writer::EventStoreWriter)
//! back into [`EventRecord`]s.
//!
//! ```rust,no_run
//! use pixgear::reader::EventStoreReader;
//!
//! let reader = EventStoreReader::open("output.pixgear.parquet")?;
//! println!("Run {}", reader.metadata().footer.run_number);
//! for event in reader.read_events()? {
//!     println!("Event {}: {} hits", event.event_number, event.entry_count());
//! }
//! # Ok::<(), pixgear::reader::ReaderError>(())
//! ```

mod error;
mod metadata;
mod utils;


use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Int32Array, ListArray, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::{Float64Type, UInt32Type, UInt64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::SerializedFileReader;

use crate::event::{CellEntry, CollectionKind, EventRecord, HitCollection};
use crate::writer::columns;

pub use error::ReaderError;
pub use metadata::StoreMetadata;

use utils::{get_column, list_values};

/// Default number of rows per decoded batch
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Reader for event store files
pub struct EventStoreReader {
    path: PathBuf,
    metadata: StoreMetadata,
    batch_size: usize,
}

impl EventStoreReader {
    /// Open an event store and parse its footer
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let parquet_reader = SerializedFileReader::new(file)?;
        let metadata = Self::extract_store_metadata(&parquet_reader)?;

        Ok(Self {
            path,
            metadata,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Set the number of rows per decoded batch
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// File metadata
    pub fn metadata(&self) -> &StoreMetadata {
        &self.metadata
    }

    /// Path of the opened file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all record batches
    pub fn read_batches(&self) -> Result<Vec<RecordBatch>, ReaderError> {
        let file = File::open(&self.path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(self.batch_size)
            .build()?;
        reader
            .map(|batch| batch.map_err(ReaderError::from))
            .collect()
    }

    /// Read all events in file order
    pub fn read_events(&self) -> Result<Vec<EventRecord>, ReaderError> {
        let mut events: Vec<EventRecord> = Vec::new();
        for batch in self.read_batches()? {
            self.decode_batch(&batch, &mut events)?;
        }
        Ok(events)
    }

    /// Decode rows of a batch, extending the last event while rows belong to it
    fn decode_batch(
        &self,
        batch: &RecordBatch,
        events: &mut Vec<EventRecord>,
    ) -> Result<(), ReaderError> {
        let runs = get_column::<UInt32Array>(batch, columns::RUN_NUMBER)?;
        let numbers = get_column::<UInt64Array>(batch, columns::EVENT_NUMBER)?;
        let types = get_column::<Int32Array>(batch, columns::EVENT_TYPE)?;
        let names = get_column::<StringArray>(batch, columns::COLLECTION)?;
        let kinds = get_column::<StringArray>(batch, columns::COLLECTION_TYPE)?;
        let cell_ids = get_column::<ListArray>(batch, columns::CELL_ID)?;
        let pixel_x = get_column::<ListArray>(batch, columns::PIXEL_X)?;
        let pixel_y = get_column::<ListArray>(batch, columns::PIXEL_Y)?;
        let signals = get_column::<ListArray>(batch, columns::SIGNAL)?;
        let times = get_column::<ListArray>(batch, columns::TIME)?;
        let global_times = get_column::<ListArray>(batch, columns::GLOBAL_TIME)?;

        for row in 0..batch.num_rows() {
            let name = names.value(row);
            let kind: CollectionKind = kinds
                .value(row)
                .parse()
                .map_err(ReaderError::InvalidFormat)?;

            let cells = list_values::<UInt64Type>(cell_ids, row, columns::CELL_ID)?;
            let xs = list_values::<UInt32Type>(pixel_x, row, columns::PIXEL_X)?;
            let ys = list_values::<UInt32Type>(pixel_y, row, columns::PIXEL_Y)?;
            let signal = list_values::<Float64Type>(signals, row, columns::SIGNAL)?;
            let time = list_values::<Float64Type>(times, row, columns::TIME)?;
            let global_time = list_values::<Float64Type>(global_times, row, columns::GLOBAL_TIME)?;
            let len = cells.len();
            if [xs.len(), ys.len(), signal.len(), time.len(), global_time.len()]
                .iter()
                .any(|&l| l != len)
            {
                return Err(ReaderError::InvalidFormat(format!(
                    "collection '{name}' has list columns of different lengths"
                )));
            }

            let mut collection = HitCollection::new(name, kind);
            if let Some(encoding) = self.metadata.footer.collection_encodings.get(name) {
                collection = collection.with_encoding(encoding.as_str());
            }
            let values = cells
                .into_iter()
                .zip(xs)
                .zip(ys)
                .zip(signal)
                .zip(time)
                .zip(global_time);
            for (((((cell_id, x), y), signal), time), global_time) in values {
                collection.push(CellEntry {
                    cell_id,
                    x,
                    y,
                    signal,
                    time,
                    global_time,
                });
            }

            let (run_number, event_number) = (runs.value(row), numbers.value(row));
            match events.last_mut() {
                Some(last) if last.run_number == run_number && last.event_number == event_number => {
                    last.add_collection(collection);
                }
                _ => {
                    let mut record = EventRecord::new(run_number, event_number);
                    record.event_type = types.value(row);
                    record.add_collection(collection);
                    events.push(record);
                }
            }
        }
        Ok(())
    }
}
