use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float64Builder, Int32Builder, ListBuilder, StringBuilder, UInt32Builder,
    UInt64Builder,
};
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::event::EventRecord;

use super::config::WriterConfig;
use super::error::WriterError;
use super::metadata::FooterMetadata;
use super::schema::{create_event_schema_arc, list_item};

/// Append-only Parquet sink for [`EventRecord`]s.
///
/// Every event becomes one record batch with a row per collection.
pub struct EventStoreWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: Arc<Schema>,
    flush_each_event: bool,
    events_written: usize,
    collections_written: usize,
    entries_written: usize,
}

impl EventStoreWriter<File> {
    /// Create a new store at a file path, truncating any existing file
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        metadata: &FooterMetadata,
        config: &WriterConfig,
    ) -> Result<Self, WriterError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| WriterError::FileError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file, metadata, config)
    }
}

impl<W: Write + Send> EventStoreWriter<W> {
    /// Create a new store on any Write implementation
    pub fn new(
        writer: W,
        metadata: &FooterMetadata,
        config: &WriterConfig,
    ) -> Result<Self, WriterError> {
        let schema = create_event_schema_arc();
        let props = config.to_writer_properties(&metadata.to_parquet_metadata()?)?;
        let writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer,
            schema,
            flush_each_event: config.flush_each_event,
            events_written: 0,
            collections_written: 0,
            entries_written: 0,
        })
    }

    /// Append one event
    pub fn write_event(&mut self, record: &EventRecord) -> Result<(), WriterError> {
        let rows = record.collections.len();
        let entries = record.entry_count();

        let mut run_builder = UInt32Builder::with_capacity(rows);
        let mut event_builder = UInt64Builder::with_capacity(rows);
        let mut type_builder = Int32Builder::with_capacity(rows);
        let mut name_builder = StringBuilder::with_capacity(rows, rows * 16);
        let mut kind_builder = StringBuilder::with_capacity(rows, rows * 16);

        let mut cell_builder = ListBuilder::new(UInt64Builder::with_capacity(entries))
            .with_field(list_item(DataType::UInt64));
        let mut x_builder = ListBuilder::new(UInt32Builder::with_capacity(entries))
            .with_field(list_item(DataType::UInt32));
        let mut y_builder = ListBuilder::new(UInt32Builder::with_capacity(entries))
            .with_field(list_item(DataType::UInt32));
        let mut signal_builder = ListBuilder::new(Float64Builder::with_capacity(entries))
            .with_field(list_item(DataType::Float64));
        let mut time_builder = ListBuilder::new(Float64Builder::with_capacity(entries))
            .with_field(list_item(DataType::Float64));
        let mut global_time_builder = ListBuilder::new(Float64Builder::with_capacity(entries))
            .with_field(list_item(DataType::Float64));

        for collection in &record.collections {
            run_builder.append_value(record.run_number);
            event_builder.append_value(record.event_number);
            type_builder.append_value(record.event_type);
            name_builder.append_value(collection.name());
            kind_builder.append_value(collection.kind().as_str());

            for entry in collection.entries() {
                cell_builder.values().append_value(entry.cell_id);
                x_builder.values().append_value(entry.x);
                y_builder.values().append_value(entry.y);
                signal_builder.values().append_value(entry.signal);
                time_builder.values().append_value(entry.time);
                global_time_builder.values().append_value(entry.global_time);
            }
            cell_builder.append(true);
            x_builder.append(true);
            y_builder.append(true);
            signal_builder.append(true);
            time_builder.append(true);
            global_time_builder.append(true);
        }

        let arrays: Vec<ArrayRef> = vec![
            Arc::new(run_builder.finish()),
            Arc::new(event_builder.finish()),
            Arc::new(type_builder.finish()),
            Arc::new(name_builder.finish()),
            Arc::new(kind_builder.finish()),
            Arc::new(cell_builder.finish()),
            Arc::new(x_builder.finish()),
            Arc::new(y_builder.finish()),
            Arc::new(signal_builder.finish()),
            Arc::new(time_builder.finish()),
            Arc::new(global_time_builder.finish()),
        ];

        let batch = RecordBatch::try_new(self.schema.clone(), arrays)?;
        self.writer.write(&batch)?;
        if self.flush_each_event {
            self.writer.flush()?;
        }

        self.events_written += 1;
        self.collections_written += rows;
        self.entries_written += entries;

        Ok(())
    }

    /// Close the file, writing the footer
    pub fn finish(self) -> Result<EventStoreStats, WriterError> {
        let file_metadata = self.writer.close()?;

        Ok(EventStoreStats {
            events_written: self.events_written,
            collections_written: self.collections_written,
            entries_written: self.entries_written,
            row_groups_written: file_metadata.row_groups.len(),
            uncompressed_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size as u64)
                .sum(),
        })
    }

    /// Number of events written so far
    pub fn events_written(&self) -> usize {
        self.events_written
    }
}

/// Statistics of a closed event store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStoreStats {
    /// Number of events
    pub events_written: usize,
    /// Number of rows, one per collection
    pub collections_written: usize,
    /// Number of cell entries over all collections
    pub entries_written: usize,
    /// Number of Parquet row groups
    pub row_groups_written: usize,
    /// Uncompressed size of the row groups in bytes
    pub uncompressed_bytes: u64,
}
