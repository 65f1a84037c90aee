use std::fmt;
use std::path::PathBuf;

/// Statistics from a finalized run
#[derive(Debug, Clone, Default)]
pub struct WriterStats {
    /// Number of events written to the event store
    pub events_written: usize,
    /// Number of collections over all events, empty ones included
    pub collections_written: usize,
    /// Number of encoded pixel hits
    pub hits_written: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
    /// Size of the event store file in bytes
    pub file_size_bytes: u64,
    /// Geometry file written at finalize, if enabled
    pub geometry_file: Option<PathBuf>,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} events ({} collections, {} hits) in {} row groups",
            self.events_written, self.collections_written, self.hits_written, self.row_groups_written
        )?;
        if let Some(path) = &self.geometry_file {
            write!(f, ", geometry in {}", path.display())?;
        }
        Ok(())
    }
}
