use std::fmt;
use std::str::FromStr;

/// Event type tag marking simulated data
pub const EVENT_TYPE_SIMULATION: i32 = 2;

/// Run number used when none is configured
pub const DEFAULT_RUN_NUMBER: u32 = 1;

/// Monte-Carlo truth cluster collection
pub const MC_CLUSTER_COLLECTION: &str = "mc_cluster";
/// Monte-Carlo truth raw cluster collection
pub const MC_CLUSTER_RAW_COLLECTION: &str = "mc_cluster_raw";
/// Monte-Carlo truth hit collection
pub const MC_HIT_COLLECTION: &str = "mc_hit";
/// Monte-Carlo truth track collection
pub const MC_TRACK_COLLECTION: &str = "mc_track";

/// The Monte-Carlo truth collections with their types, in output order
pub const MC_TRUTH_COLLECTIONS: [(&str, CollectionKind); 4] = [
    (MC_CLUSTER_COLLECTION, CollectionKind::TrackerData),
    (MC_CLUSTER_RAW_COLLECTION, CollectionKind::TrackerData),
    (MC_HIT_COLLECTION, CollectionKind::TrackerHit),
    (MC_TRACK_COLLECTION, CollectionKind::Track),
];

/// Element type of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Raw or zero-suppressed pixel data
    TrackerData,
    /// Space points
    TrackerHit,
    /// Reconstructed or true tracks
    Track,
}

impl CollectionKind {
    /// Type name as stored in event files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrackerData => "TrackerData",
            Self::TrackerHit => "TrackerHit",
            Self::Track => "Track",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TrackerData" => Ok(Self::TrackerData),
            "TrackerHit" => Ok(Self::TrackerHit),
            "Track" => Ok(Self::Track),
            other => Err(format!("unknown collection type '{other}'")),
        }
    }
}

/// One encoded pixel inside a collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellEntry {
    /// Packed cell ID
    pub cell_id: u64,
    /// Pixel column
    pub x: u32,
    /// Pixel row
    pub y: u32,
    /// Collected signal
    pub signal: f64,
    /// Local hit time, internal units
    pub time: f64,
    /// Global hit time, internal units
    pub global_time: f64,
}

/// A named, typed collection of encoded pixels
#[derive(Debug, Clone, PartialEq)]
pub struct HitCollection {
    name: String,
    kind: CollectionKind,
    encoding: Option<String>,
    entries: Vec<CellEntry>,
}

impl HitCollection {
    /// Create an empty collection
    pub fn new(name: impl Into<String>, kind: CollectionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            encoding: None,
            entries: Vec::new(),
        }
    }

    /// Attach the cell ID layout descriptor used for the entries
    pub fn with_encoding(mut self, descriptor: impl Into<String>) -> Self {
        self.encoding = Some(descriptor.into());
        self
    }

    /// Append one entry
    pub fn push(&mut self, entry: CellEntry) {
        self.entries.push(entry);
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element type
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Cell ID layout descriptor, if the collection carries cell IDs
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// The entries in insertion order
    pub fn entries(&self) -> &[CellEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One simulated event with all its output collections
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Run number
    pub run_number: u32,
    /// Event number, unique and increasing within a run
    pub event_number: u64,
    /// Event type tag
    pub event_type: i32,
    /// Collections in output order
    pub collections: Vec<HitCollection>,
}

impl EventRecord {
    /// Create an empty simulated-data event
    pub fn new(run_number: u32, event_number: u64) -> Self {
        Self {
            run_number,
            event_number,
            event_type: EVENT_TYPE_SIMULATION,
            collections: Vec::new(),
        }
    }

    /// Append a collection
    pub fn add_collection(&mut self, collection: HitCollection) {
        self.collections.push(collection);
    }

    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Option<&HitCollection> {
        self.collections.iter().find(|c| c.name() == name)
    }

    /// Total number of entries over all collections
    pub fn entry_count(&self) -> usize {
        self.collections.iter().map(HitCollection::len).sum()
    }
}
