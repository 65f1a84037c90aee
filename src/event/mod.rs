//! # Event Data Model
//!
//! Types flowing through the event writer:
//!
//! - [`PixelHitMessage`]: per-detector hit batches delivered by the simulation
//! - [`PixelCellEncoder`]: packs `(sensor ID, x, y)` into a cell ID following a
//!   [`BitFieldEncoding`] shared with the reconstruction side
//! - [`EventRecord`]: one event with its typed [`HitCollection`]s, the unit of
//!   persistence

mod encoding;
mod error;
mod hit;
mod record;


pub use encoding::{
    BitField, BitFieldEncoding, PixelCell, PixelCellEncoder, DEFAULT_PIXEL_TYPE,
    PIXEL_CELL_ENCODING,
};
pub use error::EncodingError;
pub use hit::{PixelHit, PixelHitMessage};
pub use record::{
    CellEntry, CollectionKind, EventRecord, HitCollection, DEFAULT_RUN_NUMBER,
    EVENT_TYPE_SIMULATION, MC_CLUSTER_COLLECTION, MC_CLUSTER_RAW_COLLECTION, MC_HIT_COLLECTION,
    MC_TRACK_COLLECTION, MC_TRUTH_COLLECTIONS,
};
