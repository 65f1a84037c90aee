//! # GEAR Geometry Export
//!
//! Serializes the detector geometry into the GEAR XML description read by
//! telescope track reconstruction frameworks (EUTelescope and friends).
//!
//! The export runs in two steps:
//!
//! 1. [`GeometryDocument::build`] converts every detector into a [`LayerRecord`]
//!    (ladder plus sensitive volume) in registry ID order, with lengths in
//!    millimeters, angles in degrees and the magnetic field in tesla.
//! 2. [`write_document`] writes the finished document in a single pass.
//!
//! ## Output Layout
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <gear>
//!   <global detectorName="EUTelescope"/>
//!   <BField type="ConstantBField" x="0" y="0" z="0"/>
//!   <detectors>
//!     <detector name="SiPlanes" geartype="SiPlanesParameters">
//!       <siplanesType type="TelescopeWithoutDUT"/>
//!       <siplanesNumber number="2"/>
//!       <siplanesID ID="0"/>
//!       <layers>
//!         <!-- Detector: plane0 - type: mimosa26 -->
//!         <layer>
//!           <ladder ID="0" positionX="0" ... radLength="94.65"/>
//!           <sensitive ID="0" positionX="0" ... radLength="94.65"/>
//!         </layer>
//!       </layers>
//!     </detector>
//!   </detectors>
//! </gear>
//! ```

mod document;
mod error;
mod exporter;
mod format;

#[cfg(test)]
mod tests;

pub use document::{
    BFieldRecord, GeometryDocument, LadderRecord, LayerRecord, SensitiveRecord,
    DEFAULT_DETECTOR_NAME, RADIATION_LENGTH_MM, SENSOR_ROTATION, SIPLANES_ID, SIPLANES_TYPE,
};
pub use error::GearError;
pub use exporter::{write_document, GearExporter};
pub use format::{format_decimal, SIGNIFICANT_DIGITS};
