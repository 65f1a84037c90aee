use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::geometry::{DetectorIdRegistry, GeometryManager};

use super::document::{
    GeometryDocument, LayerRecord, DEFAULT_DETECTOR_NAME, SIPLANES_ID, SIPLANES_TYPE,
};
use super::format::format_decimal;
use super::GearError;

/// Writes GEAR telescope geometry files
#[derive(Debug, Clone)]
pub struct GearExporter {
    detector_name: String,
}

impl Default for GearExporter {
    fn default() -> Self {
        Self::new(DEFAULT_DETECTOR_NAME)
    }
}

impl GearExporter {
    /// Create an exporter labelling the setup with `detector_name`
    pub fn new(detector_name: impl Into<String>) -> Self {
        Self {
            detector_name: detector_name.into(),
        }
    }

    /// Assemble the document without writing it
    pub fn document(
        &self,
        geometry: &GeometryManager,
        registry: &DetectorIdRegistry,
    ) -> Result<GeometryDocument, GearError> {
        GeometryDocument::build(&self.detector_name, geometry, registry)
    }

    /// Serialize the geometry into memory
    pub fn render(
        &self,
        geometry: &GeometryManager,
        registry: &DetectorIdRegistry,
    ) -> Result<Vec<u8>, GearError> {
        let document = self.document(geometry, registry)?;
        let mut buffer = Vec::new();
        write_document(&document, &mut buffer)?;
        Ok(buffer)
    }

    /// Write the geometry to `path`, truncating any existing file.
    ///
    /// The document is fully rendered before the file is opened.
    pub fn export<P: AsRef<Path>>(
        &self,
        geometry: &GeometryManager,
        registry: &DetectorIdRegistry,
        path: P,
    ) -> Result<(), GearError> {
        let path = path.as_ref();
        let content = self.render(geometry, registry)?;

        let file_error = |source| GearError::FileError {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::create(path).map_err(file_error)?;
        file.write_all(&content).map_err(file_error)?;
        file.flush().map_err(file_error)?;

        info!("Wrote GEAR geometry to file: {}", path.display());
        Ok(())
    }
}

/// Serialize a document as GEAR XML
pub fn write_document<W: Write>(document: &GeometryDocument, sink: W) -> Result<(), GearError> {
    let mut writer = Writer::new_with_indent(sink, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("gear")))?;

    empty(
        &mut writer,
        "global",
        &[("detectorName", document.detector_name.clone())],
    )?;
    empty(
        &mut writer,
        "BField",
        &[
            ("type", "ConstantBField".to_string()),
            ("x", format_decimal(document.field.x)),
            ("y", format_decimal(document.field.y)),
            ("z", format_decimal(document.field.z)),
        ],
    )?;

    writer.write_event(Event::Start(BytesStart::new("detectors")))?;
    writer.write_event(Event::Start(
        BytesStart::new("detector").with_attributes([
            ("name", "SiPlanes"),
            ("geartype", "SiPlanesParameters"),
        ]),
    ))?;
    empty(&mut writer, "siplanesType", &[("type", SIPLANES_TYPE.to_string())])?;
    empty(
        &mut writer,
        "siplanesNumber",
        &[("number", document.layers.len().to_string())],
    )?;
    empty(&mut writer, "siplanesID", &[("ID", SIPLANES_ID.to_string())])?;

    writer.write_event(Event::Start(BytesStart::new("layers")))?;
    for layer in &document.layers {
        write_layer(&mut writer, layer)?;
    }
    writer.write_event(Event::End(BytesEnd::new("layers")))?;

    writer.write_event(Event::End(BytesEnd::new("detector")))?;
    writer.write_event(Event::End(BytesEnd::new("detectors")))?;
    writer.write_event(Event::End(BytesEnd::new("gear")))?;

    let sink = writer.get_mut();
    sink.write_all(b"\n")?;
    Ok(())
}

fn write_layer<W: Write>(writer: &mut Writer<W>, layer: &LayerRecord) -> Result<(), GearError> {
    let comment = format!(
        " Detector: {} - type: {} ",
        layer.detector_name, layer.detector_type
    )
    .replace("--", "- -");
    writer.write_event(Event::Comment(BytesText::from_escaped(comment)))?;
    writer.write_event(Event::Start(BytesStart::new("layer")))?;

    let ladder = &layer.ladder;
    let mut attributes = vec![("ID", ladder.id.to_string())];
    attributes.extend(position_attributes(&ladder.position));
    attributes.extend([
        ("rotationZY", format_decimal(ladder.rotation[0])),
        ("rotationZX", format_decimal(ladder.rotation[1])),
        ("rotationXY", format_decimal(ladder.rotation[2])),
        ("sizeX", format_decimal(ladder.size[0])),
        ("sizeY", format_decimal(ladder.size[1])),
        ("thickness", format_decimal(ladder.size[2])),
        ("radLength", format_decimal(ladder.rad_length)),
    ]);
    empty(writer, "ladder", &attributes)?;

    let sensitive = &layer.sensitive;
    let mut attributes = vec![("ID", sensitive.id.to_string())];
    attributes.extend(position_attributes(&sensitive.position));
    attributes.extend([
        ("sizeX", format_decimal(sensitive.size[0])),
        ("sizeY", format_decimal(sensitive.size[1])),
        ("thickness", format_decimal(sensitive.size[2])),
        ("npixelX", sensitive.npixel[0].to_string()),
        ("npixelY", sensitive.npixel[1].to_string()),
        ("pitchX", format_decimal(sensitive.pitch[0])),
        ("pitchY", format_decimal(sensitive.pitch[1])),
        ("resolution", format_decimal(sensitive.resolution)),
        ("rotation1", format_decimal(sensitive.rotation[0])),
        ("rotation2", format_decimal(sensitive.rotation[1])),
        ("rotation3", format_decimal(sensitive.rotation[2])),
        ("rotation4", format_decimal(sensitive.rotation[3])),
        ("radLength", format_decimal(sensitive.rad_length)),
    ]);
    empty(writer, "sensitive", &attributes)?;

    writer.write_event(Event::End(BytesEnd::new("layer")))?;
    Ok(())
}

fn position_attributes(position: &[f64; 3]) -> [(&'static str, String); 3] {
    [
        ("positionX", format_decimal(position[0])),
        ("positionY", format_decimal(position[1])),
        ("positionZ", format_decimal(position[2])),
    ]
}

fn empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, String)],
) -> Result<(), GearError> {
    let mut element = BytesStart::new(name);
    for (key, value) in attributes {
        element.push_attribute((*key, value.as_str()));
    }
    writer.write_event(Event::Empty(element))?;
    Ok(())
}
