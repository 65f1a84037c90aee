use super::*;
use crate::geometry::rotation::rotation_from_angles;
use crate::geometry::{
    Detector, DetectorIdRegistry, DetectorModel, GeometryManager, MagneticField,
};
use nalgebra::{Matrix3, Vector2, Vector3};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::sync::Arc;
use tempfile::tempdir;

fn telescope() -> GeometryManager {
    let model = Arc::new(
        DetectorModel::new(
            "test_model",
            Vector2::new(100, 100),
            Vector2::new(0.05, 0.05),
            Vector3::new(6.0, 7.0, 0.3),
            Vector3::new(5.5, 5.5, 0.2),
        )
        .unwrap(),
    );

    let mut geometry = GeometryManager::new();
    for (name, z) in [("plane0", 0.0), ("plane1", 50.0)] {
        geometry
            .add_detector(
                Detector::new(name, Vector3::new(0.0, 0.0, z), Matrix3::identity(), model.clone())
                    .unwrap(),
            )
            .unwrap();
    }
    geometry
}

fn registry(geometry: &GeometryManager) -> DetectorIdRegistry {
    DetectorIdRegistry::sequential(geometry.detectors().iter().map(|d| d.name())).unwrap()
}

fn render(geometry: &GeometryManager) -> String {
    let bytes = GearExporter::default()
        .render(geometry, &registry(geometry))
        .unwrap();
    String::from_utf8(bytes).unwrap()
}

/// Collect (element name, attributes) of every element with the given name
fn elements(xml: &str, name: &str) -> Vec<Vec<(String, String)>> {
    let mut reader = Reader::from_str(xml);
    let mut found = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == name.as_bytes() => {
                let attributes = e
                    .attributes()
                    .map(|a| {
                        let a = a.unwrap();
                        (
                            String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                            a.unescape_value().unwrap().into_owned(),
                        )
                    })
                    .collect();
                found.push(attributes);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    found
}

fn attribute<'a>(attributes: &'a [(String, String)], key: &str) -> &'a str {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| panic!("missing attribute {key}"))
}

// ==================== Document Tests ====================

#[test]
fn test_sensitive_size_from_pixel_grid() {
    let geometry = telescope();
    let document = GearExporter::default()
        .document(&geometry, &registry(&geometry))
        .unwrap();

    assert_eq!(document.layers.len(), 2);
    let sensitive = &document.layers[0].sensitive;
    assert_eq!(sensitive.size[0], 100.0 * 0.05);
    assert_eq!(sensitive.size[1], 100.0 * 0.05);
    assert_eq!(sensitive.size[2], 0.2);
    assert_eq!(sensitive.npixel, [100, 100]);
    assert!((sensitive.resolution - 0.05 / 12f64.sqrt()).abs() < 1e-15);
    assert_eq!(sensitive.rotation, SENSOR_ROTATION);

    let ladder = &document.layers[0].ladder;
    assert_eq!(ladder.size, [6.0, 7.0, 0.3]);
    assert_eq!(ladder.rad_length, RADIATION_LENGTH_MM);
}

#[test]
fn test_layers_follow_registry_order() {
    let geometry = telescope();
    let registry = DetectorIdRegistry::with_assignments([("plane1", 3), ("plane0", 7)]).unwrap();
    let document = GearExporter::default().document(&geometry, &registry).unwrap();

    let names: Vec<_> = document.layers.iter().map(|l| l.detector_name.as_str()).collect();
    assert_eq!(names, vec!["plane1", "plane0"]);
    assert_eq!(document.layers[0].ladder.id, 3);
    assert_eq!(document.layers[1].sensitive.id, 7);
}

#[test]
fn test_registry_with_unknown_detector() {
    let geometry = telescope();
    let registry = DetectorIdRegistry::sequential(["plane0", "ghost"]).unwrap();
    let result = GearExporter::default().document(&geometry, &registry);
    assert!(matches!(result, Err(GearError::GeometryError(_))));
}

#[test]
fn test_rotation_angles_in_degrees() {
    let model = telescope().detectors()[0].model().clone();
    let rotation = rotation_from_angles([0.0, 0.0, std::f64::consts::FRAC_PI_2]);
    let geometry = GeometryManager::new()
        .with_detector(
            Detector::new("rotated", Vector3::zeros(), *rotation.matrix(), model).unwrap(),
        )
        .unwrap();

    let document = GearExporter::default()
        .document(&geometry, &registry(&geometry))
        .unwrap();
    let angles = document.layers[0].ladder.rotation;
    assert!(angles[0].abs() < 1e-9);
    assert!(angles[1].abs() < 1e-9);
    assert!((angles[2] + 90.0).abs() < 1e-9);
}

// ==================== Magnetic Field Tests ====================

#[test]
fn test_constant_field_in_tesla() {
    let mut geometry = telescope();
    geometry.set_magnetic_field(MagneticField::Constant(Vector3::new(0.0, 0.0, 0.0015)));

    let xml = render(&geometry);
    let field = &elements(&xml, "BField")[0];
    assert_eq!(attribute(field, "type"), "ConstantBField");
    assert_eq!(attribute(field, "z"), "1.5");
    assert_eq!(attribute(field, "x"), "0");
}

#[test]
fn test_no_field_writes_zero_vector() {
    let xml = render(&telescope());
    let field = &elements(&xml, "BField")[0];
    for axis in ["x", "y", "z"] {
        assert_eq!(attribute(field, axis), "0");
    }
}

#[test]
fn test_unsupported_field_falls_back_to_zero() {
    let mut geometry = telescope();
    geometry.set_magnetic_field(MagneticField::NonUniform("mesh".to_string()));

    let document = GearExporter::default()
        .document(&geometry, &registry(&geometry))
        .unwrap();
    assert_eq!(document.field, BFieldRecord::default());

    let xml = render(&geometry);
    let field = &elements(&xml, "BField")[0];
    assert_eq!(attribute(field, "type"), "ConstantBField");
    assert_eq!(attribute(field, "z"), "0");
}

// ==================== Serialization Tests ====================

#[test]
fn test_rendered_structure() {
    let xml = render(&telescope());

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(xml.ends_with("</gear>\n"));
    assert!(xml.contains("<!-- Detector: plane0 - type: test_model -->"));

    let global = &elements(&xml, "global")[0];
    assert_eq!(attribute(global, "detectorName"), DEFAULT_DETECTOR_NAME);
    assert_eq!(attribute(&elements(&xml, "siplanesNumber")[0], "number"), "2");
    assert_eq!(attribute(&elements(&xml, "siplanesID")[0], "ID"), "0");
    assert_eq!(
        attribute(&elements(&xml, "siplanesType")[0], "type"),
        SIPLANES_TYPE
    );

    assert_eq!(elements(&xml, "layer").len(), 2);
    let ladders = elements(&xml, "ladder");
    assert_eq!(attribute(&ladders[0], "ID"), "0");
    assert_eq!(attribute(&ladders[1], "ID"), "1");
    assert_eq!(attribute(&ladders[1], "positionZ"), "50");
    assert_eq!(attribute(&ladders[0], "rotationZY"), "0");
    assert_eq!(attribute(&ladders[0], "radLength"), "94.65");

    let sensitive = elements(&xml, "sensitive");
    assert_eq!(attribute(&sensitive[0], "sizeX"), "5");
    assert_eq!(attribute(&sensitive[0], "sizeY"), "5");
    assert_eq!(attribute(&sensitive[0], "thickness"), "0.2");
    assert_eq!(attribute(&sensitive[0], "npixelX"), "100");
    assert_eq!(attribute(&sensitive[0], "pitchX"), "0.05");
    assert_eq!(attribute(&sensitive[0], "resolution"), "0.0144338");
    assert_eq!(attribute(&sensitive[0], "rotation1"), "1");
    assert_eq!(attribute(&sensitive[0], "rotation2"), "0");
    assert_eq!(attribute(&sensitive[0], "rotation4"), "1");
}

#[test]
fn test_render_is_byte_identical() {
    let geometry = telescope();
    let first = GearExporter::default()
        .render(&geometry, &registry(&geometry))
        .unwrap();
    let second = GearExporter::new(DEFAULT_DETECTOR_NAME)
        .render(&geometry, &registry(&geometry))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_comment_with_double_dash_stays_valid() {
    let model = telescope().detectors()[0].model().clone();
    let geometry = GeometryManager::new()
        .with_detector(Detector::new("a--b", Vector3::zeros(), Matrix3::identity(), model).unwrap())
        .unwrap();
    let xml = render(&geometry);
    assert!(xml.contains("a- -b"));
    assert_eq!(elements(&xml, "layer").len(), 1);
}

// ==================== File Export Tests ====================

#[test]
fn test_export_truncates_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("geometry.xml");
    std::fs::write(&path, "x".repeat(100_000)).unwrap();

    let geometry = telescope();
    let exporter = GearExporter::new("TestBeam");
    exporter.export(&geometry, &registry(&geometry), &path).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, exporter.render(&geometry, &registry(&geometry)).unwrap());
}

#[test]
fn test_export_reports_path_on_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("geometry.xml");

    let geometry = telescope();
    let result = GearExporter::default().export(&geometry, &registry(&geometry), &path);
    match result {
        Err(GearError::FileError { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected file error, got {other:?}"),
    }
}
