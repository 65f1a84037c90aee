use super::rotation::{gear_rotation_angles, rotation_angles, rotation_from_angles};
use super::*;
use nalgebra::{Matrix3, Rotation3, Vector2, Vector3};
use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

fn test_model() -> Arc<DetectorModel> {
    Arc::new(
        DetectorModel::new(
            "test",
            Vector2::new(100, 100),
            Vector2::new(0.05, 0.05),
            Vector3::new(6.0, 6.0, 0.3),
            Vector3::new(5.0, 5.0, 0.3),
        )
        .unwrap(),
    )
}

fn assert_round_trip(angles: [f64; 3]) {
    let rotation = rotation_from_angles(angles);
    let decoded = rotation_angles(rotation.matrix());
    assert!(decoded.iter().all(|a| a.is_finite()), "non-finite angles {decoded:?}");
    let rebuilt = rotation_from_angles(decoded);
    let deviation = (rotation.matrix() - rebuilt.matrix()).norm();
    assert!(deviation < 1e-7, "deviation {deviation:e} for {angles:?}");
}

// ==================== Detector Model Tests ====================

#[test]
fn test_matrix_size_from_pixel_grid() {
    let model = test_model();
    let matrix = model.matrix_size();
    assert_eq!(matrix.x, 100.0 * 0.05);
    assert_eq!(matrix.y, 100.0 * 0.05);
}

#[test]
fn test_model_rejects_non_positive_pitch() {
    let result = DetectorModel::new(
        "broken",
        Vector2::new(10, 10),
        Vector2::new(0.0, 0.05),
        Vector3::new(1.0, 1.0, 0.1),
        Vector3::new(1.0, 1.0, 0.1),
    );
    assert!(matches!(result, Err(GeometryError::InvalidModel { .. })));
}

#[test]
fn test_model_rejects_empty_grid() {
    let result = DetectorModel::new(
        "broken",
        Vector2::new(0, 10),
        Vector2::new(0.05, 0.05),
        Vector3::new(1.0, 1.0, 0.1),
        Vector3::new(1.0, 1.0, 0.1),
    );
    assert!(result.is_err());
}

#[test]
fn test_detector_rejects_reflection() {
    let reflection = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));
    let result = Detector::new("mirror", Vector3::zeros(), reflection, test_model());
    assert!(matches!(result, Err(GeometryError::InvalidOrientation { .. })));
}

#[test]
fn test_detector_rejects_scaled_matrix() {
    let scaled = Matrix3::identity() * 2.0;
    let result = Detector::new("scaled", Vector3::zeros(), scaled, test_model());
    assert!(matches!(result, Err(GeometryError::InvalidOrientation { .. })));
}

// ==================== Rotation Tests ====================

#[test]
fn test_identity_has_zero_angles() {
    let angles = rotation_angles(&Matrix3::identity());
    assert_eq!(angles.map(|a| a.abs()), [0.0, 0.0, 0.0]);
}

#[test]
fn test_single_axis_rotations() {
    let angle = 0.3;
    let about_x = rotation_angles(rotation_from_angles([angle, 0.0, 0.0]).matrix());
    assert!((about_x[0] - angle).abs() < 1e-12);
    assert!(about_x[1].abs() < 1e-12 && about_x[2].abs() < 1e-12);

    let about_y = rotation_angles(rotation_from_angles([0.0, angle, 0.0]).matrix());
    assert!((about_y[1] - angle).abs() < 1e-12);

    let about_z = rotation_angles(rotation_from_angles([0.0, 0.0, angle]).matrix());
    assert!((about_z[2] - angle).abs() < 1e-12);
}

#[test]
fn test_gear_angles_are_negated() {
    let rotation = rotation_from_angles([0.1, -0.2, 0.3]);
    let gear = gear_rotation_angles(&rotation);
    assert!((gear[0] + 0.1).abs() < 1e-12);
    assert!((gear[1] - 0.2).abs() < 1e-12);
    assert!((gear[2] + 0.3).abs() < 1e-12);
}

#[test]
fn test_matches_nalgebra_convention() {
    let rotation = Rotation3::from_euler_angles(0.4, -0.7, 1.9);
    let (roll, pitch, yaw) = rotation.euler_angles();
    let angles = rotation_angles(rotation.matrix());
    assert!((angles[0] - roll).abs() < 1e-12);
    assert!((angles[1] - pitch).abs() < 1e-12);
    assert!((angles[2] - yaw).abs() < 1e-12);
}

#[test]
fn test_gimbal_lock_round_trip() {
    assert_round_trip([0.5, FRAC_PI_2, -1.2]);
    assert_round_trip([0.5, -FRAC_PI_2, 2.2]);
    assert_round_trip([0.0, FRAC_PI_2, 0.0]);
}

#[test]
fn test_gimbal_lock_pins_alpha_to_zero() {
    let angles = rotation_angles(rotation_from_angles([0.5, FRAC_PI_2, -1.2]).matrix());
    assert!(angles[0].abs() < 1e-9);
    assert!((angles[1] - FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn test_near_gimbal_lock_round_trip() {
    assert_round_trip([0.3, FRAC_PI_2 - 1e-7, 0.8]);
    assert_round_trip([-2.0, -FRAC_PI_2 + 1e-10, 1.0]);
    assert_round_trip([1.0, FRAC_PI_2 - 1e-12, -3.0]);
}

#[test]
fn test_rounding_beyond_unit_domain_is_finite() {
    let mut matrix = *rotation_from_angles([0.0, -FRAC_PI_2, 0.0]).matrix();
    matrix[(2, 0)] = 1.0 + 1e-15;
    let angles = rotation_angles(&matrix);
    assert!(angles.iter().all(|a| a.is_finite()));
}

// ==================== Registry Tests ====================

#[test]
fn test_sequential_registry() {
    let registry = DetectorIdRegistry::sequential(["plane0", "plane1", "dut"]).unwrap();
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.get("plane0"), Some(0));
    assert_eq!(registry.get("dut"), Some(2));
    assert_eq!(registry.get("missing"), None);
    assert!(matches!(registry.id("missing"), Err(GeometryError::UnknownDetector(_))));
}

#[test]
fn test_registry_is_deterministic() {
    let names = ["a", "c", "b", "e", "d"];
    let first = DetectorIdRegistry::sequential(names).unwrap();
    let second = DetectorIdRegistry::sequential(names).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_registry_iterates_in_id_order() {
    let registry =
        DetectorIdRegistry::with_assignments([("dut", 20), ("plane0", 0), ("plane1", 1)]).unwrap();
    let order: Vec<_> = registry.iter().collect();
    assert_eq!(order, vec![(0, "plane0"), (1, "plane1"), (20, "dut")]);
}

#[test]
fn test_registry_rejects_duplicates() {
    let duplicate_name = DetectorIdRegistry::sequential(["a", "a"]);
    assert!(matches!(duplicate_name, Err(GeometryError::DuplicateDetector(_))));

    let duplicate_id = DetectorIdRegistry::with_assignments([("a", 3), ("b", 3)]);
    assert!(matches!(duplicate_id, Err(GeometryError::DuplicateId { id: 3, .. })));
}

// ==================== Geometry Tests ====================

#[test]
fn test_manager_rejects_duplicate_names() {
    let detector = Detector::new("plane", Vector3::zeros(), Matrix3::identity(), test_model()).unwrap();
    let mut geometry = GeometryManager::new();
    geometry.add_detector(detector.clone()).unwrap();
    assert!(matches!(
        geometry.add_detector(detector),
        Err(GeometryError::DuplicateDetector(_))
    ));
}

#[test]
fn test_geometry_config_build() {
    let toml = r#"
        [magnetic_field]
        model = "constant"
        field = ["0T", "0T", "1.5T"]

        [[detector]]
        name = "plane0"
        type = "mimosa26"
        position = ["0mm", "0mm", "0mm"]
        number_of_pixels = [1152, 576]
        pixel_size = ["18.4um", "18.4um"]
        size = ["21.2mm", "10.6mm", "50um"]

        [[detector]]
        name = "plane1"
        type = "mimosa26"
        position = [0, 0, "15cm"]
        orientation = ["0deg", "0deg", "90deg"]
        number_of_pixels = [1152, 576]
        pixel_size = ["18.4um", "18.4um"]
        size = ["21.2mm", "10.6mm", "50um"]
        sensor_size = ["21.2mm", "10.6mm", "20um"]
    "#;

    let geometry = GeometryConfig::from_str(toml).unwrap().build().unwrap();
    assert_eq!(geometry.detectors().len(), 2);

    let plane1 = geometry.detector("plane1").unwrap();
    assert!((plane1.position().z - 150.0).abs() < 1e-9);
    assert!((plane1.model().pixel_size().x - 0.0184).abs() < 1e-12);
    assert!((plane1.model().sensor_size().z - 0.02).abs() < 1e-12);
    let angles = rotation_angles(plane1.orientation().matrix());
    assert!((angles[2] - FRAC_PI_2).abs() < 1e-12);

    let plane0 = geometry.detector("plane0").unwrap();
    assert_eq!(plane0.model().sensor_size(), plane0.model().size());

    match geometry.magnetic_field() {
        MagneticField::Constant(field) => assert!((field.z - 0.0015).abs() < 1e-15),
        other => panic!("unexpected field {other:?}"),
    }
}

#[test]
fn test_geometry_config_other_field_model() {
    let toml = r#"
        [magnetic_field]
        model = "mesh"
    "#;
    let geometry = GeometryConfig::from_str(toml).unwrap().build().unwrap();
    assert_eq!(
        geometry.magnetic_field(),
        &MagneticField::NonUniform("mesh".to_string())
    );
    assert_eq!(geometry.magnetic_field().model_name(), "mesh");
}

#[test]
fn test_geometry_config_bad_unit() {
    let toml = r#"
        [[detector]]
        name = "plane0"
        type = "m26"
        position = ["0 furlong", 0, 0]
        number_of_pixels = [10, 10]
        pixel_size = [0.05, 0.05]
        size = [1, 1, 0.1]
    "#;
    let result = GeometryConfig::from_str(toml).unwrap().build();
    assert!(matches!(result, Err(GeometryError::UnitError(_))));
}
