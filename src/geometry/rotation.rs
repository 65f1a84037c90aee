//! Decomposition of orientation matrices into the three planar rotation angles
//! used by GEAR telescope descriptions.
//!
//! The matrix is read as `R = Rz(γ) · Ry(β) · Rx(α)`: a rotation in the Z-Y plane
//! (about x) first, then in the Z-X plane (about y), then in the X-Y plane
//! (about z). GEAR stores the negated angles, see [`gear_rotation_angles`].

use nalgebra::{Matrix3, Rotation3, Vector3};

/// Below this value of `cos β` the x and z rotations are degenerate (gimbal lock)
pub const GIMBAL_LOCK_EPSILON: f64 = 1e-9;

/// Extract `[α, β, γ]` (radians) from a rotation matrix.
///
/// * `β = -asin(R31)`, with `R31` clamped to `[-1, 1]`
/// * `γ = atan2(R21, R11)`
/// * `α` from the second row of `Rz(-γ) · R`, which equals `atan2(R32, R33)` away
///   from gimbal lock but stays consistent with `γ` close to it
///
/// At gimbal lock only `α ± γ` is defined; `γ` is then read from the upper-left
/// block so that `α` comes out as zero. The result is finite for finite input.
pub fn rotation_angles(matrix: &Matrix3<f64>) -> [f64; 3] {
    let r31 = matrix[(2, 0)].clamp(-1.0, 1.0);
    let beta = -r31.asin();

    let cos_beta = matrix[(0, 0)].hypot(matrix[(1, 0)]);
    let gamma = if cos_beta < GIMBAL_LOCK_EPSILON {
        (-matrix[(0, 1)]).atan2(matrix[(1, 1)])
    } else {
        matrix[(1, 0)].atan2(matrix[(0, 0)])
    };

    // Rz(-γ) · R = Ry(β) · Rx(α), whose second row is [0, cos α, -sin α]
    let (sin_gamma, cos_gamma) = gamma.sin_cos();
    let cos_alpha = -sin_gamma * matrix[(0, 1)] + cos_gamma * matrix[(1, 1)];
    let sin_alpha = sin_gamma * matrix[(0, 2)] - cos_gamma * matrix[(1, 2)];
    let alpha = sin_alpha.atan2(cos_alpha);

    [alpha, beta, gamma]
}

/// Angles as written to GEAR files: `[rotationZY, rotationZX, rotationXY]`, radians
pub fn gear_rotation_angles(rotation: &Rotation3<f64>) -> [f64; 3] {
    let [alpha, beta, gamma] = rotation_angles(rotation.matrix());
    [-alpha, -beta, -gamma]
}

/// Rebuild the rotation from `[α, β, γ]`; inverse of [`rotation_angles`]
pub fn rotation_from_angles(angles: [f64; 3]) -> Rotation3<f64> {
    let [alpha, beta, gamma] = angles;
    Rotation3::from_axis_angle(&Vector3::z_axis(), gamma)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), beta)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), alpha)
}
