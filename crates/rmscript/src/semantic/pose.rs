//! Head pose composition.
//!
//! Poses are homogeneous 4x4 matrices in column-vector convention,
//! composed as `T(x, y, z) · Rz(yaw) · Ry(pitch) · Rx(roll)`: rotation in
//! the upper-left 3x3, translation in the last column, bottom row
//! `[0 0 0 1]`. Adapters multiply poses on the left of column vectors and
//! must share this convention.

use nalgebra::{Isometry3, Matrix4, Translation3, UnitQuaternion};

/// Builds a head pose from a translation in meters and intrinsic
/// roll/pitch/yaw in radians.
pub fn head_pose(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Matrix4<f64> {
    // nalgebra's Euler order is exactly Rz(yaw) · Ry(pitch) · Rx(roll).
    let rotation = UnitQuaternion::from_euler_angles(roll, pitch, yaw);
    Isometry3::from_parts(Translation3::new(x, y, z), rotation).to_homogeneous()
}
