//! Camera placement transforms
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::PreconditionError;

/// Columns shorter than this cannot be normalized.
const MIN_AXIS_LENGTH: f64 = 1e-12;

/// Euler rotation around three axes (in radians), applied X then Y then Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerRotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerRotation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl Default for EulerRotation {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for camera world matrices
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from an Euler rotation
    pub fn rotation_matrix(rotation: &EulerRotation) -> Matrix4<f64> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Compose location, rotation and scale into an object-to-world matrix
    pub fn world_matrix(
        location: &Point3<f64>,
        rotation: &EulerRotation,
        scale: &Vector3<f64>,
    ) -> Matrix4<f64> {
        Self::translation_matrix(location.x, location.y, location.z)
            * Self::rotation_matrix(rotation)
            * Self::scale_matrix(scale.x, scale.y, scale.z)
    }

    /// Camera-to-world matrix for a camera at `eye` whose -Z axis points at `target`.
    ///
    /// World +Z is kept as up unless the camera looks straight along it, in
    /// which case +Y is used.
    pub fn look_at(eye: &Point3<f64>, target: &Point3<f64>) -> Matrix4<f64> {
        let forward = target - eye;
        let up = if forward.cross(&Vector3::z()).norm() > MIN_AXIS_LENGTH {
            Vector3::z()
        } else {
            Vector3::y()
        };
        let mut matrix = Rotation3::look_at_rh(&forward, &up)
            .inverse()
            .to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&eye.coords);
        matrix
    }

    /// Remove scale from a world matrix by normalizing each basis column.
    /// Translation is kept.
    pub fn orthonormalized(matrix: &Matrix4<f64>) -> Result<Matrix4<f64>, PreconditionError> {
        let mut normalized = *matrix;
        for col in 0..3 {
            let axis = matrix.fixed_view::<3, 1>(0, col).into_owned();
            let length = axis.norm();
            if !(length > MIN_AXIS_LENGTH) {
                return Err(PreconditionError::DegenerateTransform);
            }
            normalized
                .fixed_view_mut::<3, 1>(0, col)
                .copy_from(&(axis / length));
        }
        Ok(normalized)
    }
}
