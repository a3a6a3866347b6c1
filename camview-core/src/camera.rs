//! Camera calibration and render settings
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

use crate::error::PreconditionError;
use crate::transform::Transform;

/// Projection mode of a camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Which sensor dimension the field of view is fitted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorFit {
    /// Fit to the larger image dimension.
    #[default]
    Auto,
    Horizontal,
    Vertical,
}

impl SensorFit {
    /// Resolve `Auto` against the image aspect. Wide or square images fit horizontally.
    pub fn resolve(self, aspect_x: f64, aspect_y: f64) -> SensorFit {
        match self {
            SensorFit::Auto if aspect_x >= aspect_y => SensorFit::Horizontal,
            SensorFit::Auto => SensorFit::Vertical,
            fit => fit,
        }
    }
}

/// A calibrated camera placed in the world.
///
/// The camera looks down its local -Z axis with +Y up. Lengths on the sensor
/// are in millimetres; shifts are fractions of the larger image dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Focal length in millimetres.
    pub lens: f64,
    pub sensor_width: f64,
    pub sensor_height: f64,
    pub sensor_fit: SensorFit,
    pub shift_x: f64,
    pub shift_y: f64,
    pub mode: ProjectionMode,
    /// Width of the orthographic frame in world units.
    pub ortho_scale: f64,
    /// Camera-to-world transform. Scale is ignored by projection.
    pub matrix_world: Matrix4<f64>,
}

impl Camera {
    pub fn new(lens: f64, sensor_width: f64) -> Self {
        Self {
            lens,
            sensor_width,
            ..Default::default()
        }
    }

    pub fn orthographic(ortho_scale: f64) -> Self {
        Self {
            mode: ProjectionMode::Orthographic,
            ortho_scale,
            ..Default::default()
        }
    }

    pub fn with_shift(mut self, shift_x: f64, shift_y: f64) -> Self {
        self.shift_x = shift_x;
        self.shift_y = shift_y;
        self
    }

    pub fn with_sensor_fit(mut self, fit: SensorFit) -> Self {
        self.sensor_fit = fit;
        self
    }

    pub fn with_matrix_world(mut self, matrix_world: Matrix4<f64>) -> Self {
        self.matrix_world = matrix_world;
        self
    }

    /// Place the camera at `eye` looking at `target`.
    pub fn looking_at(self, eye: &Point3<f64>, target: &Point3<f64>) -> Self {
        self.with_matrix_world(Transform::look_at(eye, target))
    }

    pub fn is_perspective(&self) -> bool {
        self.mode == ProjectionMode::Perspective
    }

    /// Camera position in world space.
    pub fn location(&self) -> Point3<f64> {
        Point3::new(
            self.matrix_world[(0, 3)],
            self.matrix_world[(1, 3)],
            self.matrix_world[(2, 3)],
        )
    }

    /// Camera-to-world transform with scale removed.
    pub fn matrix_world_normalized(&self) -> Result<Matrix4<f64>, PreconditionError> {
        Transform::orthonormalized(&self.matrix_world)
    }

    pub(crate) fn validate(&self) -> Result<(), PreconditionError> {
        match self.mode {
            ProjectionMode::Perspective => {
                positive("lens", self.lens)?;
                positive("sensor_width", self.sensor_width)?;
                if self.sensor_fit == SensorFit::Vertical {
                    positive("sensor_height", self.sensor_height)?;
                }
            }
            ProjectionMode::Orthographic => positive("ortho_scale", self.ortho_scale)?,
        }
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            lens: 50.0,
            sensor_width: 36.0,
            sensor_height: 24.0,
            sensor_fit: SensorFit::Auto,
            shift_x: 0.0,
            shift_y: 0.0,
            mode: ProjectionMode::Perspective,
            ortho_scale: 6.0,
            matrix_world: Matrix4::identity(),
        }
    }
}

/// Output image settings the camera renders into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    pub pixel_aspect_x: f64,
    pub pixel_aspect_y: f64,
}

impl RenderSettings {
    pub fn new(resolution_x: u32, resolution_y: u32) -> Self {
        Self {
            resolution_x,
            resolution_y,
            ..Default::default()
        }
    }

    pub fn with_percentage(mut self, percentage: u32) -> Self {
        self.resolution_percentage = percentage;
        self
    }

    pub fn with_pixel_aspect(mut self, x: f64, y: f64) -> Self {
        self.pixel_aspect_x = x;
        self.pixel_aspect_y = y;
        self
    }

    pub fn pixel_aspect_ratio(&self) -> f64 {
        self.pixel_aspect_y / self.pixel_aspect_x
    }

    /// Image aspect in sensor units: resolution times pixel aspect on each axis.
    pub fn aspect(&self) -> (f64, f64) {
        (
            self.resolution_x as f64 * self.pixel_aspect_x,
            self.resolution_y as f64 * self.pixel_aspect_y,
        )
    }

    /// Pixel dimensions after applying the resolution percentage, truncated.
    pub fn effective_resolution(&self) -> (u32, u32) {
        let scale = self.resolution_percentage as f64 / 100.0;
        (
            (scale * self.resolution_x as f64) as u32,
            (scale * self.resolution_y as f64) as u32,
        )
    }

    pub(crate) fn validate(&self) -> Result<(), PreconditionError> {
        positive("resolution_x", self.resolution_x as f64)?;
        positive("resolution_y", self.resolution_y as f64)?;
        positive("resolution_percentage", self.resolution_percentage as f64)?;
        positive("pixel_aspect_x", self.pixel_aspect_x)?;
        positive("pixel_aspect_y", self.pixel_aspect_y)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
            pixel_aspect_x: 1.0,
            pixel_aspect_y: 1.0,
        }
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), PreconditionError> {
    // NaN fails too
    if value > 0.0 {
        Ok(())
    } else {
        Err(PreconditionError::NonPositive { field, value })
    }
}
