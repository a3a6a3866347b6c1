//! Error types for camera projection
use nalgebra::Point3;
use thiserror::Error;

/// A camera or render configuration that the projection math cannot use.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreconditionError {
    #[error("resolution percentage must be 100 for intrinsics, got {0}")]
    ScaledResolution(u32),
    #[error("sensor fit must not be vertical for intrinsics")]
    VerticalSensorFit,
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("camera world matrix is degenerate")]
    DegenerateTransform,
    #[error("camera view frame has zero extent")]
    DegenerateFrame,
}

/// Forward projection followed by the inverse did not land on the input point.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "projection round trip missed {expected} by {residual} (tolerance {tolerance}), recovered {recovered}"
)]
pub struct ConsistencyError {
    pub expected: Point3<f64>,
    pub recovered: Point3<f64>,
    pub residual: f64,
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error("failed to encode camera record: {0}")]
    Json(#[from] serde_json::Error),
}
