//! camview core - pinhole and orthographic camera geometry
//!
//! Stateless helpers that compute camera intrinsics and convert points
//! between world space, normalized view coordinates and pixels. Every call
//! takes the camera and render settings explicitly.

pub mod camera;
pub mod error;
pub mod frame;
pub mod intrinsics;
pub mod projection;
pub mod record;
pub mod transform;

// Re-export commonly used types
pub use camera::{Camera, ProjectionMode, RenderSettings, SensorFit};
pub use error::{ConsistencyError, PreconditionError, ProjectionError, RecordError};
pub use frame::ViewFrame;
pub use intrinsics::{intrinsic, Intrinsics};
pub use projection::{
    project, project_with, unproject, world_to_view, NormalizedPoint, PixelProjection,
    ProjectionOptions,
};
pub use record::{camera_record, CameraRecord};
pub use transform::{EulerRotation, Transform};
