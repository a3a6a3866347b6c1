//! Exportable snapshot of a camera's calibration
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, RenderSettings};
use crate::error::RecordError;
use crate::frame::ViewFrame;
use crate::intrinsics::intrinsic;

/// Calibration data other tools need to reproduce the projection:
/// three view-frame corners mirrored onto +Z, the orthonormalized world
/// matrix as rows, and `[fx, fy, cx, cy]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    pub frame: [[f64; 3]; 3],
    pub matrix_world: [[f64; 4]; 4],
    #[serde(rename = "int")]
    pub intrinsics: [f64; 4],
}

impl CameraRecord {
    pub fn new(camera: &Camera, render: &RenderSettings) -> Result<Self, RecordError> {
        let intrinsics = intrinsic(camera, render)?.to_array();
        let world = camera.matrix_world_normalized()?;

        let mirrored = ViewFrame::new(camera, render).mirrored();
        let frame = [0, 1, 2].map(|i| [mirrored[i].x, mirrored[i].y, mirrored[i].z]);
        let matrix_world =
            [0, 1, 2, 3].map(|r| [world[(r, 0)], world[(r, 1)], world[(r, 2)], world[(r, 3)]]);

        Ok(Self {
            frame,
            matrix_world,
            intrinsics,
        })
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the calibration record for `camera`.
pub fn camera_record(camera: &Camera, render: &RenderSettings) -> Result<CameraRecord, RecordError> {
    CameraRecord::new(camera, render)
}
