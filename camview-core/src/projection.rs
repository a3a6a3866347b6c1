//! World <-> image projection through a camera's view frame
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, RenderSettings};
use crate::error::{ConsistencyError, PreconditionError, ProjectionError};
use crate::frame::ViewFrame;

/// Default round-trip tolerance in world units
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Tunables for [`project_with`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Largest allowed distance between a point and its round-tripped copy.
    pub tolerance: f64,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// A point in normalized view coordinates.
///
/// `x` and `y` run from 0 to 1 across the image (left to right, bottom to
/// top); `depth` is the distance in front of the camera along its view axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl NormalizedPoint {
    /// Image center at zero depth: the eye itself.
    pub const EYE: NormalizedPoint = NormalizedPoint {
        x: 0.5,
        y: 0.5,
        depth: 0.0,
    };

    pub fn new(x: f64, y: f64, depth: f64) -> Self {
        Self { x, y, depth }
    }
}

/// A point projected into pixel space. `py` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelProjection {
    pub px: i64,
    pub py: i64,
    pub depth: f64,
}

/// Validated camera state shared by the forward and inverse mappings
struct Placement {
    world: Matrix4<f64>,
    frame: ViewFrame,
}

impl Placement {
    fn new(camera: &Camera, render: &RenderSettings) -> Result<Self, PreconditionError> {
        camera.validate()?;
        render.validate()?;
        Ok(Self {
            world: camera.matrix_world_normalized()?,
            frame: ViewFrame::new(camera, render),
        })
    }
}

/// Map a world-space point to normalized view coordinates.
pub fn world_to_view(
    camera: &Camera,
    point: &Point3<f64>,
    render: &RenderSettings,
) -> Result<NormalizedPoint, PreconditionError> {
    let placement = Placement::new(camera, render)?;
    let inverse = placement
        .world
        .try_inverse()
        .ok_or(PreconditionError::DegenerateTransform)?;

    let local = inverse.transform_point(point);
    let depth = -local.z;

    if camera.is_perspective() && depth == 0.0 {
        return Ok(NormalizedPoint::EYE);
    }

    let (left, right, bottom, top) = ViewFrame::edges(&placement.frame.at_depth(depth));
    if right == left || top == bottom {
        return Err(PreconditionError::DegenerateFrame);
    }

    Ok(NormalizedPoint {
        x: (local.x - left) / (right - left),
        y: (local.y - bottom) / (top - bottom),
        depth,
    })
}

/// Map normalized view coordinates back to the world-space point they came from.
///
/// The frame is mirrored through the eye so that depth runs along +Z,
/// rescaled to `point.depth` for perspective cameras, interpolated at
/// `(x, y)` and mirrored back. Orthographic frames are never rescaled.
pub fn unproject(
    camera: &Camera,
    point: &NormalizedPoint,
    render: &RenderSettings,
) -> Result<Point3<f64>, PreconditionError> {
    let placement = Placement::new(camera, render)?;

    let mirrored = placement.frame.mirrored();
    let corners = if camera.is_perspective() {
        if *point == NormalizedPoint::EYE {
            // every ray of the frame meets at the eye
            return Ok(placement.world.transform_point(&Point3::origin()));
        }
        mirrored.map(|v| v * (point.depth / v.z))
    } else {
        mirrored
    };

    let (left, right, bottom, top) = ViewFrame::edges(&corners);
    let cx = point.x * (right - left) + left;
    let cy = point.y * (top - bottom) + bottom;

    let local = Point3::new(-cx, -cy, -point.depth);
    Ok(placement.world.transform_point(&local))
}

/// Project a world-space point to pixel coordinates with the default options.
pub fn project(
    camera: &Camera,
    point: &Point3<f64>,
    render: &RenderSettings,
) -> Result<PixelProjection, ProjectionError> {
    project_with(camera, point, render, &ProjectionOptions::default())
}

/// Project a world-space point to pixel coordinates.
///
/// The normalized coordinates are mapped back through [`unproject`] and must
/// land within `options.tolerance` of `point`, measured as a Euclidean
/// distance.
pub fn project_with(
    camera: &Camera,
    point: &Point3<f64>,
    render: &RenderSettings,
    options: &ProjectionOptions,
) -> Result<PixelProjection, ProjectionError> {
    let view = world_to_view(camera, point, render)?;

    let (w, h) = render.effective_resolution();
    let (w, h) = (w as f64, h as f64);
    let px = (view.x * w).round() as i64;
    let py = (h - view.y * h).round() as i64;

    let recovered = unproject(camera, &view, render)?;
    let residual: Vector3<f64> = recovered - point;
    let residual = residual.norm();
    if !(residual <= options.tolerance) {
        log::warn!(
            "projection of {point} round-tripped to {recovered} (residual {residual})"
        );
        return Err(ConsistencyError {
            expected: *point,
            recovered,
            residual,
            tolerance: options.tolerance,
        }
        .into());
    }

    log::debug!("projected {point} to ({px}, {py}) at depth {}", view.depth);
    Ok(PixelProjection {
        px,
        py,
        depth: view.depth,
    })
}
