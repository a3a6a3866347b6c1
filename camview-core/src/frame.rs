//! Camera view frame: the image plane corners in camera-local space
use nalgebra::Vector3;

use crate::camera::{Camera, ProjectionMode, RenderSettings, SensorFit};

/// Corner indices, in the order the frame stores them
pub const TOP_RIGHT: usize = 0;
pub const BOTTOM_RIGHT: usize = 1;
pub const BOTTOM_LEFT: usize = 2;
pub const TOP_LEFT: usize = 3;

/// Four corners of the view plane in camera-local coordinates.
///
/// Perspective frames sit at depth `-lens / sensor` with a width of one unit
/// along the fitted axis; orthographic frames sit at depth -1 and span
/// `ortho_scale` world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame {
    pub corners: [Vector3<f64>; 4],
    pub mode: ProjectionMode,
}

impl ViewFrame {
    pub fn new(camera: &Camera, render: &RenderSettings) -> Self {
        let (aspect_x, aspect_y) = render.aspect();
        let (asp_x, asp_y) = match camera.sensor_fit.resolve(aspect_x, aspect_y) {
            SensorFit::Vertical => (aspect_x / aspect_y, 1.0),
            _ => (1.0, aspect_y / aspect_x),
        };

        let (fac_x, fac_y, shift, depth) = match camera.mode {
            ProjectionMode::Orthographic => (
                0.5 * camera.ortho_scale * asp_x,
                0.5 * camera.ortho_scale * asp_y,
                Vector3::new(camera.shift_x, camera.shift_y, 0.0) * camera.ortho_scale,
                -1.0,
            ),
            ProjectionMode::Perspective => {
                // only an explicit vertical fit measures the lens against sensor height
                let half_sensor = 0.5
                    * match camera.sensor_fit {
                        SensorFit::Vertical => camera.sensor_height,
                        _ => camera.sensor_width,
                    };
                let fac = 0.5;
                (
                    fac * asp_x,
                    fac * asp_y,
                    Vector3::new(camera.shift_x, camera.shift_y, 0.0) * (fac * 2.0),
                    fac * camera.lens / -half_sensor,
                )
            }
        };

        let corner =
            |sx: f64, sy: f64| Vector3::new(shift.x + sx * fac_x, shift.y + sy * fac_y, depth);
        Self {
            corners: [
                corner(1.0, 1.0),
                corner(1.0, -1.0),
                corner(-1.0, -1.0),
                corner(-1.0, 1.0),
            ],
            mode: camera.mode,
        }
    }

    /// The frame as seen at `depth` along the viewing axis.
    ///
    /// Perspective corners are slid along their rays until their z equals
    /// `-depth`; a zero depth collapses every corner onto the eye.
    /// Orthographic corners do not depend on depth and are returned as is.
    pub fn at_depth(&self, depth: f64) -> [Vector3<f64>; 4] {
        match self.mode {
            ProjectionMode::Orthographic => self.corners,
            ProjectionMode::Perspective => self.corners.map(|v| v * (-depth / v.z)),
        }
    }

    /// Corners mirrored through the eye onto the positive depth axis.
    pub fn mirrored(&self) -> [Vector3<f64>; 4] {
        self.corners.map(|v| -v)
    }

    /// Center of the frame in camera-local space.
    pub fn center(&self) -> Vector3<f64> {
        self.corners.iter().sum::<Vector3<f64>>() / 4.0
    }

    /// Left, right, bottom and top edges of a set of corners.
    pub(crate) fn edges(corners: &[Vector3<f64>; 4]) -> (f64, f64, f64, f64) {
        (
            corners[BOTTOM_LEFT].x,
            corners[BOTTOM_RIGHT].x,
            corners[BOTTOM_RIGHT].y,
            corners[TOP_RIGHT].y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perspective_frame_horizontal() {
        let camera = Camera::new(35.0, 32.0);
        let frame = ViewFrame::new(&camera, &RenderSettings::new(800, 600));
        let depth = -35.0 / 32.0;
        assert_relative_eq!(frame.corners[TOP_RIGHT], Vector3::new(0.5, 0.375, depth));
        assert_relative_eq!(frame.corners[BOTTOM_RIGHT], Vector3::new(0.5, -0.375, depth));
        assert_relative_eq!(frame.corners[BOTTOM_LEFT], Vector3::new(-0.5, -0.375, depth));
        assert_relative_eq!(frame.corners[TOP_LEFT], Vector3::new(-0.5, 0.375, depth));
        assert_relative_eq!(frame.center(), Vector3::new(0.0, 0.0, depth));
    }

    #[test]
    fn test_portrait_frame_fits_vertically() {
        let camera = Camera::new(50.0, 36.0);
        let frame = ViewFrame::new(&camera, &RenderSettings::new(600, 800));
        assert_relative_eq!(frame.corners[TOP_RIGHT].x, 0.375);
        assert_relative_eq!(frame.corners[TOP_RIGHT].y, 0.5);
        // auto fit still measures the lens against the sensor width
        assert_relative_eq!(frame.corners[TOP_RIGHT].z, -50.0 / 36.0);
    }

    #[test]
    fn test_shift_moves_frame() {
        let camera = Camera::new(50.0, 36.0).with_shift(0.1, -0.2);
        let frame = ViewFrame::new(&camera, &RenderSettings::new(1000, 1000));
        assert_relative_eq!(frame.center(), Vector3::new(0.1, -0.2, -50.0 / 36.0));
    }

    #[test]
    fn test_orthographic_frame() {
        let camera = Camera::orthographic(4.0);
        let frame = ViewFrame::new(&camera, &RenderSettings::new(800, 400));
        assert_relative_eq!(frame.corners[TOP_RIGHT], Vector3::new(2.0, 1.0, -1.0));
        assert_relative_eq!(frame.corners[BOTTOM_LEFT], Vector3::new(-2.0, -1.0, -1.0));
        assert_eq!(frame.at_depth(7.5), frame.corners);
    }

    #[test]
    fn test_perspective_at_depth() {
        let camera = Camera::new(32.0, 32.0);
        let frame = ViewFrame::new(&camera, &RenderSettings::new(100, 100));
        let corners = frame.at_depth(4.0);
        assert_relative_eq!(corners[TOP_RIGHT], Vector3::new(2.0, 2.0, -4.0));
        for corner in frame.at_depth(0.0) {
            assert_eq!(corner.norm(), 0.0);
        }
    }

    #[test]
    fn test_mirrored_flips_depth() {
        let camera = Camera::new(35.0, 32.0);
        let frame = ViewFrame::new(&camera, &RenderSettings::new(800, 600));
        for corner in frame.mirrored() {
            assert!(corner.z > 0.0);
        }
    }
}
