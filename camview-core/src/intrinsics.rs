//! Pinhole intrinsics derived from a camera and its render settings
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::camera::{positive, Camera, RenderSettings, SensorFit};
use crate::error::PreconditionError;

/// Focal lengths and principal point in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

impl Intrinsics {
    /// Return the 3x3 camera matrix K.
    pub fn k_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.fx, 0.0, self.cx, //
            0.0, self.fy, self.cy, //
            0.0, 0.0, 1.0,
        )
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.fx, self.fy, self.cx, self.cy]
    }
}

/// Compute pinhole intrinsics for `camera` rendering into `render`.
///
/// The image must be unscaled and the lens must describe the horizontal
/// field of view. The principal point keeps the host's conventions: `shift_x`
/// moves it left, and `shift_y` is a fraction of the image *width*.
pub fn intrinsic(camera: &Camera, render: &RenderSettings) -> Result<Intrinsics, PreconditionError> {
    if render.resolution_percentage != 100 {
        return Err(PreconditionError::ScaledResolution(render.resolution_percentage));
    }
    if camera.sensor_fit == SensorFit::Vertical {
        return Err(PreconditionError::VerticalSensorFit);
    }
    // orthographic cameras still carry a lens for K
    positive("lens", camera.lens)?;
    positive("sensor_width", camera.sensor_width)?;
    camera.validate()?;
    render.validate()?;

    let w = render.resolution_x as f64;
    let h = render.resolution_y as f64;

    let fx = camera.lens / camera.sensor_width * w;
    let fy = fx * render.pixel_aspect_ratio();
    let cx = w * (0.5 - camera.shift_x);
    let cy = h * 0.5 + w * camera.shift_y;

    log::debug!("intrinsics fx={fx} fy={fy} cx={cx} cy={cy}");
    Ok(Intrinsics { fx, fy, cx, cy })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_camera() {
        let camera = Camera::new(35.0, 32.0);
        let k = intrinsic(&camera, &RenderSettings::new(800, 600)).unwrap();
        assert_eq!(
            k,
            Intrinsics {
                fx: 875.0,
                fy: 875.0,
                cx: 400.0,
                cy: 300.0
            }
        );
    }

    #[test]
    fn test_shift_conventions() {
        let camera = Camera::new(35.0, 32.0).with_shift(0.25, 0.125);
        let k = intrinsic(&camera, &RenderSettings::new(800, 600)).unwrap();
        assert_eq!(k.cx, 200.0);
        // shift_y scales with the width, not the height
        assert_eq!(k.cy, 400.0);
    }

    #[test]
    fn test_pixel_aspect_scales_fy() {
        let camera = Camera::new(35.0, 32.0);
        let render = RenderSettings::new(800, 600).with_pixel_aspect(1.0, 2.0);
        let k = intrinsic(&camera, &render).unwrap();
        assert_eq!(k.fy, 2.0 * k.fx);
    }

    #[test]
    fn test_k_matrix_layout() {
        let k = Intrinsics {
            fx: 1.0,
            fy: 2.0,
            cx: 3.0,
            cy: 4.0,
        }
        .k_matrix();
        assert_eq!(k[(0, 0)], 1.0);
        assert_eq!(k[(1, 1)], 2.0);
        assert_eq!(k[(0, 2)], 3.0);
        assert_eq!(k[(1, 2)], 4.0);
        assert_eq!(k[(2, 2)], 1.0);
        assert_eq!(k[(1, 0)], 0.0);
    }

    #[test]
    fn test_rejects_scaled_resolution() {
        let camera = Camera::new(35.0, 32.0);
        let render = RenderSettings::new(800, 600).with_percentage(50);
        assert_eq!(
            intrinsic(&camera, &render),
            Err(PreconditionError::ScaledResolution(50))
        );
    }

    #[test]
    fn test_orthographic_camera_needs_sensor_width() {
        let mut camera = Camera::orthographic(4.0);
        camera.sensor_width = 0.0;
        assert_eq!(
            intrinsic(&camera, &RenderSettings::new(800, 600)),
            Err(PreconditionError::NonPositive {
                field: "sensor_width",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_vertical_fit() {
        let camera = Camera::new(35.0, 32.0).with_sensor_fit(SensorFit::Vertical);
        assert_eq!(
            intrinsic(&camera, &RenderSettings::new(800, 600)),
            Err(PreconditionError::VerticalSensorFit)
        );
    }
}
