use serde::Deserialize;

/// Which sensor axis the render resolution is fitted to.
///
/// `Auto` resolves the same way as `Horizontal`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SensorFit {
    #[default]
    Auto,
    Horizontal,
    Vertical,
}

impl std::fmt::Display for SensorFit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SensorFit::Auto => "AUTO",
            SensorFit::Horizontal => "HORIZONTAL",
            SensorFit::Vertical => "VERTICAL",
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: f32,
    pub pixel_aspect_x: f32,
    pub pixel_aspect_y: f32,
}

impl RenderSettings {
    /// Resolution actually rendered, after the percentage scale.
    pub fn scaled_resolution(&self) -> (f32, f32) {
        let scale = self.resolution_percentage / 100.0;
        (
            self.resolution_x as f32 * scale,
            self.resolution_y as f32 * scale,
        )
    }

    pub fn pixel_aspect_ratio(&self) -> f32 {
        self.pixel_aspect_x / self.pixel_aspect_y
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LensSettings {
    /// Focal length in millimeters.
    pub focal: f32,
    /// Sensor dimensions in millimeters.
    pub sensor_width: f32,
    pub sensor_height: f32,
    pub sensor_fit: SensorFit,
}

/// Pinhole intrinsics of the render camera.
///
/// `alpha_u`/`alpha_v` are the focal length expressed in pixels along each
/// axis, `(u_0, v_0)` is the principal point. Skew is always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    pub focal: f32,
    pub alpha_u: f32,
    pub alpha_v: f32,
    pub skew: f32,
    pub u_0: f32,
    pub v_0: f32,
}

impl CameraIntrinsics {
    pub fn derive(render: &RenderSettings, lens: &LensSettings) -> Self {
        let (width, height) = render.scaled_resolution();
        let pixel_aspect = render.pixel_aspect_ratio();

        let (s_u, s_v) = match lens.sensor_fit {
            SensorFit::Vertical => (
                width / lens.sensor_width / pixel_aspect,
                height / lens.sensor_height,
            ),
            SensorFit::Auto | SensorFit::Horizontal => (
                width / lens.sensor_width,
                height * pixel_aspect / lens.sensor_height,
            ),
        };

        Self {
            focal: lens.focal,
            alpha_u: lens.focal * s_u,
            alpha_v: lens.focal * s_v,
            skew: 0.0,
            u_0: width / 2.0,
            v_0: height / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(fit: SensorFit) -> (RenderSettings, LensSettings) {
        (
            RenderSettings {
                resolution_x: 100,
                resolution_y: 100,
                resolution_percentage: 100.0,
                pixel_aspect_x: 1.0,
                pixel_aspect_y: 1.0,
            },
            LensSettings {
                focal: 50.0,
                sensor_width: 36.0,
                sensor_height: 24.0,
                sensor_fit: fit,
            },
        )
    }

    #[test]
    fn vertical_fit() {
        let (render, lens) = settings(SensorFit::Vertical);
        let k = CameraIntrinsics::derive(&render, &lens);

        assert!((k.alpha_u - 50.0 * (100.0 / 36.0)).abs() < 1e-3);
        assert!((k.alpha_v - 50.0 * (100.0 / 24.0)).abs() < 1e-3);
        assert_eq!(k.u_0, 50.0);
        assert_eq!(k.v_0, 50.0);
        assert_eq!(k.skew, 0.0);
        assert_eq!(k.focal, 50.0);
    }

    #[test]
    fn horizontal_fit() {
        let (render, lens) = settings(SensorFit::Horizontal);
        let k = CameraIntrinsics::derive(&render, &lens);

        assert!((k.alpha_u - 138.888).abs() < 1e-2);
        assert!((k.alpha_v - 208.333).abs() < 1e-2);
    }

    #[test]
    fn auto_matches_horizontal() {
        let (render, lens) = settings(SensorFit::Auto);
        let (_, lens_h) = settings(SensorFit::Horizontal);

        assert_eq!(
            CameraIntrinsics::derive(&render, &lens),
            CameraIntrinsics::derive(&render, &lens_h)
        );
    }

    #[test]
    fn resolution_percentage_scales_principal_point() {
        let (mut render, lens) = settings(SensorFit::Horizontal);
        render.resolution_percentage = 50.0;
        let k = CameraIntrinsics::derive(&render, &lens);

        assert_eq!(k.u_0, 25.0);
        assert_eq!(k.v_0, 25.0);
        assert!((k.alpha_u - 50.0 * (50.0 / 36.0)).abs() < 1e-3);
    }
}
