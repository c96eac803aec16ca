//! Matrices for the transformed samples.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::coords::Viewport;

use super::RendererError;

/// Vertical field of view of the perspective sample, in degrees.
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Camera position of the perspective sample.
pub const EYE: Vec3 = Vec3::new(0.0, 0.0, 3.0);

/// Rotation about +Y by `degrees`.
pub fn rotation_y(degrees: f32) -> Mat4 {
    Mat4::from_rotation_y(degrees.to_radians())
}

/// Right-handed perspective projection for `viewport` with a [0, 1] depth range.
pub fn projection_for(viewport: Viewport) -> Result<Mat4, RendererError> {
    let aspect = viewport.aspect_ratio().ok_or(RendererError::InvalidViewport {
        width: viewport.width,
        height: viewport.height,
    })?;
    Ok(Mat4::perspective_rh(
        FOV_Y_DEGREES.to_radians(),
        aspect,
        Z_NEAR,
        Z_FAR,
    ))
}

/// View looking from [`EYE`] at the origin with +Y up.
pub fn default_view() -> Mat4 {
    Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y)
}

/// Uniform block holding a single model-view-projection matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MvpUniform {
    pub mvp: [[f32; 4]; 4],
}

impl MvpUniform {
    pub const SIZE: u64 = std::mem::size_of::<MvpUniform>() as u64;

    pub fn new(m: Mat4) -> Self {
        Self { mvp: m.to_cols_array_2d() }
    }

    pub fn identity() -> Self {
        Self::new(Mat4::IDENTITY)
    }

    /// Minimum binding size for the uniform buffer.
    pub fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(Self::SIZE).unwrap_or(std::num::NonZeroU64::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn zero_rotation_is_identity() {
        assert_eq!(rotation_y(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn quarter_turn_maps_x_to_minus_z() {
        let p = rotation_y(90.0) * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_leaves_y_axis_fixed() {
        let p = rotation_y(123.0) * Vec4::new(0.0, 0.8, 0.0, 1.0);
        assert_relative_eq!(p.y, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn projection_rejects_degenerate_viewport() {
        let err = projection_for(Viewport::new(100.0, 0.0)).unwrap_err();
        assert!(matches!(err, RendererError::InvalidViewport { .. }));
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let proj = projection_for(Viewport::new(800.0, 600.0)).unwrap();
        let clip = proj * default_view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn wide_viewport_compresses_x() {
        let proj = projection_for(Viewport::new(2000.0, 1000.0)).unwrap();
        let clip = proj * default_view() * Vec4::new(1.0, 1.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert_relative_eq!(ndc.x * 2.0, ndc.y, epsilon = 1e-5);
    }

    #[test]
    fn uniform_is_one_column_major_mat4() {
        assert_eq!(MvpUniform::SIZE, 64);
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let u = MvpUniform::new(m);
        assert_eq!(u.mvp[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
