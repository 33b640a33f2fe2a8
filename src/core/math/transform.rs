use nalgebra::{Matrix3, Matrix4, Point2, Vector3, Vector4};

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating various transformation matrices.
/// Written out by hand so the handedness of every matrix stays explicit.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around an arbitrary axis using Rodrigues' rotation formula.
    pub fn rotation(axis: &Vector3<f32>, angle_rad: f32) -> Matrix3<f32> {
        let axis_unit = axis.normalize();
        let x = axis_unit.x;
        let y = axis_unit.y;
        let z = axis_unit.z;
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        let t = 1.0 - c;

        Matrix3::new(
            t * x * x + c,     t * x * y - z * s, t * x * z + y * s,
            t * x * y + z * s, t * y * y + c,     t * y * z - x * s,
            t * x * z - y * s, t * y * z + x * s, t * z * z + c,
        )
    }

    /// Creates a 3x3 rotation matrix around the Y-axis.
    pub fn rotation_y3(angle_rad: f32) -> Matrix3<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix3::new(
            c,   0.0, s,
            0.0, 1.0, 0.0,
           -s,   0.0, c,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        Self::rotation_y3(angle_rad).to_homogeneous()
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Assembles a view-to-world matrix from an orthonormal basis and an origin.
    /// The axes become the first three columns, the position the fourth.
    pub fn basis(
        right: &Vector3<f32>,
        up: &Vector3<f32>,
        forward: &Vector3<f32>,
        position: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Matrix4::from_columns(&[
            right.push(0.0),
            up.push(0.0),
            forward.push(0.0),
            position.push(1.0),
        ])
    }

    /// Inverts a matrix built by [`TransformFactory::basis`].
    /// The rotation block is orthonormal, so its transpose is its inverse.
    pub fn rigid_inverse(matrix: &Matrix4<f32>) -> Matrix4<f32> {
        let rotation_t = matrix.fixed_view::<3, 3>(0, 0).transpose();
        let translation = matrix.fixed_view::<3, 1>(0, 3).into_owned();
        let inv_translation = -(rotation_t * translation);

        let mut inverse = rotation_t.to_homogeneous();
        inverse.fixed_view_mut::<3, 1>(0, 3).copy_from(&inv_translation);
        inverse
    }

    /// Left-handed perspective projection (camera looks down +Z).
    /// `fov_factor` is `tan(fov / 2)`; depth is remapped to [0, 1].
    pub fn perspective_lh(aspect_ratio: f32, fov_factor: f32, near: f32, far: f32) -> Matrix4<f32> {
        let depth = far / (far - near);
        let offset = -(far * near) / (far - near);

        Matrix4::new(
            1.0 / (aspect_ratio * fov_factor), 0.0,              0.0,   0.0,
            0.0,                               1.0 / fov_factor, 0.0,   0.0,
            0.0,                               0.0,              depth, offset,
            0.0,                               0.0,              1.0,   0.0,
        )
    }

    /// Right-handed perspective projection (camera looks down -Z).
    /// Same depth remap as [`TransformFactory::perspective_lh`] with the view Z negated.
    pub fn perspective_rh(aspect_ratio: f32, fov_factor: f32, near: f32, far: f32) -> Matrix4<f32> {
        let depth = -far / (far - near);
        let offset = -(far * near) / (far - near);

        Matrix4::new(
            1.0 / (aspect_ratio * fov_factor), 0.0,              0.0,   0.0,
            0.0,                               1.0 / fov_factor, 0.0,   0.0,
            0.0,                               0.0,              depth, offset,
            0.0,                               0.0,             -1.0,   0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs the perspective divide on x, y and z but keeps the original w,
/// which later drives perspective-correct interpolation.
///
/// Returns `None` when w is zero or not finite.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Option<Vector4<f32>> {
    let w = clip.w;
    if w.abs() < 1e-6 || !w.is_finite() {
        return None;
    }
    Some(Vector4::new(clip.x / w, clip.y / w, clip.z / w, w))
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}
