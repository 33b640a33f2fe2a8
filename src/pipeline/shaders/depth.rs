use crate::core::color::depth_to_gray;
use crate::core::pipeline::{Fragment, FragmentShader};
use nalgebra::Vector3;

/// Visualizes the depth buffer as grayscale instead of shading.
/// Useful for debugging the depth test and the projection.
pub struct DepthShader {
    /// Depth band that is stretched over the full gray range, as (near, far).
    pub range: (f32, f32),
}

impl DepthShader {
    pub fn new(near: f32, far: f32) -> Self {
        Self { range: (near, far) }
    }
}

impl FragmentShader for DepthShader {
    fn shade(&self, fragment: &Fragment) -> Vector3<f32> {
        depth_to_gray(fragment.depth, self.range.0, self.range.1)
    }
}
