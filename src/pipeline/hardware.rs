use crate::core::rasterizer::CullMode;
use crate::scene::model::Model;
use nalgebra::Matrix4;

/// Everything an accelerated pipeline needs to draw the same frame as the software path.
///
/// Matrices are in the left-handed convention the camera uses while the alternate render
/// mode is active.
pub struct HardwareFrame<'a> {
    pub model: &'a Model,
    pub world: Matrix4<f32>,
    pub world_to_view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub cull_mode: CullMode,
}

/// Bridge to a native graphics pipeline that renders the alternate mode.
///
/// Implementations only configure and submit; no rasterization happens on this side.
pub trait HardwareMirror {
    fn name(&self) -> &str;

    fn draw_frame(&mut self, frame: &HardwareFrame<'_>) -> Result<(), String>;
}
