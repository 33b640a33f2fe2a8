use crate::core::color::{max_to_one, to_packed_rgb};
use nalgebra::Vector3;

/// Represents a 2D buffer containing color and depth information.
///
/// Colors are stored already quantized (`0RGB`, 8 bits per channel, row-major, top-left
/// origin) so the buffer can be handed to presentation as-is. The depth buffer stays
/// internal to the pipeline.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; size],
            depth_buffer: vec![f32::MAX; size],
        }
    }

    /// Resets every pixel to `background` and every depth to the maximum representable value.
    pub fn clear(&mut self, background: Vector3<f32>) {
        let packed = to_packed_rgb(max_to_one(background));
        self.color_buffer.fill(packed);
        self.depth_buffer.fill(f32::MAX);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test and update.
    /// Returns true if the new depth is strictly closer than the stored value,
    /// in which case the stored value is replaced.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) || !new_depth.is_finite() {
            return false;
        }
        let idx = self.index(x, y);
        if new_depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = new_depth;
            true
        } else {
            false
        }
    }

    /// Writes a linear color, rescaling it with max-to-one before quantizing.
    /// Should only be called after `depth_test_and_update` returned true.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Vector3<f32>) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.color_buffer[idx] = to_packed_rgb(max_to_one(color));
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    /// Stored depth, for inspection.
    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }

    /// The finished frame, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }
}
