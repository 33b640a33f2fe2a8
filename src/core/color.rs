use nalgebra::Vector3;

/// Rescales a color so that its largest channel is at most 1.0.
/// Dividing every channel by the same maximum keeps the hue intact.
pub fn max_to_one(color: Vector3<f32>) -> Vector3<f32> {
    let max = color.x.max(color.y).max(color.z);
    if max > 1.0 { color / max } else { color }
}

/// Quantizes a linear [0, 1] color to a packed `0RGB` pixel, 8 bits per channel.
pub fn to_packed_rgb(color: Vector3<f32>) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0) as u32;
    (r << 16) | (g << 8) | b
}

/// Splits a packed `0RGB` pixel back into its channels.
#[inline]
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

/// Maps a depth value to a grayscale color.
///
/// Depth is remapped so `far` becomes 0 and `near` becomes 1; the perspective depth of a
/// typical scene lives in a thin band just below 1.0, which `near`/`far` select.
pub fn depth_to_gray(depth: f32, near: f32, far: f32) -> Vector3<f32> {
    let range = far - near;
    let value = if range.abs() > f32::EPSILON {
        (far - depth) / range
    } else {
        0.0
    };
    let value = value.max(0.0);
    max_to_one(Vector3::new(value, value, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_to_one_preserves_ratios() {
        let c = max_to_one(Vector3::new(2.0, 1.0, 0.5));
        assert_eq!(c, Vector3::new(1.0, 0.5, 0.25));
        let unchanged = max_to_one(Vector3::new(0.2, 0.4, 0.6));
        assert_eq!(unchanged, Vector3::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn quantize_and_unpack() {
        let packed = to_packed_rgb(Vector3::new(1.0, 0.0, 0.5));
        assert_eq!(unpack_rgb(packed), [255, 0, 127]);
        assert_eq!(to_packed_rgb(Vector3::new(-1.0, 3.0, 0.0)), 0x00FF00);
    }

    #[test]
    fn depth_gray_is_bright_near_and_dark_far() {
        assert_eq!(depth_to_gray(1.0, 0.985, 1.0), Vector3::zeros());
        assert_eq!(depth_to_gray(0.5, 0.985, 1.0), Vector3::new(1.0, 1.0, 1.0));
    }
}
