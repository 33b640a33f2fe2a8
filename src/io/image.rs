use crate::core::color::unpack_rgb;
use image::RgbImage;
use log::info;
use rayon::prelude::*;
use std::path::Path;

/// Saves a u32 (0RGB) buffer to an image file; the format follows the extension.
pub fn save_buffer_to_image(buffer: &[u32], width: usize, height: usize, path: &str) -> Result<(), String> {
    if width == 0 || height == 0 || buffer.len() != width * height {
        return Err(format!(
            "Buffer holds {} pixels, expected {}x{}",
            buffer.len(),
            width,
            height
        ));
    }

    let mut bytes = vec![0u8; width * height * 3];
    bytes
        .par_chunks_mut(width * 3)
        .zip(buffer.par_chunks(width))
        .for_each(|(row, pixels)| {
            for (dst, &pixel) in row.chunks_exact_mut(3).zip(pixels) {
                dst.copy_from_slice(&unpack_rgb(pixel));
            }
        });

    let img = RgbImage::from_raw(width as u32, height as u32, bytes)
        .ok_or_else(|| format!("Invalid image dimensions {}x{}", width, height))?;

    img.save(Path::new(path))
        .map_err(|e| format!("Failed to save image to '{}': {}", path, e))?;
    info!("Saved frame to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_png_top_left_origin() {
        let path = std::env::temp_dir().join(format!("soft-rasterizer-frame-{}.png", std::process::id()));
        let path = path.to_string_lossy().into_owned();

        let buffer = [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0x0010_2030];
        save_buffer_to_image(&buffer, 2, 2, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 255, 0]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [0x10, 0x20, 0x30]);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        assert!(save_buffer_to_image(&[0; 3], 2, 2, "unused.png").is_err());
    }
}
