use image::{DynamicImage, RgbImage};
use log::info;
use nalgebra::{Vector2, Vector3};
use std::path::Path;

/// Represents a decoded 2D texture map.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref).map_err(|e| format!("Failed to load texture: {}", e))?;

        let texture = Self::from_image(img);
        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref, texture.width, texture.height
        );
        Ok(texture)
    }

    pub fn from_image(img: DynamicImage) -> Self {
        let image = img.to_rgb8();
        Self {
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// Samples the texture with nearest-neighbor lookup at `floor(uv * size)`.
    /// UV coordinates are in [0.0, 1.0] with the origin at the top-left texel.
    ///
    /// Lookups that land outside the image return black.
    pub fn sample(&self, uv: Vector2<f32>) -> Vector3<f32> {
        let x = (uv.x * self.width as f32).floor();
        let y = (uv.y * self.height as f32).floor();

        if !(x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32) {
            return Vector3::zeros();
        }

        let pixel = self.image.get_pixel(x as u32, y as u32);
        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checker() -> Texture {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));
        Texture::from_image(DynamicImage::ImageRgb8(img))
    }

    #[test]
    fn nearest_sampling_picks_texel() {
        let tex = checker();
        assert_eq!(tex.sample(Vector2::new(0.1, 0.1)), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(Vector2::new(0.9, 0.1)), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(Vector2::new(0.2, 0.7)), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(tex.sample(Vector2::new(0.5, 0.5)), Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn out_of_range_uv_is_black() {
        let tex = checker();
        assert_eq!(tex.sample(Vector2::new(1.0, 0.5)), Vector3::zeros());
        assert_eq!(tex.sample(Vector2::new(-0.01, 0.5)), Vector3::zeros());
        assert_eq!(tex.sample(Vector2::new(0.5, 7.0)), Vector3::zeros());
        assert_eq!(tex.sample(Vector2::new(f32::NAN, 0.5)), Vector3::zeros());
    }
}
