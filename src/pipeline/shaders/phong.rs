use crate::core::pipeline::{Fragment, FragmentShader};
use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use nalgebra::{Matrix3, Vector2, Vector3};
use std::f32::consts::PI;

/// Lambert diffuse + Phong specular with optional tangent-space normal mapping.
///
/// Untextured geometry (no diffuse map) is shown with its interpolated vertex color.
pub struct PhongShader<'a> {
    pub material: &'a Material,
    pub light: &'a DirectionalLight,
    pub ambient: Vector3<f32>,
    pub normal_mapping: bool,
}

impl<'a> PhongShader<'a> {
    pub fn new(material: &'a Material, light: &'a DirectionalLight) -> Self {
        Self {
            material,
            light,
            ambient: Vector3::new(0.025, 0.025, 0.025),
            normal_mapping: true,
        }
    }

    /// Replaces the interpolated normal with the normal map sample, brought from
    /// [0, 1] to [-1, 1] and out of tangent space.
    fn mapped_normal(&self, uv: Vector2<f32>, normal: Vector3<f32>, tangent: Vector3<f32>) -> Vector3<f32> {
        let Some(normal_map) = self.material.normal_texture.as_ref().filter(|_| self.normal_mapping) else {
            return normal;
        };

        let sample = normal_map.sample(uv);
        let bitangent = tangent.cross(&normal);
        let tangent_space = Matrix3::from_columns(&[tangent, bitangent, normal]);
        let local = sample * 2.0 - Vector3::new(1.0, 1.0, 1.0);
        (tangent_space * local).normalize()
    }

    fn specular(&self, uv: Vector2<f32>, normal: &Vector3<f32>, view_dir: &Vector3<f32>) -> Option<Vector3<f32>> {
        let specular_map = self.material.specular_texture.as_ref()?;
        let gloss_map = self.material.gloss_texture.as_ref()?;

        let specular_color = specular_map.sample(uv);
        let exponent = gloss_map.sample(uv).x * self.material.shininess;

        let to_light = self.light.direction_to_light();
        let reflect = to_light - normal * (2.0 * normal.dot(&to_light));
        let cos_angle = reflect.dot(view_dir).clamp(0.0, 1.0);

        Some(specular_color * cos_angle.powf(exponent))
    }
}

impl FragmentShader for PhongShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Vector3<f32> {
        let attrs = &fragment.attributes;

        // 1. Untextured fallback
        let Some(diffuse_map) = &self.material.diffuse_texture else {
            return attrs.color;
        };

        // 2. Normal mapping
        let normal = self.mapped_normal(attrs.uv, attrs.normal, attrs.tangent);

        // 3. Diffuse (Lambert)
        let observed_area = normal.dot(&self.light.direction_to_light()).max(0.0);
        let albedo = diffuse_map.sample(attrs.uv);
        let diffuse = (self.light.radiance() * observed_area).component_mul(&(albedo / PI));

        // 4. Specular (Phong)
        let specular = self
            .specular(attrs.uv, &normal, &attrs.view_dir)
            .unwrap_or_else(Vector3::zeros);

        self.ambient + diffuse + specular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::Attributes;
    use crate::scene::texture::Texture;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::sync::Arc;

    const TOLERANCE: f32 = 1e-4;

    fn solid(rgb: [u8; 3]) -> Arc<Texture> {
        let img = RgbImage::from_pixel(4, 4, Rgb(rgb));
        Arc::new(Texture::from_image(DynamicImage::ImageRgb8(img)))
    }

    fn fragment(normal: Vector3<f32>, view_dir: Vector3<f32>) -> Fragment {
        Fragment {
            x: 0,
            y: 0,
            depth: 0.5,
            attributes: Attributes {
                uv: Vector2::new(0.5, 0.5),
                normal,
                tangent: Vector3::x(),
                view_dir,
                color: Vector3::new(0.2, 0.4, 0.6),
            },
        }
    }

    fn overhead_light() -> DirectionalLight {
        DirectionalLight::new(Vector3::new(0.0, 0.0, -1.0), Vector3::new(1.0, 1.0, 1.0), PI)
    }

    #[test]
    fn untextured_returns_vertex_color() {
        let material = Material::default();
        let light = overhead_light();
        let shader = PhongShader::new(&material, &light);
        let color = shader.shade(&fragment(Vector3::z(), -Vector3::z()));
        assert_eq!(color, Vector3::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn lambert_term_follows_normal() {
        let material = Material {
            diffuse_texture: Some(solid([255, 255, 255])),
            ..Default::default()
        };
        let light = overhead_light();
        let mut shader = PhongShader::new(&material, &light);
        shader.ambient = Vector3::zeros();

        // intensity PI cancels the 1/PI of the diffuse BRDF
        let lit = shader.shade(&fragment(Vector3::z(), -Vector3::z()));
        assert!((lit - Vector3::new(1.0, 1.0, 1.0)).norm() < TOLERANCE);

        let away = shader.shade(&fragment(-Vector3::z(), -Vector3::z()));
        assert!(away.norm() < TOLERANCE);
    }

    #[test]
    fn ambient_is_always_added() {
        let material = Material {
            diffuse_texture: Some(solid([0, 0, 0])),
            ..Default::default()
        };
        let light = overhead_light();
        let shader = PhongShader::new(&material, &light);
        let color = shader.shade(&fragment(Vector3::z(), -Vector3::z()));
        assert!((color - Vector3::new(0.025, 0.025, 0.025)).norm() < TOLERANCE);
    }

    #[test]
    fn flat_normal_map_keeps_geometric_normal() {
        // (128, 128, 255) encodes roughly (0, 0, 1) in tangent space
        let material = Material {
            diffuse_texture: Some(solid([255, 255, 255])),
            normal_texture: Some(solid([128, 128, 255])),
            ..Default::default()
        };
        let light = overhead_light();
        let shader = PhongShader::new(&material, &light);
        let n = shader.mapped_normal(Vector2::new(0.5, 0.5), Vector3::z(), Vector3::x());
        assert!((n - Vector3::z()).norm() < 1e-2);
    }

    #[test]
    fn normal_map_toggle_bypasses_map() {
        // (255, 128, 128) tilts the normal fully onto the tangent axis
        let material = Material {
            diffuse_texture: Some(solid([255, 255, 255])),
            normal_texture: Some(solid([255, 128, 128])),
            ..Default::default()
        };
        let light = overhead_light();
        let mut shader = PhongShader::new(&material, &light);

        let mapped = shader.mapped_normal(Vector2::new(0.5, 0.5), Vector3::z(), Vector3::x());
        assert!(mapped.x > 0.9);

        shader.normal_mapping = false;
        let plain = shader.mapped_normal(Vector2::new(0.5, 0.5), Vector3::z(), Vector3::x());
        assert_eq!(plain, Vector3::z());
    }

    #[test]
    fn specular_needs_both_maps_and_peaks_on_mirror_direction() {
        let specular_only = Material {
            diffuse_texture: Some(solid([0, 0, 0])),
            specular_texture: Some(solid([255, 255, 255])),
            ..Default::default()
        };
        let with_gloss = Material {
            gloss_texture: Some(solid([255, 255, 255])),
            ..specular_only.clone()
        };
        let light = overhead_light();

        // Light travels along -Z onto a +Z surface; a viewer looking straight down sees the highlight.
        let head_on = fragment(Vector3::z(), -Vector3::z());

        let mut shader = PhongShader::new(&specular_only, &light);
        shader.ambient = Vector3::zeros();
        assert!(shader.shade(&head_on).norm() < TOLERANCE);

        let mut shader = PhongShader::new(&with_gloss, &light);
        shader.ambient = Vector3::zeros();
        let peak = shader.shade(&head_on);
        assert!((peak - Vector3::new(1.0, 1.0, 1.0)).norm() < TOLERANCE);

        let grazing = fragment(Vector3::z(), Vector3::new(1.0, 0.0, -0.2).normalize());
        assert!(shader.shade(&grazing).x < 0.01);
    }
}
