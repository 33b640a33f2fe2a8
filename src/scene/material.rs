use crate::scene::texture::Texture;
use std::sync::Arc;

/// The texture maps bound to a model. Any of them may be missing.
#[derive(Debug, Clone)]
pub struct Material {
    pub diffuse_texture: Option<Arc<Texture>>,
    pub normal_texture: Option<Arc<Texture>>,
    pub specular_texture: Option<Arc<Texture>>,
    /// Only the red channel is read; it scales `shininess` into the Phong exponent.
    pub gloss_texture: Option<Arc<Texture>>,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_texture: None,
            normal_texture: None,
            specular_texture: None,
            gloss_texture: None,
            shininess: 25.0,
        }
    }
}
