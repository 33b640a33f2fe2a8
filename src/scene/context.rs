use crate::scene::camera::Camera;
use crate::scene::light::DirectionalLight;
use crate::scene::scene_object::SceneObject;
use nalgebra::Vector3;

/// Holds all scene resources required for rendering.
pub struct RenderContext {
    pub camera: Camera,
    pub light: DirectionalLight,
    pub ambient: Vector3<f32>,
    pub object: SceneObject,
}
