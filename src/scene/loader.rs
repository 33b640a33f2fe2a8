use crate::io::config::Config;
use crate::io::obj_loader::load_obj;
use crate::scene::camera::{Camera, CameraSpeeds};
use crate::scene::context::RenderContext;
use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use crate::scene::mesh::{Mesh, PrimitiveTopology};
use crate::scene::model::Model;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::Texture;
use log::{error, info, warn};
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

fn load_texture(slot: &str, path: Option<&String>) -> Option<Arc<Texture>> {
    let path = path?;
    match Texture::load(path) {
        Ok(tex) => Some(Arc::new(tex)),
        Err(e) => {
            warn!("Failed to load {} texture '{}': {}", slot, path, e);
            None
        }
    }
}

/// Builds the camera from `[camera]`, with the aspect ratio of the output image.
pub fn build_camera(config: &Config) -> Camera {
    let cam = &config.camera;
    let forward = Vector3::from(cam.forward);
    let forward = if forward.norm_squared() > 1e-12 {
        forward
    } else {
        warn!("Camera forward {:?} is zero, looking down -Z instead", cam.forward);
        -Vector3::z()
    };

    let mut camera = Camera::new(Point3::from(cam.position), forward, cam.fov, config.aspect_ratio());
    camera.speeds = CameraSpeeds {
        move_speed: cam.move_speed,
        boost_multiplier: cam.boost_multiplier,
        rotation_sensitivity: cam.rotation_sensitivity,
        drag_sensitivity: cam.drag_sensitivity,
    };
    camera
}

/// Loads the configured mesh, or the built-in test triangle when none is configured or the
/// file cannot be read.
pub fn load_mesh(config: &Config) -> Mesh {
    let Some(path) = &config.model.path else {
        info!("No model configured, using the test triangle.");
        return Mesh::create_test_triangle();
    };

    match load_obj(path) {
        Ok(mesh) => {
            match PrimitiveTopology::from_name(&config.model.topology) {
                Some(PrimitiveTopology::TriangleList) => {}
                Some(PrimitiveTopology::TriangleStrip) => warn!(
                    "OBJ faces are triangulated into a list, ignoring strip topology for '{}'",
                    path
                ),
                None => warn!(
                    "Unknown topology '{}', reading indices as a triangle list",
                    config.model.topology
                ),
            }
            mesh
        }
        Err(e) => {
            error!("Error loading model '{}': {}. Using fallback mesh.", path, e);
            Mesh::create_test_triangle()
        }
    }
}

/// Initial resource loading (Heavy I/O). Returns a RenderContext.
pub fn init_scene_resources(config: &Config) -> RenderContext {
    // 1. Camera
    let camera = build_camera(config);

    // 2. Light
    let light_conf = &config.light;
    let light = DirectionalLight::new(
        Vector3::from(light_conf.direction),
        Vector3::from(light_conf.color),
        light_conf.intensity,
    );

    // 3. Model
    let model_conf = &config.model;
    let material = Material {
        diffuse_texture: load_texture("diffuse", model_conf.diffuse_texture.as_ref()),
        normal_texture: load_texture("normal", model_conf.normal_texture.as_ref()),
        specular_texture: load_texture("specular", model_conf.specular_texture.as_ref()),
        gloss_texture: load_texture("gloss", model_conf.gloss_texture.as_ref()),
        shininess: light_conf.shininess,
    };
    let mesh = load_mesh(config);
    let model = Model::new(&mesh, material);
    info!("Scene initialized with {} triangles.", model.triangles.len());

    let object = SceneObject::new(
        model,
        Vector3::from(model_conf.position),
        config.render.rotation_speed,
    );

    RenderContext {
        camera,
        light,
        ambient: Vector3::from(light_conf.ambient),
        object,
    }
}
