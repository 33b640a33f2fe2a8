use crate::core::math::transform::TransformFactory;
use crate::scene::model::Model;
use nalgebra::{Matrix4, Vector3};

/// Represents an instance of a model in the scene with its own transformation.
///
/// The object spins about Y while rotating is enabled. Each coordinate convention keeps its
/// own angle, and both advance every frame, so flipping the render mode does not make the
/// object jump.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub model: Model,
    pub translation: Vector3<f32>,
    /// Degrees per second.
    pub rotation_speed: f32,
    angle: f32,
    angle_alternate: f32,
    transform: Matrix4<f32>,
}

impl SceneObject {
    pub fn new(model: Model, translation: Vector3<f32>, rotation_speed: f32) -> Self {
        Self {
            model,
            translation,
            rotation_speed,
            angle: 0.0,
            angle_alternate: 0.0,
            transform: TransformFactory::translation(&translation),
        }
    }

    /// Advances the rotation and rebuilds the world matrix.
    ///
    /// In the alternate convention the translation's Z and the spin direction are mirrored.
    pub fn update(&mut self, alternate_mode: bool, elapsed_sec: f32, rotating: bool) {
        let step = if rotating {
            self.rotation_speed.to_radians() * elapsed_sec
        } else {
            0.0
        };

        // Both angles advance so the alternate pose always mirrors the software pose.
        self.angle += step;
        self.angle_alternate -= step;

        let (translation, angle) = if alternate_mode {
            let mirrored = Vector3::new(self.translation.x, self.translation.y, -self.translation.z);
            (mirrored, self.angle_alternate)
        } else {
            (self.translation, self.angle)
        };

        self.transform = TransformFactory::translation(&translation) * TransformFactory::rotation_y(angle);
    }

    /// The current world matrix.
    pub fn transform(&self) -> Matrix4<f32> {
        self.transform
    }
}
