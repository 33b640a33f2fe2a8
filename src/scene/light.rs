use nalgebra::Vector3;

/// A light source that is infinitely far away (e.g., Sun). Rays are parallel.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    /// Direction the light travels, normalized.
    pub direction: Vector3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vector3::new(0.577, -0.577, -0.577), Vector3::new(1.0, 1.0, 1.0), 7.0)
    }
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, color: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }

    /// The direction FROM a surface TO the light.
    pub fn direction_to_light(&self) -> Vector3<f32> {
        -self.direction
    }

    /// Radiance arriving at any surface point.
    pub fn radiance(&self) -> Vector3<f32> {
        self.color * self.intensity
    }
}
