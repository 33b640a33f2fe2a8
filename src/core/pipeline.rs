use nalgebra::{Vector2, Vector3};
use std::ops::{Add, Mul};

/// Trait for types that can be linearly interpolated across a triangle's surface.
///
/// Requirements:
/// - Copy + Clone: cheaply duplicable values for per-vertex storage and interpolation.
/// - Add + Mul<f32>: support linear combination (a + b * t) used by barycentric interpolation.
pub trait Interpolatable: Copy + Clone + Add<Output = Self> + Mul<f32, Output = Self> {}

impl Interpolatable for f32 {}

/// The per-vertex attributes that are blended across a triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attributes {
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_dir: Vector3<f32>,
    pub color: Vector3<f32>,
}

impl Add for Attributes {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            uv: self.uv + other.uv,
            normal: self.normal + other.normal,
            tangent: self.tangent + other.tangent,
            view_dir: self.view_dir + other.view_dir,
            color: self.color + other.color,
        }
    }
}

impl Mul<f32> for Attributes {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            uv: self.uv * scalar,
            normal: self.normal * scalar,
            tangent: self.tangent * scalar,
            view_dir: self.view_dir * scalar,
            color: self.color * scalar,
        }
    }
}

impl Interpolatable for Attributes {}

/// A pixel that passed the coverage and depth tests, ready for shading.
#[derive(Clone, Copy, Debug)]
pub struct Fragment {
    pub x: usize,
    pub y: usize,
    /// Interpolated depth that was just written to the depth buffer.
    pub depth: f32,
    /// Interpolated attributes with normal, tangent and view direction renormalized.
    pub attributes: Attributes,
}

/// The shading stage of the pipeline.
///
/// Receives each fragment that survived the depth test and returns its linear RGB color.
/// Channels above 1.0 are allowed; the framebuffer rescales before quantizing.
pub trait FragmentShader {
    fn shade(&self, fragment: &Fragment) -> Vector3<f32>;
}
