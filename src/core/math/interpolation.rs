use crate::core::pipeline::Interpolatable;
use nalgebra::{Point2, Vector2, Vector3};

const EPSILON: f32 = 1e-6;

/// Signed edge values and barycentric weights of a pixel against a screen-space triangle.
///
/// `edges[i]` is the edge function of the edge opposite vertex `i`, so it carries the same
/// sign information that `weights[i]` does before the division by the total area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeWeights {
    pub edges: [f32; 3],
    pub weights: Vector3<f32>,
}

/// 2D cross product `a.x * b.y - a.y * b.x`.
#[inline(always)]
pub fn cross_2d(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Edge function of point `p` against the edge `a -> b`.
#[inline(always)]
pub fn edge_function(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> f32 {
    cross_2d(p - a, b - a)
}

/// Evaluates the three edge functions of `p` against triangle (v0, v1, v2) and divides them
/// by the triangle's signed area to get barycentric weights.
///
/// Returns `None` if the triangle is degenerate (area is zero), so every pixel is a miss.
pub fn edge_weights(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<EdgeWeights> {
    let total_area = cross_2d(v0 - v2, v0 - v1);
    if total_area.abs() < EPSILON || !total_area.is_finite() {
        return None;
    }

    let edge_a = edge_function(v0, v1, p);
    let edge_b = edge_function(v1, v2, p);
    let edge_c = edge_function(v2, v0, p);

    let inv_area = 1.0 / total_area;
    Some(EdgeWeights {
        edges: [edge_b, edge_c, edge_a],
        weights: Vector3::new(edge_b * inv_area, edge_c * inv_area, edge_a * inv_area),
    })
}

/// Perspective-correct scalar interpolation: the reciprocal of the weighted sum of
/// per-vertex reciprocals.
///
/// Returns `None` when any value or the weighted sum is zero or not finite.
pub fn reciprocal_interpolate(values: [f32; 3], weights: Vector3<f32>) -> Option<f32> {
    let mut sum = 0.0;
    for (value, weight) in values.iter().zip(weights.iter()) {
        if value.abs() < EPSILON {
            return None;
        }
        sum += weight / value;
    }

    if sum.abs() < EPSILON {
        return None;
    }
    let result = 1.0 / sum;
    result.is_finite().then_some(result)
}

/// Interpolates `values` as `sum(A_i / w_i * weight_i) * w_interpolated`.
///
/// The caller guarantees every `w` is non-zero; [`reciprocal_interpolate`] over the same
/// `w` values is how `w_interpolated` is obtained.
#[inline]
pub fn perspective_interpolate<T: Interpolatable>(
    values: &[T; 3],
    w: [f32; 3],
    weights: Vector3<f32>,
    w_interpolated: f32,
) -> T {
    (values[0] * (weights.x / w[0]) + values[1] * (weights.y / w[1]) + values[2] * (weights.z / w[2]))
        * w_interpolated
}
