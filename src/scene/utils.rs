use crate::core::geometry::Vertex;
use log::warn;
use nalgebra::Vector3;

/// Generates per-vertex tangents from positions and texture coordinates.
///
/// Each triangle contributes its UV-aligned tangent to its three vertices; the sums are then
/// orthogonalized against the vertex normal (Gram-Schmidt). Vertices whose triangles have
/// degenerate UVs keep an arbitrary tangent perpendicular to their normal.
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vector3::<f32>::zeros(); vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= vertices.len() || i1 >= vertices.len() || i2 >= vertices.len() {
            warn!("Tangent generation skipped triangle with out-of-range index {:?}", tri);
            continue;
        }

        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);
        let edge1 = v1.position.xyz() - v0.position.xyz();
        let edge2 = v2.position.xyz() - v0.position.xyz();
        let duv1 = v1.uv - v0.uv;
        let duv2 = v2.uv - v0.uv;

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < 1e-12 {
            continue;
        }
        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;

        for i in [i0, i1, i2] {
            accumulated[i] += tangent;
        }
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let n = vertex.normal;
        let orthogonal = tangent - n * n.dot(&tangent);
        vertex.tangent = if orthogonal.norm_squared() > 1e-12 {
            orthogonal.normalize()
        } else {
            any_perpendicular(&n)
        };
    }
}

fn any_perpendicular(n: &Vector3<f32>) -> Vector3<f32> {
    let helper = if n.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    let t = helper - n * n.dot(&helper);
    t.try_normalize(1e-12).unwrap_or_else(Vector3::x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector2};

    fn vertex(p: [f32; 3], uv: [f32; 2]) -> Vertex {
        Vertex::new(
            Point3::new(p[0], p[1], p[2]),
            Vector3::new(1.0, 1.0, 1.0),
            Vector2::new(uv[0], uv[1]),
            Vector3::z(),
            Vector3::zeros(),
        )
    }

    #[test]
    fn tangent_follows_u_axis() {
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0], [0.0, 0.0]),
            vertex([1.0, 0.0, 0.0], [1.0, 0.0]),
            vertex([0.0, 1.0, 0.0], [0.0, 1.0]),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);
        for v in &vertices {
            assert!((v.tangent - Vector3::x()).norm() < 1e-5);
        }
    }

    #[test]
    fn mirrored_u_flips_tangent() {
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0], [1.0, 0.0]),
            vertex([1.0, 0.0, 0.0], [0.0, 0.0]),
            vertex([0.0, 1.0, 0.0], [1.0, 1.0]),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);
        assert!((vertices[0].tangent + Vector3::x()).norm() < 1e-5);
    }

    #[test]
    fn degenerate_uvs_still_yield_unit_perpendicular_tangent() {
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0], [0.5, 0.5]),
            vertex([1.0, 0.0, 0.0], [0.5, 0.5]),
            vertex([0.0, 1.0, 0.0], [0.5, 0.5]),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2, 0, 1, 7]);
        for v in &vertices {
            assert!((v.tangent.norm() - 1.0).abs() < 1e-5);
            assert!(v.tangent.dot(&v.normal).abs() < 1e-5);
        }
    }
}
