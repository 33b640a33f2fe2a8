use crate::core::geometry::{Triangle, Vertex};
use log::warn;
use nalgebra::{Point3, Vector2, Vector3};

/// How the index buffer is read into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Consecutive triples.
    #[default]
    TriangleList,
    /// Sliding window of three; every odd window has its winding swapped.
    TriangleStrip,
}

impl PrimitiveTopology {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "list" | "triangle_list" | "trianglelist" => Some(Self::TriangleList),
            "strip" | "triangle_strip" | "trianglestrip" => Some(Self::TriangleStrip),
            _ => None,
        }
    }
}

/// A collection of vertices and indices representing a 3D object.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: PrimitiveTopology,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        Self {
            vertices,
            indices,
            topology,
        }
    }

    /// Expands the index buffer into independent triangles.
    ///
    /// Strip windows where two indices coincide are skipped. Triangles referencing a vertex
    /// that does not exist are dropped with a warning.
    pub fn assemble_triangles(&self) -> Vec<Triangle> {
        let windows: Vec<[u32; 3]> = match self.topology {
            PrimitiveTopology::TriangleList => {
                if self.indices.len() % 3 != 0 {
                    warn!(
                        "Index count {} is not a multiple of 3, ignoring the trailing indices",
                        self.indices.len()
                    );
                }
                self.indices
                    .chunks_exact(3)
                    .map(|c| [c[0], c[1], c[2]])
                    .collect()
            }
            PrimitiveTopology::TriangleStrip => self
                .indices
                .windows(3)
                .enumerate()
                .filter(|(_, w)| w[0] != w[1] && w[1] != w[2] && w[0] != w[2])
                .map(|(i, w)| {
                    if i % 2 == 1 {
                        [w[0], w[2], w[1]]
                    } else {
                        [w[0], w[1], w[2]]
                    }
                })
                .collect(),
        };

        windows
            .into_iter()
            .filter_map(|[a, b, c]| {
                let v0 = self.vertices.get(a as usize);
                let v1 = self.vertices.get(b as usize);
                let v2 = self.vertices.get(c as usize);
                match (v0, v1, v2) {
                    (Some(v0), Some(v1), Some(v2)) => Some(Triangle::new(*v0, *v1, *v2)),
                    _ => {
                        warn!(
                            "Triangle [{}, {}, {}] references a missing vertex (have {})",
                            a,
                            b,
                            c,
                            self.vertices.len()
                        );
                        None
                    }
                }
            })
            .collect()
    }

    /// Creates a simple triangle mesh for testing purposes.
    ///
    /// Vertices are arranged in Counter-Clockwise (CCW) order, facing +Z, with red, green and
    /// blue vertex colors.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::z();
        let tangent = Vector3::x();
        let vertices = vec![
            Vertex::new(
                Point3::new(0.0, 10.0, 0.0), // Top
                Vector3::new(1.0, 0.0, 0.0),
                Vector2::new(0.5, 0.0),
                normal,
                tangent,
            ),
            Vertex::new(
                Point3::new(-10.0, -10.0, 0.0), // Bottom Left
                Vector3::new(0.0, 1.0, 0.0),
                Vector2::new(0.0, 1.0),
                normal,
                tangent,
            ),
            Vertex::new(
                Point3::new(10.0, -10.0, 0.0), // Bottom Right
                Vector3::new(0.0, 0.0, 1.0),
                Vector2::new(1.0, 1.0),
                normal,
                tangent,
            ),
        ];

        Self::new(vertices, vec![0, 1, 2], PrimitiveTopology::TriangleList)
    }
}
