use crate::core::geometry::Triangle;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;

/// Stable handle into a [`TriangleArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriangleId(usize);

impl TriangleId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Contiguous triangle storage. Triangles are only ever appended, so handles never dangle.
#[derive(Debug, Clone, Default)]
pub struct TriangleArena {
    triangles: Vec<Triangle>,
}

impl TriangleArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, triangle: Triangle) -> TriangleId {
        self.triangles.push(triangle);
        TriangleId(self.triangles.len() - 1)
    }

    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = TriangleId> + use<> {
        (0..self.triangles.len()).map(TriangleId)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Triangle> {
        self.triangles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// A Model represents a complete 3D object: its triangles and the material they share.
#[derive(Debug, Clone)]
pub struct Model {
    pub triangles: TriangleArena,
    pub material: Material,
}

impl Model {
    pub fn new(mesh: &Mesh, material: Material) -> Self {
        let mut triangles = TriangleArena::new();
        for triangle in mesh.assemble_triangles() {
            triangles.insert(triangle);
        }
        Self { triangles, material }
    }
}
