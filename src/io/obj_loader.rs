use crate::core::geometry::Vertex;
use crate::scene::mesh::{Mesh, PrimitiveTopology};
use crate::scene::utils::compute_tangents;
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file and returns a unified, triangulated Mesh.
///
/// Texture V is flipped so (0, 0) is the top-left texel, vertex colors are white and
/// tangents are generated from the UV layout. Materials referenced by the file are ignored;
/// texture maps come from the configuration instead.
pub fn load_obj(path: &str) -> Result<Mesh, String> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(format!("File not found: {}", path));
    }

    info!("Loading OBJ file: {}", path);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Important: Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path_obj, &load_options)
        .map_err(|e| format!("Failed to load OBJ: {}", e))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut index_offset = 0;

    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();

        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 1, 0).",
                model.name
            );
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );

            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                )
                .try_normalize(1e-12)
                .unwrap_or_else(Vector3::y)
            } else {
                Vector3::y()
            };

            let uv = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            vertices.push(Vertex::new(
                position,
                Vector3::new(1.0, 1.0, 1.0),
                uv,
                normal,
                Vector3::x(),
            ));
        }

        // Sub-meshes are merged, so their indices shift by the vertices already added.
        indices.extend(mesh.indices.iter().map(|index| index + index_offset));
        index_offset += num_vertices as u32;
    }

    compute_tangents(&mut vertices, &indices);

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        vertices.len(),
        indices.len()
    );

    Ok(Mesh::new(vertices, indices, PrimitiveTopology::TriangleList))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    fn write_temp(name: &str, content: &str) -> String {
        let path = std::env::temp_dir().join(format!("{}-{}.obj", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn quad_is_triangulated_with_flipped_v_and_tangents() {
        let path = write_temp("soft-rasterizer-quad", QUAD);
        let mesh = load_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.topology, PrimitiveTopology::TriangleList);

        let origin = mesh
            .vertices
            .iter()
            .find(|v| v.position.xyz() == Vector3::zeros())
            .unwrap();
        assert_eq!(origin.uv, Vector2::new(0.0, 1.0));
        assert_eq!(origin.color, Vector3::new(1.0, 1.0, 1.0));
        for v in &mesh.vertices {
            assert!((v.normal - Vector3::z()).norm() < 1e-6);
            // +U runs along +X
            assert!((v.tangent - Vector3::x()).norm() < 1e-5);
        }
        assert_eq!(mesh.assemble_triangles().len(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_obj("/nonexistent/model.obj").unwrap_err();
        assert!(err.starts_with("File not found"));
    }
}
