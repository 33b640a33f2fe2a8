use crate::core::math::transform::{
    FAR_PLANE, NEAR_PLANE, TransformFactory, apply_perspective_division, ndc_to_screen,
};
use crate::core::pipeline::Attributes;
use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3, Vector4};
use std::ops::RangeInclusive;

const NDC_XY: RangeInclusive<f32> = -1.0..=1.0;
const NDC_Z: RangeInclusive<f32> = 0.0..=1.0;

/// Represents a single vertex as it travels through the pipeline.
///
/// The position is homogeneous; after the perspective divide `w` still holds the
/// pre-divide value so attributes can be interpolated perspective-correctly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vector4<f32>,
    pub color: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    /// Normalized direction from the camera to this vertex, in world space.
    pub view_dir: Vector3<f32>,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vector4::new(0.0, 0.0, 0.0, 1.0),
            color: Vector3::new(1.0, 1.0, 1.0),
            uv: Vector2::zeros(),
            normal: Vector3::z(),
            tangent: Vector3::x(),
            view_dir: Vector3::zeros(),
        }
    }
}

impl Vertex {
    pub fn new(
        position: Point3<f32>,
        color: Vector3<f32>,
        uv: Vector2<f32>,
        normal: Vector3<f32>,
        tangent: Vector3<f32>,
    ) -> Self {
        Self {
            position: position.to_homogeneous(),
            color,
            uv,
            normal,
            tangent,
            view_dir: Vector3::zeros(),
        }
    }

    #[inline]
    pub fn screen_position(&self) -> Point2<f32> {
        Point2::new(self.position.x, self.position.y)
    }

    #[inline]
    pub fn attributes(&self) -> Attributes {
        Attributes {
            uv: self.uv,
            normal: self.normal,
            tangent: self.tangent,
            view_dir: self.view_dir,
            color: self.color,
        }
    }
}

/// A triangle with an immutable rest pose and a working copy that the transform
/// stages overwrite every frame.
#[derive(Debug, Clone)]
pub struct Triangle {
    reference: [Vertex; 3],
    working: [Vertex; 3],
    /// Set when a stage produced an unusable vertex (zero w, singular camera).
    discarded: bool,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            reference: [v0, v1, v2],
            working: [v0, v1, v2],
            discarded: false,
        }
    }

    pub fn reference(&self) -> &[Vertex; 3] {
        &self.reference
    }

    /// The working vertices in whatever space the last stage left them.
    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.working
    }

    /// Model -> World.
    ///
    /// Restores the working triple from the rest pose, applies the world matrix to positions
    /// and only its rotational part to normals and tangents, then recomputes the view
    /// direction from the camera to each vertex.
    pub fn model_to_world(&mut self, camera_pos: &Point3<f32>, world: &Matrix4<f32>) {
        self.working = self.reference;
        self.discarded = false;

        let rotation = world.fixed_view::<3, 3>(0, 0).into_owned();
        for vertex in &mut self.working {
            vertex.position = world * vertex.position;
            vertex.normal = (rotation * vertex.normal).normalize();
            vertex.tangent = (rotation * vertex.tangent).normalize();
            vertex.view_dir = (vertex.position.xyz() - camera_pos.coords).normalize();
        }
    }

    /// World -> NDC.
    ///
    /// `fov_factor` is `tan(fov / 2)`. The divide is applied to x, y and z; the pre-divide w
    /// stays in `position.w`.
    pub fn model_to_ndc(
        &mut self,
        view_to_world: &Matrix4<f32>,
        fov_factor: f32,
        width: usize,
        height: usize,
    ) {
        if self.discarded {
            return;
        }
        let Some(view) = view_to_world.try_inverse() else {
            self.discarded = true;
            return;
        };

        let aspect_ratio = width as f32 / height as f32;
        let projection =
            TransformFactory::perspective_rh(aspect_ratio, fov_factor, NEAR_PLANE, FAR_PLANE);
        let view_projection = projection * view;

        for vertex in &mut self.working {
            match apply_perspective_division(&(view_projection * vertex.position)) {
                Some(ndc) => vertex.position = ndc,
                None => {
                    self.discarded = true;
                    return;
                }
            }
        }
    }

    /// Returns true when the triangle must be skipped: a vertex lies outside the
    /// NDC box or an earlier stage discarded it. There is no partial clipping.
    pub fn frustum_culled(&self) -> bool {
        self.discarded
            || self.working.iter().any(|v| {
                !NDC_XY.contains(&v.position.x)
                    || !NDC_XY.contains(&v.position.y)
                    || !NDC_Z.contains(&v.position.z)
            })
    }

    /// NDC -> Screen. z and w are left untouched.
    pub fn ndc_to_screen(&mut self, width: usize, height: usize) {
        for vertex in &mut self.working {
            let screen = ndc_to_screen(
                vertex.position.x,
                vertex.position.y,
                width as f32,
                height as f32,
            );
            vertex.position.x = screen.x;
            vertex.position.y = screen.y;
        }
    }

    /// Face normal of the working triple, from its screen-space x, y and NDC z.
    pub fn face_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = &self.working;
        let e1 = v1.position.xyz() - v0.position.xyz();
        let e2 = v2.position.xyz() - v0.position.xyz();
        e1.cross(&e2).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn vertex_at(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(
            Point3::new(x, y, z),
            Vector3::new(1.0, 1.0, 1.0),
            Vector2::zeros(),
            Vector3::z(),
            Vector3::x(),
        )
    }

    fn ndc_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        let mut tri = Triangle::new(
            vertex_at(a[0], a[1], a[2]),
            vertex_at(b[0], b[1], b[2]),
            vertex_at(c[0], c[1], c[2]),
        );
        tri.working = tri.reference;
        tri
    }

    #[test]
    fn model_to_world_resets_from_reference() {
        let mut tri = Triangle::new(
            vertex_at(0.0, 0.0, 0.0),
            vertex_at(1.0, 0.0, 0.0),
            vertex_at(0.0, 1.0, 0.0),
        );
        let camera = Point3::new(0.0, 0.0, 10.0);
        let world = TransformFactory::translation(&Vector3::new(0.0, 0.0, -5.0));

        tri.model_to_world(&camera, &world);
        tri.model_to_world(&camera, &world);

        assert_eq!(tri.vertices()[1].position, Vector4::new(1.0, 0.0, -5.0, 1.0));
        assert_eq!(tri.reference()[1].position, Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert!((tri.vertices()[0].view_dir - Vector3::new(0.0, 0.0, -1.0)).norm() < TOLERANCE);
    }

    #[test]
    fn model_to_world_rotates_normals_without_translation() {
        let mut tri = Triangle::new(
            vertex_at(0.0, 0.0, 0.0),
            vertex_at(1.0, 0.0, 0.0),
            vertex_at(0.0, 1.0, 0.0),
        );
        let world = TransformFactory::translation(&Vector3::new(3.0, 0.0, 0.0))
            * TransformFactory::rotation_y(std::f32::consts::FRAC_PI_2);
        tri.model_to_world(&Point3::origin(), &world);

        let n = tri.vertices()[0].normal;
        assert!((n - Vector3::new(1.0, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((n.norm() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn model_to_ndc_keeps_clip_w() {
        let mut tri = Triangle::new(
            vertex_at(0.0, 0.0, -10.0),
            vertex_at(1.0, 0.0, -10.0),
            vertex_at(0.0, 1.0, -20.0),
        );
        tri.model_to_world(&Point3::origin(), &Matrix4::identity());
        tri.model_to_ndc(&Matrix4::identity(), 1.0, 100, 100);

        let v = tri.vertices();
        assert!((v[0].position.w - 10.0).abs() < TOLERANCE);
        assert!((v[2].position.w - 20.0).abs() < TOLERANCE);
        assert!((v[1].position.x - 0.1).abs() < TOLERANCE);
        assert!(v[2].position.z > v[0].position.z);
        assert!(!tri.frustum_culled());
    }

    #[test]
    fn vertex_on_camera_plane_is_discarded() {
        let mut tri = Triangle::new(
            vertex_at(0.0, 0.0, 0.0),
            vertex_at(1.0, 0.0, -10.0),
            vertex_at(0.0, 1.0, -10.0),
        );
        tri.model_to_world(&Point3::new(0.0, 0.0, 1.0), &Matrix4::identity());
        tri.model_to_ndc(&Matrix4::identity(), 1.0, 100, 100);
        assert!(tri.frustum_culled());
    }

    #[test]
    fn frustum_accepts_inside_and_rejects_outside() {
        let inside = ndc_triangle([-0.9, -0.9, 0.1], [0.9, -0.9, 0.5], [0.0, 0.9, 0.99]);
        assert!(!inside.frustum_culled());

        let outside_x = ndc_triangle([-1.1, 0.0, 0.5], [0.5, 0.0, 0.5], [0.0, 0.5, 0.5]);
        let outside_y = ndc_triangle([0.0, 0.0, 0.5], [0.5, 1.01, 0.5], [0.0, 0.5, 0.5]);
        let behind = ndc_triangle([0.0, 0.0, -0.1], [0.5, 0.0, 0.5], [0.0, 0.5, 0.5]);
        let too_far = ndc_triangle([0.0, 0.0, 0.5], [0.5, 0.0, 1.5], [0.0, 0.5, 0.5]);
        assert!(outside_x.frustum_culled());
        assert!(outside_y.frustum_culled());
        assert!(behind.frustum_culled());
        assert!(too_far.frustum_culled());
    }

    #[test]
    fn ndc_to_screen_flips_y_and_keeps_depth() {
        let mut tri = ndc_triangle([-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.0, 0.5, 0.5]);
        tri.working[0].position.w = 7.0;
        tri.ndc_to_screen(100, 100);

        let v = tri.vertices();
        assert_eq!(v[0].screen_position(), Point2::new(25.0, 75.0));
        assert_eq!(v[2].screen_position(), Point2::new(50.0, 25.0));
        assert_eq!(v[0].position.z, 0.5);
        assert_eq!(v[0].position.w, 7.0);
    }
}
