use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::Triangle;
use crate::core::math::interpolation::{
    EdgeWeights, edge_weights, perspective_interpolate, reciprocal_interpolate,
};
use crate::core::pipeline::{Attributes, Fragment, FragmentShader};
use nalgebra::{Point2, Vector3};

/// Which winding orientation(s) of a triangle get rasterized.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum CullMode {
    #[default]
    Back,
    Front,
    None,
}

impl CullMode {
    /// Back -> Front -> None -> Back.
    pub fn next(self) -> Self {
        match self {
            CullMode::Back => CullMode::Front,
            CullMode::Front => CullMode::None,
            CullMode::None => CullMode::Back,
        }
    }

    /// Parses the names used in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "back" => Some(CullMode::Back),
            "front" => Some(CullMode::Front),
            "none" => Some(CullMode::None),
            _ => None,
        }
    }

    /// Decides whether a pixel with the given signed edge values is accepted.
    ///
    /// `facing` is only evaluated for `CullMode::None`; it returns the dot product of the
    /// face normal with the view direction, whose sign picks the polarity that is rejected.
    pub fn accepts<F: FnOnce() -> f32>(self, edges: &[f32; 3], facing: F) -> bool {
        match self {
            CullMode::Back => edges.iter().all(|&e| e >= 0.0),
            CullMode::Front => edges.iter().all(|&e| e <= 0.0),
            CullMode::None => {
                if facing() > 0.0 {
                    edges.iter().all(|&e| e >= 0.0)
                } else {
                    edges.iter().all(|&e| e <= 0.0)
                }
            }
        }
    }
}

/// Screen-space pixel range covered by a triangle, exclusive at the max end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point2<f32>,
    pub max: Point2<f32>,
}

/// Interpolated depth and w at a pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSample {
    pub z: f32,
    pub w: f32,
}

/// The Rasterizer is responsible for drawing screen-space triangles onto the FrameBuffer.
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cull_mode: CullMode::Back,
        }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Axis-aligned box over the screen-space vertices, grown by one pixel on every side
    /// and clamped to the viewport.
    pub fn bounding_box(&self, triangle: &Triangle, width: f32, height: f32) -> BoundingBox {
        let v = triangle.vertices();
        let xs = [v[0].position.x, v[1].position.x, v[2].position.x];
        let ys = [v[0].position.y, v[1].position.y, v[2].position.y];

        let min_x = xs.iter().copied().fold(f32::INFINITY, f32::min);
        let min_y = ys.iter().copied().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let max_y = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        BoundingBox {
            min: Point2::new((min_x - 1.0).clamp(0.0, width), (min_y - 1.0).clamp(0.0, height)),
            max: Point2::new((max_x + 1.0).clamp(0.0, width), (max_y + 1.0).clamp(0.0, height)),
        }
    }

    /// Edge-function coverage test under the current cull mode.
    ///
    /// Returns the barycentric weights if the pixel is accepted. Degenerate triangles
    /// never cover any pixel.
    pub fn pixel_in_triangle(&self, triangle: &Triangle, pixel: Point2<f32>) -> Option<Vector3<f32>> {
        self.coverage(triangle, &triangle.face_normal(), pixel)
    }

    /// Coverage test with the triangle's face normal already resolved.
    fn coverage(
        &self,
        triangle: &Triangle,
        face_normal: &Vector3<f32>,
        pixel: Point2<f32>,
    ) -> Option<Vector3<f32>> {
        let v = triangle.vertices();
        let EdgeWeights { edges, weights } = edge_weights(
            pixel,
            v[0].screen_position(),
            v[1].screen_position(),
            v[2].screen_position(),
        )?;

        let facing = || {
            let view_dir = (v[0].view_dir * weights.x
                + v[1].view_dir * weights.y
                + v[2].view_dir * weights.z)
                .normalize();
            face_normal.dot(&view_dir)
        };

        self.cull_mode.accepts(&edges, facing).then_some(weights)
    }

    /// Perspective-correct depth and w at the pixel with the given weights.
    ///
    /// Returns `None` if a vertex has zero depth or w, so no NaN reaches the buffers.
    pub fn depth(&self, triangle: &Triangle, weights: Vector3<f32>) -> Option<DepthSample> {
        let v = triangle.vertices();
        let z = reciprocal_interpolate(
            [v[0].position.z, v[1].position.z, v[2].position.z],
            weights,
        )?;
        let w = reciprocal_interpolate(
            [v[0].position.w, v[1].position.w, v[2].position.w],
            weights,
        )?;
        Some(DepthSample { z, w })
    }

    /// Perspective-correct attribute blend; normal, tangent and view direction are
    /// renormalized afterwards.
    pub fn interpolate(&self, triangle: &Triangle, weights: Vector3<f32>, w_interpolated: f32) -> Attributes {
        let v = triangle.vertices();
        let values = [v[0].attributes(), v[1].attributes(), v[2].attributes()];
        let w = [v[0].position.w, v[1].position.w, v[2].position.w];

        let mut attributes = perspective_interpolate(&values, w, weights, w_interpolated);
        attributes.normal = attributes.normal.normalize();
        attributes.tangent = attributes.tangent.normalize();
        attributes.view_dir = attributes.view_dir.normalize();
        attributes
    }

    /// Rasterizes a triangle whose working vertices are already in screen space.
    ///
    /// Every covered pixel that passes the depth test is interpolated, shaded and written.
    /// Returns the number of pixels written.
    pub fn rasterize_triangle<S: FragmentShader + ?Sized>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        triangle: &Triangle,
    ) -> usize {
        let bbox = self.bounding_box(triangle, framebuffer.width as f32, framebuffer.height as f32);
        let (start_x, end_x) = (bbox.min.x as usize, bbox.max.x as usize);
        let (start_y, end_y) = (bbox.min.y as usize, bbox.max.y as usize);

        // Constant per triangle; only the no-culling policy reads it.
        let face_normal = triangle.face_normal();

        let mut written = 0;
        for y in start_y..end_y {
            for x in start_x..end_x {
                let pixel = Point2::new(x as f32, y as f32);

                let Some(weights) = self.coverage(triangle, &face_normal, pixel) else {
                    continue;
                };
                let Some(sample) = self.depth(triangle, weights) else {
                    continue;
                };

                if framebuffer.depth_test_and_update(x, y, sample.z) {
                    let fragment = Fragment {
                        x,
                        y,
                        depth: sample.z,
                        attributes: self.interpolate(triangle, weights, sample.w),
                    };
                    let color = shader.shade(&fragment);
                    framebuffer.set_pixel(x, y, color);
                    written += 1;
                }
            }
        }
        written
    }
}
