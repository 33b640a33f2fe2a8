use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::FragmentShader;
use crate::core::rasterizer::{CullMode, Rasterizer};
use crate::pipeline::shaders::depth::DepthShader;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::context::RenderContext;
use log::{debug, info};
use nalgebra::Vector3;

/// Discrete switches the input layer can flip between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    CycleCullMode,
    NormalMapping,
    DepthView,
    Rotation,
    RenderMode,
}

impl Toggle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cull" | "cull_mode" => Some(Toggle::CycleCullMode),
            "normal_mapping" | "normal_map" => Some(Toggle::NormalMapping),
            "depth_view" | "depth" => Some(Toggle::DepthView),
            "rotation" | "rotate" => Some(Toggle::Rotation),
            "render_mode" | "mode" => Some(Toggle::RenderMode),
            _ => None,
        }
    }
}

/// The render configuration for one frame, passed explicitly into [`Renderer::render_frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub cull_mode: CullMode,
    pub normal_mapping: bool,
    pub depth_view: bool,
    pub rotating: bool,
    /// Use the hardware mirror's (left-handed) convention instead of the software one.
    pub alternate_mode: bool,
    /// Depth band shown by the depth view, as (near, far).
    pub depth_view_range: (f32, f32),
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            normal_mapping: true,
            depth_view: false,
            rotating: true,
            alternate_mode: false,
            depth_view_range: (0.985, 1.0),
        }
    }
}

impl RenderSettings {
    pub fn apply_toggle(&mut self, toggle: Toggle) {
        match toggle {
            Toggle::CycleCullMode => {
                self.cull_mode = self.cull_mode.next();
                info!("Cull mode changed to: {:?}", self.cull_mode);
            }
            Toggle::NormalMapping => {
                self.normal_mapping = !self.normal_mapping;
                info!("Normal mapping {}", on_off(self.normal_mapping));
            }
            Toggle::DepthView => {
                self.depth_view = !self.depth_view;
                info!("Depth buffer view {}", on_off(self.depth_view));
            }
            Toggle::Rotation => {
                self.rotating = !self.rotating;
                info!("Rotation {}", on_off(self.rotating));
            }
            Toggle::RenderMode => {
                self.alternate_mode = !self.alternate_mode;
                let mode = if self.alternate_mode { "hardware" } else { "software" };
                info!("Render mode changed to: {}", mode);
            }
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub culled: usize,
    pub fragments: usize,
}

/// The frame orchestrator: owns the buffers and drives every triangle through the pipeline.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
    pub background: Vector3<f32>,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
            background: Vector3::new(0.1, 0.1, 0.1),
        }
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear(self.background);
    }

    /// Renders one frame with the software pipeline.
    ///
    /// Clears both buffers, then sends every triangle of the scene object through
    /// model -> world, world -> NDC, frustum culling, NDC -> screen and rasterization.
    /// The camera and object are expected to be updated for this frame already.
    pub fn render_frame(&mut self, ctx: &mut RenderContext, settings: &RenderSettings) -> FrameStats {
        self.clear();
        self.rasterizer.set_cull_mode(settings.cull_mode);

        let (width, height) = (self.framebuffer.width, self.framebuffer.height);
        let camera_pos = ctx.camera.position;
        let view_to_world = ctx.camera.view_to_world();
        let fov_factor = ctx.camera.fov_factor();
        let world = ctx.object.transform();

        let model = &mut ctx.object.model;
        let material = &model.material;
        let triangles = &mut model.triangles;

        let mut stats = FrameStats::default();
        let mut draw = |shader: &dyn FragmentShader| {
            for triangle in triangles.iter_mut() {
                stats.triangles += 1;

                triangle.model_to_world(&camera_pos, &world);
                triangle.model_to_ndc(&view_to_world, fov_factor, width, height);
                if triangle.frustum_culled() {
                    stats.culled += 1;
                    continue;
                }
                triangle.ndc_to_screen(width, height);

                stats.fragments += self
                    .rasterizer
                    .rasterize_triangle(&mut self.framebuffer, shader, triangle);
            }
        };

        if settings.depth_view {
            let (near, far) = settings.depth_view_range;
            draw(&DepthShader::new(near, far));
        } else {
            let mut shader = PhongShader::new(material, &ctx.light);
            shader.ambient = ctx.ambient;
            shader.normal_mapping = settings.normal_mapping;
            draw(&shader);
        }

        debug!(
            "Frame: {} triangles, {} frustum culled, {} fragments",
            stats.triangles, stats.culled, stats.fragments
        );
        stats
    }
}
