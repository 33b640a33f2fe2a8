use crate::core::rasterizer::CullMode;
use crate::io::config::Config;
use crate::io::image::save_buffer_to_image;
use crate::pipeline::hardware::{HardwareFrame, HardwareMirror};
use crate::pipeline::renderer::{FrameStats, RenderSettings, Renderer, Toggle};
use crate::scene::context::RenderContext;
use crate::scene::loader::init_scene_resources;
use crate::ui::input::{InputSource, ScriptedInput};
use log::{debug, info, warn};
use nalgebra::Vector3;
use std::time::Instant;

/// Reads the render toggles' starting values from `[render]`.
pub fn settings_from_config(config: &Config) -> RenderSettings {
    let render = &config.render;
    let cull_mode = CullMode::from_name(&render.cull_mode).unwrap_or_else(|| {
        warn!("Unknown cull mode '{}', using back-face culling", render.cull_mode);
        CullMode::Back
    });

    RenderSettings {
        cull_mode,
        normal_mapping: render.normal_mapping,
        depth_view: render.depth_view,
        rotating: render.rotating,
        alternate_mode: false,
        depth_view_range: (render.depth_view_range[0], render.depth_view_range[1]),
    }
}

/// What happened in one frame of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Software(FrameStats),
    Hardware,
}

/// The frame loop: input -> toggles -> camera and object update -> render.
pub struct App {
    pub context: RenderContext,
    pub renderer: Renderer,
    pub settings: RenderSettings,
    input: Box<dyn InputSource>,
    mirror: Option<Box<dyn HardwareMirror>>,
}

impl App {
    pub fn new(config: &Config, input: Box<dyn InputSource>) -> Self {
        let mut renderer = Renderer::new(config.render.width, config.render.height);
        renderer.background = Vector3::from(config.render.background);

        Self {
            context: init_scene_resources(config),
            renderer,
            settings: settings_from_config(config),
            input,
            mirror: None,
        }
    }

    /// Binds an accelerated pipeline for the alternate render mode.
    pub fn set_hardware_mirror(&mut self, mirror: Box<dyn HardwareMirror>) {
        info!("Hardware mirror bound: {}", mirror.name());
        self.mirror = Some(mirror);
    }

    /// Runs one frame.
    pub fn step(&mut self, frame: usize, elapsed: f32) -> Result<FrameOutcome, String> {
        let input = self.input.poll(frame, elapsed);

        for &toggle in &input.toggles {
            if toggle == Toggle::RenderMode && self.mirror.is_none() {
                warn!("No hardware mirror bound, staying in software mode");
                continue;
            }
            self.settings.apply_toggle(toggle);
        }

        let alternate = self.settings.alternate_mode;
        self.context.camera.update(alternate, input.elapsed, &input.camera_input());
        self.context.object.update(alternate, input.elapsed, self.settings.rotating);

        match self.mirror.as_mut().filter(|_| alternate) {
            Some(mirror) => {
                let camera = &self.context.camera;
                let frame_data = HardwareFrame {
                    model: &self.context.object.model,
                    world: self.context.object.transform(),
                    world_to_view: camera.world_to_view(),
                    projection: camera.projection_matrix(),
                    cull_mode: self.settings.cull_mode,
                };
                mirror
                    .draw_frame(&frame_data)
                    .map_err(|e| format!("Hardware mirror '{}' failed: {}", mirror.name(), e))?;
                Ok(FrameOutcome::Hardware)
            }
            None => Ok(FrameOutcome::Software(
                self.renderer.render_frame(&mut self.context, &self.settings),
            )),
        }
    }

    /// Runs `frames` frames of `frame_time` seconds each.
    pub fn run(&mut self, frames: usize, frame_time: f32) -> Result<(), String> {
        let start_time = Instant::now();
        for frame in 0..frames {
            let frame_start = Instant::now();
            let outcome = self.step(frame, frame_time)?;
            debug!("Frame {} ({:?}) took {:.2?}", frame, outcome, frame_start.elapsed());
        }
        info!("Rendered {} frames in {:.2?}", frames, start_time.elapsed());
        Ok(())
    }

    pub fn save_frame(&self, path: &str) -> Result<(), String> {
        let fb = &self.renderer.framebuffer;
        save_buffer_to_image(fb.pixels(), fb.width, fb.height, path)
    }
}

/// Runs the application in CLI mode (headless) and writes the last software frame.
pub fn run_cli(config: Config) -> Result<(), String> {
    info!(
        "Starting CLI mode ({}x{}, {} frames)...",
        config.render.width, config.render.height, config.render.frames
    );

    let input = ScriptedInput::new(config.input.clone());
    let mut app = App::new(&config, Box::new(input));
    app.run(config.render.frames, config.render.frame_time)?;

    info!("Saving output to '{}'...", config.render.output);
    app.save_frame(&config.render.output)?;
    info!("Done.");
    Ok(())
}
