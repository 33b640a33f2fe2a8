use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub input: Vec<InputEventConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Seconds of simulated time per frame.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
    #[serde(default = "default_background")]
    pub background: [f32; 3],

    // --- Pipeline & Debug ---
    #[serde(default = "default_cull_mode")]
    pub cull_mode: String, // "back", "front", "none"
    #[serde(default = "default_true")]
    pub normal_mapping: bool,
    #[serde(default = "default_false")]
    pub depth_view: bool,
    #[serde(default = "default_true")]
    pub rotating: bool,
    /// Degrees per second.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    #[serde(default = "default_depth_view_range")]
    pub depth_view_range: [f32; 2],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            frames: default_frames(),
            frame_time: default_frame_time(),
            background: default_background(),
            cull_mode: default_cull_mode(),
            normal_mapping: true,
            depth_view: false,
            rotating: true,
            rotation_speed: default_rotation_speed(),
            depth_view_range: default_depth_view_range(),
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_frames() -> usize {
    1
}
fn default_frame_time() -> f32 {
    1.0 / 60.0
}
fn default_background() -> [f32; 3] {
    [0.1, 0.1, 0.1]
}
fn default_cull_mode() -> String {
    "back".to_string()
}
fn default_rotation_speed() -> f32 {
    45.0
}
fn default_depth_view_range() -> [f32; 2] {
    [0.985, 1.0]
}
fn default_false() -> bool {
    false
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_forward")]
    pub forward: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_boost_multiplier")]
    pub boost_multiplier: f32,
    #[serde(default = "default_rotation_sensitivity")]
    pub rotation_sensitivity: f32,
    #[serde(default = "default_drag_sensitivity")]
    pub drag_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            forward: default_forward(),
            fov: default_fov(),
            move_speed: default_move_speed(),
            boost_multiplier: default_boost_multiplier(),
            rotation_sensitivity: default_rotation_sensitivity(),
            drag_sensitivity: default_drag_sensitivity(),
        }
    }
}

fn default_forward() -> [f32; 3] {
    [0.0, 0.0, -1.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_move_speed() -> f32 {
    15.0
}
fn default_boost_multiplier() -> f32 {
    2.5
}
fn default_rotation_sensitivity() -> f32 {
    0.1
}
fn default_drag_sensitivity() -> f32 {
    2.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_color")]
    pub color: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
    #[serde(default = "default_ambient")]
    pub ambient: [f32; 3],
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            color: default_light_color(),
            intensity: default_light_intensity(),
            ambient: default_ambient(),
            shininess: default_shininess(),
        }
    }
}

fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, -0.577]
}
fn default_light_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_light_intensity() -> f32 {
    7.0
}
fn default_ambient() -> [f32; 3] {
    [0.025, 0.025, 0.025]
}
fn default_shininess() -> f32 {
    25.0
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// OBJ file. The built-in test triangle is used when absent or unreadable.
    pub path: Option<String>,
    #[serde(default = "default_topology")]
    pub topology: String, // "list", "strip"
    #[serde(default = "default_model_position")]
    pub position: [f32; 3],

    // --- Material Textures ---
    pub diffuse_texture: Option<String>,
    pub normal_texture: Option<String>,
    pub specular_texture: Option<String>,
    pub gloss_texture: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            topology: default_topology(),
            position: default_model_position(),
            diffuse_texture: None,
            normal_texture: None,
            specular_texture: None,
            gloss_texture: None,
        }
    }
}

fn default_topology() -> String {
    "list".to_string()
}
fn default_model_position() -> [f32; 3] {
    [0.0, 0.0, -50.0]
}

/// One scripted frame of input, applied at `frame`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputEventConfig {
    pub frame: usize,
    /// Held keys: "w", "a", "s", "d", "q", "e", "shift".
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub mouse: Option<MouseConfig>,
    /// "cull", "normal_mapping", "depth_view", "rotation", "render_mode".
    #[serde(default)]
    pub toggles: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MouseConfig {
    #[serde(default)]
    pub dx: f32,
    #[serde(default)]
    pub dy: f32,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.render.width as f32 / self.render.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!((config.render.width, config.render.height), (640, 480));
        assert_eq!(config.render.cull_mode, "back");
        assert_eq!(config.camera.forward, [0.0, 0.0, -1.0]);
        assert_eq!(config.light.intensity, 7.0);
        assert_eq!(config.light.shininess, 25.0);
        assert_eq!(config.model.position, [0.0, 0.0, -50.0]);
        assert!(config.model.path.is_none());
        assert!(config.input.is_empty());
    }

    #[test]
    fn partial_sections_and_scripted_input() {
        let config = Config::parse(
            r#"
            [render]
            width = 100
            cull_mode = "none"

            [model]
            path = "assets/vehicle.obj"
            topology = "strip"

            [[input]]
            frame = 2
            keys = ["w", "shift"]
            mouse = { dx = 4.0, left = true }
            toggles = ["cull"]
            "#,
        )
        .unwrap();

        assert_eq!(config.render.width, 100);
        assert_eq!(config.render.height, 480);
        assert_eq!(config.render.cull_mode, "none");
        assert_eq!(config.model.topology, "strip");
        assert_eq!(config.input.len(), 1);
        let event = &config.input[0];
        assert_eq!(event.frame, 2);
        assert_eq!(event.keys, vec!["w", "shift"]);
        let mouse = event.mouse.unwrap();
        assert_eq!((mouse.dx, mouse.dy, mouse.left, mouse.right), (4.0, 0.0, true, false));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = Config::parse("[render\nwidth = ").unwrap_err();
        assert!(err.starts_with("Failed to parse TOML"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load("/nonexistent/scene.toml").unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }
}
