use crate::io::config::{InputEventConfig, MouseConfig};
use crate::pipeline::renderer::Toggle;
use crate::scene::camera::CameraInput;
use log::warn;

/// Movement keys held during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub boost: bool,
}

impl KeyState {
    /// Marks a key by its name. Returns false for keys without a binding.
    pub fn press(&mut self, name: &str) -> bool {
        let key = match name.to_ascii_lowercase().as_str() {
            "w" | "up_arrow" => &mut self.forward,
            "s" | "down_arrow" => &mut self.back,
            "a" | "left_arrow" => &mut self.left,
            "d" | "right_arrow" => &mut self.right,
            "e" | "space" => &mut self.up,
            "q" => &mut self.down,
            "shift" | "lshift" | "rshift" => &mut self.boost,
            _ => return false,
        };
        *key = true;
        true
    }
}

/// Mouse motion since the previous frame and the buttons held while it happened.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub dx: f32,
    pub dy: f32,
    pub left: bool,
    pub right: bool,
}

impl From<MouseConfig> for MouseState {
    fn from(m: MouseConfig) -> Self {
        Self {
            dx: m.dx,
            dy: m.dy,
            left: m.left,
            right: m.right,
        }
    }
}

/// Everything the input collaborator reports for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub elapsed: f32,
    pub keys: KeyState,
    pub mouse: MouseState,
    pub toggles: Vec<Toggle>,
}

fn axis(positive: bool, negative: bool) -> f32 {
    f32::from(u8::from(positive)) - f32::from(u8::from(negative))
}

impl FrameInput {
    /// Maps held keys and mouse drags to camera intents.
    ///
    /// Left drag dollies (dy) and yaws (dx), right drag pitches (dy) and yaws (dx), both
    /// buttons together pan vertically (dy).
    pub fn camera_input(&self) -> CameraInput {
        let mut input = CameraInput {
            strafe: axis(self.keys.right, self.keys.left),
            vertical: axis(self.keys.up, self.keys.down),
            forward: axis(self.keys.forward, self.keys.back),
            boost: self.keys.boost,
            ..Default::default()
        };

        let m = &self.mouse;
        match (m.left, m.right) {
            (true, false) => {
                input.dolly = m.dy;
                input.yaw = m.dx;
            }
            (false, true) => {
                input.pitch = m.dy;
                input.yaw = m.dx;
            }
            (true, true) => input.pan = m.dy,
            (false, false) => {}
        }
        input
    }
}

/// The per-frame input collaborator.
pub trait InputSource {
    fn poll(&mut self, frame: usize, elapsed: f32) -> FrameInput;
}

/// Replays input events from the configuration, one batch per frame index.
pub struct ScriptedInput {
    events: Vec<InputEventConfig>,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<InputEventConfig>) -> Self {
        events.sort_by_key(|e| e.frame);
        Self { events }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: usize, elapsed: f32) -> FrameInput {
        let mut input = FrameInput {
            elapsed,
            ..Default::default()
        };

        for event in self.events.iter().filter(|e| e.frame == frame) {
            for key in &event.keys {
                if !input.keys.press(key) {
                    warn!("Frame {}: unknown key '{}'", frame, key);
                }
            }
            if let Some(mouse) = event.mouse {
                let mouse = MouseState::from(mouse);
                input.mouse.dx += mouse.dx;
                input.mouse.dy += mouse.dy;
                input.mouse.left |= mouse.left;
                input.mouse.right |= mouse.right;
            }
            for name in &event.toggles {
                match Toggle::from_name(name) {
                    Some(toggle) => input.toggles.push(toggle),
                    None => warn!("Frame {}: unknown toggle '{}'", frame, name),
                }
            }
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(frame: usize, keys: &[&str], mouse: Option<MouseConfig>, toggles: &[&str]) -> InputEventConfig {
        InputEventConfig {
            frame,
            keys: keys.iter().map(|k| k.to_string()).collect(),
            mouse,
            toggles: toggles.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn keys_map_to_axes() {
        let mut keys = KeyState::default();
        assert!(keys.press("W"));
        assert!(keys.press("a"));
        assert!(keys.press("shift"));
        assert!(!keys.press("f12"));

        let frame = FrameInput {
            keys,
            ..Default::default()
        };
        let input = frame.camera_input();
        assert_eq!((input.strafe, input.vertical, input.forward), (-1.0, 0.0, 1.0));
        assert!(input.boost);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut keys = KeyState::default();
        keys.press("w");
        keys.press("s");
        let frame = FrameInput {
            keys,
            ..Default::default()
        };
        assert_eq!(frame.camera_input().forward, 0.0);
    }

    #[test]
    fn mouse_buttons_select_drag_mapping() {
        let drag = |left, right| {
            FrameInput {
                mouse: MouseState {
                    dx: 3.0,
                    dy: 5.0,
                    left,
                    right,
                },
                ..Default::default()
            }
            .camera_input()
        };

        let left = drag(true, false);
        assert_eq!((left.dolly, left.yaw, left.pitch, left.pan), (5.0, 3.0, 0.0, 0.0));

        let right = drag(false, true);
        assert_eq!((right.dolly, right.yaw, right.pitch, right.pan), (0.0, 3.0, 5.0, 0.0));

        let both = drag(true, true);
        assert_eq!((both.dolly, both.yaw, both.pitch, both.pan), (0.0, 0.0, 0.0, 5.0));

        assert_eq!(drag(false, false), CameraInput::default());
    }

    #[test]
    fn scripted_input_replays_by_frame() {
        let mouse = MouseConfig {
            dx: 1.0,
            dy: 0.0,
            left: false,
            right: true,
        };
        let mut source = ScriptedInput::new(vec![
            event(3, &["d"], None, &["depth_view", "bogus"]),
            event(1, &["w"], Some(mouse), &["cull"]),
            event(1, &[], Some(mouse), &[]),
        ]);

        let first = source.poll(1, 0.5);
        assert_eq!(first.elapsed, 0.5);
        assert!(first.keys.forward);
        assert_eq!(first.mouse.dx, 2.0);
        assert!(first.mouse.right);
        assert_eq!(first.toggles, vec![Toggle::CycleCullMode]);

        assert_eq!(source.poll(2, 0.5).toggles, vec![]);

        let third = source.poll(3, 0.5);
        assert!(third.keys.right);
        assert_eq!(third.toggles, vec![Toggle::DepthView]);
    }
}
