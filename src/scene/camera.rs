use crate::core::math::transform::{FAR_PLANE, NEAR_PLANE, TransformFactory};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// Movement intents consumed by one [`Camera::update`].
///
/// Keyboard axes are in [-1, 1]; the drag values are raw mouse deltas that the camera
/// scales by its own sensitivities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraInput {
    /// +1 = right, -1 = left.
    pub strafe: f32,
    /// +1 = up, -1 = down.
    pub vertical: f32,
    /// +1 = forward, -1 = backward.
    pub forward: f32,
    /// Multiplies keyboard speed.
    pub boost: bool,
    pub yaw: f32,
    pub pitch: f32,
    pub dolly: f32,
    pub pan: f32,
}

/// Movement tuning, loaded from `[camera]` in the config.
#[derive(Debug, Clone, Copy)]
pub struct CameraSpeeds {
    pub move_speed: f32,
    pub boost_multiplier: f32,
    /// Degrees per mouse unit.
    pub rotation_sensitivity: f32,
    /// World units per mouse unit per second.
    pub drag_sensitivity: f32,
}

impl Default for CameraSpeeds {
    fn default() -> Self {
        Self {
            move_speed: 15.0,
            boost_multiplier: 2.5,
            rotation_sensitivity: 0.1,
            drag_sensitivity: 2.0,
        }
    }
}

/// A free-flying camera that owns the view and projection matrices.
///
/// The view-to-world matrix always has an orthonormal (right, up, forward) basis; both
/// matrices are rebuilt from scratch on every update.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub speeds: CameraSpeeds,

    /// Base forward axis before yaw/pitch, stored pointing out of the back of the camera.
    view_forward: Vector3<f32>,
    /// Accumulated rotation in degrees: x = pitch, y = yaw.
    rotation: Vector2<f32>,
    relative_translation: Vector3<f32>,
    /// `tan(fov / 2)`.
    fov_factor: f32,
    aspect_ratio: f32,
    alternate_mode: bool,

    // --- Cached Matrices ---
    view_to_world: Matrix4<f32>,
    world_to_view: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new(position: Point3<f32>, forward: Vector3<f32>, fov_degrees: f32, aspect_ratio: f32) -> Self {
        let mut cam = Self {
            position,
            speeds: CameraSpeeds::default(),
            view_forward: (-forward).normalize(),
            rotation: Vector2::zeros(),
            relative_translation: Vector3::zeros(),
            fov_factor: (fov_degrees.to_radians() / 2.0).tan(),
            aspect_ratio,
            alternate_mode: false,
            view_to_world: Matrix4::identity(),
            world_to_view: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.calculate_look_at();
        cam.calculate_projection();
        cam
    }

    /// Consumes one frame of input and rebuilds both matrices.
    ///
    /// Switching between the software and the alternate (left-handed) convention mirrors
    /// the camera through the XY plane: Z position and forward are negated and the yaw
    /// turns by 180 degrees.
    pub fn update(&mut self, alternate_mode: bool, elapsed_sec: f32, input: &CameraInput) {
        if self.alternate_mode != alternate_mode {
            self.position.z = -self.position.z;
            self.rotation.y += 180.0;
            self.view_forward = -self.view_forward;
            self.alternate_mode = alternate_mode;
        }

        // 1. Keyboard
        let speed = if input.boost {
            self.speeds.move_speed * self.speeds.boost_multiplier
        } else {
            self.speeds.move_speed
        };
        // The software convention's forward axis points out of the back of the camera.
        let forward_sign = if self.alternate_mode { 1.0 } else { -1.0 };
        self.relative_translation = Vector3::new(
            input.strafe * speed * elapsed_sec,
            input.vertical * speed * elapsed_sec,
            forward_sign * input.forward * speed * elapsed_sec,
        );

        // 2. Mouse
        let drag = self.speeds.drag_sensitivity * elapsed_sec;
        self.relative_translation.z += input.dolly * drag;
        self.relative_translation.y -= input.pan * drag;
        self.rotation.x -= input.pitch * self.speeds.rotation_sensitivity;
        self.rotation.y -= input.yaw * self.speeds.rotation_sensitivity;

        self.calculate_look_at();
        self.calculate_projection();
    }

    fn calculate_look_at(&mut self) {
        let system_sign = -self.view_forward.z;

        // FORWARD with yaw applied
        let yaw = TransformFactory::rotation_y3(self.rotation.y.to_radians());
        let mut forward = yaw * self.view_forward;
        forward.x *= system_sign;

        // RIGHT from world up and the yawed forward
        let right = Vector3::y().cross(&forward).normalize();

        // FORWARD with pitch applied around RIGHT
        let pitch = TransformFactory::rotation(&right, self.rotation.x.to_radians());
        forward = pitch * forward;
        forward.y *= system_sign;

        // UP
        let up = forward.cross(&right);

        self.position += right * self.relative_translation.x
            + up * self.relative_translation.y
            + forward * self.relative_translation.z;
        self.relative_translation = Vector3::zeros();

        self.view_to_world = TransformFactory::basis(&right, &up, &forward, &self.position.coords);
        self.world_to_view = TransformFactory::rigid_inverse(&self.view_to_world);
    }

    fn calculate_projection(&mut self) {
        self.projection_matrix =
            TransformFactory::perspective_lh(self.aspect_ratio, self.fov_factor, NEAR_PLANE, FAR_PLANE);
    }

    pub fn view_to_world(&self) -> Matrix4<f32> {
        self.view_to_world
    }

    pub fn world_to_view(&self) -> Matrix4<f32> {
        self.world_to_view
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    pub fn fov_factor(&self) -> f32 {
        self.fov_factor
    }

    pub fn alternate_mode(&self) -> bool {
        self.alternate_mode
    }
}
