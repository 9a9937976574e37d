//! Free-look fly camera driven by yaw/pitch angles.

use crate::{Mat3, Mat4, Vec3, vec3};

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 2.5;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 45.0;

pub const Z_NEAR: f32 = 0.1;
pub const DEFAULT_Z_FAR: f32 = 100.0;

const PITCH_LIMIT: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 90.0;

/// Discrete movement directions delivered by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Axis-aligned box the eye position is clamped into after every move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Builds bounds from two corners, ordering each axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Tunables that vary with scene scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Field of view in degrees.
    pub zoom: f32,
    pub z_far: f32,
    pub bounds: Option<Bounds>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            z_far: DEFAULT_Z_FAR,
            bounds: None,
        }
    }
}

impl CameraSettings {
    /// Larger, walled-in variant used for the full city block.
    pub fn bounded_city() -> Self {
        Self {
            movement_speed: 15.0,
            z_far: 200.0,
            bounds: Some(Bounds::new(vec3(-58.0, 0.5, -58.0), vec3(58.0, 60.0, 58.0))),
            ..Self::default()
        }
    }

    pub fn with_far(mut self, z_far: f32) -> Self {
        self.z_far = z_far;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Right-handed fly camera.
///
/// `front`, `right` and `up` are derived from `yaw`/`pitch`/`world_up` and are
/// only ever written by [`Camera::recompute_basis`].
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    settings: CameraSettings,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(vec3(0.0, 2.0, 25.0), Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }
}

impl Camera {
    /// Angles are in degrees.
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::with_settings(position, world_up, yaw, pitch, CameraSettings::default())
    }

    pub fn with_settings(
        position: Vec3,
        world_up: Vec3,
        yaw: f32,
        pitch: f32,
        settings: CameraSettings,
    ) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up,
            yaw,
            pitch,
            settings,
        };
        camera.settings.zoom = camera.settings.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        camera.recompute_basis();
        camera
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    #[inline]
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current field of view in degrees.
    #[inline]
    pub fn zoom(&self) -> f32 {
        self.settings.zoom
    }

    #[inline]
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Moves the eye along the basis for `delta_seconds`, then clamps into bounds.
    /// Non-positive (or NaN) deltas leave the camera untouched.
    pub fn move_by(&mut self, direction: CameraMovement, delta_seconds: f32) {
        if delta_seconds.is_nan() || delta_seconds <= 0.0 {
            return;
        }
        let velocity = self.settings.movement_speed * delta_seconds;
        let offset = match direction {
            CameraMovement::Forward => self.front * velocity,
            CameraMovement::Backward => -self.front * velocity,
            CameraMovement::Left => -self.right * velocity,
            CameraMovement::Right => self.right * velocity,
            CameraMovement::Up => self.world_up * velocity,
            CameraMovement::Down => -self.world_up * velocity,
        };

        let mut candidate = self.position + offset;
        if let Some(bounds) = &self.settings.bounds {
            candidate = bounds.clamp(candidate);
        }
        self.position = candidate;
    }

    /// Applies a cursor delta. With `constrain_pitch` the pitch is kept inside
    /// ±89° so the up vector never flips.
    pub fn look(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.settings.mouse_sensitivity;
        self.pitch += y_offset * self.settings.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.recompute_basis();
    }

    /// Scroll forward (positive) narrows the field of view.
    pub fn zoom_by(&mut self, y_offset: f32) {
        self.settings.zoom = (self.settings.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// View with the translation stripped, so the skybox stays centred on the eye.
    #[inline]
    pub fn skybox_view_matrix(&self) -> Mat4 {
        Mat4::from_mat3(Mat3::from_mat4(self.view_matrix()))
    }

    /// Perspective projection for a viewport. A zero height falls back to a
    /// square aspect; a far plane not beyond the near plane becomes `near + 100`.
    pub fn projection_matrix(&self, viewport_width: u32, viewport_height: u32) -> Mat4 {
        let aspect = if viewport_height > 0 {
            viewport_width as f32 / viewport_height as f32
        } else {
            1.0
        };
        let z_far = if self.settings.z_far.is_finite() && self.settings.z_far > Z_NEAR {
            self.settings.z_far
        } else {
            Z_NEAR + 100.0
        };
        let fov_y_rad = self.settings.zoom.clamp(MIN_ZOOM, MAX_ZOOM).to_radians();

        Mat4::perspective_rh(fov_y_rad, aspect.max(1e-6), Z_NEAR, z_far)
    }

    #[inline]
    pub fn view_projection(&self, viewport_width: u32, viewport_height: u32) -> Mat4 {
        self.projection_matrix(viewport_width, viewport_height) * self.view_matrix()
    }

    fn recompute_basis(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();

        self.front = vec3(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
