//! Core types: math re-exports, fly Camera, model Transform, input context.

pub use glam::{Mat3, Mat4, Vec3, Vec4, vec3};

pub mod camera;
pub mod input;
pub mod transform;

pub use camera::{Bounds, Camera, CameraMovement, CameraSettings};
pub use input::{FrameClock, InputState, Key};
pub use transform::Transform;
