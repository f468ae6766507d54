//! Orbit camera rig.
//!
//! Provides a damped orbit controller with drag rotation, wheel and pinch
//! zoom, fly-to tweens, and the camera contract it drives.

/// Orbit controller: input ingestion, damping, programmatic control.
pub mod controller;
/// Camera contract and a reference perspective camera.
pub mod core;
/// Degree/radian helpers and spherical-to-Cartesian conversion.
pub mod spherical;
/// Anything the rig can orbit around.
pub mod target;
/// Fly-to tweens and motion ownership.
pub mod tween;

pub use controller::OrbitCameraController;
pub use core::{Camera, CameraHandle};
pub use target::OrbitTarget;
pub use tween::{MotionSource, OrbitPose, TweenHandle};
