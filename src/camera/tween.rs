//! Fly-to tweens for the orbit rig.
//!
//! A tween does not move the camera itself. Each sample is written into
//! the controller's *target* fields and the ordinary damping loop glides
//! after it.

use web_time::{Duration, Instant};

use super::spherical::clamp_pitch;
use crate::util::easing::EasingFunction;

/// Yaw/pitch (degrees) and distance of an orbit camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitPose {
    /// Rotation around world up, in degrees.
    pub yaw: f32,
    /// Elevation above the orbit center's horizon, in degrees.
    pub pitch: f32,
    /// Distance from the orbit center.
    pub distance: f32,
}

impl OrbitPose {
    /// Pose from its three channels.
    #[must_use]
    pub const fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        Self {
            yaw,
            pitch,
            distance,
        }
    }

    /// Channel-wise linear interpolation.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            yaw: self.yaw + (other.yaw - self.yaw) * t,
            pitch: self.pitch + (other.pitch - self.pitch) * t,
            distance: self.distance + (other.distance - self.distance) * t,
        }
    }

    /// Whether every channel is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite() && self.distance.is_finite()
    }

    /// Pitch clamped to the pole limit, distance clamped to `[min, max]`.
    #[must_use]
    pub fn clamped(&self, min_distance: f32, max_distance: f32) -> Self {
        Self {
            yaw: self.yaw,
            pitch: clamp_pitch(self.pitch),
            distance: self.distance.clamp(min_distance, max_distance),
        }
    }
}

/// Identifies one `animate_to` call.
///
/// Handles are never reused within a controller, so a stale handle can be
/// told apart from the tween that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

impl TweenHandle {
    pub(crate) const fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// Monotonic generation number of this tween.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Who currently owns the controller's target fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionSource {
    /// Nothing is steering; damping settles on the last target.
    #[default]
    Idle,
    /// A pointer drag or touch gesture is in progress.
    UserDrag,
    /// A fly-to tween is writing the targets.
    Tween(TweenHandle),
}

/// One in-flight fly-to from a start pose to a goal pose.
#[derive(Debug, Clone)]
pub struct CameraTween {
    handle: TweenHandle,
    start_time: Instant,
    duration: Duration,
    start: OrbitPose,
    goal: OrbitPose,
    easing: EasingFunction,
}

impl CameraTween {
    /// Tween from `start` to `goal` beginning at `start_time`.
    #[must_use]
    pub fn new(
        handle: TweenHandle,
        start: OrbitPose,
        goal: OrbitPose,
        duration: Duration,
        easing: EasingFunction,
        start_time: Instant,
    ) -> Self {
        Self {
            handle,
            start_time,
            duration,
            start,
            goal,
            easing,
        }
    }

    /// Handle returned to the caller of `animate_to`.
    #[must_use]
    pub fn handle(&self) -> TweenHandle {
        self.handle
    }

    /// Pose the tween ends on.
    #[must_use]
    pub fn goal(&self) -> OrbitPose {
        self.goal
    }

    /// Total tween duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Calculate normalized progress (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start_time);

        if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    /// Whether the tween has reached its goal.
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Eased pose at `now`. Returns the goal exactly once complete.
    #[must_use]
    pub fn sample(&self, now: Instant) -> OrbitPose {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.goal;
        }
        self.start.lerp(&self.goal, self.easing.evaluate(t))
    }
}
