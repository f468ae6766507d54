use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit Camera", inline)]
#[serde(default)]
/// Orbit distance bounds, input sensitivities and home orientation.
///
/// `initial_yaw`, `initial_pitch` and `distance` double as the "home"
/// values that [`OrbitCameraController::reset`] returns to.
///
/// [`OrbitCameraController::reset`]: crate::camera::controller::OrbitCameraController::reset
pub struct OrbitOptions {
    /// Starting distance from the orbit center.
    #[schemars(title = "Distance", range(min = 0.1, max = 1000.0), extend("step" = 0.1))]
    pub distance: f32,
    /// Closest allowed distance.
    #[schemars(title = "Min Distance", range(min = 0.1, max = 1000.0), extend("step" = 0.1))]
    pub min_distance: f32,
    /// Farthest allowed distance.
    #[schemars(title = "Max Distance", range(min = 0.1, max = 1000.0), extend("step" = 0.1))]
    pub max_distance: f32,
    /// Degrees of rotation per pixel of drag.
    #[schemars(title = "Sensitivity", range(min = 0.01, max = 2.0), extend("step" = 0.01))]
    pub sensitivity: f32,
    /// Fraction of the remaining gap closed per update, in `(0, 1]`.
    #[schemars(title = "Damping", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping: f32,
    /// Distance change per wheel notch.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 10.0), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Distance change per pixel of two-finger pinch.
    #[schemars(skip)]
    pub pinch_scale: f32,
    /// Home yaw in degrees.
    #[schemars(skip)]
    pub initial_yaw: f32,
    /// Home pitch in degrees (clamped to ±89).
    #[schemars(skip)]
    pub initial_pitch: f32,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            distance: 10.0,
            min_distance: 2.0,
            max_distance: 20.0,
            sensitivity: 0.3,
            damping: 0.1,
            zoom_speed: 0.5,
            pinch_scale: 0.05,
            initial_yaw: 0.0,
            initial_pitch: 0.0,
        }
    }
}

impl OrbitOptions {
    /// Check the values the controller relies on for its clamping and
    /// convergence guarantees.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let fields = [
            ("distance", self.distance),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("sensitivity", self.sensitivity),
            ("damping", self.damping),
            ("zoom_speed", self.zoom_speed),
            ("pinch_scale", self.pinch_scale),
            ("initial_yaw", self.initial_yaw),
            ("initial_pitch", self.initial_pitch),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OrbitError::InvalidOptions(format!(
                "{name} must be finite"
            )));
        }
        if self.min_distance <= 0.0 {
            return Err(OrbitError::InvalidOptions(format!(
                "min_distance must be positive, got {}",
                self.min_distance
            )));
        }
        if self.min_distance > self.max_distance {
            return Err(OrbitError::InvalidOptions(format!(
                "min_distance {} exceeds max_distance {}",
                self.min_distance, self.max_distance
            )));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(OrbitError::InvalidOptions(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        for (name, value) in [
            ("sensitivity", self.sensitivity),
            ("zoom_speed", self.zoom_speed),
            ("pinch_scale", self.pinch_scale),
        ] {
            if value < 0.0 {
                return Err(OrbitError::InvalidOptions(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Clamp a distance into `[min_distance, max_distance]`.
    #[must_use]
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }
}
