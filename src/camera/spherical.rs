//! Spherical coordinates around an orbit center.
//!
//! Angles are in degrees everywhere in the public API; the conversion to
//! radians happens here and nowhere else.

use glam::Vec3;

/// Pitch limit in degrees. Keeps the camera off the poles so `look_at`
/// never sees a view direction parallel to world up.
pub const PITCH_LIMIT: f32 = 89.0;

/// Degrees to radians.
#[inline]
#[must_use]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Clamp a pitch angle into `[-PITCH_LIMIT, PITCH_LIMIT]`.
#[inline]
#[must_use]
pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Offset from the orbit center for the given yaw/pitch (degrees) and
/// distance.
///
/// `yaw = 0, pitch = 0` places the camera on +Z; positive yaw swings it
/// toward +X and positive pitch lifts it toward +Y.
#[must_use]
pub fn spherical_to_offset(yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    let yaw_rad = deg_to_rad(yaw);
    let pitch_rad = deg_to_rad(pitch);
    let (sin_yaw, cos_yaw) = yaw_rad.sin_cos();
    let (sin_pitch, cos_pitch) = pitch_rad.sin_cos();
    Vec3::new(
        distance * cos_pitch * sin_yaw,
        distance * sin_pitch,
        distance * cos_pitch * cos_yaw,
    )
}
