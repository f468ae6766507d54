//! Shared utilities: easing curves for tweens and render-loop timing.

pub mod easing;
pub mod frame_timing;
