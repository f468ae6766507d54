// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Damped orbit camera controller.
//!
//! An orbit rig keeps a camera on a sphere around a target point and lets
//! the user rotate it by dragging (mouse, pen or one finger) and zoom it
//! with the wheel or a two-finger pinch. Motion is smoothed with
//! exponential damping, and the rig can fly to a pose with an eased tween.
//!
//! # Key entry points
//!
//! - [`camera::OrbitCameraController`] - the rig itself
//! - [`camera::CameraHandle`] - what the rig drives; [`camera::Camera`] is a
//!   ready-made implementation
//! - [`input::InputEvent`] - platform-agnostic input fed to the rig
//! - [`input::InputSurface`] - where the rig's listeners are registered
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Frame flow
//!
//! Input handlers only write the rig's *target* yaw/pitch/distance. Once
//! per frame the host calls
//! [`update`](camera::OrbitCameraController::update), which closes a fixed
//! fraction of the gap between the current and target values and writes
//! the resulting position onto the camera. Tweens write target values too,
//! so the damping loop glides after each tween sample.

pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use camera::{Camera, CameraHandle, OrbitCameraController};
pub use error::OrbitError;
pub use input::{InputEvent, MouseButton, Touches};
pub use options::{OrbitOptions, Options};
