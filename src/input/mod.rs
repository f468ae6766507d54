//! Input handling: event types, gesture state, and the listener
//! registration contract between a controller and its host.

/// Platform-agnostic input events.
pub mod event;
/// Drag and pinch session state.
pub mod gesture;
/// Listener registration and teardown.
pub mod listeners;

pub use event::{InputEvent, InputKind, MouseButton, Touches};
pub use gesture::GestureState;
pub use listeners::{InputSurface, ListenerId, NullSurface, Subscriptions};
