//! Native listener registration and teardown.
//!
//! A controller registers one listener per [`InputKind`] when it is built
//! and must remove exactly those listeners when it is destroyed. The
//! [`Subscriptions`] list is the record of what was registered.

use super::event::InputKind;

/// Opaque token for one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Where native input listeners are attached: a canvas, a window, an
/// engine's input manager.
pub trait InputSurface {
    /// Register a listener for `kind` and return its token.
    fn add_listener(&mut self, kind: InputKind) -> ListenerId;

    /// Remove the listener registered under `id`.
    fn remove_listener(&mut self, id: ListenerId);
}

/// Surface for hosts that forward events by hand. Hands out tokens and
/// keeps nothing.
#[derive(Debug, Default)]
pub struct NullSurface {
    next_id: u64,
}

impl InputSurface for NullSurface {
    fn add_listener(&mut self, _kind: InputKind) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    fn remove_listener(&mut self, _id: ListenerId) {}
}

/// The `(kind, token)` pairs a controller registered.
#[derive(Debug, Default)]
pub struct Subscriptions {
    entries: Vec<(InputKind, ListenerId)>,
}

impl Subscriptions {
    /// Register a listener for every [`InputKind`] on `surface`.
    pub fn register_all<S: InputSurface + ?Sized>(surface: &mut S) -> Self {
        let entries = InputKind::ALL
            .iter()
            .map(|&kind| (kind, surface.add_listener(kind)))
            .collect();
        Self { entries }
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kinds currently registered.
    pub fn kinds(&self) -> impl Iterator<Item = InputKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    /// Remove every registration from `surface`. Returns how many were
    /// removed; a second call removes nothing.
    pub fn release<S: InputSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let count = self.entries.len();
        for (_, id) in self.entries.drain(..) {
            surface.remove_listener(id);
        }
        count
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            log::warn!(
                "{} input listeners dropped without being removed",
                self.entries.len()
            );
        }
    }
}
