use glam::Vec2;

/// Ephemeral state of the gesture in progress.
///
/// Reset at the start of every drag or pinch; nothing here survives a
/// gesture that has ended.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    is_dragging: bool,
    last_pos: Vec2,
    last_pinch_distance: Option<f32>,
}

impl GestureState {
    /// Create a new gesture state with no active drag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a single-pointer rotate gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Pointer position recorded by the last drag update.
    #[must_use]
    pub fn last_pos(&self) -> Vec2 {
        self.last_pos
    }

    /// Finger spread recorded by the last pinch update, if pinching.
    #[must_use]
    pub fn last_pinch_distance(&self) -> Option<f32> {
        self.last_pinch_distance
    }

    /// Start a rotate drag at `pos`.
    pub fn begin_drag(&mut self, pos: Vec2) {
        self.is_dragging = true;
        self.last_pos = pos;
    }

    /// Move the drag to `pos` and return the delta since the last update,
    /// or `None` when no drag is active.
    pub fn drag_to(&mut self, pos: Vec2) -> Option<Vec2> {
        if !self.is_dragging {
            return None;
        }
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        Some(delta)
    }

    /// Record the finger spread a pinch is measured against.
    pub fn begin_pinch(&mut self, distance: f32) {
        self.last_pinch_distance = Some(distance);
    }

    /// Update the spread and return `last - new` (positive when the
    /// fingers close), or `None` when no pinch baseline exists.
    pub fn pinch_to(&mut self, distance: f32) -> Option<f32> {
        let last = self.last_pinch_distance.replace(distance)?;
        Some(last - distance)
    }

    /// End every gesture.
    pub fn end(&mut self) {
        self.is_dragging = false;
        self.last_pinch_distance = None;
    }

    /// Drop the pinch baseline but keep any drag.
    pub fn end_pinch(&mut self) {
        self.last_pinch_distance = None;
    }
}
