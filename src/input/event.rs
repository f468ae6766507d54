use glam::Vec2;

/// Platform-agnostic input events.
///
/// Hosts translate their native pointer/wheel/touch events into these and
/// forward them to
/// [`OrbitCameraController::handle_event`](crate::camera::OrbitCameraController::handle_event).
/// Coordinates are client pixels.
///
/// # Example
///
/// ```ignore
/// controller.handle_event(InputEvent::PointerMove { x: 100.0, y: 200.0 });
/// controller.handle_event(InputEvent::Wheel { delta_y: 120.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button or pen/pointer pressed.
    PointerDown {
        /// Horizontal client position.
        x: f32,
        /// Vertical client position.
        y: f32,
        /// Which button went down.
        button: MouseButton,
    },
    /// Pointer moved to an absolute client position.
    PointerMove {
        /// Horizontal client position.
        x: f32,
        /// Vertical client position.
        y: f32,
    },
    /// Mouse button released.
    PointerUp {
        /// Which button was released.
        button: MouseButton,
    },
    /// Scroll wheel. Positive `delta_y` scrolls down (zooms out).
    Wheel {
        /// Vertical scroll amount; only its sign is used.
        delta_y: f32,
    },
    /// One or more fingers touched down; carries all active touches.
    TouchStart {
        /// Every finger currently on the surface.
        touches: Touches,
    },
    /// Fingers moved; carries all active touches.
    TouchMove {
        /// Every finger currently on the surface.
        touches: Touches,
    },
    /// Fingers lifted; carries the touches that remain.
    TouchEnd {
        /// Fingers still on the surface after the lift.
        touches: Touches,
    },
    /// The platform wants to open a context menu (usually right click).
    ContextMenu,
}

impl InputEvent {
    /// Listener kind this event is delivered through.
    #[must_use]
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::PointerDown { .. } => InputKind::PointerDown,
            Self::PointerMove { .. } => InputKind::PointerMove,
            Self::PointerUp { .. } => InputKind::PointerUp,
            Self::Wheel { .. } => InputKind::Wheel,
            Self::TouchStart { .. } => InputKind::TouchStart,
            Self::TouchMove { .. } => InputKind::TouchMove,
            Self::TouchEnd { .. } => InputKind::TouchEnd,
            Self::ContextMenu => InputKind::ContextMenu,
        }
    }

    /// Whether every coordinate and delta carried by the event is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y } => {
                x.is_finite() && y.is_finite()
            }
            Self::Wheel { delta_y } => delta_y.is_finite(),
            Self::TouchStart { touches }
            | Self::TouchMove { touches }
            | Self::TouchEnd { touches } => touches.is_finite(),
            Self::PointerUp { .. } | Self::ContextMenu => true,
        }
    }
}

/// The kinds of native listener an orbit rig registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Pointer pressed.
    PointerDown,
    /// Pointer moved.
    PointerMove,
    /// Pointer released.
    PointerUp,
    /// Scroll wheel.
    Wheel,
    /// Touch began.
    TouchStart,
    /// Touch moved.
    TouchMove,
    /// Touch ended.
    TouchEnd,
    /// Context menu request.
    ContextMenu,
}

impl InputKind {
    /// Every kind, in registration order.
    pub const ALL: [InputKind; 8] = [
        InputKind::PointerDown,
        InputKind::PointerMove,
        InputKind::PointerUp,
        InputKind::Wheel,
        InputKind::TouchStart,
        InputKind::TouchMove,
        InputKind::TouchEnd,
        InputKind::ContextMenu,
    ];

    /// DOM event type name.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::Wheel => "wheel",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::ContextMenu => "contextmenu",
        }
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Whether dragging with this button rotates the camera.
    #[must_use]
    pub const fn rotates(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub const fn from_dom_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Snapshot of the fingers on a touch surface.
///
/// Only the first two positions are kept; the count is exact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Touches {
    count: usize,
    points: [Vec2; 2],
}

impl Touches {
    /// No fingers down.
    pub const NONE: Touches = Touches {
        count: 0,
        points: [Vec2::ZERO; 2],
    };

    /// Build from every active touch position.
    #[must_use]
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut kept = [Vec2::ZERO; 2];
        for (slot, point) in kept.iter_mut().zip(points) {
            *slot = *point;
        }
        Self {
            count: points.len(),
            points: kept,
        }
    }

    /// A single finger.
    #[must_use]
    pub fn one(point: Vec2) -> Self {
        Self::from_points(&[point])
    }

    /// Exactly two fingers.
    #[must_use]
    pub fn two(a: Vec2, b: Vec2) -> Self {
        Self::from_points(&[a, b])
    }

    /// Number of fingers down.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no fingers are down.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Position of the first finger, if any.
    #[must_use]
    pub fn first(&self) -> Option<Vec2> {
        (self.count >= 1).then_some(self.points[0])
    }

    /// Pixel distance between the first two fingers, if two are down.
    #[must_use]
    pub fn pinch_distance(&self) -> Option<f32> {
        (self.count >= 2).then(|| self.points[0].distance(self.points[1]))
    }

    fn is_finite(&self) -> bool {
        self.points
            .iter()
            .take(self.count)
            .all(|p| p.is_finite())
    }
}
