//! DOM binding for browser hosts.
//!
//! [`DomSurface`] is an [`InputSurface`] over a DOM `EventTarget` (usually
//! the canvas). Each registered listener translates native events into
//! [`InputEvent`]s and queues them; the host drains the queue into the
//! controller once per animation frame:
//!
//! ```ignore
//! let mut surface = DomSurface::for_canvas(&canvas);
//! let mut rig = OrbitCameraController::new(camera, &mut surface, options)?;
//!
//! // every requestAnimationFrame:
//! let _ = rig.handle_events(surface.drain());
//! rig.frame(web_time::Instant::now(), dt);
//!
//! // teardown:
//! let camera = rig.destroy(&mut surface);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement,
    PointerEvent, TouchEvent, TouchList, WheelEvent,
};

use crate::input::{
    InputEvent, InputKind, InputSurface, ListenerId, MouseButton, Touches,
};

type Queue = Rc<RefCell<VecDeque<InputEvent>>>;

struct DomListener {
    id: ListenerId,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Input surface backed by a DOM event target.
pub struct DomSurface {
    target: EventTarget,
    queue: Queue,
    listeners: Vec<DomListener>,
    next_id: u64,
}

impl DomSurface {
    /// Surface over any event target.
    #[must_use]
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            queue: Rc::new(RefCell::new(VecDeque::new())),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Surface over a canvas element.
    #[must_use]
    pub fn for_canvas(canvas: &HtmlCanvasElement) -> Self {
        Self::new(canvas.clone().into())
    }

    /// Take every event queued since the last drain, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<InputEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Number of listeners still attached to the DOM.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn detach(&self, listener: &DomListener) {
        if let Err(err) = self.target.remove_event_listener_with_callback(
            listener.event,
            listener.closure.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to remove {} listener: {err:?}", listener.event);
        }
    }
}

impl InputSurface for DomSurface {
    fn add_listener(&mut self, kind: InputKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        let queue = Rc::clone(&self.queue);

        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Some(input) = translate(kind, &event) {
                queue.borrow_mut().push_back(input);
            }
            if suppresses_default(kind) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);

        // Non-passive so wheel/touch handlers may call preventDefault
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        if let Err(err) = self
            .target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.dom_name(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
        {
            log::warn!("failed to add {} listener: {err:?}", kind.dom_name());
        }

        self.listeners.push(DomListener {
            id,
            event: kind.dom_name(),
            closure,
        });
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        let Some(index) = self.listeners.iter().position(|l| l.id == id) else {
            return;
        };
        let listener = self.listeners.swap_remove(index);
        self.detach(&listener);
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        for listener in &self.listeners {
            self.detach(listener);
        }
    }
}

/// Context menus are always suppressed; wheel and touch would otherwise
/// scroll or zoom the page under the canvas.
const fn suppresses_default(kind: InputKind) -> bool {
    matches!(
        kind,
        InputKind::ContextMenu
            | InputKind::Wheel
            | InputKind::TouchStart
            | InputKind::TouchMove
    )
}

fn translate(kind: InputKind, event: &Event) -> Option<InputEvent> {
    match kind {
        InputKind::PointerDown | InputKind::PointerMove | InputKind::PointerUp => {
            translate_pointer(kind, event.dyn_ref::<PointerEvent>()?)
        }
        InputKind::Wheel => {
            let wheel = event.dyn_ref::<WheelEvent>()?;
            Some(InputEvent::Wheel {
                delta_y: wheel.delta_y() as f32,
            })
        }
        InputKind::TouchStart => Some(InputEvent::TouchStart {
            touches: touches_of(event)?,
        }),
        InputKind::TouchMove => Some(InputEvent::TouchMove {
            touches: touches_of(event)?,
        }),
        InputKind::TouchEnd => Some(InputEvent::TouchEnd {
            touches: touches_of(event)?,
        }),
        InputKind::ContextMenu => Some(InputEvent::ContextMenu),
    }
}

fn translate_pointer(kind: InputKind, pointer: &PointerEvent) -> Option<InputEvent> {
    // Touch pointers also arrive as touch events; count them once
    if pointer.pointer_type() == "touch" {
        return None;
    }
    let x = pointer.client_x() as f32;
    let y = pointer.client_y() as f32;
    match kind {
        InputKind::PointerDown => Some(InputEvent::PointerDown {
            x,
            y,
            button: MouseButton::from_dom_index(pointer.button())?,
        }),
        InputKind::PointerMove => Some(InputEvent::PointerMove { x, y }),
        InputKind::PointerUp => Some(InputEvent::PointerUp {
            button: MouseButton::from_dom_index(pointer.button())
                .unwrap_or(MouseButton::Left),
        }),
        _ => None,
    }
}

fn touches_of(event: &Event) -> Option<Touches> {
    let touch = event.dyn_ref::<TouchEvent>()?;
    Some(collect_touches(&touch.touches()))
}

fn collect_touches(list: &TouchList) -> Touches {
    let points: Vec<Vec2> = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect();
    Touches::from_points(&points)
}

/// Route `log` output to the browser console and panics to
/// `console.error`.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already initialised");
    }
}
