//! Raw host events and the normalized scroll event handed to listeners.

use std::cell::Cell;

/// DOM key code for the left arrow key.
pub const KEY_LEFT: u32 = 37;
/// DOM key code for the up arrow key.
pub const KEY_UP: u32 = 38;
/// DOM key code for the right arrow key.
pub const KEY_RIGHT: u32 = 39;
/// DOM key code for the down arrow key.
pub const KEY_DOWN: u32 = 40;

/// Unit of a wheel event's `delta_x`/`delta_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    /// Reported by notched wheel mice on some engines
    Line,
    Page,
}

/// A page coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Standard `wheel` event payload.
///
/// `wheel_delta_x`/`wheel_delta_y` are the prefixed fields some engines add next to the
/// standard ones; they already point in scroll direction while the standard deltas are
/// inverted relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: DeltaMode,
    pub wheel_delta_x: Option<f64>,
    pub wheel_delta_y: Option<f64>,
}

impl WheelEvent {
    /// A wheel event carrying only the standard deltas.
    pub fn new(delta_x: f64, delta_y: f64, delta_mode: DeltaMode) -> Self {
        Self {
            delta_x,
            delta_y,
            delta_mode,
            wheel_delta_x: None,
            wheel_delta_y: None,
        }
    }

    pub fn with_wheel_deltas(mut self, wheel_delta_x: f64, wheel_delta_y: f64) -> Self {
        self.wheel_delta_x = Some(wheel_delta_x);
        self.wheel_delta_y = Some(wheel_delta_y);
        self
    }
}

/// Legacy `mousewheel` event payload.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseWheelEvent {
    pub wheel_delta: f64,
    pub wheel_delta_x: Option<f64>,
    pub wheel_delta_y: Option<f64>,
}

/// Touches currently on the event target, primary touch first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchList {
    pub target_touches: Vec<Point>,
}

impl TouchList {
    pub fn single(point: Point) -> Self {
        Self {
            target_touches: vec![point],
        }
    }

    /// The only touch point the normalizer tracks.
    pub fn primary(&self) -> Option<Point> {
        self.target_touches.first().copied()
    }
}

/// Device specific part of a raw event.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEventKind {
    Wheel(WheelEvent),
    MouseWheel(MouseWheelEvent),
    TouchStart(TouchList),
    TouchMove(TouchList),
    /// Legacy pointer-down; the event itself carries the coordinates
    PointerDown(Point),
    PointerMove(Point),
    KeyDown { key_code: u32 },
}

/// Host event types the normalizer can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Wheel,
    MouseWheel,
    TouchStart,
    TouchMove,
    PointerDown,
    PointerMove,
    KeyDown,
}

impl EventType {
    /// Event name as registered with a DOM-like host.
    pub fn name(self) -> &'static str {
        match self {
            EventType::Wheel => "wheel",
            EventType::MouseWheel => "mousewheel",
            EventType::TouchStart => "touchstart",
            EventType::TouchMove => "touchmove",
            EventType::PointerDown => "MSPointerDown",
            EventType::PointerMove => "MSPointerMove",
            EventType::KeyDown => "keydown",
        }
    }
}

impl RawEventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            RawEventKind::Wheel(_) => EventType::Wheel,
            RawEventKind::MouseWheel(_) => EventType::MouseWheel,
            RawEventKind::TouchStart(_) => EventType::TouchStart,
            RawEventKind::TouchMove(_) => EventType::TouchMove,
            RawEventKind::PointerDown(_) => EventType::PointerDown,
            RawEventKind::PointerMove(_) => EventType::PointerMove,
            RawEventKind::KeyDown { .. } => EventType::KeyDown,
        }
    }
}

/// A raw input event as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub kind: RawEventKind,
    default_prevented: Cell<bool>,
}

impl RawEvent {
    pub fn new(kind: RawEventKind) -> Self {
        Self {
            kind,
            default_prevented: Cell::new(false),
        }
    }

    pub fn wheel(event: WheelEvent) -> Self {
        Self::new(RawEventKind::Wheel(event))
    }

    pub fn mouse_wheel(event: MouseWheelEvent) -> Self {
        Self::new(RawEventKind::MouseWheel(event))
    }

    pub fn touch_start(x: f64, y: f64) -> Self {
        Self::new(RawEventKind::TouchStart(TouchList::single(Point::new(x, y))))
    }

    pub fn touch_move(x: f64, y: f64) -> Self {
        Self::new(RawEventKind::TouchMove(TouchList::single(Point::new(x, y))))
    }

    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::new(RawEventKind::PointerDown(Point::new(x, y)))
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::new(RawEventKind::PointerMove(Point::new(x, y)))
    }

    pub fn key_down(key_code: u32) -> Self {
        Self::new(RawEventKind::KeyDown { key_code })
    }

    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    /// Ask the host to skip its default action for this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Normalized scroll event delivered to every listener.
///
/// Borrowed for the duration of a single listener call only. Copy the numeric fields
/// out if they are needed after the listener returns.
#[derive(Debug, Clone, Copy)]
pub struct ScrollEvent<'a> {
    /// Sum of every horizontal delta dispatched so far, including this one
    pub total_x: f64,
    /// Sum of every vertical delta dispatched so far, including this one
    pub total_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    /// The host event this delta was computed from
    pub source: &'a RawEvent,
}
