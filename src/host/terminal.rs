//! Terminal host backed by crossterm.
//!
//! A terminal has no wheel delta, touch list or listener registry, so this host emulates
//! them: every scroll notch becomes a line-mode wheel event, a left-button drag acts as a
//! single-finger legacy pointer, and the arrow keys map to their DOM key codes. Events are
//! only translated for families the normalizer currently has bound.

use super::{Binding, Capabilities, Host, HostError, Probe};
use crate::event::{
    DeltaMode, EventType, RawEvent, WheelEvent, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP,
};
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

/// Lines reported for a single scroll notch.
const DEFAULT_LINES_PER_NOTCH: f64 = 3.0;
/// Approximate pixel size of a terminal cell, used to turn cells into page coordinates.
const DEFAULT_CELL_SIZE: (f64, f64) = (8.0, 16.0);

#[derive(Debug, Clone)]
pub struct TerminalHost {
    attached: Vec<Binding>,
    touch_action: Option<String>,
    lines_per_notch: f64,
    cell_size: (f64, f64),
}

impl TerminalHost {
    pub fn new() -> Self {
        Self {
            attached: Vec::new(),
            touch_action: None,
            lines_per_notch: DEFAULT_LINES_PER_NOTCH,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }

    pub fn with_lines_per_notch(mut self, lines: f64) -> Self {
        self.lines_per_notch = lines;
        self
    }

    pub fn with_cell_size(mut self, width: f64, height: f64) -> Self {
        self.cell_size = (width, height);
        self
    }

    /// The capabilities this host answers with.
    pub fn capabilities() -> Capabilities {
        Capabilities {
            wheel: true,
            mouse_wheel: false,
            touch: false,
            pointer: true,
            multi_touch: true,
            key_down: true,
            line_delta_quirk: false,
            passive_listeners: true,
        }
    }

    pub fn is_attached(&self, event: EventType) -> bool {
        self.attached.iter().any(|binding| binding.event == event)
    }

    /// Attached event types in registration order.
    pub fn attached_events(&self) -> Vec<EventType> {
        self.attached.iter().map(|binding| binding.event).collect()
    }

    /// Convert a terminal event into a raw host event, if a listener wants it.
    pub fn translate(&self, event: &Event) -> Option<RawEvent> {
        let raw = match event {
            Event::Mouse(mouse) => self.translate_mouse(mouse)?,
            Event::Key(key) => translate_key(key)?,
            _ => return None,
        };

        if self.is_attached(raw.event_type()) {
            Some(raw)
        } else {
            None
        }
    }

    fn translate_mouse(&self, mouse: &MouseEvent) -> Option<RawEvent> {
        let lines = self.lines_per_notch;
        let page_x = f64::from(mouse.column) * self.cell_size.0;
        let page_y = f64::from(mouse.row) * self.cell_size.1;

        let raw = match mouse.kind {
            MouseEventKind::ScrollDown => RawEvent::wheel(WheelEvent::new(0.0, lines, DeltaMode::Line)),
            MouseEventKind::ScrollUp => RawEvent::wheel(WheelEvent::new(0.0, -lines, DeltaMode::Line)),
            MouseEventKind::ScrollRight => RawEvent::wheel(WheelEvent::new(lines, 0.0, DeltaMode::Line)),
            MouseEventKind::ScrollLeft => RawEvent::wheel(WheelEvent::new(-lines, 0.0, DeltaMode::Line)),
            MouseEventKind::Down(MouseButton::Left) => RawEvent::pointer_down(page_x, page_y),
            MouseEventKind::Drag(MouseButton::Left) => RawEvent::pointer_move(page_x, page_y),
            _ => return None,
        };
        Some(raw)
    }
}

fn translate_key(key: &KeyEvent) -> Option<RawEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let key_code = match key.code {
        KeyCode::Left => KEY_LEFT,
        KeyCode::Up => KEY_UP,
        KeyCode::Right => KEY_RIGHT,
        KeyCode::Down => KEY_DOWN,
        _ => return None,
    };
    Some(RawEvent::key_down(key_code))
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for TerminalHost {
    fn probe(&mut self, probe: Probe) -> std::result::Result<bool, HostError> {
        Ok(Self::capabilities().supports(probe))
    }

    fn add_listener(&mut self, binding: &Binding) {
        log::trace!("terminal host: attach {}", binding.event.name());
        if !self.attached.contains(binding) {
            self.attached.push(binding.clone());
        }
    }

    fn remove_listener(&mut self, binding: &Binding) {
        log::trace!("terminal host: detach {}", binding.event.name());
        self.attached.retain(|existing| existing.event != binding.event);
    }

    fn touch_action(&self) -> Option<String> {
        self.touch_action.clone()
    }

    fn set_touch_action(&mut self, value: Option<&str>) {
        self.touch_action = value.map(str::to_string);
    }
}
