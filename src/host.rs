//! Host environment boundary.
//!
//! A [`Host`] is the binding layer between the normalizer and a DOM-like event model. It
//! answers capability queries, attaches and detaches event listeners, and owns the
//! touch-action style the legacy pointer path overrides. The host then feeds raw events
//! of the families it attached to [`Normalizer::handle_event`](crate::Normalizer::handle_event).

pub mod capabilities;
pub mod memory;
pub mod terminal;

use crate::config::AttachTarget;
use crate::event::EventType;
use thiserror::Error;

pub use capabilities::{probe, Capabilities, Probe};
pub use memory::MemoryHost;
pub use terminal::TerminalHost;

/// Failure reported by a host while answering a capability query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("host probe failed: {0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The configured attach target
    Target(AttachTarget),
    /// The global document; keyboard listeners always live here
    Document,
}

/// Registration hints passed along with a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ListenerOptions {
    /// The handler never suppresses the default action
    pub passive: bool,
    /// Register for the capture phase
    pub capture: bool,
}

impl ListenerOptions {
    pub const fn passive(passive: bool) -> Self {
        Self {
            passive,
            capture: false,
        }
    }

    pub const fn capture() -> Self {
        Self {
            passive: false,
            capture: true,
        }
    }
}

/// One listener registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub event: EventType,
    pub scope: Scope,
    pub options: ListenerOptions,
}

impl Binding {
    pub fn new(event: EventType, scope: Scope, options: ListenerOptions) -> Self {
        Self {
            event,
            scope,
            options,
        }
    }
}

/// Binding layer between the normalizer and the host event model.
pub trait Host {
    /// Answer one capability query. Errors are treated as "not supported".
    fn probe(&mut self, probe: Probe) -> std::result::Result<bool, HostError>;

    /// Start delivering events described by `binding`.
    fn add_listener(&mut self, binding: &Binding);

    /// Stop delivering events described by `binding`. Removing an absent listener is a no-op.
    fn remove_listener(&mut self, binding: &Binding);

    /// Current touch-action style of the document body, `None` when unset.
    fn touch_action(&self) -> Option<String>;

    fn set_touch_action(&mut self, value: Option<&str>);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn probe(&mut self, probe: Probe) -> std::result::Result<bool, HostError> {
        (**self).probe(probe)
    }

    fn add_listener(&mut self, binding: &Binding) {
        (**self).add_listener(binding)
    }

    fn remove_listener(&mut self, binding: &Binding) {
        (**self).remove_listener(binding)
    }

    fn touch_action(&self) -> Option<String> {
        (**self).touch_action()
    }

    fn set_touch_action(&mut self, value: Option<&str>) {
        (**self).set_touch_action(value)
    }
}
