//! The input normalizer.
//!
//! Detects what the host supports once, binds the relevant event families lazily when
//! the first listener arrives, turns each raw event into a scroll delta, accumulates the
//! totals and fans the result out to every listener in registration order.
//!
//! ```
//! use scrollnorm::event::{DeltaMode, RawEvent, WheelEvent};
//! use scrollnorm::host::{Capabilities, MemoryHost};
//! use scrollnorm::{Config, Normalizer};
//!
//! let host = MemoryHost::new(Capabilities::all());
//! let mut normalizer = Normalizer::new(host, Config::default().with_mouse_multiplier(2.0));
//! normalizer.subscribe(|event| {
//!     assert_eq!(event.delta_y, 100.0);
//!     Ok(())
//! });
//!
//! let wheel = RawEvent::wheel(WheelEvent::new(0.0, -50.0, DeltaMode::Pixel));
//! normalizer.handle_event(&wheel).unwrap();
//! assert_eq!(normalizer.state().total_y, 100.0);
//! ```

pub mod listeners;
pub mod translate;

use crate::config::Config;
use crate::error::Result;
use crate::event::{EventType, Point, RawEvent, RawEventKind, ScrollEvent};
use crate::host::{Binding, Capabilities, Host, ListenerOptions, Scope};
use listeners::{ListenerId, ListenerResult, ListenerSet};
use translate::Delta;

/// Touch-action value forced while legacy pointer listeners are bound.
const POINTER_TOUCH_ACTION: &str = "none";

/// The scroll record shared by every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub total_x: f64,
    pub total_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
}

/// What [`Normalizer::handle_event`] did with a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// A delta was computed and every listener was called
    Dispatched,
    /// The touch baseline was updated; nothing to dispatch
    Tracked,
    /// A delta was computed but the family's rule suppressed dispatch
    Skipped,
    /// The family is not bound, or the event carries no usable data
    Ignored,
}

/// Input normalizer over a host binding layer.
pub struct Normalizer<H: Host> {
    host: H,
    config: Config,
    capabilities: Capabilities,
    plan: Vec<Binding>,
    listeners: ListenerSet,
    state: ScrollState,
    touch_start: Option<Point>,
    saved_touch_action: Option<Option<String>>,
    active: bool,
}

impl<H: Host> Normalizer<H> {
    /// Probe the host and prepare the binding plan. Nothing is bound until the first
    /// listener subscribes.
    pub fn new(mut host: H, config: Config) -> Self {
        let config = config.resolved();
        let capabilities = Capabilities::detect(&mut host);
        let plan = binding_plan(&capabilities, &config);

        Self {
            host,
            config,
            capabilities,
            plan,
            listeners: ListenerSet::new(),
            state: ScrollState::default(),
            touch_start: None,
            saved_touch_action: None,
            active: false,
        }
    }

    pub fn with_defaults(host: H) -> Self {
        Self::new(host, Config::default())
    }

    /// Register a listener, binding host events if the normalizer is not active yet.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ScrollEvent<'_>) -> ListenerResult + 'static,
    {
        if !self.active {
            self.bind();
        }
        self.listeners.push(Box::new(listener))
    }

    /// Remove one registration. Unbinds everything once no listener is left.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id);
        self.unbind_if_idle();
        removed
    }

    /// Remove the listener at `index` in registration order.
    pub fn unsubscribe_at(&mut self, index: usize) -> bool {
        let removed = self.listeners.remove_at(index);
        self.unbind_if_idle();
        removed
    }

    /// Drop every listener and unbind unconditionally. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.unbind();
    }

    /// Translate one raw event delivered by the host and dispatch it.
    ///
    /// A listener error stops the fan-out and is returned to the host; the totals have
    /// already been updated at that point.
    pub fn handle_event(&mut self, event: &RawEvent) -> Result<Handled> {
        if !self.active || !self.is_bound(event.event_type()) {
            return Ok(Handled::Ignored);
        }

        match &event.kind {
            RawEventKind::Wheel(wheel) => {
                let delta = translate::wheel_delta(
                    wheel,
                    &self.config,
                    self.capabilities.line_delta_quirk,
                );
                self.set_delta(delta);
                self.notify(event)
            }
            RawEventKind::MouseWheel(wheel) => {
                self.set_delta(translate::mouse_wheel_delta(wheel));
                self.notify(event)
            }
            RawEventKind::TouchStart(touches) => match touches.primary() {
                Some(point) => Ok(self.track(point)),
                None => Ok(Handled::Ignored),
            },
            RawEventKind::PointerDown(point) => Ok(self.track(*point)),
            RawEventKind::TouchMove(touches) => {
                if self.config.prevent_touch {
                    event.prevent_default();
                }
                match touches.primary() {
                    Some(point) => self.move_to(point, event),
                    None => Ok(Handled::Ignored),
                }
            }
            RawEventKind::PointerMove(point) => {
                if self.config.prevent_touch {
                    event.prevent_default();
                }
                self.move_to(*point, event)
            }
            RawEventKind::KeyDown { key_code } => {
                let delta = translate::key_delta(*key_code, self.config.key_step);
                self.set_delta(delta);
                if translate::key_dispatches(delta) {
                    self.notify(event)
                } else {
                    Ok(Handled::Skipped)
                }
            }
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Bindings applied while active, in binding order.
    pub fn bindings(&self) -> &[Binding] {
        &self.plan
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    fn is_bound(&self, event: EventType) -> bool {
        self.plan.iter().any(|binding| binding.event == event)
    }

    fn set_delta(&mut self, delta: Delta) {
        self.state.delta_x = delta.x;
        self.state.delta_y = delta.y;
    }

    fn track(&mut self, point: Point) -> Handled {
        self.touch_start = Some(point);
        Handled::Tracked
    }

    fn move_to(&mut self, point: Point, source: &RawEvent) -> Result<Handled> {
        let Some(baseline) = self.touch_start.replace(point) else {
            // No start seen yet: this move becomes the baseline.
            return Ok(Handled::Tracked);
        };

        let delta = translate::touch_delta(baseline, point, self.config.touch_multiplier);
        self.set_delta(delta);
        self.notify(source)
    }

    fn notify(&mut self, source: &RawEvent) -> Result<Handled> {
        self.state.total_x += self.state.delta_x;
        self.state.total_y += self.state.delta_y;

        let event = ScrollEvent {
            total_x: self.state.total_x,
            total_y: self.state.total_y,
            delta_x: self.state.delta_x,
            delta_y: self.state.delta_y,
            source,
        };

        if let Err(err) = self.listeners.notify(&event) {
            log::warn!("scroll fan-out aborted: {err}");
            return Err(err);
        }
        Ok(Handled::Dispatched)
    }

    fn bind(&mut self) {
        let Self {
            host,
            plan,
            saved_touch_action,
            ..
        } = self;

        for binding in plan.iter() {
            if binding.event == EventType::PointerDown && saved_touch_action.is_none() {
                *saved_touch_action = Some(host.touch_action());
                host.set_touch_action(Some(POINTER_TOUCH_ACTION));
            }
            host.add_listener(binding);
        }

        log::debug!("bound {} host listeners", plan.len());
        self.active = true;
    }

    fn unbind(&mut self) {
        let Self {
            host,
            plan,
            saved_touch_action,
            ..
        } = self;

        for binding in plan.iter() {
            if binding.event == EventType::PointerDown {
                if let Some(previous) = saved_touch_action.take() {
                    host.set_touch_action(previous.as_deref());
                }
            }
            host.remove_listener(binding);
        }

        log::debug!("unbound {} host listeners", plan.len());
        self.touch_start = None;
        self.active = false;
    }

    fn unbind_if_idle(&mut self) {
        if self.active && self.listeners.is_empty() {
            self.unbind();
        }
    }
}

impl<H: Host + std::fmt::Debug> std::fmt::Debug for Normalizer<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("capabilities", &self.capabilities)
            .field("listeners", &self.listeners)
            .field("state", &self.state)
            .field("active", &self.active)
            .finish()
    }
}

/// Listener registrations for the given capabilities, in binding order.
pub fn binding_plan(capabilities: &Capabilities, config: &Config) -> Vec<Binding> {
    let target = Scope::Target(config.target.clone());
    let passive = ListenerOptions::passive(capabilities.passive_listeners);
    let mut plan = Vec::new();

    if capabilities.wheel {
        plan.push(Binding::new(EventType::Wheel, target.clone(), passive));
    }
    if capabilities.mouse_wheel {
        plan.push(Binding::new(EventType::MouseWheel, target.clone(), passive));
    }
    if capabilities.touch {
        let move_options = if config.prevent_touch {
            ListenerOptions::passive(false)
        } else {
            passive
        };
        plan.push(Binding::new(EventType::TouchStart, target.clone(), passive));
        plan.push(Binding::new(EventType::TouchMove, target.clone(), move_options));
    }
    if capabilities.pointer_touch() {
        plan.push(Binding::new(EventType::PointerDown, target.clone(), ListenerOptions::capture()));
        plan.push(Binding::new(EventType::PointerMove, target, ListenerOptions::capture()));
    }
    if capabilities.key_down {
        plan.push(Binding::new(EventType::KeyDown, Scope::Document, passive));
    }

    plan
}
