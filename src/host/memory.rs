//! In-memory host that records every call it receives.
//!
//! Useful for exercising listeners without a real event model: script the capabilities,
//! feed events to the normalizer, and inspect what was attached.

use super::{Binding, Capabilities, Host, HostError, Probe};
use crate::event::EventType;
use std::collections::HashSet;

/// A call received by [`MemoryHost`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Add(Binding),
    Remove(Binding),
    SetTouchAction(Option<String>),
}

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    capabilities: Capabilities,
    failing_probes: HashSet<Probe>,
    probe_count: usize,
    calls: Vec<HostCall>,
    attached: Vec<Binding>,
    touch_action: Option<String>,
}

impl MemoryHost {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    /// Make `query` fail instead of answering.
    pub fn with_failing_probe(mut self, query: Probe) -> Self {
        self.failing_probes.insert(query);
        self
    }

    pub fn with_touch_action(mut self, value: &str) -> Self {
        self.touch_action = Some(value.to_string());
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probe_count
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Listeners currently attached.
    pub fn attached(&self) -> &[Binding] {
        &self.attached
    }

    pub fn is_listening(&self, event: EventType) -> bool {
        self.attached.iter().any(|binding| binding.event == event)
    }

    pub fn add_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::Add(_)))
            .count()
    }

    pub fn remove_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::Remove(_)))
            .count()
    }
}

// DOM hosts identify a registration by type, scope and capture flag; `passive` is only a hint.
fn same_registration(a: &Binding, b: &Binding) -> bool {
    a.event == b.event && a.scope == b.scope && a.options.capture == b.options.capture
}

impl Host for MemoryHost {
    fn probe(&mut self, probe: Probe) -> std::result::Result<bool, HostError> {
        self.probe_count += 1;
        if self.failing_probes.contains(&probe) {
            return Err(HostError::new(format!("{probe:?} is not answerable")));
        }
        Ok(self.capabilities.supports(probe))
    }

    fn add_listener(&mut self, binding: &Binding) {
        self.calls.push(HostCall::Add(binding.clone()));
        if !self
            .attached
            .iter()
            .any(|existing| same_registration(existing, binding))
        {
            self.attached.push(binding.clone());
        }
    }

    fn remove_listener(&mut self, binding: &Binding) {
        self.calls.push(HostCall::Remove(binding.clone()));
        self.attached
            .retain(|existing| !same_registration(existing, binding));
    }

    fn touch_action(&self) -> Option<String> {
        self.touch_action.clone()
    }

    fn set_touch_action(&mut self, value: Option<&str>) {
        self.calls
            .push(HostCall::SetTouchAction(value.map(str::to_string)));
        self.touch_action = value.map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ListenerOptions, Scope};

    fn wheel(options: ListenerOptions) -> Binding {
        Binding::new(EventType::Wheel, Scope::Document, options)
    }

    #[test]
    fn duplicate_registration_is_attached_once() {
        let mut host = MemoryHost::default();
        host.add_listener(&wheel(ListenerOptions::passive(true)));
        host.add_listener(&wheel(ListenerOptions::passive(false)));

        assert_eq!(host.attached().len(), 1);
        assert_eq!(host.add_count(), 2);
    }

    #[test]
    fn removing_absent_listener_is_recorded_noop() {
        let mut host = MemoryHost::default();
        host.remove_listener(&wheel(ListenerOptions::default()));

        assert!(host.attached().is_empty());
        assert_eq!(host.remove_count(), 1);
    }

    #[test]
    fn capture_flag_distinguishes_registrations() {
        let mut host = MemoryHost::default();
        host.add_listener(&wheel(ListenerOptions::capture()));
        host.remove_listener(&wheel(ListenerOptions::default()));

        assert!(host.is_listening(EventType::Wheel));
    }

    #[test]
    fn touch_action_roundtrip() {
        let mut host = MemoryHost::default().with_touch_action("auto");
        host.set_touch_action(Some("none"));
        assert_eq!(host.touch_action().as_deref(), Some("none"));
        host.set_touch_action(None);
        assert_eq!(host.touch_action(), None);
    }
}
