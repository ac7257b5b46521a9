//! One-time capability detection.

use super::Host;

/// Capability queries a host must answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probe {
    WheelEvent,
    MouseWheelEvent,
    TouchEvent,
    /// Legacy pointer events are enabled
    PointerEvent,
    /// The device reports more than one touch point
    MultiTouch,
    KeyDownEvent,
    /// Wheel events in line mode need the extra line multiplier
    LineDeltaQuirk,
    PassiveListeners,
}

impl Probe {
    pub const ALL: [Probe; 8] = [
        Probe::WheelEvent,
        Probe::MouseWheelEvent,
        Probe::TouchEvent,
        Probe::PointerEvent,
        Probe::MultiTouch,
        Probe::KeyDownEvent,
        Probe::LineDeltaQuirk,
        Probe::PassiveListeners,
    ];
}

/// Run a single capability query, degrading any host error to `false`.
pub fn probe<H: Host + ?Sized>(host: &mut H, query: Probe) -> bool {
    match host.probe(query) {
        Ok(supported) => supported,
        Err(err) => {
            log::debug!("capability probe {query:?} treated as unsupported: {err}");
            false
        }
    }
}

/// Whether a user agent string belongs to an engine with the line-delta quirk.
pub fn has_line_delta_quirk(user_agent: &str) -> bool {
    user_agent.contains("Firefox")
}

/// Event families and listener options supported by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub wheel: bool,
    pub mouse_wheel: bool,
    pub touch: bool,
    pub pointer: bool,
    pub multi_touch: bool,
    pub key_down: bool,
    pub line_delta_quirk: bool,
    pub passive_listeners: bool,
}

impl Capabilities {
    /// Query every capability once.
    pub fn detect<H: Host + ?Sized>(host: &mut H) -> Self {
        let capabilities = Self {
            wheel: probe(host, Probe::WheelEvent),
            mouse_wheel: probe(host, Probe::MouseWheelEvent),
            touch: probe(host, Probe::TouchEvent),
            pointer: probe(host, Probe::PointerEvent),
            multi_touch: probe(host, Probe::MultiTouch),
            key_down: probe(host, Probe::KeyDownEvent),
            line_delta_quirk: probe(host, Probe::LineDeltaQuirk),
            passive_listeners: probe(host, Probe::PassiveListeners),
        };
        log::debug!("detected host capabilities: {capabilities:?}");
        capabilities
    }

    /// Everything supported, no engine quirk.
    pub fn all() -> Self {
        Self {
            wheel: true,
            mouse_wheel: true,
            touch: true,
            pointer: true,
            multi_touch: true,
            key_down: true,
            line_delta_quirk: false,
            passive_listeners: true,
        }
    }

    /// Legacy pointer events on a multi-touch device; binding them overrides touch-action.
    pub fn pointer_touch(&self) -> bool {
        self.pointer && self.multi_touch
    }

    pub fn supports(&self, query: Probe) -> bool {
        match query {
            Probe::WheelEvent => self.wheel,
            Probe::MouseWheelEvent => self.mouse_wheel,
            Probe::TouchEvent => self.touch,
            Probe::PointerEvent => self.pointer,
            Probe::MultiTouch => self.multi_touch,
            Probe::KeyDownEvent => self.key_down,
            Probe::LineDeltaQuirk => self.line_delta_quirk,
            Probe::PassiveListeners => self.passive_listeners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn detect_reads_every_probe() {
        let expected = Capabilities {
            wheel: true,
            touch: true,
            key_down: true,
            line_delta_quirk: true,
            ..Capabilities::default()
        };
        let mut host = MemoryHost::new(expected);

        assert_eq!(Capabilities::detect(&mut host), expected);
        assert_eq!(host.probe_count(), Probe::ALL.len());
    }

    #[test]
    fn failing_probe_is_unsupported() {
        let mut host = MemoryHost::new(Capabilities::all()).with_failing_probe(Probe::PassiveListeners);

        assert!(!probe(&mut host, Probe::PassiveListeners));
        assert!(probe(&mut host, Probe::WheelEvent));

        let detected = Capabilities::detect(&mut host);
        assert!(!detected.passive_listeners);
        assert!(detected.wheel);
    }

    #[test]
    fn pointer_touch_needs_both_flags() {
        let mut caps = Capabilities::default();
        caps.pointer = true;
        assert!(!caps.pointer_touch());
        caps.multi_touch = true;
        assert!(caps.pointer_touch());
    }

    #[test]
    fn quirk_detection_from_user_agent() {
        assert!(has_line_delta_quirk(
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
        ));
        assert!(!has_line_delta_quirk(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36"
        ));
    }

    #[test]
    fn supports_matches_fields() {
        let caps = Capabilities::all();
        for query in Probe::ALL {
            assert_eq!(caps.supports(query), query != Probe::LineDeltaQuirk);
        }
    }
}
