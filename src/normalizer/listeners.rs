//! Ordered listener registry.

use crate::error::{ListenerError, Result, ScrollnormError};
use crate::event::ScrollEvent;
use std::fmt;

/// Outcome of a single listener call.
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// A registered scroll listener.
pub type Listener = Box<dyn FnMut(&ScrollEvent<'_>) -> ListenerResult>;

/// Handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Listeners in registration order. Registering the same closure twice yields two entries.
#[derive(Default)]
pub struct ListenerSet {
    entries: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Remove the entry registered under `id`; `false` if it is not present.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the entry at `index`; `false` if out of range.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.entries.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Call every listener in order; the first failure stops the fan-out.
    pub fn notify(&mut self, event: &ScrollEvent<'_>) -> Result<()> {
        for (index, (_, listener)) in self.entries.iter_mut().enumerate() {
            listener(event).map_err(|source| ScrollnormError::listener(index, source))?;
        }
        Ok(())
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RawEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Listener {
        let log = Rc::clone(log);
        Box::new(move |_| {
            log.borrow_mut().push(name);
            Ok(())
        })
    }

    fn scroll(source: &RawEvent) -> ScrollEvent<'_> {
        ScrollEvent {
            total_x: 0.0,
            total_y: 1.0,
            delta_x: 0.0,
            delta_y: 1.0,
            source,
        }
    }

    #[test]
    fn calls_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = ListenerSet::new();
        set.push(recorder(&log, "a"));
        set.push(recorder(&log, "b"));
        set.push(recorder(&log, "a"));

        let raw = RawEvent::key_down(0);
        set.notify(&scroll(&raw)).unwrap();
        assert_eq!(*log.borrow(), vec!["a", "b", "a"]);
    }

    #[test]
    fn failure_aborts_remaining_listeners() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = ListenerSet::new();
        set.push(recorder(&log, "first"));
        set.push(Box::new(|_| Err("listener exploded".into())));
        set.push(recorder(&log, "never"));

        let raw = RawEvent::key_down(0);
        let err = set.notify(&scroll(&raw)).unwrap_err();

        assert!(matches!(err, ScrollnormError::Listener { index: 1, .. }));
        assert_eq!(*log.borrow(), vec!["first"]);
    }

    #[test]
    fn remove_by_id_and_index() {
        let mut set = ListenerSet::new();
        let a = set.push(Box::new(|_| Ok(())));
        let b = set.push(Box::new(|_| Ok(())));
        let c = set.push(Box::new(|_| Ok(())));

        assert!(set.remove(b));
        assert!(!set.remove(b));
        assert_eq!(set.ids().collect::<Vec<_>>(), vec![a, c]);

        assert!(!set.remove_at(2));
        assert!(set.remove_at(0));
        assert_eq!(set.ids().collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut set = ListenerSet::new();
        let first = set.push(Box::new(|_| Ok(())));
        set.clear();
        let second = set.push(Box::new(|_| Ok(())));
        assert_ne!(first, second);
    }
}
