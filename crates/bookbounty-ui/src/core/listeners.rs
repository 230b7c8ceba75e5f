//! Inbound event listener registry.
//!
//! # Design
//! - Mirrors `socket.on`/`socket.once`/`socket.off`: handlers are keyed by
//!   [`InboundKind`] and one-shot handlers deregister when they fire.
//! - Generic over the handler type so reducers can be tested without Yew.

use bookbounty_events::InboundKind;

/// Handle returned on registration, used to deregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug)]
struct Entry<H> {
    id: ListenerId,
    kind: InboundKind,
    once: bool,
    handler: H,
}

/// Registry of inbound listeners.
#[derive(Debug)]
pub struct Listeners<H> {
    next_id: u64,
    entries: Vec<Entry<H>>,
}

impl<H> Default for Listeners<H> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<H: Clone> Listeners<H> {
    /// Register a persistent handler.
    pub fn on(&mut self, kind: InboundKind, handler: H) -> ListenerId {
        self.insert(kind, handler, false)
    }

    /// Register a handler that runs for the next matching event only.
    pub fn once(&mut self, kind: InboundKind, handler: H) -> ListenerId {
        self.insert(kind, handler, true)
    }

    /// Deregister a handler. Returns whether it was still registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before != self.entries.len()
    }

    /// Handlers to run for `kind`, in registration order.
    ///
    /// One-shot handlers are removed as part of the call.
    pub fn take_for(&mut self, kind: InboundKind) -> Vec<H> {
        let handlers = self
            .entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.handler.clone())
            .collect();
        self.entries
            .retain(|entry| !(entry.once && entry.kind == kind));
        handlers
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn count(&self, kind: InboundKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    fn insert(&mut self, kind: InboundKind, handler: H, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry {
            id,
            kind,
            once,
            handler,
        });
        id
    }
}
