//! Event listeners and dispatch state.
//!
//! Listeners are stored per node and event type in registration order.
//! Dispatch snapshots the listener ids first and claims each listener just
//! before invoking it, so a listener removed mid-dispatch never runs and a
//! `once` listener is deregistered before its handler is called.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::Node;
use crate::dom::{Dom, NodeId};

/// Event handler. Runs with the tree unborrowed, so it may mutate it.
pub type Handler = Rc<dyn Fn(&Event)>;

/// Identifies one registration for later removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

#[derive(Clone)]
struct Listener {
    id: ListenerId,
    once: bool,
    handler: Handler,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
    next_id: u32,
}

impl ListenerStore {
    pub(crate) fn add(
        &mut self,
        node: NodeId,
        event: &str,
        handler: Handler,
        once: bool,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = match self.next_id.checked_add(1) {
            Some(next) => next,
            None => Dom::listener_ids_exhausted(),
        };
        self.map
            .entry(node)
            .or_default()
            .entry(event.to_owned())
            .or_default()
            .push(Listener { id, once, handler });
        id
    }

    /// Remove a registration. Returns whether it was still registered.
    pub(crate) fn remove(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(events) = self.map.get_mut(&node) else {
            return false;
        };
        let mut removed = false;
        for listeners in events.values_mut() {
            let before = listeners.len();
            listeners.retain(|l| l.id != id);
            removed |= listeners.len() != before;
        }
        self.prune(node);
        removed
    }

    /// Ids registered for `event` on `node`, in registration order.
    pub(crate) fn snapshot(&self, node: NodeId, event: &str) -> Vec<ListenerId> {
        self.map
            .get(&node)
            .and_then(|events| events.get(event))
            .map(|listeners| listeners.iter().map(|l| l.id).collect())
            .unwrap_or_default()
    }

    /// Fetch a still-registered listener for invocation, deregistering it if `once`.
    pub(crate) fn claim(&mut self, node: NodeId, event: &str, id: ListenerId) -> Option<Handler> {
        let listeners = self.map.get_mut(&node)?.get_mut(event)?;
        let pos = listeners.iter().position(|l| l.id == id)?;
        if !listeners[pos].once {
            return Some(listeners[pos].handler.clone());
        }
        let listener = listeners.remove(pos);
        if listeners.is_empty() {
            self.prune(node);
        }
        Some(listener.handler)
    }

    fn prune(&mut self, node: NodeId) {
        let Some(events) = self.map.get_mut(&node) else {
            return;
        };
        events.retain(|_, listeners| !listeners.is_empty());
        if events.is_empty() {
            self.map.remove(&node);
        }
    }

    pub(crate) fn count(&self, node: NodeId, event: &str) -> usize {
        self.map
            .get(&node)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }
}

/// A dispatched event.
///
/// The same value is handed to every listener along the propagation path;
/// `current_target` moves as the event bubbles.
pub struct Event {
    event_type: String,
    target: Node,
    current_target: RefCell<Node>,
    propagation_stopped: Cell<bool>,
    immediate_propagation_stopped: Cell<bool>,
}

impl Event {
    pub(crate) fn new(event_type: &str, target: Node) -> Self {
        Self {
            event_type: event_type.to_owned(),
            current_target: RefCell::new(target.clone()),
            target,
            propagation_stopped: Cell::new(false),
            immediate_propagation_stopped: Cell::new(false),
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The node the event was dispatched on.
    pub fn target(&self) -> &Node {
        &self.target
    }

    /// The node whose listeners are currently running.
    pub fn current_target(&self) -> Node {
        self.current_target.borrow().clone()
    }

    pub(crate) fn set_current_target(&self, node: Node) {
        *self.current_target.borrow_mut() = node;
    }

    /// Stop bubbling after the current node's listeners finish.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Stop bubbling and skip the remaining listeners on the current node.
    pub fn stop_immediate_propagation(&self) {
        self.propagation_stopped.set(true);
        self.immediate_propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub(crate) fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped.get()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("target", &self.target)
            .field("propagation_stopped", &self.propagation_stopped.get())
            .finish()
    }
}
