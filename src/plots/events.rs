//! Plot change notification.

use std::fmt;

/// A plot's configuration changed and it should be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlotChangeEvent {
    /// Name of the attribute that changed, e.g. `"interior_gap"`.
    pub property: &'static str,
}

impl PlotChangeEvent {
    /// Event for `property`.
    #[must_use]
    pub const fn new(property: &'static str) -> Self {
        Self { property }
    }
}

impl fmt::Display for PlotChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plot changed: {}", self.property)
    }
}

/// Handle returned when registering a listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

type Callback = Box<dyn Fn(&PlotChangeEvent)>;

/// Ordered list of change callbacks.
///
/// Callbacks run synchronously, in registration order, on the thread that
/// mutated the plot. The list is not shared by clones.
#[derive(Default)]
pub struct ChangeListeners {
    next_id: u64,
    callbacks: Vec<(ListenerId, Callback)>,
}

impl ChangeListeners {
    /// Register `callback` and return its handle.
    pub fn add(&mut self, callback: impl Fn(&PlotChangeEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(registered, _)| *registered != id);
        self.callbacks.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// True when no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Deliver `event` to every listener.
    pub fn notify(&self, event: &PlotChangeEvent) {
        for (_, callback) in &self.callbacks {
            callback(event);
        }
    }
}

/// Clones start with no listeners.
impl Clone for ChangeListeners {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for ChangeListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeListeners")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
