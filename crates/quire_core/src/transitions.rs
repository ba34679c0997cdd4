//! Widget interaction states
//!
//! Widgets define their own state enum and map events to transitions by
//! implementing [`StateTransitions`]. [`Machine`] holds the current state and
//! applies events to it:
//!
//! ```
//! use quire_core::transitions::{Machine, StateTransitions};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Door { Open, Closed }
//!
//! #[derive(Clone, Copy, Debug)]
//! enum Push { Open, Close }
//!
//! impl StateTransitions<Push> for Door {
//!     fn on_event(&self, event: Push) -> Option<Self> {
//!         match (self, event) {
//!             (Door::Closed, Push::Open) => Some(Door::Open),
//!             (Door::Open, Push::Close) => Some(Door::Closed),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut door = Machine::new(Door::Closed);
//! assert_eq!(door.send(Push::Open), Some(Door::Open));
//! assert_eq!(door.send(Push::Open), None);
//! ```

use std::fmt;

/// Maps an event to the next state. `None` means the event is ignored.
pub trait StateTransitions<E>: Copy + PartialEq {
    fn on_event(&self, event: E) -> Option<Self>;
}

/// Current state of a widget plus a bounded transition history
#[derive(Clone)]
pub struct Machine<S> {
    current: S,
    history: Vec<(S, S)>,
}

/// Transitions kept for debugging
const HISTORY_LIMIT: usize = 32;

impl<S: Copy + PartialEq + fmt::Debug> Machine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if the machine is in `state`
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Apply an event. Returns the new state if the machine moved.
    pub fn send<E: Copy + fmt::Debug>(&mut self, event: E) -> Option<S>
    where
        S: StateTransitions<E>,
    {
        let next = self.current.on_event(event)?;
        if next == self.current {
            return None;
        }
        tracing::trace!(from = ?self.current, to = ?next, ?event, "state transition");
        self.record(self.current, next);
        self.current = next;
        Some(next)
    }

    /// Most recent transitions, oldest first
    pub fn history(&self) -> &[(S, S)] {
        &self.history
    }

    fn record(&mut self, from: S, to: S) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, to));
    }
}

impl<S: fmt::Debug> fmt::Debug for Machine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current)
            .field("history", &self.history)
            .finish()
    }
}
