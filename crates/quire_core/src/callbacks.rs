//! Notification channels
//!
//! A widget prop like `on_update_value` may carry one handler or several.
//! [`Callbacks`] stores them in registration order and invokes all of them
//! with the same payload. Handlers use `Rc` since widgets are single-threaded.
//!
//! ```
//! use quire_core::callbacks::Callbacks;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(Cell::new(0));
//! let mut on_update = Callbacks::<i32>::new();
//! let s = seen.clone();
//! on_update.push(move |v| s.set(s.get() + *v));
//!
//! on_update.call(&5);
//! assert_eq!(seen.get(), 5);
//! ```

use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

/// Zero or more handlers for one notification
pub struct Callbacks<T: ?Sized> {
    handlers: SmallVec<[Rc<dyn Fn(&T)>; 2]>,
}

impl<T: ?Sized> Callbacks<T> {
    pub fn new() -> Self {
        Self {
            handlers: SmallVec::new(),
        }
    }

    /// Register another handler
    pub fn push<F>(&mut self, handler: F)
    where
        F: Fn(&T) + 'static,
    {
        self.handlers.push(Rc::new(handler));
    }

    /// Invoke every handler in registration order
    pub fn call(&self, value: &T) {
        for handler in &self.handlers {
            handler(value);
        }
    }

    /// Check if no handler is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T: ?Sized> Default for Callbacks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Callbacks<T> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
