//! Controlled-or-uncontrolled value store
//!
//! Form widgets accept an optional externally controlled value and a default
//! used when the host leaves the value uncontrolled. [`ValueStore`] merges the
//! two into one value and owns the notification channels fired on commit.
//!
//! ```
//! use quire_core::value_store::{CommitPolicy, ValueStore};
//!
//! let mut store = ValueStore::new(Some(1.0), CommitPolicy::SkipUnchanged);
//! assert_eq!(store.merged(), &Some(1.0));
//!
//! // Uncontrolled: commits land in the internal fallback
//! assert!(store.commit(Some(2.0)));
//! assert_eq!(store.merged(), &Some(2.0));
//!
//! // Controlled: the external value wins until it is released
//! store.set_controlled(Some(None));
//! assert_eq!(store.merged(), &None);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::callbacks::Callbacks;
use crate::form::{Detached, FormItem};

/// How a commit of an unchanged value is treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Committing the current merged value is a silent no-op
    #[default]
    SkipUnchanged,
    /// Every commit notifies, even when the value is unchanged
    Always,
}

/// Merged controlled/uncontrolled value with its notification channels
pub struct ValueStore<T> {
    /// External value; `None` means the host does not control the value
    controlled: Option<T>,
    /// Last committed value, used while uncontrolled
    uncontrolled: T,
    policy: CommitPolicy,
    on_update_value: Callbacks<T>,
    /// Deprecated alias of `on_update_value`, kept as its own channel
    on_change: Callbacks<T>,
    form_item: Rc<dyn FormItem>,
}

impl<T: Clone + PartialEq + fmt::Debug> ValueStore<T> {
    /// Create an uncontrolled store seeded with `default`
    pub fn new(default: T, policy: CommitPolicy) -> Self {
        Self {
            controlled: None,
            uncontrolled: default,
            policy,
            on_update_value: Callbacks::new(),
            on_change: Callbacks::new(),
            form_item: Rc::new(Detached),
        }
    }

    /// The value the widget presents: controlled if present, else the fallback
    pub fn merged(&self) -> &T {
        self.controlled.as_ref().unwrap_or(&self.uncontrolled)
    }

    /// The internally tracked fallback value
    pub fn uncontrolled(&self) -> &T {
        &self.uncontrolled
    }

    /// Check if the host currently controls the value
    pub fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }

    /// Replace the external value. `None` hands control back to the store.
    pub fn set_controlled(&mut self, value: Option<T>) {
        self.controlled = value;
    }

    /// How commits of an unchanged value are treated
    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    pub fn on_update_value(&mut self, handler: impl Fn(&T) + 'static) {
        self.on_update_value.push(handler);
    }

    /// Register a handler on the deprecated change channel
    pub fn on_change(&mut self, handler: impl Fn(&T) + 'static) {
        if self.on_change.is_empty() {
            tracing::warn!("`on_change` is deprecated, use `on_update_value` instead");
        }
        self.on_change.push(handler);
    }

    pub fn set_form_item(&mut self, form_item: Rc<dyn FormItem>) {
        self.form_item = form_item;
    }

    /// The form item hooks fire on; [`Detached`] outside a form
    pub fn form_item(&self) -> &Rc<dyn FormItem> {
        &self.form_item
    }

    /// Commit a new value
    ///
    /// Fires both value channels, stores the value as the uncontrolled
    /// fallback and triggers the form input and change hooks. Under
    /// [`CommitPolicy::SkipUnchanged`] an unchanged value does nothing.
    /// Returns whether the commit happened.
    pub fn commit(&mut self, value: T) -> bool {
        if self.policy == CommitPolicy::SkipUnchanged && *self.merged() == value {
            tracing::trace!(?value, "commit skipped, value unchanged");
            return false;
        }
        tracing::debug!(?value, controlled = self.is_controlled(), "commit value");
        self.on_update_value.call(&value);
        self.on_change.call(&value);
        self.uncontrolled = value;
        self.form_item.trigger_input();
        self.form_item.trigger_change();
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueStore")
            .field("controlled", &self.controlled)
            .field("uncontrolled", &self.uncontrolled)
            .field("policy", &self.policy)
            .finish()
    }
}
