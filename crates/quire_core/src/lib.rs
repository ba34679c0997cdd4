//! Quire Core
//!
//! Framework-independent building blocks for stateful form widgets:
//!
//! - **Value Store**: controlled-or-uncontrolled value merging with commit
//!   notifications
//! - **Callbacks**: multi-handler notification channels
//! - **Form hooks**: input/change/focus/blur reporting to an enclosing form item
//! - **State Transitions**: per-widget interaction state machines
//! - **Events**: key, focus and pointer events delivered by the host
//!
//! # Example
//!
//! ```rust
//! use quire_core::value_store::{CommitPolicy, ValueStore};
//!
//! let mut value = ValueStore::new(None::<f64>, CommitPolicy::SkipUnchanged);
//! value.on_update_value(|v| println!("value is now {v:?}"));
//!
//! assert!(value.commit(Some(4.0)));
//! // Same value again: no notification
//! assert!(!value.commit(Some(4.0)));
//! ```

pub mod callbacks;
pub mod events;
pub mod form;
pub mod transitions;
pub mod value_store;

pub use callbacks::Callbacks;
pub use events::{FocusEvent, KeyCode, KeyEvent, Modifiers, PointerEvent, TargetId};
pub use form::{Detached, FormItem, FormItemLog, FormTrigger};
pub use transitions::{Machine, StateTransitions};
pub use value_store::{CommitPolicy, ValueStore};
