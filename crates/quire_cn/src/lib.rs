//! # Quire Components (quire_cn)
//!
//! Framework-independent state for stateful form widgets, built on
//! `quire_core` primitives.
//!
//! - **Date picker**: single dates, date-times and ranges with strict text
//!   parsing, a staging value for the panel and confirm-on-close
//! - **Input number**: a numeric stepper with bounds clamping and validation
//! - **Message provider**: a queue of transient messages with timed dismissal
//!
//! A host UI framework renders the components and forwards input events to
//! them; everything the host needs to draw is exposed as plain getters.
//!
//! ## Example
//!
//! ```
//! use quire_cn::prelude::*;
//!
//! let mut range = cn::date_picker(DatePickerProps::new().kind(PickerKind::DateRange)).unwrap();
//! range.update_range_text("2024-01-01", "");
//! // Half a range is not a value
//! assert_eq!(range.value(), None);
//! assert!(range.is_end_value_invalid());
//! ```

pub mod calendar;
pub mod components;
pub mod date_format;
pub mod error;
pub mod locale;
pub mod number;

pub use components::*;
pub use date_format::DateFormat;
pub use error::{ConfigError, FormatError, LocaleError};
pub use locale::{Locale, LocaleRegistry};

/// Convenience module for creating components with a `cn::` prefix
pub mod cn {
    use crate::components::{
        DatePicker, DatePickerProps, InputNumber, InputNumberProps, MessageProvider,
        MessageProviderProps,
    };
    use crate::error::ConfigError;

    pub fn date_picker(props: DatePickerProps) -> Result<DatePicker, ConfigError> {
        DatePicker::new(props)
    }

    pub fn input_number(props: InputNumberProps) -> InputNumber {
        InputNumber::new(props)
    }

    pub fn message_provider(props: MessageProviderProps) -> MessageProvider {
        MessageProvider::new(props)
    }
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cn;
    pub use crate::components::date_picker::{
        CloseOptions, DatePicker, DatePickerProps, DatePickerTargets, DateValue, Outcome,
        PanelState, PickerKind, TimeChecks,
    };
    pub use crate::components::input_number::{
        Derived, InputNumber, InputNumberProps, InputNumberTargets,
    };
    pub use crate::components::message::{
        MessageHandle, MessageOptions, MessageProvider, MessageProviderProps, MessageType,
    };
    pub use crate::error::ConfigError;
    pub use crate::locale::{Locale, LocaleRegistry};
    pub use crate::number::NumberLike;
    // Host event types
    pub use quire_core::{FocusEvent, FormItem, KeyCode, KeyEvent, PointerEvent, TargetId};
}
