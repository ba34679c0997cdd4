//! Stateful form components
//!
//! Each component follows a consistent pattern:
//! - Props struct with builder methods, loadable from TOML
//! - Component struct owning its value store and derived display text
//! - Event methods the host calls with typed events
//! - Derived flags recomputed on read

pub mod date_picker;
pub mod input_number;
pub mod message;

pub use date_picker::{
    CloseOptions, DatePicker, DatePickerProps, DatePickerTargets, DateValue, Outcome, PanelState,
    PickerKind, TimeChecks,
};
pub use input_number::{
    Derived, InputNumber, InputNumberProps, InputNumberTargets, PointerOutcome,
};
pub use message::{
    Message, MessageHandle, MessageOptions, MessagePhase, MessageProvider, MessageProviderProps,
    MessageType,
};
