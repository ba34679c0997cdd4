//! Date picker component state
//!
//! A text input (or a start/end pair for range kinds) with a calendar panel.
//! The picker keeps three things apart:
//!
//! - the committed value, controlled by the host or tracked internally
//! - the pending value, a staging copy edited while the panel is open
//! - the input text, derived from the pending value
//!
//! Text edits that strictly parse under the resolved format commit at once.
//! Anything else stays in the input as typed and is flagged invalid. Closing
//! the panel drops the pending value unless the picker confirms on close.
//!
//! # Example
//!
//! ```
//! use quire_cn::prelude::*;
//!
//! let mut picker = cn::date_picker(DatePickerProps::new().kind(PickerKind::Date)).unwrap();
//! picker.update_single_text("2024-02-29");
//! assert!(picker.value().is_some());
//! assert_eq!(picker.display_text(), "2024-02-29");
//!
//! // Not a real date: kept as typed, value untouched
//! picker.update_single_text("2023-02-29");
//! assert_eq!(picker.display_text(), "2023-02-29");
//! assert!(picker.is_value_invalid());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use quire_core::{
    Callbacks, CommitPolicy, FocusEvent, FormItem, KeyCode, KeyEvent, Machine, PointerEvent,
    StateTransitions, TargetId, ValueStore,
};

use crate::calendar::DateTimeParts;
use crate::date_format::DateFormat;
use crate::error::ConfigError;
use crate::locale::Locale;

/// A picked date (`Single`) or date range, in milliseconds since the epoch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Single(i64),
    Range(i64, i64),
}

impl DateValue {
    pub fn single(&self) -> Option<i64> {
        match self {
            DateValue::Single(ts) => Some(*ts),
            DateValue::Range(..) => None,
        }
    }

    pub fn range(&self) -> Option<(i64, i64)> {
        match self {
            DateValue::Range(start, end) => Some((*start, *end)),
            DateValue::Single(_) => None,
        }
    }
}

/// What the picker selects
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerKind {
    #[default]
    Date,
    DateTime,
    DateRange,
    DateTimeRange,
}

impl PickerKind {
    pub fn is_range(&self) -> bool {
        matches!(self, PickerKind::DateRange | PickerKind::DateTimeRange)
    }

    pub fn default_format(&self) -> &'static str {
        match self {
            PickerKind::Date | PickerKind::DateRange => "yyyy-MM-dd",
            PickerKind::DateTime | PickerKind::DateTimeRange => "yyyy-MM-dd HH:mm:ss",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PickerKind::Date => "date",
            PickerKind::DateTime => "datetime",
            PickerKind::DateRange => "daterange",
            PickerKind::DateTimeRange => "datetimerange",
        }
    }

    fn accepts(&self, value: &DateValue) -> bool {
        match value {
            DateValue::Single(_) => !self.is_range(),
            DateValue::Range(..) => self.is_range(),
        }
    }
}

/// Marks dates the user may not pick
pub type DateDisabled = Rc<dyn Fn(i64) -> bool>;

/// Gives the time-of-day checks that apply on the day of a timestamp
pub type TimeDisabled = Rc<dyn Fn(i64) -> TimeChecks>;

/// Time-of-day fields the user may not pick
///
/// Minute checks also receive the hour, second checks the minute and hour.
#[derive(Clone, Default)]
pub struct TimeChecks {
    pub is_hour_disabled: Option<Rc<dyn Fn(u32) -> bool>>,
    pub is_minute_disabled: Option<Rc<dyn Fn(u32, u32) -> bool>>,
    pub is_second_disabled: Option<Rc<dyn Fn(u32, u32, u32) -> bool>>,
}

impl TimeChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hour(mut self, check: impl Fn(u32) -> bool + 'static) -> Self {
        self.is_hour_disabled = Some(Rc::new(check));
        self
    }

    pub fn minute(mut self, check: impl Fn(u32, u32) -> bool + 'static) -> Self {
        self.is_minute_disabled = Some(Rc::new(check));
        self
    }

    pub fn second(mut self, check: impl Fn(u32, u32, u32) -> bool + 'static) -> Self {
        self.is_second_disabled = Some(Rc::new(check));
        self
    }

    /// Check if any field of the timestamp's time of day is disabled
    pub fn rejects(&self, timestamp: i64) -> bool {
        let parts = DateTimeParts::from_timestamp(timestamp);
        let (hour, minute, second) = (parts.hour, parts.minute, parts.second);
        self.is_hour_disabled.as_ref().is_some_and(|f| f(hour))
            || self.is_minute_disabled.as_ref().is_some_and(|f| f(minute, hour))
            || self
                .is_second_disabled
                .as_ref()
                .is_some_and(|f| f(second, minute, hour))
    }
}

impl fmt::Debug for TimeChecks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeChecks")
            .field("hour", &self.is_hour_disabled.is_some())
            .field("minute", &self.is_minute_disabled.is_some())
            .field("second", &self.is_second_disabled.is_some())
            .finish()
    }
}

/// Current time in milliseconds, used to fill fields a format leaves out
pub type Clock = Rc<dyn Fn() -> i64>;

/// Date picker configuration
///
/// ```toml
/// type = "daterange"
/// format = "dd.MM.yyyy"
/// update_value_on_close = true
///
/// [ranges]
/// "Q1 2024" = [1704067200000, 1711843200000]
/// ```
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatePickerProps {
    #[serde(rename = "type")]
    pub kind: PickerKind,
    pub format: Option<String>,
    pub default_value: Option<DateValue>,
    pub clearable: bool,
    /// Commit the pending value when the panel closes (not for `date`)
    pub update_value_on_close: bool,
    pub disabled: bool,
    pub placeholder: Option<String>,
    pub start_placeholder: Option<String>,
    pub end_placeholder: Option<String>,
    /// Preset ranges by label, in display order
    pub ranges: IndexMap<String, (i64, i64)>,
    #[serde(skip)]
    pub is_date_disabled: Option<DateDisabled>,
    #[serde(skip)]
    pub is_time_disabled: Option<TimeDisabled>,
    #[serde(skip)]
    pub clock: Option<Clock>,
}

impl Default for DatePickerProps {
    fn default() -> Self {
        Self {
            kind: PickerKind::Date,
            format: None,
            default_value: None,
            clearable: false,
            update_value_on_close: false,
            disabled: false,
            placeholder: None,
            start_placeholder: None,
            end_placeholder: None,
            ranges: IndexMap::new(),
            is_date_disabled: None,
            is_time_disabled: None,
            clock: None,
        }
    }
}

impl DatePickerProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let props: Self = toml::from_str(src)?;
        props.validate()?;
        Ok(props)
    }

    /// Check the format, the default value shape and the preset ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolved_format()?;
        if let Some(value) = &self.default_value {
            if !self.kind.accepts(value) {
                return Err(ConfigError::ValueShape {
                    kind: self.kind.name(),
                });
            }
        }
        if let Some((label, _)) = self.ranges.iter().find(|(_, (start, end))| start > end) {
            return Err(ConfigError::ReversedRange {
                label: label.clone(),
            });
        }
        Ok(())
    }

    fn resolved_format(&self) -> Result<DateFormat, ConfigError> {
        let pattern = self
            .format
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| self.kind.default_format());
        Ok(DateFormat::compile(pattern)?)
    }

    pub fn kind(mut self, kind: PickerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn default_value(mut self, value: DateValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    pub fn update_value_on_close(mut self, update: bool) -> Self {
        self.update_value_on_close = update;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn start_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.start_placeholder = Some(placeholder.into());
        self
    }

    pub fn end_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.end_placeholder = Some(placeholder.into());
        self
    }

    /// Add a preset range
    pub fn range(mut self, label: impl Into<String>, start: i64, end: i64) -> Self {
        self.ranges.insert(label.into(), (start, end));
        self
    }

    pub fn is_date_disabled(mut self, predicate: impl Fn(i64) -> bool + 'static) -> Self {
        self.is_date_disabled = Some(Rc::new(predicate));
        self
    }

    /// Time-of-day checks for the day of each picked timestamp
    pub fn is_time_disabled(mut self, checks: impl Fn(i64) -> TimeChecks + 'static) -> Self {
        self.is_time_disabled = Some(Rc::new(checks));
        self
    }

    /// Replace the system clock
    pub fn clock(mut self, clock: impl Fn() -> i64 + 'static) -> Self {
        self.clock = Some(Rc::new(clock));
        self
    }
}

impl fmt::Debug for DatePickerProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePickerProps")
            .field("kind", &self.kind)
            .field("format", &self.format)
            .field("default_value", &self.default_value)
            .field("clearable", &self.clearable)
            .field("update_value_on_close", &self.update_value_on_close)
            .field("disabled", &self.disabled)
            .field("ranges", &self.ranges)
            .finish_non_exhaustive()
    }
}

fn system_clock() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Panel interaction states
///
/// `OpenConfirming` means the panel holds a staged selection that has not
/// been committed yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanelState {
    #[default]
    Closed,
    OpenEditing,
    OpenConfirming,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelEvent {
    Open,
    Stage,
    Confirm,
    Close,
}

impl StateTransitions<PanelEvent> for PanelState {
    fn on_event(&self, event: PanelEvent) -> Option<Self> {
        match (self, event) {
            (PanelState::Closed, PanelEvent::Open) => Some(PanelState::OpenEditing),

            (PanelState::OpenEditing, PanelEvent::Stage) => Some(PanelState::OpenConfirming),
            (PanelState::OpenConfirming, PanelEvent::Confirm) => Some(PanelState::OpenEditing),

            (PanelState::OpenEditing | PanelState::OpenConfirming, PanelEvent::Close) => {
                Some(PanelState::Closed)
            }

            _ => None,
        }
    }
}

/// Host element ids the picker hit-tests events against
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DatePickerTargets {
    /// The input area; clicks inside it are not "outside"
    pub trigger: Option<TargetId>,
    /// The panel; focus moving into it does not blur the picker
    pub panel: Option<TargetId>,
    /// The input's clear button; clicks on it do not open the panel
    pub clear_button: Option<TargetId>,
}

/// How to close the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CloseOptions {
    pub return_focus: bool,
    /// Skip the confirm-on-close commit
    pub disable_update_on_close: bool,
}

/// What the host should do after an interaction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The panel was open and has been asked to close
    pub closed: bool,
    /// Move focus back to the input
    pub focus_input: bool,
    /// Take the input out of editing mode
    pub deactivate_input: bool,
}

/// Date picker state
pub struct DatePicker {
    kind: PickerKind,
    format: DateFormat,
    locale: Rc<Locale>,
    value: ValueStore<Option<DateValue>>,
    show: ValueStore<bool>,
    panel: Machine<PanelState>,
    pending: Option<DateValue>,
    single_text: String,
    start_text: String,
    end_text: String,
    clearable: bool,
    update_value_on_close: bool,
    disabled: bool,
    placeholder: Option<String>,
    start_placeholder: Option<String>,
    end_placeholder: Option<String>,
    ranges: IndexMap<String, (i64, i64)>,
    is_date_disabled: Option<DateDisabled>,
    is_time_disabled: Option<TimeDisabled>,
    clock: Clock,
    targets: DatePickerTargets,
    on_focus: Callbacks<FocusEvent>,
    on_blur: Callbacks<FocusEvent>,
}

impl DatePicker {
    pub fn new(props: DatePickerProps) -> Result<Self, ConfigError> {
        Self::with_locale(props, Rc::new(Locale::en_us()))
    }

    pub fn with_locale(props: DatePickerProps, locale: Rc<Locale>) -> Result<Self, ConfigError> {
        props.validate()?;
        let format = props.resolved_format()?;
        let pending = props.default_value;
        let mut picker = Self {
            kind: props.kind,
            format,
            locale,
            value: ValueStore::new(props.default_value, CommitPolicy::Always),
            show: ValueStore::new(false, CommitPolicy::Always),
            panel: Machine::new(PanelState::Closed),
            pending,
            single_text: String::new(),
            start_text: String::new(),
            end_text: String::new(),
            clearable: props.clearable,
            update_value_on_close: props.update_value_on_close,
            disabled: props.disabled,
            placeholder: props.placeholder,
            start_placeholder: props.start_placeholder,
            end_placeholder: props.end_placeholder,
            ranges: props.ranges,
            is_date_disabled: props.is_date_disabled,
            is_time_disabled: props.is_time_disabled,
            clock: props.clock.unwrap_or_else(|| Rc::new(system_clock)),
            targets: DatePickerTargets::default(),
            on_focus: Callbacks::new(),
            on_blur: Callbacks::new(),
        };
        picker.derive_input_state();
        Ok(picker)
    }

    pub fn with_targets(mut self, targets: DatePickerTargets) -> Self {
        self.targets = targets;
        self
    }

    // ------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------

    pub fn on_update_value(&mut self, handler: impl Fn(&Option<DateValue>) + 'static) {
        self.value.on_update_value(handler);
    }

    /// Deprecated alias of [`Self::on_update_value`]
    pub fn on_change(&mut self, handler: impl Fn(&Option<DateValue>) + 'static) {
        self.value.on_change(handler);
    }

    pub fn on_update_show(&mut self, handler: impl Fn(&bool) + 'static) {
        self.show.on_update_value(handler);
    }

    pub fn on_focus(&mut self, handler: impl Fn(&FocusEvent) + 'static) {
        self.on_focus.push(handler);
    }

    pub fn on_blur(&mut self, handler: impl Fn(&FocusEvent) + 'static) {
        self.on_blur.push(handler);
    }

    pub fn set_form_item(&mut self, form_item: Rc<dyn FormItem>) {
        self.value.set_form_item(form_item);
    }

    // ------------------------------------------------------------------
    // Host-driven props
    // ------------------------------------------------------------------

    /// Set the controlled value. `None` leaves the value uncontrolled.
    pub fn set_value(&mut self, value: Option<Option<DateValue>>) {
        let before = *self.value.merged();
        self.value.set_controlled(value);
        self.after_value_change(before);
    }

    /// Set the controlled open state. `None` leaves it uncontrolled.
    pub fn set_show(&mut self, show: Option<bool>) {
        let was_open = self.is_open();
        self.show.set_controlled(show);
        self.after_show_change(was_open);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    pub fn kind(&self) -> PickerKind {
        self.kind
    }

    /// Check if the picker edits a start/end pair
    pub fn is_range(&self) -> bool {
        self.kind.is_range()
    }

    pub fn format(&self) -> &DateFormat {
        &self.format
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The committed value
    pub fn value(&self) -> Option<DateValue> {
        *self.value.merged()
    }

    /// The staged value shown by the panel
    pub fn pending(&self) -> Option<DateValue> {
        self.pending
    }

    /// Check if the panel is shown
    pub fn is_open(&self) -> bool {
        *self.show.merged()
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel.current()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn clearable(&self) -> bool {
        self.clearable
    }

    pub fn ranges(&self) -> &IndexMap<String, (i64, i64)> {
        &self.ranges
    }

    /// Input text for single kinds
    pub fn display_text(&self) -> &str {
        &self.single_text
    }

    pub fn display_start_text(&self) -> &str {
        &self.start_text
    }

    pub fn display_end_text(&self) -> &str {
        &self.end_text
    }

    /// Placeholder of the single input; empty for range kinds
    pub fn placeholder(&self) -> &str {
        if let Some(placeholder) = &self.placeholder {
            return placeholder;
        }
        let strings = &self.locale.date_picker;
        match self.kind {
            PickerKind::Date => &strings.date_placeholder,
            PickerKind::DateTime => &strings.datetime_placeholder,
            PickerKind::DateRange | PickerKind::DateTimeRange => "",
        }
    }

    pub fn start_placeholder(&self) -> &str {
        if let Some(placeholder) = &self.start_placeholder {
            return placeholder;
        }
        let strings = &self.locale.date_picker;
        match self.kind {
            PickerKind::DateRange => &strings.start_date_placeholder,
            PickerKind::DateTimeRange => &strings.start_datetime_placeholder,
            PickerKind::Date | PickerKind::DateTime => "",
        }
    }

    pub fn end_placeholder(&self) -> &str {
        if let Some(placeholder) = &self.end_placeholder {
            return placeholder;
        }
        let strings = &self.locale.date_picker;
        match self.kind {
            PickerKind::DateRange => &strings.end_date_placeholder,
            PickerKind::DateTimeRange => &strings.end_datetime_placeholder,
            PickerKind::Date | PickerKind::DateTime => "",
        }
    }

    /// Strict parse under the resolved format
    pub fn parse(&self, text: &str) -> Option<i64> {
        self.format
            .parse_strict(text, (self.clock)(), &self.locale.date)
    }

    pub fn format_timestamp(&self, timestamp: i64) -> String {
        self.format.format(timestamp, &self.locale.date)
    }

    fn text_invalid(&self, text: &str) -> bool {
        !text.is_empty() && self.parse(text).is_none()
    }

    /// Check if a pending timestamp falls on a disabled date or time
    fn pick_disabled(&self, timestamp: Option<i64>) -> bool {
        let Some(ts) = timestamp else {
            return false;
        };
        let date = self.is_date_disabled.as_ref().is_some_and(|f| f(ts));
        let time = self
            .is_time_disabled
            .as_ref()
            .is_some_and(|checks| checks(ts).rejects(ts));
        date || time
    }

    /// The single input does not hold an acceptable date
    pub fn is_value_invalid(&self) -> bool {
        if self.is_range() {
            return false;
        }
        let invalid = self.text_invalid(&self.single_text)
            || self.pick_disabled(self.pending.and_then(|v| v.single()));
        tracing::trace!(invalid, "single value validity");
        invalid
    }

    /// The start input does not hold an acceptable date
    ///
    /// A blank start next to a filled end is invalid: ranges are all or nothing.
    pub fn is_start_value_invalid(&self) -> bool {
        if !self.is_range() {
            return false;
        }
        self.side_invalid(&self.start_text, &self.end_text)
            || self.pick_disabled(self.pending.and_then(|v| v.range()).map(|(s, _)| s))
    }

    pub fn is_end_value_invalid(&self) -> bool {
        if !self.is_range() {
            return false;
        }
        self.side_invalid(&self.end_text, &self.start_text)
            || self.pick_disabled(self.pending.and_then(|v| v.range()).map(|(_, e)| e))
    }

    fn side_invalid(&self, text: &str, other: &str) -> bool {
        if text.is_empty() {
            !other.is_empty()
        } else {
            self.parse(text).is_none()
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.is_value_invalid() || self.is_start_value_invalid() || self.is_end_value_invalid()
    }

    // ------------------------------------------------------------------
    // Reconciliation
    // ------------------------------------------------------------------

    /// Re-derive the input text from the pending value
    fn derive_input_state(&mut self) {
        match (self.is_range(), self.pending) {
            (true, None) => {
                self.start_text.clear();
                self.end_text.clear();
            }
            (true, Some(DateValue::Range(start, end))) => {
                self.start_text = self.format_timestamp(start);
                self.end_text = self.format_timestamp(end);
            }
            (false, None) => self.single_text.clear(),
            (false, Some(DateValue::Single(ts))) => {
                self.single_text = self.format_timestamp(ts);
            }
            // Wrong shape for this kind: leave the text alone
            (true, Some(DateValue::Single(_))) | (false, Some(DateValue::Range(..))) => {}
        }
    }

    fn set_pending(&mut self, value: Option<DateValue>) {
        if self.pending != value {
            self.pending = value;
            self.derive_input_state();
        }
    }

    fn commit_value(&mut self, value: Option<DateValue>) {
        let before = self.value();
        self.value.commit(value);
        self.after_value_change(before);
    }

    fn after_value_change(&mut self, before: Option<DateValue>) {
        let merged = self.value();
        if merged != before {
            self.set_pending(merged);
        }
    }

    fn update_show(&mut self, show: bool) {
        tracing::debug!(show, "date picker panel");
        self.show.commit(show);
    }

    fn after_show_change(&mut self, was_open: bool) {
        match (was_open, self.is_open()) {
            (false, true) => {
                self.panel.send(PanelEvent::Open);
            }
            (true, false) => {
                self.panel.send(PanelEvent::Close);
                // Drop whatever was staged
                self.pending = self.value();
                self.derive_input_state();
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Panel
    // ------------------------------------------------------------------

    pub fn open(&mut self) {
        if self.disabled || self.is_open() {
            return;
        }
        self.update_show(true);
        self.after_show_change(false);
    }

    pub fn close(&mut self, options: CloseOptions) -> Outcome {
        if !self.is_open() {
            return Outcome::default();
        }
        self.update_show(false);
        if self.kind != PickerKind::Date
            && self.update_value_on_close
            && !options.disable_update_on_close
        {
            self.panel_confirm();
        }
        self.after_show_change(true);
        // A controlled show may keep the panel open
        let closed = !self.is_open();
        Outcome {
            closed,
            focus_input: closed && options.return_focus,
            deactivate_input: false,
        }
    }

    /// A selection made in the panel; staged unless `commit`
    pub fn panel_update_value(&mut self, value: Option<DateValue>, commit: bool) {
        if commit {
            self.commit_value(value);
        } else {
            self.set_pending(value);
            self.panel.send(PanelEvent::Stage);
        }
    }

    /// Commit the staged value
    pub fn panel_confirm(&mut self) {
        self.commit_value(self.pending);
        self.panel.send(PanelEvent::Confirm);
    }

    pub fn panel_close(&mut self, disable_update_on_close: bool) -> Outcome {
        self.close(CloseOptions {
            return_focus: true,
            disable_update_on_close,
        })
    }

    /// Focus left the panel with Tab
    pub fn panel_tab_out(&mut self) -> Outcome {
        self.close(CloseOptions {
            return_focus: true,
            ..Default::default()
        })
    }

    /// Stage a preset range. Returns false for an unknown label.
    pub fn select_range_preset(&mut self, label: &str) -> bool {
        let Some(&(start, end)) = self.ranges.get(label) else {
            return false;
        };
        if !self.is_range() {
            return false;
        }
        self.panel_update_value(Some(DateValue::Range(start, end)), false);
        true
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Commit `None`, then close without confirming
    pub fn clear(&mut self) -> Outcome {
        self.commit_value(None);
        let closed = self.close(CloseOptions {
            return_focus: false,
            disable_update_on_close: true,
        });
        Outcome {
            deactivate_input: true,
            ..closed
        }
    }

    /// The user edited the single input
    pub fn update_single_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.commit_value(None);
            // The value may already have been `None` with rejected text showing
            self.single_text.clear();
            return;
        }
        match self.parse(&text) {
            Some(ts) => {
                self.commit_value(Some(DateValue::Single(ts)));
                self.derive_input_state();
            }
            None => {
                tracing::debug!(%text, format = self.format.pattern(), "date text rejected");
                self.single_text = text;
            }
        }
    }

    /// The user edited one of the range inputs
    ///
    /// Both sides must parse for anything to commit.
    pub fn update_range_text(&mut self, start: impl Into<String>, end: impl Into<String>) {
        let start = start.into();
        let end = end.into();
        if start.is_empty() && end.is_empty() {
            self.commit_value(None);
            self.start_text.clear();
            self.end_text.clear();
            return;
        }
        match (self.parse(&start), self.parse(&end)) {
            (Some(s), Some(e)) => {
                self.commit_value(Some(DateValue::Range(s, e)));
                self.derive_input_state();
            }
            _ => {
                tracing::debug!(
                    %start,
                    %end,
                    format = self.format.pattern(),
                    "range text rejected"
                );
                self.start_text = start;
                self.end_text = end;
            }
        }
    }

    pub fn key_down(&mut self, event: &KeyEvent) -> Outcome {
        if event.key == KeyCode::Escape {
            return self.close(CloseOptions {
                return_focus: true,
                ..Default::default()
            });
        }
        Outcome::default()
    }

    /// A pointer press somewhere in the window
    pub fn click_outside(&mut self, event: &PointerEvent) -> Outcome {
        if self.is_open() && !event.hits(self.targets.trigger) {
            return self.close(CloseOptions::default());
        }
        Outcome::default()
    }

    pub fn trigger_click(&mut self, event: &PointerEvent) {
        if self.disabled {
            return;
        }
        if event.hits(self.targets.clear_button) {
            return;
        }
        if !self.is_open() {
            self.open();
        }
    }

    pub fn input_activate(&mut self) {
        if !self.is_open() {
            self.open();
        }
    }

    pub fn input_deactivate(&mut self) -> Outcome {
        if self.disabled {
            return Outcome::default();
        }
        self.derive_input_state();
        self.close(CloseOptions::default())
    }

    pub fn input_focus(&mut self, event: &FocusEvent) {
        if self.disabled {
            return;
        }
        self.on_focus.call(event);
        self.value.form_item().trigger_focus();
    }

    /// The input lost focus. Focus moving into the panel is not a blur.
    pub fn input_blur(&mut self, event: &FocusEvent) -> Outcome {
        if event.related_target.is_some() && event.related_target == self.targets.panel {
            return Outcome::default();
        }
        self.on_blur.call(event);
        self.value.form_item().trigger_blur();
        self.derive_input_state();
        self.close(CloseOptions::default())
    }
}

impl fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("kind", &self.kind)
            .field("format", &self.format.pattern())
            .field("value", &self.value)
            .field("pending", &self.pending)
            .field("panel", &self.panel)
            .field("single_text", &self.single_text)
            .field("start_text", &self.start_text)
            .field("end_text", &self.end_text)
            .finish_non_exhaustive()
    }
}
