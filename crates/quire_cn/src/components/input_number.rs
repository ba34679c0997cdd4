//! Input number component state
//!
//! A text field holding a number, with step buttons and keyboard stepping.
//! The field text is kept separate from the committed value: typing a
//! parseable number commits it right away, anything else is left as typed and
//! flagged invalid until the next blur restores the committed value.
//!
//! # Example
//!
//! ```
//! use quire_cn::prelude::*;
//!
//! let mut input = cn::input_number(
//!     InputNumberProps::new()
//!         .default_value(9.0)
//!         .min(0.0)
//!         .max(10.0)
//!         .step(5.0),
//! );
//!
//! assert!(input.addable());
//! input.add();
//! assert_eq!(input.value(), Some(10.0));
//! assert_eq!(input.display(), "10");
//! assert!(!input.addable());
//! ```

use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

use quire_core::{
    Callbacks, CommitPolicy, FocusEvent, FormItem, KeyCode, KeyEvent, Machine, PointerEvent,
    StateTransitions, TargetId, ValueStore,
};

use crate::error::ConfigError;
use crate::locale::{InputNumberLocale, Locale};
use crate::number::{format_number, parse_number_text, NumberLike, ParsedNumber};

/// Extra check a value must pass after clamping
pub type Validator = Rc<dyn Fn(f64) -> bool>;

/// Input number configuration
///
/// Loadable from TOML; min, max and step take numbers or numeric text:
///
/// ```toml
/// default_value = 3
/// min = 0
/// max = "10"
/// step = 0.5
/// ```
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputNumberProps {
    pub default_value: Option<f64>,
    pub step: NumberLike,
    pub min: Option<NumberLike>,
    pub max: Option<NumberLike>,
    pub disabled: bool,
    pub placeholder: Option<String>,
    pub show_button: bool,
    #[serde(skip)]
    pub validator: Option<Validator>,
}

impl Default for InputNumberProps {
    fn default() -> Self {
        Self {
            default_value: None,
            step: NumberLike::Number(1.0),
            min: None,
            max: None,
            disabled: false,
            placeholder: None,
            show_button: true,
            validator: None,
        }
    }
}

impl InputNumberProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse props from TOML, checking that the bounds are numbers and ordered
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let props: Self = toml::from_str(src)?;
        props.validate()?;
        Ok(props)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = checked_bound("min", self.min.as_ref())?;
        let max = checked_bound("max", self.max.as_ref())?;
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(ConfigError::InvalidBounds { min, max });
            }
        }
        Ok(())
    }

    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn step(mut self, step: impl Into<NumberLike>) -> Self {
        self.step = step.into();
        self
    }

    pub fn min(mut self, min: impl Into<NumberLike>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<NumberLike>) -> Self {
        self.max = Some(max.into());
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

    pub fn show_button(mut self, show: bool) -> Self {
        self.show_button = show;
        self
    }

    pub fn validator(mut self, validator: impl Fn(f64) -> bool + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }
}

impl fmt::Debug for InputNumberProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputNumberProps")
            .field("default_value", &self.default_value)
            .field("step", &self.step)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("disabled", &self.disabled)
            .field("placeholder", &self.placeholder)
            .field("show_button", &self.show_button)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Read an optional bound, failing on text that is not a number
fn checked_bound(
    field: &'static str,
    bound: Option<&NumberLike>,
) -> Result<Option<f64>, ConfigError> {
    match bound {
        None => Ok(None),
        Some(value) => value
            .to_f64()
            .map(Some)
            .ok_or_else(|| ConfigError::NotANumber {
                field,
                value: value.to_string(),
            }),
    }
}

/// Outcome of reading the field text as a value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Derived {
    /// The field is blank; the value is unset
    Null,
    /// A number within bounds that passed the validator
    Value(f64),
    /// Unparseable, out of bounds (dry run) or declined by the validator
    Rejected,
}

impl Derived {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Derived::Rejected)
    }
}

/// Whether the text field has the editing focus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Inactive,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditEvent {
    Activate,
    Deactivate,
}

impl StateTransitions<EditEvent> for EditState {
    fn on_event(&self, event: EditEvent) -> Option<Self> {
        match (self, event) {
            (EditState::Inactive, EditEvent::Activate) => Some(EditState::Active),
            (EditState::Active, EditEvent::Deactivate) => Some(EditState::Inactive),
            _ => None,
        }
    }
}

/// Host element ids the component hit-tests events against
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputNumberTargets {
    /// The field wrapper; key and blur events on it mean the field is not active
    pub wrapper: Option<TargetId>,
    pub add_button: Option<TargetId>,
    pub minus_button: Option<TargetId>,
}

/// What the host should do with a pointer-down event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    /// Suppress the default action so the text field keeps focus
    pub prevent_default: bool,
}

/// Numeric stepper state
pub struct InputNumber {
    value: ValueStore<Option<f64>>,
    display: String,
    step: f64,
    min: Option<f64>,
    max: Option<f64>,
    validator: Option<Validator>,
    disabled: bool,
    placeholder: String,
    show_button: bool,
    targets: InputNumberTargets,
    edit: Machine<EditState>,
    on_focus: Callbacks<FocusEvent>,
    on_blur: Callbacks<FocusEvent>,
}

impl InputNumber {
    pub fn new(props: InputNumberProps) -> Self {
        Self::with_locale(props, &Locale::en_us().input_number)
    }

    pub fn with_locale(props: InputNumberProps, locale: &InputNumberLocale) -> Self {
        let step = match props.step.to_f64() {
            Some(step) if step != 0.0 => step.abs(),
            _ => 1.0,
        };
        let mut input = Self {
            value: ValueStore::new(props.default_value, CommitPolicy::SkipUnchanged),
            display: String::new(),
            step,
            min: props.min.as_ref().and_then(NumberLike::to_f64),
            max: props.max.as_ref().and_then(NumberLike::to_f64),
            validator: props.validator,
            disabled: props.disabled,
            placeholder: props
                .placeholder
                .unwrap_or_else(|| locale.placeholder.clone()),
            show_button: props.show_button,
            targets: InputNumberTargets::default(),
            edit: Machine::new(EditState::Inactive),
            on_focus: Callbacks::new(),
            on_blur: Callbacks::new(),
        };
        input.derive_display();
        input
    }

    pub fn with_targets(mut self, targets: InputNumberTargets) -> Self {
        self.targets = targets;
        self
    }

    // ------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------

    pub fn on_update_value(&mut self, handler: impl Fn(&Option<f64>) + 'static) {
        self.value.on_update_value(handler);
    }

    /// Deprecated alias of [`Self::on_update_value`]
    pub fn on_change(&mut self, handler: impl Fn(&Option<f64>) + 'static) {
        self.value.on_change(handler);
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
    pub fn set_value(&mut self, value: Option<Option<f64>>) {
        let before = *self.value.merged();
        self.value.set_controlled(value);
        if *self.value.merged() != before {
            self.derive_display();
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    /// The committed value
    pub fn value(&self) -> Option<f64> {
        *self.value.merged()
    }

    /// The field text
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Check if the component ignores edits and stepping
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn show_button(&self) -> bool {
        self.show_button
    }

    /// Check if the field is being edited
    pub fn is_active(&self) -> bool {
        self.edit.is_in(EditState::Active)
    }

    /// The field text does not stand for an acceptable value
    pub fn is_invalid(&self) -> bool {
        self.dry_run(0.0).is_rejected()
    }

    /// Stepping up would be accepted
    pub fn addable(&self) -> bool {
        self.steppable(self.step)
    }

    /// Stepping down would be accepted
    pub fn minusable(&self) -> bool {
        self.steppable(-self.step)
    }

    pub fn add_button_disabled(&self) -> bool {
        self.disabled || !self.addable()
    }

    pub fn minus_button_disabled(&self) -> bool {
        self.disabled || !self.minusable()
    }

    fn steppable(&self, offset: f64) -> bool {
        // A validator may reject whatever value stepping from nothing produces
        if self.validator.is_some() && self.value().is_none() {
            return false;
        }
        let ok = !self.dry_run(offset).is_rejected();
        tracing::trace!(offset, ok, "step availability");
        ok
    }

    /// Value stepping from nothing starts at
    ///
    /// Zero moved inside the bounds. `None` when a validator is set, since
    /// there is no value known to satisfy it.
    pub fn create_valid_value(&self) -> Option<f64> {
        if self.validator.is_some() {
            return None;
        }
        Some(match (self.min, self.max) {
            (Some(min), _) => min.max(0.0),
            (None, Some(max)) => max.min(0.0),
            (None, None) => 0.0,
        })
    }

    // ------------------------------------------------------------------
    // Reconciliation
    // ------------------------------------------------------------------

    /// Re-derive the field text from the committed value
    pub fn derive_display(&mut self) {
        self.display = self.value().map(format_number).unwrap_or_default();
    }

    /// Read the field text as a value, moved by `offset`
    ///
    /// When committing, results past a bound are clamped to it. A dry run
    /// rejects text past a bound and steps that clamping would not move,
    /// which is what disables the step buttons at the bounds. Blank text
    /// commits `None`.
    pub fn derive_value_from_display(&mut self, offset: f64, commit: bool) -> Derived {
        let derived = self.evaluate(offset, commit);
        if commit {
            match derived {
                Derived::Null => self.commit(None),
                Derived::Value(v) => self.commit(Some(v)),
                Derived::Rejected => {
                    tracing::debug!(text = %self.display, offset, "edit rejected");
                }
            }
        }
        derived
    }

    fn dry_run(&self, offset: f64) -> Derived {
        self.evaluate(offset, false)
    }

    fn evaluate(&self, offset: f64, clamp: bool) -> Derived {
        let current = match parse_number_text(&self.display) {
            ParsedNumber::Empty => return Derived::Null,
            ParsedNumber::Invalid => return Derived::Rejected,
            ParsedNumber::Number(n) => n,
        };
        let target = current + offset;
        if !target.is_finite() {
            return Derived::Rejected;
        }

        let mut next = target;
        if let Some(max) = self.max {
            next = next.min(max);
        }
        if let Some(min) = self.min {
            next = next.max(min);
        }

        if !clamp {
            let moved = if offset > 0.0 {
                next > current
            } else if offset < 0.0 {
                next < current
            } else {
                next == target
            };
            if !moved {
                return Derived::Rejected;
            }
        }

        if let Some(validator) = &self.validator {
            if !validator(next) {
                return Derived::Rejected;
            }
        }
        Derived::Value(next)
    }

    fn commit(&mut self, value: Option<f64>) {
        let before = self.value();
        self.value.commit(value);
        if self.value() != before {
            self.derive_display();
        }
    }

    // ------------------------------------------------------------------
    // Interaction
    // ------------------------------------------------------------------

    /// The user edited the field text
    pub fn update_display(&mut self, text: impl Into<String>) {
        if self.disabled {
            return;
        }
        self.display = text.into();
        self.derive_value_from_display(0.0, true);
    }

    /// Step up. Returns whether a step was taken.
    pub fn add(&mut self) -> bool {
        self.step_by(self.step)
    }

    /// Step down. Returns whether a step was taken.
    pub fn minus(&mut self) -> bool {
        self.step_by(-self.step)
    }

    fn step_by(&mut self, offset: f64) -> bool {
        if self.disabled || !self.steppable(offset) {
            return false;
        }
        if self.value().is_none() {
            match self.create_valid_value() {
                Some(start) => self.commit(Some(start)),
                None => return false,
            }
            return true;
        }
        !self.derive_value_from_display(offset, true).is_rejected()
    }

    pub fn focus(&mut self, event: &FocusEvent) {
        self.on_focus.call(event);
        self.value.form_item().trigger_focus();
    }

    /// The field lost focus
    ///
    /// Commits the field text. Whatever is left afterwards is replaced by the
    /// canonical text of the committed value.
    pub fn blur(&mut self, event: &FocusEvent) {
        if event.target.is_some() && event.target == self.targets.wrapper {
            return;
        }
        match self.derive_value_from_display(0.0, true) {
            Derived::Rejected => self.derive_display(),
            Derived::Null => {
                if self.value().is_none() {
                    self.derive_display();
                }
            }
            Derived::Value(v) => {
                if self.value() == Some(v) {
                    self.derive_display();
                }
            }
        }
        self.edit.send(EditEvent::Deactivate);
        self.on_blur.call(event);
        self.value.form_item().trigger_blur();
    }

    /// Returns whether the key was handled
    ///
    /// Keys held with Ctrl, Alt or Meta belong to host shortcuts and are not
    /// handled.
    pub fn key_down(&mut self, event: &KeyEvent) -> bool {
        if self.disabled || event.modifiers.is_shortcut() {
            return false;
        }
        match event.key {
            KeyCode::Enter => {
                if event.target.is_some() && event.target == self.targets.wrapper {
                    return false;
                }
                if !self.derive_value_from_display(0.0, true).is_rejected() {
                    self.edit.send(EditEvent::Deactivate);
                }
                true
            }
            KeyCode::ArrowUp => {
                if !self.derive_value_from_display(0.0, true).is_rejected() {
                    self.add();
                }
                true
            }
            KeyCode::ArrowDown => {
                if !self.derive_value_from_display(0.0, true).is_rejected() {
                    self.minus();
                }
                true
            }
            _ => false,
        }
    }

    /// Pointer pressed anywhere on the component
    pub fn pointer_down(&mut self, event: &PointerEvent) -> PointerOutcome {
        let on_button =
            event.hits(self.targets.add_button) || event.hits(self.targets.minus_button);
        if !self.disabled {
            self.edit.send(EditEvent::Activate);
        }
        PointerOutcome {
            prevent_default: on_button,
        }
    }

    /// The field became the editing target
    pub fn activate(&mut self) {
        if !self.disabled {
            self.edit.send(EditEvent::Activate);
        }
    }

    pub fn deactivate(&mut self) {
        self.edit.send(EditEvent::Deactivate);
    }
}

impl fmt::Debug for InputNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputNumber")
            .field("value", &self.value)
            .field("display", &self.display)
            .field("step", &self.step)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("edit", &self.edit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::{FormItemLog, FormTrigger, Modifiers};
    use std::cell::RefCell;

    fn bounded(value: f64) -> InputNumber {
        InputNumber::new(
            InputNumberProps::new()
                .default_value(value)
                .min(0.0)
                .max(10.0)
                .step(5.0),
        )
    }

    fn record(input: &mut InputNumber) -> Rc<RefCell<Vec<Option<f64>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        input.on_update_value(move |v| l.borrow_mut().push(*v));
        log
    }

    #[test]
    fn test_initial_display() {
        assert_eq!(bounded(9.0).display(), "9");
        let empty = InputNumber::new(InputNumberProps::new());
        assert_eq!(empty.display(), "");
        assert_eq!(empty.placeholder(), "Please Input");
    }

    #[test]
    fn test_step_falls_back_to_one() {
        assert_eq!(InputNumber::new(InputNumberProps::new().step(0.0)).step(), 1.0);
        assert_eq!(InputNumber::new(InputNumberProps::new().step("x")).step(), 1.0);
        assert_eq!(InputNumber::new(InputNumberProps::new().step(-2.0)).step(), 2.0);
        assert_eq!(InputNumber::new(InputNumberProps::new().step("0.5")).step(), 0.5);
    }

    #[test]
    fn test_bounds_clamp_then_disable() {
        let mut input = bounded(9.0);
        assert!(input.addable());
        assert!(input.add());
        assert_eq!(input.value(), Some(10.0));
        assert_eq!(input.display(), "10");
        assert!(!input.addable());
        assert!(!input.add());
        assert!(input.minusable());
    }

    #[test]
    fn test_typed_out_of_range_is_clamped_on_commit() {
        let mut input = bounded(1.0);
        input.update_display("42");
        assert_eq!(input.value(), Some(10.0));
        assert_eq!(input.display(), "10");
    }

    #[test]
    fn test_invalid_text_kept_as_typed() {
        let mut input = bounded(3.0);
        let log = record(&mut input);
        input.update_display("3x");
        assert_eq!(input.display(), "3x");
        assert_eq!(input.value(), Some(3.0));
        assert!(input.is_invalid());
        assert!(!input.addable());
        assert!(!input.minusable());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_empty_text_clears() {
        let mut input = bounded(3.0);
        let log = record(&mut input);
        input.update_display("");
        assert_eq!(input.value(), None);
        assert_eq!(input.display(), "");
        assert_eq!(&*log.borrow(), &[None]);
        assert!(!input.is_invalid());
    }

    #[test]
    fn test_step_from_nothing() {
        let mut input = InputNumber::new(InputNumberProps::new().min(3.0));
        assert!(input.addable());
        assert!(input.add());
        assert_eq!(input.value(), Some(3.0));

        let mut input = InputNumber::new(InputNumberProps::new().max(-4.0));
        assert!(input.minus());
        assert_eq!(input.value(), Some(-4.0));

        let mut input = InputNumber::new(InputNumberProps::new());
        assert!(input.add());
        assert_eq!(input.value(), Some(0.0));
    }

    #[test]
    fn test_validator_blocks_stepping_from_nothing() {
        let input = InputNumber::new(InputNumberProps::new().validator(|v| v >= 0.0));
        assert_eq!(input.create_valid_value(), None);
        assert!(!input.addable());
        assert!(!input.minusable());
    }

    #[test]
    fn test_validator_rejects_clamped_value() {
        // Odd values only; max 10 would be the clamped result
        let mut input = InputNumber::new(
            InputNumberProps::new()
                .default_value(9.0)
                .max(10.0)
                .step(2.0)
                .validator(|v| v as i64 % 2 == 1),
        );
        let log = record(&mut input);
        input.update_display("12");
        assert_eq!(input.value(), Some(9.0));
        assert_eq!(input.display(), "12");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unchanged_commit_is_silent() {
        let mut input = bounded(5.0);
        let log = record(&mut input);
        input.update_display("5.0");
        assert!(log.borrow().is_empty());
        // Not re-derived: the user is still typing
        assert_eq!(input.display(), "5.0");
    }

    #[test]
    fn test_blur_canonicalizes_text() {
        let mut input = bounded(5.0);
        input.update_display("5.0");
        input.blur(&FocusEvent::new());
        assert_eq!(input.display(), "5");

        input.update_display("oops");
        input.blur(&FocusEvent::new());
        assert_eq!(input.display(), "5");
    }

    #[test]
    fn test_blur_on_wrapper_is_ignored() {
        let wrapper = TargetId(1);
        let mut input = bounded(5.0).with_targets(InputNumberTargets {
            wrapper: Some(wrapper),
            ..Default::default()
        });
        let blurs = Rc::new(RefCell::new(0));
        let b = blurs.clone();
        input.on_blur(move |_| *b.borrow_mut() += 1);
        input.update_display("oops");
        input.blur(&FocusEvent::new().with_target(wrapper));
        assert_eq!(input.display(), "oops");
        assert_eq!(*blurs.borrow(), 0);
        input.blur(&FocusEvent::new());
        assert_eq!(*blurs.borrow(), 1);
    }

    #[test]
    fn test_keyboard() {
        let mut input = bounded(0.0);
        input.activate();
        assert!(input.key_down(&KeyEvent::new(KeyCode::ArrowUp)));
        assert_eq!(input.value(), Some(5.0));
        input.key_down(&KeyEvent::new(KeyCode::ArrowDown));
        assert_eq!(input.value(), Some(0.0));

        input.update_display("abc");
        input.key_down(&KeyEvent::new(KeyCode::ArrowUp));
        assert_eq!(input.value(), Some(0.0));
        input.key_down(&KeyEvent::new(KeyCode::Enter));
        assert!(input.is_active());

        input.update_display("7");
        input.key_down(&KeyEvent::new(KeyCode::Enter));
        assert_eq!(input.value(), Some(7.0));
        assert!(!input.is_active());
        assert!(!input.key_down(&KeyEvent::new(KeyCode::Tab)));
    }

    #[test]
    fn test_shortcut_keys_are_left_to_host() {
        let mut input = bounded(0.0);
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert!(!input.key_down(&KeyEvent::new(KeyCode::ArrowUp).with_modifiers(ctrl)));
        assert_eq!(input.value(), Some(0.0));

        let shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert!(input.key_down(&KeyEvent::new(KeyCode::ArrowUp).with_modifiers(shift)));
        assert_eq!(input.value(), Some(5.0));
    }

    #[test]
    fn test_arrow_commits_typed_text_first() {
        let mut input = bounded(0.0);
        input.update_display("2");
        input.key_down(&KeyEvent::new(KeyCode::ArrowUp));
        assert_eq!(input.value(), Some(7.0));
    }

    #[test]
    fn test_pointer_down_on_buttons() {
        let add = TargetId(2);
        let minus = TargetId(3);
        let mut input = bounded(0.0).with_targets(InputNumberTargets {
            wrapper: None,
            add_button: Some(add),
            minus_button: Some(minus),
        });
        assert!(input.pointer_down(&PointerEvent::at(add)).prevent_default);
        assert!(input.pointer_down(&PointerEvent::at(minus)).prevent_default);
        assert!(!input.pointer_down(&PointerEvent::at(TargetId(9))).prevent_default);
        assert!(input.is_active());
    }

    #[test]
    fn test_controlled_value() {
        let mut input = bounded(1.0);
        let log = record(&mut input);
        input.set_value(Some(Some(4.0)));
        assert_eq!(input.display(), "4");

        input.add();
        // Host did not accept the change
        assert_eq!(&*log.borrow(), &[Some(9.0)]);
        assert_eq!(input.value(), Some(4.0));

        input.set_value(Some(Some(9.0)));
        assert_eq!(input.display(), "9");
    }

    #[test]
    fn test_form_hooks() {
        let form = FormItemLog::new();
        let mut input = bounded(1.0);
        input.set_form_item(Rc::new(form.clone()));
        input.focus(&FocusEvent::new());
        input.update_display("2");
        input.blur(&FocusEvent::new());
        assert_eq!(
            form.events(),
            vec![
                FormTrigger::Focus,
                FormTrigger::Input,
                FormTrigger::Change,
                FormTrigger::Blur
            ]
        );
    }

    #[test]
    fn test_disabled_ignores_interaction() {
        let mut input = InputNumber::new(InputNumberProps::new().default_value(1.0).disabled(true));
        assert!(!input.add());
        input.update_display("5");
        assert_eq!(input.value(), Some(1.0));
        assert!(input.add_button_disabled());
    }

    #[test]
    fn test_props_from_toml() {
        let props = InputNumberProps::from_toml_str(
            r#"
            default_value = 3
            min = 0
            max = "10"
            step = 0.5
            placeholder = "Amount"
            "#,
        )
        .unwrap();
        let input = InputNumber::new(props);
        assert_eq!(input.value(), Some(3.0));
        assert_eq!(input.max(), Some(10.0));
        assert_eq!(input.step(), 0.5);
        assert_eq!(input.placeholder(), "Amount");

        assert!(matches!(
            InputNumberProps::from_toml_str("min = 5\nmax = 1"),
            Err(ConfigError::InvalidBounds { .. })
        ));
        assert!(matches!(
            InputNumberProps::from_toml_str("max = \"ten\""),
            Err(ConfigError::NotANumber { field: "max", .. })
        ));
        assert!(matches!(
            InputNumberProps::from_toml_str("colour = 1"),
            Err(ConfigError::Toml(_))
        ));
    }
}
