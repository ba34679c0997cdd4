//! Form integration hooks
//!
//! A widget placed inside a form item reports input, change, focus and blur
//! so the form can run its validation rules. Input and change are separate
//! hooks even when a widget fires them together.

use std::cell::RefCell;
use std::rc::Rc;

/// Which hook fired
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormTrigger {
    Input,
    Change,
    Focus,
    Blur,
}

/// Receiver for form hooks. All methods default to no-ops.
pub trait FormItem {
    fn trigger_input(&self) {}
    fn trigger_change(&self) {}
    fn trigger_focus(&self) {}
    fn trigger_blur(&self) {}
}

/// Used when a widget is not inside any form item
#[derive(Clone, Copy, Debug, Default)]
pub struct Detached;

impl FormItem for Detached {}

/// Records every hook in order
#[derive(Clone, Debug, Default)]
pub struct FormItemLog {
    events: Rc<RefCell<Vec<FormTrigger>>>,
}

impl FormItemLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FormTrigger> {
        self.events.borrow().clone()
    }

    pub fn count(&self, trigger: FormTrigger) -> usize {
        self.events.borrow().iter().filter(|t| **t == trigger).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn record(&self, trigger: FormTrigger) {
        self.events.borrow_mut().push(trigger);
    }
}

impl FormItem for FormItemLog {
    fn trigger_input(&self) {
        self.record(FormTrigger::Input);
    }

    fn trigger_change(&self) {
        self.record(FormTrigger::Change);
    }

    fn trigger_focus(&self) {
        self.record(FormTrigger::Focus);
    }

    fn trigger_blur(&self) {
        self.record(FormTrigger::Blur);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order() {
        let log = FormItemLog::new();
        let item: &dyn FormItem = &log;
        item.trigger_focus();
        item.trigger_input();
        item.trigger_change();
        item.trigger_blur();

        assert_eq!(
            log.events(),
            vec![
                FormTrigger::Focus,
                FormTrigger::Input,
                FormTrigger::Change,
                FormTrigger::Blur
            ]
        );
        assert_eq!(log.count(FormTrigger::Change), 1);
    }

    #[test]
    fn test_cloned_log_shares_events() {
        let log = FormItemLog::new();
        let other = log.clone();
        other.trigger_input();
        assert_eq!(log.count(FormTrigger::Input), 1);
        log.clear();
        assert!(other.events().is_empty());
    }
}
