use pretty_assertions::assert_eq;
use quire_cn::calendar::{DateTimeParts, MS_PER_DAY, MS_PER_SECOND};
use quire_cn::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const DE: &str = include_str!("../locales/de-DE.toml");

fn day(y: i64, m: u32, d: u32) -> i64 {
    DateTimeParts::date(y, m, d).to_timestamp().unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quire_cn=debug".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

fn picker(props: DatePickerProps) -> DatePicker {
    init_tracing();
    cn::date_picker(props.clock(|| 0)).unwrap()
}

#[test]
fn formatted_value_parses_back() {
    for kind in [PickerKind::Date, PickerKind::DateTime] {
        let p = picker(DatePickerProps::new().kind(kind));
        let precision = if kind == PickerKind::Date {
            MS_PER_DAY
        } else {
            MS_PER_SECOND
        };
        for v in (-1_000_000_000_000i64..3_000_000_000_000).step_by(123_456_789_011) {
            let truncated = v - v.rem_euclid(precision);
            let text = p.format_timestamp(v);
            assert_eq!(p.parse(&text), Some(truncated), "{kind:?} {text}");
        }
    }
}

#[test]
fn display_derivation_is_idempotent() {
    let value = DateValue::Range(day(2024, 3, 1), day(2024, 3, 31));
    let mut p = picker(
        DatePickerProps::new()
            .kind(PickerKind::DateRange)
            .default_value(value),
    );
    let first = (p.display_start_text().to_string(), p.display_end_text().to_string());
    p.open();
    p.input_deactivate();
    let second = (p.display_start_text().to_string(), p.display_end_text().to_string());
    assert_eq!(first, second);
}

#[test]
fn partial_range_is_rejected_as_typed() {
    let mut p = picker(DatePickerProps::new().kind(PickerKind::DateRange));
    let updates = Rc::new(RefCell::new(0));
    let u = updates.clone();
    p.on_update_value(move |_| *u.borrow_mut() += 1);

    p.update_range_text("2024-01-01", "");
    assert_eq!(p.value(), None);
    assert_eq!(p.display_start_text(), "2024-01-01");
    assert_eq!(p.display_end_text(), "");
    assert!(p.is_invalid());
    assert_eq!(*updates.borrow(), 0);
}

#[test]
fn empty_single_text_clears() {
    let mut p = picker(DatePickerProps::new().default_value(DateValue::Single(day(2020, 5, 5))));
    let updates = Rc::new(RefCell::new(Vec::new()));
    let u = updates.clone();
    p.on_update_value(move |v| u.borrow_mut().push(*v));

    p.update_single_text("");
    assert_eq!(p.value(), None);
    assert_eq!(p.display_text(), "");
    assert_eq!(&*updates.borrow(), &[None]);
}

#[test]
fn empty_text_clears_after_rejected_input() {
    let mut single = picker(DatePickerProps::new());
    single.update_single_text("2");
    single.update_single_text("");
    assert_eq!(single.value(), None);
    assert_eq!(single.display_text(), "");
    assert!(!single.is_invalid());

    let mut range = picker(DatePickerProps::new().kind(PickerKind::DateRange));
    range.update_range_text("2024-01-01", "");
    range.update_range_text("", "");
    assert_eq!(range.value(), None);
    assert_eq!(range.display_start_text(), "");
    assert_eq!(range.display_end_text(), "");
    assert!(!range.is_invalid());
}

#[test]
fn escape_restores_pre_edit_text() {
    let original = DateValue::Range(day(2024, 1, 1), day(2024, 1, 7));
    let mut p = picker(
        DatePickerProps::new()
            .kind(PickerKind::DateTimeRange)
            .default_value(original),
    );
    let before = (p.display_start_text().to_string(), p.display_end_text().to_string());

    p.trigger_click(&PointerEvent::default());
    p.panel_update_value(Some(DateValue::Range(day(2025, 1, 1), day(2025, 2, 1))), false);
    assert_ne!(p.display_start_text(), before.0);

    let outcome = p.key_down(&KeyEvent::new(KeyCode::Escape));
    assert!(outcome.closed);
    assert_eq!(
        (p.display_start_text().to_string(), p.display_end_text().to_string()),
        before
    );
    assert_eq!(p.value(), Some(original));
    assert_eq!(p.panel_state(), PanelState::Closed);
}

#[test]
fn custom_format_with_locale_pack() {
    let mut registry = LocaleRegistry::new();
    registry.load_toml(DE).unwrap();
    let de = registry.resolve("de_DE");

    let mut p = DatePicker::with_locale(
        DatePickerProps::new()
            .kind(PickerKind::DateTime)
            .format("d. MMMM yyyy, hh:mm a")
            .clock(|| 0),
        de,
    )
    .unwrap();
    assert_eq!(p.placeholder(), "Datum und Uhrzeit auswählen");

    p.update_single_text("3. März 2024, 02:30 nachm.");
    let expected = DateTimeParts::date(2024, 3, 3)
        .with_time(14, 30, 0)
        .to_timestamp()
        .unwrap();
    assert_eq!(p.value(), Some(DateValue::Single(expected)));
    assert_eq!(p.display_text(), "3. März 2024, 02:30 nachm.");
}

#[test]
fn form_item_sees_every_commit() {
    let form = quire_core::FormItemLog::new();
    let mut p = picker(DatePickerProps::new());
    p.set_form_item(Rc::new(form.clone()));
    p.update_single_text("2024-01-01");
    p.update_single_text("2024-01-01");
    assert_eq!(form.count(quire_core::FormTrigger::Change), 2);
    assert_eq!(form.count(quire_core::FormTrigger::Input), 2);
}
