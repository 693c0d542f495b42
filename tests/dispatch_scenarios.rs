//! Dispatch engine scenarios over the real widget set.

use gallery::configurators::standard_registry;
use gallery::page::Control;
use gallery::widgets::date::DateField;
use gallery::widgets::grid::{GridCell, ItemGrid};
use gallery::widgets::number::{DecimalField, IntegerField};
use gallery::widgets::text::TextField;
use gallery::{compose_settings, CapabilityId, ConfiguratorRegistry};

fn plain_cell(item: &str, _row: usize, _column: usize) -> GridCell {
    GridCell {
        title: item.to_string(),
        detail: None,
        framed: false,
    }
}

#[test]
fn scenario_a_two_registrations_in_order() {
    let mut registry = ConfiguratorRegistry::new();
    registry
        .register(CapabilityId::HasValue, |_, sink| {
            sink.group(vec![Control::note("read-only toggle")])
        })
        .unwrap();
    registry
        .register(CapabilityId::HasLocale, |_, sink| {
            sink.group(vec![Control::note("locale combo")])
        })
        .unwrap();

    // An integer field satisfies both, through the capability graph.
    let mut field = IntegerField::new("n", 6);
    let parts = compose_settings(&mut field, &registry);
    let order: Vec<_> = parts.sections.iter().map(|s| s.capability).collect();
    assert_eq!(order, vec![CapabilityId::HasValue, CapabilityId::HasLocale]);
}

#[test]
fn scenario_b_unregistered_capability_is_silently_skipped() {
    let mut registry = ConfiguratorRegistry::new();
    registry
        .register(CapabilityId::CanSelectText, |_, sink| {
            sink.group(vec![Control::note("selection buttons")])
        })
        .unwrap();

    // A text field satisfies CanSelectText and HasValue; only the
    // former is registered.
    let mut field = TextField::new("t");
    let parts = compose_settings(&mut field, &registry);
    assert_eq!(parts.sections.len(), 1);
    assert_eq!(parts.sections[0].capability, CapabilityId::CanSelectText);
}

#[test]
fn order_is_deterministic_across_compositions() {
    let registry = standard_registry().unwrap();
    let mut field = DecimalField::new("d", 8, 4, 1);
    let first: Vec<_> = compose_settings(&mut field, &registry)
        .sections
        .iter()
        .map(|s| s.label())
        .collect();
    let second: Vec<_> = compose_settings(&mut field, &registry)
        .sections
        .iter()
        .map(|s| s.label())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn integer_field_gets_every_satisfied_registered_section_once() {
    let registry = standard_registry().unwrap();
    let mut field = IntegerField::new("n", 6);
    let parts = compose_settings(&mut field, &registry);
    let labels: Vec<_> = parts.sections.iter().map(|s| s.label()).collect();
    assert_eq!(
        labels,
        vec![
            "text selection",
            "value",
            "number field basics",
            "optional null value",
            "locale",
            "focus notification",
            "blur notification",
        ]
    );
}

#[test]
fn date_field_page_has_no_spurious_sections() {
    let registry = standard_registry().unwrap();
    let mut field = DateField::new("d", chrono::NaiveDate::from_ymd_opt(2020, 4, 7).unwrap());
    let parts = compose_settings(&mut field, &registry);
    let labels: Vec<_> = parts.sections.iter().map(|s| s.label()).collect();
    assert_eq!(
        labels,
        vec![
            "value",
            "locale",
            "date display pattern",
            "focus notification",
            "blur notification",
        ]
    );
}

#[test]
fn grid_sections_come_from_the_implication_graph() {
    let registry = standard_registry().unwrap();
    // ItemGrid declares only its own contract; value and the focus
    // notifications are reached through implications.
    let mut grid = ItemGrid::new("g", vec!["a".into(), "b".into()], plain_cell);
    let parts = compose_settings(&mut grid, &registry);
    let caps: Vec<_> = parts.sections.iter().map(|s| s.capability).collect();
    assert_eq!(
        caps,
        vec![
            CapabilityId::HasValue,
            CapabilityId::ItemGridContract,
            CapabilityId::FocusNotifier,
            CapabilityId::BlurNotifier,
        ]
    );
}

#[test]
fn no_capability_is_dispatched_twice() {
    let registry = standard_registry().unwrap();
    let mut field = IntegerField::new("n", 6);
    let parts = compose_settings(&mut field, &registry);
    let mut caps: Vec<_> = parts.sections.iter().map(|s| s.capability).collect();
    let before = caps.len();
    caps.dedup();
    assert_eq!(caps.len(), before);
}
