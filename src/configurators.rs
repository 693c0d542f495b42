//! # Configurator Catalog
//!
//! One builder per configurable capability, plus the standard
//! registrations: the configurator registry (whose order decides the
//! section order on every page), the after-locale-change side effects,
//! and the demonstrated widget set.
//!
//! Builders receive the widget through [`DemoWidget`] only. Access to a
//! capability goes through [`require`], which panics if the declared
//! capability set promised something the widget does not provide; that
//! mismatch is a programming error in the widget tables, not a runtime
//! condition to recover from.

use chrono::Local;

use crate::capability::{satisfies, CapabilityId};
use crate::gallery::Gallery;
use crate::locale;
use crate::page::{Control, ControlInput, Reaction, ReadoutUpdate, SectionSink};
use crate::registry::{ConfiguratorRegistry, SetupError, SideEffectRegistry};
use crate::widgets::date::{DateField, DatePattern, DateTimeField};
use crate::widgets::grid::{GridCell, ItemGrid};
use crate::widgets::number::{DecimalField, IntegerField};
use crate::widgets::tabs::{TabContentStyle, TabStrip};
use crate::widgets::text::{TextArea, TextField};
use crate::widgets::traits::{
    CanSelectText, HasDatePattern, HasLocale, HasValue, ItemGridOps, NullValueAllowed,
    NumberFieldBase, TabStripOps, TerminalSelectionSource, UnloadGuardOps,
};
use crate::widgets::unload::UnloadGuard;
use crate::widgets::{DemoWidget, EventKind, FieldEvent};

/// Unwraps a capability accessor, failing loudly on a mismatch between
/// the declared capability set and the accessors.
fn require<T>(value: Option<T>, widget: &'static str, capability: CapabilityId) -> T {
    match value {
        Some(v) => v,
        None => panic!("{widget} was dispatched for {capability:?} but does not provide it"),
    }
}

fn selection_readout(event: &FieldEvent) -> Option<ReadoutUpdate> {
    match event {
        FieldEvent::TextSelected(text) => Some(ReadoutUpdate::Set(format!("<{text}>"))),
        _ => None,
    }
}

fn attempt_counter(event: &FieldEvent) -> Option<ReadoutUpdate> {
    match event {
        FieldEvent::ExitAttempted { .. } => Some(ReadoutUpdate::Bump),
        _ => None,
    }
}

fn value_changed_toast(event: &FieldEvent, name: &str) -> Option<String> {
    match event {
        FieldEvent::ValueChanged(value) => Some(format!("{name} changed value to {value}")),
        _ => None,
    }
}

fn focus_toast(event: &FieldEvent, name: &str) -> Option<String> {
    match event {
        FieldEvent::Focused => Some(format!("{name} received focus.")),
        _ => None,
    }
}

fn blur_toast(event: &FieldEvent, name: &str) -> Option<String> {
    match event {
        FieldEvent::Blurred => Some(format!("{name} lost focus.")),
        _ => None,
    }
}

fn build_can_select_text(widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    let name = widget.type_name();
    sink.group(vec![
        Control::note("Type something in the field, then use the buttons:"),
        Control::button("Select all", |w, _, _| {
            let name = w.type_name();
            require(w.as_select_text(), name, CapabilityId::CanSelectText).select_all();
        }),
        Control::button("Select none", |w, _, _| {
            let name = w.type_name();
            require(w.as_select_text(), name, CapabilityId::CanSelectText).select_none();
        }),
    ]);

    // Conditional extras depend on the instance's further capabilities,
    // which is this configurator's business, not the dispatch engine's.
    if satisfies(widget.capabilities(), CapabilityId::TerminalSelectionSource) {
        let enabled = require(
            widget.as_terminal_selection(),
            name,
            CapabilityId::TerminalSelectionSource,
        )
        .terminal_selection();
        sink.group(vec![Control::checkbox(
            "Allow selection initiated from the keyboard (Ctrl-A)?",
            enabled,
            |w, input, _| {
                if let ControlInput::Toggled(value) = input {
                    let name = w.type_name();
                    require(
                        w.as_terminal_selection(),
                        name,
                        CapabilityId::TerminalSelectionSource,
                    )
                    .set_terminal_selection(value);
                }
            },
        )]);
    }
    if satisfies(widget.capabilities(), CapabilityId::TextSelectionNotifier) {
        let (readout, id) = sink.readout("Most recently selected text", "<>");
        sink.group(vec![readout]);
        sink.listen(
            EventKind::TextSelected,
            Reaction::Readout {
                id,
                update: selection_readout,
            },
        );
    }
}

fn build_has_value(widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    let name = widget.type_name();
    let read_only = require(widget.as_has_value(), name, CapabilityId::HasValue).read_only();
    sink.group(vec![Control::checkbox(
        "Mark the field as read only?",
        read_only,
        |w, input, _| {
            if let ControlInput::Toggled(value) = input {
                let name = w.type_name();
                require(w.as_has_value(), name, CapabilityId::HasValue).set_read_only(value);
            }
        },
    )]);
    sink.listen(EventKind::ValueChanged, Reaction::Notify(value_changed_toast));
}

fn build_number_base(widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    let name = widget.type_name();
    let base = require(widget.as_number_base(), name, CapabilityId::NumberFieldBase);
    let autoselect = base.autoselect();
    let grouping_hidden = base.grouping_hidden_on_focus();
    let prefix = base.has_prefix();
    let suffix = base.has_suffix();
    let align_right = base.align_right();
    sink.group(vec![
        Control::checkbox("Select automatically on focus?", autoselect, |w, input, _| {
            if let ControlInput::Toggled(value) = input {
                let name = w.type_name();
                require(w.as_number_base(), name, CapabilityId::NumberFieldBase)
                    .set_autoselect(value);
            }
        }),
        Control::checkbox(
            "Hide grouping separator on focus?",
            grouping_hidden,
            |w, input, _| {
                if let ControlInput::Toggled(value) = input {
                    let name = w.type_name();
                    require(w.as_number_base(), name, CapabilityId::NumberFieldBase)
                        .set_grouping_hidden_on_focus(value);
                }
            },
        ),
        Control::checkbox("Show prefix marker?", prefix, |w, input, _| {
            if let ControlInput::Toggled(value) = input {
                let name = w.type_name();
                require(w.as_number_base(), name, CapabilityId::NumberFieldBase)
                    .set_prefix(if value { Some(">") } else { None });
            }
        }),
        Control::checkbox("Show suffix marker?", suffix, |w, input, _| {
            if let ControlInput::Toggled(value) = input {
                let name = w.type_name();
                require(w.as_number_base(), name, CapabilityId::NumberFieldBase)
                    .set_suffix(if value { Some("€") } else { None });
            }
        }),
        Control::checkbox("Align text to the right?", align_right, |w, input, _| {
            if let ControlInput::Toggled(value) = input {
                let name = w.type_name();
                require(w.as_number_base(), name, CapabilityId::NumberFieldBase)
                    .set_align_right(value);
            }
        }),
    ]);
}

fn build_null_value_allowed(widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    let name = widget.type_name();
    let allowed = require(widget.as_nullable(), name, CapabilityId::NullValueAllowed)
        .null_value_allowed();
    sink.group(vec![Control::checkbox(
        "Allow empty value as null?",
        allowed,
        |w, input, _| {
            if let ControlInput::Toggled(value) = input {
                let name = w.type_name();
                require(w.as_nullable(), name, CapabilityId::NullValueAllowed)
                    .set_null_value_allowed(value);
            }
        },
    )]);
}

fn build_has_locale(_widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    let labels = locale::CHOICES
        .iter()
        .map(|l| l.display_label())
        .collect::<Vec<_>>();
    sink.group(vec![Control::select(
        "Select locale",
        labels,
        None,
        |w, input, cx| {
            if let ControlInput::Chosen(index) = input {
                let chosen = locale::CHOICES[index];
                let name = w.type_name();
                require(w.as_has_locale(), name, CapabilityId::HasLocale).set_locale(chosen);
                tracing::info!(widget = name, locale = chosen.code, "locale changed");
                // Follow-ups that the generic locale contract cannot
                // know about, keyed by the exact widget type.
                cx.side_effects.run_for(w);
            }
        },
    )]);
}

/// Plain one-line cell.
fn plain_cell(item: &str, _row: usize, _column: usize) -> GridCell {
    GridCell {
        title: item.to_string(),
        detail: None,
        framed: false,
    }
}

/// Framed cell with a position line underneath.
fn framed_cell(item: &str, row: usize, column: usize) -> GridCell {
    GridCell {
        title: item.to_string(),
        detail: Some(format!("Row: {row}. Column: {column}.")),
        framed: true,
    }
}

fn build_item_grid(widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    let name = widget.type_name();
    let columns = require(widget.as_item_grid(), name, CapabilityId::ItemGridContract)
        .column_count();
    let options = (1..=6).map(|n| n.to_string()).collect::<Vec<_>>();
    sink.group(vec![Control::select(
        "Number of columns",
        options,
        Some(columns.saturating_sub(1)),
        |w, input, _| {
            if let ControlInput::Chosen(index) = input {
                let name = w.type_name();
                require(w.as_item_grid(), name, CapabilityId::ItemGridContract)
                    .set_column_count(index + 1);
            }
        },
    )]);
    sink.group(vec![Control::checkbox(
        "Display framed cells?",
        false,
        |w, input, _| {
            if let ControlInput::Toggled(value) = input {
                let name = w.type_name();
                require(w.as_item_grid(), name, CapabilityId::ItemGridContract)
                    .set_cell_generator(if value { framed_cell } else { plain_cell });
            }
        },
    )]);
}

fn build_has_date_pattern(widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    let name = widget.type_name();
    let current = require(widget.as_date_pattern(), name, CapabilityId::HasDatePattern)
        .date_pattern();
    let options = DatePattern::CHOICES
        .iter()
        .map(|p| p.label().to_string())
        .collect::<Vec<_>>();
    let selected = current.and_then(|p| DatePattern::CHOICES.iter().position(|c| *c == p));
    sink.group(vec![Control::select(
        "Select date display pattern",
        options,
        selected,
        |w, input, _| {
            if let ControlInput::Chosen(index) = input {
                let name = w.type_name();
                require(w.as_date_pattern(), name, CapabilityId::HasDatePattern)
                    .set_date_pattern(Some(DatePattern::CHOICES[index]));
            }
        },
    )]);
    sink.group(vec![Control::button("Clear pattern", |w, _, _| {
        let name = w.type_name();
        require(w.as_date_pattern(), name, CapabilityId::HasDatePattern).set_date_pattern(None);
    })]);
}

fn build_tab_strip(widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    let name = widget.type_name();
    let strip = require(widget.as_tab_strip(), name, CapabilityId::TabStripContract);
    let multiline = strip.multiline();
    let style = strip.content_style();
    sink.group(vec![Control::checkbox(
        "Multiline tab titles?",
        multiline,
        |w, input, _| {
            if let ControlInput::Toggled(value) = input {
                let name = w.type_name();
                require(w.as_tab_strip(), name, CapabilityId::TabStripContract)
                    .set_multiline(value);
            }
        },
    )]);
    let options = TabContentStyle::CHOICES
        .iter()
        .map(|s| s.label().to_string())
        .collect::<Vec<_>>();
    let selected = TabContentStyle::CHOICES.iter().position(|s| *s == style);
    sink.group(vec![Control::select(
        "Select a content style",
        options,
        selected,
        |w, input, _| {
            if let ControlInput::Chosen(index) = input {
                let name = w.type_name();
                require(w.as_tab_strip(), name, CapabilityId::TabStripContract)
                    .set_content_style(TabContentStyle::CHOICES[index]);
            }
        },
    )]);
}

fn build_unload_guard(widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    let name = widget.type_name();
    let query = require(widget.as_unload_guard(), name, CapabilityId::UnloadNotifier)
        .query_on_exit();
    sink.group(vec![Control::checkbox(
        "Ask for confirmation before quitting?",
        query,
        |w, input, _| {
            if let ControlInput::Toggled(value) = input {
                let name = w.type_name();
                require(w.as_unload_guard(), name, CapabilityId::UnloadNotifier)
                    .set_query_on_exit(value);
            }
        },
    )]);
    sink.group(vec![Control::note(
        "With the box ticked, press q outside of edit mode and try to leave the app.",
    )]);
    let (counter, id) = sink.readout("Exit attempts so far", "0");
    sink.group(vec![counter]);
    sink.listen(
        EventKind::ExitAttempted,
        Reaction::Readout {
            id,
            update: attempt_counter,
        },
    );
}

fn build_focus_notifier(_widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    sink.group(vec![Control::note(
        "Enter the demo widget to see a notification.",
    )]);
    sink.listen(EventKind::Focused, Reaction::Notify(focus_toast));
}

fn build_blur_notifier(_widget: &mut dyn DemoWidget, sink: &mut SectionSink) {
    sink.group(vec![Control::note(
        "Leave the demo widget to see a notification.",
    )]);
    sink.listen(EventKind::Blurred, Reaction::Notify(blur_toast));
}

/// The full configurator catalog, in the order sections appear on every
/// page.
pub fn standard_registry() -> Result<ConfiguratorRegistry, SetupError> {
    let mut registry = ConfiguratorRegistry::new();
    registry.register(CapabilityId::CanSelectText, build_can_select_text)?;
    registry.register(CapabilityId::HasValue, build_has_value)?;
    registry.register(CapabilityId::NumberFieldBase, build_number_base)?;
    registry.register(CapabilityId::NullValueAllowed, build_null_value_allowed)?;
    registry.register(CapabilityId::HasLocale, build_has_locale)?;
    registry.register(CapabilityId::ItemGridContract, build_item_grid)?;
    registry.register(CapabilityId::HasDatePattern, build_has_date_pattern)?;
    registry.register(CapabilityId::TabStripContract, build_tab_strip)?;
    registry.register(CapabilityId::UnloadNotifier, build_unload_guard)?;
    registry.register(CapabilityId::FocusNotifier, build_focus_notifier)?;
    registry.register(CapabilityId::BlurNotifier, build_blur_notifier)?;
    Ok(registry)
}

/// After-locale-change follow-ups: the digit limits are not a locale
/// concern, so the generic locale configurator cannot re-apply them.
pub fn standard_side_effects() -> Result<SideEffectRegistry, SetupError> {
    let mut effects = SideEffectRegistry::new();
    effects.register::<IntegerField, _>(|field| {
        field.set_maximum_integer_digits(6);
    })?;
    effects.register::<DecimalField, _>(|field| {
        field.set_maximum_integer_digits(8);
        field.set_maximum_fraction_digits(4);
        field.set_minimum_fraction_digits(1);
    })?;
    Ok(effects)
}

fn tab_content(title: &str) -> String {
    format!("Did you know? All demo fields are {title}")
}

/// Names of every demonstrated type, used as the grid's items.
const DEMO_TYPE_NAMES: [&str; 9] = [
    "IntegerField",
    "DecimalField",
    "DateField",
    "DateTimeField",
    "TextField",
    "TextArea",
    "TabStrip",
    "ItemGrid",
    "UnloadGuard",
];

/// Creates the demonstrated widget singletons, one per type, in tab
/// order.
pub fn standard_gallery() -> Result<Gallery, SetupError> {
    let today = Local::now().naive_local();
    let mut gallery = Gallery::new();
    gallery.add(IntegerField::new("Integer (6 digits)", 6))?;
    gallery.add(DecimalField::new("Decimal (8 + 4 digits)", 8, 4, 1))?;
    gallery.add(
        DateField::new("Pick a date", today.date()).with_date_pattern(DatePattern::YearMonthDay),
    )?;
    gallery.add(
        DateTimeField::new("Pick a date and time", today)
            .with_date_pattern(DatePattern::MonthDayYearSlash),
    )?;
    gallery.add(TextField::new("Type something").with_placeholder("(nothing typed)"))?;
    gallery.add(TextArea::new("Type a lot of something").with_placeholder("(nothing typed)"))?;
    gallery.add(TabStrip::new(
        "Demo tabs",
        vec![
            "terminal friendly".into(),
            "endlessly configurable".into(),
            "open source".into(),
            "fun to use".into(),
            "reasonably well documented".into(),
        ],
        tab_content,
    ))?;
    gallery.add(ItemGrid::new(
        "Widget types",
        DEMO_TYPE_NAMES.iter().map(|s| s.to_string()).collect(),
        plain_cell,
    ))?;
    gallery.add(UnloadGuard::new(false))?;
    Ok(gallery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale;
    use crate::notify::Notifications;
    use crate::page::{ControlCx, Page};
    use crate::widgets::traits::HasLocale as _;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn locale_change_reapplies_exact_type_digit_limits() {
        let registry = standard_registry().unwrap();
        let side_effects = standard_side_effects().unwrap();
        // Start with a tighter cap than the follow-up re-applies.
        let mut field = IntegerField::new("Integer (6 digits)", 3);
        let mut page = Page::compose(&mut field, "IntegerField", &registry);
        let mut notifications = Notifications::new();

        // Walk the cursor down to the locale select.
        let mut guard = 0;
        loop {
            let focused = page.focused_control().map(|c| c.label.clone());
            if focused.as_deref() == Some("Select locale") {
                break;
            }
            let mut cx = ControlCx {
                notifications: &mut notifications,
                side_effects: &side_effects,
            };
            assert!(page.handle_key(press(KeyCode::Down), &mut field, &mut cx));
            guard += 1;
            assert!(guard < 64, "locale select not found on the page");
        }

        let mut cx = ControlCx {
            notifications: &mut notifications,
            side_effects: &side_effects,
        };
        page.handle_key(press(KeyCode::Right), &mut field, &mut cx);

        assert_eq!(
            field.as_has_locale().unwrap().locale(),
            locale::CHOICES[0]
        );
        // The side effect restored the demo's six-digit limit.
        assert_eq!(field.maximum_integer_digits(), 6);
    }

    #[test]
    fn standard_registrations_are_consistent() {
        let registry = standard_registry().unwrap();
        assert_eq!(registry.len(), 11);
        let effects = standard_side_effects().unwrap();
        assert_eq!(effects.len(), 2);
        let gallery = standard_gallery().unwrap();
        assert_eq!(gallery.widget_count(), DEMO_TYPE_NAMES.len());
    }
}
