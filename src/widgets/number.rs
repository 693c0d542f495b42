//! Numeric fields.
//!
//! `IntegerField` and `DecimalField` are thin wrappers around a shared
//! [`NumberFieldCore`], which owns the canonical value text and all the
//! behavior the number-field capability contracts promise: locale-aware
//! grouping, digit caps, autoselect on focus, optional prefix/suffix
//! glyphs, right alignment and the optional null value. The wrappers
//! exist so that the two fields keep distinct runtime types, which the
//! exact-type side-effect registry relies on.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::capability::CapabilityId;
use crate::locale::{self, Locale};
use crate::widgets::traits::{
    CanSelectText, HasLocale, HasValue, NullValueAllowed, NumberFieldBase,
    TerminalSelectionSource,
};
use crate::widgets::{DemoWidget, FieldEvent, Outbox};

const NUMBER_FIELD_CAPS: &[CapabilityId] = &[
    CapabilityId::NumberFieldBase,
    CapabilityId::NullValueAllowed,
    CapabilityId::TerminalSelectionSource,
    CapabilityId::TextSelectionNotifier,
];

/// Groups ASCII digits into blocks of three, right to left.
fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Shared state and behavior of the numeric fields.
///
/// The value is kept as canonical ASCII text ("-1234.5", empty for
/// null); locale separators are applied only when formatting.
pub struct NumberFieldCore {
    label: String,
    value: String,
    max_integer_digits: usize,
    max_fraction_digits: usize,
    min_fraction_digits: usize,
    locale: Locale,
    read_only: bool,
    null_allowed: bool,
    autoselect: bool,
    grouping_hidden_on_focus: bool,
    prefix: Option<&'static str>,
    suffix: Option<&'static str>,
    align_right: bool,
    terminal_selection: bool,
    selected: bool,
    focused: bool,
    outbox: Outbox,
}

impl NumberFieldCore {
    pub fn new(label: impl Into<String>, max_integer_digits: usize) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            max_integer_digits,
            max_fraction_digits: 0,
            min_fraction_digits: 0,
            locale: locale::UNITED_KINGDOM,
            read_only: false,
            null_allowed: false,
            autoselect: false,
            grouping_hidden_on_focus: false,
            prefix: None,
            suffix: None,
            align_right: false,
            terminal_selection: false,
            selected: false,
            focused: false,
            outbox: Outbox::default(),
        }
    }

    pub fn with_fraction_digits(mut self, max: usize, min: usize) -> Self {
        self.max_fraction_digits = max;
        self.min_fraction_digits = min;
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn maximum_integer_digits(&self) -> usize {
        self.max_integer_digits
    }

    pub fn maximum_fraction_digits(&self) -> usize {
        self.max_fraction_digits
    }

    /// Caps the integer digits, truncating the current value if it is
    /// now too long.
    pub fn set_maximum_integer_digits(&mut self, digits: usize) {
        self.max_integer_digits = digits;
        let truncated = {
            let (sign, int, frac) = self.split_value();
            if int.len() > digits {
                Some(match frac {
                    Some(f) => format!("{sign}{}.{f}", &int[..digits]),
                    None => format!("{sign}{}", &int[..digits]),
                })
            } else {
                None
            }
        };
        if let Some(value) = truncated {
            self.value = value;
            self.emit_value_changed();
        }
    }

    pub fn set_maximum_fraction_digits(&mut self, digits: usize) {
        self.max_fraction_digits = digits;
        let truncated = {
            let (sign, int, frac) = self.split_value();
            match frac {
                Some(f) if f.len() > digits => Some(if digits == 0 {
                    format!("{sign}{int}")
                } else {
                    format!("{sign}{int}.{}", &f[..digits])
                }),
                _ => None,
            }
        };
        if let Some(value) = truncated {
            self.value = value;
            self.emit_value_changed();
        }
    }

    pub fn set_minimum_fraction_digits(&mut self, digits: usize) {
        self.min_fraction_digits = digits;
    }

    /// (sign, integer digits, fraction digits) of the canonical value.
    fn split_value(&self) -> (&str, &str, Option<&str>) {
        let (sign, rest) = match self.value.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", self.value.as_str()),
        };
        match rest.split_once('.') {
            Some((int, frac)) => (sign, int, Some(frac)),
            None => (sign, rest, None),
        }
    }

    fn format_with(&self, grouped: bool) -> String {
        if self.value.is_empty() {
            return String::new();
        }
        let (sign, int, frac) = self.split_value();
        let int = if int.is_empty() { "0" } else { int };
        let mut out = String::from(sign);
        if grouped {
            out.push_str(&group_digits(int, self.locale.grouping_separator));
        } else {
            out.push_str(int);
        }
        let mut frac = frac.unwrap_or("").to_string();
        while frac.len() < self.min_fraction_digits {
            frac.push('0');
        }
        if !frac.is_empty() {
            out.push(self.locale.decimal_separator);
            out.push_str(&frac);
        }
        out
    }

    /// Grouped display text, independent of focus state. This is what
    /// value-change events and `value_text` carry.
    pub fn formatted(&self) -> String {
        self.format_with(true)
    }

    /// Text shown in the field right now, honoring the
    /// hide-grouping-while-focused knob.
    fn display_text(&self) -> String {
        let grouped = !(self.focused && self.grouping_hidden_on_focus);
        self.format_with(grouped)
    }

    fn emit_value_changed(&mut self) {
        let text = self.formatted();
        self.outbox.push(FieldEvent::ValueChanged(text));
    }

    fn clear_if_selected(&mut self) {
        if self.selected {
            self.selected = false;
            self.value.clear();
        }
    }

    fn type_digit(&mut self, digit: char) {
        self.clear_if_selected();
        let (_, int, frac) = self.split_value();
        let fits = match frac {
            Some(f) => f.len() < self.max_fraction_digits,
            None => int.len() < self.max_integer_digits,
        };
        if fits {
            self.value.push(digit);
            self.emit_value_changed();
        }
    }

    fn type_decimal_separator(&mut self) {
        self.clear_if_selected();
        if self.max_fraction_digits == 0 || self.value.contains('.') {
            return;
        }
        if self.value.is_empty() || self.value == "-" {
            self.value.push('0');
        }
        self.value.push('.');
        self.emit_value_changed();
    }

    fn toggle_sign(&mut self) {
        self.clear_if_selected();
        if self.value.starts_with('-') {
            self.value.remove(0);
        } else {
            self.value.insert(0, '-');
        }
        self.emit_value_changed();
    }

    fn backspace(&mut self) {
        if self.selected {
            self.selected = false;
            self.value.clear();
        } else if self.value.pop().is_none() {
            return;
        }
        self.emit_value_changed();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('a') && self.terminal_selection {
                self.select_all();
                return true;
            }
            return false;
        }
        if self.read_only {
            return false;
        }
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.type_digit(c);
                true
            }
            KeyCode::Char(c) if c == self.locale.decimal_separator || c == '.' => {
                self.type_decimal_separator();
                true
            }
            KeyCode::Char('-') => {
                self.toggle_sign();
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            _ => false,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if focused {
            self.outbox.push(FieldEvent::Focused);
            if self.autoselect {
                self.select_all();
            }
        } else {
            self.outbox.push(FieldEvent::Blurred);
            self.selected = false;
            if self.value.is_empty() && !self.null_allowed {
                self.value.push('0');
                self.emit_value_changed();
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<FieldEvent> {
        self.outbox.drain()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, captured: bool) {
        let border = if captured {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(self.label.clone());

        let text = self.display_text();
        let mut spans = Vec::new();
        if let Some(prefix) = self.prefix {
            spans.push(Span::styled(prefix, Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(" "));
        }
        if text.is_empty() {
            spans.push(Span::styled(
                "(empty)",
                Style::default().add_modifier(Modifier::DIM),
            ));
        } else if self.selected {
            spans.push(Span::styled(
                text,
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        } else {
            spans.push(Span::raw(text));
        }
        if captured && !self.read_only {
            spans.push(Span::styled("▏", Style::default().fg(Color::Green)));
        }
        if let Some(suffix) = self.suffix {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(suffix, Style::default().fg(Color::DarkGray)));
        }

        let alignment = if self.align_right {
            Alignment::Right
        } else {
            Alignment::Left
        };
        let paragraph = Paragraph::new(Line::from(spans))
            .block(block)
            .alignment(alignment);
        frame.render_widget(paragraph, area);
    }
}

impl HasValue for NumberFieldCore {
    fn value_text(&self) -> String {
        self.formatted()
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn read_only(&self) -> bool {
        self.read_only
    }
}

impl HasLocale for NumberFieldCore {
    fn locale(&self) -> Locale {
        self.locale
    }

    fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }
}

impl CanSelectText for NumberFieldCore {
    fn select_all(&mut self) {
        if self.value.is_empty() {
            return;
        }
        self.selected = true;
        let text = self.formatted();
        self.outbox.push(FieldEvent::TextSelected(text));
    }

    fn select_none(&mut self) {
        self.selected = false;
        self.outbox.push(FieldEvent::TextSelected(String::new()));
    }
}

impl TerminalSelectionSource for NumberFieldCore {
    fn set_terminal_selection(&mut self, enabled: bool) {
        self.terminal_selection = enabled;
    }

    fn terminal_selection(&self) -> bool {
        self.terminal_selection
    }
}

impl NumberFieldBase for NumberFieldCore {
    fn set_autoselect(&mut self, autoselect: bool) {
        self.autoselect = autoselect;
    }

    fn autoselect(&self) -> bool {
        self.autoselect
    }

    fn set_grouping_hidden_on_focus(&mut self, hidden: bool) {
        self.grouping_hidden_on_focus = hidden;
    }

    fn grouping_hidden_on_focus(&self) -> bool {
        self.grouping_hidden_on_focus
    }

    fn set_prefix(&mut self, prefix: Option<&'static str>) {
        self.prefix = prefix;
    }

    fn has_prefix(&self) -> bool {
        self.prefix.is_some()
    }

    fn set_suffix(&mut self, suffix: Option<&'static str>) {
        self.suffix = suffix;
    }

    fn has_suffix(&self) -> bool {
        self.suffix.is_some()
    }

    fn set_align_right(&mut self, align_right: bool) {
        self.align_right = align_right;
    }

    fn align_right(&self) -> bool {
        self.align_right
    }
}

impl NullValueAllowed for NumberFieldCore {
    fn set_null_value_allowed(&mut self, allowed: bool) {
        self.null_allowed = allowed;
    }

    fn null_value_allowed(&self) -> bool {
        self.null_allowed
    }
}

macro_rules! number_field_widget {
    ($ty:ident, $name:literal) => {
        impl DemoWidget for $ty {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn capabilities(&self) -> &'static [CapabilityId] {
                NUMBER_FIELD_CAPS
            }

            fn render(&mut self, frame: &mut Frame, area: Rect, captured: bool) {
                self.core.render(frame, area, captured);
            }

            fn handle_key(&mut self, key: KeyEvent) -> bool {
                self.core.handle_key(key)
            }

            fn set_focused(&mut self, focused: bool) {
                self.core.set_focused(focused);
            }

            fn drain_events(&mut self) -> Vec<FieldEvent> {
                self.core.drain_events()
            }

            fn as_has_value(&mut self) -> Option<&mut dyn HasValue> {
                Some(&mut self.core)
            }

            fn as_has_locale(&mut self) -> Option<&mut dyn HasLocale> {
                Some(&mut self.core)
            }

            fn as_select_text(&mut self) -> Option<&mut dyn CanSelectText> {
                Some(&mut self.core)
            }

            fn as_terminal_selection(&mut self) -> Option<&mut dyn TerminalSelectionSource> {
                Some(&mut self.core)
            }

            fn as_number_base(&mut self) -> Option<&mut dyn NumberFieldBase> {
                Some(&mut self.core)
            }

            fn as_nullable(&mut self) -> Option<&mut dyn NullValueAllowed> {
                Some(&mut self.core)
            }

            $crate::impl_widget_any!();
        }
    };
}

/// Whole-number field.
pub struct IntegerField {
    core: NumberFieldCore,
}

impl IntegerField {
    pub fn new(label: impl Into<String>, max_integer_digits: usize) -> Self {
        Self {
            core: NumberFieldCore::new(label, max_integer_digits),
        }
    }

    pub fn set_maximum_integer_digits(&mut self, digits: usize) {
        self.core.set_maximum_integer_digits(digits);
    }

    pub fn maximum_integer_digits(&self) -> usize {
        self.core.maximum_integer_digits()
    }
}

/// Fixed-point decimal field.
pub struct DecimalField {
    core: NumberFieldCore,
}

impl DecimalField {
    pub fn new(
        label: impl Into<String>,
        max_integer_digits: usize,
        max_fraction_digits: usize,
        min_fraction_digits: usize,
    ) -> Self {
        Self {
            core: NumberFieldCore::new(label, max_integer_digits)
                .with_fraction_digits(max_fraction_digits, min_fraction_digits),
        }
    }

    pub fn set_maximum_integer_digits(&mut self, digits: usize) {
        self.core.set_maximum_integer_digits(digits);
    }

    pub fn set_maximum_fraction_digits(&mut self, digits: usize) {
        self.core.set_maximum_fraction_digits(digits);
    }

    pub fn set_minimum_fraction_digits(&mut self, digits: usize) {
        self.core.set_minimum_fraction_digits(digits);
    }

    pub fn maximum_integer_digits(&self) -> usize {
        self.core.maximum_integer_digits()
    }

    pub fn maximum_fraction_digits(&self) -> usize {
        self.core.maximum_fraction_digits()
    }
}

number_field_widget!(IntegerField, "IntegerField");
number_field_widget!(DecimalField, "DecimalField");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale;

    fn core() -> NumberFieldCore {
        NumberFieldCore::new("n", 8).with_fraction_digits(3, 1)
    }

    #[test]
    fn groups_integer_digits_per_locale() {
        let mut c = core().with_value("1234567.5");
        c.set_locale(locale::GERMANY);
        assert_eq!(c.formatted(), "1.234.567,5");
        c.set_locale(locale::UNITED_KINGDOM);
        assert_eq!(c.formatted(), "1,234,567.5");
    }

    #[test]
    fn pads_fraction_to_minimum() {
        let mut c = core().with_value("12");
        c.set_locale(locale::FRANCE);
        assert_eq!(c.formatted(), "12,0");
    }

    #[test]
    fn caps_typed_integer_digits() {
        let mut c = NumberFieldCore::new("n", 3);
        for _ in 0..5 {
            c.type_digit('7');
        }
        assert_eq!(c.value, "777");
    }

    #[test]
    fn caps_typed_fraction_digits() {
        let mut c = core();
        c.type_digit('1');
        c.type_decimal_separator();
        for _ in 0..5 {
            c.type_digit('9');
        }
        assert_eq!(c.value, "1.999");
    }

    #[test]
    fn separator_first_inserts_leading_zero() {
        let mut c = core();
        c.type_decimal_separator();
        c.type_digit('5');
        assert_eq!(c.value, "0.5");
    }

    #[test]
    fn blur_restores_zero_unless_null_allowed() {
        let mut c = core();
        c.set_focused(true);
        c.set_focused(false);
        assert_eq!(c.value, "0");

        let mut c = core();
        c.set_null_value_allowed(true);
        c.set_focused(true);
        c.set_focused(false);
        assert_eq!(c.value, "");
        assert_eq!(c.value_text(), "");
    }

    #[test]
    fn shrinking_integer_cap_truncates_value() {
        let mut c = core().with_value("123456.7");
        c.set_maximum_integer_digits(3);
        assert_eq!(c.value, "123.7");
    }

    #[test]
    fn select_all_then_typing_replaces() {
        let mut c = core().with_value("42");
        c.select_all();
        c.type_digit('7');
        assert_eq!(c.value, "7");
    }

    #[test]
    fn autoselect_selects_on_focus() {
        let mut c = core().with_value("42");
        c.set_autoselect(true);
        c.set_focused(true);
        let events = c.drain_events();
        assert!(events.contains(&FieldEvent::Focused));
        // default locale is en-GB, minimum one fraction digit
        assert!(events.contains(&FieldEvent::TextSelected("42.0".into())));
    }
}
