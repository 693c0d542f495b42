//! Plain text fields.
//!
//! `TextField` is a single line input with a placeholder; `TextArea` is
//! its multiline sibling. Both wrap a shared `TextCore`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::capability::CapabilityId;
use crate::widgets::traits::{CanSelectText, HasValue, TerminalSelectionSource};
use crate::widgets::{DemoWidget, FieldEvent, Outbox};

const TEXT_FIELD_CAPS: &[CapabilityId] = &[
    CapabilityId::TextInputBase,
    CapabilityId::TerminalSelectionSource,
    CapabilityId::TextSelectionNotifier,
];

/// Shared state of the text fields.
pub struct TextCore {
    label: String,
    value: String,
    placeholder: String,
    /// Cursor position in characters.
    cursor: usize,
    multiline: bool,
    read_only: bool,
    terminal_selection: bool,
    selected: bool,
    focused: bool,
    outbox: Outbox,
}

impl TextCore {
    pub fn new(label: impl Into<String>, multiline: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            placeholder: String::new(),
            cursor: 0,
            multiline,
            read_only: false,
            terminal_selection: false,
            selected: false,
            focused: false,
            outbox: Outbox::default(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn emit_value_changed(&mut self) {
        self.outbox
            .push(FieldEvent::ValueChanged(self.value.clone()));
    }

    fn clear_if_selected(&mut self) -> bool {
        if self.selected {
            self.selected = false;
            self.value.clear();
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    fn insert(&mut self, c: char) {
        self.clear_if_selected();
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        self.emit_value_changed();
    }

    fn backspace(&mut self) {
        if self.clear_if_selected() {
            self.emit_value_changed();
            return;
        }
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
        self.emit_value_changed();
    }

    fn delete(&mut self) {
        if self.clear_if_selected() {
            self.emit_value_changed();
            return;
        }
        if self.cursor >= self.char_count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
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
        match key.code {
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                true
            }
            KeyCode::Char(c) if !self.read_only => {
                self.insert(c);
                true
            }
            KeyCode::Enter if self.multiline && !self.read_only => {
                self.insert('\n');
                true
            }
            KeyCode::Backspace if !self.read_only => {
                self.backspace();
                true
            }
            KeyCode::Delete if !self.read_only => {
                self.delete();
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
        if !focused {
            self.selected = false;
        }
        self.outbox.push(if focused {
            FieldEvent::Focused
        } else {
            FieldEvent::Blurred
        });
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

        let paragraph = if self.value.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default().add_modifier(Modifier::DIM),
            )))
        } else if self.selected {
            Paragraph::new(Line::from(Span::styled(
                self.value.clone(),
                Style::default().add_modifier(Modifier::REVERSED),
            )))
        } else if captured {
            let at = self.byte_index(self.cursor);
            let (before, after) = self.value.split_at(at);
            Paragraph::new(Line::from(vec![
                Span::raw(before.to_string()),
                Span::styled("▏", Style::default().fg(Color::Green)),
                Span::raw(after.to_string()),
            ]))
        } else {
            Paragraph::new(Line::from(Span::raw(self.value.clone())))
        };

        let paragraph = if self.multiline {
            paragraph.wrap(Wrap { trim: false })
        } else {
            paragraph
        };
        frame.render_widget(paragraph.block(block), area);
    }
}

impl HasValue for TextCore {
    fn value_text(&self) -> String {
        self.value.clone()
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn read_only(&self) -> bool {
        self.read_only
    }
}

impl CanSelectText for TextCore {
    fn select_all(&mut self) {
        if self.value.is_empty() {
            return;
        }
        self.selected = true;
        self.outbox
            .push(FieldEvent::TextSelected(self.value.clone()));
    }

    fn select_none(&mut self) {
        self.selected = false;
        self.outbox.push(FieldEvent::TextSelected(String::new()));
    }
}

impl TerminalSelectionSource for TextCore {
    fn set_terminal_selection(&mut self, enabled: bool) {
        self.terminal_selection = enabled;
    }

    fn terminal_selection(&self) -> bool {
        self.terminal_selection
    }
}

macro_rules! text_field_widget {
    ($ty:ident, $name:literal, $height:literal) => {
        impl DemoWidget for $ty {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn capabilities(&self) -> &'static [CapabilityId] {
                TEXT_FIELD_CAPS
            }

            fn render(&mut self, frame: &mut Frame, area: Rect, captured: bool) {
                self.core.render(frame, area, captured);
            }

            fn desired_height(&self) -> u16 {
                $height
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

            fn as_select_text(&mut self) -> Option<&mut dyn CanSelectText> {
                Some(&mut self.core)
            }

            fn as_terminal_selection(&mut self) -> Option<&mut dyn TerminalSelectionSource> {
                Some(&mut self.core)
            }

            $crate::impl_widget_any!();
        }
    };
}

/// Single line text input.
pub struct TextField {
    core: TextCore,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            core: TextCore::new(label, false),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.core = self.core.with_placeholder(placeholder);
        self
    }
}

/// Multiline text input.
pub struct TextArea {
    core: TextCore,
}

impl TextArea {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            core: TextCore::new(label, true),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.core = self.core.with_placeholder(placeholder);
        self
    }
}

text_field_widget!(TextField, "TextField", 3);
text_field_widget!(TextArea, "TextArea", 6);

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_moves_cursor() {
        let mut c = TextCore::new("t", false);
        for ch in "abc".chars() {
            c.handle_key(press(KeyCode::Char(ch)));
        }
        c.handle_key(press(KeyCode::Left));
        c.handle_key(press(KeyCode::Char('x')));
        assert_eq!(c.value, "abxc");
    }

    #[test]
    fn backspace_and_delete() {
        let mut c = TextCore::new("t", false);
        for ch in "abc".chars() {
            c.handle_key(press(KeyCode::Char(ch)));
        }
        c.handle_key(press(KeyCode::Backspace));
        assert_eq!(c.value, "ab");
        c.handle_key(press(KeyCode::Home));
        c.handle_key(press(KeyCode::Delete));
        assert_eq!(c.value, "b");
    }

    #[test]
    fn selection_replaced_by_typing() {
        let mut c = TextCore::new("t", false);
        for ch in "abc".chars() {
            c.handle_key(press(KeyCode::Char(ch)));
        }
        c.select_all();
        c.handle_key(press(KeyCode::Char('z')));
        assert_eq!(c.value, "z");
    }

    #[test]
    fn keyboard_selection_requires_opt_in() {
        let mut c = TextCore::new("t", false);
        c.handle_key(press(KeyCode::Char('a')));
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        c.handle_key(ctrl_a);
        assert!(!c.selected);
        c.set_terminal_selection(true);
        c.handle_key(ctrl_a);
        assert!(c.selected);
    }

    #[test]
    fn read_only_blocks_edits_but_not_cursor() {
        let mut c = TextCore::new("t", false);
        c.handle_key(press(KeyCode::Char('a')));
        c.set_read_only(true);
        c.handle_key(press(KeyCode::Char('b')));
        assert_eq!(c.value, "a");
        assert!(c.handle_key(press(KeyCode::Home)));
    }

    #[test]
    fn newline_only_in_multiline() {
        let mut single = TextCore::new("t", false);
        single.handle_key(press(KeyCode::Enter));
        assert_eq!(single.value, "");
        let mut multi = TextCore::new("t", true);
        multi.handle_key(press(KeyCode::Enter));
        assert_eq!(multi.value, "\n");
    }
}
