//! Demo tab strip.
//!
//! A small tab widget whose content lines are produced by a generator
//! function. Demonstrates a widget whose value is the selected tab
//! title.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::capability::CapabilityId;
use crate::widgets::traits::{HasValue, TabStripOps};
use crate::widgets::{DemoWidget, FieldEvent, Outbox};

const TAB_STRIP_CAPS: &[CapabilityId] = &[CapabilityId::TabStripContract];

/// How the selected tab's content line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabContentStyle {
    Plain,
    Boxed,
    Highlighted,
}

impl TabContentStyle {
    pub const CHOICES: [TabContentStyle; 3] = [
        TabContentStyle::Plain,
        TabContentStyle::Boxed,
        TabContentStyle::Highlighted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TabContentStyle::Plain => "plain",
            TabContentStyle::Boxed => "boxed",
            TabContentStyle::Highlighted => "highlighted",
        }
    }
}

/// Produces the content line for a tab title.
pub type TabContentGenerator = fn(&str) -> String;

/// Tab strip with generated content.
pub struct TabStrip {
    label: String,
    items: Vec<String>,
    selected: usize,
    multiline: bool,
    style: TabContentStyle,
    generator: TabContentGenerator,
    read_only: bool,
    focused: bool,
    outbox: Outbox,
}

impl TabStrip {
    pub fn new(
        label: impl Into<String>,
        items: Vec<String>,
        generator: TabContentGenerator,
    ) -> Self {
        Self {
            label: label.into(),
            items,
            selected: 0,
            multiline: false,
            style: TabContentStyle::Plain,
            generator,
            read_only: false,
            focused: false,
            outbox: Outbox::default(),
        }
    }

    fn select(&mut self, index: usize) {
        if self.read_only || index == self.selected {
            return;
        }
        self.selected = index;
        let title = self.items[index].clone();
        self.outbox.push(FieldEvent::ValueChanged(title));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => {
                self.select(self.selected.saturating_sub(1));
                true
            }
            KeyCode::Right => {
                let last = self.items.len().saturating_sub(1);
                self.select((self.selected + 1).min(last));
                true
            }
            _ => false,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn drain_events(&mut self) -> Vec<FieldEvent> {
        self.outbox.drain()
    }

    fn title_rows(&self) -> usize {
        if self.multiline {
            self.items.len().div_ceil(3)
        } else {
            1
        }
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

        if self.items.is_empty() {
            frame.render_widget(block, area);
            return;
        }
        let per_row = if self.multiline { 3 } else { self.items.len() };
        let mut lines = Vec::new();
        for chunk in self.items.chunks(per_row) {
            let mut spans = Vec::new();
            for title in chunk {
                let index = self.items.iter().position(|t| t == title).unwrap_or(0);
                let style = if index == self.selected {
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(Color::Yellow)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!(" {title} "), style));
                spans.push(Span::raw("|"));
            }
            spans.pop();
            lines.push(Line::from(spans));
        }

        let content = (self.generator)(&self.items[self.selected]);
        lines.push(Line::raw(""));
        lines.push(match self.style {
            TabContentStyle::Plain => Line::raw(content),
            TabContentStyle::Boxed => Line::raw(format!("[ {content} ]")),
            TabContentStyle::Highlighted => Line::from(Span::styled(
                content,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
        });

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }
}

impl HasValue for TabStrip {
    fn value_text(&self) -> String {
        self.items.get(self.selected).cloned().unwrap_or_default()
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn read_only(&self) -> bool {
        self.read_only
    }
}

impl TabStripOps for TabStrip {
    fn set_multiline(&mut self, multiline: bool) {
        self.multiline = multiline;
    }

    fn multiline(&self) -> bool {
        self.multiline
    }

    fn set_content_style(&mut self, style: TabContentStyle) {
        self.style = style;
    }

    fn content_style(&self) -> TabContentStyle {
        self.style
    }
}

impl DemoWidget for TabStrip {
    fn type_name(&self) -> &'static str {
        "TabStrip"
    }

    fn capabilities(&self) -> &'static [CapabilityId] {
        TAB_STRIP_CAPS
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, captured: bool) {
        TabStrip::render(self, frame, area, captured);
    }

    fn desired_height(&self) -> u16 {
        (self.title_rows() + 4) as u16
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        TabStrip::handle_key(self, key)
    }

    fn set_focused(&mut self, focused: bool) {
        TabStrip::set_focused(self, focused);
    }

    fn drain_events(&mut self) -> Vec<FieldEvent> {
        TabStrip::drain_events(self)
    }

    fn as_has_value(&mut self) -> Option<&mut dyn HasValue> {
        Some(self)
    }

    fn as_tab_strip(&mut self) -> Option<&mut dyn TabStripOps> {
        Some(self)
    }

    crate::impl_widget_any!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn content(title: &str) -> String {
        format!("tab {title}")
    }

    fn strip() -> TabStrip {
        TabStrip::new(
            "tabs",
            vec!["one".into(), "two".into(), "three".into()],
            content,
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn value_is_selected_title() {
        let mut s = strip();
        assert_eq!(s.value_text(), "one");
        s.handle_key(press(KeyCode::Right));
        assert_eq!(s.value_text(), "two");
        assert_eq!(
            s.drain_events(),
            vec![FieldEvent::ValueChanged("two".into())]
        );
    }

    #[test]
    fn selection_clamps_at_ends() {
        let mut s = strip();
        s.handle_key(press(KeyCode::Left));
        assert_eq!(s.value_text(), "one");
        for _ in 0..5 {
            s.handle_key(press(KeyCode::Right));
        }
        assert_eq!(s.value_text(), "three");
    }

    #[test]
    fn multiline_splits_title_rows() {
        let mut s = strip();
        assert_eq!(s.title_rows(), 1);
        s.set_multiline(true);
        assert_eq!(s.title_rows(), 1);
        let mut wide = TabStrip::new(
            "tabs",
            (0..7).map(|i| format!("t{i}")).collect(),
            content,
        );
        wide.set_multiline(true);
        assert_eq!(wide.title_rows(), 3);
    }
}
