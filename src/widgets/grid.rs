//! Item grid.
//!
//! Renders a grid of generated cells, one per demonstrated type name.
//! The cell generator is a plain function pointer so it can be swapped
//! at runtime from a settings control.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::capability::CapabilityId;
use crate::widgets::traits::{HasValue, ItemGridOps};
use crate::widgets::{DemoWidget, FieldEvent, Outbox};

const ITEM_GRID_CAPS: &[CapabilityId] = &[CapabilityId::ItemGridContract];

/// Columns a fresh grid starts with.
pub const DEFAULT_COLUMN_COUNT: usize = 3;

/// Output of a cell generator.
pub struct GridCell {
    pub title: String,
    /// Extra line below the title, shown by the framed generator.
    pub detail: Option<String>,
    pub framed: bool,
}

/// Produces the cell for (item, row, column).
pub type CellGenerator = fn(&str, usize, usize) -> GridCell;

/// Grid of generated cells with a selectable cell.
pub struct ItemGrid {
    label: String,
    items: Vec<String>,
    columns: usize,
    generator: CellGenerator,
    cursor: usize,
    selected: Option<usize>,
    read_only: bool,
    focused: bool,
    outbox: Outbox,
}

impl ItemGrid {
    pub fn new(label: impl Into<String>, items: Vec<String>, generator: CellGenerator) -> Self {
        Self {
            label: label.into(),
            items,
            columns: DEFAULT_COLUMN_COUNT,
            generator,
            cursor: 0,
            selected: None,
            read_only: false,
            focused: false,
            outbox: Outbox::default(),
        }
    }

    fn rows(&self) -> usize {
        self.items.len().div_ceil(self.columns.max(1))
    }

    fn cell_lines(&self) -> usize {
        let probe = self
            .items
            .first()
            .map(|item| (self.generator)(item, 0, 0))
            .map(|cell| cell.framed)
            .unwrap_or(false);
        if probe {
            2
        } else {
            1
        }
    }

    fn toggle_selection(&mut self) {
        if self.read_only {
            return;
        }
        if self.selected == Some(self.cursor) {
            self.selected = None;
            self.outbox.push(FieldEvent::ValueChanged(String::new()));
        } else {
            self.selected = Some(self.cursor);
            let title = self.items[self.cursor].clone();
            self.outbox.push(FieldEvent::ValueChanged(title));
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let last = self.items.len().saturating_sub(1);
        match key.code {
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(last);
                true
            }
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(self.columns);
                true
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + self.columns).min(last);
                true
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle_selection();
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

        let mut lines = Vec::new();
        for (row, chunk) in self.items.chunks(self.columns.max(1)).enumerate() {
            let mut title_spans = Vec::new();
            let mut detail_spans = Vec::new();
            let mut framed_row = false;
            for (column, item) in chunk.iter().enumerate() {
                let index = row * self.columns + column;
                let cell = (self.generator)(item, row, column);
                let mut style = Style::default();
                if self.selected == Some(index) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                if captured && self.cursor == index {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                let text = if cell.framed {
                    framed_row = true;
                    format!("[ {} ]", cell.title)
                } else {
                    cell.title.clone()
                };
                title_spans.push(Span::styled(text, style));
                title_spans.push(Span::raw("  "));
                if let Some(detail) = cell.detail {
                    detail_spans.push(Span::styled(
                        detail,
                        Style::default().add_modifier(Modifier::DIM),
                    ));
                    detail_spans.push(Span::raw("  "));
                }
            }
            lines.push(Line::from(title_spans));
            if framed_row && !detail_spans.is_empty() {
                lines.push(Line::from(detail_spans));
            }
        }

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }

    pub fn grid_height(&self) -> u16 {
        (self.rows() * self.cell_lines() + 2) as u16
    }
}

impl HasValue for ItemGrid {
    fn value_text(&self) -> String {
        self.selected
            .and_then(|i| self.items.get(i))
            .cloned()
            .unwrap_or_default()
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn read_only(&self) -> bool {
        self.read_only
    }
}

impl ItemGridOps for ItemGrid {
    fn set_column_count(&mut self, columns: usize) {
        self.columns = columns.max(1);
        self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn set_cell_generator(&mut self, generator: CellGenerator) {
        self.generator = generator;
    }
}

impl DemoWidget for ItemGrid {
    fn type_name(&self) -> &'static str {
        "ItemGrid"
    }

    fn capabilities(&self) -> &'static [CapabilityId] {
        ITEM_GRID_CAPS
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, captured: bool) {
        ItemGrid::render(self, frame, area, captured);
    }

    fn desired_height(&self) -> u16 {
        self.grid_height()
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        ItemGrid::handle_key(self, key)
    }

    fn set_focused(&mut self, focused: bool) {
        ItemGrid::set_focused(self, focused);
    }

    fn drain_events(&mut self) -> Vec<FieldEvent> {
        ItemGrid::drain_events(self)
    }

    fn as_has_value(&mut self) -> Option<&mut dyn HasValue> {
        Some(self)
    }

    fn as_item_grid(&mut self) -> Option<&mut dyn ItemGridOps> {
        Some(self)
    }

    crate::impl_widget_any!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn plain(item: &str, _row: usize, _column: usize) -> GridCell {
        GridCell {
            title: item.to_string(),
            detail: None,
            framed: false,
        }
    }

    fn grid() -> ItemGrid {
        let items = vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()];
        ItemGrid::new("grid", items, plain)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn selection_becomes_value() {
        let mut g = grid();
        g.handle_key(press(KeyCode::Right));
        g.handle_key(press(KeyCode::Enter));
        assert_eq!(g.value_text(), "b");
        g.handle_key(press(KeyCode::Enter));
        assert_eq!(g.value_text(), "");
    }

    #[test]
    fn read_only_blocks_selection() {
        let mut g = grid();
        g.set_read_only(true);
        g.handle_key(press(KeyCode::Enter));
        assert_eq!(g.value_text(), "");
    }

    #[test]
    fn vertical_movement_follows_column_count() {
        let mut g = grid();
        g.set_column_count(2);
        g.handle_key(press(KeyCode::Down));
        assert_eq!(g.cursor, 2);
        g.handle_key(press(KeyCode::Down));
        assert_eq!(g.cursor, 4);
        g.handle_key(press(KeyCode::Up));
        assert_eq!(g.cursor, 2);
    }

    #[test]
    fn rows_round_up() {
        let mut g = grid();
        g.set_column_count(2);
        assert_eq!(g.rows(), 3);
        g.set_column_count(6);
        assert_eq!(g.rows(), 1);
    }
}
