//! # Pages and Controls
//!
//! A page shows one demonstrated widget followed by the settings
//! sections the dispatch engine produced for it. Configurators describe
//! their controls through a [`SectionSink`]; the page owns the results,
//! routes key input to the focused control or the captured widget, and
//! feeds widget events to the listeners the configurators attached.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::capability::CapabilityId;
use crate::dispatch;
use crate::notify::Notifications;
use crate::registry::{ConfiguratorRegistry, SideEffectRegistry};
use crate::widgets::{DemoWidget, EventKind, FieldEvent};

/// What the user did to an interactive control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlInput {
    Toggled(bool),
    Chosen(usize),
    Pressed,
}

/// Services available to a control action.
pub struct ControlCx<'a> {
    pub notifications: &'a mut Notifications,
    pub side_effects: &'a SideEffectRegistry,
}

/// Reaction of a control to user input. Receives the demonstrated
/// widget, what happened, and the shared services.
pub type ControlAction = Box<dyn FnMut(&mut dyn DemoWidget, ControlInput, &mut ControlCx)>;

/// Identifies a readout control within one page.
pub type ReadoutId = usize;

pub enum ControlKind {
    Checkbox { checked: bool },
    Select { options: Vec<String>, selected: Option<usize> },
    Button,
    Note,
    Readout { id: ReadoutId, text: String },
}

/// One line inside a settings section.
pub struct Control {
    pub label: String,
    pub kind: ControlKind,
    action: Option<ControlAction>,
}

impl Control {
    pub fn checkbox<F>(label: impl Into<String>, checked: bool, action: F) -> Self
    where
        F: FnMut(&mut dyn DemoWidget, ControlInput, &mut ControlCx) + 'static,
    {
        Self {
            label: label.into(),
            kind: ControlKind::Checkbox { checked },
            action: Some(Box::new(action)),
        }
    }

    pub fn select<F>(
        label: impl Into<String>,
        options: Vec<String>,
        selected: Option<usize>,
        action: F,
    ) -> Self
    where
        F: FnMut(&mut dyn DemoWidget, ControlInput, &mut ControlCx) + 'static,
    {
        Self {
            label: label.into(),
            kind: ControlKind::Select { options, selected },
            action: Some(Box::new(action)),
        }
    }

    pub fn button<F>(label: impl Into<String>, action: F) -> Self
    where
        F: FnMut(&mut dyn DemoWidget, ControlInput, &mut ControlCx) + 'static,
    {
        Self {
            label: label.into(),
            kind: ControlKind::Button,
            action: Some(Box::new(action)),
        }
    }

    pub fn note(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ControlKind::Note,
            action: None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(
            self.kind,
            ControlKind::Checkbox { .. } | ControlKind::Select { .. } | ControlKind::Button
        )
    }
}

/// One row of controls appended by a configurator in one call.
pub type ControlGroup = Vec<Control>;

/// The controls produced for one satisfied capability.
pub struct SettingsSection {
    pub capability: CapabilityId,
    pub groups: Vec<ControlGroup>,
}

impl SettingsSection {
    pub fn label(&self) -> &'static str {
        self.capability.label()
    }
}

/// How a readout control changes in response to an event.
pub enum ReadoutUpdate {
    Set(String),
    /// Parse the current text as an integer and add one.
    Bump,
}

/// What a listener does with a matching event.
pub enum Reaction {
    /// Show a toast; receives the event and the widget's type name.
    Notify(fn(&FieldEvent, &str) -> Option<String>),
    /// Update a readout control in place.
    Readout {
        id: ReadoutId,
        update: fn(&FieldEvent) -> Option<ReadoutUpdate>,
    },
}

/// Event filter plus reaction, attached by a configurator.
pub struct Listener {
    pub kind: EventKind,
    pub reaction: Reaction,
}

/// Collects what a configurator produces: control groups, listeners and
/// readout identities.
pub struct SectionSink {
    groups: Vec<ControlGroup>,
    listeners: Vec<Listener>,
    next_readout: ReadoutId,
}

impl SectionSink {
    pub(crate) fn new() -> Self {
        Self {
            groups: Vec::new(),
            listeners: Vec::new(),
            next_readout: 0,
        }
    }

    /// Appends one group of controls; each call becomes one contiguous
    /// run of lines in the section.
    pub fn group(&mut self, controls: Vec<Control>) {
        self.groups.push(controls);
    }

    /// Attaches an event listener to the page being composed.
    pub fn listen(&mut self, kind: EventKind, reaction: Reaction) {
        self.listeners.push(Listener { kind, reaction });
    }

    /// Creates a readout control and hands back its identity for use in
    /// a [`Reaction::Readout`].
    pub fn readout(
        &mut self,
        label: impl Into<String>,
        initial: impl Into<String>,
    ) -> (Control, ReadoutId) {
        let id = self.next_readout;
        self.next_readout += 1;
        let control = Control {
            label: label.into(),
            kind: ControlKind::Readout {
                id,
                text: initial.into(),
            },
            action: None,
        };
        (control, id)
    }

    pub(crate) fn take_groups(&mut self) -> Vec<ControlGroup> {
        std::mem::take(&mut self.groups)
    }

    pub(crate) fn take_listeners(&mut self) -> Vec<Listener> {
        std::mem::take(&mut self.listeners)
    }
}

/// A composed demo page for one widget type.
pub struct Page {
    title: String,
    sections: Vec<SettingsSection>,
    listeners: Vec<Listener>,
    /// 0 is the widget row, 1..=interactive_count() the controls.
    cursor: usize,
    captured: bool,
    scroll: u16,
}

impl Page {
    /// Runs the dispatch engine and assembles the page.
    pub fn compose(
        widget: &mut dyn DemoWidget,
        name: &'static str,
        registry: &ConfiguratorRegistry,
    ) -> Self {
        let parts = dispatch::compose_settings(widget, registry);
        Self {
            title: format!("Demo page of {name}"),
            sections: parts.sections,
            listeners: parts.listeners,
            cursor: 0,
            captured: false,
            scroll: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[SettingsSection] {
        &self.sections
    }

    pub fn section_labels(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.label()).collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    fn interactive_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| s.groups.iter())
            .flat_map(|g| g.iter())
            .filter(|c| c.is_interactive())
            .count()
    }

    /// The interactive control the cursor is on, if it is not on the
    /// widget row.
    pub fn focused_control(&self) -> Option<&Control> {
        let nth = self.cursor.checked_sub(1)?;
        self.sections
            .iter()
            .flat_map(|s| s.groups.iter())
            .flat_map(|g| g.iter())
            .filter(|c| c.is_interactive())
            .nth(nth)
    }

    /// The nth interactive control, counted across all sections.
    fn control_mut(&mut self, nth: usize) -> Option<&mut Control> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.groups.iter_mut())
            .flat_map(|g| g.iter_mut())
            .filter(|c| c.is_interactive())
            .nth(nth)
    }

    fn activate(&mut self, widget: &mut dyn DemoWidget, cx: &mut ControlCx) {
        let Some(nth) = self.cursor.checked_sub(1) else {
            return;
        };
        let Some(control) = self.control_mut(nth) else {
            return;
        };
        let input = match &mut control.kind {
            ControlKind::Checkbox { checked } => {
                *checked = !*checked;
                ControlInput::Toggled(*checked)
            }
            ControlKind::Select { options, selected } => {
                if options.is_empty() {
                    return;
                }
                let next = selected.map(|s| (s + 1) % options.len()).unwrap_or(0);
                *selected = Some(next);
                ControlInput::Chosen(next)
            }
            ControlKind::Button => ControlInput::Pressed,
            ControlKind::Note | ControlKind::Readout { .. } => return,
        };
        if let Some(action) = control.action.as_mut() {
            action(widget, input, cx);
        }
    }

    fn cycle(&mut self, forward: bool, widget: &mut dyn DemoWidget, cx: &mut ControlCx) {
        let Some(nth) = self.cursor.checked_sub(1) else {
            return;
        };
        let Some(control) = self.control_mut(nth) else {
            return;
        };
        let ControlKind::Select { options, selected } = &mut control.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let len = options.len();
        let next = match (*selected, forward) {
            (Some(s), true) => (s + 1) % len,
            (Some(s), false) => (s + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        *selected = Some(next);
        let input = ControlInput::Chosen(next);
        if let Some(action) = control.action.as_mut() {
            action(widget, input, cx);
        }
    }

    /// Routes one key. Returns true if the page consumed it.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        widget: &mut dyn DemoWidget,
        cx: &mut ControlCx,
    ) -> bool {
        if self.captured {
            if key.code == KeyCode::Esc {
                self.captured = false;
                widget.set_focused(false);
            } else {
                widget.handle_key(key);
            }
            // capture swallows everything so typing can never fall
            // through to the shell bindings
            return true;
        }
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(self.interactive_count());
                true
            }
            KeyCode::Enter if self.cursor == 0 => {
                self.captured = true;
                widget.set_focused(true);
                true
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.cursor > 0 => {
                self.activate(widget, cx);
                true
            }
            KeyCode::Left if self.cursor > 0 => {
                self.cycle(false, widget, cx);
                true
            }
            KeyCode::Right if self.cursor > 0 => {
                self.cycle(true, widget, cx);
                true
            }
            _ => false,
        }
    }

    /// Feeds drained widget events to the page's listeners.
    pub fn deliver(
        &mut self,
        events: &[FieldEvent],
        type_name: &str,
        notifications: &mut Notifications,
    ) {
        let mut messages = Vec::new();
        let mut updates = Vec::new();
        for event in events {
            for listener in &self.listeners {
                if listener.kind != event.kind() {
                    continue;
                }
                match listener.reaction {
                    Reaction::Notify(format) => {
                        if let Some(message) = format(event, type_name) {
                            messages.push(message);
                        }
                    }
                    Reaction::Readout { id, update } => {
                        if let Some(change) = update(event) {
                            updates.push((id, change));
                        }
                    }
                }
            }
        }
        for message in messages {
            notifications.show(message);
        }
        for (id, change) in updates {
            self.apply_readout(id, change);
        }
    }

    fn apply_readout(&mut self, id: ReadoutId, change: ReadoutUpdate) {
        for section in &mut self.sections {
            for group in &mut section.groups {
                for control in group {
                    if let ControlKind::Readout { id: this, text } = &mut control.kind {
                        if *this != id {
                            continue;
                        }
                        match &change {
                            ReadoutUpdate::Set(value) => *text = value.clone(),
                            ReadoutUpdate::Bump => {
                                let n: u64 = text.trim().parse().unwrap_or(0);
                                *text = (n + 1).to_string();
                            }
                        }
                        return;
                    }
                }
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, widget: &mut dyn DemoWidget) {
        let widget_height = widget.desired_height().min(area.height.saturating_sub(2));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(widget_height),
                Constraint::Min(0),
            ])
            .split(area);

        let mut title_spans = vec![Span::styled(
            self.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if self.cursor == 0 && !self.captured {
            title_spans.push(Span::styled(
                "  ▸ Enter edits the widget",
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(title_spans)), chunks[0]);

        widget.render(frame, chunks[1], self.captured);

        let (lines, cursor_row) = self.settings_lines();
        let height = chunks[2].height as usize;
        if self.cursor == 0 {
            self.scroll = 0;
        } else if let Some(row) = cursor_row {
            if row < self.scroll as usize {
                self.scroll = row as u16;
            } else if height > 0 && row >= self.scroll as usize + height {
                self.scroll = (row + 1 - height) as u16;
            }
        }
        let paragraph = Paragraph::new(lines).scroll((self.scroll, 0));
        frame.render_widget(paragraph, chunks[2]);
    }

    /// Renders the settings sections to lines, returning the row of the
    /// focused control, if any control is focused.
    fn settings_lines(&self) -> (Vec<Line<'static>>, Option<usize>) {
        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut cursor_row = None;
        let mut nth = 0usize;
        for section in &self.sections {
            lines.push(Line::styled(
                format!("Configuration options for {}", section.label()),
                header_style,
            ));
            for group in &section.groups {
                for control in group {
                    let focused = if control.is_interactive() {
                        nth += 1;
                        self.cursor == nth
                    } else {
                        false
                    };
                    if focused {
                        cursor_row = Some(lines.len());
                    }
                    lines.push(control_line(control, focused));
                }
            }
            lines.push(Line::raw(""));
        }
        (lines, cursor_row)
    }
}

fn control_line(control: &Control, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow)
    } else {
        Style::default()
    };
    let text = match &control.kind {
        ControlKind::Checkbox { checked } => {
            format!("{marker}[{}] {}", if *checked { "x" } else { " " }, control.label)
        }
        ControlKind::Select { options, selected } => {
            let value = selected
                .and_then(|s| options.get(s))
                .map(String::as_str)
                .unwrap_or("(not set)");
            format!("{marker}{}: ◄ {value} ►", control.label)
        }
        ControlKind::Button => format!("{marker}[ {} ]", control.label),
        ControlKind::Note => {
            return Line::styled(
                format!("  {}", control.label),
                Style::default().add_modifier(Modifier::DIM),
            );
        }
        ControlKind::Readout { text, .. } => format!("  {}: {text}", control.label),
    };
    Line::styled(text, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_update(event: &FieldEvent) -> Option<ReadoutUpdate> {
        match event {
            FieldEvent::ExitAttempted { .. } => Some(ReadoutUpdate::Bump),
            _ => None,
        }
    }

    fn selection_update(event: &FieldEvent) -> Option<ReadoutUpdate> {
        match event {
            FieldEvent::TextSelected(text) => Some(ReadoutUpdate::Set(format!("<{text}>"))),
            _ => None,
        }
    }

    fn page_with_readouts() -> Page {
        let mut sink = SectionSink::new();
        let (counter, counter_id) = sink.readout("attempts", "0");
        let (selection, selection_id) = sink.readout("selection", "<>");
        sink.group(vec![counter, selection]);
        sink.listen(
            EventKind::ExitAttempted,
            Reaction::Readout {
                id: counter_id,
                update: counter_update,
            },
        );
        sink.listen(
            EventKind::TextSelected,
            Reaction::Readout {
                id: selection_id,
                update: selection_update,
            },
        );
        Page {
            title: "Demo page of Test".into(),
            sections: vec![SettingsSection {
                capability: CapabilityId::UnloadNotifier,
                groups: sink.take_groups(),
            }],
            listeners: sink.take_listeners(),
            cursor: 0,
            captured: false,
            scroll: 0,
        }
    }

    fn readout_text(page: &Page, id: ReadoutId) -> String {
        for section in &page.sections {
            for group in &section.groups {
                for control in group {
                    if let ControlKind::Readout { id: this, text } = &control.kind {
                        if *this == id {
                            return text.clone();
                        }
                    }
                }
            }
        }
        panic!("no readout {id}");
    }

    #[test]
    fn bump_counts_matching_events_only() {
        let mut page = page_with_readouts();
        let mut notifications = Notifications::new();
        page.deliver(
            &[
                FieldEvent::ExitAttempted { queried: true },
                FieldEvent::Focused,
                FieldEvent::ExitAttempted { queried: true },
            ],
            "Test",
            &mut notifications,
        );
        assert_eq!(readout_text(&page, 0), "2");
    }

    #[test]
    fn set_replaces_readout_text() {
        let mut page = page_with_readouts();
        let mut notifications = Notifications::new();
        page.deliver(
            &[FieldEvent::TextSelected("abc".into())],
            "Test",
            &mut notifications,
        );
        assert_eq!(readout_text(&page, 1), "<abc>");
    }

    #[test]
    fn readouts_are_not_interactive() {
        let page = page_with_readouts();
        assert_eq!(page.interactive_count(), 0);
    }
}
