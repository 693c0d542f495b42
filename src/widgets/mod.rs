//! # Demonstrated Widget Library
//!
//! The widgets shown by the gallery. Each widget is a plain struct that
//! renders itself into a ratatui frame, edits its own state from key
//! events while it holds input capture, and advertises the capability
//! contracts it fulfills.
//!
//! The rest of the crate talks to widgets exclusively through
//! [`DemoWidget`]: the declared capability set drives dispatch, the
//! accessor methods hand out the narrow capability traits, and the event
//! outbox carries widget-originated notifications back to the page.

use std::any::Any;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::capability::CapabilityId;

pub mod date;
pub mod grid;
pub mod number;
pub mod tabs;
pub mod text;
pub mod traits;
pub mod unload;

use self::traits::{
    CanSelectText, HasDatePattern, HasLocale, HasValue, ItemGridOps, NullValueAllowed,
    NumberFieldBase, TabStripOps, TerminalSelectionSource, UnloadGuardOps,
};

/// Something a widget wants the surrounding page to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The value changed; carries the new value as display text.
    ValueChanged(String),
    /// The widget gained input capture.
    Focused,
    /// The widget lost input capture.
    Blurred,
    /// The selected text changed; empty when the selection was cleared.
    TextSelected(String),
    /// An application exit was intercepted.
    ExitAttempted {
        /// Whether the user was asked to confirm.
        queried: bool,
    },
}

/// Discriminant of [`FieldEvent`], used by listeners to filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ValueChanged,
    Focused,
    Blurred,
    TextSelected,
    ExitAttempted,
}

impl FieldEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            FieldEvent::ValueChanged(_) => EventKind::ValueChanged,
            FieldEvent::Focused => EventKind::Focused,
            FieldEvent::Blurred => EventKind::Blurred,
            FieldEvent::TextSelected(_) => EventKind::TextSelected,
            FieldEvent::ExitAttempted { .. } => EventKind::ExitAttempted,
        }
    }
}

/// Per-widget queue of pending events, drained by the shell after every
/// input round.
#[derive(Debug, Default)]
pub struct Outbox {
    events: Vec<FieldEvent>,
}

impl Outbox {
    pub fn push(&mut self, event: FieldEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Interface between the gallery core and a demonstrated widget.
///
/// The accessor methods default to `None`; a widget overrides exactly
/// those matching its declared capability set. A declared capability
/// whose accessor stays `None` is a programming error that the
/// configurators surface with a panic.
pub trait DemoWidget: Any {
    /// Short type name shown in tab titles, page headers and
    /// notifications.
    fn type_name(&self) -> &'static str;

    /// Directly declared capability contracts. Implied contracts are
    /// resolved by [`crate::capability::satisfies`].
    fn capabilities(&self) -> &'static [CapabilityId];

    /// Draws the widget. `captured` is true while the widget holds
    /// input capture.
    fn render(&mut self, frame: &mut Frame, area: Rect, captured: bool);

    /// Rows the widget wants for itself on the page.
    fn desired_height(&self) -> u16 {
        3
    }

    /// Handles a key while the widget holds input capture. Returns true
    /// if the key was consumed.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let _ = key;
        false
    }

    /// Called when input capture is granted or released.
    fn set_focused(&mut self, focused: bool) {
        let _ = focused;
    }

    /// Takes all pending events out of the widget.
    fn drain_events(&mut self) -> Vec<FieldEvent>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn as_has_value(&mut self) -> Option<&mut dyn HasValue> {
        None
    }
    fn as_has_locale(&mut self) -> Option<&mut dyn HasLocale> {
        None
    }
    fn as_select_text(&mut self) -> Option<&mut dyn CanSelectText> {
        None
    }
    fn as_terminal_selection(&mut self) -> Option<&mut dyn TerminalSelectionSource> {
        None
    }
    fn as_number_base(&mut self) -> Option<&mut dyn NumberFieldBase> {
        None
    }
    fn as_nullable(&mut self) -> Option<&mut dyn NullValueAllowed> {
        None
    }
    fn as_date_pattern(&mut self) -> Option<&mut dyn HasDatePattern> {
        None
    }
    fn as_item_grid(&mut self) -> Option<&mut dyn ItemGridOps> {
        None
    }
    fn as_tab_strip(&mut self) -> Option<&mut dyn TabStripOps> {
        None
    }
    fn as_unload_guard(&mut self) -> Option<&mut dyn UnloadGuardOps> {
        None
    }
}

/// Implements the `Any` plumbing of [`DemoWidget`].
#[macro_export]
macro_rules! impl_widget_any {
    () => {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}
