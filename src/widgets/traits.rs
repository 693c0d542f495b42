//! Narrow capability traits.
//!
//! One small trait per capability contract. Configurators receive these
//! through the accessors on [`super::DemoWidget`] and never see concrete
//! widget types.

use crate::locale::Locale;
use crate::widgets::date::DatePattern;
use crate::widgets::grid::CellGenerator;
use crate::widgets::tabs::TabContentStyle;

/// A value with a read-only toggle.
pub trait HasValue {
    /// Current value rendered as display text. Empty when the value is
    /// null.
    fn value_text(&self) -> String;
    fn set_read_only(&mut self, read_only: bool);
    fn read_only(&self) -> bool;
}

/// Formatting follows a settable locale.
pub trait HasLocale {
    fn locale(&self) -> Locale;
    fn set_locale(&mut self, locale: Locale);
}

/// Programmatic text selection.
pub trait CanSelectText {
    fn select_all(&mut self);
    fn select_none(&mut self);
}

/// Selection may also be initiated from the keyboard (Ctrl-A while the
/// widget holds capture), when enabled.
pub trait TerminalSelectionSource {
    fn set_terminal_selection(&mut self, enabled: bool);
    fn terminal_selection(&self) -> bool;
}

/// Knobs shared by the numeric fields.
pub trait NumberFieldBase {
    fn set_autoselect(&mut self, autoselect: bool);
    fn autoselect(&self) -> bool;
    fn set_grouping_hidden_on_focus(&mut self, hidden: bool);
    fn grouping_hidden_on_focus(&self) -> bool;
    fn set_prefix(&mut self, prefix: Option<&'static str>);
    fn has_prefix(&self) -> bool;
    fn set_suffix(&mut self, suffix: Option<&'static str>);
    fn has_suffix(&self) -> bool;
    fn set_align_right(&mut self, align_right: bool);
    fn align_right(&self) -> bool;
}

/// An empty input may represent a null value.
pub trait NullValueAllowed {
    fn set_null_value_allowed(&mut self, allowed: bool);
    fn null_value_allowed(&self) -> bool;
}

/// Date display follows a settable pattern; `None` falls back to the
/// locale's own ordering.
pub trait HasDatePattern {
    fn set_date_pattern(&mut self, pattern: Option<DatePattern>);
    fn date_pattern(&self) -> Option<DatePattern>;
}

/// Layout and cell production of the item grid.
pub trait ItemGridOps {
    fn set_column_count(&mut self, columns: usize);
    fn column_count(&self) -> usize;
    fn set_cell_generator(&mut self, generator: CellGenerator);
}

/// Presentation knobs of the tab strip.
pub trait TabStripOps {
    fn set_multiline(&mut self, multiline: bool);
    fn multiline(&self) -> bool;
    fn set_content_style(&mut self, style: TabContentStyle);
    fn content_style(&self) -> TabContentStyle;
}

/// Exit interception.
pub trait UnloadGuardOps {
    fn set_query_on_exit(&mut self, query: bool);
    fn query_on_exit(&self) -> bool;
}
