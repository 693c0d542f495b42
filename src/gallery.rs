//! # Gallery
//!
//! Owns the demonstrated widget singletons and the per-type page cache.
//! Tab 0 is the informational tab; tabs 1.. map to the widgets in
//! registration order.
//!
//! Pages are composed lazily on first selection and cached. The cache is
//! what keeps repeated visits from attaching a second set of listeners
//! to the shared widget instance: composing runs configurators, and
//! configurators attach listeners, so a page is composed at most once
//! per type.

use std::any::TypeId;
use std::collections::HashMap;

use crate::notify::Notifications;
use crate::page::Page;
use crate::registry::{ConfiguratorRegistry, SetupError};
use crate::widgets::DemoWidget;

/// One demonstrated widget singleton.
pub struct WidgetEntry {
    pub type_id: TypeId,
    pub name: &'static str,
    pub widget: Box<dyn DemoWidget>,
}

/// Widget singletons plus the page cache and tab selection.
pub struct Gallery {
    entries: Vec<WidgetEntry>,
    pages: HashMap<TypeId, Page>,
    selected: usize,
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            pages: HashMap::new(),
            selected: 0,
        }
    }

    /// Adds a widget singleton. Each concrete type may be demonstrated
    /// only once.
    pub fn add<W: DemoWidget>(&mut self, widget: W) -> Result<(), SetupError> {
        let type_id = TypeId::of::<W>();
        let name = widget.type_name();
        if self.entries.iter().any(|e| e.type_id == type_id) {
            return Err(SetupError::DuplicateWidget(name));
        }
        self.entries.push(WidgetEntry {
            type_id,
            name,
            widget: Box::new(widget),
        });
        Ok(())
    }

    pub fn widget_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of tabs, including the informational one.
    pub fn tab_count(&self) -> usize {
        self.entries.len() + 1
    }

    pub fn tab_titles(&self) -> Vec<&'static str> {
        std::iter::once("About")
            .chain(self.entries.iter().map(|e| e.name))
            .collect()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Selects a tab, composing its page on first visit.
    pub fn select(&mut self, index: usize, registry: &ConfiguratorRegistry) {
        self.selected = index.min(self.entries.len());
        self.ensure_page(registry);
    }

    pub fn next_tab(&mut self, registry: &ConfiguratorRegistry) {
        let next = (self.selected + 1) % self.tab_count();
        self.select(next, registry);
    }

    pub fn prev_tab(&mut self, registry: &ConfiguratorRegistry) {
        let prev = (self.selected + self.tab_count() - 1) % self.tab_count();
        self.select(prev, registry);
    }

    fn ensure_page(&mut self, registry: &ConfiguratorRegistry) {
        let Some(index) = self.selected.checked_sub(1) else {
            return;
        };
        let entry = &mut self.entries[index];
        if self.pages.contains_key(&entry.type_id) {
            return;
        }
        tracing::info!(widget = entry.name, "composing demo page");
        let page = Page::compose(entry.widget.as_mut(), entry.name, registry);
        self.pages.insert(entry.type_id, page);
    }

    /// The selected widget and its page; `None` on the informational
    /// tab.
    pub fn current_mut(&mut self) -> Option<(&mut WidgetEntry, &mut Page)> {
        let index = self.selected.checked_sub(1)?;
        let entry = self.entries.get_mut(index)?;
        let page = self.pages.get_mut(&entry.type_id)?;
        Some((entry, page))
    }

    /// How many pages have been composed so far.
    pub fn composed_pages(&self) -> usize {
        self.pages.len()
    }

    /// The demonstrated instance of a concrete widget type.
    pub fn find_mut<W: DemoWidget>(&mut self) -> Option<&mut W> {
        self.entries
            .iter_mut()
            .find_map(|e| e.widget.as_any_mut().downcast_mut::<W>())
    }

    /// All demonstrated widgets, in tab order.
    pub fn widgets_mut(&mut self) -> impl Iterator<Item = &mut (dyn DemoWidget + 'static)> + '_ {
        self.entries.iter_mut().map(|e| e.widget.as_mut())
    }

    /// Drains every widget's event outbox into its page's listeners.
    /// Widgets whose page has not been composed yet have no listeners,
    /// so their events are dropped.
    pub fn pump_events(&mut self, notifications: &mut Notifications) {
        for entry in &mut self.entries {
            let events = entry.widget.drain_events();
            if events.is_empty() {
                continue;
            }
            if let Some(page) = self.pages.get_mut(&entry.type_id) {
                page.deliver(&events, entry.name, notifications);
            }
        }
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::text::{TextArea, TextField};

    #[test]
    fn duplicate_widget_type_is_rejected() {
        let mut gallery = Gallery::new();
        gallery.add(TextField::new("a")).unwrap();
        gallery.add(TextArea::new("b")).unwrap();
        assert!(matches!(
            gallery.add(TextField::new("c")),
            Err(SetupError::DuplicateWidget("TextField"))
        ));
    }

    #[test]
    fn info_tab_has_no_page() {
        let mut gallery = Gallery::new();
        gallery.add(TextField::new("a")).unwrap();
        let registry = ConfiguratorRegistry::new();
        gallery.select(0, &registry);
        assert!(gallery.current_mut().is_none());
        assert_eq!(gallery.composed_pages(), 0);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut gallery = Gallery::new();
        gallery.add(TextField::new("a")).unwrap();
        let registry = ConfiguratorRegistry::new();
        gallery.prev_tab(&registry);
        assert_eq!(gallery.selected(), 1);
        gallery.next_tab(&registry);
        assert_eq!(gallery.selected(), 0);
    }
}
