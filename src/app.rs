//! # Application State
//!
//! Ties the pieces together: the gallery of demonstrated widgets, the
//! two registries, the notification strip and the quit flow. All state
//! changes happen on the single UI thread; nothing here locks.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};

use crate::gallery::Gallery;
use crate::notify::Notifications;
use crate::page::ControlCx;
use crate::registry::{ConfiguratorRegistry, SideEffectRegistry};
use crate::widgets::traits::{HasLocale, UnloadGuardOps};
use crate::widgets::unload::UnloadGuard;
use crate::widgets::DemoWidget;

/// Top-level application state.
pub struct App {
    pub gallery: Gallery,
    pub registry: ConfiguratorRegistry,
    pub side_effects: SideEffectRegistry,
    pub notifications: Notifications,
    /// The quit confirmation dialog is open.
    pub confirm_exit: bool,
    pub should_quit: bool,
    pub tick_rate: Duration,
}

impl App {
    pub fn new(
        gallery: Gallery,
        registry: ConfiguratorRegistry,
        side_effects: SideEffectRegistry,
    ) -> Self {
        Self {
            gallery,
            registry,
            side_effects,
            notifications: Notifications::new(),
            confirm_exit: false,
            should_quit: false,
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Called once per frame.
    pub fn tick(&mut self) {
        self.notifications.tick();
    }

    /// Selects a tab by index, composing its page if needed.
    pub fn select_tab(&mut self, index: usize) {
        self.gallery.select(index, &self.registry);
    }

    /// Applies a locale to every locale-aware widget, used by the
    /// `--locale` flag.
    pub fn apply_locale(&mut self, locale: crate::locale::Locale) {
        for widget in self.gallery.widgets_mut() {
            if let Some(has_locale) = widget.as_has_locale() {
                has_locale.set_locale(locale);
            }
        }
    }

    /// Routes one pressed key.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.confirm_exit {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.should_quit = true;
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.confirm_exit = false;
                }
                _ => {}
            }
            return;
        }

        let consumed = {
            let App {
                gallery,
                side_effects,
                notifications,
                ..
            } = self;
            let consumed = match gallery.current_mut() {
                Some((entry, page)) => {
                    let mut cx = ControlCx {
                        notifications: &mut *notifications,
                        side_effects: &*side_effects,
                    };
                    page.handle_key(key, entry.widget.as_mut(), &mut cx)
                }
                None => false,
            };
            gallery.pump_events(notifications);
            consumed
        };
        if consumed {
            return;
        }

        match key.code {
            KeyCode::Tab => self.gallery.next_tab(&self.registry),
            KeyCode::BackTab => self.gallery.prev_tab(&self.registry),
            KeyCode::Char('q') | KeyCode::Esc => self.request_quit(),
            _ => {}
        }
    }

    /// Quit request, subject to the unload guard's interception.
    fn request_quit(&mut self) {
        if let Some(guard) = self.gallery.find_mut::<UnloadGuard>() {
            if guard.query_on_exit() {
                guard.record_attempt();
                self.confirm_exit = true;
                self.gallery.pump_events(&mut self.notifications);
                return;
            }
        }
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configurators;
    use crate::widgets::traits::UnloadGuardOps as _;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        App::new(
            configurators::standard_gallery().unwrap(),
            configurators::standard_registry().unwrap(),
            configurators::standard_side_effects().unwrap(),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_without_guard_query_is_immediate() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
        assert!(!app.confirm_exit);
    }

    #[test]
    fn guard_query_intercepts_quit() {
        let mut app = app();
        app.gallery
            .find_mut::<UnloadGuard>()
            .unwrap()
            .set_query_on_exit(true);

        app.handle_key(press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert!(app.confirm_exit);
        assert_eq!(app.gallery.find_mut::<UnloadGuard>().unwrap().attempts(), 1);

        // Declining keeps the app running.
        app.handle_key(press(KeyCode::Char('n')));
        assert!(!app.should_quit);
        assert!(!app.confirm_exit);

        // Confirming quits.
        app.handle_key(press(KeyCode::Char('q')));
        app.handle_key(press(KeyCode::Char('y')));
        assert!(app.should_quit);
    }

    #[test]
    fn tab_keys_cycle_the_gallery() {
        let mut app = app();
        assert_eq!(app.gallery.selected(), 0);
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.gallery.selected(), 1);
        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.gallery.selected(), 0);
    }

    #[test]
    fn locale_flag_touches_only_locale_aware_widgets() {
        let mut app = app();
        app.apply_locale(crate::locale::GERMANY);
        use crate::widgets::traits::HasLocale as _;
        let field = app
            .gallery
            .find_mut::<crate::widgets::number::IntegerField>()
            .unwrap();
        assert_eq!(
            field.as_has_locale().unwrap().locale(),
            crate::locale::GERMANY
        );
    }
}
