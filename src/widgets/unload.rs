//! Exit interception.
//!
//! `UnloadGuard` demonstrates the exit-interception contract: when its
//! query flag is on, the shell asks for confirmation before quitting and
//! the guard records the intercepted attempt.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::capability::CapabilityId;
use crate::widgets::traits::UnloadGuardOps;
use crate::widgets::{DemoWidget, FieldEvent, Outbox};

const UNLOAD_GUARD_CAPS: &[CapabilityId] = &[CapabilityId::UnloadNotifier];

/// Counts intercepted exit attempts.
pub struct UnloadGuard {
    query: bool,
    attempts: u32,
    outbox: Outbox,
}

impl UnloadGuard {
    pub fn new(query: bool) -> Self {
        Self {
            query,
            attempts: 0,
            outbox: Outbox::default(),
        }
    }

    /// Called by the shell when it intercepts a quit request.
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
        tracing::info!(attempts = self.attempts, "exit attempt intercepted");
        self.outbox.push(FieldEvent::ExitAttempted { queried: true });
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl UnloadGuardOps for UnloadGuard {
    fn set_query_on_exit(&mut self, query: bool) {
        self.query = query;
    }

    fn query_on_exit(&self) -> bool {
        self.query
    }
}

impl DemoWidget for UnloadGuard {
    fn type_name(&self) -> &'static str {
        "UnloadGuard"
    }

    fn capabilities(&self) -> &'static [CapabilityId] {
        UNLOAD_GUARD_CAPS
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _captured: bool) {
        let block = Block::default().borders(Borders::ALL).title("UnloadGuard");
        let state = if self.query {
            "Quit interception is ON. Press q to see it in action."
        } else {
            "Quit interception is OFF."
        };
        let lines = vec![
            Line::raw(state),
            Line::styled(
                format!("Intercepted exit attempts so far: {}", self.attempts),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
        frame.render_widget(paragraph, area);
    }

    fn desired_height(&self) -> u16 {
        4
    }

    fn drain_events(&mut self) -> Vec<FieldEvent> {
        self.outbox.drain()
    }

    fn as_unload_guard(&mut self) -> Option<&mut dyn crate::widgets::traits::UnloadGuardOps> {
        Some(self)
    }

    crate::impl_widget_any!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_accumulate_and_emit() {
        let mut guard = UnloadGuard::new(true);
        guard.record_attempt();
        guard.record_attempt();
        assert_eq!(guard.attempts(), 2);
        let events = guard.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], FieldEvent::ExitAttempted { queried: true });
    }
}
