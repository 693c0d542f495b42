//! # Terminal Shell
//!
//! Owns the terminal lifecycle and the frame layout: tab strip on top,
//! the selected page (or the informational tab) in the middle, the
//! notification strip at the bottom, and the quit confirmation dialog
//! on top of everything when the unload guard intercepts an exit.

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};
use std::io;

use crate::app::App;

pub fn run_tui(app: &mut App) -> io::Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;
        app.tick();
        if app.should_quit {
            return Ok(());
        }

        if event::poll(app.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(f.size());

    let tabs = Tabs::new(app.gallery.tab_titles())
        .select(app.gallery.selected())
        .block(Block::default().borders(Borders::ALL).title("Field gallery"))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        );
    f.render_widget(tabs, chunks[0]);

    match app.gallery.current_mut() {
        Some((entry, page)) => page.render(f, chunks[1], entry.widget.as_mut()),
        None => render_info(f, chunks[1]),
    }

    render_notifications(f, chunks[2], app);

    if app.confirm_exit {
        render_confirm_dialog(f);
    }
}

fn render_info(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            "Enhanced field widgets demo",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("Every tab demonstrates one widget together with the configuration"),
        Line::raw("controls generated from the capabilities its type satisfies."),
        Line::raw(""),
        Line::raw("Keys:"),
        Line::raw("  Tab / Shift-Tab   switch tabs"),
        Line::raw("  Up / Down         move between the widget and its controls"),
        Line::raw("  Enter             edit the widget (Esc leaves edit mode)"),
        Line::raw("  Space / Enter     toggle or press the focused control"),
        Line::raw("  Left / Right      cycle the focused select control"),
        Line::raw("  q                 quit (the UnloadGuard tab can intercept this)"),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("About"));
    f.render_widget(paragraph, area);
}

fn render_notifications(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let count = app.notifications.len();
    let lines: Vec<Line> = app
        .notifications
        .texts()
        .skip(count.saturating_sub(visible))
        .map(Line::raw)
        .collect();
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Notifications"),
    );
    f.render_widget(paragraph, area);
}

fn render_confirm_dialog(f: &mut Frame) {
    let area = centered_rect(44, 5, f.size());
    f.render_widget(Clear, area);
    let dialog = Paragraph::new(vec![
        Line::raw("Really quit?"),
        Line::raw(""),
        Line::raw("y / Enter to quit, n / Esc to stay"),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title("Leaving already?"),
    );
    f.render_widget(dialog, area);
}

/// A fixed-size rectangle centered in `r`.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
