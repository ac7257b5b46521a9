//! Terminal viewer for the `scrollnorm` binary.
//!
//! Shows the running totals and the last delta a [`Normalizer`](crate::Normalizer) fed by
//! a [`TerminalHost`](crate::host::TerminalHost) dispatched. It only renders numbers; it
//! never scrolls anything itself.

use crate::error::Result;
use crate::event::{EventType, ScrollEvent};
use ratatui::crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Everything the viewer displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollView {
    pub total_x: f64,
    pub total_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub dispatches: u64,
    pub last_source: Option<EventType>,
    pub bound: Vec<EventType>,
}

impl ScrollView {
    pub fn new(bound: Vec<EventType>) -> Self {
        Self {
            bound,
            ..Self::default()
        }
    }

    /// Copy the fields of a dispatched event.
    pub fn record(&mut self, event: &ScrollEvent<'_>) {
        self.total_x = event.total_x;
        self.total_y = event.total_y;
        self.delta_x = event.delta_x;
        self.delta_y = event.delta_y;
        self.dispatches += 1;
        self.last_source = Some(event.source.event_type());
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let bound = self
            .bound
            .iter()
            .map(|event| event.name())
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            Line::from(format!(
                "total  x: {:>10.1}   y: {:>10.1}",
                self.total_x, self.total_y
            )),
            Line::from(format!(
                "delta  x: {:>10.1}   y: {:>10.1}",
                self.delta_x, self.delta_y
            )),
            Line::from(format!(
                "dispatches: {} (last: {})",
                self.dispatches,
                self.last_source.map_or("-", EventType::name)
            )),
            Line::from(format!("bound: {bound}")),
        ]
    }
}

/// Draw the view into `frame`.
pub fn render(frame: &mut Frame, view: &ScrollView) {
    let size = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(size);

    render_body(frame, chunks[0], view);

    let status = Paragraph::new("wheel, drag or arrow keys | q/Esc quit")
        .style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(status, chunks[1]);
}

fn render_body(frame: &mut Frame, area: Rect, view: &ScrollView) {
    let body = Paragraph::new(view.lines())
        .block(Block::default().borders(Borders::ALL).title("scrollnorm"));
    frame.render_widget(body, area);
}

/// Whether a terminal event should end the viewer.
pub fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        }
        _ => false,
    }
}

/// Owns the terminal while the viewer runs.
pub struct TerminalViewer {
    terminal: Option<CrosstermTerminal>,
}

impl TerminalViewer {
    pub fn new() -> Self {
        Self { terminal: None }
    }

    /// Enter raw mode and the alternate screen with mouse capture.
    pub fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    pub fn draw(&mut self, view: &ScrollView) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            terminal.draw(|frame| render(frame, view))?;
        }
        Ok(())
    }

    pub fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            self.terminal = None;
        }
        Ok(())
    }
}

impl Default for TerminalViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalViewer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
