//! Ratatui-based terminal UI.
//!
//! One screen: a status line, a chart/table body, and a key hint bar. Fetching
//! is triggered by a key press (a single, non-retrying read); the dark/light
//! theme is one field on [`App`], passed explicitly into draw code.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::pipeline::{self, RunOutput};
use crate::cli::TuiArgs;
use crate::data::RowSource;
use crate::domain::{Rgb, Theme};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::EquityChart;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Chart,
    Table,
}

struct App {
    theme: Theme,
    view: View,
    status: String,
    status_is_error: bool,
    source: Box<dyn RowSource>,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: TuiArgs) -> Result<Self, AppError> {
        let source = crate::app::make_source(&args.fetch)?;
        let status = format!("Ready. Press 'f' to fetch from {}.", source.describe());
        Ok(Self {
            theme: args.theme,
            view: View::Chart,
            status,
            status_is_error: false,
            source,
            run: None,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('f') | KeyCode::Enter => self.fetch(),
            KeyCode::Char('t') => {
                self.theme = self.theme.toggled();
            }
            KeyCode::Tab | KeyCode::Char('v') => {
                self.view = match self.view {
                    View::Chart => View::Table,
                    View::Table => View::Chart,
                };
            }
            _ => {}
        }
        false
    }

    /// One blocking fetch + pivot. On failure the previous dataset is cleared
    /// so the error banner is never shown over stale bars.
    fn fetch(&mut self) {
        match pipeline::run_fetch(self.source.as_ref()) {
            Ok(run) => {
                let mut status = format!(
                    "Success: fetched {} records, {} chart dates.",
                    run.rows.len(),
                    run.dataset.axis.len()
                );
                if run.unparseable_dates > 0 {
                    status.push_str(&format!(" ({} unusable dates)", run.unparseable_dates));
                }
                self.status = status;
                self.status_is_error = false;
                self.run = Some(run);
            }
            Err(e) => {
                self.status = format!("Error: {e}");
                self.status_is_error = true;
                self.run = None;
            }
        }
    }

    fn draw(&self, f: &mut ratatui::Frame) {
        let base = base_style(self.theme);
        f.render_widget(Block::default().style(base), f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(f.area());

        self.draw_title(f, chunks[0]);
        match self.view {
            View::Chart => self.draw_chart(f, chunks[1]),
            View::Table => self.draw_table(f, chunks[1]),
        }
        self.draw_status(f, chunks[2]);
    }

    fn draw_title(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let base = base_style(self.theme);
        let hint = format!(
            "f: fetch | tab: chart/table | t: theme ({}) | q: quit",
            self.theme.display_name()
        );
        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Equity Share Charts",
                base.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(hint, base)),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).style(base));
        f.render_widget(title, area);
    }

    fn draw_chart(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let base = base_style(self.theme);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Chart")
            .style(base);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(run) = &self.run else {
            self.draw_empty_state(f, inner, "No data loaded. Press 'f' to fetch.");
            return;
        };
        if run.dataset.is_empty() {
            self.draw_empty_state(f, inner, "Fetch returned no plottable rows.");
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(24)])
            .split(inner);

        f.render_widget(
            EquityChart {
                dataset: &run.dataset,
                theme: self.theme,
            },
            chunks[0],
        );
        self.draw_legend(f, chunks[1], run);
    }

    fn draw_legend(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect, run: &RunOutput) {
        let base = base_style(self.theme);
        let mut lines = Vec::new();
        for s in &run.dataset.series {
            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(rgb_color(s.color))),
                Span::styled(s.label.clone(), base),
            ]));
        }
        if let Some(ov) = &run.dataset.overlay {
            lines.push(Line::from(vec![
                Span::styled("┄ ", Style::default().fg(rgb_color(ov.color))),
                Span::styled(ov.label.clone(), base),
            ]));
        }
        let legend = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Legend").style(base));
        f.render_widget(legend, area);
    }

    fn draw_table(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let base = base_style(self.theme);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Table")
            .style(base);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(run) = &self.run else {
            self.draw_empty_state(f, inner, "No data loaded. Press 'f' to fetch.");
            return;
        };
        let table = crate::report::format_row_table(&run.rows);
        f.render_widget(Paragraph::new(table).style(base), inner);
    }

    fn draw_empty_state(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect, msg: &str) {
        let style = base_style(self.theme).add_modifier(Modifier::DIM);
        f.render_widget(
            Paragraph::new(msg.to_string())
                .style(style)
                .alignment(Alignment::Center),
            area,
        );
    }

    fn draw_status(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let base = base_style(self.theme);
        let style = if self.status_is_error {
            Style::default().fg(Color::Red)
        } else {
            base
        };
        let status = Paragraph::new(Span::styled(self.status.clone(), style))
            .block(Block::default().borders(Borders::ALL).title("Status").style(base));
        f.render_widget(status, area);
    }
}

fn base_style(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
    }
}

fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
