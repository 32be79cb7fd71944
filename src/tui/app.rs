//! Main TUI application logic.

use super::{chart_view, events, LogBuffer, Theme};
use crate::error::AppError;
use crate::services::Pipeline;
use crate::types::ChartSpec;
use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::Duration,
};
use tracing::{info, warn};

/// What the run loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Refresh,
    Quit,
}

/// Main TUI application.
pub struct App {
    page_title: String,
    subtitle: String,
    chart: ChartSpec,
    cursor: NaiveDate,
    status: Option<String>,
    theme: Theme,
    log_buffer: Arc<LogBuffer>,
    should_quit: bool,
}

impl App {
    /// Create a new TUI application around an initial chart.
    pub fn new(
        page_title: String,
        subtitle: String,
        chart: ChartSpec,
        log_buffer: Arc<LogBuffer>,
    ) -> Self {
        let cursor = chart.today.date;
        let mut app = Self {
            page_title,
            subtitle,
            chart,
            cursor,
            status: None,
            theme: Theme::default(),
            log_buffer,
            should_quit: false,
        };
        app.clamp_cursor();
        app
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Swap in a freshly composed chart, keeping the cursor where possible.
    pub fn set_chart(&mut self, chart: ChartSpec) {
        self.chart = chart;
        self.status = None;
        self.clamp_cursor();
    }

    /// Keep the previous chart and report why the refresh failed.
    pub fn set_error(&mut self, error: &AppError) {
        self.status = Some(format!("Refresh failed ({}): {}", error.kind(), error));
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    fn clamp_cursor(&mut self) {
        let (lo, hi) = self.chart.x_bounds();
        self.cursor = self.cursor.clamp(lo, hi);
    }

    fn move_cursor(&mut self, days: i64) {
        self.cursor += ChronoDuration::days(days);
        self.clamp_cursor();
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Action {
        if events::is_quit(key) {
            self.should_quit = true;
            return Action::Quit;
        }

        let (lo, hi) = self.chart.x_bounds();
        if events::is_key(key, KeyCode::Left) || events::is_key(key, KeyCode::Char('h')) {
            self.move_cursor(-1);
        } else if events::is_key(key, KeyCode::Right) || events::is_key(key, KeyCode::Char('l')) {
            self.move_cursor(1);
        } else if events::is_key(key, KeyCode::Home) {
            self.cursor = lo;
        } else if events::is_key(key, KeyCode::End) {
            self.cursor = hi;
        } else if events::is_key(key, KeyCode::Char('t')) {
            self.cursor = self.chart.today.date;
        } else if events::is_key(key, KeyCode::Char('r')) {
            return Action::Refresh;
        }
        Action::None
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Render the TUI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title
                Constraint::Min(10),   // Chart + hover
                Constraint::Length(5), // Logs
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(34)])
            .split(chunks[1]);

        chart_view::render_chart(frame, body[0], &self.chart, self.cursor, &self.theme);
        chart_view::render_hover(
            frame,
            body[1],
            &self.chart.hover_at(self.cursor),
            &self.theme,
        );

        self.render_logs(frame, chunks[2]);
        self.render_status_bar(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(Span::styled(self.page_title.clone(), self.theme.title())),
            Line::from(Span::styled(self.subtitle.clone(), self.theme.header())),
        ];
        let block = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border()),
        );
        frame.render_widget(block, area);
    }

    fn render_logs(&self, frame: &mut Frame, area: Rect) {
        let height = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = self
            .log_buffer
            .recent(height)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, self.theme.muted())))
            .collect();

        let block = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Logs")
                .border_style(self.theme.border()),
        );
        frame.render_widget(block, area);
    }

    /// Render status bar.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let text = match &self.status {
            Some(status) => Line::from(Span::styled(status.clone(), self.theme.error())),
            None => Line::from(vec![
                Span::styled("←/→", self.theme.muted()),
                Span::raw(" move  "),
                Span::styled("Home/End", self.theme.muted()),
                Span::raw(" jump  "),
                Span::styled("t", self.theme.muted()),
                Span::raw(" today  "),
                Span::styled("r", self.theme.muted()),
                Span::raw(" refresh  "),
                Span::styled("q", self.theme.muted()),
                Span::raw(" quit"),
            ]),
        };

        let block = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border()),
        );
        frame.render_widget(block, area);
    }
}

/// Run the TUI application until the user quits.
pub async fn run_tui(app: App, pipeline: &Pipeline) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, pipeline).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
    pipeline: &Pipeline,
) -> io::Result<()> {
    let event_handler = events::EventHandler::new(Duration::from_millis(250));

    loop {
        terminal.draw(|f| app.render(f))?;

        if let events::Event::Key(key) = event_handler.next()? {
            if app.handle_key(&key) == Action::Refresh {
                app.set_status("Refreshing...");
                terminal.draw(|f| app.render(f))?;

                let today = Local::now().date_naive();
                match pipeline.run(today).await {
                    Ok(chart) => {
                        info!("Dashboard refreshed for {}", today);
                        app.set_chart(chart);
                    }
                    Err(e) => {
                        warn!("Refresh failed: {}", e);
                        app.set_error(&e);
                    }
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
