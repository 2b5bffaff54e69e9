//! Interactive terminal dashboard: four budget inputs, a month slider,
//! three gauges, and a trend chart.
//!
//! Every key event updates `DashboardState`; the next frame recomputes the
//! snapshot from the summary and the current field text.

use anyhow::Result;
use budgetboard_core::{Gauge, GaugeStatus, Snapshot};
use budgetboard_finance::{recompute, MonthlySummary, RawBudgetInputs};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LineGauge, Paragraph},
    Frame, Terminal,
};
use std::io;

const FIELD_LABELS: [&str; 4] = ["Monthly Income", "Needs %", "Wants %", "Savings %"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub struct DashboardState<'a> {
    summary: &'a MonthlySummary,
    fields: [String; 4],
    focus: usize,
    month_index: usize,
    mark_step: usize,
}

impl<'a> DashboardState<'a> {
    /// Starts on the most recent month
    pub fn new(summary: &'a MonthlySummary, raw: &RawBudgetInputs, mark_step: usize) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            summary,
            fields: [
                text(&raw.income),
                text(&raw.needs_pct),
                text(&raw.wants_pct),
                text(&raw.savings_pct),
            ],
            focus: 0,
            month_index: summary.last_index(),
            mark_step,
        }
    }

    pub fn month_index(&self) -> usize {
        self.month_index
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn field(&self, i: usize) -> &str {
        &self.fields[i]
    }

    /// Current field text; empty fields count as missing
    pub fn raw_inputs(&self) -> RawBudgetInputs {
        let field = |i: usize| Some(self.fields[i].clone()).filter(|s| !s.trim().is_empty());
        RawBudgetInputs {
            income: field(0),
            needs_pct: field(1),
            wants_pct: field(2),
            savings_pct: field(3),
        }
    }

    pub fn snapshot(&self) -> budgetboard_finance::Result<Snapshot> {
        recompute(self.summary, self.month_index, &self.raw_inputs().resolve())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if key.kind != KeyEventKind::Press {
            return Outcome::Continue;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Outcome::Quit;
            }
            KeyCode::Char('q') | KeyCode::Esc => return Outcome::Quit,
            KeyCode::Tab => self.focus = (self.focus + 1) % self.fields.len(),
            KeyCode::BackTab => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
            }
            KeyCode::Left => self.month_index = self.month_index.saturating_sub(1),
            KeyCode::Right => {
                self.month_index = (self.month_index + 1).min(self.summary.last_index());
            }
            KeyCode::Home => self.month_index = 0,
            KeyCode::End => self.month_index = self.summary.last_index(),
            KeyCode::Backspace => {
                self.fields[self.focus].pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.fields[self.focus].push(c);
            }
            _ => {}
        }
        Outcome::Continue
    }
}

type RestoreStep = (&'static str, fn() -> io::Result<()>);

const RESTORE_STEPS: [RestoreStep; 2] = [
    ("leave raw mode", leave_raw_mode),
    ("leave alternate screen", leave_alt_screen),
];

fn leave_raw_mode() -> io::Result<()> {
    disable_raw_mode()
}

fn leave_alt_screen() -> io::Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}

/// Runs every step even if an earlier one fails; returns the failure count
fn run_steps(steps: &[RestoreStep]) -> usize {
    let mut failed = 0;
    for (name, step) in steps {
        if let Err(e) = step() {
            tracing::warn!(step = *name, error = %e, "terminal restore step failed");
            failed += 1;
        }
    }
    failed
}

fn restore_terminal() {
    run_steps(&RESTORE_STEPS);
}

/// Restores the terminal when dropped, on both the error and the normal path
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

pub fn run_dashboard(state: &mut DashboardState<'_>) -> Result<()> {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original(info);
    }));

    let _guard = TerminalGuard;
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    event_loop(&mut terminal, state)
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut DashboardState<'_>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, state))?;

        // Blocks until the next input; resize events just fall through to a redraw
        if let Event::Key(key) = event::read()? {
            if state.handle_key(key) == Outcome::Quit {
                tracing::info!("dashboard closed");
                return Ok(());
            }
            tracing::debug!(
                month_index = state.month_index(),
                focus = state.focus(),
                "input changed"
            );
        }
    }
}

pub fn draw(f: &mut Frame, state: &DashboardState<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_inputs(f, chunks[1], state);

    match state.snapshot() {
        Ok(snap) => {
            let title = Paragraph::new(Line::from(Span::styled(
                snap.title.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Personal Budget Dashboard"));
            f.render_widget(title, chunks[0]);

            draw_gauges(f, chunks[2], &snap);
            draw_trend(f, chunks[3], &snap);
        }
        Err(e) => {
            let msg = Paragraph::new(e.to_string())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(msg, chunks[0]);
        }
    }

    draw_slider(f, chunks[4], state);

    let help = Paragraph::new(Span::styled(
        "Tab/Shift-Tab: field  0-9 . -: edit  Left/Right: month  Home/End: first/last  q: quit",
        Style::default().fg(Color::Gray),
    ));
    f.render_widget(help, chunks[5]);
}

fn draw_inputs(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, label) in FIELD_LABELS.iter().enumerate() {
        let border = if i == state.focus() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(state.field(i))
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(*label),
            );
        f.render_widget(input, cols[i]);
    }
}

fn status_color(status: GaugeStatus) -> Color {
    match status {
        GaugeStatus::Good => Color::Green,
        GaugeStatus::Warning => Color::Red,
    }
}

fn draw_gauges(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (g, col) in snap.gauges().into_iter().zip(cols.iter()) {
        f.render_widget(gauge_widget(g), *col);
    }
}

fn gauge_widget(g: &Gauge) -> ratatui::widgets::Gauge<'static> {
    ratatui::widgets::Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(g.title.clone()))
        .gauge_style(Style::default().fg(status_color(g.status)))
        .ratio(g.ratio())
        .label(format!("{:.2} / {:.2}", g.display_value, g.limit))
}

fn draw_trend(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let trend = &snap.trend;
    let points = |series: &[f64]| -> Vec<(f64, f64)> {
        series.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect()
    };
    let needs = points(&trend.needs);
    let wants = points(&trend.wants);
    let savings = points(&trend.savings);

    let x = snap.month_index as f64;
    let selected: Vec<(f64, f64)> = [&trend.needs, &trend.wants, &trend.savings]
        .iter()
        .filter_map(|s| s.get(snap.month_index).map(|v| (x, *v)))
        .collect();

    let all = trend.needs.iter().chain(&trend.wants).chain(&trend.savings);
    let (lo, hi) = all.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let pad = (hi * 0.05 - lo * 0.05).max(1.0);
    let (y_min, y_max) = ((lo - pad).max(f64::MIN), (hi + pad).min(f64::MAX));
    let x_max = (trend.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![
        series_dataset("Needs", Color::Cyan, &needs),
        series_dataset("Wants", Color::Magenta, &wants),
        series_dataset("Savings", Color::Green, &savings),
        Dataset::default()
            .name("Selected")
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White))
            .data(&selected),
    ];

    let x_labels: Vec<Span> = match (trend.labels.first(), trend.labels.last()) {
        (Some(first), Some(last)) if trend.len() > 2 => vec![
            Span::raw(first.clone()),
            Span::raw(trend.labels[trend.len() / 2].clone()),
            Span::raw(last.clone()),
        ],
        (Some(first), Some(last)) => vec![Span::raw(first.clone()), Span::raw(last.clone())],
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::raw(format!("{:.0}", y_min)),
        Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{:.0}", y_max)),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title("Monthly Trend"))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn series_dataset<'a>(name: &'a str, color: Color, data: &'a [(f64, f64)]) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

fn draw_slider(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let block = Block::default().borders(Borders::ALL).title("Month");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let len = state.summary.len();
    let ratio = if len > 1 {
        state.month_index as f64 / (len - 1) as f64
    } else {
        1.0
    };
    let label = state
        .summary
        .get(state.month_index)
        .map(|r| r.month.to_string())
        .unwrap_or_default();
    let slider = LineGauge::default()
        .filled_style(Style::default().fg(Color::Yellow))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    f.render_widget(slider, rows[0]);

    let marks = state.summary.slider_marks(state.mark_step);
    let line = marks_line(&marks, len, rows[1].width as usize);
    f.render_widget(
        Paragraph::new(Span::styled(line, Style::default().fg(Color::Gray))),
        rows[1],
    );
}

/// Lay out mark labels at their proportional slider positions, skipping any
/// label that would overlap the previous one
pub fn marks_line(marks: &[(usize, String)], len: usize, width: usize) -> String {
    let mut buf = vec![' '; width];
    let mut next_free = 0;
    for (i, label) in marks {
        let label_len = label.chars().count();
        if label_len > width {
            continue;
        }
        let pos = if len > 1 { i * (width - 1) / (len - 1) } else { 0 };
        let start = pos.min(width - label_len);
        if start < next_free {
            continue;
        }
        for (offset, c) in label.chars().enumerate() {
            buf[start + offset] = c;
        }
        next_free = start + label_len + 1;
    }
    buf.into_iter().collect()
}
