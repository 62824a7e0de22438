use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io;

use crate::error::Error;
use crate::finance::format::format_currency;
use crate::models::monthly::MonthlyBucket;

const INCOME_COLOR: Color = Color::Green;
const EXPENSE_COLOR: Color = Color::Red;

/// Full-screen chart of the trailing 6-month window: one pair of bars per
/// month (income next to expenses) above a table with the exact figures.
pub fn run_chart(buckets: &[MonthlyBucket]) -> Result<(), Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        loop {
            terminal.draw(|frame| {
                let size = frame.area();
                let layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                    .split(size);

                render_bars(frame, layout[0], buckets);
                render_figures(frame, layout[1], buckets);
            })?;

            if event::poll(std::time::Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.code == KeyCode::Char('q') => break,
                    Event::Key(key) if key.code == KeyCode::Esc => break,
                    Event::Resize(_, _) => continue,
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

fn render_bars(frame: &mut ratatui::Frame, area: Rect, buckets: &[MonthlyBucket]) {
    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .title(Line::from(vec![Span::styled(
            "Last 6 Months: income vs expenses  (press q to exit)",
            Style::default().fg(Color::White),
        )]))
        .borders(Borders::ALL);

    let chart_area = block.inner(inner[0]);
    frame.render_widget(block, inner[0]);

    let bar_height = chart_area.height as usize;
    if bar_height == 0 || buckets.is_empty() {
        return;
    }

    let bucket_width = std::cmp::max(4, chart_area.width as usize / buckets.len());
    let bar_width = std::cmp::max(1, (bucket_width - 2) / 2);

    let max_value = buckets
        .iter()
        .flat_map(|b| [b.income, b.expenses])
        .map(|v| v.to_f64().unwrap_or(0.0))
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..bar_height {
        let level = bar_height - row;
        let mut spans: Vec<Span> = Vec::new();

        for bucket in buckets {
            spans.push(bar_cell(bucket.income, max_value, bar_height, level, bar_width, INCOME_COLOR));
            spans.push(bar_cell(bucket.expenses, max_value, bar_height, level, bar_width, EXPENSE_COLOR));
            spans.push(Span::raw(" ".repeat(bucket_width - bar_width * 2)));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), chart_area);

    let labels = build_month_labels(buckets, bucket_width);
    frame.render_widget(Paragraph::new(labels).alignment(Alignment::Left), inner[1]);
}

fn bar_cell(
    value: Decimal,
    max_value: f64,
    bar_height: usize,
    level: usize,
    bar_width: usize,
    color: Color,
) -> Span<'static> {
    let scaled = (value.to_f64().unwrap_or(0.0) / max_value * bar_height as f64).ceil() as usize;
    if value > Decimal::ZERO && level <= scaled {
        Span::styled("█".repeat(bar_width), Style::default().fg(color))
    } else {
        Span::raw(" ".repeat(bar_width))
    }
}

fn build_month_labels(buckets: &[MonthlyBucket], bucket_width: usize) -> Vec<Line<'static>> {
    let mut spans = Vec::new();
    for bucket in buckets {
        let mut label = bucket.month.clone();
        if label.len() > bucket_width {
            label.truncate(bucket_width);
        }
        spans.push(Span::raw(format!("{label:<bucket_width$}")));
    }
    vec![Line::from(spans)]
}

fn render_figures(frame: &mut ratatui::Frame, area: Rect, buckets: &[MonthlyBucket]) {
    let block = Block::default().title("Monthly Figures").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if buckets.iter().all(|b| b.income == Decimal::ZERO && b.expenses == Decimal::ZERO) {
        let empty = Paragraph::new("No transactions in the last 6 months")
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(format!("{:5}", "Month"), Style::default().fg(Color::White)),
        Span::styled(format!("{:>15}", "Income"), Style::default().fg(INCOME_COLOR)),
        Span::styled(format!("{:>15}", "Expenses"), Style::default().fg(EXPENSE_COLOR)),
    ]));

    for bucket in buckets {
        lines.push(Line::from(vec![
            Span::raw(format!("{:5}", bucket.month)),
            Span::styled(
                format!("{:>15}", format_currency(bucket.income)),
                Style::default().fg(INCOME_COLOR),
            ),
            Span::styled(
                format!("{:>15}", format_currency(bucket.expenses)),
                Style::default().fg(EXPENSE_COLOR),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}
