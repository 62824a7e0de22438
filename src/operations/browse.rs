use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::cmp::{max, min};
use std::io;

use crate::error::Error;
use crate::finance::format::{format_currency, format_date};
use crate::models::transaction::{Transaction, TransactionType};
use crate::store::TransactionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortOrder {
    DateDesc,
    DateAsc,
}

impl SortOrder {
    fn toggle(self) -> Self {
        match self {
            SortOrder::DateDesc => SortOrder::DateAsc,
            SortOrder::DateAsc => SortOrder::DateDesc,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date ↓",
            SortOrder::DateAsc => "date ↑",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Details,
    Search,
}

struct BrowseState {
    mode: Mode,

    transactions: Vec<Transaction>,
    filtered_indices: Vec<usize>,

    table_state: TableState,

    search_term: Option<String>,
    filter_type: Option<TransactionType>,

    sort_order: SortOrder,

    // Search modal
    input_buffer: String,

    // Details view
    details_tx: Option<Transaction>,

    // Cached per-draw
    last_page_size: usize,
}

impl BrowseState {
    fn new(transactions: Vec<Transaction>) -> Self {
        let mut state = Self {
            mode: Mode::List,
            transactions,
            filtered_indices: Vec::new(),
            table_state: TableState::default(),
            search_term: None,
            filter_type: None,
            sort_order: SortOrder::DateDesc,
            input_buffer: String::new(),
            details_tx: None,
            last_page_size: 10,
        };
        state.recompute();
        state
    }

    fn selected_transaction(&self) -> Option<&Transaction> {
        let selected = self.table_state.selected()?;
        let idx = *self.filtered_indices.get(selected)?;
        self.transactions.get(idx)
    }

    fn recompute(&mut self) {
        self.filtered_indices = (0..self.transactions.len())
            .filter(|&i| self.matches_filters(&self.transactions[i]))
            .collect();

        self.sort_filtered();

        if self.filtered_indices.is_empty() {
            self.table_state.select(None);
        } else {
            let new_selected = match self.table_state.selected() {
                Some(sel) => min(sel, self.filtered_indices.len().saturating_sub(1)),
                None => 0,
            };
            self.table_state.select(Some(new_selected));
        }
    }

    fn matches_filters(&self, tx: &Transaction) -> bool {
        if let Some(kind) = self.filter_type {
            if tx.kind != kind {
                return false;
            }
        }

        if let Some(ref term) = self.search_term {
            if !tx.description.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }

        true
    }

    // The sort is stable on equal dates, matching the list view contract.
    fn sort_filtered(&mut self) {
        let txs = &self.transactions;
        match self.sort_order {
            SortOrder::DateDesc => {
                self.filtered_indices
                    .sort_by(|&a, &b| txs[b].date.cmp(&txs[a].date));
            }
            SortOrder::DateAsc => {
                self.filtered_indices
                    .sort_by(|&a, &b| txs[a].date.cmp(&txs[b].date));
            }
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.filtered_indices.is_empty() {
            self.table_state.select(None);
            return;
        }

        let current = self.table_state.selected().unwrap_or(0) as i32;
        let max_index = self.filtered_indices.len().saturating_sub(1) as i32;
        let next = (current + delta).clamp(0, max_index) as usize;
        self.table_state.select(Some(next));
    }

    fn page_up(&mut self) {
        let page = max(1, self.last_page_size) as i32;
        self.move_selection(-page);
    }

    fn page_down(&mut self) {
        let page = max(1, self.last_page_size) as i32;
        self.move_selection(page);
    }

    fn refresh_from_store(&mut self, store: &TransactionStore) {
        self.transactions = store.transactions().to_vec();
        self.recompute();
    }

    fn cycle_type_filter(&mut self) {
        self.filter_type = match self.filter_type {
            None => Some(TransactionType::Expense),
            Some(TransactionType::Expense) => Some(TransactionType::Income),
            Some(TransactionType::Income) => None,
        };
        self.recompute();
    }

    fn clear_filters(&mut self) {
        self.search_term = None;
        self.filter_type = None;
        self.recompute();
    }

    fn open_details(&mut self) {
        self.details_tx = self.selected_transaction().cloned();
        self.mode = Mode::Details;
    }

    fn close_details(&mut self) {
        self.details_tx = None;
        self.mode = Mode::List;
    }

    fn start_search(&mut self) {
        self.input_buffer.clear();
        if let Some(ref term) = self.search_term {
            self.input_buffer = term.clone();
        }
        self.mode = Mode::Search;
    }

    fn cancel_search(&mut self) {
        self.mode = Mode::List;
    }

    fn commit_search(&mut self) {
        let raw = self.input_buffer.trim();
        self.search_term = if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        };
        self.mode = Mode::List;
        self.recompute();
    }

    fn delete_selected(&mut self, store: &mut TransactionStore) -> Result<(), Error> {
        let Some(id) = self.selected_transaction().map(|tx| tx.id.clone()) else {
            return Ok(());
        };
        store.delete(&id)?;
        self.refresh_from_store(store);
        Ok(())
    }
}

/// Interactive table over the store: search on description, type filter,
/// date sort toggle, a details modal and delete-selected.
pub fn run_browse(store: &mut TransactionStore) -> Result<(), Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        let mut state = BrowseState::new(store.transactions().to_vec());

        loop {
            terminal.draw(|frame| {
                let size = frame.area();
                let layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(5),
                        Constraint::Length(2),
                    ])
                    .split(size);

                render_header(frame, layout[0], &state);
                render_table(frame, layout[1], &mut state);
                render_footer(frame, layout[2], &state);

                if state.mode == Mode::Search {
                    render_search_modal(frame, size, &state);
                }

                if state.mode == Mode::Details {
                    render_details_modal(frame, size, &state);
                }
            })?;

            if event::poll(std::time::Duration::from_millis(200))? {
                match event::read()? {
                    Event::Key(key) => {
                        if handle_key(store, &mut state, key)? {
                            break;
                        }
                    }
                    Event::Resize(_, _) => {}
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

fn handle_key(
    store: &mut TransactionStore,
    state: &mut BrowseState,
    key: KeyEvent,
) -> Result<bool, Error> {
    // Many terminals emit both a Press and a Release event. Only act on Press/Repeat.
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }

    if state.mode == Mode::List {
        if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
            return Ok(true);
        }
    }

    match state.mode {
        Mode::List => match key.code {
            KeyCode::Up => state.move_selection(-1),
            KeyCode::Down => state.move_selection(1),
            KeyCode::PageUp => state.page_up(),
            KeyCode::PageDown => state.page_down(),
            KeyCode::Home => state.table_state.select(Some(0)),
            KeyCode::End => {
                if !state.filtered_indices.is_empty() {
                    state
                        .table_state
                        .select(Some(state.filtered_indices.len().saturating_sub(1)));
                }
            }
            KeyCode::Enter => state.open_details(),
            KeyCode::Char('/') => state.start_search(),
            KeyCode::Char('t') => state.cycle_type_filter(),
            KeyCode::Char('s') => {
                state.sort_order = state.sort_order.toggle();
                state.recompute();
            }
            KeyCode::Char('d') => state.delete_selected(store)?,
            KeyCode::Char('r') => state.refresh_from_store(store),
            KeyCode::Char('x') => state.clear_filters(),
            _ => {}
        },
        Mode::Details => match key.code {
            KeyCode::Esc => state.close_details(),
            KeyCode::Char('q') => state.close_details(),
            KeyCode::Char('b') => state.close_details(),
            _ => {}
        },
        Mode::Search => {
            // Allow Ctrl+C / Ctrl+Q to cancel
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            {
                state.cancel_search();
                return Ok(false);
            }

            match key.code {
                KeyCode::Esc => state.cancel_search(),
                KeyCode::Enter => state.commit_search(),
                KeyCode::Backspace => {
                    state.input_buffer.pop();
                }
                KeyCode::Char(ch) => {
                    state.input_buffer.push(ch);
                }
                _ => {}
            }
        }
    }

    Ok(false)
}

fn render_header(frame: &mut ratatui::Frame, area: Rect, state: &BrowseState) {
    let term = state.search_term.as_deref().unwrap_or("(any)").to_string();

    let ttype = match state.filter_type {
        None => "(any)",
        Some(TransactionType::Income) => "income",
        Some(TransactionType::Expense) => "expense",
    };

    let line = Line::from(vec![
        Span::styled("Transactions", Style::default().fg(Color::Cyan).bold()),
        Span::raw("  "),
        Span::styled(
            format!("Sort: {}", state.sort_order.label()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::raw(format!("Search: {}", term)),
        Span::raw("  |  "),
        Span::raw(format!("Type: {}", ttype)),
        Span::raw("  |  "),
        Span::raw(format!("Rows: {}", state.filtered_indices.len())),
    ]);

    let block = Block::default().borders(Borders::ALL);
    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut ratatui::Frame, area: Rect, state: &BrowseState) {
    let hint = match state.mode {
        Mode::List => {
            "↑/↓ move  PgUp/PgDn page  Enter details  / search  t type  s sort  d delete  r refresh  x clear  q/Esc exit"
        }
        Mode::Details => "Esc/q/b back",
        Mode::Search => "Type, Enter apply, Esc cancel",
    };

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(hint)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_table(frame: &mut ratatui::Frame, area: Rect, state: &mut BrowseState) {
    let block = Block::default().title("Transactions").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new([
        Cell::from("Date").style(Style::default().bold()),
        Cell::from("Description").style(Style::default().bold()),
        Cell::from("Amount").style(Style::default().bold()),
        Cell::from("Type").style(Style::default().bold()),
        Cell::from("Id").style(Style::default().bold()),
    ])
    .style(Style::default().fg(Color::White));

    let rows = state
        .filtered_indices
        .iter()
        .map(|&idx| &state.transactions[idx])
        .map(|tx| {
            let date = format_date(tx.date);
            let desc = shorten(&tx.description, 42);
            let amount_color = match tx.kind {
                TransactionType::Income => Color::Green,
                TransactionType::Expense => Color::Red,
            };
            let mut id_short = tx.id.clone();
            if id_short.len() > 8 {
                id_short.truncate(8);
            }

            Row::new([
                Cell::from(date),
                Cell::from(desc),
                Cell::from(format_currency(tx.amount)).style(Style::default().fg(amount_color)),
                Cell::from(tx.kind.as_str()),
                Cell::from(id_short),
            ])
        });

    // Estimate a page size based on the table height.
    // Leave room for the header row.
    state.last_page_size = inner.height.saturating_sub(2) as usize;
    if state.last_page_size == 0 {
        state.last_page_size = 1;
    }

    let widths = [
        Constraint::Length(12),
        Constraint::Percentage(45),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
        .highlight_symbol("➤ ")
        .column_spacing(1);

    frame.render_stateful_widget(table, inner, &mut state.table_state);

    if state.filtered_indices.is_empty() {
        let empty = Paragraph::new("No transactions match the current filters")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
    }
}

fn render_search_modal(frame: &mut ratatui::Frame, area: Rect, state: &BrowseState) {
    let popup_area = centered_rect(80, 30, area);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(vec![Span::styled(
            "Search Description",
            Style::default().bold(),
        )]),
        Line::from("Enter part of a description (empty clears)"),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("> {}", state.input_buffer),
            Style::default().fg(Color::Yellow),
        )]),
    ];

    let block = Block::default().borders(Borders::ALL).title("Input");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

fn render_details_modal(frame: &mut ratatui::Frame, area: Rect, state: &BrowseState) {
    let popup_area = centered_rect(90, 60, area);
    frame.render_widget(Clear, popup_area);

    let tx = match state.details_tx.as_ref() {
        Some(tx) => tx,
        None => {
            frame.render_widget(
                Paragraph::new("No selection")
                    .block(Block::default().borders(Borders::ALL).title("Details"))
                    .alignment(Alignment::Center),
                popup_area,
            );
            return;
        }
    };

    let lines = vec![
        Line::from(vec![Span::styled(
            "Transaction Details",
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from(""),
        Line::from(format!("Id: {}", tx.id)),
        Line::from(format!("Date: {}", format_date(tx.date))),
        Line::from(format!("Type: {}", tx.kind.as_str())),
        Line::from(format!("Amount: {}", format_currency(tx.amount))),
        Line::from(format!(
            "Created: {}",
            tx.created_at.format("%Y-%m-%d %H:%M UTC")
        )),
        Line::from(format!(
            "Updated: {}",
            tx.updated_at.format("%Y-%m-%d %H:%M UTC")
        )),
        Line::from(""),
        Line::from("Description:"),
        Line::from(tx.description.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Esc/q/b to go back",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL).title("Details");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}

// Cuts on character boundaries, not bytes; descriptions are arbitrary
// user text and may be multi-byte.
fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
