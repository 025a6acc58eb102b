//! The draw loop and everything it puts on screen.
//!
//! Layout is a fixed three-row frame: the pincode input box, a body that
//! shows whichever [`DisplayState`] the session derives (spinner, banner,
//! or result list), and a one-line footer naming the key bindings and the
//! endpoint in use. The detail view is a centered overlay drawn on top.

use std::io;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture},
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::EventsService;
use pinseek_core::session::NO_DATA_MESSAGE;
use pinseek_core::DisplayState;
use pinseek_core::PostOffice;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Restore the terminal from a panic hook, where the loop's own teardown
/// never gets a chance to run.
pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

/// Run the UI until the user quits.
///
/// Lookups requested by the user go out on `tx`; their resolutions, along
/// with all other input, come back through the events service built on `rx`.
pub async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    props: AppStateProps,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(props);
    let mut events_service = EventsService::new(rx);

    loop {
        terminal.draw(|frame| draw(frame, &app_state))?;

        match events_service.next().await? {
            Event::KeyboardCharInput(input) => app_state.handle_char_input(input),
            Event::KeyboardBackspace => app_state.handle_backspace(),
            Event::KeyboardEnter => app_state.handle_enter(&tx)?,
            Event::KeyboardEsc => app_state.handle_escape(),
            Event::KeyboardHome => app_state.handle_home(),
            Event::KeyboardCTRLC => break,
            Event::KeyboardPaste(text) => app_state.handle_paste(&text),
            Event::LookupResolved {
                generation,
                outcome,
            } => app_state.handle_lookup_resolved(generation, outcome),
            Event::UITick => app_state.handle_tick(),
            Event::UIScrollDown => app_state.scroll_down(),
            Event::UIScrollUp => app_state.scroll_up(),
        }
    }

    return Ok(());
}

pub fn draw(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_input(frame, state, chunks[0]);
    draw_body(frame, state, chunks[1]);
    draw_footer(frame, state, chunks[2]);

    if let Some(record) = state.session.detail() {
        draw_detail_overlay(frame, record);
    }
}

fn draw_input(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Pincode ")
        .border_style(Style::default().fg(Color::Cyan));

    let input = state.session.input();
    let paragraph = if input.is_empty() {
        Paragraph::new("Enter a 6-digit pincode").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(input)
    };
    frame.render_widget(paragraph.block(block), area);

    // The overlay owns the screen while it is open; parking the cursor in
    // the input box underneath it would just be confusing.
    if state.session.detail().is_none() {
        frame.set_cursor_position((area.x + 1 + input.len() as u16, area.y + 1));
    }
}

fn draw_body(frame: &mut Frame, state: &AppState, area: Rect) {
    match state.session.display() {
        DisplayState::Blank => {}
        DisplayState::Loading => draw_spinner(frame, state, area),
        DisplayState::ErrorBanner(message) => draw_banner(frame, message, Color::Red, area),
        DisplayState::NoData => draw_banner(frame, NO_DATA_MESSAGE, Color::Yellow, area),
        DisplayState::Results(records) => {
            draw_results(frame, state.highlighted, records, area);
        }
    }
}

fn draw_spinner(frame: &mut Frame, state: &AppState, area: Rect) {
    let spinner = SPINNER_FRAMES[(state.spinner_frame % SPINNER_FRAMES.len() as u64) as usize];
    let paragraph = Paragraph::new(format!(
        " {} Looking up pincode {}...",
        spinner,
        state.session.input()
    ))
    .style(Style::default().fg(Color::Yellow));

    frame.render_widget(paragraph, area);
}

fn draw_banner(frame: &mut Frame, message: &str, color: Color, area: Rect) {
    let paragraph = Paragraph::new(format!(" {}", message))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_results(frame: &mut Frame, highlighted: Option<usize>, records: &[PostOffice], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Post Offices ({}) ", records.len()));

    let items: Vec<ListItem> = records.iter().map(result_row).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(highlighted);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn result_row(record: &PostOffice) -> ListItem<'static> {
    let mut spans = vec![Span::styled(
        record.display_name().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    for value in [&record.branch_type, &record.delivery_status, &record.circle]
        .into_iter()
        .flatten()
    {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            value.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(Line::from(spans))
}

fn draw_footer(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(state.api_url.len() as u16 + 1),
        ])
        .split(area);

    let hints = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" search · "),
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::raw(" select · "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(" back · "),
        Span::styled("Ctrl+H", Style::default().fg(Color::Cyan)),
        Span::raw(" home · "),
        Span::styled("Ctrl+C", Style::default().fg(Color::Cyan)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[0]);

    let endpoint = Paragraph::new(state.api_url.clone())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    frame.render_widget(endpoint, chunks[1]);
}

fn draw_detail_overlay(frame: &mut Frame, record: &PostOffice) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", record.display_name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = Vec::new();
    for (label, value) in record.field_rows() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
            Span::raw(value.unwrap_or("-").to_string()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
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
