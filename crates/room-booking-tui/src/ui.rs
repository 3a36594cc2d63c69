use crate::app::{App, Flow};
use crate::error::Field;
use crate::form::Booking;
use crate::input::map_key;
use crate::sink::BookingSink;
use crate::util::{centered_rect, format_date};
use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io;
use std::time::Duration;
use tracing::info;

const LABEL_WIDTH: usize = 12;

pub fn run(app: &mut App, sink: &mut dyn BookingSink, tick: Duration) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, app, sink, tick);
    cleanup(&mut terminal)?;
    res
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    sink: &mut dyn BookingSink,
    tick: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if !event::poll(tick)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            let Some(action) = map_key(key, app.form.is_confirming()) else {
                continue;
            };
            if app.apply(action, sink) == Flow::Quit {
                info!("quit requested");
                return Ok(());
            }
        }
    }
}

fn cleanup(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    let w = terminal.backend_mut();
    crossterm::execute!(w, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    let title = Paragraph::new(Line::from(Span::styled(
        "Meeting room booking",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let fields: Vec<Line> = Field::ALL
        .iter()
        .map(|field| field_line(app, *field))
        .collect();
    let form = Paragraph::new(fields).block(Block::default().borders(Borders::ALL).title("booking"));
    f.render_widget(form, chunks[1]);

    let status = if let Some(err) = app.form.error_message() {
        Span::styled(err, Style::default().fg(Color::Red))
    } else if let Some(notice) = &app.notice {
        Span::styled(notice.as_str(), Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };
    let status = Paragraph::new(status)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, chunks[2]);

    let help = if app.form.is_confirming() {
        "enter/y confirm · esc/n cancel"
    } else {
        "tab/↑↓ field · ←→ choose · pgup/pgdn week · t today · enter book · esc quit"
    };
    f.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::Gray))),
        chunks[3],
    );

    if let Some(booking) = app.form.pending() {
        draw_confirmation(f, app, booking);
    }
}

fn field_line(app: &App, field: Field) -> Line<'static> {
    let focused = app.focus == field && !app.form.is_confirming();
    let marker = if focused { "> " } else { "  " };
    let label = format!("{marker}{:<width$}", field.label(), width = LABEL_WIDTH);
    let value = match field {
        Field::Room | Field::Date | Field::StartTime | Field::EndTime if focused => {
            format!("‹ {} ›", app.value_text(field))
        }
        Field::Department | Field::Attendees if focused => format!("{}_", app.value_text(field)),
        _ => app.value_text(field),
    };
    let value_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ])
}

fn draw_confirmation(f: &mut Frame, app: &App, booking: &Booking) {
    let area = centered_rect(60, 9, f.size());
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(
                format!("{:<width$}", label, width = LABEL_WIDTH),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value),
        ])
    };
    let lines = vec![
        row("Room", booking.room.name.to_string()),
        row("Date", format_date(booking.date, &app.date_format)),
        row(
            "Time",
            format!(
                "{} - {} ({} min)",
                booking.start,
                booking.end,
                booking.end.minute_of_day() - booking.start.minute_of_day()
            ),
        ),
        row("Department", booking.department.clone()),
        row("Attendees", booking.attendees.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "[esc] cancel   [enter] confirm booking",
            Style::default().fg(Color::Gray),
        )),
    ];
    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("confirm booking")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}
