use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use stopwatch_core::{format_optional, format_time, LapMark};

use crate::app::{StatusKind, StopwatchApp, HELP_TEXT};

const CARD_WIDTH: u16 = 56;
const ACCENT: Color = Color::Magenta;
const DIM: Color = Color::DarkGray;
const SUCCESS: Color = Color::Green;
const ALERT: Color = Color::Red;

pub fn render(frame: &mut Frame, app: &StopwatchApp) {
    let card = centered_width(frame.area(), CARD_WIDTH);
    draw_stopwatch(frame, app, card);

    if app.help_visible {
        draw_help(frame, HELP_TEXT);
    } else if app.confirm_exit {
        draw_confirm_exit(frame);
    }
}

fn centered_width(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_stopwatch(frame: &mut Frame, app: &StopwatchApp, area: Rect) {
    let block = Block::default()
        .title(Line::from(" Stopwatch ").alignment(Alignment::Center))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(3), // Time
            Constraint::Length(1), // Controls
            Constraint::Length(1),
            Constraint::Min(5),    // Laps
            Constraint::Length(1), // Best / worst
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let description = Paragraph::new("Track your time with this stopwatch.")
        .style(Style::default().fg(DIM))
        .alignment(Alignment::Center);
    frame.render_widget(description, chunks[0]);

    let time = Paragraph::new(format_time(app.stopwatch.timer.elapsed_ms()))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM).border_style(Style::default().fg(DIM)));
    frame.render_widget(time, chunks[1]);

    frame.render_widget(
        Paragraph::new(controls_line(app)).alignment(Alignment::Center),
        chunks[2],
    );

    draw_laps(frame, app, chunks[4]);
    draw_summary(frame, app, chunks[5]);

    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => SUCCESS,
            StatusKind::Error => ALERT,
        };
        frame.render_widget(
            Paragraph::new(status.text.as_str()).style(Style::default().fg(color)),
            chunks[6],
        );
    }

    let footer = Paragraph::new("?=help  q=quit  ↑/↓=scroll laps")
        .style(Style::default().fg(DIM))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[7]);
}

fn button(label: &str, bg: Color, enabled: bool) -> Span<'static> {
    let mut style = Style::default().fg(Color::White).bg(bg);
    if !enabled {
        style = style.add_modifier(Modifier::DIM);
    }
    Span::styled(format!(" {} ", label), style)
}

fn controls_line(app: &StopwatchApp) -> Line<'static> {
    let running = app.is_running();
    let start_stop = if running {
        button("⏎ Stop", Color::Red, true)
    } else {
        button("⏎ Start", Color::Green, true)
    };
    Line::from(vec![
        start_stop,
        Span::raw("  "),
        button("r Reset", Color::Gray, true),
        Span::raw("  "),
        button("l Lap", Color::Blue, running),
        Span::raw("  "),
        button("s Share", Color::Magenta, true),
    ])
}

fn draw_laps(frame: &mut Frame, app: &StopwatchApp, area: Rect) {
    let laps = app.stopwatch.timer.laps();
    let rows = laps
        .iter()
        .skip(app.stopwatch.lap_scroll_offset)
        .map(|lap| {
            let style = match laps.mark(lap) {
                LapMark::Best => Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
                LapMark::Worst => Style::default().fg(ALERT).add_modifier(Modifier::BOLD),
                LapMark::Plain => Style::default(),
            };
            Row::new(vec![
                Cell::from(format!("Lap {}", lap.id)),
                Cell::from(Line::from(format_time(lap.difference_ms)).alignment(Alignment::Right)),
            ])
            .style(style)
        });

    let header = Row::new(vec![
        Cell::from("Lap"),
        Cell::from(Line::from("Time").alignment(Alignment::Right)),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let title = if laps.is_empty() {
        String::from(" Lap Times ")
    } else {
        format!(" Lap Times ({}) ", laps.len())
    };

    let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DIM)),
        );
    frame.render_widget(table, area);
}

fn draw_summary(frame: &mut Frame, app: &StopwatchApp, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let timer = &app.stopwatch.timer;

    frame.render_widget(
        Paragraph::new(format!("Best Lap: {}", format_optional(timer.best_lap_ms()))),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(format!("Worst Lap: {}", format_optional(timer.worst_lap_ms())))
            .alignment(Alignment::Right),
        halves[1],
    );
}

fn draw_help(frame: &mut Frame, help_text: &str) {
    let height = help_text.lines().count() as u16 + 2;
    let popup = centered_popup(frame.area(), 40, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Help (press any key to close) ")
        .title_style(Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUCCESS));
    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup);
}

fn draw_confirm_exit(frame: &mut Frame) {
    let popup = centered_popup(frame.area(), 34, 7);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Timer Running ")
        .title_style(Style::default().fg(ALERT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ALERT));
    let text = "The stopwatch is still running.\nExit anyway?\n\n  y = Stop & exit   n = Cancel";
    frame.render_widget(Paragraph::new(text).block(block), popup);
}
