use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, TIP_URL};
use crate::metrics::SpeedTier;
use crate::session::Phase;
use crate::ui::{bold, danger, dim, tier_color, wpm_badge_style};

const STAT_HEIGHT: u16 = 3;

/// One boxed figure, e.g. "CPM" over "212"
fn stat(name: &str, value: String, style: Style) -> Paragraph<'static> {
    Paragraph::new(Span::styled(value, style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(name.to_string())
                .title_alignment(Alignment::Center),
        )
}

fn stat_rows(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STAT_HEIGHT),
            Constraint::Length(STAT_HEIGHT),
            Constraint::Length(STAT_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area)
}

/// WPM badge, CPM and the remembered score
pub fn render_left(app: &App, area: Rect, buf: &mut Buffer) {
    let metrics = app.session.metrics();
    let rows = stat_rows(area);

    stat("WPM", metrics.wpm.to_string(), wpm_badge_style(metrics.wpm)).render(rows[0], buf);
    stat("CPM", metrics.cpm.to_string(), Style::default()).render(rows[1], buf);
    stat("Last Score", app.last_score.to_string(), Style::default()).render(rows[2], buf);
}

/// Timer, error count and accuracy
pub fn render_right(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let rows = stat_rows(area);

    let timer_style = if session.phase() == Phase::Running && session.remaining_secs() <= 10 {
        danger()
    } else {
        bold()
    };
    stat("Timer", session.remaining_secs().to_string(), timer_style).render(rows[0], buf);
    stat("Errors", session.errors().to_string(), Style::default()).render(rows[1], buf);
    stat(
        "Accuracy",
        format!("{}%", session.metrics().accuracy),
        Style::default(),
    )
    .render(rows[2], buf);
}

/// Title and the no-backspace rule
pub fn render_header(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("How Fast Can You Type?", bold())),
        Line::from(Span::styled(
            "Start the one-minute typing test and find out how fast you type.",
            dim(),
        )),
        Line::from(Span::styled(
            "Just start typing, there is no backspace. Mistakes show up in red below the quote.",
            danger(),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

/// The start / hurry / reload control
pub fn render_control(phase: Phase, area: Rect, buf: &mut Buffer) {
    let (label, style) = match phase {
        Phase::Idle => ("Enter: GO!", Style::default().fg(Color::Green)),
        Phase::Running => ("Hurry", dim().fg(Color::Green)),
        Phase::Ended => ("r: Reload", Style::default().fg(Color::Red)),
    };
    Paragraph::new(Span::styled(label, style.patch(bold())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(style),
        )
        .render(area, buf);
}

/// Typed characters, misses in red
pub fn render_output(app: &App, area: Rect, buf: &mut Buffer) {
    let spans: Vec<Span> = app
        .session
        .output()
        .iter()
        .map(|k| {
            if k.is_error {
                Span::styled(k.char.to_string(), danger())
            } else {
                Span::raw(k.char.to_string())
            }
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Typed"))
        .render(area, buf);
}

pub fn render_tip(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(vec![
        Span::styled("Tip! ", bold()),
        Span::styled(
            "WPM counts five correct characters as a word. Press i to read about record speeds: ",
            dim(),
        ),
        Span::styled(TIP_URL, dim()),
    ]))
    .wrap(Wrap { trim: true })
    .render(area, buf);
}

/// Centre `label` in a cell `width` columns wide
fn pad_center(label: &str, width: usize) -> String {
    let w = label.width();
    if w >= width {
        return label.to_string();
    }
    let left = (width - w) / 2;
    let right = width - w - left;
    format!("{}{}{}", " ".repeat(left), label, " ".repeat(right))
}

fn gauge_row(segment: usize, label: impl Fn(&SpeedTier) -> String) -> Line<'static> {
    Line::from(
        SpeedTier::ALL
            .iter()
            .map(|tier| {
                Span::styled(
                    pad_center(&label(tier), segment),
                    Style::default().fg(Color::White).bg(tier_color(*tier)),
                )
            })
            .collect::<Vec<_>>(),
    )
}

/// Five coloured segments: tier name over its wpm range
pub fn render_gauge(area: Rect, buf: &mut Buffer) {
    let segment = (area.width as usize / SpeedTier::ALL.len()).max(1);
    let lines = vec![
        gauge_row(segment, |tier| tier.to_string()),
        gauge_row(segment, |tier| tier.range_label()),
    ];
    Paragraph::new(lines).render(area, buf);
}
