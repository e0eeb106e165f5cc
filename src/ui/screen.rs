use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::session::Phase;
use crate::ui::{bold, columns, dim, panels};

/// A UI Screen boundary: one per session phase
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Centre column rows shared by every phase
struct CentreLayout {
    header: Rect,
    control: Rect,
    quote: Rect,
    output: Rect,
    tip: Rect,
    gauge: Rect,
}

impl CentreLayout {
    fn split(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // title, lead, rule
                Constraint::Length(3), // control
                Constraint::Min(4),    // quote
                Constraint::Min(3),    // typed output
                Constraint::Length(2), // tip
                Constraint::Length(2), // speed gauge
            ])
            .split(area);
        Self {
            header: chunks[0],
            control: chunks[1],
            quote: chunks[2],
            output: chunks[3],
            tip: chunks[4],
            gauge: chunks[5],
        }
    }
}

/// Everything around the quote panel, identical across phases
fn render_frame(app: &App, f: &mut Frame) -> CentreLayout {
    let (left, centre, right) = columns(f.area());
    let buf = f.buffer_mut();

    panels::render_left(app, left, buf);
    panels::render_right(app, right, buf);

    let layout = CentreLayout::split(centre);
    panels::render_header(layout.header, buf);
    panels::render_control(app.session.phase(), layout.control, buf);
    panels::render_output(app, layout.output, buf);
    panels::render_tip(layout.tip, buf);
    panels::render_gauge(layout.gauge, buf);
    layout
}

/// Before GO: the whole quote, greyed out
pub struct IdleScreen;

impl Screen for IdleScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let layout = render_frame(app, f);

        let quote = Paragraph::new(Span::styled(app.session.quote().text.clone(), dim()))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(dim()));
        f.render_widget(quote, layout.quote);
    }
}

/// The typing target: only the part of the quote still ahead
pub struct RunningScreen;

impl Screen for RunningScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let layout = render_frame(app, f);
        let session = &app.session;

        let mut border_style = Style::default();
        if app.focused {
            border_style = border_style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if session.is_error() {
            border_style = border_style.fg(Color::Red);
        }

        let remaining = session.remaining_text();
        let mut chars = remaining.chars();
        let spans = match chars.next() {
            Some(next) => vec![
                Span::styled(
                    next.to_string(),
                    bold().add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled(chars.as_str().to_string(), bold()),
            ],
            None => Vec::new(),
        };

        let quote = Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(border_style),
            );
        f.render_widget(quote, layout.quote);
    }
}

/// After the end: the full quote with its author
pub struct EndedScreen;

impl Screen for EndedScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let layout = render_frame(app, f);
        let quote = app.session.quote();

        let lines = vec![
            Line::from(Span::styled(format!("\"{}\"", quote.text), bold())),
            Line::from(""),
            Line::from(Span::styled(format!("- {}", quote.author), dim())),
        ];
        let widget = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, layout.quote);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Idle => Box::new(IdleScreen),
        Phase::Running => Box::new(RunningScreen),
        Phase::Ended => Box::new(EndedScreen),
    }
}
