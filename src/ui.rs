pub mod panels;
pub mod screen;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    Frame,
};

use crate::app::App;
use crate::metrics::SpeedTier;

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

/// Draw the whole screen for the current phase
pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(app.session.phase()).render(app, f);
}

/// Left stats column, centre column, right stats column
pub(crate) fn columns(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(16),
            Constraint::Min(20),
            Constraint::Length(16),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

pub fn tier_color(tier: SpeedTier) -> Color {
    match tier {
        SpeedTier::Slow => Color::Rgb(0xeb, 0x48, 0x41),
        SpeedTier::Average => Color::Rgb(0xf4, 0x88, 0x47),
        SpeedTier::Fast => Color::Rgb(0xff, 0xc8, 0x4a),
        SpeedTier::Professional => Color::Rgb(0xa6, 0xc3, 0x4c),
        SpeedTier::Top => Color::Rgb(0x4e, 0xc0, 0x4e),
    }
}

/// White on the tier colour, unstyled when there is no score yet
pub fn wpm_badge_style(wpm: u32) -> Style {
    match SpeedTier::for_wpm(wpm) {
        Some(tier) => Style::default()
            .fg(Color::White)
            .bg(tier_color(tier))
            .add_modifier(Modifier::BOLD),
        None => Style::default(),
    }
}

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn danger() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}
