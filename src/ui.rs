pub mod games;
pub mod menu;
pub mod screen;

use linguavault::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::screen::current_screen;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    current_screen(app.view()).render(app, f);
}

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn green_bold() -> Style {
    bold().fg(Color::Green)
}

pub fn red_bold() -> Style {
    bold().fg(Color::Red)
}

pub fn highlight() -> Style {
    bold().fg(Color::Black).bg(Color::Cyan)
}

/// Title bar, body and key legend; returns the body area
pub fn frame_layout(f: &mut Frame, title: &str, legend: &str) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Paragraph::new(Span::styled(title.to_string(), bold().fg(Color::Cyan)))
        .block(Block::default().borders(Borders::BOTTOM))
        .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let footer = Paragraph::new(Span::styled(
        legend.to_string(),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[2]);

    chunks[1]
}

/// Centered block of lines, wrapped to the area
pub fn render_centered(f: &mut Frame, lines: Vec<Line<'static>>, area: Rect) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let inner = Rect::new(area.x, top, area.width, height);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, inner);
}

/// Cuts `text` to at most `width` display columns, marking the cut with `…`
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// `h _ _ l o` style spacing for single-word puzzles
pub fn spaced(text: &str) -> String {
    text.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
