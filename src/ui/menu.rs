use linguavault::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::{bold, dim, fit, frame_layout, highlight, red_bold, render_centered};

pub fn render_menu(app: &App, f: &mut Frame) {
    let body = frame_layout(
        f,
        "LinguaVault · choose a game",
        "↑/↓ move   enter select   esc quit",
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(body);

    let width = chunks[0].width.saturating_sub(4) as usize;
    let mut lines = Vec::new();
    for (idx, item) in app.menu_items().into_iter().enumerate() {
        let descriptor = item.descriptor;
        let selected = idx == app.menu_cursor;
        let title_style = match (selected, item.available) {
            (true, _) => highlight(),
            (false, true) => bold(),
            (false, false) => dim(),
        };
        let marker = if selected { "> " } else { "  " };

        let mut heading = vec![
            Span::raw(marker),
            Span::styled(format!(" {} ", descriptor.title), title_style),
            Span::styled(format!("  {}", descriptor.difficulty), dim()),
        ];
        if !item.available {
            heading.push(Span::styled(
                format!("  needs {} words", descriptor.min_words),
                Style::default().fg(Color::Yellow),
            ));
        }
        lines.push(Line::from(heading));
        lines.push(Line::from(Span::styled(
            format!("    {}", fit(descriptor.description, width)),
            dim(),
        )));
        lines.push(Line::default());
    }
    f.render_widget(Paragraph::new(lines), chunks[0]);

    if let Some(message) = app.message() {
        f.render_widget(
            Paragraph::new(Span::styled(message.to_string(), red_bold())),
            chunks[1],
        );
    }
}

pub fn render_language_picker(app: &App, f: &mut Frame) {
    let title = app
        .selected_game()
        .map(|g| format!("{} · choose a language", g.title()))
        .unwrap_or_default();
    let body = frame_layout(f, &title, "↑/↓ move   enter play   esc back");

    let choices = app.language_choices();
    if choices.is_empty() {
        render_centered(
            f,
            vec![Line::from(Span::styled(
                "No translated words yet. Add some with `linguavault add`.",
                dim(),
            ))],
            body,
        );
        return;
    }

    let required = app.selected_game().map_or(0, |g| g.min_words());
    let mut lines: Vec<Line> = choices
        .iter()
        .enumerate()
        .map(|(idx, choice)| {
            let selected = idx == app.language_cursor;
            let style = match (selected, choice.has_enough) {
                (true, _) => highlight(),
                (false, true) => bold(),
                (false, false) => dim(),
            };
            let mut spans = vec![
                Span::raw(if selected { "> " } else { "  " }),
                Span::styled(
                    format!(" {} ({}) ", choice.info.label, choice.info.code),
                    style,
                ),
                Span::styled(format!("  {} words", choice.word_count), dim()),
            ];
            if !choice.has_enough {
                spans.push(Span::styled(
                    format!("  needs {required}"),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Line::from(spans)
        })
        .collect();

    if let Some(message) = app.message() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(message.to_string(), red_bold())));
    }

    f.render_widget(Paragraph::new(lines), body);
}
