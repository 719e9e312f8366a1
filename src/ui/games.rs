use linguavault::{
    app::{App, BOARD_COLUMNS},
    game::{
        Feedback, HangmanGame, HangmanStatus, MemoryMatchGame, MultipleChoiceGame,
        MultipleChoicePhase, ScrambleGame, ScrambleStatus, SpeedRoundGame, SpeedRoundPhase,
    },
    language::language_label,
    session::GameSession,
    util::format_clock,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::{bold, dim, fit, frame_layout, green_bold, highlight, red_bold, render_centered, spaced};

const CARD_HEIGHT: u16 = 3;

pub fn render_game(app: &App, f: &mut Frame) {
    let (Some(session), Some(language)) = (app.session(), app.playing_language()) else {
        return;
    };
    let title = format!("{} · {}", session.kind().title(), language_label(language));

    match session {
        GameSession::Hangman(game) => {
            let body = frame_layout(f, &title, "type letters   enter next word   esc back");
            render_centered(f, hangman_lines(game), body);
        }
        GameSession::MultipleChoice(game) => {
            let body = frame_layout(f, &title, "1-4 or ↑/↓ + enter answer   esc back");
            render_centered(f, multiple_choice_lines(game, app.option_cursor), body);
        }
        GameSession::Scramble(game) => {
            let body = frame_layout(f, &title, "type + enter answer   tab hint   esc back");
            render_centered(f, scramble_lines(game, &app.input), body);
        }
        GameSession::SpeedRound(game) => {
            let body = frame_layout(f, &title, "type + enter answer   esc back");
            render_centered(f, speed_round_lines(game, &app.input), body);
        }
        GameSession::MemoryMatch(game) => {
            let body = frame_layout(f, &title, "arrows move   enter/space flip   esc back");
            render_memory_board(f, game, app.board_cursor, body);
        }
    }
}

fn prompt_line(value: &str) -> Line<'static> {
    Line::from(Span::styled(
        value.to_string(),
        bold().fg(Color::Magenta),
    ))
}

fn input_line(input: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("> ", dim()),
        Span::styled(input.to_string(), bold()),
        Span::styled("_", dim()),
    ])
}

fn hangman_lines(game: &HangmanGame) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("translate back", dim())),
        prompt_line(&game.challenge().translation.value),
        Line::default(),
        Line::from(Span::styled(spaced(&game.masked_answer()), bold())),
        Line::default(),
        Line::from(format!(
            "attempts left: {}/{}",
            game.remaining_attempts(),
            game.max_errors()
        )),
    ];

    let guessed: String = game.guessed().iter().collect();
    if !guessed.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("guessed: {}", spaced(&guessed)),
            dim(),
        )));
    }

    lines.push(Line::default());
    match game.status() {
        HangmanStatus::Playing => {}
        HangmanStatus::Won => lines.push(Line::from(Span::styled(
            "Solved! enter for the next word",
            green_bold(),
        ))),
        HangmanStatus::Lost => lines.push(Line::from(Span::styled(
            format!(
                "Out of attempts. The word was {}",
                game.revealed_answer().unwrap_or_default()
            ),
            red_bold(),
        ))),
    }
    lines.push(Line::from(Span::styled(
        format!("won {} of {}", game.rounds_won(), game.rounds_played()),
        dim(),
    )));
    lines
}

fn multiple_choice_lines(game: &MultipleChoiceGame, cursor: usize) -> Vec<Line<'static>> {
    if game.phase() == MultipleChoicePhase::Finished {
        return vec![
            Line::from(Span::styled("Finished!", green_bold())),
            Line::default(),
            Line::from(Span::styled(
                format!(
                    "{} / {} correct ({}%)",
                    game.score(),
                    game.total_rounds(),
                    game.percentage()
                ),
                bold(),
            )),
            Line::default(),
            Line::from(Span::styled("enter to play again", dim())),
        ];
    }

    let question = game.question();
    let answered = game.last_answer();
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "round {}/{}   score {}",
                game.round(),
                game.total_rounds(),
                game.score()
            ),
            dim(),
        )),
        Line::default(),
        prompt_line(&question.challenge.translation.value),
        Line::default(),
    ];

    for (idx, option) in question.options.iter().enumerate() {
        let style = match answered {
            Some(_) if Some(idx) == question.correct_index() => green_bold(),
            Some(record) if record.selected == idx => red_bold(),
            Some(_) => dim(),
            None if idx == cursor => highlight(),
            None => bold(),
        };
        lines.push(Line::from(Span::styled(
            format!(" {}. {} ", idx + 1, option),
            style,
        )));
    }

    if let Some(record) = answered {
        lines.push(Line::default());
        lines.push(if record.correct {
            Line::from(Span::styled("Correct! enter to continue", green_bold()))
        } else {
            Line::from(Span::styled(
                format!("It was {}. enter to continue", question.correct_word()),
                red_bold(),
            ))
        });
    }
    lines
}

fn scramble_lines(game: &ScrambleGame, input: &str) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("score {} / {}", game.score(), game.rounds()),
            dim(),
        )),
        Line::default(),
        Line::from(Span::styled(
            spaced(&game.scrambled().to_uppercase()),
            bold().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            format!("means \"{}\"", game.challenge().translation.value),
            dim(),
        )),
        Line::default(),
    ];

    if let Some(hint) = game.hint() {
        lines.push(Line::from(Span::styled(
            format!(
                "starts with '{}', {} letters",
                hint.first_letter, hint.length
            ),
            Style::default().fg(Color::Cyan),
        )));
    }

    match game.status() {
        ScrambleStatus::Playing => lines.push(input_line(input)),
        ScrambleStatus::Correct => lines.push(Line::from(Span::styled(
            "Correct! enter for the next word",
            green_bold(),
        ))),
        ScrambleStatus::Wrong => lines.push(Line::from(Span::styled(
            format!("The word was {}. enter for the next word", game.answer()),
            red_bold(),
        ))),
    }
    lines
}

fn speed_round_lines(game: &SpeedRoundGame, input: &str) -> Vec<Line<'static>> {
    match game.phase() {
        SpeedRoundPhase::Idle => vec![
            Line::from(Span::styled(
                format!(
                    "Translate as many words as you can in {}",
                    format_clock(game.duration_secs())
                ),
                bold(),
            )),
            Line::default(),
            Line::from(Span::styled("enter to start", dim())),
        ],
        SpeedRoundPhase::Playing => {
            let clock_style = if game.time_left() <= 10 {
                red_bold()
            } else {
                bold()
            };
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(format_clock(game.time_left()), clock_style),
                    Span::styled(
                        format!("   score {}   streak {}", game.score(), game.streak()),
                        dim(),
                    ),
                ]),
                Line::default(),
                prompt_line(&game.challenge().translation.value),
                Line::default(),
                input_line(input),
            ];
            lines.push(match game.feedback() {
                Some(Feedback::Correct) => Line::from(Span::styled("correct", green_bold())),
                Some(Feedback::Wrong) => Line::from(Span::styled("wrong", red_bold())),
                None => Line::default(),
            });
            lines
        }
        SpeedRoundPhase::Finished => vec![
            Line::from(Span::styled("Time's up!", bold().fg(Color::Yellow))),
            Line::default(),
            Line::from(Span::styled(
                format!(
                    "{} correct of {} ({}%)",
                    game.score(),
                    game.attempts(),
                    game.accuracy_percent()
                ),
                bold(),
            )),
            Line::from(format!("best streak {}", game.best_streak())),
            Line::default(),
            Line::from(Span::styled("enter to play again", dim())),
        ],
    }
}

fn render_memory_board(f: &mut Frame, game: &MemoryMatchGame, cursor: usize, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(body);

    let status = Paragraph::new(Span::styled(
        format!(
            "pairs {}/{}   moves {}",
            game.matches(),
            game.total_pairs(),
            game.moves()
        ),
        dim(),
    ))
    .alignment(Alignment::Center);
    f.render_widget(status, chunks[0]);

    let cards = game.cards();
    let rows = cards.len().div_ceil(BOARD_COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows])
        .split(chunks[1]);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, BOARD_COLUMNS as u32); BOARD_COLUMNS])
            .split(*row_area);
        for (col, cell) in cols.iter().enumerate() {
            let idx = row * BOARD_COLUMNS + col;
            let Some(card) = cards.get(idx) else {
                continue;
            };
            let face_up = card.is_flipped || card.is_matched;
            let text = if face_up {
                fit(&card.content, cell.width.saturating_sub(2) as usize)
            } else {
                "?".to_string()
            };
            let text_style = if card.is_matched {
                green_bold()
            } else if face_up {
                bold()
            } else {
                dim()
            };
            let border_style = if idx == cursor {
                Style::default().fg(Color::Cyan)
            } else {
                dim()
            };
            let widget = Paragraph::new(Span::styled(text, text_style))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border_style));
            f.render_widget(widget, *cell);
        }
    }

    if game.is_finished() {
        let done = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("All pairs found in {} moves ({}%)", game.moves(), game.efficiency()),
                green_bold(),
            ),
            Span::styled("   enter to play again", dim()),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(done, chunks[2]);
    }
}
