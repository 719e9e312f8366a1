use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use linguavault::app::{App, View};
use linguavault::config::GameSettings;
use linguavault::game::{GameKind, HangmanStatus};
use linguavault::history::HistoryDb;
use linguavault::runtime::{AppEvent, EventSource, FixedTicker, Runner, Ticker, TestEventSource};
use linguavault::session::GameSession;
use linguavault::store::seed_vocabulary;
use rand::{rngs::StdRng, SeedableRng};

// Headless integration using the internal runtime + App without a TTY.

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn drive<E: EventSource, T: Ticker>(runner: &mut Runner<E, T>, app: &mut App, steps: u32) {
    for _ in 0..steps {
        match runner.step() {
            AppEvent::Tick(elapsed) => app.on_tick(elapsed),
            AppEvent::Resize => {}
            AppEvent::Key(key) => app.handle_key(key),
        }
        if app.should_quit() {
            break;
        }
    }
}

fn move_cursor(tx: &Sender<AppEvent>, from: usize, to: usize) {
    let (code, times) = if to >= from {
        (KeyCode::Right, to - from)
    } else {
        (KeyCode::Left, from - to)
    };
    for _ in 0..times {
        tx.send(key(code)).unwrap();
    }
}

fn seeded_app(settings: GameSettings) -> App {
    App::new(seed_vocabulary(), settings, StdRng::seed_from_u64(42))
        .with_history(HistoryDb::in_memory().unwrap())
}

#[test]
fn headless_menu_to_hangman_win() {
    let mut app = seeded_app(GameSettings::default());
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    // Hangman is first on the menu, Spanish first in the picker
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    drive(&mut runner, &mut app, 2);
    assert_eq!(app.view(), View::Playing);

    let answer = match app.session() {
        Some(GameSession::Hangman(game)) => game.challenge().answer(),
        _ => panic!("expected a hangman session"),
    };
    for c in answer.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    drive(&mut runner, &mut app, answer.chars().count() as u32);

    match app.session() {
        Some(GameSession::Hangman(game)) => {
            assert_eq!(game.status(), HangmanStatus::Won);
            assert_eq!(game.remaining_attempts(), game.max_errors());
        }
        _ => panic!("expected a hangman session"),
    }

    tx.send(key(KeyCode::Esc)).unwrap();
    drive(&mut runner, &mut app, 1);
    assert_eq!(app.view(), View::Language);
    let summary = app.last_summary().unwrap();
    assert_eq!(summary.game, GameKind::Hangman);
    assert_eq!((summary.score, summary.attempts, summary.percent), (1, 1, 100));
}

#[test]
fn headless_memory_match_perfect_board() {
    let settings = GameSettings::default();
    let reveal = settings.match_reveal();
    let mut app = seeded_app(settings);
    app.launch(GameKind::MemoryMatch, "es").unwrap();

    let cards = match app.session() {
        Some(GameSession::MemoryMatch(game)) => game.cards().to_vec(),
        _ => panic!("expected a memory match session"),
    };
    assert_eq!(cards.len(), 12);

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    let mut cursor = 0;
    let mut queued = 0;
    for (first, card) in cards.iter().enumerate() {
        if !card.id.starts_with("word-") {
            continue;
        }
        let second = cards
            .iter()
            .position(|c| c.pair_id == card.pair_id && c.id != card.id)
            .unwrap();
        for target in [first, second] {
            move_cursor(&tx, cursor, target);
            queued += cursor.abs_diff(target);
            tx.send(key(KeyCode::Enter)).unwrap();
            cursor = target;
            queued += 1;
        }
        tx.send(AppEvent::Tick(reveal)).unwrap();
        queued += 1;
    }
    drive(&mut runner, &mut app, queued as u32);

    match app.session() {
        Some(GameSession::MemoryMatch(game)) => {
            assert!(game.is_finished());
            assert_eq!(game.moves(), 6);
            assert_eq!(game.efficiency(), 100);
        }
        _ => panic!("expected a memory match session"),
    }
    let summary = app.last_summary().unwrap();
    assert_eq!(summary.game, GameKind::MemoryMatch);
    assert_eq!(summary.percent, 100);
}

#[test]
fn headless_speed_round_finishes_by_time() {
    let settings = GameSettings {
        speed_round_secs: 1,
        ..GameSettings::default()
    };
    let mut app = seeded_app(settings);
    app.launch(GameKind::SpeedRound, "fr").unwrap();

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(10)),
    );
    tx.send(key(KeyCode::Enter)).unwrap();

    for _ in 0..300u32 {
        // up to ~3s
        drive(&mut runner, &mut app, 1);
        if app.session().is_some_and(|s| s.is_finished()) {
            break;
        }
    }

    assert!(
        app.session().is_some_and(|s| s.is_finished()),
        "speed round should finish by timeout"
    );
    let summary = app.last_summary().unwrap();
    assert_eq!(summary.attempts, 0);
    assert_eq!(summary.language, "fr");
}
