//! Terminal-independent application state: which screen is showing, what the
//! player has typed, and how keys map onto the selection flow and the engines.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;

use crate::config::GameSettings;
use crate::error::GameError;
use crate::game::{
    GameKind, HangmanStatus, MemoryPhase, MultipleChoicePhase, ScrambleStatus, SpeedRoundPhase,
    GAMES,
};
use crate::history::HistoryDb;
use crate::selection::{
    available_games, language_options, GameAvailability, LanguageOption, SelectionFlow,
    SelectionStep,
};
use crate::session::{GameSession, SessionSummary};
use crate::vocabulary::VocabularyEntry;

/// Columns in the memory-match board
pub const BOARD_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Menu,
    Language,
    Playing,
}

pub struct App {
    vocabulary: Vec<VocabularyEntry>,
    settings: GameSettings,
    default_language: Option<String>,
    rng: StdRng,
    history: Option<HistoryDb>,
    flow: SelectionFlow,
    session: Option<GameSession>,
    pub menu_cursor: usize,
    pub language_cursor: usize,
    pub option_cursor: usize,
    pub board_cursor: usize,
    pub input: String,
    message: Option<String>,
    recorded: bool,
    last_summary: Option<SessionSummary>,
    should_quit: bool,
}

impl App {
    pub fn new(vocabulary: Vec<VocabularyEntry>, settings: GameSettings, rng: StdRng) -> Self {
        Self {
            vocabulary,
            settings,
            default_language: None,
            rng,
            history: None,
            flow: SelectionFlow::new(),
            session: None,
            menu_cursor: 0,
            language_cursor: 0,
            option_cursor: 0,
            board_cursor: 0,
            input: String::new(),
            message: None,
            recorded: false,
            last_summary: None,
            should_quit: false,
        }
    }

    pub fn with_history(mut self, history: HistoryDb) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_default_language(mut self, language: Option<String>) -> Self {
        self.default_language = language;
        self
    }

    pub fn view(&self) -> View {
        match self.flow.step() {
            SelectionStep::Menu => View::Menu,
            SelectionStep::Language { .. } => View::Language,
            SelectionStep::Playing { .. } => View::Playing,
        }
    }

    pub fn step(&self) -> &SelectionStep {
        self.flow.step()
    }

    pub fn vocabulary(&self) -> &[VocabularyEntry] {
        &self.vocabulary
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected_game(&self) -> Option<GameKind> {
        match self.flow.step() {
            SelectionStep::Menu => None,
            SelectionStep::Language { game } | SelectionStep::Playing { game, .. } => Some(*game),
        }
    }

    pub fn playing_language(&self) -> Option<&str> {
        match self.flow.step() {
            SelectionStep::Playing { language, .. } => Some(language),
            _ => None,
        }
    }

    pub fn menu_items(&self) -> Vec<GameAvailability> {
        available_games(&self.vocabulary)
    }

    /// Languages offered for the game picked on the menu
    pub fn language_choices(&self) -> Vec<LanguageOption> {
        self.selected_game()
            .map(|game| language_options(&self.vocabulary, game))
            .unwrap_or_default()
    }

    /// Moves on to the language picker for `game`
    pub fn choose_game(&mut self, game: GameKind) -> Result<(), GameError> {
        self.flow.select_game(&self.vocabulary, game)?;
        self.menu_cursor = GAMES.iter().position(|g| g.kind == game).unwrap_or(0);
        self.language_cursor = self.preferred_language_index();
        self.message = None;
        Ok(())
    }

    /// Start a session directly, skipping the menu
    pub fn launch(&mut self, game: GameKind, language: &str) -> Result<(), GameError> {
        self.flow.select_game(&self.vocabulary, game)?;
        self.flow.select_language(&self.vocabulary, language)?;
        self.start_session(game, language.to_string());
        Ok(())
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if let Some(session) = self.session.as_mut() {
            session.on_tick(elapsed);
        }
        self.record_if_finished();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.view() {
            View::Menu => self.on_menu_key(key),
            View::Language => self.on_language_key(key),
            View::Playing => {
                if key.code == KeyCode::Esc {
                    self.leave_session();
                } else {
                    self.on_game_key(key);
                    self.record_if_finished();
                }
            }
        }
    }

    fn quit(&mut self) {
        self.leave_session();
        self.should_quit = true;
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_cursor = (self.menu_cursor + 1).min(GAMES.len() - 1);
            }
            KeyCode::Enter => {
                if let Err(e) = self.choose_game(GAMES[self.menu_cursor].kind) {
                    self.message = Some(e.to_string());
                }
            }
            _ => {}
        }
    }

    fn preferred_language_index(&self) -> usize {
        let choices = self.language_choices();
        self.default_language
            .as_deref()
            .and_then(|code| choices.iter().position(|o| o.info.code == code))
            .or_else(|| choices.iter().position(|o| o.has_enough))
            .unwrap_or(0)
    }

    fn on_language_key(&mut self, key: KeyEvent) {
        let choices = self.language_choices();
        match key.code {
            KeyCode::Esc => {
                self.message = None;
                self.flow.back_to_menu();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.language_cursor = self.language_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !choices.is_empty() {
                    self.language_cursor = (self.language_cursor + 1).min(choices.len() - 1);
                }
            }
            KeyCode::Enter => {
                let (Some(game), Some(choice)) =
                    (self.selected_game(), choices.get(self.language_cursor))
                else {
                    return;
                };
                let language = choice.info.code.to_string();
                match self.flow.select_language(&self.vocabulary, &language) {
                    Ok(()) => self.start_session(game, language),
                    Err(e) => self.message = Some(e.to_string()),
                }
            }
            _ => {}
        }
    }

    fn start_session(&mut self, game: GameKind, language: String) {
        match GameSession::start(game, &self.vocabulary, &language, &self.settings, &mut self.rng) {
            Ok(session) => {
                self.session = Some(session);
                self.reset_input();
                self.recorded = false;
                self.last_summary = None;
                self.message = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not start session");
                self.message = Some(e.to_string());
                self.flow.back_to_language();
            }
        }
    }

    /// Records whatever was played and returns to the language picker
    fn leave_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            if !self.recorded {
                if let Some(summary) = self.playing_language().and_then(|l| session.summary(l)) {
                    self.record(summary);
                }
            }
            session.teardown();
        }
        self.reset_input();
        self.flow.back_to_language();
    }

    fn reset_input(&mut self) {
        self.input.clear();
        self.option_cursor = 0;
        self.board_cursor = 0;
    }

    fn restart_session(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.restart(&mut self.rng);
        }
        self.reset_input();
        self.recorded = false;
    }

    fn record_if_finished(&mut self) {
        if self.recorded {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.is_finished() {
            return;
        }
        if let Some(summary) = self.playing_language().and_then(|l| session.summary(l)) {
            self.record(summary);
        }
    }

    fn record(&mut self, summary: SessionSummary) {
        tracing::info!(
            game = %summary.game,
            language = %summary.language,
            score = summary.score,
            percent = summary.percent,
            "session finished"
        );
        if let Some(history) = &self.history {
            if let Err(e) = history.record(&summary) {
                tracing::warn!(error = %e, "failed to record session");
            }
        }
        self.recorded = true;
        self.last_summary = Some(summary);
    }

    fn on_game_key(&mut self, key: KeyEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session {
            GameSession::Hangman(game) => match key.code {
                KeyCode::Enter if game.status() != HangmanStatus::Playing => {
                    game.next_round(&mut self.rng);
                }
                KeyCode::Char(c) => {
                    game.guess(c);
                }
                _ => {}
            },

            GameSession::MultipleChoice(game) => match game.phase() {
                MultipleChoicePhase::Answering => {
                    let options = game.question().options.len();
                    match key.code {
                        KeyCode::Up | KeyCode::Char('k') => {
                            self.option_cursor = self.option_cursor.saturating_sub(1);
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            self.option_cursor =
                                (self.option_cursor + 1).min(options.saturating_sub(1));
                        }
                        KeyCode::Enter => {
                            game.select_option(self.option_cursor);
                        }
                        KeyCode::Char(c) => {
                            if let Some(n) = c
                                .to_digit(10)
                                .filter(|n| *n >= 1 && *n as usize <= options)
                            {
                                self.option_cursor = n as usize - 1;
                                game.select_option(self.option_cursor);
                            }
                        }
                        _ => {}
                    }
                }
                MultipleChoicePhase::Answered => {
                    if key.code == KeyCode::Enter {
                        game.next_question(&mut self.rng);
                        self.option_cursor = 0;
                    }
                }
                MultipleChoicePhase::Finished => {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char('r')) {
                        self.restart_session();
                    }
                }
            },

            GameSession::Scramble(game) => match (game.status(), key.code) {
                (ScrambleStatus::Playing, KeyCode::Enter) => {
                    if game.submit(&self.input).is_some() {
                        self.input.clear();
                    }
                }
                (ScrambleStatus::Playing, KeyCode::Tab) => {
                    game.reveal_hint();
                }
                (ScrambleStatus::Playing, KeyCode::Backspace) => {
                    self.input.pop();
                }
                (ScrambleStatus::Playing, KeyCode::Char(c)) => self.input.push(c),
                (_, KeyCode::Enter) => {
                    game.next_round(&mut self.rng);
                    self.input.clear();
                }
                _ => {}
            },

            GameSession::SpeedRound(game) => match (game.phase(), key.code) {
                (SpeedRoundPhase::Idle, KeyCode::Enter) => {
                    game.start(&mut self.rng);
                    self.input.clear();
                }
                (SpeedRoundPhase::Playing, KeyCode::Enter) => {
                    if game.submit(&self.input, &mut self.rng).is_some() {
                        self.input.clear();
                    }
                }
                (SpeedRoundPhase::Playing, KeyCode::Backspace) => {
                    self.input.pop();
                }
                (SpeedRoundPhase::Playing, KeyCode::Char(c)) => self.input.push(c),
                (SpeedRoundPhase::Finished, KeyCode::Enter | KeyCode::Char('r')) => {
                    self.restart_session();
                }
                _ => {}
            },

            GameSession::MemoryMatch(game) => {
                if game.phase() == MemoryPhase::Finished {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char('r')) {
                        self.restart_session();
                    }
                    return;
                }
                let cards = game.cards().len();
                if cards == 0 {
                    return;
                }
                let cursor = self.board_cursor;
                self.board_cursor = match key.code {
                    KeyCode::Left | KeyCode::Char('h') => cursor.saturating_sub(1),
                    KeyCode::Right | KeyCode::Char('l') => (cursor + 1).min(cards - 1),
                    KeyCode::Up | KeyCode::Char('k') if cursor >= BOARD_COLUMNS => {
                        cursor - BOARD_COLUMNS
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if cursor + BOARD_COLUMNS < cards {
                            cursor + BOARD_COLUMNS
                        } else {
                            cursor
                        }
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        game.flip(cursor);
                        cursor
                    }
                    _ => cursor,
                };
            }
        }
    }
}
