use linguavault::app::{App, View};
use ratatui::Frame;

use crate::ui::{games::render_game, menu};

/// A UI Screen boundary: one renderer per step of the selection flow
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Game menu
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        menu::render_menu(app, f);
    }
}

/// Language picker for the chosen game
pub struct LanguageScreen;

impl Screen for LanguageScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        menu::render_language_picker(app, f);
    }
}

/// Whichever game is running
pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_game(app, f);
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Menu => Box::new(MenuScreen),
        View::Language => Box::new(LanguageScreen),
        View::Playing => Box::new(GameScreen),
    }
}
