pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use linguavault::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    game::GameKind,
    history::HistoryDb,
    language::{language_label, LANGUAGES},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    selection::{available_games, language_options, word_count},
    stats::{top_languages, VocabularyStats},
    store::{
        add_entry, export_csv, import_csv, parse_translation, remove_entry,
        FileVocabularyStore, VocabularyStore,
    },
    vocabulary::{search, VocabularyEntry},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, File, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

const TICK_RATE_MS: u64 = 100;
const DEFAULT_LOG_FILTER: &str = "linguavault=info";

/// vocabulary trainer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Keep a personal vocabulary with translations and practice it through five small games: hangman, multiple choice, word scramble, a timed speed round and memory match."
)]
pub struct Cli {
    /// vocabulary file to use instead of the default location
    #[clap(long, global = true)]
    data: Option<PathBuf>,

    /// seed for reproducible shuffles
    #[clap(long, global = true)]
    seed: Option<u64>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// open the game menu (default)
    Play {
        /// skip the menu and go straight to a game
        #[clap(short, long, value_enum)]
        game: Option<GameKind>,

        /// practice language code, e.g. es
        #[clap(short, long, requires = "game")]
        language: Option<String>,
    },

    /// list saved words
    List {
        /// only words or translations containing this text
        #[clap(short, long)]
        search: Option<String>,
    },

    /// save a new word
    Add {
        word: String,

        /// translation as <code>=<value>, repeatable
        #[clap(short = 't', long = "translation")]
        translations: Vec<String>,
    },

    /// delete a word by id
    Remove { id: String },

    /// vocabulary statistics
    Stats,

    /// recent practice sessions
    History {
        #[clap(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// available games and their requirements
    Games,

    /// supported languages and how many words each has
    Languages,

    /// write the vocabulary to a csv file
    Export { path: PathBuf },

    /// merge words from a csv file
    Import { path: PathBuf },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing();

    let config = FileConfigStore::new().load();
    let store = match &cli.data {
        Some(path) => FileVocabularyStore::with_path(path),
        None => FileVocabularyStore::new(),
    };

    match cli.command.clone().unwrap_or(Command::Play {
        game: None,
        language: None,
    }) {
        Command::Play { game, language } => play(&cli, &config, &store, game, language),
        Command::List { search: query } => {
            list(&store.read_all()?, query.as_deref());
            Ok(())
        }
        Command::Add { word, translations } => {
            let translations = translations
                .iter()
                .map(|raw| parse_translation(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let entry = add_entry(&store, &word, translations)?;
            println!("added #{} {}", entry.id, entry.word);
            Ok(())
        }
        Command::Remove { id } => {
            let entry = remove_entry(&store, &id)?;
            println!("removed #{} {}", entry.id, entry.word);
            Ok(())
        }
        Command::Stats => {
            print_stats(&store.read_all()?);
            Ok(())
        }
        Command::History { limit } => print_history(&HistoryDb::new()?, limit),
        Command::Games => {
            print_games(&store.read_all()?);
            Ok(())
        }
        Command::Languages => {
            print_languages(&store.read_all()?);
            Ok(())
        }
        Command::Export { path } => {
            let rows = export_csv(&store.read_all()?, File::create(&path)?)?;
            println!("exported {rows} rows to {}", path.display());
            Ok(())
        }
        Command::Import { path } => {
            let report = import_csv(&store, File::open(&path)?)?;
            println!(
                "imported {} words and {} translations ({} skipped)",
                report.added_words, report.added_translations, report.skipped
            );
            Ok(())
        }
    }
}

/// Logs go to a file; stdout belongs to the TUI
/// `RUST_LOG` when it is set and valid, otherwise info for this crate
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing() {
    let path = AppDirs::log_path();
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn play(
    cli: &Cli,
    config: &Config,
    store: &FileVocabularyStore,
    game: Option<GameKind>,
    language: Option<String>,
) -> Result<(), Box<dyn Error>> {
    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let vocabulary = store.read_all()?;
    let rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut app = App::new(vocabulary, config.games.clone(), rng)
        .with_default_language(config.default_language.clone());
    match HistoryDb::new() {
        Ok(history) => app = app.with_history(history),
        Err(e) => tracing::warn!(error = %e, "session history unavailable"),
    }

    if let Some(game) = game {
        match language {
            Some(language) => app.launch(game, &language)?,
            None => app.choose_game(game)?,
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            AppEvent::Tick(elapsed) => app.on_tick(elapsed),
            AppEvent::Resize => {}
            AppEvent::Key(key) => app.handle_key(key),
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn list(entries: &[VocabularyEntry], query: Option<&str>) {
    let matches = search(entries, query.unwrap_or(""));
    if matches.is_empty() {
        println!("no words found");
        return;
    }
    let width = matches.iter().map(|e| e.word.width()).max().unwrap_or(0);
    for entry in matches {
        let translations = entry
            .translations
            .iter()
            .map(|t| format!("{}: {}", t.language, t.value))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:>4}  {}  {}", entry.id, pad(&entry.word, width), translations);
    }
}

fn print_stats(entries: &[VocabularyEntry]) {
    let stats = VocabularyStats::from_entries(entries, chrono::Utc::now());
    println!("words:        {}", stats.total_words);
    println!("languages:    {}", stats.languages);
    println!("translations: {}", stats.translations);
    println!("this week:    {}", stats.added_this_week);

    let top = top_languages(entries, 5);
    if !top.is_empty() {
        println!();
        println!("top languages");
        for (code, count) in top {
            println!("  {}  {count}", pad(language_label(&code), 12));
        }
    }
}

fn print_history(history: &HistoryDb, limit: usize) -> Result<(), Box<dyn Error>> {
    let recent = history.recent(limit)?;
    if recent.is_empty() {
        println!("no sessions played yet");
        return Ok(());
    }
    for s in &recent {
        let streak = s
            .best_streak
            .map(|b| format!("  best streak {b}"))
            .unwrap_or_default();
        println!(
            "{}  {}  {}  {}/{}  {}%{streak}",
            s.finished_at.format("%Y-%m-%d %H:%M"),
            pad(s.game.title(), 16),
            pad(&s.language, 3),
            s.score,
            s.attempts,
            s.percent,
        );
    }

    println!();
    for record in history.game_records()? {
        println!(
            "{}  {} sessions  best {}%  avg {:.0}%",
            pad(record.game.title(), 16),
            record.sessions,
            record.best_percent,
            record.avg_percent
        );
    }
    Ok(())
}

fn print_games(entries: &[VocabularyEntry]) {
    for game in available_games(entries) {
        let descriptor = game.descriptor;
        println!(
            "{}  {}  {}  min {} words{}",
            pad(&descriptor.kind.to_string(), 16),
            pad(descriptor.title, 16),
            pad(&descriptor.difficulty.to_string(), 6),
            descriptor.min_words,
            if game.available { "" } else { "  (locked)" }
        );
    }
}

fn print_languages(entries: &[VocabularyEntry]) {
    for lang in LANGUAGES.iter() {
        println!(
            "{}  {}  {} words",
            lang.code,
            pad(lang.label, 12),
            word_count(entries, lang.code)
        );
    }
    let playable = language_options(entries, GameKind::Hangman).len();
    println!();
    println!("{playable} languages have words to practice");
}
