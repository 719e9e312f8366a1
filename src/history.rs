use chrono::{DateTime, Local, SecondsFormat, Utc};
use rusqlite::{params, Connection, Result};
use std::path::Path;

use crate::app_dirs::AppDirs;
use crate::game::GameKind;
use crate::session::SessionSummary;

/// Per-game aggregate over every recorded session
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub game: GameKind,
    pub sessions: i64,
    pub best_percent: u32,
    pub avg_percent: f64,
}

/// Database of finished practice sessions
#[derive(Debug)]
pub struct HistoryDb {
    conn: Connection,
}

impl HistoryDb {
    /// Opens the database at the default location, creating it if needed
    pub fn new() -> Result<Self> {
        let path = AppDirs::history_db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {e}")),
                )
            })?;
        }
        Self::open(path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS game_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game TEXT NOT NULL,
                language TEXT NOT NULL,
                score INTEGER NOT NULL,
                attempts INTEGER NOT NULL,
                percent INTEGER NOT NULL,
                best_streak INTEGER,
                finished_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_game_sessions_game ON game_sessions(game)",
            [],
        )?;

        Ok(HistoryDb { conn })
    }

    pub fn record(&self, summary: &SessionSummary) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO game_sessions
            (game, language, score, attempts, percent, best_streak, finished_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                summary.game.to_string(),
                summary.language,
                summary.score,
                summary.attempts,
                summary.percent,
                summary.best_streak,
                summary
                    .finished_at
                    .with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        Ok(())
    }

    /// Most recent sessions first
    pub fn recent(&self, limit: usize) -> Result<Vec<SessionSummary>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT game, language, score, attempts, percent, best_streak, finished_at
            FROM game_sessions
            ORDER BY julianday(finished_at) DESC, id DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map([limit as i64], |row| {
            let game: String = row.get(0)?;
            let finished_at: String = row.get(6)?;
            Ok(SessionSummary {
                game: parse_game(&game, 0)?,
                language: row.get(1)?,
                score: row.get(2)?,
                attempts: row.get(3)?,
                percent: row.get(4)?,
                best_streak: row.get(5)?,
                finished_at: parse_timestamp(&finished_at, 6)?,
            })
        })?;

        rows.collect()
    }

    /// Session count, best and average percentage per game
    pub fn game_records(&self) -> Result<Vec<GameRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT game, COUNT(*), MAX(percent), AVG(percent)
            FROM game_sessions
            GROUP BY game
            ORDER BY game
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let game: String = row.get(0)?;
            Ok(GameRecord {
                game: parse_game(&game, 0)?,
                sessions: row.get(1)?,
                best_percent: row.get(2)?,
                avg_percent: row.get(3)?,
            })
        })?;

        rows.collect()
    }

    pub fn best_percent(&self, game: GameKind) -> Result<Option<u32>> {
        self.conn.query_row(
            "SELECT MAX(percent) FROM game_sessions WHERE game = ?1",
            [game.to_string()],
            |row| row.get(0),
        )
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM game_sessions", [])?;
        Ok(())
    }
}

fn parse_game(id: &str, column: usize) -> Result<GameKind> {
    GameKind::from_id(id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_timestamp(raw: &str, column: usize) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Local))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    fn summary(game: GameKind, percent: u32, minutes_ago: i64) -> SessionSummary {
        SessionSummary {
            game,
            language: "es".to_string(),
            score: percent / 10,
            attempts: 10,
            percent,
            best_streak: (game == GameKind::SpeedRound).then_some(3),
            finished_at: Local::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_record_and_recent() {
        let db = HistoryDb::in_memory().unwrap();
        db.record(&summary(GameKind::MultipleChoice, 70, 10)).unwrap();
        db.record(&summary(GameKind::SpeedRound, 80, 5)).unwrap();
        db.record(&summary(GameKind::Hangman, 50, 1)).unwrap();

        let recent = db.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].game, GameKind::Hangman);
        assert_eq!(recent[1].game, GameKind::SpeedRound);
        assert_eq!(recent[1].best_streak, Some(3));
        assert_eq!(recent[0].best_streak, None);
    }

    #[test]
    fn test_recent_orders_by_instant_across_offsets() {
        let db = HistoryDb::in_memory().unwrap();
        let insert = |game: &str, finished_at: &str| {
            db.conn
                .execute(
                    "INSERT INTO game_sessions
                     (game, language, score, attempts, percent, best_streak, finished_at)
                     VALUES (?1, 'es', 1, 1, 100, NULL, ?2)",
                    params![game, finished_at],
                )
                .unwrap();
        };
        // 01:10 UTC, recorded before the clocks went forward
        insert("scramble", "2026-03-29T01:10:00+00:00");
        // 00:30 UTC, written with a summer offset
        insert("hangman", "2026-03-29T02:30:00+02:00");

        let recent = db.recent(2).unwrap();
        assert_eq!(recent[0].game, GameKind::Scramble);
        assert_eq!(recent[1].game, GameKind::Hangman);

        db.record(&summary(GameKind::MemoryMatch, 60, 0)).unwrap();
        let stored: String = db
            .conn
            .query_row(
                "SELECT finished_at FROM game_sessions WHERE game = 'memory-match'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(stored.ends_with('Z'), "{stored}");
        assert_eq!(db.recent(1).unwrap()[0].game, GameKind::MemoryMatch);
    }

    #[test]
    fn test_game_records() {
        let db = HistoryDb::in_memory().unwrap();
        db.record(&summary(GameKind::MultipleChoice, 70, 3)).unwrap();
        db.record(&summary(GameKind::MultipleChoice, 90, 2)).unwrap();
        db.record(&summary(GameKind::Scramble, 40, 1)).unwrap();

        let records = db.game_records().unwrap();
        assert_eq!(records.len(), 2);
        let mc = records
            .iter()
            .find(|r| r.game == GameKind::MultipleChoice)
            .unwrap();
        assert_eq!(mc.sessions, 2);
        assert_eq!(mc.best_percent, 90);
        assert!((mc.avg_percent - 80.0).abs() < 1e-9);

        assert_eq!(db.best_percent(GameKind::Scramble).unwrap(), Some(40));
        assert_eq!(db.best_percent(GameKind::MemoryMatch).unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let db = HistoryDb::in_memory().unwrap();
        db.record(&summary(GameKind::Hangman, 100, 1)).unwrap();
        db.clear().unwrap();
        assert!(db.recent(10).unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_connections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.db");
        {
            let db = HistoryDb::open(&path).unwrap();
            db.record(&summary(GameKind::MemoryMatch, 75, 1)).unwrap();
        }
        let db = HistoryDb::open(&path).unwrap();
        assert_eq!(db.recent(5).unwrap()[0].percent, 75);
    }
}
