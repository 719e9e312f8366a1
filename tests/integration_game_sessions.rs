use std::time::Duration;

use assert_matches::assert_matches;
use linguavault::challenge::ChallengePool;
use linguavault::config::GameSettings;
use linguavault::error::GameError;
use linguavault::game::{FlipOutcome, GameKind, MemoryPhase, MultipleChoicePhase};
use linguavault::history::HistoryDb;
use linguavault::session::GameSession;
use linguavault::store::{add_entry, parse_translation, FileVocabularyStore, VocabularyStore};
use rand::{rngs::StdRng, SeedableRng};

/// Integration tests for whole sessions fed from a real vocabulary file,
/// from store read through scoring to the history log.

fn store() -> (tempfile::TempDir, FileVocabularyStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileVocabularyStore::with_path(dir.path().join("words.json"));
    (dir, store)
}

#[test]
fn multiple_choice_perfect_run_is_logged() {
    let (_dir, store) = store();
    let entries = store.read_all().unwrap();
    let settings = GameSettings::default();
    let mut rng = StdRng::seed_from_u64(9);
    let history = HistoryDb::in_memory().unwrap();

    let mut session =
        GameSession::start(GameKind::MultipleChoice, &entries, "es", &settings, &mut rng).unwrap();
    let GameSession::MultipleChoice(game) = &mut session else {
        panic!("expected multiple choice");
    };

    for round in 1..=settings.multiple_choice_rounds {
        assert_eq!(game.round(), round);
        let question = game.question();
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.challenge.translation.language, "es");
        let correct = question.correct_index().unwrap();
        assert_eq!(game.select_option(correct), Some(true));
        game.next_question(&mut rng);
    }
    assert_eq!(game.phase(), MultipleChoicePhase::Finished);

    let summary = session.summary("es").unwrap();
    assert_eq!(summary.percent, 100);
    history.record(&summary).unwrap();
    assert_eq!(history.best_percent(GameKind::MultipleChoice).unwrap(), Some(100));
}

#[test]
fn new_language_becomes_playable_after_adding_words() {
    let (_dir, store) = store();
    let settings = GameSettings::default();
    let mut rng = StdRng::seed_from_u64(4);

    let entries = store.read_all().unwrap();
    assert_matches!(
        GameSession::start(GameKind::SpeedRound, &entries, "de", &settings, &mut rng),
        Err(GameError::InsufficientContent { required: 3, available: 0, .. })
    );

    for (word, de) in [("Dog", "Hund"), ("Cat", "Katze"), ("Tree", "Baum")] {
        add_entry(&store, word, vec![parse_translation(&format!("de={de}")).unwrap()]).unwrap();
    }
    let entries = store.read_all().unwrap();
    let mut session =
        GameSession::start(GameKind::SpeedRound, &entries, "de", &settings, &mut rng).unwrap();

    let GameSession::SpeedRound(game) = &mut session else {
        panic!("expected speed round");
    };
    game.start(&mut rng);
    for _ in 0..5 {
        let answer = game.challenge().answer();
        assert!(["dog", "cat", "tree"].contains(&answer.as_str()));
        assert_eq!(game.submit(&answer.to_uppercase(), &mut rng), Some(true));
    }
    assert_eq!(game.best_streak(), 5);

    session.on_tick(Duration::from_secs(settings.speed_round_secs as u64));
    assert!(session.is_finished());
    assert_eq!(session.summary("de").unwrap().percent, 100);
}

#[test]
fn memory_match_mismatch_flips_back_only_after_delay() {
    let (_dir, store) = store();
    let entries = store.read_all().unwrap();
    let settings = GameSettings::default();
    let mut rng = StdRng::seed_from_u64(12);

    let mut session =
        GameSession::start(GameKind::MemoryMatch, &entries, "fr", &settings, &mut rng).unwrap();
    let GameSession::MemoryMatch(game) = &mut session else {
        panic!("expected memory match");
    };

    let first = 0;
    let second = game
        .cards()
        .iter()
        .position(|c| c.pair_id != game.cards()[first].pair_id)
        .unwrap();
    assert_eq!(game.flip(first), FlipOutcome::Revealed);
    assert_eq!(game.flip(second), FlipOutcome::Checking { matched: false });

    session.on_tick(settings.mismatch_reveal() - Duration::from_millis(1));
    let GameSession::MemoryMatch(game) = &mut session else {
        unreachable!();
    };
    assert_eq!(game.phase(), MemoryPhase::Checking { matched: false });
    assert!(game.cards()[first].is_flipped);

    session.on_tick(Duration::from_millis(1));
    let GameSession::MemoryMatch(game) = &session else {
        unreachable!();
    };
    assert_eq!(game.phase(), MemoryPhase::Flipping);
    assert!(!game.cards()[first].is_flipped);
    assert!(!game.cards()[second].is_flipped);
    assert_eq!(game.moves(), 1);
}

#[test]
fn challenge_pool_only_draws_target_language() {
    let (_dir, store) = store();
    let entries = store.read_all().unwrap();
    let pool = ChallengePool::new(&entries, "fr").unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..50 {
        assert_eq!(pool.draw(&mut rng).translation.language, "fr");
    }
    assert_matches!(ChallengePool::new(&entries, "ja"), Err(GameError::EmptyPool));
}
