use std::time::Duration;

use time::macros::datetime;

use crate::domain::events::{Participant, SessionEvent, TurnEndReason};
use crate::domain::game_data::GameData;
use crate::domain::round_timer::Round;
use crate::domain::session::{GameSession, Phase};
use crate::domain::test_session_helpers::{game_data, loaded, words};
use crate::domain::word_pool::SeededIndex;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::timers::{ManualScheduler, Scheduler, TimerKind};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn turn_ends(events: &[SessionEvent]) -> Vec<(usize, u32, TurnEndReason)> {
    events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::TurnEnded {
                contestant_index,
                time_left,
                reason,
            } => Some((*contestant_index, *time_left, *reason)),
            _ => None,
        })
        .collect()
}

#[test]
fn invalid_data_keeps_session_awaiting() {
    let mut session =
        GameSession::new(ManualScheduler::new(), Box::new(SeededIndex::from_seed(1)));
    let empty = GameData {
        id: "g".into(),
        teams: Vec::new(),
        words: vec!["a".into()],
        players_per_team: 1,
    };

    let err = session.load(empty).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::MissingTeams));
    assert_eq!(session.phase(), Phase::AwaitingData);
    assert!(matches!(
        session.start_turn(),
        Err(DomainError::PhaseMismatch {
            action: "start_turn",
            phase: Phase::AwaitingData
        })
    ));

    session.load(game_data(&[1], 1, &["a"])).unwrap();
    assert_eq!(session.phase(), Phase::Waiting);
    assert_eq!(session.round(), Round::FIRST);
}

#[test]
fn load_is_only_accepted_once() {
    let mut session = loaded(game_data(&[1], 1, &["a"]));
    assert!(session.load(game_data(&[1], 1, &["b"])).is_err());
}

#[test]
fn emptying_the_pool_ends_turn_early_without_advancing_cursor() {
    let mut session = loaded(game_data(&[1], 1, &["a", "b", "c", "d"]));
    session.start_turn().unwrap();
    assert_eq!(session.time_left(), 60);

    for _ in 0..4 {
        session.word_advance().unwrap();
    }

    assert_eq!(session.phase(), Phase::Waiting);
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.round().number(), 2);
    assert_eq!(session.pool().len(), 4);
    assert_eq!(session.pool().passes_completed(), 1);
    assert_eq!(session.current_word(), None);
    for kind in TimerKind::ALL {
        assert!(!session.scheduler().is_armed(kind));
    }

    let events = session.drain_events();
    assert_eq!(turn_ends(&events), [(0, 60, TurnEndReason::PoolEmpty)]);
    assert!(events.contains(&SessionEvent::PoolRefilled {
        passes_completed: 1,
        round: Round::new(2).unwrap(),
    }));
}

#[test]
fn expiry_advances_cursor_and_leaves_pool_alone() {
    let mut session = loaded(game_data(&[1, 1], 1, &["a", "b", "c"]));
    session.start_turn().unwrap();
    session.word_skip().unwrap();

    session.advance(secs(59));
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.time_left(), 1);

    session.advance(secs(1));
    assert_eq!(session.phase(), Phase::Waiting);
    assert_eq!(session.cursor(), 1);
    assert_eq!(session.pool().len(), 3);
    assert_eq!(session.round(), Round::FIRST);
    assert_eq!(session.pool().passes_completed(), 0);
    assert_eq!(
        turn_ends(&session.drain_events()),
        [(0, 0, TurnEndReason::TimeUp)]
    );

    // Next contestant starts a fresh round-one turn.
    session.start_turn().unwrap();
    assert_eq!(session.time_left(), 60);
}

#[test]
fn only_a_timeout_moves_the_cursor() {
    let mut session = loaded(game_data(&[1, 1], 1, &["a", "b"]));

    session.start_turn().unwrap();
    session.word_advance().unwrap();
    session.timer_expire().unwrap();
    assert_eq!(session.cursor(), 1);

    session.start_turn().unwrap();
    session.advance(secs(5));
    session.word_advance().unwrap();
    assert_eq!(session.cursor(), 1);

    assert_eq!(
        turn_ends(&session.drain_events()),
        [
            (0, 0, TurnEndReason::TimeUp),
            (1, 55, TurnEndReason::PoolEmpty)
        ]
    );
}

#[test]
fn turn_ends_exactly_once_however_long_the_clock_runs() {
    let mut session = loaded(game_data(&[1, 1, 1], 1, &["a", "b"]));
    session.start_turn().unwrap();
    session.advance(secs(600));

    assert_eq!(session.cursor(), 1);
    assert_eq!(turn_ends(&session.drain_events()).len(), 1);
    assert!(!session.scheduler().is_armed(TimerKind::Countdown));
}

#[test]
fn cursor_wraps_around_the_order() {
    let mut session = loaded(game_data(&[1, 1], 1, &["a", "b"]));
    for expected in [1, 0, 1] {
        session.start_turn().unwrap();
        session.timer_expire().unwrap();
        assert_eq!(session.cursor(), expected);
    }
}

#[test]
fn skip_keeps_pool_size_and_advance_consumes_one() {
    let mut session = loaded(game_data(&[2], 2, &["a", "b", "c"]));
    session.start_turn().unwrap();

    session.word_skip().unwrap();
    session.word_skip().unwrap();
    assert_eq!(session.pool().len(), 3);

    session.word_advance().unwrap();
    assert_eq!(session.pool().len(), 2);
    assert_eq!(session.snapshot().words_scored_this_turn, 1);
}

#[test]
fn every_advance_commits_a_score_for_the_active_contestant() {
    let mut session = loaded(game_data(&[1, 1], 1, &["a", "b", "c"]));
    session.start_turn().unwrap();
    session.word_advance().unwrap();
    session.word_skip().unwrap();
    session.word_advance().unwrap();

    let commits: Vec<String> = session
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            SessionEvent::ScoreCommit(c) => Some(c.contestant_id),
            _ => None,
        })
        .collect();
    assert_eq!(commits, ["id-t0p0", "id-t0p0"]);
}

#[test]
fn leftover_time_carries_into_round_two() {
    let mut session = loaded(game_data(&[1, 1], 1, &["a", "b"]));
    session.start_turn().unwrap();
    session.advance(secs(10));
    session.word_advance().unwrap();
    session.word_advance().unwrap();

    assert_eq!(session.round().number(), 2);
    assert_eq!(session.cursor(), 0);

    session.start_turn().unwrap();
    assert_eq!(session.time_left(), 30 + 50);
}

#[test]
fn round_two_turn_after_a_timeout_gets_ninety_seconds() {
    let mut session = loaded(game_data(&[1, 1], 1, &["a", "b"]));
    session.start_turn().unwrap();
    session.advance(secs(5));
    session.word_advance().unwrap();
    session.word_advance().unwrap();
    assert_eq!(session.round().number(), 2);

    session.start_turn().unwrap();
    assert_eq!(session.time_left(), 30 + 55);
    session.timer_expire().unwrap();
    assert_eq!(session.cursor(), 1);

    session.start_turn().unwrap();
    assert_eq!(session.time_left(), 90);
}

#[test]
fn round_three_caps_carry_at_sixty() {
    let mut session = loaded(game_data(&[1], 1, &["a"]));
    session.start_turn().unwrap();
    session.word_advance().unwrap();
    session.start_turn().unwrap();
    assert_eq!(session.time_left(), 90);
    session.word_advance().unwrap();

    assert_eq!(session.round(), Round::LAST);
    session.start_turn().unwrap();
    assert_eq!(session.time_left(), 60);
}

#[test]
fn round_three_uses_a_short_leftover_as_is() {
    let mut session = loaded(game_data(&[1], 1, &["a"]));
    session.start_turn().unwrap();
    session.word_advance().unwrap();
    session.start_turn().unwrap();
    session.advance(secs(40));
    session.word_advance().unwrap();

    session.start_turn().unwrap();
    assert_eq!(session.time_left(), 50);
}

#[test]
fn third_exhaustion_finishes_instead_of_refilling() {
    let mut session = loaded(game_data(&[1], 1, &["a", "b"]));
    for pass in 1..=2u8 {
        session.start_turn().unwrap();
        session.word_advance().unwrap();
        session.word_advance().unwrap();
        assert_eq!(session.pool().passes_completed(), pass);
        assert_eq!(session.phase(), Phase::Waiting);
    }

    session.start_turn().unwrap();
    session.word_advance().unwrap();
    session.word_advance().unwrap();

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.round(), Round::LAST);
    assert_eq!(session.pool().passes_completed(), 2);
    assert!(session.pool().is_exhausted());
    assert!(session.drain_events().contains(&SessionEvent::GameFinished));
    for kind in TimerKind::ALL {
        assert!(!session.scheduler().is_armed(kind));
    }
    assert!(session.start_turn().is_err());
    assert!(session.word_advance().is_err());
}

#[test]
fn commands_outside_a_turn_are_rejected_without_side_effects() {
    let mut session = loaded(game_data(&[1], 1, &["a", "b"]));
    assert!(matches!(
        session.word_advance(),
        Err(DomainError::PhaseMismatch { phase: Phase::Waiting, .. })
    ));
    assert!(session.word_skip().is_err());
    assert!(session.timer_expire().is_err());
    assert_eq!(session.pool().len(), 2);
    assert!(session.drain_events().is_empty());

    session.start_turn().unwrap();
    assert!(session.start_turn().is_err());
}

#[test]
fn leave_announces_and_cancels_everything() {
    let mut session = loaded(game_data(&[1], 1, &["a", "b"]));
    session.start_turn().unwrap();
    session.hold_start();
    session.drain_events();

    let at = datetime!(2025-05-04 12:00:00 UTC);
    session.leave(
        Participant {
            id: "host".into(),
            name: "Host".into(),
        },
        at,
    );

    assert_eq!(session.phase(), Phase::Finished);
    for kind in TimerKind::ALL {
        assert!(!session.scheduler().is_armed(kind));
    }
    match session.drain_events().as_slice() {
        [SessionEvent::PlayerLeft(notice)] => {
            assert_eq!(notice.game_id, "game-1");
            assert_eq!(notice.player_name, "Host");
            assert_eq!(notice.timestamp, at);
        }
        other => panic!("unexpected events: {other:?}"),
    }

    session.advance(secs(120));
    assert!(session.drain_events().is_empty());
}

#[test]
fn snapshot_reflects_the_active_turn() {
    let list = words(3);
    let mut session = loaded(game_data(&[2, 1], 2, &list));
    session.start_turn().unwrap();

    let snap = session.snapshot();
    assert_eq!(snap.phase, Phase::Playing);
    assert_eq!(snap.game_id, "game-1");
    assert_eq!(snap.time_left, 60);
    assert_eq!(snap.current_word.as_deref(), Some("w0"));
    assert_eq!(snap.visible_word(), Some("w0"));
    assert_eq!(snap.words_remaining, 3);
    let contestant = snap.contestant.unwrap();
    assert_eq!(contestant.name, "t0p0");
    assert_eq!(contestant.team_index, 1);

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["phase"], "playing");
    assert_eq!(json["round"], 1);
    assert_eq!(json["contestant"]["teamColorId"], "Зелени");
}
