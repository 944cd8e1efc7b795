use std::time::Duration;

use crate::domain::session::GameSession;
use crate::domain::test_session_helpers::{game_data, loaded};
use crate::timers::{ManualScheduler, Scheduler, TimerKind};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn playing() -> GameSession<ManualScheduler> {
    let mut session = loaded(game_data(&[1, 1], 1, &["a", "b", "c"]));
    session.start_turn().unwrap();
    session
}

#[test]
fn drawn_word_hides_after_one_second() {
    let mut session = playing();
    assert!(session.word_visible());

    session.advance(ms(999));
    assert!(session.word_visible());

    session.advance(ms(1));
    assert!(!session.word_visible());
    assert_eq!(session.snapshot().visible_word(), None);
    assert_eq!(session.current_word(), Some("a"));
}

#[test]
fn hold_reveals_after_delay_and_release_hides() {
    let mut session = playing();
    session.advance(ms(1500));
    session.hold_start();

    session.advance(ms(199));
    assert!(!session.word_visible());
    session.advance(ms(1));
    assert!(session.word_visible());

    session.hold_end();
    assert!(!session.word_visible());
    for kind in [TimerKind::RevealHide, TimerKind::RevealShow] {
        assert!(!session.scheduler().is_armed(kind));
    }
}

#[test]
fn early_hold_keeps_word_up_past_auto_hide() {
    let mut session = playing();
    session.advance(ms(100));
    session.hold_start();
    assert!(!session.scheduler().is_armed(TimerKind::RevealHide));

    session.advance(ms(1000));
    assert!(session.word_visible());
    assert!(session.snapshot().holding);
}

#[test]
fn quick_release_cancels_pending_reveal() {
    let mut session = playing();
    session.advance(ms(100));
    session.hold_start();
    session.advance(ms(150));
    session.hold_end();
    session.advance(ms(10));
    session.hold_start();

    session.advance(ms(199));
    assert!(!session.word_visible());
    session.advance(ms(1));
    assert!(session.word_visible());
    assert_eq!(session.scheduler().now(), ms(460));
}

#[test]
fn hold_outside_a_turn_is_ignored() {
    let mut session = loaded(game_data(&[1], 1, &["a"]));
    session.hold_start();
    assert!(!session.scheduler().is_armed(TimerKind::RevealShow));
    session.advance(ms(500));
    assert!(!session.word_visible());
    assert!(!session.snapshot().holding);
}

#[test]
fn skip_while_holding_shows_new_word_without_auto_hide() {
    let mut session = playing();
    session.hold_start();
    session.advance(ms(300));
    assert!(session.word_visible());

    session.word_skip().unwrap();
    assert!(session.word_visible());
    assert!(!session.scheduler().is_armed(TimerKind::RevealHide));

    session.advance(ms(2000));
    assert!(session.word_visible());
}

#[test]
fn next_word_restarts_the_auto_hide() {
    let mut session = playing();
    session.advance(ms(800));
    session.word_advance().unwrap();

    session.advance(ms(999));
    assert!(session.word_visible());
    session.advance(ms(1));
    assert!(!session.word_visible());
}

#[test]
fn turn_end_clears_hold_and_reveal_timers() {
    let mut session = playing();
    session.hold_start();
    session.timer_expire().unwrap();

    let snap = session.snapshot();
    assert!(!snap.word_visible);
    assert!(!snap.holding);
    for kind in TimerKind::ALL {
        assert!(!session.scheduler().is_armed(kind));
    }
}
