//! Game session behavior through the public API.

use linefall::core::{scoring, GameSession, NoEffects, Piece};
use linefall::types::{GameAction, PieceKind, Spin, ALL_KINDS};

fn started(seed: u32) -> GameSession {
    let mut session = GameSession::new(seed);
    session.start();
    session
}

#[test]
fn rotation_is_a_cycle_of_order_four() {
    for &kind in &ALL_KINDS {
        let original = Piece::of(kind);
        let mut piece = original;
        for _ in 0..4 {
            piece.rotate(Spin::Cw);
        }
        assert_eq!(piece, original);
    }
}

#[test]
fn level_follows_the_line_count() {
    assert_eq!(scoring::level_for_lines(0), 1);
    assert_eq!(scoring::level_for_lines(9), 1);
    assert_eq!(scoring::level_for_lines(10), 2);
    assert_eq!(scoring::level_for_lines(25), 3);
}

#[test]
fn gravity_interval_floors_at_100ms() {
    assert_eq!(scoring::gravity_interval_ms(1), 1000);
    assert_eq!(scoring::gravity_interval_ms(4), 700);
    for level in 10..30 {
        assert_eq!(scoring::gravity_interval_ms(level), 100);
    }
}

#[test]
fn idle_sessions_ignore_gameplay_input() {
    let mut session = GameSession::new(3);
    let mut fx = NoEffects;
    assert!(!session.apply_action(GameAction::MoveLeft, &mut fx));
    assert!(!session.apply_action(GameAction::Pause, &mut fx));
    assert!(session.player().is_none());
}

#[test]
fn queue_always_offers_the_upcoming_pieces() {
    let mut session = started(11);
    let mut fx = NoEffects;
    for _ in 0..10 {
        let expected = session.queue()[0].kind();
        session.apply_action(GameAction::HardDrop, &mut fx);
        if session.game_over() {
            return;
        }
        assert_eq!(session.player().unwrap().piece.kind(), expected);
    }
}

#[test]
fn hard_drop_awards_two_points_per_row() {
    let mut session = started(21);
    let mut fx = NoEffects;
    let player = session.player().unwrap();
    let rows = (session.ghost_y().unwrap() - player.y) as u32;

    session.apply_action(GameAction::HardDrop, &mut fx);
    assert_eq!(session.score(), 2 * rows);
}

#[test]
fn hold_is_refused_until_the_next_spawn() {
    let mut session = started(7);
    let mut fx = NoEffects;
    assert!(session.apply_action(GameAction::Hold, &mut fx));
    assert!(!session.apply_action(GameAction::Hold, &mut fx));

    session.apply_action(GameAction::HardDrop, &mut fx);
    if session.game_over() {
        return;
    }
    assert!(session.apply_action(GameAction::Hold, &mut fx));
}

#[test]
fn pause_suspends_gravity_and_input() {
    let mut session = started(5);
    let mut fx = NoEffects;
    let y0 = session.player().unwrap().y;
    let x0 = session.player().unwrap().x;

    session.apply_action(GameAction::Pause, &mut fx);
    assert!(session.paused());
    for _ in 0..500 {
        session.tick(16, &mut fx);
    }
    assert!(!session.apply_action(GameAction::MoveRight, &mut fx));
    assert_eq!(session.player().unwrap().y, y0);
    assert_eq!(session.player().unwrap().x, x0);

    session.apply_action(GameAction::Pause, &mut fx);
    assert!(!session.paused());
}

#[test]
fn restart_returns_to_a_fresh_running_game() {
    let mut session = started(9);
    let mut fx = NoEffects;
    for _ in 0..3 {
        session.apply_action(GameAction::HardDrop, &mut fx);
    }
    assert!(session.score() > 0);

    assert!(session.apply_action(GameAction::Restart, &mut fx));
    assert!(!session.game_over());
    assert_eq!(session.score(), 0);
    assert_eq!(session.lines(), 0);
    assert_eq!(session.level(), 1);
    assert!(session.board().cells().iter().all(|c| c.is_none()));
    assert!(session.player().is_some());
}

#[test]
fn a_full_column_of_drops_ends_the_game_exactly_once() {
    let mut session = started(13);
    let mut fx = NoEffects;

    // Keep dropping without moving; the stack reaches the spawn rows.
    for _ in 0..200 {
        session.apply_action(GameAction::HardDrop, &mut fx);
        if session.game_over() {
            break;
        }
    }
    assert!(session.game_over());

    let report = session.take_final_report().expect("report after game over");
    assert_eq!(report.score, session.score());
    assert_eq!(report.lines, session.lines());
    assert!(session.take_final_report().is_none());

    // Terminal state: gameplay input and gravity are dead.
    assert!(!session.apply_action(GameAction::HardDrop, &mut fx));
    let y = session.player().unwrap().y;
    session.tick(60_000, &mut fx);
    assert_eq!(session.player().unwrap().y, y);
}
