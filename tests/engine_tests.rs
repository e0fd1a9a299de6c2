//! Frame scheduling with simulated time.

use linefall::core::{GameSession, NoEffects};
use linefall::engine::{pump, FrameClock};

#[test]
fn clock_emits_whole_ticks_and_carries_remainders() {
    let mut clock = FrameClock::new(16);
    assert_eq!(clock.advance(15), 0);
    assert_eq!(clock.advance(1), 1);
    assert_eq!(clock.advance(160), 10);
    assert_eq!(clock.advance(17), 1);
    assert_eq!(clock.advance(15), 1);
}

#[test]
fn a_second_of_simulated_time_applies_gravity() {
    let mut session = GameSession::new(31);
    session.start();
    let mut clock = FrameClock::new(16);
    let mut fx = NoEffects;
    let y0 = session.player().unwrap().y;

    // Feed uneven frame intervals totalling ~1.3 s.
    for elapsed in [5, 33, 16, 16, 200, 7, 400, 300, 340] {
        pump(&mut session, &mut clock, elapsed, &mut fx);
    }
    assert!(session.player().unwrap().y > y0);
}

#[test]
fn pump_does_nothing_for_an_idle_session() {
    let mut session = GameSession::new(31);
    let mut clock = FrameClock::default();
    let mut fx = NoEffects;
    assert_eq!(pump(&mut session, &mut clock, 1000, &mut fx), 62);
    assert!(session.player().is_none());
    assert_eq!(session.stats().elapsed_ms, 0);
}
