//! Frame scheduling - a fixed-timestep run loop decoupled from any real
//! display timer.
//!
//! The host loop measures wall-clock time between frames and feeds it to
//! [`FrameClock::advance`], which converts irregular frame intervals into a
//! stream of whole fixed-size ticks (carrying the remainder). [`pump`] drives
//! a [`GameSession`] with those ticks. Both are pure over their inputs, so
//! game timing is testable with simulated time.

pub mod clock;

pub use clock::FrameClock;

use linefall_core::{EffectSink, GameSession};

/// Advance the session by the wall-clock time elapsed since the last call.
///
/// Returns the number of fixed ticks that were run.
pub fn pump(
    session: &mut GameSession,
    clock: &mut FrameClock,
    elapsed_ms: u32,
    fx: &mut dyn EffectSink,
) -> u32 {
    let ticks = clock.advance(elapsed_ms);
    for _ in 0..ticks {
        session.tick(clock.tick_ms(), fx);
    }
    ticks
}
