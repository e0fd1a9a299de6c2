//! Core game logic - pure, deterministic, and testable.
//!
//! This crate contains all the game rules and state management. It has zero
//! dependencies on UI, networking, or I/O:
//!
//! - **Deterministic**: the same seed produces an identical game
//! - **Testable**: every rule is exercised by unit tests
//! - **Portable**: runs in any environment (terminal, headless)
//!
//! # Module structure
//!
//! - [`board`]: the 10x20 grid of settled cells
//! - [`piece`]: matrix piece catalog, factory and rotation primitive
//! - [`collision`]: the single placement-legality predicate
//! - [`rotation`]: rotation with the best-effort horizontal kick search
//! - [`sweep`]: bottom-to-top line sweep feeding the effect sink
//! - [`scoring`]: line scores, level curve and gravity interval
//! - [`rng`]: deterministic LCG with uniform piece draws
//! - [`session`]: the owned game session and its state machine
//!
//! Call [`GameSession::tick`] every frame with the elapsed milliseconds and
//! [`GameSession::apply_action`] for player input.

pub mod board;
pub mod collision;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod session;
pub mod sweep;

pub use linefall_types as types;

pub use board::Board;
pub use collision::collides;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use rotation::resolve_rotation;
pub use session::{GameSession, Player, SessionStats};
pub use sweep::{sweep, EffectSink, NoEffects};
