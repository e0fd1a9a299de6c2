//! Backend client module - the HTTP boundary of the game.
//!
//! The backend owns accounts, scores, the leaderboard and remote settings;
//! this crate only consumes it:
//!
//! - [`api`]: async JSON-over-HTTP client for the backend endpoints, with
//!   bearer-token attachment and a uniform error shape
//! - [`store`]: client-local persisted state (session token and key map)
//! - [`bridge`]: sync handle for the game loop - network calls run on a
//!   private tokio runtime and results are polled between frames, so the
//!   render loop never blocks on the network
//! - [`config`]: environment-variable configuration
//!
//! Every failure is converted to [`api::ApiError`] and surfaced to the user;
//! a network outage degrades to a notice, never a crash.

pub mod api;
pub mod bridge;
pub mod config;
pub mod store;

pub use api::{ApiClient, ApiError, ApiResult, AuthSession, GameReport, LeaderboardEntry};
pub use bridge::{Backend, BackendEvent};
pub use config::ClientConfig;
pub use store::StoredSession;
