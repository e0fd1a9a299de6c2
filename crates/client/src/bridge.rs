//! Bridge between the sync game loop and the async API client.
//!
//! The backend handle owns a private tokio runtime. Pre-game calls (login,
//! register) block, since no frame loop is running yet; in-game calls are
//! spawned fire-and-forget and their outcomes are polled between frames.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Runtime;

use linefall_input::KeyMap;

use crate::api::{ApiClient, ApiResult, AuthSession, GameReport, LeaderboardEntry};
use crate::config::ClientConfig;

/// Outcome of a fire-and-forget backend call, delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    StatsSaved,
    SettingsSaved,
    Leaderboard(Vec<LeaderboardEntry>),
    Failed { what: &'static str, error: String },
}

/// Sync handle for the game loop.
pub struct Backend {
    rt: Runtime,
    api: Arc<ApiClient>,
    event_tx: Sender<BackendEvent>,
    event_rx: Receiver<BackendEvent>,
}

impl Backend {
    pub fn connect(config: &ClientConfig) -> Self {
        let (event_tx, event_rx) = channel();
        Self {
            rt: Runtime::new().expect("Failed to create tokio runtime"),
            api: Arc::new(ApiClient::new(config)),
            event_tx,
            event_rx,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Adopt a token restored from local storage.
    pub fn adopt_token(&self, token: String) {
        self.api.set_token(Some(token));
    }

    /// Blocking login (pre-game only).
    pub fn login(&self, username: &str, password: &str) -> ApiResult<AuthSession> {
        self.rt.block_on(self.api.login(username, password))
    }

    /// Blocking registration (pre-game only).
    pub fn register(&self, username: &str, password: &str) -> ApiResult<String> {
        self.rt.block_on(self.api.register(username, password))
    }

    /// Post the final stats without blocking the loop.
    pub fn submit_stats(&self, report: GameReport) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        self.rt.spawn(async move {
            let event = match api.submit_stats(&report).await {
                Ok(()) => BackendEvent::StatsSaved,
                Err(err) => BackendEvent::Failed {
                    what: "stats",
                    error: err.error,
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Fetch the leaderboard without blocking the loop.
    pub fn request_leaderboard(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        self.rt.spawn(async move {
            let event = match api.leaderboard().await {
                Ok(entries) => BackendEvent::Leaderboard(entries),
                Err(err) => BackendEvent::Failed {
                    what: "leaderboard",
                    error: err.error,
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Push customized key bindings without blocking the loop.
    pub fn push_settings(&self, map: KeyMap) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        self.rt.spawn(async move {
            let event = match api.update_settings(&map).await {
                Ok(()) => BackendEvent::SettingsSaved,
                Err(err) => BackendEvent::Failed {
                    what: "settings",
                    error: err.error,
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Drain one pending event, if any. Never blocks.
    pub fn poll(&self) -> Option<BackendEvent> {
        self.event_rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_is_empty_without_traffic() {
        let backend = Backend::connect(&ClientConfig::default());
        assert_eq!(backend.poll(), None);
    }

    #[test]
    fn failed_calls_surface_as_events() {
        // Nothing listens on this port; the call degrades to a Failed event.
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            log_path: None,
        };
        let backend = Backend::connect(&config);
        backend.request_leaderboard();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            if let Some(event) = backend.poll() {
                match event {
                    BackendEvent::Failed { what, .. } => assert_eq!(what, "leaderboard"),
                    other => panic!("unexpected event: {other:?}"),
                }
                break;
            }
            assert!(std::time::Instant::now() < deadline, "no event arrived");
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
    }
}
