//! Async JSON-over-HTTP client for the backend endpoints.
//!
//! Every request attaches the bearer token when one is held. Transport
//! failures and server error bodies both collapse into the uniform
//! [`ApiError`] shape, so callers surface one kind of failure.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Request};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use linefall_core::SessionStats;
use linefall_input::KeyMap;

use crate::config::ClientConfig;

/// Uniform failure shape for every backend interaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    fn connection() -> Self {
        Self {
            error: "connection error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

/// Token and display name returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u64,
}

/// Final game stats, posted once at game over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    /// Whole seconds of play.
    pub time: u64,
    pub breakdown: BreakdownWire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakdownWire {
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub tetris: u32,
}

impl From<&SessionStats> for GameReport {
    fn from(stats: &SessionStats) -> Self {
        Self {
            score: stats.score,
            lines: stats.lines,
            level: stats.level,
            time: stats.elapsed_ms / 1000,
            breakdown: BreakdownWire {
                singles: stats.breakdown.singles,
                doubles: stats.breakdown.doubles,
                triples: stats.breakdown.triples,
                tetris: stats.breakdown.tetris,
            },
        }
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
    username: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct LeaderboardResponse {
    success: bool,
    #[serde(default)]
    data: Vec<LeaderboardEntry>,
    error: Option<String>,
}

/// HTTP client for the backend.
pub struct ApiClient {
    base_url: String,
    token: RwLock<Option<String>>,
    http: Client<HttpConnector, Full<Bytes>>,
    log: Option<Mutex<File>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        let log = config.log_path.as_ref().and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
                .map(Mutex::new)
        });
        Self {
            base_url: config.base_url.clone(),
            token: RwLock::new(None),
            http: Client::builder(TokioExecutor::new()).build_http(),
            log,
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap() = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    pub async fn register(&self, username: &str, password: &str) -> ApiResult<String> {
        let body = serde_json::to_string(&Credentials { username, password })
            .map_err(|_| ApiError::connection())?;
        let response: MessageResponse =
            self.call(Method::POST, "/auth/register", Some(body)).await?;
        if let Some(error) = response.error {
            return Err(ApiError { error });
        }
        Ok(response.message.unwrap_or_else(|| "registered".to_string()))
    }

    /// Log in and keep the returned token for subsequent requests.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<AuthSession> {
        let body = serde_json::to_string(&Credentials { username, password })
            .map_err(|_| ApiError::connection())?;
        let response: LoginResponse = self.call(Method::POST, "/auth/login", Some(body)).await?;
        match (response.token, response.username) {
            (Some(token), Some(username)) => {
                self.set_token(Some(token.clone()));
                Ok(AuthSession { token, username })
            }
            _ => Err(ApiError {
                error: response.error.unwrap_or_else(|| "login failed".to_string()),
            }),
        }
    }

    pub async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>> {
        let response: LeaderboardResponse = self.call(Method::GET, "/leaderboard", None).await?;
        if !response.success {
            return Err(ApiError {
                error: response
                    .error
                    .unwrap_or_else(|| "leaderboard unavailable".to_string()),
            });
        }
        Ok(response.data)
    }

    pub async fn profile(&self) -> ApiResult<serde_json::Value> {
        self.call(Method::GET, "/user/profile", None).await
    }

    /// Persist the key bindings server-side.
    pub async fn update_settings(&self, key_map: &KeyMap) -> ApiResult<()> {
        let body = serde_json::to_string(&serde_json::json!({ "keyMap": key_map }))
            .map_err(|_| ApiError::connection())?;
        self.request(Method::PUT, "/user/settings", Some(body))
            .await?;
        Ok(())
    }

    /// Post the final game stats. Called exactly once per game over.
    pub async fn submit_stats(&self, report: &GameReport) -> ApiResult<()> {
        let body = serde_json::to_string(report).map_err(|_| ApiError::connection())?;
        self.request(Method::POST, "/stats", Some(body)).await?;
        Ok(())
    }

    pub async fn reset_history(&self) -> ApiResult<()> {
        self.request(Method::DELETE, "/analytics/reset", None).await?;
        Ok(())
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> ApiResult<T> {
        let bytes = self.request(method, path, body).await?;
        serde_json::from_slice(&bytes).map_err(|_| ApiError {
            error: "malformed response".to_string(),
        })
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> ApiResult<Bytes> {
        let uri = format!("{}{}", self.base_url, path);
        let mut builder = Request::builder()
            .method(method.clone())
            .uri(uri.as_str())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder
            .body(Full::new(Bytes::from(body.unwrap_or_default())))
            .map_err(|_| ApiError::connection())?;

        let outcome = async {
            let response = self
                .http
                .request(request)
                .await
                .map_err(|_| ApiError::connection())?;
            let status = response.status();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(|_| ApiError::connection())?
                .to_bytes();

            if !status.is_success() {
                // Error bodies carry their own message when the backend
                // produced one.
                if let Ok(err) = serde_json::from_slice::<ApiError>(&bytes) {
                    if !err.error.is_empty() {
                        return Err(err);
                    }
                }
                return Err(ApiError {
                    error: format!("request failed ({status})"),
                });
            }
            Ok(bytes)
        }
        .await;

        self.log_request(&method, path, &outcome);
        outcome
    }

    fn log_request(&self, method: &Method, path: &str, outcome: &ApiResult<Bytes>) {
        let Some(log) = &self.log else {
            return;
        };
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let line = match outcome {
            Ok(_) => serde_json::json!({ "ts": ts, "method": method.as_str(), "path": path, "ok": true }),
            Err(err) => serde_json::json!({ "ts": ts, "method": method.as_str(), "path": path, "ok": false, "error": err.error }),
        };
        if let Ok(mut file) = log.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}
