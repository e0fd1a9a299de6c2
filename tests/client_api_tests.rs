//! End-to-end API client tests against a canned HTTP server.
//!
//! A real TCP listener accepts one connection, captures the raw request and
//! answers with a fixed response, so these tests pin both the wire format the
//! client emits (paths, headers, JSON bodies) and its response handling.

use linefall::client::{ApiClient, ApiError, ClientConfig, GameReport};
use linefall::core::SessionStats;
use linefall::types::ClearBreakdown;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn client_for(base_url: String) -> ApiClient {
    ApiClient::new(&ClientConfig {
        base_url,
        log_path: None,
    })
}

/// Serve exactly one request with a fixed response; returns the base URL and
/// a handle resolving to the captured raw request.
async fn canned_server(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        // Read headers.
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "peer closed before the request was complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        // Read the body per content-length.
        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        while buf.len() - header_end < content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "peer closed mid-body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&buf).to_string()
    });

    (format!("http://{addr}/api"), handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[tokio::test]
async fn login_posts_credentials_and_keeps_the_token() {
    let (base, server) =
        canned_server("200 OK", r#"{"token":"tok-1","username":"ana"}"#).await;
    let client = client_for(base);

    let session = client.login("ana", "secret").await.unwrap();
    assert_eq!(session.username, "ana");
    assert_eq!(client.token().as_deref(), Some("tok-1"));

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("post /api/auth/login"));
    assert!(request.contains("content-type: application/json"));
    assert!(request.contains(r#""username":"ana""#));
    assert!(request.contains(r#""password":"secret""#));
}

#[tokio::test]
async fn login_error_body_surfaces_as_api_error() {
    let (base, _server) =
        canned_server("401 Unauthorized", r#"{"error":"bad credentials"}"#).await;
    let client = client_for(base);

    let err = client.login("ana", "nope").await.unwrap_err();
    assert_eq!(err, ApiError { error: "bad credentials".to_string() });
    assert_eq!(client.token(), None);
}

#[tokio::test]
async fn stats_post_attaches_the_bearer_token() {
    let (base, server) = canned_server("200 OK", r#"{"success":true}"#).await;
    let client = client_for(base);
    client.set_token(Some("tok-9".to_string()));

    let stats = SessionStats {
        score: 420,
        lines: 3,
        level: 1,
        breakdown: ClearBreakdown {
            singles: 3,
            ..ClearBreakdown::default()
        },
        elapsed_ms: 61_000,
    };
    client.submit_stats(&GameReport::from(&stats)).await.unwrap();

    let request = server.await.unwrap();
    let lower = request.to_lowercase();
    assert!(lower.starts_with("post /api/stats"));
    assert!(lower.contains("authorization: bearer tok-9"));
    assert!(request.contains(r#""score":420"#));
    assert!(request.contains(r#""time":61"#));
    assert!(request.contains(r#""breakdown":{"singles":3,"doubles":0,"triples":0,"tetris":0}"#));
}

#[tokio::test]
async fn leaderboard_parses_the_entry_list() {
    let (base, _server) = canned_server(
        "200 OK",
        r#"{"success":true,"data":[{"username":"ana","score":9000},{"username":"bo","score":100}]}"#,
    )
    .await;
    let client = client_for(base);

    let entries = client.leaderboard().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].username, "ana");
    assert_eq!(entries[0].score, 9000);
}

#[tokio::test]
async fn register_returns_the_server_message() {
    let (base, _server) = canned_server("200 OK", r#"{"message":"account created"}"#).await;
    let client = client_for(base);
    assert_eq!(client.register("ana", "pw").await.unwrap(), "account created");
}

#[tokio::test]
async fn settings_put_carries_the_key_map() {
    let (base, server) = canned_server("200 OK", r#"{"success":true}"#).await;
    let client = client_for(base);
    client.set_token(Some("tok-4".to_string()));

    client
        .update_settings(&linefall::input::KeyMap::default())
        .await
        .unwrap();

    let request = server.await.unwrap();
    assert!(request.to_lowercase().starts_with("put /api/user/settings"));
    assert!(request.contains("keyMap"));
}

#[tokio::test]
async fn reset_history_issues_an_authenticated_delete() {
    let (base, server) = canned_server("200 OK", r#"{"success":true}"#).await;
    let client = client_for(base);
    client.set_token(Some("tok-2".to_string()));

    client.reset_history().await.unwrap();

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("delete /api/analytics/reset"));
    assert!(request.contains("authorization: bearer tok-2"));
}

#[tokio::test]
async fn profile_returns_whatever_the_backend_sends() {
    let (base, server) =
        canned_server("200 OK", r#"{"username":"ana","games":12}"#).await;
    let client = client_for(base);
    client.set_token(Some("tok-3".to_string()));

    let profile = client.profile().await.unwrap();
    assert_eq!(profile["games"], 12);

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /api/user/profile"));
}

#[tokio::test]
async fn transport_failure_degrades_to_the_uniform_error() {
    // Bind and immediately drop the listener so the port refuses connections.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}/api"));
    let err = client.leaderboard().await.unwrap_err();
    assert_eq!(err.error, "connection error");
}
