//! Terminal gameplay entrypoint.
//!
//! Startup: load local state, sign in against the backend (degrading to
//! offline play on any failure), then run the raw-mode game loop. The loop
//! never blocks on the network; backend outcomes arrive as polled events and
//! show up as a dismissible notice line.

use std::io::{self, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

use linefall_client::{store, Backend, BackendEvent, ClientConfig, GameReport, StoredSession};
use linefall_core::GameSession;
use linefall_engine::{pump, FrameClock};
use linefall_input::{handle_key_event, should_quit, KeyMap};
use linefall_term::{BurstField, GameView, Hud, TerminalRenderer, Viewport};
use linefall_types::TICK_MS;

fn main() -> Result<()> {
    let keymap = store::load_keymap().unwrap_or_else(|| {
        // First run: write the defaults so the file is there to edit.
        let map = KeyMap::default();
        let _ = store::save_keymap(&map);
        map
    });

    let mut backend = None;
    let mut username = None;
    if !ClientConfig::offline() {
        let handle = Backend::connect(&ClientConfig::from_env());
        match store::load_session() {
            Some(saved) => {
                handle.adopt_token(saved.token);
                username = Some(saved.username);
            }
            None => username = sign_in(&handle)?,
        }
        if keymap.is_custom() && handle.api().token().is_some() {
            handle.push_settings(keymap);
        }
        backend = Some(handle);
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, backend.as_ref(), keymap, username.as_deref(), seed);
    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Prompt for credentials on stdout before entering the alternate screen.
/// Any failure leaves the player signed out rather than aborting.
fn sign_in(backend: &Backend) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "username (blank plays offline): ")?;
    stdout.flush()?;
    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    let username = username.trim().to_string();
    if username.is_empty() {
        return Ok(None);
    }

    write!(stdout, "password: ")?;
    stdout.flush()?;
    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    let password = password.trim();

    write!(stdout, "[l]ogin or [r]egister? ")?;
    stdout.flush()?;
    let mut choice = String::new();
    io::stdin().read_line(&mut choice)?;

    if choice.trim().eq_ignore_ascii_case("r") {
        match backend.register(&username, password) {
            Ok(message) => writeln!(stdout, "{message}")?,
            Err(err) => {
                writeln!(stdout, "registration failed: {err}")?;
                return Ok(None);
            }
        }
    }

    match backend.login(&username, password) {
        Ok(session) => {
            let _ = store::save_session(&StoredSession {
                token: session.token,
                username: session.username.clone(),
            });
            Ok(Some(session.username))
        }
        Err(err) => {
            writeln!(stdout, "login failed, playing offline: {err}")?;
            Ok(None)
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    backend: Option<&Backend>,
    keymap: KeyMap,
    username: Option<&str>,
    seed: u32,
) -> Result<()> {
    let mut session = GameSession::new(seed);
    session.start();

    let view = GameView::default();
    let mut bursts = BurstField::new();
    let mut clock = FrameClock::new(TICK_MS);
    let mut notice: Option<String> = None;
    let mut last_frame = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        let hud = Hud {
            username,
            notice: notice.as_deref(),
        };
        term.draw(view.render(&session, &bursts, Viewport::new(w, h), hud))?;

        if event::poll(tick_duration)? {
            match event::read()? {
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    // A pending notice swallows the keypress that dismisses it.
                    if notice.take().is_some() {
                        continue;
                    }
                    if key.code == KeyCode::Char('b') && keymap.action_for(key.code).is_none() {
                        if let Some(backend) = backend {
                            backend.request_leaderboard();
                        }
                    } else if let Some(action) = handle_key_event(&keymap, key) {
                        session.apply_action(action, &mut bursts);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed().as_millis() as u32;
        last_frame = Instant::now();
        pump(&mut session, &mut clock, elapsed, &mut bursts);
        bursts.update(elapsed);

        // Flush the final stats exactly once per game.
        if let Some(report) = session.take_final_report() {
            if let Some(backend) = backend {
                backend.submit_stats(GameReport::from(&report));
            }
        }

        if let Some(backend) = backend {
            while let Some(event) = backend.poll() {
                match event {
                    BackendEvent::StatsSaved => notice = Some("score saved".to_string()),
                    BackendEvent::SettingsSaved => {}
                    BackendEvent::Leaderboard(entries) => {
                        notice = Some(format_leaderboard(&entries));
                    }
                    BackendEvent::Failed { what, error } => {
                        notice = Some(format!("{what}: {error}"));
                    }
                }
            }
        }
    }
}

fn format_leaderboard(entries: &[linefall_client::LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "leaderboard: empty".to_string();
    }
    let mut line = String::from("top:");
    for (i, entry) in entries.iter().take(5).enumerate() {
        line.push_str(&format!(" #{} {} {}", i + 1, entry.username, entry.score));
    }
    line
}
