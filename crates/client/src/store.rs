//! Client-local persisted state: the session token and the key map.
//!
//! Both live as JSON files under the platform config directory. Missing or
//! unreadable files fall back to defaults; saving is best-effort and never
//! fatal to the game.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use linefall_input::KeyMap;

/// Fixed storage identifiers.
const APP_DIR: &str = "linefall";
const SESSION_FILE: &str = "session.json";
const KEYMAP_FILE: &str = "keys_v2.json";

/// A signed-in session carried across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub username: String,
}

fn app_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

pub fn load_session() -> Option<StoredSession> {
    load_json(&app_dir()?.join(SESSION_FILE))
}

pub fn save_session(session: &StoredSession) -> Result<()> {
    let dir = app_dir().context("no config directory")?;
    save_json(&dir, SESSION_FILE, session)
}

pub fn load_keymap() -> Option<KeyMap> {
    load_json(&app_dir()?.join(KEYMAP_FILE))
}

pub fn save_keymap(map: &KeyMap) -> Result<()> {
    let dir = app_dir().context("no config directory")?;
    save_json(&dir, KEYMAP_FILE, map)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    let text = fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

fn save_json<T: Serialize>(dir: &Path, file: &str, value: &T) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(file);
    let text = serde_json::to_string_pretty(value)?;
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
