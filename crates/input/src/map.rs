//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use linefall_types::GameAction;

/// Remappable key bindings for the six gameplay actions.
///
/// Serialized as-is into the local key-map file and the backend settings
/// payload. Character bindings match case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    pub left: KeyCode,
    pub right: KeyCode,
    pub down: KeyCode,
    pub drop: KeyCode,
    pub rotate: KeyCode,
    pub hold: KeyCode,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            left: KeyCode::Char('a'),
            right: KeyCode::Char('d'),
            down: KeyCode::Down,
            drop: KeyCode::Char(' '),
            rotate: KeyCode::Char('h'),
            hold: KeyCode::Char('c'),
        }
    }
}

impl KeyMap {
    /// Look up the gameplay action bound to a key.
    pub fn action_for(&self, code: KeyCode) -> Option<GameAction> {
        let code = normalize(code);
        let bindings = [
            (self.left, GameAction::MoveLeft),
            (self.right, GameAction::MoveRight),
            (self.down, GameAction::SoftDrop),
            (self.drop, GameAction::HardDrop),
            (self.rotate, GameAction::RotateCw),
            (self.hold, GameAction::Hold),
        ];
        bindings
            .iter()
            .find(|(bound, _)| normalize(*bound) == code)
            .map(|&(_, action)| action)
    }

    pub fn is_custom(&self) -> bool {
        *self != Self::default()
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Map a key event to a game action: remappable bindings first, then the
/// fixed pause/restart/counter-rotate keys.
pub fn handle_key_event(map: &KeyMap, key: KeyEvent) -> Option<GameAction> {
    if let Some(action) = map.action_for(key.code) {
        return Some(action);
    }
    match normalize(key.code) {
        KeyCode::Char('z') => Some(GameAction::RotateCcw),
        KeyCode::Char('p') => Some(GameAction::Pause),
        KeyCode::Char('r') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Check whether a key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
