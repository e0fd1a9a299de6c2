//! Terminal input module.
//!
//! Maps `crossterm` key events into [`linefall_types::GameAction`] through a
//! remappable, serializable [`KeyMap`]. The map's defaults mirror the
//! original bindings; a customized map is persisted locally and pushed to
//! the backend's settings endpoint by the client crate.

pub mod map;

pub use linefall_types as types;

pub use map::{handle_key_event, should_quit, KeyMap};
