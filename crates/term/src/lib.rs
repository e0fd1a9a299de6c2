//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer: the game view draws into a plain
//! framebuffer of styled character cells, and the renderer flushes changed
//! cells to the terminal. No widget/layout framework.

pub mod bursts;
pub mod fb;
pub mod renderer;
pub mod view;

pub use linefall_core as core;
pub use linefall_types as types;

pub use bursts::BurstField;
pub use fb::{CellStyle, FrameBuffer, Rgb, TermCell};
pub use renderer::TerminalRenderer;
pub use view::{GameView, Hud, Viewport};
