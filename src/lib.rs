//! Linefall (workspace facade crate).
//!
//! This package keeps a single `linefall::{core,engine,input,term,client,types}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use linefall_client as client;
pub use linefall_core as core;
pub use linefall_engine as engine;
pub use linefall_input as input;
pub use linefall_term as term;
pub use linefall_types as types;
