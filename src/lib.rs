//! Type Master · effectiveness quiz core.
//!
//! Pure game logic (table, generator, scorer, aggregator) plus the collaborators the
//! terminal driver needs: keymap, timed challenge, snapshot store and config.

pub mod chart;
pub mod config;
pub mod countdown;
pub mod domain;
pub mod keymap;
pub mod protocol;
pub mod question;
pub mod render;
pub mod scoring;
pub mod session;
pub mod state;
pub mod store;
pub mod summary;
pub mod telemetry;
pub mod util;
