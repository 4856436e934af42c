//! Library entry for Scanshelf exposing the inventory screen for the binary
//! and integration tests.

pub mod app;
pub mod events;
pub mod logic;
pub mod sources;
pub mod state;
pub mod theme;
pub mod ui;
pub mod util;
