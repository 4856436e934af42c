//! Scanshelf application module: screen lifecycle, fetch triggers and the
//! terminal runtime.

/// Fetch trigger logic for the inventory screen.
pub mod controller;
/// Focus event source for mounted screens.
pub mod lifecycle;
/// Runtime event loop and background workers.
pub mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

pub use runtime::run;
