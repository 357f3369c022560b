//! Prelude module for the lunisolar crate.
//!
//! Re-exports the derive macros from derive_more used across the calendar types.

pub use derive_more::Display;
