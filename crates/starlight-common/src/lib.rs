//! Common diagnostics utilities for the Starlight layout engine.
//!
//! This crate provides shared infrastructure used across the engine:
//! - **Warning system** - deduplicated, leveled warnings for degenerate input.

pub mod warning;
