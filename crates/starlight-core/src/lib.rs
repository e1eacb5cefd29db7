//! Starlight: a standalone CSS flexbox layout engine.
//!
//! Given a tree of nodes annotated with CSS-style properties (width/height
//! constraints, flex parameters, margins, paddings, borders, positions,
//! alignment), this crate computes for every node its resolved size and its
//! offset relative to its containing block.
//!
//! # Relevant specifications
//!
//! - [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS Positioned Layout Module Level 3](https://www.w3.org/TR/css-position-3/)
//! - [CSS Box Alignment Module Level 3](https://www.w3.org/TR/css-align-3/)
//!
//! # Module structure
//!
//! - [`length`] — tagged-union length values, edges, measurement constraints.
//! - [`style`] — the flat per-node computed style record.
//! - [`tree`] — the node arena: ownership, parent back-references, dirty bits.
//! - [`box_model`] — percentage resolution, box-sizing, min/max clamping.
//! - [`measure`] — the leaf measurement delegate for replaced elements.
//! - [`flex`] — the flex layout algorithm.
//! - [`absolute`] — out-of-flow absolute positioning.
//! - [`api`] — the stable node/config handle surface.
//! - [`error`] — boundary error types.
//!
//! # Out of scope
//!
//! This crate does not parse CSS text, does not walk a DOM, does not paint,
//! and does not shape text. It only lays out a tree of already-resolved
//! style values and calls back into an opaque measurement delegate for
//! leaves that register one.

pub mod absolute;
pub mod api;
pub mod box_model;
pub mod error;
pub mod flex;
pub mod length;
pub mod measure;
pub mod style;
pub mod tree;

pub use api::{Config, Layout};
pub use error::StarlightError;
pub use length::{Constraint, Direction, Edge, Edges, Length, MeasureMode, INDEFINITE};
pub use measure::MeasureDelegate;
pub use style::ComputedStyle;
pub use tree::{NodeId, Tree};
