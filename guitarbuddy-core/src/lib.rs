//! # guitarbuddy-core
//!
//! Scale engine facade. Takes the two strings a caller has (a root note and a
//! scale identifier), validates them, and returns a fully spelled [`Scale`] or a
//! [`ValidationError`]. No I/O happens on this path; the only file access in the
//! crate is configuration loading.
//!
//! ## Quick Start
//!
//! ```rust
//! use guitarbuddy_core::compute_scale;
//!
//! let scale = compute_scale("G", "major").unwrap();
//! assert_eq!(scale.notes, vec!["G", "A", "B", "C", "D", "E", "F#"]);
//! ```
//!
//! ## Module Overview
//!
//! - [`engine`] — `compute_scale()` / `build_scale()`, root normalization
//! - [`config`] — TOML configuration loading (embedded + user override)

pub mod config;
pub mod engine;

pub use engine::{build_scale, compute_scale, normalize_root, supported_roots};
pub use guitarbuddy_types::{InputField, Scale, ScaleType, ValidationError};
