//! **A structural compatibility checker for C++ library APIs.**
//!
//! `cpp-api-diff` compares two JSON snapshots of a library's public API
//! surface (classes, methods, free functions, enums, preprocessor macros)
//! and reports every structural change with a severity verdict: will this
//! break consumers at compile time, at runtime, or not at all?
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The API snapshot data model, [`ApiModel`]. Snapshots
//!   are produced by a header extractor and exchanged as JSON.
//! - **[`loader`]**: Strict snapshot loading and validation. A snapshot
//!   that fails validation is rejected whole.
//! - **[`diff`]**: Home of the [`CompatEngine`], which compares two
//!   models and scores the result. Severity assignment is driven by an
//!   injectable [`SeverityPolicy`].
//! - **[`reports`]**: JSON and plain-text report generators.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use cpp_api_diff::{diff::CompatEngine, loader::load_model};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let old = load_model(Path::new("v1.json"))?;
//!     let new = load_model(Path::new("v2.json"))?;
//!
//!     let engine = CompatEngine::new();
//!     let issues = engine.diff(&old, &new);
//!     let score = engine.score(&issues, &old);
//!
//!     println!(
//!         "{} issues, {:.1}% incompatible, risk {}",
//!         issues.len(),
//!         score.incompatibility_percentage,
//!         score.risk_level.label()
//!     );
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

pub mod diff;
pub mod error;
pub mod loader;
pub mod model;
pub mod reports;

pub use diff::{CompatEngine, CompatibilityIssue, IncompatibilityScore, SeverityPolicy};
pub use error::{ApiDiffError, Result};
pub use loader::load_model;
pub use model::ApiModel;
