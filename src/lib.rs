//! tmplint core library.
//!
//! This crate exposes programmatic APIs for linting template files against a
//! ruleset and turning the result into a CI pass/fail decision.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `discovery`: Template file discovery and loading.
//! - `lexer`: Tokenizer seam and the stock template lexer.
//! - `rules` / `ruleset`: Rule checks, rulesets and their registry.
//! - `lint`: Per-file orchestration with syntax-error tolerance.
//! - `gate`: Severity threshold, display filtering and exit code.
//! - `output`: Reporters and their registry.
//! - `run`: End-to-end run driver.
//! - `models`, `error`: Shared data types and errors.
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod gate;
pub mod lexer;
pub mod lint;
pub mod models;
pub mod output;
pub mod rules;
pub mod ruleset;
pub mod run;

pub use error::{ConfigError, LintError, SyntaxError};
pub use models::{Severity, Source, Violation};
