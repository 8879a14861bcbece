//! Typed catch clause desugarer.
//!
//! # Pipeline
//!
//! ```text
//! source ──► lex ──► parse ──► validate ──► lower ──► print ──► source
//!            │        │          │
//!            └────────┴──────────┴──► TransformError (every diagnostic)
//! ```
//!
//! [`transform`] runs the whole pipeline on one source text and returns
//! either the lowered source or every diagnostic found; there is no partial
//! output. [`transform_many`] runs independent sources in parallel over one
//! shared interner. The `tcatch` binary wraps both behind [`commands`].

pub mod commands;
mod config;
mod tracing_setup;
mod transform;

pub use config::{TransformConfig, GRAMMAR_ENV};
pub use tracing_setup::init_tracing;
pub use transform::{
    check, check_with, transform, transform_many, transform_with, CheckSummary, TransformError,
    TransformOutput,
};
