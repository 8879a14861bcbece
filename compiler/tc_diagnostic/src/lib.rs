//! Diagnostic system for rich error reporting.
//!
//! Every phase (lexer, parser, validator) reports through [`Diagnostic`]:
//! - an error code for searchability and `tcatch explain`
//! - a message saying what went wrong
//! - a primary label saying where
//! - notes and suggestions saying how to fix it

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::{ErrorCode, UnknownErrorCode};
pub use errors::ErrorDocs;
