//! Error-tolerant JSON scanner for the jsonfill completion engine.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `ScanError` - Recoverable lexical error classification
//!
//! The scanner never fails: malformed input (unterminated strings, stray
//! bytes, truncated comments) produces tokens with a `ScanError` attached
//! and scanning continues. A document that is mid-edit is the expected
//! input, not an error condition.

pub mod scanner_impl;
pub mod syntax_kind;

pub use scanner_impl::{ScanError, ScannerState};
pub use syntax_kind::SyntaxKind;

#[cfg(test)]
#[path = "tests/scanner_impl_tests.rs"]
mod scanner_impl_tests;
