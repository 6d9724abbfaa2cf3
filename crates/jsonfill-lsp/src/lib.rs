//! Completion-edit computation for JSON value suggestions.
//!
//! Editor hosts use line/column positions while the resolver works in byte
//! offsets; `position` converts between the two. `completions` holds the
//! actual engine: given a cursor offset and a list of candidate value
//! strings, it decides what text range to overwrite, what to insert, and
//! whether a trailing comma is needed.

pub mod completions;
pub mod position;

pub use completions::{
    CompletionItem, CompletionItemKind, JsonCompletions, needs_separator, overwrite_range,
};
pub use position::{LineMap, Position, Range};

#[cfg(test)]
#[path = "tests/completions_tests.rs"]
mod completions_tests;
