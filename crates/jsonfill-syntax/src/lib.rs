//! Tolerant JSON syntax tree and location resolution.
//!
//! This crate sits between the scanner and the completion engine:
//! - `SyntaxTree` / `NodeIndex` - request-scoped arena of syntax nodes
//! - `resolve_location` - maps a cursor offset to the enclosing structural
//!   path and the nearest completed node
//!
//! Everything here is computed fresh per request. The document changes on
//! every keystroke, so nodes are never cached or shared across requests.

pub mod arena;
pub mod location;

pub use arena::{NodeIndex, SyntaxNode, SyntaxNodeKind, SyntaxTree, TextRange};
pub use location::{JsonPath, Location, Segment, resolve_location};

#[cfg(test)]
#[path = "tests/location_tests.rs"]
mod location_tests;
