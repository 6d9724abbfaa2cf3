//! Arena storage for syntax nodes.
//!
//! Nodes are stored contiguously and referenced by index. A `NodeIndex` is
//! only meaningful for the `SyntaxTree` that produced it, and a tree lives
//! for a single completion request.

use serde::Serialize;
use smallvec::SmallVec;

/// A half-open `[start, end)` byte span in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    pub fn new(start: u32, end: u32) -> TextRange {
        TextRange { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `offset` lies within the span, end inclusive. The edit
    /// region rules treat a cursor sitting just past the last character as
    /// still "in" the node.
    pub fn contains_inclusive(&self, offset: u32) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// The syntactic classification of a node.
///
/// `Property` is a property *name* string in key position; a string in
/// value position is `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxNodeKind {
    Object,
    Array,
    Property,
    String,
    Number,
    Boolean,
    Null,
}

impl SyntaxNodeKind {
    pub fn is_container(self) -> bool {
        matches!(self, SyntaxNodeKind::Object | SyntaxNodeKind::Array)
    }

    /// String, number, boolean, or null - a completed value token.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            SyntaxNodeKind::String
                | SyntaxNodeKind::Number
                | SyntaxNodeKind::Boolean
                | SyntaxNodeKind::Null
        )
    }
}

/// Index into a `SyntaxTree` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeIndex(pub u32);

/// A lexical/syntactic unit of the (possibly malformed) JSON text.
#[derive(Debug)]
pub struct SyntaxNode {
    pub kind: SyntaxNodeKind,
    pub offset: u32,
    pub length: u32,
    pub parent: Option<NodeIndex>,
    pub children: SmallVec<[NodeIndex; 4]>,
}

impl SyntaxNode {
    /// Byte offset just past the node.
    pub fn end(&self) -> u32 {
        self.offset + self.length
    }

    pub fn span(&self) -> TextRange {
        TextRange::new(self.offset, self.end())
    }
}

/// Arena of syntax nodes for one resolution request.
#[derive(Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn new() -> SyntaxTree {
        SyntaxTree { nodes: Vec::new() }
    }

    /// Add a node and link it into its parent's child list.
    pub fn add(
        &mut self,
        kind: SyntaxNodeKind,
        offset: u32,
        length: u32,
        parent: Option<NodeIndex>,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind,
            offset,
            length,
            parent,
            children: SmallVec::new(),
        });
        if let Some(p) = parent {
            if let Some(parent_node) = self.nodes.get_mut(p.0 as usize) {
                parent_node.children.push(index);
            }
        }
        index
    }

    pub fn get(&self, index: NodeIndex) -> Option<&SyntaxNode> {
        self.nodes.get(index.0 as usize)
    }

    /// Extend a container node to a known end offset (seen its closer, or
    /// best-effort end of input for unterminated containers).
    pub fn set_end(&mut self, index: NodeIndex, end: u32) {
        if let Some(node) = self.nodes.get_mut(index.0 as usize) {
            node.length = end.saturating_sub(node.offset);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
