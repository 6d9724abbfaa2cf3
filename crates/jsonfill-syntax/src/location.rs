//! Tolerant location resolution.
//!
//! `resolve_location` maps a cursor offset in (possibly malformed) JSON text
//! to the structural path at that offset and the nearest completed node.
//! Malformed input is the normal case here - the document is being edited -
//! so resolution never fails; unresolvable structure degrades to an empty
//! path and no previous node.

use jsonfill_scanner::{ScannerState, SyntaxKind};
use serde::Serialize;
use tracing::trace;

use crate::arena::{NodeIndex, SyntaxNode, SyntaxNodeKind, SyntaxTree};

/// One step of a structural path: an object key or an array index.
///
/// An empty `Key` is the placeholder for an object entry whose property
/// name has not been typed yet (cursor right after `{` or a `,`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Segment {
    Key(String),
    Index(u32),
}

impl Segment {
    pub fn key(name: &str) -> Segment {
        Segment::Key(name.to_string())
    }
}

/// Structural path from the document root to a location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JsonPath(pub Vec<Segment>);

impl JsonPath {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when this path starts with `pattern`. A `Key("*")` pattern
    /// segment matches exactly one segment of any kind. Lets a caller gate
    /// value suggestions on where in the document the cursor sits, e.g.
    /// `path.matches(&[Segment::key("modules"), Segment::key("*"),
    /// Segment::key("status")])`.
    pub fn matches(&self, pattern: &[Segment]) -> bool {
        if pattern.len() > self.0.len() {
            return false;
        }
        let star = Segment::key("*");
        pattern
            .iter()
            .zip(&self.0)
            .all(|(p, s)| *p == star || p == s)
    }
}

/// Result of resolving an offset: the per-request node arena, the
/// structural path, and a reference to the nearest completed node.
///
/// `previous_node` is an index into `tree`, valid only for this request -
/// the tree is discarded when the completion result has been assembled.
#[derive(Debug)]
pub struct Location {
    pub tree: SyntaxTree,
    pub path: JsonPath,
    pub previous_node: Option<NodeIndex>,
    pub is_at_property_key: bool,
}

impl Location {
    pub fn previous(&self) -> Option<&SyntaxNode> {
        self.previous_node.and_then(|idx| self.tree.get(idx))
    }
}

struct Frame {
    node: NodeIndex,
    is_object: bool,
    /// Object frames only: the next string token is a property name.
    expecting_key: bool,
}

/// Resolve the structural location of `offset` in `text`.
///
/// Scans forward from the start of the document, maintaining a stack of
/// open containers, and stops once the offset is reached. A node counts as
/// "previous" when the offset falls inside its span or sits at/after its
/// end with no delimiter consumed in between; consuming `:` or `,` or a
/// container boundary clears it. When the offset lands exactly on a
/// delimiter the scan stops before processing it, so the nearest completed
/// node before that delimiter survives.
///
/// Offsets past the end of the text are clamped to `text.len()`.
pub fn resolve_location(text: &str, offset: u32) -> Location {
    let offset = offset.min(text.len() as u32);

    let mut tree = SyntaxTree::new();
    let mut path: Vec<Segment> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut previous: Option<NodeIndex> = None;
    let mut is_at_property_key = false;

    let mut scanner = ScannerState::new(text, true);
    loop {
        let token = scanner.scan();
        let tok_off = scanner.get_token_offset();
        let tok_end = scanner.get_token_end();

        match token {
            SyntaxKind::EndOfFileToken => break,

            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken => {
                if offset <= tok_off {
                    break;
                }
                let is_object = token == SyntaxKind::OpenBraceToken;
                let kind = if is_object {
                    SyntaxNodeKind::Object
                } else {
                    SyntaxNodeKind::Array
                };
                let parent = stack.last().map(|f| f.node);
                let node = tree.add(kind, tok_off, tok_end - tok_off, parent);
                stack.push(Frame {
                    node,
                    is_object,
                    expecting_key: is_object,
                });
                previous = None;
                if is_object {
                    is_at_property_key = offset > tok_off;
                    path.push(Segment::Key(String::new()));
                } else {
                    is_at_property_key = false;
                    path.push(Segment::Index(0));
                }
            }

            SyntaxKind::CloseBraceToken | SyntaxKind::CloseBracketToken => {
                if offset <= tok_off {
                    break;
                }
                if let Some(frame) = stack.pop() {
                    tree.set_end(frame.node, tok_end);
                    path.pop();
                }
                previous = None;
                // A completed value is never a key slot; a later `,` inside
                // an enclosing object raises the flag again.
                is_at_property_key = false;
            }

            SyntaxKind::CommaToken => {
                if offset <= tok_off {
                    break;
                }
                match path.last_mut() {
                    Some(Segment::Index(i)) => *i += 1,
                    Some(Segment::Key(k)) => {
                        k.clear();
                        is_at_property_key = true;
                        if let Some(frame) = stack.last_mut() {
                            frame.expecting_key = true;
                        }
                    }
                    None => {}
                }
                previous = None;
            }

            SyntaxKind::ColonToken => {
                if offset <= tok_off {
                    break;
                }
                if let Some(frame) = stack.last_mut() {
                    if frame.is_object {
                        frame.expecting_key = false;
                    }
                }
                is_at_property_key = false;
                previous = None;
            }

            SyntaxKind::StringLiteral => {
                if offset < tok_off {
                    break;
                }
                let parent = stack.last().map(|f| f.node);
                let key_position = stack
                    .last()
                    .is_some_and(|f| f.is_object && f.expecting_key);
                let kind = if key_position {
                    SyntaxNodeKind::Property
                } else {
                    SyntaxNodeKind::String
                };
                let node = tree.add(kind, tok_off, tok_end - tok_off, parent);
                if key_position {
                    if let Some(Segment::Key(k)) = path.last_mut() {
                        *k = scanner.get_token_value().to_string();
                    }
                }
                previous = Some(node);
                if offset <= tok_end {
                    break;
                }
            }

            SyntaxKind::NumericLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => {
                if offset < tok_off {
                    break;
                }
                let kind = match token {
                    SyntaxKind::NumericLiteral => SyntaxNodeKind::Number,
                    SyntaxKind::NullKeyword => SyntaxNodeKind::Null,
                    _ => SyntaxNodeKind::Boolean,
                };
                let parent = stack.last().map(|f| f.node);
                let node = tree.add(kind, tok_off, tok_end - tok_off, parent);
                previous = Some(node);
                if offset <= tok_end {
                    break;
                }
            }

            SyntaxKind::Unknown => {
                // Stray bytes: skip them, keep whatever context we have.
                if offset <= tok_end {
                    break;
                }
            }

            // skip_trivia means trivia kinds never reach this match.
            _ => {}
        }
    }

    // Unterminated containers extend to the end of the input, best effort.
    let text_end = text.len() as u32;
    for frame in &stack {
        tree.set_end(frame.node, text_end);
    }

    trace!(
        offset,
        depth = path.len(),
        previous = ?previous,
        at_key = is_at_property_key,
        "resolved location"
    );

    Location {
        tree,
        path: JsonPath(path),
        previous_node: previous,
        is_at_property_key,
    }
}
