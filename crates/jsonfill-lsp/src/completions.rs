//! Value completion assembly.
//!
//! Three steps per request, each a pure function of `(text, offset)`:
//!
//! 1. `resolve_location` (jsonfill-syntax) finds the structural context.
//! 2. `overwrite_range` decides what range the completion replaces: the
//!    full span of the node under the cursor, or the current word.
//! 3. `needs_separator` re-scans after the insertion point and decides
//!    whether the inserted value must be followed by a comma.
//!
//! Nothing is cached between requests; the document changes on every
//! keystroke and any retained node or token data would be stale.

use jsonfill_scanner::{ScannerState, SyntaxKind};
use jsonfill_syntax::{NodeIndex, SyntaxTree, TextRange, resolve_location};
use serde::Serialize;
use tracing::debug;

use crate::position::{LineMap, Range};

/// The kind of completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompletionItemKind {
    /// A literal value suggestion
    Value,
}

/// A completion item to be suggested to the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    /// The label to display in the completion list
    pub label: String,
    /// The kind of completion item
    pub kind: CompletionItemKind,
    /// Byte span of the text the completion replaces
    pub span: TextRange,
    /// The same span in line/character coordinates
    pub range: Range,
    /// Literal text to insert over the span
    pub insert_text: String,
}

/// Bytes that end the backward current-word scan. Both line-break bytes
/// are in the set, so the scan can never reach a previous line.
const WORD_STOP: &[u8] = b" \t\n\r\x0b\":{[,";

/// Compute the range a completion at `offset` overwrites.
///
/// When the cursor sits in a property name or scalar value node, the
/// node's entire span is replaced. The cursor being inside an object or
/// array does not mean the container should be replaced, so containers
/// fall through to the current-word scan, whose range always ends exactly
/// at the cursor.
pub fn overwrite_range(
    text: &str,
    offset: u32,
    tree: &SyntaxTree,
    previous_node: Option<NodeIndex>,
) -> TextRange {
    if let Some(node) = previous_node.and_then(|idx| tree.get(idx)) {
        if !node.kind.is_container() && node.span().contains_inclusive(offset) {
            return node.span();
        }
    }
    TextRange::new(current_word_start(text, offset), offset)
}

/// Start of the word that ends at `offset`: scan backward over the
/// current line until a delimiter byte.
fn current_word_start(text: &str, offset: u32) -> u32 {
    let bytes = text.as_bytes();
    let mut start = (offset as usize).min(bytes.len());
    while start > 0 && !WORD_STOP.contains(&bytes[start - 1]) {
        start -= 1;
    }
    start as u32
}

/// Decide whether a value inserted at `offset` needs a trailing comma.
///
/// When the cursor sits in a scalar value node the scan is re-anchored
/// past the whole node, even if the cursor is mid-value; a property name
/// is not re-anchored. A trailing comma is only omitted when the next
/// token already terminates the member: `,`, `}`, `]`, or end of input.
pub fn needs_separator(
    text: &str,
    offset: u32,
    tree: &SyntaxTree,
    previous_node: Option<NodeIndex>,
) -> bool {
    let anchor = match previous_node.and_then(|idx| tree.get(idx)) {
        Some(node) if node.kind.is_scalar() => node.end(),
        _ => offset,
    };
    let mut scanner = ScannerState::new(text, true);
    scanner.set_position(anchor);
    !matches!(
        scanner.scan(),
        SyntaxKind::CommaToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::EndOfFileToken
    )
}

/// Completion provider for one document snapshot.
///
/// Holds only borrowed views of the text and line map; candidate values
/// come from the caller, which interprets the structural path and decides
/// what is valid where. This engine only computes the edits.
pub struct JsonCompletions<'a> {
    text: &'a str,
    line_map: &'a LineMap,
}

impl<'a> JsonCompletions<'a> {
    pub fn new(text: &'a str, line_map: &'a LineMap) -> Self {
        JsonCompletions { text, line_map }
    }

    /// Build completion items for the candidate `values` at `offset`.
    ///
    /// Each candidate is offered as a quoted JSON string replacing the
    /// computed overwrite range, with a trailing comma appended when the
    /// following token requires one. Offsets past the end of the document
    /// are clamped.
    pub fn value_completions<S: AsRef<str>>(
        &self,
        offset: u32,
        values: &[S],
    ) -> Vec<CompletionItem> {
        let offset = offset.min(self.text.len() as u32);
        let location = resolve_location(self.text, offset);

        let span = overwrite_range(self.text, offset, &location.tree, location.previous_node);
        let separator = if needs_separator(self.text, offset, &location.tree, location.previous_node)
        {
            ","
        } else {
            ""
        };
        let range = Range::new(
            self.line_map.offset_to_position(span.start, self.text),
            self.line_map.offset_to_position(span.end, self.text),
        );
        debug!(offset, ?span, separator, path = ?location.path, "computed completion edit");

        values
            .iter()
            .map(|value| {
                let label = format!("\"{}\"", value.as_ref());
                CompletionItem {
                    insert_text: format!("{label}{separator}"),
                    label,
                    kind: CompletionItemKind::Value,
                    span,
                    range,
                }
            })
            .collect()
    }
}
