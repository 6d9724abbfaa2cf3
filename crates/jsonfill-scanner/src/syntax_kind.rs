//! Token kind definitions for the JSON scanner.

use serde::{Deserialize, Serialize};

/// The lexical classification of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    CommaToken,
    ColonToken,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    StringLiteral,
    NumericLiteral,
    LineCommentTrivia,
    BlockCommentTrivia,
    WhitespaceTrivia,
    LineBreakTrivia,
    /// A byte run the scanner could not classify. Scanning continues after it.
    Unknown,
    EndOfFileToken,
}

impl SyntaxKind {
    /// Whitespace, line breaks, and comments.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WhitespaceTrivia
                | SyntaxKind::LineBreakTrivia
                | SyntaxKind::LineCommentTrivia
                | SyntaxKind::BlockCommentTrivia
        )
    }
}
