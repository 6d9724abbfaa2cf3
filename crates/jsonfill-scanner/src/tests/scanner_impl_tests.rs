use super::*;

#[test]
fn test_scan_empty() {
    let mut scanner = ScannerState::new("", true);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_whitespace() {
    let mut scanner = ScannerState::new("   ", false);
    assert_eq!(scanner.scan(), SyntaxKind::WhitespaceTrivia);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_whitespace_skip() {
    let mut scanner = ScannerState::new("   true", true);
    assert_eq!(scanner.scan(), SyntaxKind::TrueKeyword);
    assert_eq!(scanner.get_token_offset(), 3);
    assert_eq!(scanner.get_token_value(), "true");
}

#[test]
fn test_scan_punctuation() {
    let mut scanner = ScannerState::new("{}[],:", true);
    assert_eq!(scanner.scan(), SyntaxKind::OpenBraceToken);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.scan(), SyntaxKind::OpenBracketToken);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBracketToken);
    assert_eq!(scanner.scan(), SyntaxKind::CommaToken);
    assert_eq!(scanner.scan(), SyntaxKind::ColonToken);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_keywords() {
    let mut scanner = ScannerState::new("true false null nully", true);
    assert_eq!(scanner.scan(), SyntaxKind::TrueKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::FalseKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::NullKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.get_token_value(), "nully");
}

#[test]
fn test_scan_string_simple() {
    let mut scanner = ScannerState::new(r#""hello""#, true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_offset(), 0);
    assert_eq!(scanner.get_token_length(), 7);
    assert_eq!(scanner.get_token_value(), "hello");
    assert_eq!(scanner.get_token_error(), ScanError::None);
}

#[test]
fn test_scan_string_escapes() {
    let mut scanner = ScannerState::new(r#""a\"b\\c\ndA""#, true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "a\"b\\c\nd\u{41}");
    assert_eq!(scanner.get_token_error(), ScanError::None);
}

#[test]
fn test_scan_string_surrogate_pair() {
    let mut scanner = ScannerState::new(r#""😀""#, true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "\u{1F600}");
}

#[test]
fn test_scan_string_unterminated_at_eof() {
    let mut scanner = ScannerState::new(r#""abc"#, true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "abc");
    assert_eq!(scanner.get_token_error(), ScanError::UnexpectedEndOfString);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_string_unterminated_at_newline() {
    let mut scanner = ScannerState::new("\"abc\ntrue", false);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_length(), 4);
    assert_eq!(scanner.get_token_error(), ScanError::UnexpectedEndOfString);
    // The line break is its own token, not part of the string.
    assert_eq!(scanner.scan(), SyntaxKind::LineBreakTrivia);
    assert_eq!(scanner.scan(), SyntaxKind::TrueKeyword);
}

#[test]
fn test_scan_string_bad_escape() {
    let mut scanner = ScannerState::new(r#""a\qb""#, true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "aqb");
    assert_eq!(scanner.get_token_error(), ScanError::InvalidEscapeCharacter);
}

#[test]
fn test_scan_string_bad_unicode_escape() {
    let mut scanner = ScannerState::new(r#""\uZZZZ""#, true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_error(), ScanError::InvalidUnicodeEscape);
}

#[test]
fn test_scan_numbers() {
    let mut scanner = ScannerState::new("0 -12 3.25 1e10 2E-3", true);
    for expected in ["0", "-12", "3.25", "1e10", "2E-3"] {
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.get_token_value(), expected);
    }
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_lone_minus() {
    let mut scanner = ScannerState::new("-", true);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_line_comment() {
    let mut scanner = ScannerState::new("// note\n1", false);
    assert_eq!(scanner.scan(), SyntaxKind::LineCommentTrivia);
    assert_eq!(scanner.get_token_value(), "// note");
    assert_eq!(scanner.scan(), SyntaxKind::LineBreakTrivia);
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
}

#[test]
fn test_scan_block_comment() {
    let mut scanner = ScannerState::new("/* a\nb */ 1", true);
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_offset(), 10);
}

#[test]
fn test_scan_unterminated_block_comment() {
    let mut scanner = ScannerState::new("/* open", false);
    assert_eq!(scanner.scan(), SyntaxKind::BlockCommentTrivia);
    assert_eq!(scanner.get_token_error(), ScanError::UnexpectedEndOfComment);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_unknown_bytes() {
    let mut scanner = ScannerState::new("@ \u{00E9} 1", true);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.get_token_value(), "@");
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.get_token_value(), "\u{00E9}");
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
}

#[test]
fn test_set_position() {
    let text = r#"{"a":1,"b":2}"#;
    let mut scanner = ScannerState::new(text, true);
    scanner.set_position(6);
    assert_eq!(scanner.scan(), SyntaxKind::CommaToken);
    assert_eq!(scanner.get_token_offset(), 6);
    scanner.set_position(7);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "b");
}

#[test]
fn test_set_position_clamps_past_end() {
    let mut scanner = ScannerState::new("1", true);
    scanner.set_position(999);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_always_terminates() {
    // Byte soup: every token must make progress.
    let text = "@@##\\\\ \"\\u12 \u{FFFD}\u{FFFD} -. 00.. truefalse";
    let mut scanner = ScannerState::new(text, true);
    let mut count = 0;
    while scanner.scan() != SyntaxKind::EndOfFileToken {
        count += 1;
        assert!(count < 1000, "scanner failed to make progress");
    }
}

#[test]
fn test_token_offsets_full_document() {
    let text = r#"{"a": [1, true]}"#;
    let mut scanner = ScannerState::new(text, true);
    let mut spans = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        spans.push((kind, scanner.get_token_offset(), scanner.get_token_end()));
    }
    assert_eq!(
        spans,
        vec![
            (SyntaxKind::OpenBraceToken, 0, 1),
            (SyntaxKind::StringLiteral, 1, 4),
            (SyntaxKind::ColonToken, 4, 5),
            (SyntaxKind::OpenBracketToken, 6, 7),
            (SyntaxKind::NumericLiteral, 7, 8),
            (SyntaxKind::CommaToken, 8, 9),
            (SyntaxKind::TrueKeyword, 10, 14),
            (SyntaxKind::CloseBracketToken, 14, 15),
            (SyntaxKind::CloseBraceToken, 15, 16),
        ]
    );
}
