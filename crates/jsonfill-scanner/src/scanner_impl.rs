//! Tokenizer state machine.
//!
//! Scans JSON text one token at a time. The scanner is deliberately
//! forgiving: unterminated strings end at the line break, bad escapes keep
//! the string token alive, and unrecognized bytes become `Unknown` tokens.
//! Every call to `scan` makes forward progress, so scanning always
//! terminates.

use memchr::{memchr2, memmem};

use crate::syntax_kind::SyntaxKind;

/// Recoverable lexical errors. Attached to the token that triggered them;
/// the token itself is still produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanError {
    #[default]
    None,
    UnexpectedEndOfString,
    UnexpectedEndOfComment,
    InvalidEscapeCharacter,
    InvalidUnicodeEscape,
    InvalidCharacter,
}

/// Tokenizer over a borrowed text buffer.
///
/// All offsets are byte offsets into `text`. Token spans are
/// `[get_token_offset(), get_token_end())`.
pub struct ScannerState<'a> {
    text: &'a str,
    pos: u32,
    skip_trivia: bool,
    token: SyntaxKind,
    token_offset: u32,
    value: String,
    error: ScanError,
}

impl<'a> ScannerState<'a> {
    pub fn new(text: &'a str, skip_trivia: bool) -> ScannerState<'a> {
        ScannerState {
            text,
            pos: 0,
            skip_trivia,
            token: SyntaxKind::Unknown,
            token_offset: 0,
            value: String::new(),
            error: ScanError::None,
        }
    }

    /// Move the scan cursor. Offsets past the end of the text are clamped.
    pub fn set_position(&mut self, pos: u32) {
        self.pos = pos.min(self.text.len() as u32);
        self.token = SyntaxKind::Unknown;
        self.token_offset = self.pos;
        self.value.clear();
        self.error = ScanError::None;
    }

    /// Scan the next token, skipping trivia when the scanner was built with
    /// `skip_trivia`.
    pub fn scan(&mut self) -> SyntaxKind {
        loop {
            let kind = self.scan_token();
            if !self.skip_trivia || !kind.is_trivia() {
                return kind;
            }
        }
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_offset(&self) -> u32 {
        self.token_offset
    }

    pub fn get_token_length(&self) -> u32 {
        self.pos - self.token_offset
    }

    /// Byte offset just past the current token.
    pub fn get_token_end(&self) -> u32 {
        self.pos
    }

    /// The token text: decoded content for string literals (escapes
    /// resolved, quotes stripped), the raw slice for everything else.
    pub fn get_token_value(&self) -> &str {
        match self.token {
            SyntaxKind::StringLiteral => &self.value,
            _ => self
                .text
                .get(self.token_offset as usize..self.pos as usize)
                .unwrap_or(""),
        }
    }

    pub fn get_token_error(&self) -> ScanError {
        self.error
    }

    fn scan_token(&mut self) -> SyntaxKind {
        self.value.clear();
        self.error = ScanError::None;
        self.token_offset = self.pos;

        let bytes = self.text.as_bytes();
        let Some(&c) = bytes.get(self.pos as usize) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match c {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'"' => {
                self.pos += 1;
                self.scan_string();
                SyntaxKind::StringLiteral
            }
            b'/' => self.scan_comment(),
            b' ' | b'\t' | 0x0B | 0x0C => {
                let mut end = self.pos as usize + 1;
                while matches!(bytes.get(end), Some(b' ' | b'\t' | 0x0B | 0x0C)) {
                    end += 1;
                }
                self.pos = end as u32;
                SyntaxKind::WhitespaceTrivia
            }
            b'\n' => self.single(SyntaxKind::LineBreakTrivia),
            b'\r' => {
                self.pos += 1;
                if bytes.get(self.pos as usize) == Some(&b'\n') {
                    self.pos += 1;
                }
                SyntaxKind::LineBreakTrivia
            }
            b'-' => {
                if bytes
                    .get(self.pos as usize + 1)
                    .is_some_and(u8::is_ascii_digit)
                {
                    self.scan_number()
                } else {
                    self.single(SyntaxKind::Unknown)
                }
            }
            b'0'..=b'9' => self.scan_number(),
            c if c.is_ascii_alphabetic() => self.scan_keyword(),
            _ => {
                // Unrecognized byte run. Consume one whole character so a
                // multi-byte UTF-8 sequence is never split.
                self.pos += Self::char_width(bytes, self.pos as usize) as u32;
                SyntaxKind::Unknown
            }
        };
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// Width in bytes of the character starting at `idx`. A continuation
    /// byte (possible when the caller set a mid-character position) counts
    /// as one byte so progress is still made.
    fn char_width(bytes: &[u8], idx: usize) -> usize {
        match bytes.get(idx) {
            Some(&b) if b < 0x80 => 1,
            Some(&b) if b >= 0xF0 => 4,
            Some(&b) if b >= 0xE0 => 3,
            Some(&b) if b >= 0xC0 => 2,
            _ => 1,
        }
    }

    /// Scan a string body; `self.pos` is just past the opening quote.
    /// Unterminated strings end at the line break or end of input.
    fn scan_string(&mut self) {
        let bytes = self.text.as_bytes();
        let mut run_start = self.pos as usize;

        macro_rules! flush_run {
            ($end:expr) => {
                if $end > run_start {
                    self.value
                        .push_str(self.text.get(run_start..$end).unwrap_or(""));
                }
            };
        }

        loop {
            let idx = self.pos as usize;
            match bytes.get(idx) {
                None => {
                    flush_run!(idx);
                    self.error = ScanError::UnexpectedEndOfString;
                    return;
                }
                Some(b'"') => {
                    flush_run!(idx);
                    self.pos += 1;
                    return;
                }
                Some(b'\n' | b'\r') => {
                    // Token ends before the line break; the break itself is
                    // the next token.
                    flush_run!(idx);
                    self.error = ScanError::UnexpectedEndOfString;
                    return;
                }
                Some(b'\\') => {
                    flush_run!(idx);
                    self.pos += 1;
                    self.scan_escape();
                    run_start = self.pos as usize;
                }
                Some(&b) if b < 0x20 => {
                    // Raw control character inside a string: record the
                    // error but keep the character and keep scanning.
                    if self.error == ScanError::None {
                        self.error = ScanError::InvalidCharacter;
                    }
                    self.pos += 1;
                }
                Some(_) => {
                    self.pos += Self::char_width(bytes, idx) as u32;
                }
            }
        }
    }

    /// Scan one escape sequence; `self.pos` is just past the backslash.
    fn scan_escape(&mut self) {
        let bytes = self.text.as_bytes();
        let Some(&c) = bytes.get(self.pos as usize) else {
            self.error = ScanError::UnexpectedEndOfString;
            return;
        };
        self.pos += 1;
        match c {
            b'"' => self.value.push('"'),
            b'\\' => self.value.push('\\'),
            b'/' => self.value.push('/'),
            b'b' => self.value.push('\u{8}'),
            b'f' => self.value.push('\u{C}'),
            b'n' => self.value.push('\n'),
            b'r' => self.value.push('\r'),
            b't' => self.value.push('\t'),
            b'u' => self.scan_unicode_escape(),
            _ => {
                if self.error == ScanError::None {
                    self.error = ScanError::InvalidEscapeCharacter;
                }
                // Keep the escaped character itself so the decoded value
                // degrades gracefully.
                self.pos -= 1;
                let width = Self::char_width(bytes, self.pos as usize);
                let start = self.pos as usize;
                self.value
                    .push_str(self.text.get(start..start + width).unwrap_or(""));
                self.pos += width as u32;
            }
        }
    }

    /// Scan the `XXXX` of a `\uXXXX` escape; handles surrogate pairs.
    fn scan_unicode_escape(&mut self) {
        let Some(first) = self.scan_hex4() else {
            if self.error == ScanError::None {
                self.error = ScanError::InvalidUnicodeEscape;
            }
            self.value.push('\u{FFFD}');
            return;
        };
        if (0xD800..0xDC00).contains(&first) {
            // High surrogate: must be followed by `\uDC00`..`\uDFFF`.
            let bytes = self.text.as_bytes();
            let idx = self.pos as usize;
            if bytes.get(idx) == Some(&b'\\') && bytes.get(idx + 1) == Some(&b'u') {
                let saved = self.pos;
                self.pos += 2;
                if let Some(second) = self.scan_hex4() {
                    if (0xDC00..0xE000).contains(&second) {
                        let combined =
                            0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
                        self.value
                            .push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                        return;
                    }
                }
                self.pos = saved;
            }
            if self.error == ScanError::None {
                self.error = ScanError::InvalidUnicodeEscape;
            }
            self.value.push('\u{FFFD}');
        } else {
            match char::from_u32(first) {
                Some(ch) => self.value.push(ch),
                None => {
                    if self.error == ScanError::None {
                        self.error = ScanError::InvalidUnicodeEscape;
                    }
                    self.value.push('\u{FFFD}');
                }
            }
        }
    }

    /// Read exactly four hex digits, or leave the position untouched.
    fn scan_hex4(&mut self) -> Option<u32> {
        let bytes = self.text.as_bytes();
        let start = self.pos as usize;
        let mut result: u32 = 0;
        for i in 0..4 {
            let digit = match bytes.get(start + i) {
                Some(b @ b'0'..=b'9') => (b - b'0') as u32,
                Some(b @ b'a'..=b'f') => (b - b'a' + 10) as u32,
                Some(b @ b'A'..=b'F') => (b - b'A' + 10) as u32,
                _ => return None,
            };
            result = result * 16 + digit;
        }
        self.pos += 4;
        Some(result)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        let mut end = self.pos as usize;
        if bytes.get(end) == Some(&b'-') {
            end += 1;
        }
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
            end += 2;
            while bytes.get(end).is_some_and(u8::is_ascii_digit) {
                end += 1;
            }
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                end = exp;
                while bytes.get(end).is_some_and(u8::is_ascii_digit) {
                    end += 1;
                }
            }
        }
        self.pos = end as u32;
        SyntaxKind::NumericLiteral
    }

    /// Scan an identifier-like run: `true`, `false`, `null`, or `Unknown`.
    fn scan_keyword(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        let start = self.pos as usize;
        let mut end = start;
        while bytes
            .get(end)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            end += 1;
        }
        self.pos = end as u32;
        match &self.text[start..end] {
            "true" => SyntaxKind::TrueKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "null" => SyntaxKind::NullKeyword,
            _ => SyntaxKind::Unknown,
        }
    }

    /// Scan `//` and `/* */` comments; a lone slash is `Unknown`.
    fn scan_comment(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        match bytes.get(self.pos as usize + 1) {
            Some(b'/') => {
                let body = self.pos as usize + 2;
                let end = match memchr2(b'\n', b'\r', &bytes[body..]) {
                    Some(rel) => body + rel,
                    None => bytes.len(),
                };
                self.pos = end as u32;
                SyntaxKind::LineCommentTrivia
            }
            Some(b'*') => {
                let body = self.pos as usize + 2;
                match memmem::find(&bytes[body..], b"*/") {
                    Some(rel) => self.pos = (body + rel + 2) as u32,
                    None => {
                        self.pos = bytes.len() as u32;
                        self.error = ScanError::UnexpectedEndOfComment;
                    }
                }
                SyntaxKind::BlockCommentTrivia
            }
            _ => self.single(SyntaxKind::Unknown),
        }
    }
}
