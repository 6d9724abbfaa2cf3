//! Subcommand implementations.
//!
//! Each command renders its output to a `String`; `main` prints it. That
//! keeps the commands testable without capturing stdout.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use jsonfill_lsp::{JsonCompletions, LineMap, Position};
use jsonfill_scanner::{ScanError, ScannerState, SyntaxKind};
use jsonfill_syntax::{SyntaxNodeKind, resolve_location};
use tracing::debug;

/// Cursor given either as a byte offset or as line/character.
#[derive(Debug, Clone, Copy)]
pub enum Cursor {
    Offset(u32),
    Position { line: u32, character: u32 },
}

impl Cursor {
    pub fn from_args(offset: Option<u32>, line: Option<u32>, character: Option<u32>) -> Result<Cursor> {
        match (offset, line, character) {
            (Some(offset), _, _) => Ok(Cursor::Offset(offset)),
            (None, Some(line), Some(character)) => Ok(Cursor::Position { line, character }),
            _ => bail!("a cursor is required: pass --offset or --line/--character"),
        }
    }

    fn to_offset(self, map: &LineMap, text: &str) -> Result<u32> {
        let offset = match self {
            Cursor::Offset(offset) => offset,
            Cursor::Position { line, character } => map
                .position_to_offset(Position::new(line, character), text)
                .with_context(|| format!("line {line} is past the end of the document"))?,
        };
        debug!(?self, offset, "resolved cursor");
        Ok(offset)
    }
}

fn read_document(file: &Path) -> Result<String> {
    std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))
}

pub fn complete(file: &Path, cursor: Cursor, values: &[String], json: bool) -> Result<String> {
    let text = read_document(file)?;
    let map = LineMap::build(&text);
    let offset = cursor.to_offset(&map, &text)?;

    let provider = JsonCompletions::new(&text, &map);
    let items = provider.value_completions(offset, values);

    if json {
        return Ok(serde_json::to_string_pretty(&items)?);
    }

    let mut out = String::new();
    writeln!(out, "{} completion(s) at offset {offset}:", items.len())?;
    for item in &items {
        writeln!(
            out,
            "  {}  insert {:?} over [{}, {})",
            item.label.green(),
            item.insert_text,
            item.span.start,
            item.span.end
        )?;
    }
    Ok(out)
}

/// Serializable summary of a resolved location, for `locate --json`.
#[derive(Serialize)]
struct LocateOutput<'a> {
    path: &'a jsonfill_syntax::JsonPath,
    previous_node: Option<NodeSummary>,
    at_property_key: bool,
}

#[derive(Serialize)]
struct NodeSummary {
    kind: SyntaxNodeKind,
    offset: u32,
    length: u32,
}

pub fn locate(file: &Path, cursor: Cursor, json: bool) -> Result<String> {
    let text = read_document(file)?;
    let map = LineMap::build(&text);
    let offset = cursor.to_offset(&map, &text)?;

    let location = resolve_location(&text, offset);
    let previous = location.previous().map(|node| NodeSummary {
        kind: node.kind,
        offset: node.offset,
        length: node.length,
    });

    if json {
        let output = LocateOutput {
            path: &location.path,
            previous_node: previous,
            at_property_key: location.is_at_property_key,
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    let mut out = String::new();
    writeln!(out, "path: {}", serde_json::to_string(&location.path)?)?;
    match previous {
        Some(node) => writeln!(
            out,
            "previous node: {:?} at [{}, {})",
            node.kind,
            node.offset,
            node.offset + node.length
        )?,
        None => writeln!(out, "previous node: none")?,
    }
    writeln!(out, "at property key: {}", location.is_at_property_key)?;
    Ok(out)
}

pub fn tokens(file: &Path, trivia: bool) -> Result<String> {
    let text = read_document(file)?;
    let mut scanner = ScannerState::new(&text, !trivia);

    let mut out = String::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        write!(
            out,
            "{:>5}..{:<5} {:?}",
            scanner.get_token_offset(),
            scanner.get_token_end(),
            kind
        )?;
        if !matches!(kind, SyntaxKind::WhitespaceTrivia | SyntaxKind::LineBreakTrivia) {
            write!(out, " {:?}", scanner.get_token_value())?;
        }
        if scanner.get_token_error() != ScanError::None {
            write!(out, " {}", format!("({:?})", scanner.get_token_error()).red())?;
        }
        out.push('\n');
    }
    Ok(out)
}
