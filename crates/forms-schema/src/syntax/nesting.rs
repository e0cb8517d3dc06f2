//! Nesting limit
//!
//! The KDL parser recurses once per children block (and per nested block
//! comment), so a hostile document could exhaust the stack. This scan walks
//! the raw text, skipping strings and comments, and rejects documents that
//! nest deeper than [`MAX_DEPTH`] before the parser sees them.

use super::position;
use crate::error::SyntaxError;

/// Deepest nesting of children blocks and block comments accepted
pub const MAX_DEPTH: usize = 64;

#[derive(Clone, Copy)]
enum Scan {
    Code,
    String,
    MultiLineString,
    RawString(usize),
    LineComment,
    BlockComment(usize),
}

/// Reject text nested deeper than [`MAX_DEPTH`]
pub(super) fn check(text: &str) -> Result<(), SyntaxError> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut state = Scan::Code;
    let mut i = 0;

    while i < bytes.len() {
        let rest = &bytes[i..];
        match state {
            Scan::Code => match rest[0] {
                b'"' if rest.starts_with(b"\"\"\"") => {
                    state = Scan::MultiLineString;
                    i += 3;
                    continue;
                }
                b'"' => state = Scan::String,
                b'#' => {
                    let hashes = rest.iter().take_while(|&&b| b == b'#').count();
                    if rest.get(hashes) == Some(&b'"') {
                        state = Scan::RawString(hashes);
                        i += hashes + 1;
                        continue;
                    }
                    i += hashes;
                    continue;
                }
                b'/' if rest.starts_with(b"//") => state = Scan::LineComment,
                b'/' if rest.starts_with(b"/*") => {
                    too_deep(text, i, depth + 1)?;
                    state = Scan::BlockComment(1);
                    i += 2;
                    continue;
                }
                b'{' => {
                    depth += 1;
                    too_deep(text, i, depth)?;
                }
                b'}' => depth = depth.saturating_sub(1),
                _ => {}
            },
            Scan::String | Scan::MultiLineString if rest[0] == b'\\' => {
                i += 2;
                continue;
            }
            Scan::String => {
                if rest[0] == b'"' {
                    state = Scan::Code;
                }
            }
            Scan::MultiLineString => {
                if rest.starts_with(b"\"\"\"") {
                    state = Scan::Code;
                    i += 3;
                    continue;
                }
            }
            Scan::RawString(hashes) => {
                if rest[0] == b'"' && rest[1..].iter().take(hashes).filter(|&&b| b == b'#').count() == hashes {
                    state = Scan::Code;
                    i += hashes + 1;
                    continue;
                }
            }
            Scan::LineComment => {
                if matches!(rest[0], b'\n' | b'\r') {
                    state = Scan::Code;
                }
            }
            Scan::BlockComment(level) => {
                if rest.starts_with(b"/*") {
                    too_deep(text, i, depth + level + 1)?;
                    state = Scan::BlockComment(level + 1);
                    i += 2;
                    continue;
                }
                if rest.starts_with(b"*/") {
                    state = if level == 1 {
                        Scan::Code
                    } else {
                        Scan::BlockComment(level - 1)
                    };
                    i += 2;
                    continue;
                }
            }
        }
        i += 1;
    }
    Ok(())
}

fn too_deep(text: &str, offset: usize, depth: usize) -> Result<(), SyntaxError> {
    if depth <= MAX_DEPTH {
        return Ok(());
    }
    let (line, column) = position(text, offset);
    Err(SyntaxError::new(
        line,
        column,
        format!("document nested deeper than {MAX_DEPTH} levels"),
    ))
}
