//! SQL text rewriting applied before execution.
//!
//! Downstream consumers of the wire format expect `count(*)` aggregates as
//! 32-bit integers, so every `count(*)` in the query text is annotated with
//! an `::INT` cast before execution. A plain substring replace would also
//! rewrite the text when it appears inside a string literal, a quoted
//! identifier, or a comment; the scanner here tracks those regions and
//! leaves them untouched.
//!
//! Matching is byte-exact on the lower-case spelling `count(*)`. Variants
//! like `COUNT(*)` or `count( * )` are executed as written and keep the
//! engine's default 64-bit result type.

/// The aggregate spelling that receives the cast annotation.
const COUNT_STAR: &str = "count(*)";

/// Cast suffix appended to each matched aggregate.
const INT_CAST: &str = "::INT";

/// Rewrite every live occurrence of `count(*)` in `sql` to `count(*)::INT`.
///
/// Occurrences inside `'...'` string literals, `"..."` quoted identifiers,
/// `--` line comments, and `/* */` block comments (nested, as the engine
/// allows) are not rewritten. The input is returned unchanged when no match
/// is found.
pub fn cast_count_star(sql: &str) -> String {
    let bytes = sql.as_bytes();
    let mut out = String::with_capacity(sql.len() + INT_CAST.len());
    let mut last = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' => i = skip_quoted(bytes, i, b'\''),
            b'"' => i = skip_quoted(bytes, i, b'"'),
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = skip_line_comment(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i),
            _ if bytes[i..].starts_with(COUNT_STAR.as_bytes()) => {
                out.push_str(&sql[last..i + COUNT_STAR.len()]);
                out.push_str(INT_CAST);
                i += COUNT_STAR.len();
                last = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&sql[last..]);
    out
}

/// Advance past a quoted region starting at `start` (which holds the opening
/// quote). A doubled quote character is the in-region escape. An unterminated
/// region extends to the end of the input; the engine reports the error.
fn skip_quoted(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// Advance past a `--` comment starting at `start`, up to and including the
/// terminating newline.
fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    while i < bytes.len() {
        if bytes[i] == b'\n' {
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// Advance past a `/* */` comment starting at `start`, honoring nesting.
fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    let mut depth = 1usize;
    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return i;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}
