use tracing::{trace, warn};

const FUNCTION_KEYWORD: &[u8] = b"function";

/// Byte range `[start, end)` of one top-level function literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpan {
    pub start: usize,
    pub end: usize,
}

impl FunctionSpan {
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InsideFunction { start: usize, open: usize, close: usize },
}

/// Finds every top-level `function` literal by brace counting.
///
/// A span starts at the keyword and ends at the first point where the number
/// of `{` and `}` seen since the keyword are equal and non-zero. Nested
/// functions are absorbed into their enclosing span. Braces inside strings or
/// comments are counted like any other brace.
///
/// A function still open at end of text produces no span.
#[must_use]
pub fn scan_function_spans(text: &str) -> Vec<FunctionSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut state = ScanState::Outside;
    let mut i = 0;

    while i < bytes.len() {
        match state {
            ScanState::Outside => {
                if is_keyword_at(bytes, i) {
                    state = ScanState::InsideFunction {
                        start: i,
                        open: 0,
                        close: 0,
                    };
                    i += FUNCTION_KEYWORD.len();
                    continue;
                }
            }
            ScanState::InsideFunction { start, open, close } => {
                let (open, close) = match bytes[i] {
                    b'{' => (open + 1, close),
                    b'}' => (open, close + 1),
                    _ => (open, close),
                };
                state = if open == close && open > 0 {
                    let span = FunctionSpan { start, end: i + 1 };
                    trace!(start = span.start, end = span.end, "function span");
                    spans.push(span);
                    ScanState::Outside
                } else {
                    ScanState::InsideFunction { start, open, close }
                };
            }
        }
        i += 1;
    }

    if let ScanState::InsideFunction { start, .. } = state {
        warn!(start, "unterminated function literal dropped from span scan");
    }
    spans
}

fn is_keyword_at(bytes: &[u8], i: usize) -> bool {
    if !bytes[i..].starts_with(FUNCTION_KEYWORD) {
        return false;
    }
    let before_ok = i == 0 || !is_ident_byte(bytes[i - 1]);
    let after_ok = bytes
        .get(i + FUNCTION_KEYWORD.len())
        .is_none_or(|b| !is_ident_byte(*b));
    before_ok && after_ok
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
