use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::core::{JS_CODE_SENTINEL, OptionValue};
use crate::error::LiteralResult;

use super::ParserConfig;
use super::function_span::scan_function_spans;
use super::literal_reader::LiteralReader;

/// `//` counts as a comment after whitespace or a structural character, so
/// `http://` inside a string value is left alone.
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s+|(?P<punct>[,{\[]))//[^\n]*(?:\n|$)").expect("line comment pattern")
});

static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<lead>^|[{,\s])(?P<key>[A-Za-z_$][A-Za-z0-9_$]*)\s*:").expect("bare key pattern")
});

static KEY_VALUE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:$|[{\['\x22]|true\b|false\b|null\b|-?\.?[0-9]|function\b)")
        .expect("value start pattern")
});

/// Turns hand-written object-literal text into an [`OptionValue`].
///
/// Meant for option snippets copied from charting library examples: bare
/// keys, single-quoted strings, `//` comments, trailing commas and inline
/// `function` literals are accepted. Every function literal becomes an
/// [`OptionValue::Code`] holding its exact source text.
///
/// The pre-processing is heuristic. Keys inside string values can be
/// rewritten, and braces inside strings confuse the function scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Parses `text`. Error offsets refer to the reassembled text, which
    /// [`Parser::reassemble`] returns for inspection.
    pub fn parse(&self, text: &str) -> LiteralResult<OptionValue> {
        let prepared = self.reassemble(text);
        if self.config.echo {
            info!(target: "chart_literal::echo", "reassembled literal:\n{prepared}");
        }
        let value = LiteralReader::new(&prepared).read_document()?;
        debug!(
            input_bytes = text.len(),
            code_leaves = value.code_count(),
            "parsed js literal"
        );
        Ok(value)
    }

    /// Applies the textual repairs and fences function literals with the
    /// code sentinel, without reading the result.
    #[must_use]
    pub fn reassemble(&self, text: &str) -> String {
        let trimmed = text.trim();
        let stripped = if self.config.strip_comments {
            LINE_COMMENT.replace_all(trimmed, "${punct}\n").into_owned()
        } else {
            trimmed.to_owned()
        };

        let spans = scan_function_spans(&stripped);
        debug!(functions = spans.len(), "function spans located");

        let mut out = String::with_capacity(stripped.len() + spans.len() * 2 * JS_CODE_SENTINEL.len());
        let mut cursor = 0;
        for span in &spans {
            self.push_plain(&mut out, &stripped[cursor..span.start]);
            out.push_str(JS_CODE_SENTINEL);
            out.push_str(span.slice(&stripped));
            out.push_str(JS_CODE_SENTINEL);
            cursor = span.end;
        }
        self.push_plain(&mut out, &stripped[cursor..]);
        out
    }

    fn push_plain(&self, out: &mut String, segment: &str) {
        if self.config.quote_bare_keys {
            out.push_str(&quote_bare_keys(segment));
        } else {
            out.push_str(segment);
        }
    }
}

/// Parses `text`, optionally echoing the reassembled intermediate text.
///
/// The echo is an `info!` event with target `chart_literal::echo`, so it only
/// shows up once the host installs a subscriber, for instance through
/// [`init_default_tracing`](crate::telemetry::init_default_tracing).
pub fn parse_js_literal(text: &str, echo: bool) -> LiteralResult<OptionValue> {
    Parser::with_config(ParserConfig::default().with_echo(echo)).parse(text)
}

/// Rewrites `key:` to `"key":` where a literal value follows the colon.
///
/// The end of the segment also counts as a value start, because a function
/// literal that was cut out right after the colon follows there.
fn quote_bare_keys(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 16);
    let mut cursor = 0;
    for caps in BARE_KEY.captures_iter(segment) {
        let (Some(whole), Some(lead), Some(key)) = (caps.get(0), caps.name("lead"), caps.name("key"))
        else {
            continue;
        };
        if !KEY_VALUE_START.is_match(&segment[whole.end()..]) {
            continue;
        }
        out.push_str(&segment[cursor..lead.end()]);
        out.push('"');
        out.push_str(key.as_str());
        out.push_str("\":");
        cursor = whole.end();
    }
    out.push_str(&segment[cursor..]);
    out
}
