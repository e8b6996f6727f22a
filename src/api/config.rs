use serde::{Deserialize, Serialize};

pub const DEFAULT_INDENT: usize = 2;
pub const MAX_INDENT: usize = 16;

/// Output policy for [`Serializer`](super::Serializer).
///
/// Serializable so tools can keep the policy next to their other settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializerConfig {
    /// Spaces per nesting level; `None` writes compact single-line output.
    #[serde(default = "default_indent")]
    pub indent: Option<usize>,
    /// Drop sentinel tokens that were not part of a quoted code block.
    #[serde(default = "default_true")]
    pub strip_stray_sentinels: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            strip_stray_sentinels: true,
        }
    }
}

impl SerializerConfig {
    #[must_use]
    pub fn compact() -> Self {
        Self {
            indent: None,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    #[must_use]
    pub fn with_strip_stray_sentinels(mut self, enabled: bool) -> Self {
        self.strip_stray_sentinels = enabled;
        self
    }
}

/// Pre-processing switches for [`Parser`](super::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Emit the reassembled intermediate text before it is read.
    #[serde(default)]
    pub echo: bool,
    #[serde(default = "default_true")]
    pub strip_comments: bool,
    #[serde(default = "default_true")]
    pub quote_bare_keys: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            echo: false,
            strip_comments: true,
            quote_bare_keys: true,
        }
    }
}

impl ParserConfig {
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    #[must_use]
    pub fn with_strip_comments(mut self, enabled: bool) -> Self {
        self.strip_comments = enabled;
        self
    }

    #[must_use]
    pub fn with_quote_bare_keys(mut self, enabled: bool) -> Self {
        self.quote_bare_keys = enabled;
        self
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_indent() -> Option<usize> {
    Some(DEFAULT_INDENT)
}

fn default_true() -> bool {
    true
}
