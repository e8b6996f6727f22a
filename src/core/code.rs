use std::fmt;

use serde::{Serialize, Serializer};

/// Marker placed around every embedded code payload while the structure
/// passes through the JSON writer.
///
/// The marker is assumed to never occur in chart data. Nothing escapes it, so
/// a plain string that contains it will be mangled by the serializer.
pub const JS_CODE_SENTINEL: &str = "--x_x--0_0--";

/// JavaScript source that must be emitted unquoted in the serialized literal.
///
/// Typical payloads are callbacks (`formatter`, `tooltip.position`, click
/// handlers) or arbitrary expressions such as `new Date(2024, 0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsCode {
    code: String,
}

impl JsCode {
    /// Wraps `code` after normalizing multi-line host literal artifacts.
    ///
    /// Real newline and tab characters are dropped first, then escaped `\n`
    /// and `\t` sequences are turned into real newline and tab characters.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self {
            code: normalize_code(code.as_ref()),
        }
    }

    /// Wraps `code` exactly as given, without normalization.
    ///
    /// Used for function spans lifted out of hand-written literals, whose text
    /// must survive untouched.
    #[must_use]
    pub fn verbatim(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Recovers a payload from its sentinel-wrapped string form.
    #[must_use]
    pub fn from_wrapped(wrapped: &str) -> Option<Self> {
        let inner = wrapped
            .strip_prefix(JS_CODE_SENTINEL)?
            .strip_suffix(JS_CODE_SENTINEL)?;
        Some(Self::verbatim(inner))
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn into_code(self) -> String {
        self.code
    }

    /// `SENTINEL + code + SENTINEL`, the form handed to the JSON writer.
    #[must_use]
    pub fn wrapped(&self) -> String {
        let mut out = String::with_capacity(self.code.len() + 2 * JS_CODE_SENTINEL.len());
        out.push_str(JS_CODE_SENTINEL);
        out.push_str(&self.code);
        out.push_str(JS_CODE_SENTINEL);
        out
    }
}

impl fmt::Display for JsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl From<&str> for JsCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for JsCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl Serialize for JsCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.wrapped())
    }
}

fn normalize_code(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !matches!(c, '\n' | '\t')).collect();
    stripped.replace("\\n", "\n").replace("\\t", "\t")
}
