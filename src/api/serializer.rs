use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, trace, warn};

use crate::core::JS_CODE_SENTINEL;
use crate::error::{LiteralError, LiteralResult};

use super::SerializerConfig;
use super::validation::validate_serializer_config;

/// Writes option structures as JavaScript object-literal text.
///
/// Output is plain JSON except where a [`JsCode`](crate::core::JsCode) leaf
/// sits: there the code is emitted raw, without quotes or string escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer {
    config: SerializerConfig,
}

impl Serializer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SerializerConfig) -> LiteralResult<Self> {
        Ok(Self {
            config: validate_serializer_config(config)?,
        })
    }

    #[must_use]
    pub fn config(&self) -> SerializerConfig {
        self.config
    }

    /// Serializes `value` and splices code blocks back in as raw script.
    ///
    /// Fails with [`LiteralError::Serialization`] when `serde_json` cannot
    /// encode some part of `value`, for instance a map with non-string keys.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> LiteralResult<String> {
        let raw = self.write_json(value)?;
        let (mut text, blocks) = splice_code_blocks(&raw)?;

        if self.config.strip_stray_sentinels && text.contains(JS_CODE_SENTINEL) {
            warn!(
                occurrences = text.matches(JS_CODE_SENTINEL).count(),
                "stray code sentinel in serialized output; stripping"
            );
            text = text.replace(JS_CODE_SENTINEL, "");
        }

        debug!(bytes = text.len(), code_blocks = blocks, "serialized js literal");
        Ok(text)
    }

    fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> LiteralResult<String> {
        let Some(indent) = self.config.indent else {
            return Ok(serde_json::to_string(value)?);
        };

        let indent = " ".repeat(indent);
        let mut buf = Vec::with_capacity(256);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| {
            LiteralError::Serialization(format!("json writer produced invalid utf-8: {e}"))
        })
    }
}

/// Serializes with the default policy: pretty output, two-space indent.
pub fn to_js_literal<T: Serialize + ?Sized>(value: &T) -> LiteralResult<String> {
    Serializer::new().serialize(value)
}

/// Replaces every `"<sentinel>...<sentinel>"` string with its decoded body.
fn splice_code_blocks(raw: &str) -> LiteralResult<(String, usize)> {
    let open = format!("\"{JS_CODE_SENTINEL}");
    let close = format!("{JS_CODE_SENTINEL}\"");

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    let mut blocks = 0;

    while let Some(start) = rest.find(&open) {
        let body_start = start + open.len();
        let Some(body_len) = rest[body_start..].find(&close) else {
            break;
        };
        let body = &rest[body_start..body_start + body_len];
        trace!(offset = raw.len() - rest.len() + start, len = body_len, "code block");

        out.push_str(&rest[..start]);
        out.push_str(&unescape_code(body)?);
        rest = &rest[body_start + body_len + close.len()..];
        blocks += 1;
    }

    out.push_str(rest);
    Ok((out, blocks))
}

/// Undoes the JSON string escaping applied to a code payload, so the code
/// reaches the output byte for byte.
fn unescape_code(escaped: &str) -> LiteralResult<String> {
    if !escaped.contains('\\') {
        return Ok(escaped.to_owned());
    }
    serde_json::from_str::<String>(&format!("\"{escaped}\"")).map_err(|e| {
        LiteralError::Serialization(format!("code block is not a valid json string body: {e}"))
    })
}
