//! chart-literal: JavaScript object-literal codec for chart options.
//!
//! Chart option structures are mostly JSON, except for callbacks such as
//! label formatters that must reach the browser as executable code. This
//! crate serializes [`OptionValue`] trees (or any `serde::Serialize` value)
//! into text where [`JsCode`] leaves appear as raw script, and parses
//! hand-written option literals back into [`OptionValue`] trees.
//!
//! ```
//! use chart_literal::{JsCode, OptionValue, to_js_literal};
//!
//! let options = OptionValue::object()
//!     .with("color", "red")
//!     .with("onClick", JsCode::new("function(p){return p.name;}"));
//! let text = to_js_literal(&options).unwrap();
//! assert!(text.contains("\"onClick\": function(p){return p.name;}"));
//! ```

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{
    Parser, ParserConfig, Serializer, SerializerConfig, parse_js_literal, to_js_literal,
};
pub use crate::core::{Frame, JS_CODE_SENTINEL, JsCode, OptionMap, OptionValue, Series, TabularSource};
pub use error::{LiteralError, LiteralResult};
