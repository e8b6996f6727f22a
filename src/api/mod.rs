mod config;
mod function_span;
mod literal_reader;
mod parser;
mod serializer;
mod validation;

pub use config::{DEFAULT_INDENT, MAX_INDENT, ParserConfig, SerializerConfig};
pub use function_span::{FunctionSpan, scan_function_spans};
pub use parser::{Parser, parse_js_literal};
pub use serializer::{Serializer, to_js_literal};
