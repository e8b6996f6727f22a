pub mod code;
pub mod merge;
pub mod primitives;
pub mod source;
pub mod value;

pub use code::{JS_CODE_SENTINEL, JsCode};
pub use source::{Frame, Series, TabularSource};
pub use value::{OptionMap, OptionValue};
