use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::OptionValue;
use crate::error::{LiteralError, LiteralResult};

/// Coerces a decimal to the nearest native JSON number.
///
/// Integral values that fit in `i64` stay integers so they print without a
/// trailing `.0`.
pub fn decimal_to_number(value: Decimal, field_name: &str) -> LiteralResult<OptionValue> {
    if value.fract().is_zero() {
        if let Some(int) = value.to_i64() {
            return Ok(OptionValue::Int(int));
        }
    }
    value.to_f64().map(OptionValue::Float).ok_or_else(|| {
        LiteralError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ISO-8601 text for a timestamp; midnight collapses to the bare date.
#[must_use]
pub fn format_datetime(time: NaiveDateTime) -> String {
    let is_midnight =
        time.hour() == 0 && time.minute() == 0 && time.second() == 0 && time.nanosecond() == 0;
    if is_midnight {
        return format_date(time.date());
    }
    if time.nanosecond() == 0 {
        time.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        time.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Field adapter writing a [`Decimal`] as a native JSON number.
///
/// ```
/// use chart_literal::to_js_literal;
/// use rust_decimal::Decimal;
///
/// #[derive(serde::Serialize)]
/// struct Point {
///     #[serde(with = "chart_literal::core::primitives::serde_decimal")]
///     price: Decimal,
/// }
///
/// let text = to_js_literal(&Point { price: Decimal::new(12_345, 2) }).unwrap();
/// assert!(text.contains("\"price\": 123.45"));
/// ```
pub mod serde_decimal {
    use rust_decimal::Decimal;
    use serde::ser::Error as _;
    use serde::{Serialize, Serializer};

    use super::decimal_to_number;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        decimal_to_number(*value, "decimal field")
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Field adapter writing a [`NaiveDateTime`] the way option trees do:
/// midnight as a bare date, anything else as ISO-8601 text.
pub mod serde_datetime {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    use super::format_datetime;

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_datetime(*value))
    }
}
