use std::collections::HashMap;

use chart_literal::{
    JS_CODE_SENTINEL, JsCode, LiteralError, OptionValue, Serializer, SerializerConfig,
    to_js_literal,
};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

fn date_time(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .expect("valid date time")
}

#[test]
fn code_leaves_are_emitted_unquoted() {
    let options = OptionValue::object()
        .with("color", "red")
        .with("onClick", JsCode::new("function(p){return p.name;}"));

    let text = to_js_literal(&options).expect("serialize");

    assert!(text.contains("\"color\": \"red\""));
    assert!(text.contains("\"onClick\": function(p){return p.name;}"));
    assert!(!text.contains(JS_CODE_SENTINEL));
}

#[test]
fn midnight_timestamps_serialize_as_dates() {
    let options = OptionValue::object()
        .with("start", date_time(0, 0, 0))
        .with("end", date_time(9, 30, 0));

    let text = to_js_literal(&options).expect("serialize");

    assert!(text.contains("\"start\": \"2024-03-01\""));
    assert!(text.contains("\"end\": \"2024-03-01T09:30:00\""));
}

#[test]
fn zoned_timestamps_are_normalized_to_utc() {
    let time = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 5)
        .single()
        .expect("unambiguous time");
    let text = to_js_literal(&OptionValue::from(time)).expect("serialize");
    assert_eq!(text, "\"2024-03-01T12:00:05\"");
}

#[test]
fn non_finite_numbers_become_null() {
    let options = OptionValue::object()
        .with("nan", f64::NAN)
        .with("inf", f64::INFINITY)
        .with("ok", 1.5);

    let text = to_js_literal(&options).expect("serialize");

    assert!(text.contains("\"nan\": null"));
    assert!(text.contains("\"inf\": null"));
    assert!(text.contains("\"ok\": 1.5"));
}

#[test]
fn empty_object_serializes_to_braces() {
    let text = to_js_literal(&OptionValue::object()).expect("serialize");
    assert_eq!(text, "{}");
}

#[test]
fn structures_without_code_match_pretty_json() {
    let options = OptionValue::object()
        .with("title", OptionValue::object().with("text", "Sales \"2024\""))
        .with("data", vec![1, 2, 3])
        .with("visible", true)
        .with("empty", OptionValue::Null);

    let text = to_js_literal(&options).expect("serialize");

    assert_eq!(
        text,
        serde_json::to_string_pretty(&options).expect("pretty json")
    );
}

#[test]
fn code_quotes_and_backslashes_are_unescaped() {
    let code = JsCode::new(r#"function(v){ return "<b>" + v.replace(/\d+/g, '#') + "</b>"; }"#);
    let text = to_js_literal(&OptionValue::object().with("formatter", code.clone()))
        .expect("serialize");
    assert!(text.contains(&format!("\"formatter\": {}", code.code())));
}

#[test]
fn code_payload_is_emitted_byte_for_byte() {
    let code = JsCode::verbatim("function (p) {\n    return p.name;\n}");
    let text = to_js_literal(&OptionValue::object().with("formatter", code.clone()))
        .expect("serialize");
    assert!(text.contains(&format!("\"formatter\": {}", code.code())));
    assert!(text.contains("{\n    return p.name;\n}"));
}

#[test]
fn code_inside_arrays_and_nested_objects_is_spliced() {
    let options = OptionValue::object().with(
        "series",
        vec![
            OptionValue::object().with(
                "label",
                OptionValue::object().with("formatter", JsCode::new("'{b}: {c}'")),
            ),
            OptionValue::object().with("itemStyle", JsCode::new("new Style()")),
        ],
    );

    let text = Serializer::with_config(SerializerConfig::compact())
        .expect("valid config")
        .serialize(&options)
        .expect("serialize");

    assert_eq!(
        text,
        "{\"series\":[{\"label\":{\"formatter\":'{b}: {c}'}},{\"itemStyle\":new Style()}]}"
    );
}

#[test]
fn derived_structs_with_code_fields_serialize() {
    #[derive(Serialize)]
    struct Tooltip {
        trigger: &'static str,
        formatter: JsCode,
    }

    let tooltip = Tooltip {
        trigger: "axis",
        formatter: JsCode::new("function(params){ return params[0].name; }"),
    };

    let text = to_js_literal(&tooltip).expect("serialize");

    assert_eq!(
        text,
        "{\n  \"trigger\": \"axis\",\n  \"formatter\": function(params){ return params[0].name; }\n}"
    );
}

#[test]
fn decimals_coerce_to_native_numbers() {
    let price = OptionValue::try_from(Decimal::new(12_345, 2)).expect("decimal");
    let count = OptionValue::try_from(Decimal::new(300, 0)).expect("decimal");
    let text = to_js_literal(&vec![price, count]).expect("serialize");
    assert_eq!(text, "[\n  123.45,\n  300\n]");
}

#[test]
fn derived_struct_fields_use_scalar_adapters() {
    #[derive(Serialize)]
    struct Point {
        #[serde(with = "chart_literal::core::primitives::serde_decimal")]
        price: Decimal,
        #[serde(with = "chart_literal::core::primitives::serde_decimal")]
        volume: Decimal,
        #[serde(with = "chart_literal::core::primitives::serde_datetime")]
        day: chrono::NaiveDateTime,
        #[serde(with = "chart_literal::core::primitives::serde_datetime")]
        at: chrono::NaiveDateTime,
    }

    let point = Point {
        price: Decimal::new(12_345, 2),
        volume: Decimal::new(300, 0),
        day: date_time(0, 0, 0),
        at: date_time(9, 30, 0),
    };

    let text = to_js_literal(&point).expect("serialize");

    assert!(text.contains("\"price\": 123.45"), "{text}");
    assert!(text.contains("\"volume\": 300,"), "{text}");
    assert!(text.contains("\"day\": \"2024-03-01\""), "{text}");
    assert!(text.contains("\"at\": \"2024-03-01T09:30:00\""), "{text}");
}

#[test]
fn custom_indent_is_honoured() {
    let serializer = Serializer::with_config(SerializerConfig::default().with_indent(4))
        .expect("valid config");
    let text = serializer
        .serialize(&OptionValue::object().with("a", 1))
        .expect("serialize");
    assert_eq!(text, "{\n    \"a\": 1\n}");
}

#[test]
fn unencodable_values_fail_with_serialization_error() {
    let mut bad = HashMap::new();
    bad.insert((1_u8, 2_u8), "tuple keys are not json keys");

    let err = to_js_literal(&bad).expect_err("must fail");

    assert!(matches!(err, LiteralError::Serialization(_)));
}

#[test]
fn stray_sentinels_in_plain_strings_are_stripped() {
    let options = OptionValue::object().with("name", format!("a{JS_CODE_SENTINEL}b"));
    let text = to_js_literal(&options).expect("serialize");
    assert_eq!(text, "{\n  \"name\": \"ab\"\n}");
}

#[test]
fn oversized_indent_is_rejected() {
    let err = Serializer::with_config(SerializerConfig::default().with_indent(64))
        .expect_err("must fail");
    assert!(matches!(err, LiteralError::InvalidConfig(_)));
}
