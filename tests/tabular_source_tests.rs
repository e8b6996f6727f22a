use chart_literal::{Frame, LiteralError, OptionValue, Series, TabularSource, to_js_literal};

fn sales_frame() -> Frame {
    Frame::new(
        vec!["day".to_owned(), "sales".to_owned()],
        vec![
            vec![OptionValue::from("Mon"), OptionValue::from(120)],
            vec![OptionValue::from("Tue"), OptionValue::from(200)],
        ],
    )
    .expect("valid frame")
}

#[test]
fn frame_flattens_to_ordered_records() {
    let source = TabularSource::from(sales_frame());
    let rows = source.to_sequence();

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        OptionValue::object().with("day", "Tue").with("sales", 200)
    );
}

#[test]
fn frame_column_extracts_series() {
    let frame = sales_frame();
    let series = frame.column("sales").expect("column exists");

    assert_eq!(series.name(), "sales");
    assert_eq!(series.values(), [OptionValue::Int(120), OptionValue::Int(200)]);
    assert!(frame.column("missing").is_none());
}

#[test]
fn ragged_frames_are_rejected() {
    let err = Frame::new(
        vec!["a".to_owned(), "b".to_owned()],
        vec![vec![OptionValue::Int(1)]],
    )
    .expect_err("must fail");

    assert!(matches!(err, LiteralError::InvalidData(_)));
    assert!(format!("{err}").contains("row 0 has 1 cells, expected 2"));
}

#[test]
fn duplicate_columns_are_rejected() {
    let err = Frame::new(vec!["a".to_owned(), "a".to_owned()], Vec::new()).expect_err("must fail");
    assert!(format!("{err}").contains("column `a` is duplicated"));
}

#[test]
fn series_and_arrays_flatten_to_values() {
    let series = Series::new("v", vec![OptionValue::Float(1.5), OptionValue::Null]);
    assert_eq!(
        TabularSource::from(series).to_sequence(),
        vec![OptionValue::Float(1.5), OptionValue::Null]
    );
    assert_eq!(
        TabularSource::from(vec![3, 4]).to_option_value(),
        OptionValue::from(vec![3, 4])
    );
}

#[test]
fn series_pairs_zip_with_index() {
    let series = Series::new("v", vec![OptionValue::Int(10), OptionValue::Int(20)]);
    let index = vec![OptionValue::from("a"), OptionValue::from("b"), OptionValue::from("c")];

    assert_eq!(
        series.pairs(&index),
        vec![
            OptionValue::from(vec![OptionValue::from("a"), OptionValue::Int(10)]),
            OptionValue::from(vec![OptionValue::from("b"), OptionValue::Int(20)]),
        ]
    );
}

#[test]
fn frame_records_feed_the_serializer() {
    let source = TabularSource::from(sales_frame()).to_option_value();
    let options = OptionValue::object().with("dataset", OptionValue::object().with("source", source));

    let text = to_js_literal(&options).expect("serialize");

    assert!(text.contains("\"day\": \"Mon\""));
    assert!(text.contains("\"sales\": 200"));
}
