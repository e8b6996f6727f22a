use chart_literal::{JsCode, OptionValue, parse_js_literal, to_js_literal};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn build_options(points: usize) -> OptionValue {
    let data: Vec<OptionValue> = (0..points)
        .map(|i| {
            OptionValue::from(vec![
                OptionValue::from(i),
                OptionValue::from(100.0 + i as f64 * 0.05),
            ])
        })
        .collect();

    OptionValue::object()
        .with(
            "tooltip",
            OptionValue::object().with(
                "formatter",
                JsCode::new("function (p) { return p.name + \": \" + p.value; }"),
            ),
        )
        .with(
            "series",
            vec![
                OptionValue::object()
                    .with("type", "line")
                    .with("data", data)
                    .with("symbolSize", JsCode::new("function (v) { return v[1] / 10; }")),
            ],
        )
}

fn bench_serialize_10k_points(c: &mut Criterion) {
    let options = build_options(10_000);

    c.bench_function("serialize_10k_points", |b| {
        b.iter(|| {
            let _ = to_js_literal(black_box(&options)).expect("serialize");
        })
    });
}

fn bench_parse_example_literal(c: &mut Criterion) {
    let text = to_js_literal(&build_options(500)).expect("serialize");

    c.bench_function("parse_500_point_literal", |b| {
        b.iter(|| {
            let _ = parse_js_literal(black_box(&text), false).expect("parse");
        })
    });
}

criterion_group!(benches, bench_serialize_10k_points, bench_parse_example_literal);
criterion_main!(benches);
