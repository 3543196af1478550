use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lisp_list::{count_tokens, from_str, parse, to_string, tokenize, PrintOptions};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn nested(depth: usize) -> String {
    let mut text = String::new();
    for i in 0..depth {
        text.push_str(&format!("(level {} \"quoted \\\" text\" ", i));
    }
    text.push_str("leaf");
    text.push_str(&")".repeat(depth));
    text
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&products(*size)).unwrap();

        group.bench_with_input(BenchmarkId::new("count", size), &text, |b, text| {
            b.iter(|| count_tokens(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("fill", size), &text, |b, text| {
            b.iter(|| tokenize(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::new("flat", size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }

    for depth in [8, 64, 256].iter() {
        let text = nested(*depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_query(c: &mut Criterion) {
    let text = to_string(&products(100)).unwrap();
    let root = parse(&text).unwrap().unwrap();
    let list = &root[0];

    c.bench_function("lookup_last_key", |b| {
        b.iter(|| list[99].get(black_box("quantity")))
    });

    c.bench_function("coerce_all_prices", |b| {
        b.iter(|| {
            list.iter()
                .filter_map(|p| p.get("price").and_then(|n| n.parse_value()))
                .count()
        })
    });
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let text = to_string(&products(100)).unwrap();
    let root = parse(&text).unwrap().unwrap();
    let pretty = PrintOptions::pretty().with_indent(2);

    group.bench_function("lisp_verbatim", |b| {
        b.iter(|| root.to_lisp(black_box(&PrintOptions::new())))
    });
    group.bench_function("lisp_pretty", |b| b.iter(|| root.to_lisp(black_box(&pretty))));
    group.bench_function("json", |b| b.iter(|| root.to_json()));

    group.finish();
}

fn benchmark_serde(c: &mut Criterion) {
    let mut group = c.benchmark_group("serde");

    for size in [10, 100, 500].iter() {
        let data = products(*size);
        let text = to_string(&data).unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", size), &data, |b, data| {
            b.iter(|| to_string(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("deserialize", size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_parse,
    benchmark_query,
    benchmark_render,
    benchmark_serde
);
criterion_main!(benches);
