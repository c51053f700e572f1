// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use envelope_gateway::http::{failure_message, to_form_string};
use envelope_gateway::{url_to_https, Environment};
use serde_json::json;

fn url_upgrade_benchmark(c: &mut Criterion) {
    let production = Environment::production("https://app.example.com/#/orders");
    let development = Environment::default();

    c.bench_function("url_to_https_production", |b| {
        b.iter(|| url_to_https(black_box("http://api.example.com/orders?page=1"), &production))
    });

    c.bench_function("url_to_https_development", |b| {
        b.iter(|| url_to_https(black_box("http://api.example.com/orders?page=1"), &development))
    });
}

fn form_encoding_benchmark(c: &mut Criterion) {
    let payload = json!({
        "username": "li lei",
        "password": "p@ss word",
        "filter": {"status": "open", "tags": ["a", "b", "c"]},
    });

    c.bench_function("to_form_string_nested", |b| {
        b.iter(|| to_form_string(black_box(&payload)))
    });
}

fn failure_body_benchmark(c: &mut Criterion) {
    let body = br#"{"code":500,"message":"database unavailable","data":null}"#;

    c.bench_function("failure_message", |b| {
        b.iter(|| failure_message(black_box(body)))
    });
}

criterion_group!(
    benches,
    url_upgrade_benchmark,
    form_encoding_benchmark,
    failure_body_benchmark
);
criterion_main!(benches);
