//! Benchmarks for the form state engine.
//!
//! These benchmarks measure the cost of path-local value tree rebuilds and
//! whole-tree validation passes, the operations that run per keystroke and
//! per blur. The form module is compiled in directly because the crate only
//! ships a binary target.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[path = "../src/form/mod.rs"]
mod form;

use form::{FieldPath, Form, SubmitFn, Submission, ValidationResult, Value};

fn user_values() -> Value {
    Value::group([
        ("name", Value::text("Ada Lovelace")),
        ("username", Value::text("ada")),
        ("email", Value::text("ada@example.com")),
        ("phone", Value::text("1-770-736-8031")),
        ("website", Value::text("ada.example.com")),
        (
            "address",
            Value::group([
                ("street", Value::text("Kulas Light")),
                ("suite", Value::text("Apt. 556")),
                ("city", Value::text("Gwenborough")),
                ("zipcode", Value::text("92998-3874")),
                (
                    "geo",
                    Value::group([
                        ("lat", Value::text("-37.3159")),
                        ("lng", Value::text("81.1496")),
                    ]),
                ),
            ]),
        ),
        (
            "company",
            Value::group([
                ("name", Value::text("Romaguera-Crona")),
                ("catch_phrase", Value::text("Multi-layered client-server neural-net")),
                ("bs", Value::text("harness real-time e-markets")),
            ]),
        ),
    ])
}

fn noop_submit() -> SubmitFn {
    Box::new(|_| Box::pin(async { Ok(()) }))
}

fn require_contact_fields(values: &Value) -> ValidationResult {
    let mut errors = ValidationResult::new();
    for field in ["name", "username", "email"] {
        let empty = values
            .text_at(&FieldPath::new(field))
            .map_or(true, str::is_empty);
        if empty {
            errors.insert(field.to_string(), format!("{} is required", field));
        }
    }
    errors
}

fn bench_set_field_deep(c: &mut Criterion) {
    let mut form = Form::new(user_values(), None, noop_submit());
    let path = FieldPath::new("address.geo.lat");
    c.bench_function("set_field_three_levels_deep", |b| {
        b.iter(|| form.set_field(black_box(&path), Value::text("51.5072")))
    });
}

fn bench_set_field_top_level(c: &mut Criterion) {
    let mut form = Form::new(user_values(), None, noop_submit());
    let path = FieldPath::new("name");
    c.bench_function("set_field_top_level", |b| {
        b.iter(|| form.set_field(black_box(&path), Value::text("Grace Hopper")))
    });
}

fn bench_validation_pass(c: &mut Criterion) {
    let values = user_values();
    c.bench_function("whole_tree_validation_pass", |b| {
        b.iter(|| require_contact_fields(black_box(&values)))
    });
}

fn bench_rejected_submit(c: &mut Criterion) {
    let empty = user_values().with(&FieldPath::new("name"), Value::text(""));
    let mut form = Form::new(
        empty,
        Some(Box::new(require_contact_fields)),
        noop_submit(),
    );
    c.bench_function("rejected_submit_full_cycle", |b| {
        b.iter(|| match form.submit() {
            Submission::Rejected => (),
            Submission::Pending(_) => unreachable!("validator reports an error"),
        })
    });
}

criterion_group!(
    benches,
    bench_set_field_deep,
    bench_set_field_top_level,
    bench_validation_pass,
    bench_rejected_submit
);
criterion_main!(benches);
