//! Benchmarks for member resolution and dispatch.
//!
//! ```bash
//! cargo bench --bench member_resolution
//! ```

use classmodel::fixtures::example1;
use classmodel::{Module, Runtime};
use classmodel_core::{MethodEntry, Value};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn runtime() -> Runtime {
    let mut module = Module::new(&["LibClasses", "SUB"]);
    let v = module
        .class("V")
        .with_method(MethodEntry::static_("static_fun", 0, |_| Ok(Value::Int(1))));
    module.add(v);

    let mut runtime = Runtime::new();
    runtime.install(example1::module()).unwrap();
    runtime.install(module).unwrap();
    runtime
}

fn bench_static(c: &mut Criterion) {
    let mut group = c.benchmark_group("static");

    let mut rt = runtime();
    group.bench_function("read_field", |b| {
        b.iter(|| black_box(example1::read_static_field(&rt).unwrap()))
    });

    group.bench_function("call_delegating", |b| {
        b.iter(|| {
            let result = example1::call_static_method(&mut rt).unwrap();
            rt.take_output();
            black_box(result)
        })
    });

    group.finish();
}

fn bench_instance(c: &mut Criterion) {
    let mut group = c.benchmark_group("instance");

    let mut rt = runtime();
    group.bench_function("construct_release", |b| {
        b.iter(|| {
            let a = example1::construct(&mut rt).unwrap();
            rt.release(black_box(a))
        })
    });

    let a = example1::construct(&mut rt).unwrap();
    group.bench_function("set_get", |b| {
        b.iter(|| {
            example1::set_value(&mut rt, a, Value::Int(3)).unwrap();
            let v = example1::get_value(&mut rt, a).unwrap();
            rt.take_output();
            black_box(v)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_static, bench_instance);
criterion_main!(benches);
