use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cepflow_core::Value;
use cepflow_functions::{
    ADDITION, ArgumentPlaceholder, Constant, CumulativeFunction, Function, FunctionTree,
    MULTIPLICATION, SQUARE_ROOT,
};

/// `√(($0 + 3) × $1)`
fn sample_tree() -> FunctionTree {
    let sum = FunctionTree::binary(ADDITION, ArgumentPlaceholder::new(0), Constant::new(3))
        .expect("valid sum");
    let product =
        FunctionTree::binary(MULTIPLICATION, sum, ArgumentPlaceholder::new(1)).expect("valid product");
    FunctionTree::unary(SQUARE_ROOT, product).expect("valid root")
}

fn bench_checked_vs_fast(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_evaluation");
    group.throughput(Throughput::Elements(1));
    let inputs = [Value::Int(6), Value::Float(4.0)];

    let mut checked = sample_tree();
    group.bench_function("checked", |b| {
        b.iter(|| checked.evaluate(black_box(&inputs), None).expect("evaluates"))
    });

    let mut fast = sample_tree();
    group.bench_function("fast", |b| {
        b.iter(|| fast.evaluate_fast(black_box(&inputs), None).expect("evaluates"))
    });

    group.finish();
}

fn bench_cumulative_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("cumulative_fold");

    for len in [100usize, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*len as u64));
        group.bench_with_input(BenchmarkId::new("running_sum", len), len, |b, &len| {
            b.iter(|| {
                let mut sum = CumulativeFunction::new(ADDITION).expect("binary combine");
                let mut last = Vec::new();
                for i in 0..len as i64 {
                    last = sum.evaluate_fast(&[Value::Int(i)], None).expect("evaluates");
                }
                black_box(last)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_checked_vs_fast, bench_cumulative_fold);
criterion_main!(benches);
