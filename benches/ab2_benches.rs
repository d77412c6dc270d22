use RustedAdams::numerical::AB2::integrate;
use RustedAdams::numerical::ODE_api::calculate;
use RustedAdams::symbolic::normalize::normalize;
use RustedAdams::symbolic::symbolic_lambdify::compile;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_full_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize-compile-integrate");
    for expression in ["x + y", "3xy + sin(x)", "2x^2 + 4y - e^(x/10)"] {
        group.bench_function(expression, |b| {
            b.iter(|| calculate(black_box(expression), 0.0, 1.0, 0.001, 1000))
        });
    }
    group.finish();
}

fn bench_integrate_compiled(c: &mut Criterion) {
    let function = match compile(&normalize("3xy + sin(x)")) {
        Ok(function) => function,
        Err(e) => panic!("benchmark expression does not compile: {}", e),
    };
    c.bench_function("AB2 1000 steps, compiled rhs", |b| {
        b.iter(|| integrate(function.lambdify(), 0.0, black_box(1.0), 0.001, 1000))
    });
}

fn bench_integrate_closure(c: &mut Criterion) {
    c.bench_function("AB2 1000 steps, native closure", |b| {
        b.iter(|| integrate(|x, y| Ok(x + y), 0.0, black_box(1.0), 0.001, 1000))
    });
}

criterion_group!(
    benches,
    bench_full_chain,
    bench_integrate_compiled,
    bench_integrate_closure
);
criterion_main!(benches);
