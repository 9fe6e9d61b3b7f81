//! Bit-ceiling strategy benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use boundkit_core::bits;

fn bench_bit_ceil_strategies(c: &mut Criterion) {
    let inputs: &[usize] = &[1, 5, 1023, 1 << 20, bits::MAX_POWER - 1];
    let mut group = c.benchmark_group("bit_ceil");

    for &(name, f) in bits::STRATEGIES {
        group.bench_with_input(BenchmarkId::new(name, "sweep"), &inputs, |b, inputs| {
            b.iter(|| {
                for &n in *inputs {
                    black_box(f(black_box(n)));
                }
            });
        });
    }
    group.finish();
}

fn bench_is_power_of_two(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_power_of_two");
    group.bench_function("mixed", |b| {
        b.iter(|| {
            for n in [0usize, 1, 7, 4096, bits::MAX_POWER, usize::MAX] {
                black_box(bits::is_power_of_two(black_box(n)));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_bit_ceil_strategies, bench_is_power_of_two);
criterion_main!(benches);
