use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use parabim_mesh_core::{AttributeBufferSet, BufferConfig};

fn fill(slots: usize, config: BufferConfig) -> AttributeBufferSet {
    let mut set =
        AttributeBufferSet::with_attributes(config, ["position", "normal"]).expect("buffer set");
    for i in 0..slots {
        let v = i as f32;
        set.push_slot(&[&[v, v, v], &[0.0, 0.0, 1.0]])
            .expect("push");
    }
    set
}

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_slot");
    for slots in [1_000usize, 10_000, 50_000] {
        group.bench_with_input(BenchmarkId::from_parameter(slots), &slots, |b, &n| {
            b.iter(|| black_box(fill(n, BufferConfig::default())))
        });
    }
    group.finish();
}

fn bench_bulk_resize(c: &mut Criterion) {
    c.bench_function("resize_then_rebuild", |b| {
        let mut set = fill(10_000, BufferConfig::default());
        b.iter(|| {
            set.reset_attributes();
            set.resize_if_needed(black_box(10_000));
            black_box(set.capacity())
        })
    });
}

criterion_group!(benches, bench_push, bench_bulk_resize);
criterion_main!(benches);
