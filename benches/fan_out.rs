use criterion::{Criterion, criterion_group, criterion_main};
use shared_config::{Field, SharedConfigStore};
use std::hint::black_box;

fn set_with_subscribers(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_fan_out");
    for subscribers in [0usize, 1, 16, 256] {
        let store = SharedConfigStore::new();
        let subs: Vec<_> = (0..subscribers)
            .map(|_| store.subscribe(Field::TimeSpanMinutes, |value| {
                let _ = black_box(value);
            }))
            .collect();

        group.bench_function(format!("{subscribers}_subscribers"), |b| {
            let mut minutes = 0i64;
            b.iter(|| {
                minutes += 1;
                store.set_time_span_minutes(black_box(minutes));
            })
        });
        drop(subs);
    }
    group.finish();
}

criterion_group!(benches, set_with_subscribers);
criterion_main!(benches);
