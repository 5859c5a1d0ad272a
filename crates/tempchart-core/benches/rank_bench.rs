use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};
use tempchart_core::{Ranker, Row};

fn gen_rows(n: usize) -> Vec<Row> {
    let mut v = Vec::with_capacity(n + 1);
    v.push(Row::new("World").with_value(2018, 0.9).with_value(2022, 1.1));
    for i in 0..n {
        // simple waveform with drift, every 7th cell missing
        let y = (i as f64 * 0.01).sin() * 2.0 + (i as f64 * 0.0001);
        let mut r = Row::new(format!("E{i}"));
        for year in 2018..=2022 {
            let value = if (i + year as usize) % 7 == 0 { f64::NAN } else { y + year as f64 * 0.01 };
            r.set_value(year, value);
        }
        v.push(r);
    }
    v
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let ranker = Ranker::default();
    for &n in &[250usize, 5_000usize] {
        let rows = gen_rows(n);
        group.bench_with_input(BenchmarkId::from_parameter(format!("rows{n}")), &n, |b, _| {
            b.iter_batched(
                || rows.clone(),
                |r| { let _ = black_box(ranker.history(&r, &[2018, 2019, 2020, 2021, 2022])); },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
