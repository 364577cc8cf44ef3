use criterion::{criterion_group, criterion_main, Criterion};
use rootfit::{
    data::Measurement,
    display::Variables,
    pipeline::Pipeline,
    test::{grid, steps},
    MonomialSurfaceFit,
};
use std::hint::black_box;

/// A smooth surface over the measurement range, sampled on a `side x side` grid.
fn gen_sample_data(side: usize) -> Vec<Measurement> {
    grid(&steps(0.0, 8.0, side), &steps(7.5, 12.5, side), |d, v| {
        (d / v).atan().to_degrees() + 0.5 * d * d / v
    })
}

fn fit(data: &[Measurement], degree: usize) -> MonomialSurfaceFit<'_> {
    MonomialSurfaceFit::new(data, degree).expect("Failed to fit data")
}

fn criterion_benchmark(c: &mut Criterion) {
    //
    // First we test how the solver scales with data size
    println!("Benchmarking fit vs n (Degree=8)...");
    test_criterion_group(
        c,
        "fit_vs_n",
        &[
            CriterionTestEntry::new("n=100", gen_sample_data(10)),
            CriterionTestEntry::new("n=2_500", gen_sample_data(50)),
            CriterionTestEntry::new("n=10_000", gen_sample_data(100)),
            CriterionTestEntry::new("n=40_000", gen_sample_data(200)),
        ],
        |b, data| b.iter(|| fit(black_box(data), 8)),
    );

    //
    // Now the same but scaling with degree
    println!("Benchmarking fit vs degree (n=4131)...");
    let samples = grid::<f64>(&steps(0.0, 8.0, 81), &steps(7.5, 12.5, 51), |d, v| {
        (d / v).atan().to_degrees() + 0.5 * d * d / v
    });
    test_criterion_group(
        c,
        "fit_vs_degree",
        &[
            CriterionTestEntry::new("Degree=1", (1, &samples)),
            CriterionTestEntry::new("Degree=2", (2, &samples)),
            CriterionTestEntry::new("Degree=4", (4, &samples)),
            CriterionTestEntry::new("Degree=8", (8, &samples)),
            CriterionTestEntry::new("Degree=12", (12, &samples)),
        ],
        |b, (degree, data)| b.iter(|| fit(black_box(data), *degree)),
    );

    //
    // And the whole run, including formatting the equation
    let pipeline = Pipeline::new(8, Variables::default()).expect("Invalid pipeline");
    let mut group = c.benchmark_group("pipeline");
    group.bench_function("run", |b| {
        b.iter(|| pipeline.run(black_box(&samples)).expect("Failed to run"))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

struct CriterionTestEntry<V> {
    id: String,
    values: V,
}
impl<V> CriterionTestEntry<V> {
    pub fn new(id: &str, values: V) -> Self {
        Self {
            id: id.to_string(),
            values,
        }
    }
}

fn test_criterion_group<F, V>(c: &mut Criterion, id: &str, samples: &[CriterionTestEntry<V>], runner: F)
where
    for<'a, 'b, 'c> F: Fn(&'a mut criterion::Bencher<'b>, &'c V),
{
    let mut group = c.benchmark_group(id);
    for sample in samples {
        group.bench_with_input(&sample.id, &sample.values, &runner);
    }
    group.finish();
}
