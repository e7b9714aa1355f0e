use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use coursecast::prelude::*;

fn synthetic_catalog(n: usize) -> Vec<CourseRecord> {
    let departments = ["CS", "ENGL", "MATH", "PHYS", "ARTH", "MUSC", "HIST", "ECON"];
    let starts = ["8:30am", "9:50am", "11:10am", "1:15pm", "3:10pm"];

    (0..n)
        .map(|i| CourseRecord {
            term: "15WI".to_string(),
            title: format!("Course {i}"),
            department: departments[i % departments.len()].to_string(),
            instructor: format!("Professor {}", i % 40),
            start_time: starts[i % starts.len()].to_string(),
            end_time: "4:30pm".to_string(),
            requirements_met: Some(vec![format!("REQ{}", i % 6)]),
            credits: "6.00".to_string(),
            registered: Some(10 + (i % 25) as u32),
            capacity: Some(30),
            summary: format!("Synthetic section {i}."),
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for n in [500, 2000, 8000].iter() {
        let records = synthetic_catalog(*n);
        let pipeline = Pipeline::new(FeaturePlan::standard());
        let (dataset, _) = pipeline.ingest(records).unwrap();
        let features = pipeline.fit_features(&dataset).unwrap();

        group.bench_with_input(BenchmarkId::new("build_matrix", n), &dataset, |b, ds| {
            b.iter(|| pipeline.feature_matrix(&features, black_box(ds)).unwrap())
        });
    }

    group.finish();
}

fn bench_cross_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_validation");
    group.sample_size(10);

    let records = synthetic_catalog(2000);
    let pipeline = Pipeline::new(FeaturePlan::standard());
    let (dataset, _) = pipeline.ingest(records).unwrap();
    let features = pipeline.fit_features(&dataset).unwrap();
    let mut matrix = pipeline.feature_matrix(&features, &dataset).unwrap();
    standardize(&mut matrix).unwrap();
    let targets = dataset.target_array();
    let config = CvConfig::new().with_trials(10).with_seed(42);

    group.bench_function("linear_10_trials", |b| {
        b.iter(|| {
            cross_validate(
                black_box(&matrix),
                black_box(&targets),
                LinearRegression::new,
                &config,
            )
            .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_cross_validation);
criterion_main!(benches);
