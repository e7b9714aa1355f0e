//! Model comparison over a synthetic course catalog
//!
//! Builds a small synthetic record set, runs the full pipeline with each
//! bundled regressor, and prints per-model cross-validated error.

use coursecast::prelude::*;

fn synthetic_catalog() -> Vec<CourseRecord> {
    let departments = ["CS", "ENGL", "MATH", "PHYS", "ARTH"];
    let starts = ["8:30am", "9:50am", "11:10am", "1:15pm", "3:10pm"];
    let requirements = [
        vec!["FSR"],
        vec!["LA", "WR"],
        vec!["FSR", "QRE"],
        vec![],
        vec!["HI"],
    ];

    (0..60)
        .map(|i| {
            let dept = departments[i % departments.len()];
            let start = starts[i % starts.len()];
            // Popular departments fill up; the rest trail off.
            let registered = match dept {
                "CS" => 28 + (i % 5) as u32,
                "ENGL" => 24 + (i % 4) as u32,
                _ => 12 + (i % 10) as u32,
            };
            CourseRecord {
                term: "15WI".to_string(),
                title: format!("{dept} {}", 100 + i),
                department: dept.to_string(),
                instructor: format!("Professor {}", i % 12),
                start_time: start.to_string(),
                end_time: "4:30pm".to_string(),
                requirements_met: Some(
                    requirements[i % requirements.len()]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                ),
                credits: "6.00".to_string(),
                registered: Some(registered),
                capacity: Some(30),
                summary: format!("A course in {dept} with substantial writing."),
            }
        })
        .collect()
}

fn main() -> coursecast::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursecast=info".into()),
        )
        .init();

    let records = synthetic_catalog();
    let config = CvConfig::new().with_trials(10).with_seed(42);

    println!("{:<25} {:>12} {:>12}", "Model", "Best RMSE", "Mean RMSE");
    println!("{}", "-".repeat(52));

    let pipeline = Pipeline::new(FeaturePlan::standard());

    let run = pipeline.run(records.clone(), MeanRegressor::new, &config)?;
    println!(
        "{:<25} {:>12.4} {:>12.4}",
        "Mean baseline", run.report.best, run.report.mean
    );

    let run = pipeline.run(records.clone(), LinearRegression::new, &config)?;
    println!(
        "{:<25} {:>12.4} {:>12.4}",
        "Linear regression", run.report.best, run.report.mean
    );

    let run = pipeline.run(records.clone(), || RidgeRegression::new(1.0), &config)?;
    println!(
        "{:<25} {:>12.4} {:>12.4}",
        "Ridge (alpha=1)", run.report.best, run.report.mean
    );

    let run = pipeline.run(records, || KnnRegressor::new(5), &config)?;
    println!(
        "{:<25} {:>12.4} {:>12.4}",
        "KNN (k=5)", run.report.best, run.report.mean
    );

    Ok(())
}
