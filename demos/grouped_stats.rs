//! Grouped enrollment statistics over a synthetic catalog
//!
//! The descriptive half of the analysis: dataset totals, then average fill
//! ratio by department and by distribution requirement.

use coursecast::prelude::*;
use coursecast::stats;

fn synthetic_catalog() -> Vec<CourseRecord> {
    let specs: [(&str, &[&str], u32, u32); 8] = [
        ("CS", &["FSR", "QRE"], 30, 30),
        ("CS", &["FSR"], 33, 30),
        ("ENGL", &["LA", "WR"], 24, 30),
        ("ENGL", &["LA"], 27, 30),
        ("MATH", &["FSR", "QRE"], 18, 30),
        ("PHYS", &["LS"], 15, 30),
        ("ARTH", &["LA"], 12, 30),
        ("MUSC", &[], 9, 30),
    ];

    specs
        .iter()
        .enumerate()
        .map(|(i, (dept, reqs, registered, capacity))| CourseRecord {
            term: "15WI".to_string(),
            title: format!("{dept} {}", 100 + i),
            department: dept.to_string(),
            instructor: format!("Professor {i}"),
            start_time: "9:50am".to_string(),
            end_time: "11:00am".to_string(),
            requirements_met: Some(reqs.iter().map(|s| s.to_string()).collect()),
            credits: "6.00".to_string(),
            registered: Some(*registered),
            capacity: Some(*capacity),
            summary: format!("A course in {dept}."),
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

    let pipeline = Pipeline::new(FeaturePlan::standard());
    let (dataset, _stats) = pipeline.ingest(synthetic_catalog())?;

    let summary = dataset.summary();
    println!("===== Initial Analysis =====\n");
    println!("Number of courses: {}", summary.courses);
    println!("Courses filled to capacity: {}", summary.filled_to_capacity);
    println!("Average enrollment rate: {:.3}\n", summary.mean_fill);

    println!("===== Average Enrollment by Department =====\n");
    for stat in stats::mean_by_group(&dataset, |r| Some(r.department.clone())) {
        println!("{:<8} {:.3}  ({} sections)", stat.key, stat.mean, stat.count);
    }

    println!("\n===== Average Enrollment by Distribution Requirement =====\n");
    for stat in stats::mean_by_groups(&dataset, |r| {
        r.requirements_met.clone().unwrap_or_default()
    }) {
        println!("{:<8} {:.3}  ({} sections)", stat.key, stat.mean, stat.count);
    }

    Ok(())
}
