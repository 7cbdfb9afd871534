use scatter_runtime::{Batch, CommandOutcome, DisplayPoller, PipelineSettings, WorkerReport};
use serde::Serialize;

pub fn print_info(message: &str) {
    println!("[Scatter][INFO] {message}");
}

pub fn print_warning(message: &str) {
    println!("[Scatter][WARN] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[Scatter][ERROR]: {message}");
}

pub fn print_outcome(outcome: &CommandOutcome) {
    let message = outcome.message();
    if outcome.is_warning() {
        print_warning(&message);
    } else {
        print_info(&message);
    }
    if let CommandOutcome::Stopped(Some(report)) = outcome {
        print_report(report);
    }
}

pub fn print_report(report: &WorkerReport) {
    println!(
        "generated: {}, published: {}, retries: {}",
        report.generated, report.published, report.retries
    );
}

#[derive(Serialize)]
struct DisplayUpdate<'a> {
    update: u64,
    points: &'a Batch,
}

fn axis_bounds(values: impl Iterator<Item = u32>) -> Option<(u32, u32)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub fn print_display(poller: &DisplayPoller, json: bool) {
    let points = poller.display();
    if json {
        let update = DisplayUpdate {
            update: poller.updates(),
            points,
        };
        match serde_json::to_string(&update) {
            Ok(line) => println!("{line}"),
            Err(err) => print_error(&format!("Failed to serialize display update: {err}")),
        }
        return;
    }

    let x = axis_bounds(points.iter().map(|p| p.x));
    let y = axis_bounds(points.iter().map(|p| p.y));
    match (x, y) {
        (Some((x_lo, x_hi)), Some((y_lo, y_hi))) => println!(
            "update #{}: {} points, x {}..={}, y {}..={}",
            poller.updates(),
            points.len(),
            x_lo,
            x_hi,
            y_lo,
            y_hi
        ),
        _ => println!("update #{}: no points", poller.updates()),
    }
}

pub fn print_settings(settings: &PipelineSettings) {
    match serde_json::to_string_pretty(settings) {
        Ok(json) => println!("{json}"),
        Err(err) => print_error(&format!("Failed to serialize settings: {err}")),
    }
}
