use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_milli_opt(8, 0, 0, 0)
        .unwrap()
}

/// One request every `step_ms`.
pub fn uniform_arrivals(count: usize, step_ms: i64) -> Vec<NaiveDateTime> {
    (1..=count as i64)
        .map(|i| start() + TimeDelta::milliseconds(i * step_ms))
        .collect()
}

/// Poisson arrivals: exponential gaps with mean `mean_ms`, microsecond precision.
pub fn exponential_arrivals(count: usize, mean_ms: f64, seed: u64) -> Vec<NaiveDateTime> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut elapsed_ms = 0.0_f64;

    (0..count)
        .map(|_| {
            let u: f64 = rng.random();
            elapsed_ms += -mean_ms * (1.0 - u).ln();
            start() + TimeDelta::microseconds((elapsed_ms * 1000.0) as i64)
        })
        .collect()
}

/// A line as a load generator would log it, with a microsecond timestamp.
pub fn format_line(i: usize, ts: &NaiveDateTime) -> String {
    format!(
        "{} INFO loadgen: request {i} sent",
        ts.format("%Y-%m-%d %H:%M:%S%.6f")
    )
}

/// A request log written to a temporary directory, removed on drop.
pub struct LoadgenLog {
    _dir: TempDir,
    path: PathBuf,
}

impl LoadgenLog {
    pub fn write(points: &[NaiveDateTime]) -> Self {
        let lines: Vec<String> = points
            .iter()
            .enumerate()
            .map(|(i, ts)| format_line(i, ts))
            .collect();
        Self::write_lines(&lines)
    }

    pub fn write_lines(lines: &[String]) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("loadgen.log");

        let mut body = lines.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(&path, body).expect("failed to write loadgen log");

        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
