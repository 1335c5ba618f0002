//! Chart values handed to the renderers.
//!
//! A chart is plain data: building one touches no drawing backend, so the
//! two views can be checked without producing any output.

use crate::error::Result;
use crate::log::{parse_log_file, run_parameter};
use crate::model::{Series, accumulate};
use serde::Serialize;
use std::path::Path;

pub const TIME_LABEL: &str = "Time/jiffies";
pub const PAGE_FAULT_LABEL: &str = "Page Fault";
pub const MULTIPROGRAMMING_TITLE: &str = "Case 2: Multiprogramming";
pub const PROCESS_COUNT_LABEL: &str = "N (number of process-5)";
pub const CPU_UTILIZATION_LABEL: &str = "CPU utilization/%";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub subtitle: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

/// Inclusive bounds of the points, padded so single points and flat series
/// still get a non-empty range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ScatterChart {
    pub fn bounds(&self) -> Bounds {
        let (x_min, x_max) = padded_range(self.points.iter().map(|p| p.0));
        let (y_min, y_max) = padded_range(self.points.iter().map(|p| p.1));
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        lo.abs().max(1.0) * 0.5
    };
    (lo - pad, hi + pad)
}

/// Page faults accumulated over time for one run.
pub fn thrashing_chart(series: &Series, title: &str, description: &str) -> ScatterChart {
    ScatterChart {
        title: title.to_string(),
        subtitle: (!description.is_empty()).then(|| description.to_string()),
        x_label: TIME_LABEL.to_string(),
        y_label: PAGE_FAULT_LABEL.to_string(),
        points: series
            .fault_points()
            .map(|(t, faults)| (t as f64, faults as f64))
            .collect(),
    }
}

/// One point of the multiprogramming view.
#[derive(Debug, Clone, PartialEq)]
pub struct RunUtilization {
    pub processes: u32,
    pub cpu_utilization: f64,
}

/// Read, accumulate and reduce one log to its utilization point.
pub fn run_utilization(path: impl AsRef<Path>) -> Result<RunUtilization> {
    let path = path.as_ref();
    // Validate the name before touching the file.
    let processes = run_parameter(path)?;
    let series = accumulate(&parse_log_file(path)?)?;
    let cpu_utilization = series.cpu_utilization()?;

    tracing::debug!(
        path = %path.display(),
        processes,
        cpu_utilization,
        "computed run utilization"
    );

    Ok(RunUtilization {
        processes,
        cpu_utilization,
    })
}

/// CPU utilization against the number of processes, one point per log, in input order.
pub fn multiprogramming_chart<P: AsRef<Path>>(paths: &[P], title: &str) -> Result<ScatterChart> {
    let runs = paths
        .iter()
        .map(|p| run_utilization(p))
        .collect::<Result<Vec<_>>>()?;
    Ok(utilization_chart(&runs, title))
}

pub fn utilization_chart(runs: &[RunUtilization], title: &str) -> ScatterChart {
    ScatterChart {
        title: title.to_string(),
        subtitle: None,
        x_label: PROCESS_COUNT_LABEL.to_string(),
        y_label: CPU_UTILIZATION_LABEL.to_string(),
        points: runs
            .iter()
            .map(|r| (r.processes as f64, r.cpu_utilization))
            .collect(),
    }
}
