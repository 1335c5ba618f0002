//! Accumulation model: turn per-interval samples into running totals.

use crate::error::{ProfileError, Result};
use crate::log::{RawLog, Sample};
use serde::Serialize;
use std::path::PathBuf;

/// Running totals as of one emitted sample. `time` is relative to the first sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccumulatedSample {
    pub time: i64,
    pub minor_faults: i64,
    pub major_faults: i64,
    pub cpu_time: i64,
}

/// Cumulative time series derived from one log. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    path: PathBuf,
    rows: Vec<AccumulatedSample>,
    raw_samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub path: String,
    pub raw_samples: usize,
    pub rows: usize,
    pub elided: usize,
    pub duration: i64,
    pub total_minor_faults: i64,
    pub total_major_faults: i64,
    pub total_cpu_time: i64,
    /// None when the series spans zero time.
    pub cpu_utilization: Option<f64>,
}

/// Build the cumulative series of `log`.
///
/// The first sample is always emitted, with time 0 and its counters as the
/// starting totals. Later samples whose counters sum to zero are dropped;
/// every other sample advances the time and adds its counters.
pub fn accumulate(log: &RawLog) -> Result<Series> {
    let Some((first, rest)) = log.samples.split_first() else {
        return Err(ProfileError::EmptyInput {
            path: log.path.clone(),
        });
    };

    let t0 = first.time;
    let mut cur = AccumulatedSample {
        time: 0,
        minor_faults: first.minor_faults,
        major_faults: first.major_faults,
        cpu_time: first.cpu_time,
    };

    let mut rows = Vec::with_capacity(log.samples.len());
    rows.push(cur);

    for (idx, sample) in rest.iter().enumerate() {
        if sample.activity() == 0 {
            continue;
        }
        let Sample {
            time,
            minor_faults,
            major_faults,
            cpu_time,
        } = *sample;

        let overflow = || ProfileError::Overflow {
            path: log.path.clone(),
            sample: idx + 2,
        };
        cur.time = time.checked_sub(t0).ok_or_else(overflow)?;
        cur.minor_faults = cur.minor_faults.checked_add(minor_faults).ok_or_else(overflow)?;
        cur.major_faults = cur.major_faults.checked_add(major_faults).ok_or_else(overflow)?;
        cur.cpu_time = cur.cpu_time.checked_add(cpu_time).ok_or_else(overflow)?;
        rows.push(cur);
    }

    if log
        .samples
        .iter()
        .any(|s| s.minor_faults < 0 || s.major_faults < 0 || s.cpu_time < 0)
    {
        tracing::warn!(
            path = %log.path.display(),
            "negative counters in profile log; running totals are not monotonic"
        );
    }

    Ok(Series {
        path: log.path.clone(),
        rows,
        raw_samples: log.samples.len(),
    })
}

impl Series {
    pub fn rows(&self) -> &[AccumulatedSample] {
        &self.rows
    }

    pub fn first(&self) -> &AccumulatedSample {
        &self.rows[0]
    }

    pub fn last(&self) -> &AccumulatedSample {
        &self.rows[self.rows.len() - 1]
    }

    /// Time covered between the first and the last emitted row.
    pub fn duration(&self) -> i64 {
        self.last().time - self.first().time
    }

    /// Accumulated CPU time divided by the time the series spans.
    pub fn cpu_utilization(&self) -> Result<f64> {
        let duration = self.duration();
        if duration == 0 {
            return Err(ProfileError::DegenerateDuration {
                path: self.path.clone(),
            });
        }
        Ok(self.last().cpu_time as f64 / duration as f64)
    }

    /// `(time, minor faults)` pairs for the page-fault-over-time view.
    pub fn fault_points(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.rows().iter().map(|r| (r.time, r.minor_faults))
    }

    pub fn summary(&self) -> SeriesSummary {
        let last = self.last();
        SeriesSummary {
            path: self.path.display().to_string(),
            raw_samples: self.raw_samples,
            rows: self.rows().len(),
            elided: self.raw_samples - self.rows().len(),
            duration: self.duration(),
            total_minor_faults: last.minor_faults,
            total_major_faults: last.major_faults,
            total_cpu_time: last.cpu_time,
            cpu_utilization: self.cpu_utilization().ok(),
        }
    }
}
