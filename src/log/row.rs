use std::path::PathBuf;

/// One line of the profiler log: a jiffies timestamp and the counters
/// collected during that sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub time: i64,
    pub minor_faults: i64,
    pub major_faults: i64,
    pub cpu_time: i64,
}

impl Sample {
    pub fn new(time: i64, minor_faults: i64, major_faults: i64, cpu_time: i64) -> Self {
        Self {
            time,
            minor_faults,
            major_faults,
            cpu_time,
        }
    }

    /// Sum of the three counters; zero means nothing happened in the interval.
    /// Widened so that counters near the `i64` limits cannot overflow.
    pub fn activity(&self) -> i128 {
        self.minor_faults as i128 + self.major_faults as i128 + self.cpu_time as i128
    }
}

/// Samples of one log file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLog {
    pub path: PathBuf,
    pub samples: Vec<Sample>,
}

impl RawLog {
    pub fn new(path: impl Into<PathBuf>, samples: Vec<Sample>) -> Self {
        Self {
            path: path.into(),
            samples,
        }
    }
}
