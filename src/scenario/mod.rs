//! Scenario file (scenarios.json): batches of charts to produce in one run.
//!
//! JSON shape:
//! {
//!   "thrashing": [
//!     {
//!       "name": "case1-1",                 // output file stem
//!       "log": "profile1-1.data",
//!       "title": "Case 1-1: ...",
//!       "description": "nice ./work ..."   // optional, second title line
//!     }
//!   ],
//!   "multiprogramming": [
//!     {
//!       "name": "case2",
//!       "logs": ["profile2-1.data", "profile2-5.data"],
//!       "title": "Case 2: Multiprogramming" // optional
//!     }
//!   ]
//! }
//!
//! Relative log paths resolve against the data directory, outputs land in the
//! output directory. Without a file the built-in experiment set is used.

use crate::chart::{MULTIPROGRAMMING_TITLE, multiprogramming_chart, thrashing_chart};
use crate::error::Result;
use crate::log::parse_log_file;
use crate::model::accumulate;
use crate::render::{OutputFormat, write_chart};

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    #[serde(default)]
    pub thrashing: Vec<ThrashingCase>,

    #[serde(default)]
    pub multiprogramming: Vec<MultiprogrammingCase>,
}

/// Page faults over time for a single log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrashingCase {
    pub name: String,
    pub log: PathBuf,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// CPU utilization across logs named `prefix-N.ext`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiprogrammingCase {
    pub name: String,
    pub logs: Vec<PathBuf>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for ScenarioFile {
    /// The page-fault profiler experiments: two locality workloads and a
    /// sweep over the number of concurrently running work processes.
    fn default() -> Self {
        Self {
            thrashing: vec![
                ThrashingCase {
                    name: "case1-1".to_string(),
                    log: PathBuf::from("profile1-1.data"),
                    title: "Case 1-1: Thrashing and Locality".to_string(),
                    description: "nice ./work 1024 R 50000 & nice ./work 1024 R 10000"
                        .to_string(),
                },
                ThrashingCase {
                    name: "case1-2".to_string(),
                    log: PathBuf::from("profile1-2.data"),
                    title: "Case 1-2: Thrashing and Locality".to_string(),
                    description: "nice ./work 1024 R 50000 & nice ./work 1024 L 10000"
                        .to_string(),
                },
            ],
            multiprogramming: vec![MultiprogrammingCase {
                name: "case2".to_string(),
                logs: [1, 5, 11, 15, 19, 20]
                    .iter()
                    .map(|n| PathBuf::from(format!("profile2-{}.data", n)))
                    .collect(),
                title: None,
            }],
        }
    }
}

impl ScenarioFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read scenario file {}", path.display()))?;
        let file: ScenarioFile = serde_json::from_str(&text)
            .with_context(|| format!("parse scenario file {}", path.display()))?;
        file.validate()
            .with_context(|| format!("invalid scenario file {}", path.display()))?;
        Ok(file)
    }

    /// Names must be non-empty, unique and usable as file stems; every case needs input.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut names = BTreeSet::new();
        let all_names = self
            .thrashing
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.multiprogramming.iter().map(|c| c.name.as_str()));
        for name in all_names {
            if name.trim().is_empty() {
                bail!("scenario with empty name");
            }
            if name.contains('/') || name.contains('\\') {
                bail!("scenario name {:?} must not contain path separators", name);
            }
            if !names.insert(name) {
                bail!("duplicate scenario name: {}", name);
            }
        }

        for case in &self.thrashing {
            if case.log.as_os_str().is_empty() {
                bail!("scenario {} has no log", case.name);
            }
        }
        for case in &self.multiprogramming {
            if case.logs.is_empty() {
                bail!("scenario {} lists no logs", case.name);
            }
        }

        if names.is_empty() {
            bail!("scenario file contained no scenarios");
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.thrashing.len() + self.multiprogramming.len()
    }
}

/// Where scenario inputs are read from and outputs written to.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub format: OutputFormat,
}

impl RunSettings {
    fn input(&self, log: &Path) -> PathBuf {
        self.data_dir.join(log)
    }

    fn output(&self, name: &str) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", name, self.format.extension()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub written: Vec<PathBuf>,
    /// (scenario name, error message)
    pub failed: Vec<(String, String)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run every scenario in declaration order (thrashing cases first).
///
/// A failing scenario is recorded and logged; the remaining ones still run.
pub fn run_scenarios(file: &ScenarioFile, settings: &RunSettings) -> RunReport {
    let mut report = RunReport::default();

    let thrashing = file
        .thrashing
        .iter()
        .map(|case| (case.name.as_str(), run_thrashing(case, settings)));
    let multiprogramming = file
        .multiprogramming
        .iter()
        .map(|case| (case.name.as_str(), run_multiprogramming(case, settings)));

    for (name, outcome) in thrashing.chain(multiprogramming) {
        match outcome {
            Ok(path) => report.written.push(path),
            Err(e) => {
                tracing::error!(scenario = name, error = %e, "scenario failed");
                report.failed.push((name.to_string(), e.to_string()));
            }
        }
    }

    report
}

fn run_thrashing(case: &ThrashingCase, settings: &RunSettings) -> Result<PathBuf> {
    let series = accumulate(&parse_log_file(settings.input(&case.log))?)?;
    let chart = thrashing_chart(&series, &case.title, &case.description);

    let out = settings.output(&case.name);
    write_chart(&chart, &out, Some(settings.format))?;
    Ok(out)
}

fn run_multiprogramming(case: &MultiprogrammingCase, settings: &RunSettings) -> Result<PathBuf> {
    let logs: Vec<PathBuf> = case.logs.iter().map(|log| settings.input(log)).collect();
    let title = case.title.as_deref().unwrap_or(MULTIPROGRAMMING_TITLE);
    let chart = multiprogramming_chart(&logs, title)?;

    let out = settings.output(&case.name);
    write_chart(&chart, &out, Some(settings.format))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings(data: &Path, out: &Path) -> RunSettings {
        RunSettings {
            data_dir: data.to_path_buf(),
            out_dir: out.to_path_buf(),
            format: OutputFormat::Svg,
        }
    }

    #[test]
    fn default_scenarios_use_profile_logs() {
        let file = ScenarioFile::default();
        file.validate().unwrap();

        let logs: Vec<_> = file.thrashing.iter().map(|c| c.log.clone()).collect();
        assert_eq!(
            logs,
            vec![PathBuf::from("profile1-1.data"), PathBuf::from("profile1-2.data")]
        );
        assert_eq!(
            file.multiprogramming[0].logs,
            [
                "profile2-1.data",
                "profile2-5.data",
                "profile2-11.data",
                "profile2-15.data",
                "profile2-19.data",
                "profile2-20.data"
            ]
            .iter()
            .map(PathBuf::from)
            .collect::<Vec<_>>()
        );
        assert_eq!(file.len(), 3);
    }

    #[test]
    fn parses_json_with_optional_fields() {
        let file: ScenarioFile = serde_json::from_str(
            r#"{
                "thrashing": [{"name": "a", "log": "profile1-1.data", "title": "A"}],
                "multiprogramming": [{"name": "b", "logs": ["profile2-1.data"]}]
            }"#,
        )
        .unwrap();

        assert_eq!(file.thrashing[0].description, "");
        assert_eq!(file.multiprogramming[0].title, None);
        file.validate().unwrap();
    }

    #[test]
    fn rejects_unknown_fields() {
        let parsed: std::result::Result<ScenarioFile, _> =
            serde_json::from_str(r#"{"thrashing": [], "plots": []}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn validation_catches_bad_files() {
        let empty = ScenarioFile {
            thrashing: vec![],
            multiprogramming: vec![],
        };
        assert!(empty.validate().is_err());

        let mut dup = ScenarioFile::default();
        dup.multiprogramming[0].name = "case1-1".to_string();
        let err = dup.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");

        let mut no_logs = ScenarioFile::default();
        no_logs.multiprogramming[0].logs.clear();
        assert!(no_logs.validate().is_err());

        let mut slash = ScenarioFile::default();
        slash.thrashing[0].name = "../x".to_string();
        assert!(slash.validate().is_err());
    }

    #[test]
    fn load_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenarios.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ScenarioFile::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("scenarios.json"));
    }

    #[test]
    fn failing_scenario_does_not_stop_the_rest() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(
            data.path().join("profile1-1.data"),
            "100 0 0 0\n105 1 2 0\n110 0 0 0\n120 3 0 1\n",
        )
        .unwrap();
        fs::write(data.path().join("profile2-1.data"), "0 1 0 1\n10 1 0 4\n").unwrap();
        fs::write(data.path().join("profile2-5.data"), "0 1 0 1\n20 1 0 9\n").unwrap();

        // profile1-2.data is missing, so case1-2 fails.
        let mut file = ScenarioFile::default();
        file.multiprogramming[0].logs = vec![
            PathBuf::from("profile2-1.data"),
            PathBuf::from("profile2-5.data"),
        ];

        let report = run_scenarios(&file, &settings(data.path(), out.path()));

        assert_eq!(
            report.written,
            vec![out.path().join("case1-1.svg"), out.path().join("case2.svg")]
        );
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "case1-2");
        assert!(report.failed[0].1.contains("profile1-2.data"));
        assert!(!report.is_success());
        assert!(out.path().join("case1-1.svg").exists());
        assert!(!out.path().join("case1-2.svg").exists());
    }

    #[test]
    fn html_format_changes_output_extension() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(data.path().join("run-3.data"), "0 1 0 1\n10 1 0 4\n").unwrap();

        let file = ScenarioFile {
            thrashing: vec![],
            multiprogramming: vec![MultiprogrammingCase {
                name: "sweep".to_string(),
                logs: vec![PathBuf::from("run-3.data")],
                title: Some("Sweep".to_string()),
            }],
        };
        let mut s = settings(data.path(), out.path());
        s.format = OutputFormat::Html;

        let report = run_scenarios(&file, &s);

        assert!(report.is_success());
        let html = fs::read_to_string(out.path().join("sweep.html")).unwrap();
        assert!(html.contains(r#""title":"Sweep""#));
        assert!(html.contains(r#""points":[[3.0,0.5]]"#));
    }
}
