use anyhow::bail;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod chart;
mod diagnostics;
mod error;
mod log;
mod model;
mod render;
mod scenario;

use render::OutputFormat;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "pagefault-plot")]
#[command(about = "Plots for page-fault profiler logs", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Page faults accumulated over time for one log.
    Thrashing {
        #[arg(long)]
        log: PathBuf,

        #[arg(long)]
        title: String,

        /// Workload description shown under the title.
        #[arg(long, default_value = "")]
        description: String,

        #[arg(short = 'o', long)]
        out: PathBuf,

        /// Defaults to the extension of --out.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// CPU utilization against N for logs named prefix-N.ext.
    Multiprogramming {
        #[arg(long = "log", required = true, num_args = 1..)]
        logs: Vec<PathBuf>,

        #[arg(long, default_value = chart::MULTIPROGRAMMING_TITLE)]
        title: String,

        #[arg(short = 'o', long)]
        out: PathBuf,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print per-log totals as JSON.
    Summary {
        #[arg(long = "log", required = true, num_args = 1..)]
        logs: Vec<PathBuf>,
    },

    /// Run a scenario file, or the built-in experiment set.
    Scenarios {
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value = ".")]
        data_dir: PathBuf,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        #[arg(long, value_enum, default_value = "svg")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init(cli.verbose);

    match cli.cmd {
        Commands::Thrashing {
            log: log_path,
            title,
            description,
            out,
            format,
        } => {
            let raw = log::parse_log_file(&log_path)?;
            let series = model::accumulate(&raw)?;
            let chart = chart::thrashing_chart(&series, &title, &description);
            render::write_chart(&chart, &out, format)?;
            println!("Wrote {}", out.display());
        }
        Commands::Multiprogramming {
            logs,
            title,
            out,
            format,
        } => {
            let chart = chart::multiprogramming_chart(&logs, &title)?;
            render::write_chart(&chart, &out, format)?;
            println!("Wrote {}", out.display());
        }
        Commands::Summary { logs } => {
            let mut summaries = Vec::with_capacity(logs.len());
            for path in &logs {
                let series = model::accumulate(&log::parse_log_file(path)?)?;
                summaries.push(series.summary());
            }
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Commands::Scenarios {
            config,
            data_dir,
            out_dir,
            format,
        } => {
            let file = match &config {
                Some(path) => scenario::ScenarioFile::load(path)?,
                None => scenario::ScenarioFile::default(),
            };
            tracing::info!(scenarios = file.len(), "running scenarios");

            let settings = scenario::RunSettings {
                data_dir,
                out_dir,
                format,
            };
            let report = scenario::run_scenarios(&file, &settings);
            for path in &report.written {
                println!("Wrote {}", path.display());
            }
            if !report.is_success() {
                let names: Vec<&str> = report.failed.iter().map(|(n, _)| n.as_str()).collect();
                bail!(
                    "{} of {} scenarios failed: {}",
                    report.failed.len(),
                    file.len(),
                    names.join(", ")
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn multiprogramming_accepts_repeated_logs() {
        let cli = Cli::try_parse_from([
            "pagefault-plot",
            "multiprogramming",
            "--log",
            "profile2-1.data",
            "profile2-5.data",
            "-o",
            "case2.svg",
        ])
        .unwrap();

        match cli.cmd {
            Commands::Multiprogramming { logs, title, .. } => {
                assert_eq!(logs.len(), 2);
                assert_eq!(title, chart::MULTIPROGRAMMING_TITLE);
            }
            _ => panic!("expected multiprogramming command"),
        }
    }

    #[test]
    fn scenarios_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["pagefault-plot", "-v", "scenarios"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.cmd {
            Commands::Scenarios {
                config,
                data_dir,
                format,
                ..
            } => {
                assert!(config.is_none());
                assert_eq!(data_dir, PathBuf::from("."));
                assert_eq!(format, OutputFormat::Svg);
            }
            _ => panic!("expected scenarios command"),
        }
    }
}
