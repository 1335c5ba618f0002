//! Reader for page-fault profiler logs.

pub mod name;
pub mod parse;
pub mod row;

pub use name::run_parameter;
pub use parse::parse_log_file;
pub use row::{RawLog, Sample};
