use crate::error::{ProfileError, Result};
use crate::log::row::{RawLog, Sample};
use std::fs;
use std::path::Path;

/// Number of columns a profiler sample carries.
pub const SAMPLE_WIDTH: usize = 4;

/// A non-blank log line split into integer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// 1-based line number in the source file.
    pub line: usize,
    pub fields: Vec<i64>,
}

/// Parse a page-fault profiler log into its samples.
///
/// Expected columns (whitespace-separated, base-10 integers):
/// jiffies  minor_faults  major_faults  cpu_time
///
/// Example:
/// 4295878164 12 0 3
pub fn parse_log_file(path: impl AsRef<Path>) -> Result<RawLog> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut samples = Vec::new();
    for ParsedLine { line, fields } in parse_rows(&text, path)? {
        match fields.as_slice() {
            &[time, minor_faults, major_faults, cpu_time] => {
                samples.push(Sample::new(time, minor_faults, major_faults, cpu_time));
            }
            _ => {
                return Err(ProfileError::Format {
                    path: path.to_path_buf(),
                    line,
                    message: format!(
                        "expected {} fields, found {}",
                        SAMPLE_WIDTH,
                        fields.len()
                    ),
                });
            }
        }
    }

    tracing::debug!(path = %path.display(), samples = samples.len(), "parsed profile log");
    Ok(RawLog::new(path, samples))
}

/// Split `text` into rows of integers. Rows may have any width; blank lines are skipped.
///
/// `path` is only used to label errors.
pub fn parse_rows(text: &str, path: &Path) -> Result<Vec<ParsedLine>> {
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = Vec::new();
        for (col, field) in line.split_whitespace().enumerate() {
            let value = field.parse::<i64>().map_err(|e| ProfileError::Format {
                path: path.to_path_buf(),
                line: lno,
                message: format!("field {} is not an integer: {:?} ({})", col + 1, field, e),
            })?;
            fields.push(value);
        }

        out.push(ParsedLine { line: lno, fields });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_log(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_whitespace_separated_samples() {
        let file = write_log("100 0 0 0\n105\t1  2 0\n  110 0 0 0  \n120 3 0 1\n");
        let log = parse_log_file(file.path()).unwrap();

        assert_eq!(
            log.samples,
            vec![
                Sample::new(100, 0, 0, 0),
                Sample::new(105, 1, 2, 0),
                Sample::new(110, 0, 0, 0),
                Sample::new(120, 3, 0, 1),
            ]
        );
        assert_eq!(log.path, file.path());
    }

    #[test]
    fn skips_blank_lines() {
        let file = write_log("\n50 2 3 4\n   \n");
        let log = parse_log_file(file.path()).unwrap();
        assert_eq!(log.samples, vec![Sample::new(50, 2, 3, 4)]);
    }

    #[test]
    fn empty_file_yields_no_samples() {
        let file = write_log("");
        let log = parse_log_file(file.path()).unwrap();
        assert!(log.samples.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("profile1-1.data");

        let err = parse_log_file(&missing).unwrap_err();
        match err {
            ProfileError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn non_integer_field_reports_line_and_field() {
        let file = write_log("1 0 0 0\n2 0 x 0\n");
        let err = parse_log_file(file.path()).unwrap_err();

        match &err {
            ProfileError::Format { line, message, .. } => {
                assert_eq!(*line, 2);
                assert!(message.contains("field 3"), "{message}");
            }
            other => panic!("expected Format error, got {other:?}"),
        }
        assert!(err.to_string().contains(":2:"));
    }

    #[test]
    fn wrong_width_is_format_error() {
        let file = write_log("1 0 0 0\n2 0 0\n");
        let err = parse_log_file(file.path()).unwrap_err();
        assert!(matches!(err, ProfileError::Format { line: 2, .. }));
    }

    #[test]
    fn rows_are_width_agnostic() {
        let rows = parse_rows("1 2\n\n3 4 5 6 7\n", Path::new("x.data")).unwrap();
        assert_eq!(
            rows,
            vec![
                ParsedLine {
                    line: 1,
                    fields: vec![1, 2]
                },
                ParsedLine {
                    line: 3,
                    fields: vec![3, 4, 5, 6, 7]
                },
            ]
        );
    }

    #[test]
    fn accepts_negative_values() {
        let rows = parse_rows("-5 1 -1 0", Path::new("x.data")).unwrap();
        assert_eq!(rows[0].fields, vec![-5, 1, -1, 0]);
    }
}
