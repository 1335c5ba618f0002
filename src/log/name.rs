//! Run parameter encoded in a log's file name.
//!
//! Example: `runs/profile2-15.data` => 15
//!
//! Only the final path component is inspected. The parameter is the second
//! `-`-separated field, cut at its first `.`.

use crate::error::{ProfileError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static RUN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^-]*-([^-.]*)").expect("run name pattern is valid"));

/// Extract N from a file named `prefix-N.ext`.
pub fn run_parameter(path: impl AsRef<Path>) -> Result<u32> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let bad_name = || ProfileError::FileName { name: name.clone() };

    let caps = RUN_NAME_RE.captures(&name).ok_or_else(bad_name)?;
    let field = caps.get(1).ok_or_else(bad_name)?.as_str();
    field.parse::<u32>().map_err(|_| bad_name())
}
