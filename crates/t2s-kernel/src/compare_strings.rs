//! Compare-strings files: `key value` per line.
//!
//! The first space separates the key from the value; the value is the rest
//! of the line as written. Blank lines (whitespace only) and lines starting
//! with a space are skipped. A key may appear only once per file; redefining it in a child
//! scenario's file is how shadowing works.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ParseError, ParseFailure};

/// Parse the contents of a compare-strings file.
///
/// `path` is the absolute path reported in errors.
pub fn parse_compare_strings(
    path: &Path,
    source: &str,
) -> Result<HashMap<String, String>, ParseError> {
    let mut table = HashMap::new();

    for (index, line) in source.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with(' ') {
            continue;
        }

        let (key, value) = line.split_once(' ').unwrap_or((line, ""));
        if table.contains_key(key) {
            return Err(ParseError::new(
                path,
                index + 1,
                ParseFailure::DuplicateKey(key.to_string()),
            ));
        }
        table.insert(key.to_string(), value.to_string());
    }

    Ok(table)
}
