//! Script parser: one command per line, compiled to an [`ActionChain`].
//!
//! A line is split on its first space into a command name and a raw
//! parameter string; the command decides what its parameters mean.
//! Blank lines are skipped and never break the chain.

use std::path::Path;

use crate::actions::{self, Action, ActionChain, ParseScope};
use crate::error::ParseError;

/// Split one line into `(command, raw parameters)`.
///
/// Returns `None` for blank lines. A line without a space has an empty
/// parameter string. Indentation is dropped; parameters keep any trailing
/// whitespace, so `type` sees its text as written.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.trim_end().is_empty() {
        return None;
    }
    let (command, params) = line.split_once(' ').unwrap_or((line, ""));
    Some((command.trim_end(), params))
}

/// Compile a whole script.
///
/// `path` is the absolute path reported in errors. Returns `Ok(None)` when
/// the file has no actionable lines. The first line that fails aborts the
/// parse with its 1-based line number.
pub fn parse_script(
    path: &Path,
    source: &str,
    scope: &ParseScope<'_>,
) -> Result<Option<ActionChain>, ParseError> {
    let mut chain: Option<ActionChain> = None;

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let Some((command, params)) = parse_line(line) else {
            continue;
        };

        let kind = actions::create(scope, command, params)
            .map_err(|err| ParseError::new(path, line_number, err))?;

        let action = Action {
            scenario: scope.scenario,
            line: line_number,
            source: line.trim().to_string(),
            kind,
        };

        match chain.as_mut() {
            Some(chain) => chain.push(action),
            None => chain = Some(ActionChain::new(action)),
        }
    }

    Ok(chain)
}
