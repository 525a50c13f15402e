//! Error types for building and running scenario trees.
//!
//! Failures fall into two tiers:
//!
//! - **Build time**: [`InitiationError`] (one action could not be
//!   constructed), wrapped into a [`ParseError`] with file and line, wrapped
//!   into a [`BuildError`]. Any of these stops the whole run before a page
//!   is opened.
//! - **Run time**: [`ExecutionError`] aborts the rest of the current test.
//!   Assertion mismatches are not errors at all; they are journal entries.

use std::io;
use std::path::PathBuf;

use t2s_types::{DriverError, UnknownSelectorKind};

use crate::config::ConfigError;

/// An action could not be constructed from its parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitiationError {
    #[error("Action '{0}' is unknown.")]
    UnknownAction(String),
    #[error("Action '{action}' requires parameter '{parameter}'.")]
    MissingParameter {
        action: &'static str,
        parameter: &'static str,
    },
    #[error("Action '{action}' takes no parameters but got '{got}'.")]
    UnexpectedParameters { action: &'static str, got: String },
    #[error("Action '{action}' expects {expected} parameters but got {got}.")]
    ParameterCount {
        action: &'static str,
        expected: &'static str,
        got: usize,
    },
    #[error("Action '{action}' expects 'true' or 'false' but got '{got}'.")]
    InvalidFlag { action: &'static str, got: String },
    #[error(transparent)]
    SelectorKind(#[from] UnknownSelectorKind),
    #[error("Screenshot identifier '{0}' must not contain path separators.")]
    InvalidIdentifier(String),
    #[error("Method '{0}' is not defined in this scenario.")]
    MethodNotFound(String),
}

/// Why a line of a script or compare-strings file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Initiation(#[from] InitiationError),
    #[error("Compare string '{0}' is defined more than once.")]
    DuplicateKey(String),
}

/// A file could not be parsed; carries the absolute path and 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}:{line}: {reason}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub line: usize,
    pub reason: ParseFailure,
}

impl ParseError {
    pub fn new(path: impl Into<PathBuf>, line: usize, reason: impl Into<ParseFailure>) -> Self {
        Self {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

/// The scenario tree could not be built.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("root directory {} does not exist", .0.display())]
    RootMissing(PathBuf),
    #[error("root {} is not a directory", .0.display())]
    RootNotDirectory(PathBuf),
    #[error("tests directory {} does not exist", .0.display())]
    TestsMissing(PathBuf),
    #[error("tests directory {} is not a directory", .0.display())]
    TestsNotDirectory(PathBuf),
    #[error("no tests found under {}", .0.display())]
    NoTests(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A failure while executing an action that aborts the rest of the test.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("no element selected")]
    NoElementSelected,
    #[error("read variable '{0}' has not been set")]
    UnknownVariable(String),
    #[error("compare string '{0}' is not defined in this scenario or its ancestors")]
    UnknownCompareString(String),
    #[error("method '{0}' is not defined in this scenario")]
    MethodNotFound(String),
    #[error("method '{name}' exceeded the maximum call depth of {limit}")]
    MethodDepthExceeded { name: String, limit: usize },
    #[error("cannot write screenshot {}: {source}", path.display())]
    Screenshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Driver(#[from] DriverError),
}
