//! Execution context for a run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use t2s_types::{Element, PageDriver};

use crate::journal::Journal;
use crate::vfs::Filesystem;

/// Mutable state shared by every action of one run.
///
/// Holds the page driver, the current selection, the read-variable table
/// and the journal. A fresh context is a fresh run; nothing here is reset
/// between tests.
pub struct RunContext<D> {
    /// The page driver actions call into.
    pub page: D,
    /// Filesystem screenshots are written to.
    fs: Arc<dyn Filesystem>,
    /// Screenshot directory, relative to the filesystem root.
    screenshot_dir: PathBuf,
    /// Values stored by `read`.
    variables: HashMap<String, String>,
    /// Element remembered by the last successful `select`.
    selected: Option<Element>,
    /// Current `method` nesting.
    method_depth: usize,
    pub journal: Journal,
}

impl<D: PageDriver> RunContext<D> {
    /// Create a context writing screenshots to the filesystem root.
    pub fn new(page: D, fs: Arc<dyn Filesystem>) -> Self {
        Self {
            page,
            fs,
            screenshot_dir: PathBuf::new(),
            variables: HashMap::new(),
            selected: None,
            method_depth: 0,
            journal: Journal::new(),
        }
    }

    /// Set the screenshot directory.
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    pub fn fs(&self) -> &dyn Filesystem {
        self.fs.as_ref()
    }

    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }

    pub fn selected(&self) -> Option<&Element> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, element: Option<Element>) {
        self.selected = element;
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn method_depth(&self) -> usize {
        self.method_depth
    }

    pub(crate) fn enter_method(&mut self) {
        self.method_depth += 1;
    }

    pub(crate) fn leave_method(&mut self) {
        self.method_depth = self.method_depth.saturating_sub(1);
    }

    /// Consume the context, returning the driver and journal.
    pub fn finish(self) -> (D, Journal) {
        (self.page, self.journal)
    }
}
