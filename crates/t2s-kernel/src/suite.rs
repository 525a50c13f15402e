//! The suite: a configured root, its filesystem and its built tree.
//!
//! ```no_run
//! # use t2s_kernel::Suite;
//! # fn demo(page: impl t2s_types::PageDriver) -> Result<(), t2s_kernel::BuildError> {
//! let suite = Suite::open("checks")?;
//! let (summary, journal) = suite.run(page);
//! println!("{} tests, {} severe", summary.tests, summary.severe);
//! # let _ = journal;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use t2s_types::PageDriver;

use crate::config::SuiteConfig;
use crate::context::RunContext;
use crate::engine::{Engine, RunSummary};
use crate::error::BuildError;
use crate::journal::Journal;
use crate::scenario::{ScenarioTree, TreeBuilder};
use crate::vfs::{Filesystem, LocalFs};

/// A built, runnable suite.
///
/// Building parses every script up front, so any initiation or parse error
/// surfaces here, before a page driver is involved.
pub struct Suite {
    fs: Arc<dyn Filesystem>,
    config: SuiteConfig,
    tree: ScenarioTree,
}

impl Suite {
    /// Open the suite rooted at `root`, loading its config.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, BuildError> {
        let root = root.as_ref();
        check_root(root)?;
        let config = SuiteConfig::load(root)?;
        Self::open_with_config(root, config)
    }

    /// Open the suite rooted at `root` with an explicit config.
    pub fn open_with_config(root: impl AsRef<Path>, config: SuiteConfig) -> Result<Self, BuildError> {
        let root = root.as_ref();
        check_root(root)?;
        tracing::info!(root = %root.display(), "opening suite");
        Self::from_fs(Arc::new(LocalFs::new(root)), config)
    }

    /// Open the suite over a read-only filesystem, for static checks.
    ///
    /// Runs still work, but any `screenshot` aborts its test.
    pub fn open_read_only(root: impl AsRef<Path>, config: SuiteConfig) -> Result<Self, BuildError> {
        let root = root.as_ref();
        check_root(root)?;
        Self::from_fs(Arc::new(LocalFs::read_only(root)), config)
    }

    /// Build a suite over any filesystem; its root is the suite root.
    pub fn from_fs(fs: Arc<dyn Filesystem>, config: SuiteConfig) -> Result<Self, BuildError> {
        let tree = TreeBuilder::new(fs.as_ref(), &config).build()?;
        Ok(Self { fs, config, tree })
    }

    pub fn tree(&self) -> &ScenarioTree {
        &self.tree
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn fs(&self) -> Arc<dyn Filesystem> {
        Arc::clone(&self.fs)
    }

    /// An engine configured for this suite.
    pub fn engine(&self) -> Engine<'_> {
        Engine::new(&self.tree).with_max_method_depth(self.config.max_method_depth)
    }

    /// A fresh run context for `page`.
    pub fn context<D: PageDriver>(&self, page: D) -> RunContext<D> {
        RunContext::new(page, self.fs()).with_screenshot_dir(self.config.screenshot_dir.clone())
    }

    /// Run every scenario against `page` with fresh run state.
    pub fn run<D: PageDriver>(&self, page: D) -> (RunSummary, Journal) {
        let mut ctx = self.context(page);
        let summary = self.run_in(&mut ctx);
        let (_, journal) = ctx.finish();
        (summary, journal)
    }

    /// Run every scenario in an existing context.
    pub fn run_in<D: PageDriver>(&self, ctx: &mut RunContext<D>) -> RunSummary {
        let summary = self.engine().run(ctx);
        tracing::info!(
            scenarios = summary.scenarios,
            tests = summary.tests,
            aborted = summary.aborted,
            severe = summary.severe,
            "run finished"
        );
        summary
    }
}

fn check_root(root: &Path) -> Result<(), BuildError> {
    let absolute = std::path::absolute(root).unwrap_or_else(|_| PathBuf::from(root));
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(BuildError::RootNotDirectory(absolute)),
        Err(_) => Err(BuildError::RootMissing(absolute)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::MemoryFs;

    #[test]
    fn missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = Suite::open(dir.path().join("nope")).err().unwrap();
        assert!(matches!(err, BuildError::RootMissing(_)));
    }

    #[test]
    fn root_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("suite.txt");
        std::fs::write(&file, "x").unwrap();
        let err = Suite::open(&file).err().unwrap();
        assert!(matches!(err, BuildError::RootNotDirectory(_)));
    }

    #[test]
    fn from_fs_builds_tree() {
        let fs = MemoryFs::new();
        fs.write(Path::new("tests/a.t2s"), b"comment hello").unwrap();
        let suite = Suite::from_fs(Arc::new(fs), SuiteConfig::default()).unwrap();
        assert_eq!(suite.tree().test_count(), 1);
        assert_eq!(suite.engine().max_method_depth(), 32);
    }

    #[test]
    fn read_only_suite_cannot_screenshot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("tests")).unwrap();
        std::fs::write(dir.path().join("tests/a.t2s"), "comment").unwrap();

        let suite = Suite::open_read_only(dir.path(), SuiteConfig::default()).unwrap();
        assert!(suite.fs().write(Path::new("x.html"), b"x").is_err());
    }
}
