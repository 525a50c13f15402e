//! The scenario tree.
//!
//! Scenarios mirror the directory layout under the tests directory:
//!
//! ```text
//! tests/                      scenario "tests"
//! ├── compare-strings.t2s     its compare strings
//! ├── methods/                its methods (never a scenario)
//! │   └── login.t2s
//! ├── smoke.t2s               its test "smoke"
//! └── checkout/               child scenario "tests/checkout"
//!     └── pay.t2s
//! ```
//!
//! Scenarios live in an arena inside [`ScenarioTree`] and refer to each
//! other by [`ScenarioId`]. The two repositories are keyed by the same ids.
//! A scenario registers its methods and compare strings before its own
//! tests are parsed and before any child is built.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::actions::{ActionChain, ParseScope};
use crate::compare_strings::parse_compare_strings;
use crate::config::SuiteConfig;
use crate::error::BuildError;
use crate::parser::parse_script;
use crate::repository::ScopedRepository;
use crate::vfs::{DirEntry, Filesystem};

/// Index of a scenario in its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScenarioId(usize);

impl ScenarioId {
    /// The top-level scenario of every tree.
    pub const ROOT: ScenarioId = ScenarioId(0);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named action chain read from one script file.
///
/// `chain` is `None` when the file had no actionable lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub name: String,
    pub chain: Option<ActionChain>,
}

/// A script discovered directly in a scenario directory.
pub type Test = Script;

/// A script from a scenario's `methods` directory, invoked by name.
pub type Method = Script;

/// One directory of the tree.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub id: ScenarioId,
    /// Directory relative to the suite root; also the scenario's name.
    pub path: PathBuf,
    pub parent: Option<ScenarioId>,
    pub tests: Vec<Test>,
    pub children: Vec<ScenarioId>,
}

impl TestScenario {
    /// Name used in the journal: the directory relative to the root.
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Scenarios, their repositories, and whether any test exists at all.
#[derive(Debug, Clone)]
pub struct ScenarioTree {
    scenarios: Vec<TestScenario>,
    methods: ScopedRepository<Method>,
    compare_strings: ScopedRepository<String>,
    any_tests: bool,
}

impl Default for ScenarioTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioTree {
    /// An empty tree with a local method repository and an inheriting
    /// compare-string repository.
    pub fn new() -> Self {
        Self {
            scenarios: Vec::new(),
            methods: ScopedRepository::local(),
            compare_strings: ScopedRepository::inheriting(),
            any_tests: false,
        }
    }

    /// The top-level scenario.
    ///
    /// # Panics
    ///
    /// On an empty tree; trees returned by [`TreeBuilder::build`] always
    /// have a root.
    pub fn root(&self) -> &TestScenario {
        &self.scenarios[ScenarioId::ROOT.index()]
    }

    pub fn get(&self, id: ScenarioId) -> Option<&TestScenario> {
        self.scenarios.get(id.index())
    }

    pub fn scenarios(&self) -> &[TestScenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// True once any scenario in the tree produced a test.
    pub fn has_tests(&self) -> bool {
        self.any_tests
    }

    /// Total number of tests across all scenarios.
    pub fn test_count(&self) -> usize {
        self.scenarios.iter().map(|s| s.tests.len()).sum()
    }

    /// Find a scenario by its directory relative to the root.
    pub fn find(&self, path: impl AsRef<Path>) -> Option<&TestScenario> {
        let path = path.as_ref();
        self.scenarios.iter().find(|s| s.path == path)
    }

    pub fn methods(&self) -> &ScopedRepository<Method> {
        &self.methods
    }

    pub fn compare_strings(&self) -> &ScopedRepository<String> {
        &self.compare_strings
    }

    /// Resolve a method as seen from `scenario` (own scope only).
    pub fn method(&self, scenario: ScenarioId, name: &str) -> Option<&Method> {
        self.methods.lookup(scenario, name)
    }

    /// Resolve a compare string as seen from `scenario` (with ancestors).
    pub fn compare_string(&self, scenario: ScenarioId, key: &str) -> Option<&str> {
        self.compare_strings.lookup(scenario, key).map(String::as_str)
    }

    fn allocate(&mut self, path: PathBuf, parent: Option<ScenarioId>) -> ScenarioId {
        let id = ScenarioId::new(self.scenarios.len());
        self.scenarios.push(TestScenario {
            id,
            path,
            parent,
            tests: Vec::new(),
            children: Vec::new(),
        });
        id
    }

    fn node_mut(&mut self, id: ScenarioId) -> &mut TestScenario {
        &mut self.scenarios[id.index()]
    }
}

/// Builds a [`ScenarioTree`] from a directory layout.
pub struct TreeBuilder<'a> {
    fs: &'a dyn Filesystem,
    config: &'a SuiteConfig,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(fs: &'a dyn Filesystem, config: &'a SuiteConfig) -> Self {
        Self { fs, config }
    }

    /// Build the whole tree rooted at the configured tests directory.
    ///
    /// Fails if the directory is missing or the tree holds no tests.
    pub fn build(&self) -> Result<ScenarioTree, BuildError> {
        let tests_dir = PathBuf::from(&self.config.tests_dir);
        match self.fs.stat(&tests_dir) {
            Ok(entry) if entry.is_dir() => {}
            Ok(_) => return Err(BuildError::TestsNotDirectory(self.fs.absolute(&tests_dir))),
            Err(_) => return Err(BuildError::TestsMissing(self.fs.absolute(&tests_dir))),
        }

        let mut tree = ScenarioTree::new();
        self.build_scenario(&mut tree, None, &tests_dir)?;

        if !tree.has_tests() {
            return Err(BuildError::NoTests(self.fs.absolute(&tests_dir)));
        }
        tracing::info!(
            scenarios = tree.len(),
            tests = tree.test_count(),
            "scenario tree built"
        );
        Ok(tree)
    }

    /// Build the scenario for `dir` and, recursively, its children.
    pub fn build_scenario(
        &self,
        tree: &mut ScenarioTree,
        parent: Option<ScenarioId>,
        dir: &Path,
    ) -> Result<ScenarioId, BuildError> {
        let id = tree.allocate(dir.to_path_buf(), parent);
        tracing::debug!(scenario = %dir.display(), id = %id, "building scenario");

        let entries = self.list(dir)?;

        let compare_strings = self.load_compare_strings(dir, &entries)?;
        tree.compare_strings.register(id, parent, compare_strings);

        let method_files = self.method_files(dir)?;
        let method_names: HashSet<String> = method_files.iter().map(|p| file_stem(p)).collect();
        let scope = ParseScope {
            scenario: id,
            methods: &method_names,
        };
        let methods = self.load_methods(&method_files, &scope)?;
        tree.methods.register(id, parent, methods);

        let mut tests = Vec::new();
        for entry in &entries {
            if entry.is_file()
                && entry.name != self.config.compare_strings_file
                && self.config.is_script(&entry.name)
            {
                tests.push(self.load_script(&dir.join(&entry.name), &scope)?);
            }
        }
        if !tests.is_empty() {
            tree.any_tests = true;
        }
        tree.node_mut(id).tests = tests;

        for entry in &entries {
            if entry.is_dir() && entry.name != self.config.methods_dir {
                let child = self.build_scenario(tree, Some(id), &dir.join(&entry.name))?;
                tree.node_mut(id).children.push(child);
            }
        }

        Ok(id)
    }

    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, BuildError> {
        let mut entries = self.fs.list(dir).map_err(|source| BuildError::Io {
            path: self.fs.absolute(dir),
            source,
        })?;
        if self.config.sort_entries {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<String, BuildError> {
        self.fs.read_to_string(path).map_err(|source| BuildError::Io {
            path: self.fs.absolute(path),
            source,
        })
    }

    fn load_compare_strings(
        &self,
        dir: &Path,
        entries: &[DirEntry],
    ) -> Result<HashMap<String, String>, BuildError> {
        let present = entries
            .iter()
            .any(|e| e.is_file() && e.name == self.config.compare_strings_file);
        if !present {
            return Ok(HashMap::new());
        }

        let path = dir.join(&self.config.compare_strings_file);
        let source = self.read(&path)?;
        Ok(parse_compare_strings(&self.fs.absolute(&path), &source)?)
    }

    /// Method script paths in `dir`'s methods directory, in listing order.
    fn method_files(&self, dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
        let methods_dir = dir.join(&self.config.methods_dir);
        match self.fs.stat(&methods_dir) {
            Ok(entry) if entry.is_dir() => {}
            _ => return Ok(Vec::new()),
        }

        Ok(self
            .list(&methods_dir)?
            .into_iter()
            .filter(|e| e.is_file() && self.config.is_script(&e.name))
            .map(|e| methods_dir.join(e.name))
            .collect())
    }

    fn load_methods(
        &self,
        files: &[PathBuf],
        scope: &ParseScope<'_>,
    ) -> Result<HashMap<String, Method>, BuildError> {
        let mut methods = HashMap::new();
        for path in files {
            let method = self.load_script(path, scope)?;
            methods.insert(method.name.clone(), method);
        }
        Ok(methods)
    }

    fn load_script(&self, path: &Path, scope: &ParseScope<'_>) -> Result<Script, BuildError> {
        let source = self.read(path)?;
        let chain = parse_script(&self.fs.absolute(path), &source, scope)?;
        Ok(Script {
            name: file_stem(path),
            chain,
        })
    }
}

/// File name with its extension stripped.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::MemoryFs;

    fn fs_with(files: &[(&str, &str)]) -> MemoryFs {
        let fs = MemoryFs::new();
        for (path, content) in files {
            fs.write(Path::new(path), content.as_bytes()).unwrap();
        }
        fs
    }

    fn build(fs: &MemoryFs) -> Result<ScenarioTree, BuildError> {
        let config = SuiteConfig::default();
        TreeBuilder::new(fs, &config).build()
    }

    #[test]
    fn discovers_tests_and_children() {
        let fs = fs_with(&[
            ("tests/b.t2s", "click"),
            ("tests/a.t2s", "open x"),
            ("tests/notes.txt", "ignored"),
            ("tests/sub/c.t2s", "comment hi"),
        ]);
        let tree = build(&fs).unwrap();

        let root = tree.root();
        assert_eq!(root.name(), "tests");
        let names: Vec<_> = root.tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(root.children.len(), 1);

        let sub = tree.find("tests/sub").unwrap();
        assert_eq!(sub.parent, Some(ScenarioId::ROOT));
        assert_eq!(sub.tests[0].name, "c");
        assert_eq!(tree.test_count(), 3);
    }

    #[test]
    fn methods_dir_is_not_a_scenario() {
        let fs = fs_with(&[
            ("tests/a.t2s", "method login"),
            ("tests/methods/login.t2s", "open x"),
        ]);
        let tree = build(&fs).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.method(ScenarioId::ROOT, "login").is_some());
    }

    #[test]
    fn compare_strings_file_is_not_a_test() {
        let fs = fs_with(&[
            ("tests/a.t2s", "comment"),
            ("tests/compare-strings.t2s", "greeting hi"),
        ]);
        let tree = build(&fs).unwrap();
        assert_eq!(tree.root().tests.len(), 1);
        assert_eq!(tree.compare_string(ScenarioId::ROOT, "greeting"), Some("hi"));
    }

    #[test]
    fn empty_script_is_a_test_without_chain() {
        let fs = fs_with(&[("tests/empty.t2s", "\n\n")]);
        let tree = build(&fs).unwrap();
        assert_eq!(tree.root().tests[0].chain, None);
        assert!(tree.has_tests());
    }

    #[test]
    fn missing_tests_dir() {
        let fs = fs_with(&[("other/a.t2s", "click")]);
        let err = build(&fs).unwrap_err();
        assert!(matches!(err, BuildError::TestsMissing(_)));
    }

    #[test]
    fn no_tests_anywhere() {
        let fs = fs_with(&[
            ("tests/methods/m.t2s", "click"),
            ("tests/sub/readme.md", "nothing"),
        ]);
        let err = build(&fs).unwrap_err();
        assert!(matches!(err, BuildError::NoTests(_)));
    }

    #[test]
    fn tests_in_descendant_count() {
        let fs = fs_with(&[("tests/a/b/c/deep.t2s", "click")]);
        let tree = build(&fs).unwrap();
        assert!(tree.has_tests());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn method_may_call_sibling_method() {
        let fs = fs_with(&[
            ("tests/a.t2s", "method outer"),
            ("tests/methods/inner.t2s", "click"),
            ("tests/methods/outer.t2s", "method inner"),
        ]);
        let tree = build(&fs).unwrap();
        assert!(tree.method(ScenarioId::ROOT, "outer").is_some());
    }

    #[test]
    fn method_from_parent_is_initiation_error_in_child() {
        let fs = fs_with(&[
            ("tests/methods/login.t2s", "click"),
            ("tests/child/a.t2s", "comment\nmethod login"),
        ]);
        let err = build(&fs).unwrap_err();
        match err {
            BuildError::Parse(parse) => {
                assert_eq!(parse.path, PathBuf::from("/tests/child/a.t2s"));
                assert_eq!(parse.line, 2);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn rebuild_replaces_registrations() {
        let fs = fs_with(&[
            ("tests/a.t2s", "click"),
            ("tests/compare-strings.t2s", "k v"),
        ]);
        let config = SuiteConfig::default();
        let builder = TreeBuilder::new(&fs, &config);

        let mut tree = ScenarioTree::new();
        let first = builder.build_scenario(&mut tree, None, Path::new("tests")).unwrap();
        tree.scenarios.clear();
        let second = builder.build_scenario(&mut tree, None, Path::new("tests")).unwrap();

        assert_eq!(first, second);
        assert_eq!(tree.compare_string(second, "k"), Some("v"));
    }
}
