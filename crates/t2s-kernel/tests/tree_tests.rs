//! Building suites from real directories.

use std::fs;
use std::path::Path;

use rstest::rstest;
use t2s_kernel::{BuildError, ScenarioId, Suite, SuiteConfig};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn suite_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, content) in files {
        write(dir.path(), rel, content);
    }
    dir
}

#[test]
fn builds_nested_tree() {
    let dir = suite_dir(&[
        ("tests/compare-strings.t2s", "greeting Hello\n"),
        ("tests/methods/login.t2s", "select id user\ntype alice\n"),
        ("tests/smoke.t2s", "open file://index.html\nmethod login\n"),
        ("tests/checkout/pay.t2s", "open file://pay.html\nclick\n"),
    ]);

    let suite = Suite::open(dir.path()).unwrap();
    let tree = suite.tree();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.test_count(), 2);
    let checkout = tree.find("tests/checkout").unwrap();
    assert_eq!(checkout.tests[0].name, "pay");
    assert_eq!(checkout.tests[0].chain.as_ref().unwrap().len(), 2);
}

#[test]
fn parse_error_names_absolute_path_and_line() {
    let dir = suite_dir(&[("tests/a.t2s", "open x\n\nhover id y\n")]);

    let parse = match Suite::open(dir.path()).err().unwrap() {
        BuildError::Parse(parse) => parse,
        other => panic!("expected parse error, got {other:?}"),
    };

    let expected = dir.path().join("tests").join("a.t2s");
    assert_eq!(parse.path, expected);
    assert_eq!(parse.line, 3);
    assert_eq!(
        parse.to_string(),
        format!("{}:3: Action 'hover' is unknown.", expected.display())
    );
}

#[rstest]
#[case::bad_selector("select css .btn", "Selector kind 'css' is unknown; expected one of id, name, xpath.")]
#[case::click_args("click now", "Action 'click' takes no parameters but got 'now'.")]
#[case::missing_url("open", "Action 'open' requires parameter 'url'.")]
#[case::bad_flag("assertChecked maybe", "Action 'assertChecked' expects 'true' or 'false' but got 'maybe'.")]
#[case::assert_arity("assertEquals a", "Action 'assertEquals' expects 2 or 3 parameters but got 1.")]
#[case::unknown_method("method logout", "Method 'logout' is not defined in this scenario.")]
#[case::screenshot_path("screenshot a/b", "Screenshot identifier 'a/b' must not contain path separators.")]
fn initiation_errors_fail_the_build(#[case] line: &str, #[case] reason: &str) {
    let script = format!("comment first\n{line}\n");
    let dir = suite_dir(&[("tests/a.t2s", script.as_str())]);

    let parse = match Suite::open(dir.path()).err().unwrap() {
        BuildError::Parse(parse) => parse,
        other => panic!("expected parse error, got {other:?}"),
    };
    assert_eq!(parse.line, 2);
    assert_eq!(parse.reason.to_string(), reason);
}

#[test]
fn duplicate_compare_string_fails_the_build() {
    let dir = suite_dir(&[
        ("tests/a.t2s", "comment\n"),
        ("tests/compare-strings.t2s", "k 1\n\nk 2\n"),
    ]);

    let err = Suite::open(dir.path()).err().unwrap();
    assert!(
        err.to_string().ends_with("compare-strings.t2s:3: Compare string 'k' is defined more than once."),
        "{err}"
    );
}

#[test]
fn missing_tests_directory() {
    let dir = suite_dir(&[("other/a.t2s", "click\n")]);
    let err = Suite::open(dir.path()).err().unwrap();
    assert!(matches!(err, BuildError::TestsMissing(_)));
}

#[test]
fn tests_path_that_is_a_file() {
    let dir = suite_dir(&[("tests", "not a directory
")]);
    let err = Suite::open(dir.path()).err().unwrap();
    assert!(matches!(err, BuildError::TestsNotDirectory(_)));
    assert!(
        err.to_string().starts_with("tests directory ") && err.to_string().ends_with("is not a directory"),
        "{err}"
    );
}

#[test]
fn zero_tests_anywhere() {
    let dir = suite_dir(&[
        ("tests/methods/login.t2s", "click\n"),
        ("tests/sub/readme.md", "not a script\n"),
    ]);
    let err = Suite::open(dir.path()).err().unwrap();
    assert!(matches!(err, BuildError::NoTests(_)));
}

#[test]
fn suite_config_file_is_honoured() {
    let dir = suite_dir(&[
        ("t2s.toml", "tests_dir = \"checks\"\nscript_extension = \"txt\"\n"),
        ("checks/a.txt", "comment\n"),
        ("checks/ignored.t2s", "hover\n"),
    ]);

    let suite = Suite::open(dir.path()).unwrap();
    assert_eq!(suite.config().tests_dir, "checks");
    assert_eq!(suite.tree().test_count(), 1);
    assert_eq!(suite.tree().root().name(), "checks");
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = suite_dir(&[("t2s.toml", "tests_dir = 3\n"), ("tests/a.t2s", "comment\n")]);
    let err = Suite::open(dir.path()).err().unwrap();
    assert!(matches!(err, BuildError::Config(_)));
}

#[test]
fn methods_do_not_inherit_but_compare_strings_do() {
    let dir = suite_dir(&[
        ("tests/compare-strings.t2s", "greeting Hello\n"),
        ("tests/methods/login.t2s", "click\n"),
        ("tests/child/a.t2s", "comment\n"),
    ]);

    let suite = Suite::open(dir.path()).unwrap();
    let tree = suite.tree();
    let child = tree.find("tests/child").unwrap().id;

    assert!(tree.method(ScenarioId::ROOT, "login").is_some());
    assert!(tree.method(child, "login").is_none());
    assert_eq!(tree.compare_string(child, "greeting"), Some("Hello"));
}

#[test]
fn reopening_a_suite_rebuilds_cleanly() {
    let dir = suite_dir(&[
        ("tests/a.t2s", "comment\n"),
        ("tests/compare-strings.t2s", "k v\n"),
    ]);

    let first = Suite::open(dir.path()).unwrap();
    let second = Suite::open_with_config(dir.path(), first.config().clone()).unwrap();
    assert_eq!(second.tree().compare_string(ScenarioId::ROOT, "k"), Some("v"));
}

#[test]
fn custom_compare_strings_name_is_still_excluded_from_tests() {
    let config = SuiteConfig {
        compare_strings_file: "strings.t2s".to_string(),
        ..SuiteConfig::default()
    };
    let dir = suite_dir(&[
        ("tests/a.t2s", "comment\n"),
        ("tests/strings.t2s", "k v\n"),
    ]);

    let suite = Suite::open_with_config(dir.path(), config).unwrap();
    assert_eq!(suite.tree().test_count(), 1);
    assert_eq!(suite.tree().compare_string(ScenarioId::ROOT, "k"), Some("v"));
}
