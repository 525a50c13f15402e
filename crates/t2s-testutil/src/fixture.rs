//! Suite fixtures: a whole directory tree in one string.
//!
//! ```text
//! === tests/a.t2s
//! open file://x.html
//! assertChecked false
//! === tests/compare-strings.t2s
//! greeting Hello
//! === tests/empty/
//! ```
//!
//! A `=== path` line starts a file whose content runs to the next header.
//! A header path ending in `/` is an empty directory.

use std::io;
use std::path::PathBuf;

use t2s_kernel::vfs::{Filesystem, MemoryFs};

/// Files and empty directories parsed from fixture text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixture {
    pub files: Vec<(PathBuf, String)>,
    pub dirs: Vec<PathBuf>,
}

impl Fixture {
    /// Materialise the fixture in a fresh [`MemoryFs`].
    pub fn to_memory_fs(&self) -> io::Result<MemoryFs> {
        let fs = MemoryFs::new();
        self.write_to(&fs)?;
        Ok(fs)
    }

    /// Write the fixture into any filesystem.
    pub fn write_to(&self, fs: &dyn Filesystem) -> io::Result<()> {
        for dir in &self.dirs {
            fs.mkdir(dir)?;
        }
        for (path, content) in &self.files {
            fs.write(path, content.as_bytes())?;
        }
        Ok(())
    }
}

/// Parse fixture text. Text before the first header is an error.
pub fn parse_fixture(text: &str) -> Result<Fixture, String> {
    let mut fixture = Fixture::default();
    let mut current: Option<(PathBuf, Vec<&str>)> = None;

    for (index, line) in text.lines().enumerate() {
        if let Some(header) = line.strip_prefix("=== ") {
            if let Some((path, lines)) = current.take() {
                fixture.files.push((path, join(&lines)));
            }
            let header = header.trim();
            if let Some(dir) = header.strip_suffix('/') {
                fixture.dirs.push(PathBuf::from(dir));
            } else {
                current = Some((PathBuf::from(header), Vec::new()));
            }
            continue;
        }

        match current.as_mut() {
            Some((_, lines)) => lines.push(line),
            None if line.trim().is_empty() => {}
            None => {
                return Err(format!(
                    "line {}: content outside a file section: {line:?}",
                    index + 1
                ));
            }
        }
    }

    if let Some((path, lines)) = current {
        fixture.files.push((path, join(&lines)));
    }
    Ok(fixture)
}

fn join(lines: &[&str]) -> String {
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_files_and_dirs() {
        let fixture = parse_fixture(
            "=== tests/a.t2s\nopen x\nclick\n=== tests/empty/\n=== tests/b.t2s\ncomment\n",
        )
        .unwrap();

        assert_eq!(
            fixture.files,
            vec![
                (PathBuf::from("tests/a.t2s"), "open x\nclick\n".to_string()),
                (PathBuf::from("tests/b.t2s"), "comment\n".to_string()),
            ]
        );
        assert_eq!(fixture.dirs, vec![PathBuf::from("tests/empty")]);
    }

    #[test]
    fn content_before_header_is_rejected() {
        let err = parse_fixture("\nclick\n=== tests/a.t2s\n").unwrap_err();
        assert!(err.starts_with("line 2"));
    }

    #[test]
    fn materialises_into_memory_fs() {
        let fixture = parse_fixture("=== tests/a.t2s\nclick\n=== tests/empty/\n").unwrap();
        let fs = fixture.to_memory_fs().unwrap();
        assert_eq!(fs.read_to_string(Path::new("tests/a.t2s")).unwrap(), "click\n");
        assert!(fs.stat(Path::new("tests/empty")).unwrap().is_dir());
    }
}
