// crates/catchfile/src/lib.rs

//! Replaces `[catchfile ...]` marker lines in a markdown document with the
//! contents of external source files.
//!
//! Include the whole of example.cpp:
//!
//! ```text
//! [catchfile example.cpp]
//! ```
//!
//! Include only the parts of example.cpp surrounded by `//[my_snippet` and `//]`:
//!
//! ```text
//! [catchfile example.cpp my_snippet]
//! ```
//!
//! The file name is resolved against the engine's base directory.
//! If a snippet name is marked multiple times in a single file, every marked
//! range gets included, in order. The whitespace indent of the included
//! content is replaced by the indent of the marker in the markdown document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)\[catchfile ([^ ]+)(?: ([^ ]+))?\]$").unwrap());

const SNIPPET_END: &str = "//]";

#[derive(Debug, Error)]
pub enum CatchfileError {
    #[error("failed to read included file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("snippet not found: '{name}' in file '{}'", path.display())]
    SnippetNotFound { name: String, path: PathBuf },
    #[error("snippet '{name}' has no closing '//]' in file '{}'", path.display())]
    UnterminatedSnippet { name: String, path: PathBuf },
}

/// Read access to included source files.
///
/// The engine reads through this trait so that tests can substitute a double
/// (for example, one that counts how often a file is opened).
pub trait SourceReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Default reader backed by the real filesystem.
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// The inclusion engine. Holds the base directory that included file paths
/// are resolved against; no other state is kept between markers.
pub struct Catchfile {
    base_dir: PathBuf,
    reader: Box<dyn SourceReader>,
}

impl Catchfile {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::with_reader(base_dir, Box::new(FsReader))
    }

    pub fn with_reader<P: AsRef<Path>>(base_dir: P, reader: Box<dyn SourceReader>) -> Self {
        Catchfile {
            base_dir: base_dir.as_ref().to_path_buf(),
            reader,
        }
    }

    /// Processes an ordered sequence of document lines.
    ///
    /// Each line matching the marker pattern is replaced by a single (possibly
    /// multi-line) element holding the included content, re-indented to the
    /// marker's own indentation. Every other line passes through unchanged,
    /// including lines that only resemble the marker pattern.
    ///
    /// Each marker re-reads its file: the same marker appearing twice opens
    /// the file twice. Files are assumed not to change during one run.
    ///
    /// # Errors
    ///
    /// Fails if a referenced file cannot be read, if a named snippet yields
    /// no content, or if a snippet region is left open at end of file.
    pub fn process<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<String>, CatchfileError> {
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let line = line.as_ref();
            match MARKER_RE.captures(line) {
                Some(caps) => {
                    let indent = &caps[1];
                    let path = &caps[2];
                    let content = match caps.get(3) {
                        Some(name) => self.get_snippet(path, name.as_str())?,
                        None => self.get_file(path)?,
                    };
                    out.push(reindent(&content, indent));
                }
                None => out.push(line.to_string()),
            }
        }
        Ok(out)
    }

    /// Convenience wrapper over [`process`](Self::process): splits `text` on
    /// newlines, processes the lines, and rejoins them with `\n`.
    pub fn process_str(&self, text: &str) -> Result<String, CatchfileError> {
        let lines: Vec<&str> = text.split('\n').collect();
        Ok(self.process(&lines)?.join("\n"))
    }

    fn get_file(&self, rel_path: &str) -> Result<String, CatchfileError> {
        let path = self.base_dir.join(rel_path);
        self.reader
            .read_to_string(&path)
            .map_err(|source| CatchfileError::Io { path, source })
    }

    /// Collects every region of `name` in the file, in file order.
    ///
    /// A region begins at a line whose trimmed content is `//[name` (no
    /// closing bracket) and ends at a line whose trimmed content is `//]`.
    /// The begin line's own leading whitespace is captured per region and
    /// stripped from each body line that starts with it; the delimiter lines
    /// themselves are never emitted.
    fn get_snippet(&self, rel_path: &str, name: &str) -> Result<String, CatchfileError> {
        let path = self.base_dir.join(rel_path);
        let content = self
            .reader
            .read_to_string(&path)
            .map_err(|source| CatchfileError::Io {
                path: path.clone(),
                source,
            })?;

        let begin = format!("//[{}", name);
        let mut result = String::new();
        let mut in_region = false;
        let mut prefix = "";

        for line in content.lines() {
            let trimmed = line.trim();
            if !in_region && trimmed == begin {
                in_region = true;
                prefix = leading_whitespace(line);
            } else if in_region && trimmed == SNIPPET_END {
                in_region = false;
            } else if in_region {
                result.push_str(line.strip_prefix(prefix).unwrap_or(line));
                result.push('\n');
            }
        }

        if in_region {
            return Err(CatchfileError::UnterminatedSnippet {
                name: name.to_string(),
                path,
            });
        }
        if result.is_empty() {
            return Err(CatchfileError::SnippetNotFound {
                name: name.to_string(),
                path,
            });
        }
        Ok(result)
    }
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Inserts `indent` after every newline and in front of the first line, so
/// the included block aligns with the marker's position in the document.
fn reindent(content: &str, indent: &str) -> String {
    format!("{}{}", indent, content.replace('\n', &format!("\n{}", indent)))
}
