//! Directory listing and idempotent artifact writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Serialize;

use crate::domain::errors::BuildError;

/// Produces the flat list of files beneath a root.
///
/// The order of the returned paths is the traversal order the rest of the
/// pipeline observes (it decides the order of locale files).
pub trait DirectoryLister {
    fn list(&self, root: &Path) -> Result<Vec<PathBuf>, BuildError>;
}

/// Recursive walker returning every file under the root.
///
/// Hidden files and ignore files are not honored; only the configured
/// exclusion globs prune the walk.
#[derive(Debug, Clone, Default)]
pub struct WalkLister {
    excludes: Option<GlobSet>,
}

impl WalkLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude entries whose root-relative path matches any of `patterns`.
    pub fn with_excludes(mut self, patterns: &[String]) -> Result<Self, BuildError> {
        if patterns.is_empty() {
            return Ok(self);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| BuildError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| BuildError::InvalidGlob {
            pattern: patterns.join(", "),
            source,
        })?;
        self.excludes = Some(set);
        Ok(self)
    }
}

impl DirectoryLister for WalkLister {
    fn list(&self, root: &Path) -> Result<Vec<PathBuf>, BuildError> {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b));

        if let Some(excludes) = self.excludes.clone() {
            let root = root.to_path_buf();
            builder.filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                !excludes.is_match(rel)
            });
        }

        let mut files = Vec::new();
        for result in builder.build() {
            let entry = result.map_err(|source| BuildError::Listing {
                root: root.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_some_and(|kind| kind.is_file()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// Lister over a list computed elsewhere, returned as-is.
#[derive(Debug, Clone, Default)]
pub struct StaticLister {
    files: Vec<PathBuf>,
}

impl StaticLister {
    pub fn new(files: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            files: files.into_iter().collect(),
        }
    }
}

impl DirectoryLister for StaticLister {
    fn list(&self, _root: &Path) -> Result<Vec<PathBuf>, BuildError> {
        Ok(self.files.clone())
    }
}

/// Result of [`write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteOutcome {
    /// File was missing or stale and has been written.
    Written,
    /// File already held identical bytes and was left untouched.
    Unchanged,
}

/// Write `content` to `path` unless the file already holds exactly those bytes.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome, BuildError> {
    match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => return Ok(WriteOutcome::Unchanged),
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(BuildError::ReadArtifact {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    fs::write(path, content).map_err(|source| BuildError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriteOutcome::Written)
}
