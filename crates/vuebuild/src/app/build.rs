//! One full assembly run: list, classify, resolve, render, write.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::app::registry::ComponentRegistry;
use crate::app::render::render;
use crate::app::resolve::{artifact_path, destination};
use crate::domain::errors::BuildError;
use crate::domain::model::OutputArtifact;
use crate::infra::fs::{DirectoryLister, WalkLister, WriteOutcome, write_if_changed};

/// Inputs for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub root: PathBuf,
    pub folder: bool,
}

impl BuildOptions {
    /// Resolve `root` against `anchor` unless it is already absolute.
    pub fn resolve(root: &str, folder: bool, anchor: &Path) -> Self {
        let candidate = Path::new(root);
        let root = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            anchor.join(candidate)
        };
        Self { root, folder }
    }
}

/// Host hook that requested a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Build,
    Watch,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Build => f.write_str("build"),
            Trigger::Watch => f.write_str("watch"),
        }
    }
}

/// Counts describing what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Distinct component names seen.
    pub components: usize,
    /// Components skipped for lacking a script or template.
    pub incomplete: usize,
    pub written: usize,
    pub unchanged: usize,
}

/// Artifacts planned from one file list.
#[derive(Debug, Default)]
pub struct Assembly {
    pub components: usize,
    pub incomplete: usize,
    pub artifacts: Vec<OutputArtifact>,
}

/// Classify `files` and render an artifact for every complete component.
///
/// The whole list is registered before any bundle is evaluated, since the
/// script or template of a component may be listed after its other parts.
pub fn assemble<P: AsRef<Path>>(files: &[P], folder: bool) -> Assembly {
    let registry = ComponentRegistry::from_paths(files);
    let mut assembly = Assembly {
        components: registry.len(),
        ..Assembly::default()
    };

    for bundle in registry.into_bundles() {
        let destination = destination(&bundle.name, folder);
        let dir = destination.parent().unwrap_or(Path::new(""));
        let Some(content) = render(&bundle, dir) else {
            tracing::debug!(component = %bundle.name, "skipping incomplete component");
            assembly.incomplete += 1;
            continue;
        };
        let path = artifact_path(&destination);
        assembly.artifacts.push(OutputArtifact {
            name: bundle.name,
            destination,
            path,
            content,
        });
    }
    assembly
}

/// Runs the assembly pipeline over a root directory.
#[derive(Debug, Clone)]
pub struct Builder<L = WalkLister> {
    options: BuildOptions,
    lister: L,
}

impl<L: DirectoryLister> Builder<L> {
    pub fn new(options: BuildOptions, lister: L) -> Self {
        Self { options, lister }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Everything except writing.
    pub fn plan(&self) -> Result<Vec<OutputArtifact>, BuildError> {
        let files = self.lister.list(&self.options.root)?;
        Ok(assemble(&files, self.options.folder).artifacts)
    }

    /// Run once. A listing failure aborts before anything is written.
    pub fn run(&self, trigger: Trigger) -> Result<BuildReport, BuildError> {
        tracing::info!(%trigger, root = %self.options.root.display(), "building vue files");

        let files = self.lister.list(&self.options.root)?;
        let assembly = assemble(&files, self.options.folder);

        let mut report = BuildReport {
            components: assembly.components,
            incomplete: assembly.incomplete,
            ..BuildReport::default()
        };
        for artifact in &assembly.artifacts {
            match write_if_changed(&artifact.path, &artifact.content)? {
                WriteOutcome::Written => {
                    tracing::debug!(path = %artifact.path.display(), "wrote component");
                    report.written += 1;
                }
                WriteOutcome::Unchanged => report.unchanged += 1,
            }
        }

        tracing::info!(
            files = files.len(),
            components = report.components,
            written = report.written,
            unchanged = report.unchanged,
            "build finished"
        );
        Ok(report)
    }
}
