//! Output path resolution for complete components.

use std::path::{Component, Path, PathBuf};

const ARTIFACT_EXTENSION: &str = ".vue";

/// Destination for a component, without the `.vue` suffix.
///
/// With `folder` enabled, `widgets/Widget/Widget` collapses to `widgets/Widget`
/// so fragments kept in a same-named directory produce a sibling artifact.
pub fn destination(name: &str, folder: bool) -> PathBuf {
    let path = Path::new(name);
    if folder
        && let Some(parent) = path.parent()
        && path.file_name().is_some()
        && path.file_name() == parent.file_name()
    {
        return parent.to_path_buf();
    }
    path.to_path_buf()
}

/// Final artifact path: `<destination>.vue`.
pub fn artifact_path(destination: &Path) -> PathBuf {
    let mut raw = destination.as_os_str().to_owned();
    raw.push(ARTIFACT_EXTENSION);
    PathBuf::from(raw)
}

/// Express `target` relative to the directory `base`, climbing with `..` where needed.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component<'_>> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let target: Vec<Component<'_>> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push(Component::ParentDir.as_os_str());
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    relative
}
