//! Configuration management utilities.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".vuebuild/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub build: Build,
    #[serde(default)]
    pub ignore: Ignore,
    #[serde(default)]
    pub watch: Watch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Build {
    /// Root directory, absolute or relative to the anchor.
    #[serde(default)]
    pub root: String,
    /// Collapse `Name/Name.vue.*` into a sibling `Name.vue`.
    #[serde(default)]
    pub folder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ignore {
    #[serde(default)]
    pub globs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watch {
    #[serde(default = "Watch::default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Watch {
    fn default_debounce_ms() -> u64 {
        200
    }
}

impl Default for Watch {
    fn default() -> Self {
        Self {
            debounce_ms: Self::default_debounce_ms(),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    root: Option<String>,
    folder: Option<bool>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            root: env::var("VUEBUILD_ROOT").ok(),
            folder: env::var("VUEBUILD_FOLDER").ok().map(|raw| parse_flag(&raw)),
        }
    }

    #[cfg(test)]
    fn for_tests(root: &str, folder: bool) -> Self {
        Self {
            root: Some(root.to_owned()),
            folder: Some(folder),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    /// Load configuration for the workspace rooted at `anchor`.
    pub fn load(anchor: &Path) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = Some(anchor.join(DEFAULT_WORKSPACE_CONFIG_PATH));
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data).with_context(|| format!("in config file {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            build: merge_build(self.build, other.build),
            ignore: merge_ignore(self.ignore, other.ignore),
            watch: merge_watch(self.watch, other.watch),
        }
    }
}

fn merge_build(base: Build, overlay: Build) -> Build {
    Build {
        root: if overlay.root.is_empty() {
            base.root
        } else {
            overlay.root
        },
        folder: overlay.folder || base.folder,
    }
}

fn merge_ignore(base: Ignore, overlay: Ignore) -> Ignore {
    let mut globs: BTreeSet<String> = base.globs.into_iter().collect();
    globs.extend(overlay.globs);

    Ignore {
        globs: globs.into_iter().collect(),
    }
}

fn merge_watch(base: Watch, overlay: Watch) -> Watch {
    Watch {
        debounce_ms: if overlay.debounce_ms != Watch::default_debounce_ms() {
            overlay.debounce_ms
        } else {
            base.debounce_ms
        },
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("vuebuild/config.toml"))
}

/// Directory relative roots are resolved against: the enclosing repository
/// root, or the working directory outside a repository.
pub fn anchor() -> Result<PathBuf> {
    let cwd = env::current_dir().context("unable to determine working directory")?;
    Ok(find_repo_root(&cwd).unwrap_or(cwd))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(root) = env.root {
        config.build.root = root;
    }
    if let Some(folder) = env.folder {
        config.build.folder = folder;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.build.root, "");
        assert!(!config.build.folder);
        assert!(config.ignore.globs.is_empty());
        assert_eq!(config.watch.debounce_ms, 200);
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[build]
root = "src/components"
[ignore]
globs = ["node_modules"]
"#,
        )?;

        let workspace_dir = temp.path().join("repo");
        fs::create_dir_all(workspace_dir.join(".vuebuild"))?;
        fs::write(
            workspace_dir.join(".vuebuild/config.toml"),
            r#"
[build]
folder = true
[ignore]
globs = ["dist/**"]
[watch]
debounce_ms = 50
"#,
        )?;

        let config = Config::load_with_layers(
            Some(global),
            Some(workspace_dir.join(".vuebuild/config.toml")),
            EnvOverrides::default(),
        )?;

        assert_eq!(config.build.root, "src/components");
        assert!(config.build.folder);
        assert_eq!(config.ignore.globs, vec!["dist/**", "node_modules"]);
        assert_eq!(config.watch.debounce_ms, 50);
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("/abs/root", true);
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.build.root, "/abs/root");
        assert!(config.build.folder);
        Ok(())
    }

    #[test]
    fn flag_parsing_accepts_common_spellings() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn repo_root_is_found_from_nested_directory() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested)?;
        fs::create_dir_all(temp.path().join(".git"))?;
        assert_eq!(find_repo_root(&nested), Some(temp.path().to_path_buf()));
        Ok(())
    }
}
