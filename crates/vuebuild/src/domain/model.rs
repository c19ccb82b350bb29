//! Domain models for fragments, component bundles, and generated artifacts.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Role a fragment plays inside its component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Script,
    Template,
    Style,
    I18n,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Script => "script",
            Role::Template => "template",
            Role::Style => "style",
            Role::I18n => "i18n",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical file recognized as part of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFragment {
    pub path: PathBuf,
    pub role: Role,
    /// Extension used verbatim as the `lang` attribute. Empty for i18n files.
    pub lang: String,
    /// Only meaningful for [`Role::Style`].
    pub scoped: bool,
}

/// A fragment together with the component name it was classified under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub name: String,
    pub fragment: SourceFragment,
}

/// All fragments collected for one logical component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentBundle {
    pub name: String,
    pub script: Option<SourceFragment>,
    pub template: Option<SourceFragment>,
    pub style: Option<SourceFragment>,
    /// Locale files in traversal order.
    pub i18n: Vec<SourceFragment>,
}

impl ComponentBundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A bundle can only be emitted once both its script and template are known.
    pub fn is_complete(&self) -> bool {
        self.script.is_some() && self.template.is_some()
    }
}

/// Merged output for one complete bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub name: String,
    /// Component name after optional folder collapsing, without the `.vue` suffix.
    pub destination: PathBuf,
    /// Final file path (`<destination>.vue`).
    pub path: PathBuf,
    pub content: String,
}
