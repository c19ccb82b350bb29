//! Accumulates classified fragments into component bundles.

use std::collections::BTreeMap;
use std::path::Path;

use crate::app::classify::classify;
use crate::domain::model::{Classification, ComponentBundle, Role};

/// Bundles keyed by component name. Built fresh for every run.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    bundles: BTreeMap<String, ComponentBundle>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and register every path. Paths outside the convention are skipped.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut registry = Self::new();
        for path in paths {
            if let Some(classification) = classify(path.as_ref()) {
                registry.register(classification);
            }
        }
        registry
    }

    /// Insert a fragment. Later fragments replace earlier ones for the same
    /// role, except locale files which accumulate in insertion order.
    pub fn register(&mut self, classification: Classification) {
        let Classification { name, fragment } = classification;
        tracing::debug!(
            component = %name,
            role = %fragment.role,
            path = %fragment.path.display(),
            "registered fragment"
        );
        let bundle = self
            .bundles
            .entry(name)
            .or_insert_with_key(|name| ComponentBundle::new(name.clone()));
        match fragment.role {
            Role::Script => bundle.script = Some(fragment),
            Role::Template => bundle.template = Some(fragment),
            Role::Style => bundle.style = Some(fragment),
            Role::I18n => bundle.i18n.push(fragment),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ComponentBundle> {
        self.bundles.get(name)
    }

    pub fn bundles(&self) -> impl Iterator<Item = &ComponentBundle> {
        self.bundles.values()
    }

    pub fn into_bundles(self) -> impl Iterator<Item = ComponentBundle> {
        self.bundles.into_values()
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_fragments_by_component_name() {
        let registry = ComponentRegistry::from_paths([
            "/src/Widget.vue.scss",
            "/src/Widget.vue.js",
            "/src/Other.vue.html",
            "/src/Widget.vue.html",
            "/src/notes.txt",
        ]);

        assert_eq!(registry.len(), 2);
        let widget = registry.get("/src/Widget").expect("widget bundle");
        assert!(widget.is_complete());
        assert_eq!(widget.style.as_ref().map(|s| s.lang.as_str()), Some("scss"));

        let other = registry.get("/src/Other").expect("other bundle");
        assert!(!other.is_complete());
    }

    #[test]
    fn later_fragment_for_same_role_wins() {
        let registry =
            ComponentRegistry::from_paths(["/src/Widget.vue.js", "/src/Widget.vue.ts"]);
        let widget = registry.get("/src/Widget").expect("widget bundle");
        assert_eq!(widget.script.as_ref().map(|s| s.lang.as_str()), Some("ts"));
    }

    #[test]
    fn locale_files_accumulate_in_traversal_order() {
        let registry = ComponentRegistry::from_paths([
            "/src/Greeter.vue.fr.i18n",
            "/src/Greeter.vue.js",
            "/src/Greeter.vue.en.i18n",
        ]);
        let greeter = registry.get("/src/Greeter").expect("greeter bundle");
        let locales: Vec<_> = greeter
            .i18n
            .iter()
            .map(|f| f.path.display().to_string())
            .collect();
        assert_eq!(
            locales,
            vec!["/src/Greeter.vue.fr.i18n", "/src/Greeter.vue.en.i18n"]
        );
    }
}
