//! Fragment classification by file naming convention.

use std::path::Path;

use crate::domain::model::{Classification, Role, SourceFragment};

const I18N_SUFFIX: &str = ".i18n";
/// Length of the `.vue.<locale>.i18n` tail, assuming a two-letter locale.
const I18N_CONVENTION_LEN: usize = 12;
const SCOPED_SUFFIX: &str = ".scoped";
const APP_SEGMENT: &str = "app";

/// Single recognition rule tried against a file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Matcher {
    /// `<name>.vue.<locale>.i18n`, checked before anything else.
    Locale,
    /// `<name>.vue.<ext>` for one extension of the role table.
    Extension(&'static str, Role),
}

/// Matchers in evaluation order. The first one that matches wins.
static MATCHERS: [Matcher; 12] = [
    Matcher::Locale,
    Matcher::Extension("html", Role::Template),
    Matcher::Extension("js", Role::Script),
    Matcher::Extension("css", Role::Style),
    Matcher::Extension("jade", Role::Template),
    Matcher::Extension("pug", Role::Template),
    Matcher::Extension("coffee", Role::Script),
    Matcher::Extension("ts", Role::Script),
    Matcher::Extension("sass", Role::Style),
    Matcher::Extension("scss", Role::Style),
    Matcher::Extension("less", Role::Style),
    Matcher::Extension("styl", Role::Style),
];

/// Recognized fragment extensions with their roles, in match order.
pub fn extensions() -> impl Iterator<Item = (&'static str, Role)> {
    MATCHERS.iter().filter_map(|matcher| match matcher {
        Matcher::Extension(ext, role) => Some((*ext, *role)),
        Matcher::Locale => None,
    })
}

/// Determine which component `path` belongs to and the role it plays.
///
/// Returns `None` for files that follow neither naming convention. Paths that
/// are not valid UTF-8 cannot carry a component name and are skipped.
pub fn classify(path: &Path) -> Option<Classification> {
    let Some(raw) = path.to_str() else {
        tracing::warn!(path = %path.display(), "skipping non UTF-8 path");
        return None;
    };
    MATCHERS
        .iter()
        .find_map(|matcher| matcher.apply(path, raw))
}

impl Matcher {
    fn apply(&self, path: &Path, raw: &str) -> Option<Classification> {
        match *self {
            Matcher::Locale => {
                if !raw.ends_with(I18N_SUFFIX) {
                    return None;
                }
                Some(Classification {
                    name: drop_last_chars(raw, I18N_CONVENTION_LEN).to_owned(),
                    fragment: SourceFragment {
                        path: path.to_path_buf(),
                        role: Role::I18n,
                        lang: String::new(),
                        scoped: false,
                    },
                })
            }
            Matcher::Extension(ext, role) => {
                let mut name = raw.strip_suffix(ext)?.strip_suffix(".vue.")?;
                let mut scoped = false;
                if role == Role::Style {
                    // The `.scoped` marker only affects the lookup name.
                    name = name.strip_suffix(SCOPED_SUFFIX).unwrap_or(name);
                    scoped = !is_app_component(name);
                }
                Some(Classification {
                    name: name.to_owned(),
                    fragment: SourceFragment {
                        path: path.to_path_buf(),
                        role,
                        lang: ext.to_owned(),
                        scoped,
                    },
                })
            }
        }
    }
}

/// True when `name` ends in `/app`. Only `/` counts as a separator here.
fn is_app_component(name: &str) -> bool {
    name.strip_suffix(APP_SEGMENT)
        .is_some_and(|rest| rest.ends_with('/'))
}

fn drop_last_chars(value: &str, count: usize) -> &str {
    if count == 0 {
        return value;
    }
    match value.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &value[..idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(path: &str) -> Classification {
        classify(Path::new(path)).expect("path should classify")
    }

    #[test]
    fn every_extension_maps_to_exactly_one_role() {
        let table = [
            ("html", Role::Template),
            ("jade", Role::Template),
            ("pug", Role::Template),
            ("js", Role::Script),
            ("coffee", Role::Script),
            ("ts", Role::Script),
            ("css", Role::Style),
            ("sass", Role::Style),
            ("scss", Role::Style),
            ("less", Role::Style),
            ("styl", Role::Style),
        ];
        for (ext, role) in table {
            let found = classified(&format!("/src/Widget.vue.{ext}"));
            assert_eq!(found.name, "/src/Widget", "extension {ext}");
            assert_eq!(found.fragment.role, role, "extension {ext}");
            assert_eq!(found.fragment.lang, ext);

            let file = format!("Widget.vue.{ext}");
            let matching: Vec<_> = extensions()
                .filter(|(candidate, _)| file.ends_with(&format!(".vue.{candidate}")))
                .collect();
            assert_eq!(matching, vec![(ext, role)]);
        }
    }

    #[test]
    fn locale_files_strip_the_twelve_character_tail() {
        let found = classified("/src/Greeter.vue.en.i18n");
        assert_eq!(found.name, "/src/Greeter");
        assert_eq!(found.fragment.role, Role::I18n);
        assert!(found.fragment.lang.is_empty());
        assert!(!found.fragment.scoped);
    }

    #[test]
    fn malformed_locale_names_are_truncated_not_rejected() {
        let found = classified("/src/Greeter.vue.en-US.i18n");
        assert_eq!(found.name, "/src/Greeter.vu");
        assert_eq!(found.fragment.role, Role::I18n);

        let short = classified("a.i18n");
        assert_eq!(short.name, "");
    }

    #[test]
    fn styles_are_scoped_unless_named_app() {
        let widget = classified("/src/Widget.vue.scss");
        assert!(widget.fragment.scoped);

        let app = classified("/src/app.vue.css");
        assert_eq!(app.name, "/src/app");
        assert!(!app.fragment.scoped);

        let not_app = classified("/src/myapp.vue.css");
        assert!(not_app.fragment.scoped);

        let backslash = classified("C:\\src\\app.vue.css");
        assert_eq!(backslash.name, "C:\\src\\app");
        assert!(backslash.fragment.scoped);
    }

    #[test]
    fn scoped_suffix_only_changes_the_name() {
        let scoped = classified("/src/Widget.scoped.vue.less");
        assert_eq!(scoped.name, "/src/Widget");
        assert!(scoped.fragment.scoped);

        let app = classified("/src/app.scoped.vue.css");
        assert_eq!(app.name, "/src/app");
        assert!(!app.fragment.scoped);

        let script = classified("/src/Widget.scoped.vue.js");
        assert_eq!(script.name, "/src/Widget.scoped");
    }

    #[test]
    fn unrelated_files_are_ignored() {
        for path in ["/src/main.js", "/src/Widget.vue", "/src/Widget.vue.rs", "/README.md"] {
            assert!(classify(Path::new(path)).is_none(), "{path}");
        }
    }
}
