//! Renders a complete bundle into a single-file component.

use std::path::{MAIN_SEPARATOR, Path};

use crate::app::resolve::relative_path;
use crate::domain::model::{ComponentBundle, SourceFragment};

/// Render the `.vue` artifact for `bundle`, referencing each fragment relative to `dir`.
///
/// Returns `None` when the bundle lacks its script or template.
pub fn render(bundle: &ComponentBundle, dir: &Path) -> Option<String> {
    let script = bundle.script.as_ref()?;
    let template = bundle.template.as_ref()?;
    let relate = |fragment: &SourceFragment| {
        format!(
            ".{MAIN_SEPARATOR}{}",
            relative_path(dir, &fragment.path).display()
        )
    };

    let mut out = String::new();
    out.push_str(&format!(
        "<script src=\"{}\" lang=\"{}\"></script>\n",
        relate(script),
        script.lang
    ));
    if let Some(style) = &bundle.style {
        let scoped = if style.scoped { " scoped" } else { "" };
        out.push_str(&format!(
            "<style src=\"{}\" lang=\"{}\"{scoped}></style>\n",
            relate(style),
            style.lang
        ));
    }
    out.push_str(&format!(
        "<template src=\"{}\" lang=\"{}\"></template>\n",
        relate(template),
        template.lang
    ));
    for locale in &bundle.i18n {
        out.push_str(&format!("<i18n src=\"{}\"></i18n>\n", relate(locale)));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::registry::ComponentRegistry;

    #[test]
    fn renders_tags_in_fixed_order() {
        let registry = ComponentRegistry::from_paths([
            "/src/Greeter.vue.en.i18n",
            "/src/Greeter.vue.pug",
            "/src/Greeter.vue.styl",
            "/src/Greeter.vue.ts",
        ]);
        let bundle = registry.get("/src/Greeter").expect("bundle");
        let rendered = render(bundle, Path::new("/src")).expect("complete bundle");
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(
            lines,
            vec![
                "<script src=\"./Greeter.vue.ts\" lang=\"ts\"></script>",
                "<style src=\"./Greeter.vue.styl\" lang=\"styl\" scoped></style>",
                "<template src=\"./Greeter.vue.pug\" lang=\"pug\"></template>",
                "<i18n src=\"./Greeter.vue.en.i18n\"></i18n>",
            ]
        );
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn omits_style_and_scoped_marker_when_absent() {
        let registry = ComponentRegistry::from_paths([
            "/src/app.vue.js",
            "/src/app.vue.html",
            "/src/app.vue.css",
            "/src/Plain.vue.js",
            "/src/Plain.vue.html",
        ]);

        let app = render(registry.get("/src/app").expect("app"), Path::new("/src"))
            .expect("complete");
        assert!(app.contains("<style src=\"./app.vue.css\" lang=\"css\"></style>"));

        let plain = render(registry.get("/src/Plain").expect("plain"), Path::new("/src"))
            .expect("complete");
        assert!(!plain.contains("<style"));
    }

    #[test]
    fn incomplete_bundles_do_not_render() {
        let registry = ComponentRegistry::from_paths(["/src/Lonely.vue.js"]);
        let lonely = registry.get("/src/Lonely").expect("bundle");
        assert!(render(lonely, Path::new("/src")).is_none());
    }
}
