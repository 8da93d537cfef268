//! Built-in dish templates and the renderer that resolves them.
use crate::engine::{RecipeError, TemplateRenderer};
use crate::render::render_template;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

pub const CLASS_H: &str = include_str!("../templates/class.h");
pub const CONCRETE_CLASS_H: &str = include_str!("../templates/concrete_class.h");
pub const CONCRETE_CLASS_CPP: &str = include_str!("../templates/concrete_class.cpp");
pub const HIERARCHY_CLASS_H: &str = include_str!("../templates/hierarchy_class.h");
pub const FUNCTION_H: &str = include_str!("../templates/function.h");
pub const LAMBDA_H: &str = include_str!("../templates/lambda.h");
pub const IMPL_H: &str = include_str!("../templates/impl.h");

pub fn builtin_template(name: &str) -> Option<&'static str> {
    match name {
        "class.h" => Some(CLASS_H),
        "concrete_class.h" => Some(CONCRETE_CLASS_H),
        "concrete_class.cpp" => Some(CONCRETE_CLASS_CPP),
        "hierarchy_class.h" => Some(HIERARCHY_CLASS_H),
        "function.h" => Some(FUNCTION_H),
        "lambda.h" => Some(LAMBDA_H),
        "impl.h" => Some(IMPL_H),
        _ => None,
    }
}

/// Template lookup: a file in the override directory wins over the built-in.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    override_dir: Option<PathBuf>,
}

impl TemplateSet {
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        Self { override_dir }
    }

    fn source(&self, name: &str) -> Result<String, RecipeError> {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(name);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "template override");
                return Ok(fs::read_to_string(&path)?);
            }
        }
        builtin_template(name)
            .map(str::to_string)
            .ok_or_else(|| RecipeError::UnknownTemplate(name.to_string()))
    }
}

impl TemplateRenderer for TemplateSet {
    fn render(&self, name: &str, context: &Value) -> Result<String, RecipeError> {
        let source = self.source(name)?;
        render_template(name, &source, context, &|parent| self.source(parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn override_directory_wins_over_builtin() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("lambda.h"), "auto {{ name }} = [];").expect("write");
        let set = TemplateSet::new(Some(dir.path().to_path_buf()));
        let out = set
            .render("lambda.h", &json!({"name": "cb"}))
            .expect("render override");
        assert_eq!(out, "auto cb = [];");

        let builtin = set.render("impl.h", &json!({})).expect("render builtin");
        assert!(!builtin.is_empty());
    }

    #[test]
    fn override_can_extend_a_builtin_with_jinja_markup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = "{% extends 'class.h' %}\n\
                      {% block classcontent -%}\n\
                      {% for item in members -%}\n    int {{ item }};\n{% endfor -%}\n\
                      {% raw %}    // {{ kept }}{% endraw %}\n\
                      {% endblock %}\n";
        std::fs::write(dir.path().join("concrete_class.h"), source).expect("write");
        let set = TemplateSet::new(Some(dir.path().to_path_buf()));
        let out = set
            .render(
                "concrete_class.h",
                &json!({"classname": "Widget", "members": ["a", "b"]}),
            )
            .expect("render override");
        assert!(out.contains("#ifndef RCOOK_Widget_H\n"));
        assert!(out.contains("class Widget {\nint a;\nint b;\n    // {{ kept }}\n};\n"));
        assert!(out.ends_with("#endif // RCOOK_Widget_H\n"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let err = TemplateSet::default()
            .render("nope.h", &json!({}))
            .expect_err("unknown");
        assert!(matches!(err, RecipeError::UnknownTemplate(ref name) if name == "nope.h"));
    }

    #[test]
    fn every_builtin_template_parses() {
        for name in [
            "class.h",
            "concrete_class.h",
            "concrete_class.cpp",
            "hierarchy_class.h",
            "function.h",
            "lambda.h",
            "impl.h",
        ] {
            TemplateSet::default()
                .render(name, &json!({}))
                .unwrap_or_else(|err| panic!("{name}: {err}"));
        }
    }
}
