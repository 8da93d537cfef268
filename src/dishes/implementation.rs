//! Implementation checklist: annotations only, rendered as a commented skeleton.
use super::render_single;
use crate::engine::{Annotation, Cook, Dish, HandlerRegistry, RecipeError, TemplateRenderer};
use serde_json::json;

#[derive(Debug, Default)]
pub struct ImplCook;

impl Cook for ImplCook {
    fn registry() -> HandlerRegistry<Self> {
        HandlerRegistry::new()
    }

    fn plate(
        &self,
        annotations: &[Annotation],
        templates: &dyn TemplateRenderer,
    ) -> Result<Dish, RecipeError> {
        render_single(templates, "impl.h", &json!({ "annotations": annotations }), false)
    }
}

#[cfg(test)]
mod tests {
    use crate::dishes::test_support::{cook_scripted, rendered};
    use crate::dishes::DishKind;

    #[test]
    fn checklist_lists_every_recipe_annotation() {
        let (dish, shown) = cook_scripted(DishKind::Impl, &[]);
        assert!(!dish.is_writable());
        let files = rendered(&dish);
        assert_eq!(files.len(), 1);
        let (name, content) = &files[0];
        assert_eq!(name, "impl.h");
        assert!(content.contains("// REL [cppcore.ES.20]: always initialize an object"));
        assert!(content.contains("// CON [cppcore.CP.20]: use RAII, never plain lock()/unlock()"));
        assert!(shown.contains("~~~ Recipe step - Naming ~~~"));
    }

    #[test]
    fn checklist_carries_the_verbatim_snippets() {
        let (dish, _) = cook_scripted(DishKind::Impl, &[]);
        let content = &rendered(&dish)[0].1;
        assert!(content.starts_with("//\n// rcook generated implementation checklist\n//\n// "));
        assert!(content.contains("\ntemplate <typename Callable>\nclass RaiiWrapper {\n"));
        assert!(content.contains("    bool m_do{true};\n"));
        assert!(content.contains("inline auto finally(Callable&& c) {\n"));
        assert!(content.contains("auto values = {1, 2, 3};"));
        assert!(content.contains("if (auto [value, success] = init(); success) {"));
        assert!(content.contains("    for (auto&& v : c) {\n"));
        assert!(!content.contains("{%"));
    }
}
