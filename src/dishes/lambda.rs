//! Lambda skeleton with capture-list advice.
use super::render_single;
use crate::engine::{
    Annotation, Cook, Dish, HandlerRegistry, Kitchen, RecipeError, TemplateRenderer,
};
use serde_json::json;

const CAPTURE_QUERY: &str = "Enter captured item full desc e.g. a = std::move(b), &c, d ...";

#[derive(Debug, Default)]
pub struct LambdaCook {
    local: bool,
    recursive: bool,
    capture: String,
    captures: Vec<String>,
    attributes: Vec<&'static str>,
}

impl LambdaCook {
    fn scope(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        self.local = kitchen.ask_flag(
            "Would the scope of the lambda be local (not returned, neither stored on the heap or pass to another thread)",
            reference,
        )?;
        Ok(())
    }

    fn recursion(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        self.recursive = kitchen.ask_flag("Should the lambda be recursive", reference)?;
        Ok(())
    }

    fn capture_count(&mut self, kitchen: &mut Kitchen<'_>) -> Result<usize, RecipeError> {
        kitchen.ask_count("Enter capture list item count")
    }

    /// Show `tip` and let the operator replace the current capture.
    fn react(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
        tip: &str,
    ) -> Result<(), RecipeError> {
        kitchen.tip(reference, tip)?;
        if kitchen.ask_flag(
            "Would you like to update captured item according to tips",
            reference,
        )? {
            self.capture = kitchen.ask_text(CAPTURE_QUERY, reference)?;
        }
        Ok(())
    }

    fn capture_name(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.capture = kitchen.ask_text(CAPTURE_QUERY, reference)?;
        Ok(())
    }

    fn capture_by_reference(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.local && self.capture != "this" && !self.capture.contains('&') {
            self.react(
                kitchen,
                reference,
                "You might want to capture by reference for local scope lambda",
            )?;
        }
        Ok(())
    }

    fn capture_by_value(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if !self.local && (self.capture == "this" || self.capture.contains('&')) {
            self.react(
                kitchen,
                reference,
                "You might want to capture by value for non-local scope lambda",
            )?;
        }
        Ok(())
    }

    fn capture_this(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        let has = |item: &str| self.captures.iter().any(|capture| capture == item);
        let mixes_default = (self.capture == "this" && (has("&") || has("=")))
            || ((self.capture == "&" || self.capture == "=") && has("this"));
        if mixes_default {
            self.react(
                kitchen,
                reference,
                "If this is captured, all variables should be captured explicitly",
            )?;
        }
        Ok(())
    }

    fn push_capture(&mut self, _kitchen: &mut Kitchen<'_>) -> Result<(), RecipeError> {
        self.captures.push(std::mem::take(&mut self.capture));
        Ok(())
    }

    fn constexpr(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if kitchen.ask_flag("Should it be evaluated at compile-time", reference)? {
            self.attributes.push("constexpr");
        }
        Ok(())
    }

    fn mutable(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        let by_value = self
            .captures
            .iter()
            .any(|capture| capture.contains('=') || capture.contains("*this"));
        if by_value
            && kitchen.ask_flag("Should the capture by value items be mutable", reference)?
        {
            self.attributes.push("mutable");
        }
        Ok(())
    }
}

impl Cook for LambdaCook {
    fn registry() -> HandlerRegistry<Self> {
        HandlerRegistry::new()
            .step("lambda_root", "scope", Self::scope)
            .step("lambda_root", "recursion", Self::recursion)
            .repeat("capture_list", Self::capture_count)
            .step("capture_list", "name", Self::capture_name)
            .step("capture_list", "ref", Self::capture_by_reference)
            .step("capture_list", "nonref", Self::capture_by_value)
            .step("capture_list", "this", Self::capture_this)
            .finalize("capture_list", Self::push_capture)
            .step("lambda_attr", "constexpr", Self::constexpr)
            .step("lambda_attr", "mutable", Self::mutable)
    }

    fn plate(
        &self,
        annotations: &[Annotation],
        templates: &dyn TemplateRenderer,
    ) -> Result<Dish, RecipeError> {
        let context = json!({
            "annotations": annotations,
            "recursive": self.recursive,
            "captures": self.captures,
            "attr": self.attributes.join(" "),
        });
        render_single(templates, "lambda.h", &context, false)
    }
}

#[cfg(test)]
mod tests {
    use crate::dishes::test_support::{cook_scripted, rendered};
    use crate::dishes::DishKind;

    #[test]
    fn local_lambda_suggests_reference_capture() {
        let (dish, shown) = cook_scripted(
            DishKind::Lambda,
            &["y", "n", "2", "a", "y", "&a", "&b", "n"],
        );
        assert!(shown.contains(
            "(!) TIPS [cppcore.F.52]: You might want to capture by reference for local scope lambda"
        ));
        assert!(shown.contains("~~~ Repeat count - 2 ~~~"));
        assert!(!dish.is_writable());
        let files = rendered(&dish);
        assert_eq!(files[0].0, "lambda.h");
        assert!(files[0].1.contains("auto fn = [&a, &b](/*params*/)  {"));
    }

    #[test]
    fn this_mixed_with_default_capture_is_flagged() {
        let (dish, shown) = cook_scripted(
            DishKind::Lambda,
            &["n", "n", "2", "=", "this", "n", "n", "y", "y"],
        );
        assert!(shown.contains("You might want to capture by value for non-local scope lambda"));
        assert!(shown.contains("If this is captured, all variables should be captured explicitly"));
        let files = rendered(&dish);
        assert!(files[0]
            .1
            .contains("auto fn = [=, this](/*params*/) constexpr mutable {"));
    }

    #[test]
    fn zero_captures_skip_the_capture_list() {
        let (dish, shown) = cook_scripted(DishKind::Lambda, &["y", "y", "0", "n"]);
        assert!(!shown.contains("Enter captured item"));
        assert!(!shown.contains("capture by value items be mutable"));
        let files = rendered(&dish);
        assert!(files[0]
            .1
            .contains("auto fn = [](auto&& self /*, params*/)  {"));
    }
}
