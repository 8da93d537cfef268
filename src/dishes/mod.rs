//! Concrete recipes, one [`Cook`] per dish kind.
//!
//! Advice dishes (`design`, `ds`, `algo`) end with leveled suggestions;
//! template dishes render one or more sources through the templating
//! collaborator. Only `class` and `function` produce files worth writing.
mod algo;
mod class;
mod design;
mod ds;
mod function;
mod implementation;
mod lambda;

use crate::engine::{Chef, Cook, Dish, Kitchen, Operator, Recipe, RecipeError, TemplateRenderer};
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

pub use algo::AlgoCook;
pub use class::ClassCook;
pub use design::DesignCook;
pub use ds::DsCook;
pub use function::FunctionCook;
pub use implementation::ImplCook;
pub use lambda::LambdaCook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DishKind {
    Design,
    Class,
    Function,
    Lambda,
    Ds,
    Algo,
    Impl,
}

impl DishKind {
    /// Every dish, in cookbook order.
    pub const ALL: [DishKind; 7] = [
        DishKind::Design,
        DishKind::Class,
        DishKind::Function,
        DishKind::Lambda,
        DishKind::Ds,
        DishKind::Algo,
        DishKind::Impl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DishKind::Design => "design",
            DishKind::Class => "class",
            DishKind::Function => "function",
            DishKind::Lambda => "lambda",
            DishKind::Ds => "ds",
            DishKind::Algo => "algo",
            DishKind::Impl => "impl",
        }
    }
}

impl fmt::Display for DishKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dish selection for list mode: one dish or the whole cookbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishSelection {
    All,
    One(DishKind),
}

impl FromStr for DishSelection {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input == "all" {
            return Ok(DishSelection::All);
        }
        <DishKind as ValueEnum>::from_str(input, false)
            .map(DishSelection::One)
            .map_err(|_| {
                let names: Vec<&str> = DishKind::ALL.iter().map(|kind| kind.as_str()).collect();
                format!("unknown dish {input:?} (expected {} or all)", names.join(", "))
            })
    }
}

/// Cook `recipe` as a dish of `kind` and plate the result.
pub fn cook_dish(
    kind: DishKind,
    recipe: &Recipe,
    live_annotations: bool,
    operator: &mut dyn Operator,
    templates: &dyn TemplateRenderer,
) -> Result<Dish, RecipeError> {
    match kind {
        DishKind::Design => cook_with::<DesignCook>(recipe, live_annotations, operator, templates),
        DishKind::Class => cook_with::<ClassCook>(recipe, live_annotations, operator, templates),
        DishKind::Function => {
            cook_with::<FunctionCook>(recipe, live_annotations, operator, templates)
        }
        DishKind::Lambda => cook_with::<LambdaCook>(recipe, live_annotations, operator, templates),
        DishKind::Ds => cook_with::<DsCook>(recipe, live_annotations, operator, templates),
        DishKind::Algo => cook_with::<AlgoCook>(recipe, live_annotations, operator, templates),
        DishKind::Impl => cook_with::<ImplCook>(recipe, live_annotations, operator, templates),
    }
}

fn cook_with<C: Cook>(
    recipe: &Recipe,
    live_annotations: bool,
    operator: &mut dyn Operator,
    templates: &dyn TemplateRenderer,
) -> Result<Dish, RecipeError> {
    let mut chef = Chef::<C>::new(live_annotations);
    let report = chef.cook(recipe, operator)?;
    tracing::info!(
        metasteps = report.metasteps,
        iterations = report.iterations,
        "plating dish"
    );
    chef.plate(templates)
}

/// Ask yes/no questions in order; the first yes picks its suggestion.
fn first_yes(
    kitchen: &mut Kitchen<'_>,
    cascade: &[(&str, &'static str)],
    fallback: &'static str,
    reference: &str,
) -> Result<&'static str, RecipeError> {
    for (question, suggestion) in cascade {
        if kitchen.ask_flag(question, reference)? {
            return Ok(*suggestion);
        }
    }
    Ok(fallback)
}

/// Render `name` and wrap it as a single-file dish.
fn render_single(
    templates: &dyn TemplateRenderer,
    name: &str,
    context: &serde_json::Value,
    writable: bool,
) -> Result<Dish, RecipeError> {
    Ok(Dish::Rendered {
        files: vec![crate::engine::RenderedFile {
            name: name.to_string(),
            content: templates.render(name, context)?,
        }],
        writable,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::engine::{Console, Dish, Recipe};
    use crate::recipe::builtin_recipe;
    use crate::templates::TemplateSet;
    use std::io::Cursor;

    use super::{cook_dish, DishKind};

    /// Cook a built-in recipe with scripted answers (one per line).
    pub fn cook_scripted(kind: DishKind, answers: &[&str]) -> (Dish, String) {
        let recipe: Recipe = builtin_recipe(kind).expect("builtin recipe parses");
        let mut script = answers.join("\n");
        script.push('\n');
        let mut console = Console::new(Cursor::new(script), Vec::new());
        let dish = cook_dish(kind, &recipe, false, &mut console, &TemplateSet::default())
            .expect("cook scripted dish");
        let shown = String::from_utf8(console.into_output()).expect("utf8");
        (dish, shown)
    }

    pub fn suggestions(dish: &Dish) -> Vec<String> {
        match dish {
            Dish::Advice { advice, .. } => advice
                .iter()
                .map(|(level, msg)| format!("{level}: {msg}"))
                .collect(),
            Dish::Rendered { .. } => panic!("expected an advice dish"),
        }
    }

    pub fn rendered(dish: &Dish) -> Vec<(String, String)> {
        match dish {
            Dish::Rendered { files, .. } => files
                .iter()
                .map(|file| (file.name.clone(), file.content.clone()))
                .collect(),
            Dish::Advice { .. } => panic!("expected a rendered dish"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::builtin_recipe;

    fn missing_handlers<C: Cook>(recipe: &Recipe) -> Vec<String> {
        let registry = C::registry();
        let mut missing = Vec::new();
        for metastep in &recipe.metasteps {
            for step in &metastep.steps {
                if registry.handler(&metastep.id, &step.id).is_none() {
                    missing.push(format!("{}_step_{}", metastep.id, step.id));
                }
            }
            if metastep.repeatable && registry.hooks(&metastep.id).repeat.is_none() {
                missing.push(format!("{}_repeat", metastep.id));
            }
        }
        missing
    }

    #[test]
    fn every_builtin_recipe_step_has_a_handler() {
        for kind in DishKind::ALL {
            let recipe = builtin_recipe(kind).expect("builtin recipe parses");
            let missing = match kind {
                DishKind::Design => missing_handlers::<DesignCook>(&recipe),
                DishKind::Class => missing_handlers::<ClassCook>(&recipe),
                DishKind::Function => missing_handlers::<FunctionCook>(&recipe),
                DishKind::Lambda => missing_handlers::<LambdaCook>(&recipe),
                DishKind::Ds => missing_handlers::<DsCook>(&recipe),
                DishKind::Algo => missing_handlers::<AlgoCook>(&recipe),
                DishKind::Impl => missing_handlers::<ImplCook>(&recipe),
            };
            assert!(missing.is_empty(), "{kind}: {missing:?}");
        }
    }

    #[test]
    fn selection_accepts_all_and_every_kind() {
        assert_eq!("all".parse::<DishSelection>(), Ok(DishSelection::All));
        for kind in DishKind::ALL {
            assert_eq!(kind.as_str().parse(), Ok(DishSelection::One(kind)));
        }
        let err = "soup".parse::<DishSelection>().expect_err("unknown dish");
        assert!(err.contains("unknown dish \"soup\""));
    }
}
