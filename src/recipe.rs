//! Recipe data lookup: a `<kind>_recipe.json` file in the recipes directory
//! wins over the embedded copy.
use crate::dishes::DishKind;
use crate::engine::Recipe;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DESIGN_RECIPE: &str = include_str!("../recipes/design_recipe.json");
const CLASS_RECIPE: &str = include_str!("../recipes/class_recipe.json");
const FUNCTION_RECIPE: &str = include_str!("../recipes/function_recipe.json");
const LAMBDA_RECIPE: &str = include_str!("../recipes/lambda_recipe.json");
const DS_RECIPE: &str = include_str!("../recipes/ds_recipe.json");
const ALGO_RECIPE: &str = include_str!("../recipes/algo_recipe.json");
const IMPL_RECIPE: &str = include_str!("../recipes/impl_recipe.json");

pub fn recipe_file_name(kind: DishKind) -> String {
    format!("{kind}_recipe.json")
}

fn builtin_source(kind: DishKind) -> &'static str {
    match kind {
        DishKind::Design => DESIGN_RECIPE,
        DishKind::Class => CLASS_RECIPE,
        DishKind::Function => FUNCTION_RECIPE,
        DishKind::Lambda => LAMBDA_RECIPE,
        DishKind::Ds => DS_RECIPE,
        DishKind::Algo => ALGO_RECIPE,
        DishKind::Impl => IMPL_RECIPE,
    }
}

pub fn builtin_recipe(kind: DishKind) -> Result<Recipe> {
    serde_json::from_str(builtin_source(kind))
        .with_context(|| format!("parse built-in {}", recipe_file_name(kind)))
}

/// Load the recipe for `kind`, preferring a file in `recipes_dir`.
pub fn load_recipe(kind: DishKind, recipes_dir: Option<&Path>) -> Result<Recipe> {
    if let Some(dir) = recipes_dir {
        let path = dir.join(recipe_file_name(kind));
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading recipe file");
            let text =
                fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("parse {}", path.display()));
        }
    }
    tracing::debug!(dish = %kind, "using built-in recipe");
    builtin_recipe(kind)
}
