//! List mode: print a recipe's steps as JSON or its annotations as lines.
use crate::dishes::{DishKind, DishSelection};
use crate::engine::{Annotation, Metastep, Recipe, Step};
use crate::recipe::load_recipe;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const RECIPE_BANNER: &str = r"
 __________
|  RECIPE  |
|&&& ======|
|=== ======|
|=== == %%$|  Here is the recipe!
|[_] ======|
|=== ===!##|
|__________|
";

#[derive(Debug, Serialize)]
struct CookStep {
    cookstep: String,
    description: String,
    substeps: Vec<String>,
}

/// Listing request resolved from the `list` command.
#[derive(Debug, Clone, Copy)]
pub struct ListRequest<'a> {
    pub selection: DishSelection,
    pub annotations: bool,
    pub keep: &'a str,
}

pub fn list(
    out: &mut impl Write,
    request: ListRequest<'_>,
    recipes_dir: Option<&Path>,
) -> Result<()> {
    let kinds: Vec<DishKind> = match request.selection {
        DishSelection::All if !request.annotations => {
            return Err(anyhow!("dish \"all\" can only be listed with --annotations"));
        }
        DishSelection::All => DishKind::ALL.to_vec(),
        DishSelection::One(kind) => vec![kind],
    };

    writeln!(out, "{RECIPE_BANNER}").context("write recipe banner")?;
    for kind in kinds {
        let recipe = load_recipe(kind, recipes_dir)?;
        let body = if request.annotations {
            annotation_lines(&recipe, request.keep).join("\n")
        } else {
            steps_json(&recipe)?
        };
        if !body.is_empty() {
            writeln!(out, "{body}").context("write listing")?;
        }
    }
    Ok(())
}

fn steps_json(recipe: &Recipe) -> Result<String> {
    let steps: Vec<CookStep> = recipe
        .metasteps
        .iter()
        .map(|metastep: &Metastep| CookStep {
            cookstep: metastep.id.clone(),
            description: metastep.desc.clone(),
            substeps: metastep.steps.iter().map(substep).collect(),
        })
        .collect();
    if steps.is_empty() {
        return Ok(String::new());
    }
    serde_json::to_string_pretty(&steps).context("serialize recipe steps")
}

fn substep(step: &Step) -> String {
    format!("{}: {}", step.id, step.desc)
}

/// Annotation lines whose category matches the comma-separated whitelist.
///
/// `*` is always part of the whitelist; an entry matches any category that
/// contains it, and a lone `*` keeps everything.
pub fn annotation_lines(recipe: &Recipe, keep: &str) -> Vec<String> {
    let whitelist = if keep.contains('*') {
        keep.to_string()
    } else {
        format!("{keep},*")
    };
    recipe
        .annotations()
        .filter(|annotation| {
            whitelist == "*"
                || whitelist
                    .split(',')
                    .any(|entry| annotation.kind.contains(entry))
        })
        .map(annotation_line)
        .collect()
}

fn annotation_line(annotation: &Annotation) -> String {
    format!(
        "{} [{}]: {}",
        annotation.kind, annotation.reference, annotation.msg
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            metasteps: vec![
                Metastep {
                    id: "m1".to_string(),
                    desc: "First".to_string(),
                    repeatable: false,
                    annotations: vec![
                        Annotation::new("PERF", "R1", "measure first"),
                        Annotation::new("USA", "R2", "keep it simple"),
                    ],
                    steps: vec![Step {
                        id: "s1".to_string(),
                        reference: "R3".to_string(),
                        desc: "Pick a name".to_string(),
                    }],
                },
                Metastep {
                    id: "m2".to_string(),
                    desc: "Second".to_string(),
                    repeatable: true,
                    annotations: vec![Annotation::new("*", "R4", "always shown")],
                    steps: Vec::new(),
                },
            ],
        }
    }

    fn listed(request: ListRequest<'_>) -> String {
        let mut out = Vec::new();
        list(&mut out, request, None).expect("list");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn steps_are_pretty_json_in_declaration_order() {
        let json = steps_json(&recipe()).expect("json");
        assert_eq!(
            json,
            r#"[
  {
    "cookstep": "m1",
    "description": "First",
    "substeps": [
      "s1: Pick a name"
    ]
  },
  {
    "cookstep": "m2",
    "description": "Second",
    "substeps": []
  }
]"#
        );
    }

    #[test]
    fn star_alone_keeps_everything() {
        assert_eq!(
            annotation_lines(&recipe(), "*"),
            vec![
                "PERF [R1]: measure first",
                "USA [R2]: keep it simple",
                "* [R4]: always shown",
            ]
        );
    }

    #[test]
    fn whitelist_matches_substrings_and_always_keeps_star() {
        assert_eq!(
            annotation_lines(&recipe(), "PER"),
            vec!["PERF [R1]: measure first", "* [R4]: always shown"]
        );
        assert_eq!(
            annotation_lines(&recipe(), "CON"),
            vec!["* [R4]: always shown"]
        );
    }

    #[test]
    fn all_requires_annotations() {
        let mut out = Vec::new();
        let err = list(
            &mut out,
            ListRequest {
                selection: DishSelection::All,
                annotations: false,
                keep: "*",
            },
            None,
        )
        .expect_err("all without annotations");
        assert!(err.to_string().contains("--annotations"));
        assert!(out.is_empty());
    }

    #[test]
    fn all_annotations_print_one_banner() {
        let shown = listed(ListRequest {
            selection: DishSelection::All,
            annotations: true,
            keep: "*",
        });
        assert_eq!(shown.matches("Here is the recipe!").count(), 1);
        assert!(shown.contains("REL [cppcore.ES.20]: always initialize an object"));
        assert!(shown.contains("CON [cppcore.CP.20]: use RAII, never plain lock()/unlock()"));
    }

    #[test]
    fn builtin_steps_listing_names_every_metastep() {
        let shown = listed(ListRequest {
            selection: DishSelection::One(DishKind::Lambda),
            annotations: false,
            keep: "*",
        });
        assert!(shown.starts_with(RECIPE_BANNER));
        for id in ["lambda_root", "capture_list", "lambda_attr"] {
            assert!(shown.contains(&format!("\"cookstep\": \"{id}\"")), "{id}");
        }
    }
}
