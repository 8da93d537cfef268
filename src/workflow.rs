//! Command orchestration: settings, recipe lookup, then cook or list.
use crate::cli::{Command, CookArgs, ListArgs, RootArgs};
use crate::config::{load_settings, Settings};
use crate::dishes::cook_dish;
use crate::engine::{serve, Console, Serving};
use crate::listing::{list, ListRequest};
use crate::recipe::load_recipe;
use crate::templates::TemplateSet;
use anyhow::{Context, Result};
use std::io;

pub fn run(args: RootArgs) -> Result<()> {
    let settings = load_settings(&args.overrides())?;
    match args.command {
        Command::Cook(cook) => run_cook(&cook, &settings),
        Command::List(list) => run_list(&list, &settings),
    }
}

pub fn run_cook(args: &CookArgs, settings: &Settings) -> Result<()> {
    let recipe = load_recipe(args.dish, settings.recipes_dir.as_deref())?;
    let templates = TemplateSet::new(settings.templates_dir.clone());
    let live = args.live || settings.live_annotations;
    tracing::info!(dish = %args.dish, live, "cooking");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let dish = cook_dish(args.dish, &recipe, live, &mut console, &templates)
        .with_context(|| format!("cook {} dish", args.dish))?;
    let serving = Serving::from_output_dir(args.output_dir.clone());
    let written = serve(&dish, &serving, &mut console).context("serve dish")?;
    tracing::info!(files = written.len(), "dish served");
    Ok(())
}

pub fn run_list(args: &ListArgs, settings: &Settings) -> Result<()> {
    let request = ListRequest {
        selection: args.dish,
        annotations: args.annotations,
        keep: &args.keep,
    };
    let stdout = io::stdout();
    list(&mut stdout.lock(), request, settings.recipes_dir.as_deref())
}
