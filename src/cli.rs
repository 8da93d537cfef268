//! CLI argument parsing for the cook and list commands.
use crate::config::CliOverrides;
use crate::dishes::{DishKind, DishSelection};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "rcook",
    version,
    about = "Cook C++ design advice and code skeletons from guided recipes",
    after_help = concat!(
        "Dishes: design, class, function, lambda, ds, algo, impl\n\n",
        "Examples:\n",
        "  rcook cook --dish class --output-dir src/\n",
        "  rcook list --dish function\n",
        "  rcook list --dish all --annotations --keep PERF,CON",
    ),
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logs on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// JSON config file (default: <config dir>/rcook/config.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding <dish>_recipe.json overrides
    #[arg(long, global = true, value_name = "DIR")]
    pub recipes_dir: Option<PathBuf>,

    /// Directory holding template overrides
    #[arg(long, global = true, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl RootArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config: self.config.clone(),
            recipes_dir: self.recipes_dir.clone(),
            templates_dir: self.templates_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Cook(CookArgs),
    List(ListArgs),
}

#[derive(Parser, Debug)]
#[command(about = "Answer a recipe's questions and get the dish served")]
pub struct CookArgs {
    #[arg(long, value_enum, default_value_t = DishKind::Design)]
    pub dish: DishKind,

    /// Print annotations as each metastep starts instead of with the dish
    #[arg(long)]
    pub live: bool,

    /// Write file-worthy dishes into this directory instead of the console
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Print a recipe's steps or annotations")]
pub struct ListArgs {
    /// Dish kind, or `all` together with --annotations
    #[arg(long, default_value = "design")]
    pub dish: DishSelection,

    /// List annotations instead of steps
    #[arg(long)]
    pub annotations: bool,

    /// Comma-separated annotation categories to keep
    #[arg(long, value_name = "W", default_value = "*")]
    pub keep: String,
}
