//! Serving strategies for the final dish: console or output directory.
use super::annotation::{print_batch, Annotation};
use super::operator::{Level, Operator};
use super::RecipeError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const DISH_SERVED_BANNER: &str = r"
      (   )   (
      )   (   )
     __..---..__
 ,-='  /  |  \  `=-.   Dish served!
:--..___________..--;
 \.,_____________,./
";

/// Templating collaborator: renders a named template against a JSON context.
pub trait TemplateRenderer {
    fn render(&self, name: &str, context: &Value) -> Result<String, RecipeError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub name: String,
    pub content: String,
}

/// Artifact produced at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dish {
    /// Advice only: buffered annotations followed by leveled suggestions.
    Advice {
        annotations: Vec<Annotation>,
        advice: Vec<(Level, String)>,
    },
    /// Rendered sources. Only `writable` dishes can be served to a directory.
    Rendered {
        files: Vec<RenderedFile>,
        writable: bool,
    },
}

impl Dish {
    pub fn is_writable(&self) -> bool {
        matches!(self, Dish::Rendered { writable: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Serving {
    Console,
    Directory(PathBuf),
}

impl Serving {
    pub fn from_output_dir(output_dir: Option<PathBuf>) -> Self {
        match output_dir {
            Some(dir) => Serving::Directory(dir),
            None => Serving::Console,
        }
    }
}

/// Serve `dish` and return the paths written, if any.
///
/// Serving a dish without file output to a directory falls back to the
/// console and warns that nothing was written.
pub fn serve(
    dish: &Dish,
    serving: &Serving,
    operator: &mut dyn Operator,
) -> Result<Vec<PathBuf>, RecipeError> {
    match serving {
        Serving::Console => {
            show_console(dish, operator)?;
            Ok(Vec::new())
        }
        Serving::Directory(dir) => match dish {
            Dish::Rendered { files, .. } if dish.is_writable() => {
                let written = write_all(dir, files)?;
                for path in &written {
                    operator.say(&format!("wrote {}", path.display()))?;
                }
                Ok(written)
            }
            _ => {
                show_console(dish, operator)?;
                operator.report(Level::Warn, "This recipe has nothing to write to disk")?;
                Ok(Vec::new())
            }
        },
    }
}

fn show_console(dish: &Dish, operator: &mut dyn Operator) -> Result<(), RecipeError> {
    operator.say("")?;
    operator.say(DISH_SERVED_BANNER)?;
    match dish {
        Dish::Advice {
            annotations,
            advice,
        } => {
            print_batch(operator, annotations)?;
            for (level, msg) in advice {
                operator.report(*level, msg)?;
            }
        }
        Dish::Rendered { files, .. } => {
            for (idx, file) in files.iter().enumerate() {
                if idx > 0 {
                    operator.say("")?;
                }
                operator.say(&file.content)?;
            }
        }
    }
    Ok(())
}

/// Write every file or none: a failed write removes the files already written.
fn write_all(dir: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>, RecipeError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        match write_file(dir, &file.name, &file.content) {
            Ok(path) => written.push(path),
            Err(err) => {
                for path in &written {
                    if let Err(cleanup) = fs::remove_file(path) {
                        tracing::warn!(
                            path = %path.display(),
                            error = %cleanup,
                            "partial dish left"
                        );
                    }
                }
                return Err(err);
            }
        }
    }
    Ok(written)
}

fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf, RecipeError> {
    fs::create_dir_all(dir).map_err(|source| RecipeError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(name);
    fs::write(&path, content.as_bytes()).map_err(|source| RecipeError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "dish written");
    Ok(path)
}
