//! Directory and annotation-mode settings.
//!
//! Each setting resolves from the first source that provides it: CLI flag,
//! `RCOOK_*` environment variable, then the JSON config file. Unset
//! directories mean the embedded recipes and templates are used.
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const RECIPES_DIR_ENV: &str = "RCOOK_RECIPES_DIR";
pub const TEMPLATES_DIR_ENV: &str = "RCOOK_TEMPLATES_DIR";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    recipes_dir: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
    #[serde(default)]
    live_annotations: bool,
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub recipes_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    pub recipes_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub live_annotations: bool,
}

/// `<config dir>/rcook/config.json`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rcook").join("config.json"))
}

pub fn load_settings(cli: &CliOverrides) -> Result<Settings> {
    resolve(cli, default_config_path(), env::var_os)
}

fn resolve(
    cli: &CliOverrides,
    default_config: Option<PathBuf>,
    env_lookup: impl Fn(&'static str) -> Option<OsString>,
) -> Result<Settings> {
    let file = match &cli.config {
        Some(path) => Some((load_config_file(path)?, path.clone())),
        None => match default_config {
            Some(path) if path.is_file() => Some((load_config_file(&path)?, path)),
            _ => None,
        },
    };
    let (file, base) = match file {
        Some((file, path)) => {
            let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (file, base)
        }
        None => (ConfigFile::default(), PathBuf::new()),
    };

    let from_env = |key: &'static str| {
        env_lookup(key)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    };
    let from_file = |path: Option<PathBuf>| path.map(|path| base.join(path));

    let recipes_dir = cli
        .recipes_dir
        .clone()
        .or_else(|| from_env(RECIPES_DIR_ENV))
        .or_else(|| from_file(file.recipes_dir));
    let templates_dir = cli
        .templates_dir
        .clone()
        .or_else(|| from_env(TEMPLATES_DIR_ENV))
        .or_else(|| from_file(file.templates_dir));

    ensure_dir("recipes directory", recipes_dir.as_deref())?;
    ensure_dir("templates directory", templates_dir.as_deref())?;

    let settings = Settings {
        recipes_dir,
        templates_dir,
        live_annotations: file.live_annotations,
    };
    tracing::debug!(?settings, "settings resolved");
    Ok(settings)
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

fn ensure_dir(label: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) if !path.is_dir() => Err(anyhow!(
            "{label} {} does not exist or is not a directory",
            path.display()
        )),
        _ => Ok(()),
    }
}
