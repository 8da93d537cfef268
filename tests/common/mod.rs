//! Shared test infrastructure for integration tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Output of one `rcook` process.
#[derive(Debug)]
pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated environment for running the `rcook` binary.
///
/// Config lookups land in a private temp directory and `RCOOK_*` variables
/// from the caller's shell are removed.
pub struct Fixture {
    home: TempDir,
}

impl Fixture {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            home: TempDir::new()?,
        })
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.home.path()
    }

    /// Create a directory under the fixture root and return its path.
    #[allow(dead_code)]
    pub fn dir(&self, name: &str) -> anyhow::Result<PathBuf> {
        let dir = self.home.path().join(name);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Run `rcook` with `args`, feeding `answers` one per line on stdin.
    pub fn run(&self, args: &[&str], answers: &[&str]) -> anyhow::Result<RunOutput> {
        let mut child = Command::new(env!("CARGO_BIN_EXE_rcook"))
            .args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join("config"))
            .env_remove("RCOOK_RECIPES_DIR")
            .env_remove("RCOOK_TEMPLATES_DIR")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut script = answers.join("\n");
        if !answers.is_empty() {
            script.push('\n');
        }
        if let Some(mut stdin) = child.stdin.take() {
            // The process may exit before reading everything.
            let _ = stdin.write_all(script.as_bytes());
        }

        let output = child.wait_with_output()?;
        Ok(RunOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
