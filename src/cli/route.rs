//! CLI route: single route table and run context.

use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, TreefsConfig};
use crate::error::ApiError;
use crate::shell::{Shell, ShellOutcome};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const BANNER: &str = "treefs shell. Type 'help' for commands, 'exit' to leave.";

/// Runtime context for CLI execution: the loaded configuration and where it
/// came from.
pub struct RunContext {
    config: TreefsConfig,
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Load and validate configuration. An explicit config path replaces the
    /// user and workspace files.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::with_config(config, workspace_root, config_path)
    }

    /// Use an already-built configuration.
    pub fn with_config(
        config: TreefsConfig,
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        config.ensure_valid()?;
        Ok(Self {
            config,
            workspace_root,
            config_path,
        })
    }

    pub fn config(&self) -> &TreefsConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// A fresh shell session.
    pub fn shell(&self) -> Shell {
        Shell::new(self.config.shell.clone())
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        debug!(?command, "routing command");
        match command {
            Commands::Shell => {
                let stdin = io::stdin();
                let mut stdout = io::stdout();
                writeln!(stdout, "{}", BANNER)?;
                run_session(&mut self.shell(), stdin.lock(), &mut stdout, true)?;
                Ok(String::new())
            }
            Commands::Run { script } => self.run_script(script),
            Commands::Config { format } => self.render_config(format),
        }
    }

    /// Execute every line of a script and collect the output.
    pub fn run_script(&self, script: &Path) -> Result<String, ApiError> {
        let file = File::open(script).map_err(|e| {
            ApiError::Io(io::Error::new(
                e.kind(),
                format!("{}: {}", script.display(), e),
            ))
        })?;
        info!(script = %script.display(), "running script");

        let mut output = Vec::new();
        run_session(&mut self.shell(), BufReader::new(file), &mut output, false)?;
        let text = String::from_utf8_lossy(&output);
        Ok(text.trim_end_matches('\n').to_string())
    }

    fn render_config(&self, format: &str) -> Result<String, ApiError> {
        let body = match format {
            "toml" => self.config.to_toml()?,
            "json" => serde_json::to_string_pretty(&self.config).map_err(|e| {
                ApiError::ConfigError(format!("Failed to serialize config: {}", e))
            })?,
            other => {
                return Err(ApiError::ConfigError(format!(
                    "Unknown format '{}' (expected toml or json)",
                    other
                )))
            }
        };
        let source = match &self.config_path {
            Some(path) => format!("# source: {}", path.display()),
            None => format!("# workspace: {}", self.workspace_root.display()),
        };
        if format == "toml" {
            Ok(format!("{}\n{}", source, body.trim_end()))
        } else {
            Ok(body)
        }
    }
}

/// Drive a shell from a line reader until EOF or `exit`.
///
/// Interactive sessions print a prompt before each line. Script sessions skip
/// blank lines and lines starting with `#`.
pub fn run_session<R: BufRead, W: Write>(
    shell: &mut Shell,
    input: R,
    out: &mut W,
    interactive: bool,
) -> Result<(), ApiError> {
    let mut lines = input.lines();
    loop {
        if interactive {
            write!(out, "{}", shell.prompt())?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            if interactive {
                writeln!(out)?;
            }
            break;
        };
        let line = line?;
        if !interactive && line.trim_start().starts_with('#') {
            continue;
        }

        match shell.execute(&line) {
            ShellOutcome::Continue(text) if text.is_empty() => {}
            ShellOutcome::Continue(text) => writeln!(out, "{}", text)?,
            ShellOutcome::Exit => break,
        }
    }
    Ok(())
}
