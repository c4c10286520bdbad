//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use printease_commerce::session::StorefrontSession;
use printease_store::FileStore;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            // Try to find config in current directory or parent directories
            None => match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "using config file");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if !config_path.exists() {
                    continue;
                }
                match CliConfig::load(&config_path) {
                    Ok(config) => return Some((config_path, config)),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "skipping config file");
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory the store lives in.
    pub fn store_dir(&self) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path());
        resolve(base, &self.config.store.dir)
    }

    /// Open the file-backed store.
    pub fn open_store(&self) -> Result<FileStore> {
        let dir = self.store_dir();
        FileStore::open(&dir)
            .with_context(|| format!("Failed to open store at {}", dir.display()))
    }

    /// Open a storefront session on the configured store.
    pub fn open_session(&self) -> Result<StorefrontSession<FileStore>> {
        let store = self.open_store()?;
        StorefrontSession::simulated(store, self.config.commerce.clone())
            .context("Failed to start storefront session")
    }
}

/// Resolve a path relative to a base directory.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
