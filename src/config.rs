use crate::errors::{FileOperation, IoError};
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;

/// Optional overrides file, read from the project root when present.
pub const CONFIG_FILE_NAME: &str = "andaime.toml";

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(andaime::config::io))]
    Io(#[from] IoError),

    #[error("Unable to parse toml file at '{path}': {source}")]
    #[diagnostic(code(andaime::config::parse_toml), help("Review toml file"))]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Default credentials written into the generated `.env`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseDefaults {
    pub host: String,
    pub name: String,
    pub user: String,
    pub pass: String,
}
impl Default for DatabaseDefaults {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            name: "meu_banco".to_string(),
            user: "usuario".to_string(),
            pass: "senha".to_string(),
        }
    }
}

/// How the external dependency installer is invoked, and which marker path
/// means the install step can be skipped entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    pub command: String,
    pub args: Vec<String>,
    pub marker: String,
}
impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            command: "composer".to_string(),
            args: vec!["install".to_string()],
            marker: "vendor/autoload.php".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project_name: String,
    pub base_url: String,
    pub database: DatabaseDefaults,
    pub installer: InstallerConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: "meu_projeto".to_string(),
            base_url: "http://localhost/meu_projeto/".to_string(),
            database: DatabaseDefaults::default(),
            installer: InstallerConfig::default(),
        }
    }
}
impl Config {
    /// Loads `andaime.toml` from `root`, falling back to the built-in
    /// defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);

        if !path.exists() {
            log::debug!("no {} found, using defaults", CONFIG_FILE_NAME);

            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|error| IoError::new(FileOperation::Read, path.clone(), error))?;

        let parsed = toml::from_str(&content)
            .map_err(|error| ConfigError::ParseToml { path, source: error })?;

        Ok(parsed)
    }
}
