use crate::config::InstallerConfig;
use miette::Diagnostic;
use std::{
    path::{Path, PathBuf},
    process::Command,
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum InstallerError {
    #[error("unable to spawn dependency installer '{command}'")]
    #[diagnostic(
        code(andaime::installer::spawn),
        help("Make sure the installer is installed and available on PATH.")
    )]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dependency installer '{command}' exited with {status}")]
    #[diagnostic(
        code(andaime::installer::failed),
        help("Run the installer manually in the project root to inspect its output.")
    )]
    Failed {
        command: String,
        status: std::process::ExitStatus,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    AlreadyInstalled,
}

/// External dependency-installer collaborator. The only signal consumed is
/// the exit status; stdout and stderr pass straight through to the operator.
#[derive(Debug, Clone)]
pub struct Installer {
    command: String,
    args: Vec<String>,
    marker: PathBuf,
}
impl Installer {
    pub fn from_config(config: &InstallerConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            marker: PathBuf::from(&config.marker),
        }
    }

    /// Runs the installer inside `root` unless the marker path already
    /// exists, in which case nothing is spawned.
    pub fn ensure(&self, root: &Path) -> Result<InstallOutcome, InstallerError> {
        if root.join(&self.marker).exists() {
            log::debug!(
                "install marker '{}' present, skipping installer",
                self.marker.display()
            );

            return Ok(InstallOutcome::AlreadyInstalled);
        }

        log::info!("running '{}' in {}", self.command, root.display());

        let status = Command::new(&self.command)
            .args(&self.args)
            .current_dir(root)
            .status()
            .map_err(|error| InstallerError::Spawn {
                command: self.command.clone(),
                source: error,
            })?;

        if status.success() {
            Ok(InstallOutcome::Installed)
        } else {
            Err(InstallerError::Failed {
                command: self.command.clone(),
                status,
            })
        }
    }
}
