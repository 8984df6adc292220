use crate::{
    config::Config,
    errors::{FileOperation, IoError},
    installer::{InstallOutcome, Installer, InstallerError},
    plan::{PlanError, ScaffoldPlan},
    report::{GenerationReport, Outcome},
    templates::{self, TemplateError, MANIFEST_PATH},
    transactions::{Active, RollbackOperation, Transaction},
};
use colored::Colorize;
use miette::Diagnostic;
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    #[error("I/O error within scaffold domain")]
    #[diagnostic(code(andaime::scaffold::io))]
    Io(#[from] IoError),

    #[error("'{path}' exists but is not a directory")]
    #[diagnostic(
        code(andaime::scaffold::not_a_directory),
        help("Move the conflicting file out of the way and run again.")
    )]
    NotADirectory { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Installer(#[from] InstallerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Plan(#[from] PlanError),
}

/// Creates `path` and any missing ancestors. Calling this twice with the same
/// path is a no-op: an existing directory reports `SkippedExisting` without
/// touching the filesystem.
fn ensure_directory(
    trx: &mut Transaction<Active>,
    path: &Path,
) -> Result<Outcome, ScaffoldError> {
    if path.is_dir() {
        return Ok(Outcome::SkippedExisting);
    }

    if path.exists() {
        return Err(ScaffoldError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    // `create_dir_all` also creates missing ancestors; collect them up front
    // so every directory this call brings into existence can be rolled back.
    let mut missing = vec![path.to_path_buf()];
    let mut cursor = path.parent();
    while let Some(ancestor) = cursor {
        if ancestor.as_os_str().is_empty() || ancestor.exists() {
            break;
        }

        missing.push(ancestor.to_path_buf());
        cursor = ancestor.parent();
    }

    fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))?;

    println!("{} {}", "create".green(), path.display());

    // shallowest first: rollback pops in reverse, removing children before
    // their parents
    for created in missing.into_iter().rev() {
        trx.add_operation(RollbackOperation::RemoveDir(created));
    }

    Ok(Outcome::Created)
}

/// The create-only write at the heart of the scaffolder: if `path` exists in
/// any form the contents on disk are left untouched, so user customizations
/// are never overwritten.
fn write_if_absent(
    trx: &mut Transaction<Active>,
    path: &Path,
    contents: &str,
) -> Result<Outcome, IoError> {
    if path.exists() {
        log::debug!("preserving existing path: {}", path.display());

        return Ok(Outcome::SkippedExisting);
    }

    fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.to_path_buf(), error))?;

    println!("{} {}", "create".green(), path.display());

    trx.add_operation(RollbackOperation::RemoveFile(path.to_path_buf()));

    Ok(Outcome::Created)
}

/// Materializes the default plan under `root` in three phases: dependency
/// manifest and installer, then directories, then files.
///
/// The first two phases are structural prerequisites, so any failure there
/// aborts the run and rolls back everything it created. A failure while
/// writing an individual file is isolated: it is recorded in the report and
/// the remaining files are still attempted. Partial failures deliberately do
/// not turn the run into an `Err`; callers inspect the report.
pub fn try_scaffold(root: &Path, config: &Config) -> Result<GenerationReport, ScaffoldError> {
    let plan = templates::build_plan(config)?;

    let mut report = GenerationReport::new();
    let mut trx = Transaction::<Active>::new();

    // dependency phase
    let manifest_path = root.join(MANIFEST_PATH);
    let outcome = write_if_absent(&mut trx, &manifest_path, &templates::manifest_content()?)?;
    report.record(MANIFEST_PATH, outcome);

    let installer = Installer::from_config(&config.installer);
    match installer.ensure(root)? {
        InstallOutcome::Installed => log::info!("dependencies installed"),
        InstallOutcome::AlreadyInstalled => log::debug!("dependencies already installed"),
    }

    let ordered = plan.ordered()?;

    // directory phase
    for entry in ordered.iter().filter(|entry| entry.is_directory()) {
        let outcome = ensure_directory(&mut trx, &root.join(&entry.path))?;

        report.record(entry.path.clone(), outcome);
    }

    // file phase
    for entry in ordered.iter().filter(|entry| entry.is_file()) {
        let contents = entry.content().unwrap_or_default();

        match write_if_absent(&mut trx, &root.join(&entry.path), contents) {
            Ok(outcome) => report.record(entry.path.clone(), outcome),
            Err(error) => {
                log::warn!("failed to write {}: {}", entry.path.display(), error);

                report.record(entry.path.clone(), Outcome::Failed(error.to_string()));
            }
        }
    }

    trx.commit();

    Ok(report)
}

/// Exposed for the `plan` preview; kept next to the runner so the preview and
/// the real run can never disagree about the plan being materialized.
pub fn default_plan(config: &Config) -> Result<ScaffoldPlan, TemplateError> {
    templates::build_plan(config)
}
