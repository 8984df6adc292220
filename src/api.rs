use crate::{config, config::Config, preview, report::GenerationReport, scaffold, templates};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum AndaimeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] templates::TemplateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scaffold(#[from] scaffold::ScaffoldError),
}

/// Scaffolds the MVC skeleton under `root` and prints a summary of what was
/// created, preserved and failed.
///
/// # Errors
///
/// Returns an [`AndaimeError`] if:
///
/// - `andaime.toml` exists in the root but cannot be read or parsed.
/// - The dependency installer exits with a non-zero status or cannot spawn.
/// - A directory entry cannot be created, or its path exists as a file.
///
/// Individual file-write failures are not an `Err`: they are surfaced in the
/// returned [`GenerationReport`] and the run still counts as a success.
pub fn scaffold_project(root: &str) -> Result<GenerationReport, AndaimeError> {
    let root = PathBuf::from(root);

    let config = Config::load(&root)?;

    log::debug!("scaffolding '{}' into {}", config.project_name, root.display());

    let report = scaffold::try_scaffold(&root, &config)?;

    report.print_summary();

    Ok(report)
}

/// Prints the tree that [`scaffold_project`] would materialize under `root`,
/// without touching the filesystem or the installer.
///
/// # Errors
///
/// Returns an [`AndaimeError`] if the overrides file cannot be parsed or a
/// payload fails to render.
pub fn preview_plan(root: &str) -> Result<(), AndaimeError> {
    let root = PathBuf::from(root);

    let config = Config::load(&root)?;

    let plan = scaffold::default_plan(&config)?;

    preview::preview_as_tree(&plan, &root);

    Ok(())
}
