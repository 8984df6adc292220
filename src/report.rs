use colored::Colorize;
use std::path::{Path, PathBuf};

/// Per-path result of one materialization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created,
    SkippedExisting,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Append-only record of everything a single run attempted. Owned by the
/// runner while the run is in flight, returned to the caller afterwards.
#[derive(Debug, Default)]
pub struct GenerationReport {
    entries: Vec<ReportEntry>,
}
impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<PathBuf>, outcome: Outcome) {
        self.entries.push(ReportEntry {
            path: path.into(),
            outcome,
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter()
    }

    pub fn outcome_for(&self, path: &Path) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| &entry.outcome)
    }

    pub fn created(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Created))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::SkippedExisting))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }

    pub fn print_summary(&self) {
        println!(
            "{} created, {} preserved, {} failed",
            self.created().to_string().green(),
            self.skipped().to_string().yellow(),
            self.failed().to_string().red(),
        );

        for entry in &self.entries {
            if let Outcome::Failed(reason) = &entry.outcome {
                println!("{} {}: {}", "failed".red(), entry.path.display(), reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_recorded_outcomes() {
        let mut report = GenerationReport::new();
        report.record("core", Outcome::Created);
        report.record("config/config.php", Outcome::SkippedExisting);
        report.record("routes/web.php", Outcome::Failed("disk full".to_string()));

        assert_eq!(report.created(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
    }

    #[test]
    fn outcome_lookup_by_path() {
        let mut report = GenerationReport::new();
        report.record(".env", Outcome::Created);

        assert_eq!(
            report.outcome_for(Path::new(".env")),
            Some(&Outcome::Created)
        );
        assert_eq!(report.outcome_for(Path::new("missing")), None);
    }
}
