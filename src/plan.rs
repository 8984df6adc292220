use indexmap::IndexMap;
use miette::Diagnostic;
use ordena::Graph;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PlanError {
    #[error("duplicate scaffold entry for path '{path}'")]
    #[diagnostic(
        code(andaime::plan::duplicate_path),
        help("Every path in a scaffold plan must be declared exactly once.")
    )]
    DuplicatePath { path: PathBuf },

    #[error("scaffold entries form a dependency cycle")]
    #[diagnostic(code(andaime::plan::cycle))]
    Cycle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File { content: String },
}

/// A single path to materialize, relative to the project root.
#[derive(Debug, Clone)]
pub struct ScaffoldEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}
impl ScaffoldEntry {
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { content } => Some(content),
            EntryKind::Directory => None,
        }
    }
}

/// The full set of paths a run will materialize: insertion-ordered and
/// deduplicated by path.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldPlan {
    entries: IndexMap<PathBuf, ScaffoldEntry>,
}
impl ScaffoldPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(&mut self, path: impl Into<PathBuf>) -> Result<(), PlanError> {
        self.push(ScaffoldEntry {
            path: path.into(),
            kind: EntryKind::Directory,
        })
    }

    pub fn file(&mut self, path: impl Into<PathBuf>, content: String) -> Result<(), PlanError> {
        self.push(ScaffoldEntry {
            path: path.into(),
            kind: EntryKind::File { content },
        })
    }

    pub fn push(&mut self, entry: ScaffoldEntry) -> Result<(), PlanError> {
        if self.entries.contains_key(&entry.path) {
            return Err(PlanError::DuplicatePath { path: entry.path });
        }

        self.entries.insert(entry.path.clone(), entry);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&ScaffoldEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ScaffoldEntry> {
        self.entries.values()
    }

    /// Returns the entries ordered so that every directory precedes anything
    /// nested under it, regardless of declaration order. The ordering is
    /// derived by topologically sorting path-prefix edges, so a file can never
    /// be attempted before its declared parent directory.
    pub fn ordered(&self) -> Result<Vec<&ScaffoldEntry>, PlanError> {
        let nodes: Vec<PathBuf> = self.entries.keys().cloned().collect();

        let mut edges: Vec<(PathBuf, PathBuf)> = Vec::new();
        for directory in self.entries().filter(|e| e.is_directory()) {
            for nested in self
                .entries()
                .filter(|e| e.path != directory.path && e.path.starts_with(&directory.path))
            {
                edges.push((directory.path.clone(), nested.path.clone()));
            }
        }

        let graph = Graph { nodes, edges };
        let order = ordena::topological_order(&graph).map_err(|_| PlanError::Cycle)?;

        Ok(order
            .iter()
            .filter_map(|path| self.entries.get(path))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_paths_are_rejected() {
        let mut plan = ScaffoldPlan::new();
        plan.directory("core").unwrap();

        let result = plan.file("core", String::new());

        assert!(matches!(result, Err(PlanError::DuplicatePath { .. })));
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn ordered_puts_directories_before_nested_entries() {
        let mut plan = ScaffoldPlan::new();
        // deliberately declared file-first
        plan.file("app/models/User.php", "<?php".to_string())
            .unwrap();
        plan.directory("app/models").unwrap();
        plan.directory("app").unwrap();

        let ordered = plan.ordered().unwrap();

        let position = |path: &str| {
            ordered
                .iter()
                .position(|e| e.path == Path::new(path))
                .unwrap()
        };

        assert!(position("app") < position("app/models"));
        assert!(position("app/models") < position("app/models/User.php"));
    }

    #[test]
    fn root_level_files_survive_ordering() {
        let mut plan = ScaffoldPlan::new();
        plan.file(".env", "DB_HOST=localhost".to_string()).unwrap();
        plan.directory("config").unwrap();

        let ordered = plan.ordered().unwrap();

        assert_eq!(ordered.len(), 2);
    }
}
