use std::{fs, marker::PhantomData, path::PathBuf};

/// Undo actions registered while a run mutates the filesystem.
pub enum RollbackOperation {
    RemoveFile(PathBuf),
    RemoveDir(PathBuf),
}

/// Transaction still accumulating operations.
pub struct Active;
/// Transaction that finished successfully; drop is a no-op.
pub struct Committed;

pub trait TransactionState {
    const SHOULD_ROLLBACK: bool;
}
impl TransactionState for Active {
    const SHOULD_ROLLBACK: bool = true;
}
impl TransactionState for Committed {
    const SHOULD_ROLLBACK: bool = false;
}

/// Tracks every path a run created so a fatal abort can remove them again.
/// Only paths registered through [`Transaction::add_operation`] are touched on
/// rollback, so pre-existing files and directories are never removed.
///
/// The state parameter decides the drop behavior: an `Active` transaction that
/// goes out of scope (the error path) rolls back in reverse order, while the
/// `Committed` transaction returned by [`Transaction::commit`] does nothing.
pub struct Transaction<State: TransactionState> {
    rollback_operations: Vec<RollbackOperation>,
    state: PhantomData<State>,
}
impl Transaction<Active> {
    pub fn new() -> Self {
        Transaction {
            rollback_operations: vec![],
            state: PhantomData,
        }
    }

    pub fn add_operation(&mut self, operation: RollbackOperation) {
        self.rollback_operations.push(operation);
    }

    /// Finalizes the transaction, preventing any rollback from occurring.
    pub fn commit(mut self) -> Transaction<Committed> {
        self.rollback_operations.clear();

        Transaction {
            rollback_operations: vec![],
            state: PhantomData,
        }
    }
}
impl Default for Transaction<Active> {
    fn default() -> Self {
        Self::new()
    }
}
impl<S: TransactionState> Drop for Transaction<S> {
    fn drop(&mut self) {
        if S::SHOULD_ROLLBACK && !self.rollback_operations.is_empty() {
            log::debug!("rolling back {} operations", self.rollback_operations.len());

            while let Some(operation) = self.rollback_operations.pop() {
                match operation {
                    RollbackOperation::RemoveDir(path) => {
                        log::debug!("removing dir: {}", path.display());
                        let _ = fs::remove_dir_all(&path);
                    }
                    RollbackOperation::RemoveFile(path) => {
                        log::debug!("removing file: {}", path.display());
                        let _ = fs::remove_file(&path);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_an_active_transaction_rolls_back() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("generated.txt");
        fs::write(&file, "payload").unwrap();

        {
            let mut trx = Transaction::<Active>::new();
            trx.add_operation(RollbackOperation::RemoveFile(file.clone()));
        }

        assert!(!file.exists());
    }

    #[test]
    fn committed_transactions_leave_files_alone() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("generated.txt");
        fs::write(&file, "payload").unwrap();

        let mut trx = Transaction::<Active>::new();
        trx.add_operation(RollbackOperation::RemoveFile(file.clone()));
        let _committed = trx.commit();

        assert!(file.exists());
    }
}
