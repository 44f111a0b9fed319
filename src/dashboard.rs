/// Dashboard session state: the loaded collection, the row selection and
/// the delete flow
///
/// Every delete is computed as a `DeletePlan` against the current
/// collection, written to storage, and committed to memory only once the
/// write is acknowledged. A failed write leaves the session as it was.
/// The page drives all of this through `Session<Dashboard>`.
use crate::confirmation::{Confirmation, DeleteTarget};
use crate::storage::{Snapshot, StorageBackend, StorageError, SubmissionStore};
use crate::session::Session;
use crate::submission::Submission;
use std::collections::BTreeSet;

/// The collection that results from a delete, before it is stored
#[derive(Debug, Clone, PartialEq)]
pub struct DeletePlan {
    pub target: DeleteTarget,
    /// Revision of the collection the plan was computed from
    pub base_revision: u64,
    pub remaining: Vec<Submission>,
    pub removed: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    submissions: Vec<Submission>,
    selection: BTreeSet<usize>,
    revision: u64,
    pending: Option<Confirmation>,
    busy: bool,
    loaded: bool,
    error: Option<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pending(&self) -> Option<&Confirmation> {
        self.pending.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    pub fn all_selected(&self) -> bool {
        !self.submissions.is_empty() && self.selection.len() == self.submissions.len()
    }

    /// "Total submissions: N" with the selected count when there is one
    pub fn summary(&self) -> String {
        match self.selection.len() {
            0 => format!("Total submissions: {}", self.submissions.len()),
            selected => format!(
                "Total submissions: {} ({} selected)",
                self.submissions.len(),
                selected
            ),
        }
    }

    /// Take a freshly read collection; the old selection no longer applies
    pub fn replace(&mut self, snapshot: Snapshot) {
        log::info!("Loaded {} submissions", snapshot.submissions.len());
        self.submissions = snapshot.submissions;
        self.revision = snapshot.revision;
        self.selection.clear();
        self.pending = None;
        self.loaded = true;
        self.error = None;
    }

    pub fn load_failed(&mut self, error: &StorageError) {
        log::error!("Failed to load submissions: {}", error);
        self.loaded = true;
        self.error = Some(user_message(error, "Failed to load submissions"));
    }

    pub fn toggle(&mut self, index: usize) {
        if self.busy || index >= self.submissions.len() {
            return;
        }
        if !self.selection.remove(&index) {
            self.selection.insert(index);
        }
    }

    /// Select every row, or clear the selection when every row is already selected
    pub fn select_all(&mut self) {
        if self.busy {
            return;
        }
        if self.selection.len() == self.submissions.len() {
            self.selection.clear();
        } else {
            self.selection = (0..self.submissions.len()).collect();
        }
    }

    /// Open the confirmation gate for a delete
    ///
    /// Returns `None`, leaving nothing pending, when there is nothing to
    /// delete: a row that no longer exists or an empty selection.
    pub fn request_delete(&mut self, target: DeleteTarget) -> Option<&Confirmation> {
        if self.busy {
            return None;
        }
        let count = match target {
            DeleteTarget::One(index) if index < self.submissions.len() => 1,
            DeleteTarget::One(_) => return None,
            DeleteTarget::Selected if self.selection.is_empty() => return None,
            DeleteTarget::Selected => self.selection.len(),
        };
        self.pending = Some(Confirmation::new(target, count));
        self.pending.as_ref()
    }

    /// Dismiss the gate without touching the collection or the selection
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn plan(&self, target: DeleteTarget) -> Option<DeletePlan> {
        let mut remaining = self.submissions.clone();
        match target {
            DeleteTarget::One(index) => {
                if index >= remaining.len() {
                    return None;
                }
                remaining.remove(index);
            }
            DeleteTarget::Selected => {
                if self.selection.is_empty() {
                    return None;
                }
                // Highest index first so each removal leaves the lower ones in place
                for &index in self.selection.iter().rev() {
                    if index < remaining.len() {
                        remaining.remove(index);
                    }
                }
            }
        }
        let removed = self.submissions.len() - remaining.len();
        Some(DeletePlan { target, base_revision: self.revision, remaining, removed })
    }

    /// Plan a delete and mark the session busy until `finish` is called
    pub fn start(&mut self, target: DeleteTarget) -> Option<DeletePlan> {
        if self.busy {
            return None;
        }
        self.pending = None;
        let plan = self.plan(target)?;
        self.busy = true;
        Some(plan)
    }

    /// Commit a planned delete once storage has answered
    pub fn finish(&mut self, plan: DeletePlan, result: Result<u64, StorageError>) -> Result<(), StorageError> {
        self.busy = false;
        match result {
            Ok(revision) => {
                log::info!("Deleted {} submission(s)", plan.removed);
                self.submissions = plan.remaining;
                self.revision = revision;
                match plan.target {
                    DeleteTarget::One(index) => {
                        self.selection = self
                            .selection
                            .iter()
                            .filter(|&&selected| selected != index)
                            .map(|&selected| if selected > index { selected - 1 } else { selected })
                            .collect();
                    }
                    DeleteTarget::Selected => self.selection.clear(),
                }
                self.error = None;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete submissions: {}", e);
                self.error = Some(user_message(&e, "Failed to delete submission(s)"));
                Err(e)
            }
        }
    }
}

impl DeletePlan {
    /// Store the remaining collection, refused if storage moved past the
    /// revision the plan was made from
    pub async fn write<B: StorageBackend>(&self, store: &SubmissionStore<B>) -> Result<u64, StorageError> {
        store.save(self.base_revision, &self.remaining).await
    }
}

/// Async operations run against the shared session
///
/// `on_change` is called whenever the state visibly changes so the page can
/// re-render.
impl Session<Dashboard> {
    pub async fn load<B: StorageBackend>(
        &self,
        store: &SubmissionStore<B>,
        on_change: impl Fn(),
    ) -> Result<(), StorageError> {
        let result = store.load().await;
        let outcome = self.update(|dashboard| match result {
            Ok(snapshot) => {
                dashboard.replace(snapshot);
                Ok(())
            }
            Err(e) => {
                dashboard.load_failed(&e);
                Err(e)
            }
        });
        on_change();
        outcome
    }

    /// Run the delete the user just confirmed
    pub async fn confirm<B: StorageBackend>(
        &self,
        store: &SubmissionStore<B>,
        on_change: impl Fn(),
    ) -> Result<(), StorageError> {
        let pending = self.update(|dashboard| dashboard.pending.take());
        match pending {
            Some(confirmation) => self.execute(store, confirmation.target, on_change).await,
            None => {
                on_change();
                Ok(())
            }
        }
    }

    pub async fn delete_one<B: StorageBackend>(
        &self,
        store: &SubmissionStore<B>,
        index: usize,
        on_change: impl Fn(),
    ) -> Result<(), StorageError> {
        self.execute(store, DeleteTarget::One(index), on_change).await
    }

    pub async fn delete_selected<B: StorageBackend>(
        &self,
        store: &SubmissionStore<B>,
        on_change: impl Fn(),
    ) -> Result<(), StorageError> {
        self.execute(store, DeleteTarget::Selected, on_change).await
    }

    /// Write only when the session accepted the delete, then commit
    async fn execute<B: StorageBackend>(
        &self,
        store: &SubmissionStore<B>,
        target: DeleteTarget,
        on_change: impl Fn(),
    ) -> Result<(), StorageError> {
        let accepted = self.update(|dashboard| dashboard.start(target));
        on_change();
        let Some(plan) = accepted else {
            return Ok(());
        };

        let result = plan.write(store).await;
        let outcome = self.update(|dashboard| dashboard.finish(plan, result));
        on_change();
        outcome
    }
}

fn user_message(error: &StorageError, generic: &str) -> String {
    match error {
        StorageError::Conflict { .. } => {
            "Submissions were changed in another window. Reload and try again.".to_string()
        }
        _ => generic.to_string(),
    }
}
