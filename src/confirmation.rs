/// Confirm/cancel gate in front of every delete

/// What a delete applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    /// One row, by its position in the current collection
    One(usize),
    /// Everything in the current selection
    Selected,
}

/// A delete waiting for the user to confirm or cancel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub target: DeleteTarget,
    /// Number of records that will be removed
    pub count: usize,
}

impl Confirmation {
    pub const WARNING: &'static str = "⚠️ This action cannot be undone.";

    pub fn new(target: DeleteTarget, count: usize) -> Self {
        Confirmation { target, count }
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            DeleteTarget::One(_) => "Delete Submission",
            DeleteTarget::Selected => "Delete Selected Submissions",
        }
    }

    pub fn message(&self) -> String {
        match self.target {
            DeleteTarget::One(_) => "Are you sure you want to delete this submission?".to_string(),
            DeleteTarget::Selected => format!(
                "Are you sure you want to delete {} selected submission(s)?",
                self.count
            ),
        }
    }
}
