/// Popup form state and the submit flow
///
/// Flow:
/// 1. `begin` validates the inputs and marks the form busy
/// 2. The caller appends the new record to storage
/// 3. `complete` applies the outcome: on success the inputs are cleared and
///    the success message shown, on failure the inputs stay and the error
///    persists
///
/// `Session<SubmissionForm>::submit` runs all three steps against a store;
/// the popup calls nothing else to write.
use crate::config::Config;
use crate::session::Session;
use crate::storage::{StorageBackend, StorageError, SubmissionStore};
use crate::submission::{Submission, SubmissionDraft};
use crate::validation::{ValidationError, validate};
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

pub const SUCCESS_MESSAGE: &str = "✓ Success! Opening dashboard...";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Error saving submission")]
    Storage(#[from] StorageError),
    #[error("A submission is already in progress")]
    Busy,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormStatus {
    #[default]
    Hidden,
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionForm {
    pub name: String,
    pub email: String,
    pub message: String,
    busy: bool,
    status: FormStatus,
    /// Bumped on every status change, so a delayed hide only clears the
    /// message it was scheduled for
    status_generation: u64,
}

/// A stored submission and the follow-up timers for it
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    pub submission: Submission,
    pub open_dashboard_after: Duration,
    pub hide_status_after: Duration,
    /// Pass back to `hide_success` when the timer fires
    pub status_generation: u64,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Inputs are frozen while a submission is in flight
    pub fn set_field(&mut self, field: Field, value: String) {
        if self.busy {
            return;
        }
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn status_generation(&self) -> u64 {
        self.status_generation
    }

    fn set_status(&mut self, status: FormStatus) {
        self.status = status;
        self.status_generation += 1;
    }

    /// Validate the current inputs without changing any state
    fn prepare(&self) -> Result<SubmissionDraft, FormError> {
        if self.busy {
            return Err(FormError::Busy);
        }
        Ok(validate(&self.name, &self.email, &self.message)?)
    }

    pub fn begin(&mut self) -> Result<SubmissionDraft, FormError> {
        let prepared = self.prepare();
        match &prepared {
            Ok(_) => {
                self.busy = true;
                self.set_status(FormStatus::Hidden);
            }
            Err(FormError::Busy) => {}
            Err(e) => self.set_status(FormStatus::Error(e.to_string())),
        }
        prepared
    }

    /// Apply the acknowledged (or failed) storage write
    pub fn complete(&mut self, result: Result<(), StorageError>) -> Result<(), FormError> {
        self.busy = false;
        match result {
            Ok(()) => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.set_status(FormStatus::Success(SUCCESS_MESSAGE.to_string()));
                Ok(())
            }
            Err(e) => {
                log::error!("Form submission error: {}", e);
                let error = FormError::from(e);
                self.set_status(FormStatus::Error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Success messages are transient; errors stay until the next attempt
    ///
    /// Does nothing once the status has changed since `generation` was read.
    pub fn hide_success(&mut self, generation: u64) {
        if generation == self.status_generation && matches!(self.status, FormStatus::Success(_)) {
            self.set_status(FormStatus::Hidden);
        }
    }
}

impl Session<SubmissionForm> {
    /// Validate, append and apply the outcome
    ///
    /// `on_change` runs after the form goes busy and again once storage has
    /// answered.
    pub async fn submit<B: StorageBackend>(
        &self,
        store: &SubmissionStore<B>,
        config: &Config,
        now: DateTime<Utc>,
        on_change: impl Fn(),
    ) -> Result<Submitted, FormError> {
        let begun = self.update(|form| form.begin());
        on_change();
        let submission = Submission::new(begun?, now);

        let result = store.append(submission.clone()).await.map(|_| ());
        let completed = self.update(|form| form.complete(result).map(|()| form.status_generation()));
        on_change();
        let status_generation = completed?;

        log::info!("Saved submission {}", submission.id);
        Ok(Submitted {
            submission,
            open_dashboard_after: Duration::from_millis(config.redirect_delay_ms.into()),
            hide_status_after: Duration::from_millis(config.success_status_ms.into()),
            status_generation,
        })
    }
}
