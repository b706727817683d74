//! Single-cell edit lifecycle.
//!
//! ```text
//! Editing ──commit(unchanged)──────────────► Success
//!    │
//!    └─commit(changed)─► Pending ─valid────► Success   (persist draft)
//!                           │   ─invalid──► Error     (persist original)
//!                           └───abort─────► Cancelled (persist original)
//! Editing/Pending ──cancel─► Cancelled
//! ```
//!
//! Transitions only move forward; a settled session ignores further input.

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use serde::Serialize;

use super::validator::{ValidationOutcome, Validator};
use crate::error::Result;
use crate::types::{CellPosition, CellValue};

/// Message used when a validator rejects a value without saying why
pub const DEFAULT_INVALID_MESSAGE: &str = "Invalid value";

/// Identity of an edit session; later sessions have larger ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SessionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditStatus {
    Editing,
    Pending,
    Success,
    Error,
    Cancelled,
}

impl EditStatus {
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            EditStatus::Success | EditStatus::Error | EditStatus::Cancelled
        )
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommitOutcome {
    /// Draft equals original; no validation ran
    Unchanged,
    /// Validator accepted the draft
    Committed,
    /// Validator rejected the draft (or failed); original restored
    RolledBack { error: String },
    /// Session discarded before a verdict
    Cancelled,
}

/// What the host must persist once a session settles
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitPayload {
    pub session: SessionId,
    pub position: CellPosition,
    /// Index of the row in the unsorted dataset
    pub source_row: usize,
    pub column_id: String,
    /// Value to write back: the draft on success, the original otherwise
    pub value: CellValue,
    pub outcome: CommitOutcome,
}

/// Result of a validator run, or notice that it was aborted
#[derive(Debug)]
pub enum ValidationVerdict {
    Checked(Result<ValidationOutcome>),
    Aborted,
}

/// Second half of a commit: the value to validate and the abort hook.
#[derive(Debug)]
pub struct PendingValidation {
    pub session: SessionId,
    pub value: CellValue,
    registration: AbortRegistration,
}

impl PendingValidation {
    /// Run `validator`, resolving to [`ValidationVerdict::Aborted`] if the
    /// session is cancelled meanwhile.
    pub async fn run<V: Validator + ?Sized>(self, validator: &V) -> (SessionId, ValidationVerdict) {
        let check = Abortable::new(validator.validate(&self.value), self.registration);
        let verdict = match check.await {
            Ok(result) => ValidationVerdict::Checked(result),
            Err(_aborted) => ValidationVerdict::Aborted,
        };
        (self.session, verdict)
    }
}

/// First half of a commit
#[derive(Debug)]
pub enum CommitRequest {
    /// Settled without validation
    Resolved(CommitPayload),
    /// Needs an external verdict; feed it back through [`EditSession::resolve`]
    Validate(PendingValidation),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    id: SessionId,
    position: CellPosition,
    /// Index of the edited row in the unsorted dataset
    source_row: usize,
    column_id: String,
    original_value: CellValue,
    current_value: CellValue,
    status: EditStatus,
    error: Option<String>,
    abort: Option<AbortHandle>,
}

impl EditSession {
    /// Open a session seeded with the cell's current value.
    pub fn open(
        id: SessionId,
        position: CellPosition,
        source_row: usize,
        column_id: impl Into<String>,
        value: CellValue,
    ) -> Self {
        Self {
            id,
            position,
            source_row,
            column_id: column_id.into(),
            original_value: value.clone(),
            current_value: value,
            status: EditStatus::Editing,
            error: None,
            abort: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn position(&self) -> CellPosition {
        self.position
    }

    pub fn source_row(&self) -> usize {
        self.source_row
    }

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    pub fn original_value(&self) -> &CellValue {
        &self.original_value
    }

    pub fn current_value(&self) -> &CellValue {
        &self.current_value
    }

    pub fn status(&self) -> EditStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.current_value != self.original_value
    }

    /// Keep the logical position in sync when the row ordering changes.
    pub(crate) fn relocate(&mut self, position: CellPosition) {
        self.position = position;
    }

    /// Replace the draft. Ignored unless the session is still `Editing`.
    pub fn set_value(&mut self, value: CellValue) -> bool {
        if self.status != EditStatus::Editing {
            return false;
        }
        self.current_value = value;
        true
    }

    fn payload(&self, value: CellValue, outcome: CommitOutcome) -> CommitPayload {
        CommitPayload {
            session: self.id,
            position: self.position,
            source_row: self.source_row,
            column_id: self.column_id.clone(),
            value,
            outcome,
        }
    }

    /// Start committing. `None` if the session already left `Editing`.
    ///
    /// An unchanged draft settles immediately as `Success` with the original
    /// value, and the validator is never consulted.
    pub fn request_commit(&mut self) -> Option<CommitRequest> {
        if self.status != EditStatus::Editing {
            return None;
        }

        if !self.is_modified() {
            self.status = EditStatus::Success;
            tracing::debug!(session = self.id.0, "unchanged edit committed without validation");
            return Some(CommitRequest::Resolved(
                self.payload(self.original_value.clone(), CommitOutcome::Unchanged),
            ));
        }

        let (handle, registration) = AbortHandle::new_pair();
        self.abort = Some(handle);
        self.status = EditStatus::Pending;
        tracing::debug!(session = self.id.0, "edit pending validation");

        Some(CommitRequest::Validate(PendingValidation {
            session: self.id,
            value: self.current_value.clone(),
            registration,
        }))
    }

    /// Apply a validator verdict. `None` unless the session is `Pending`.
    pub fn resolve(&mut self, verdict: ValidationVerdict) -> Option<CommitPayload> {
        if self.status != EditStatus::Pending {
            return None;
        }
        self.abort = None;

        let payload = match verdict {
            ValidationVerdict::Checked(Ok(outcome)) if outcome.is_valid => {
                self.status = EditStatus::Success;
                self.payload(self.current_value.clone(), CommitOutcome::Committed)
            }
            ValidationVerdict::Checked(Ok(outcome)) => {
                let message = outcome
                    .error
                    .unwrap_or_else(|| DEFAULT_INVALID_MESSAGE.to_string());
                self.reject(message)
            }
            ValidationVerdict::Checked(Err(err)) => self.reject(err.to_string()),
            ValidationVerdict::Aborted => {
                self.status = EditStatus::Cancelled;
                self.payload(self.original_value.clone(), CommitOutcome::Cancelled)
            }
        };

        tracing::debug!(session = self.id.0, status = ?self.status, "edit settled");
        Some(payload)
    }

    fn reject(&mut self, message: String) -> CommitPayload {
        self.status = EditStatus::Error;
        self.error = Some(message.clone());
        self.payload(
            self.original_value.clone(),
            CommitOutcome::RolledBack { error: message },
        )
    }

    /// Discard the session, aborting an in-flight validation.
    ///
    /// Yields the original value; `None` if the session had already settled.
    pub fn cancel(&mut self) -> Option<CommitPayload> {
        if self.status.is_settled() {
            return None;
        }
        if let Some(handle) = self.abort.take() {
            handle.abort();
        }
        self.status = EditStatus::Cancelled;
        tracing::debug!(session = self.id.0, "edit cancelled");
        Some(self.payload(self.original_value.clone(), CommitOutcome::Cancelled))
    }

    /// Request, validate and resolve in one go.
    ///
    /// Holds `&mut self` across the validator await; hosts that must keep
    /// navigating while validation runs use [`request_commit`](Self::request_commit)
    /// and [`resolve`](Self::resolve) separately.
    pub async fn commit<V: Validator + ?Sized>(&mut self, validator: &V) -> Option<CommitPayload> {
        match self.request_commit()? {
            CommitRequest::Resolved(payload) => Some(payload),
            CommitRequest::Validate(pending) => {
                let (_, verdict) = pending.run(validator).await;
                self.resolve(verdict)
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::editor::{FnValidator, SyncValidator};
    use crate::error::GridError;
    use futures::executor::block_on;
    use std::cell::Cell;

    fn session(value: &str) -> EditSession {
        EditSession::open(SessionId(1), CellPosition::new(2, 1), 2, "name", value.into())
    }

    #[test]
    fn test_open_seeds_both_values() {
        let s = session("Ada");
        assert_eq!(s.status(), EditStatus::Editing);
        assert_eq!(s.original_value(), s.current_value());
        assert!(!s.is_modified());
    }

    #[test]
    fn test_unchanged_commit_skips_validator() {
        let calls = Cell::new(0);
        let validator = SyncValidator(|_: &CellValue| {
            calls.set(calls.get() + 1);
            ValidationOutcome::valid()
        });

        let mut s = session("Ada");
        s.set_value("Grace".into());
        s.set_value("Ada".into());
        let payload = block_on(s.commit(&validator)).unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(payload.outcome, CommitOutcome::Unchanged);
        assert_eq!(payload.value, CellValue::from("Ada"));
        assert_eq!(s.status(), EditStatus::Success);
    }

    #[test]
    fn test_valid_commit_persists_draft() {
        let mut s = session("Ada");
        s.set_value("Grace".into());
        let payload = block_on(s.commit(&SyncValidator(|_: &CellValue| ValidationOutcome::valid())))
            .unwrap();
        assert_eq!(payload.outcome, CommitOutcome::Committed);
        assert_eq!(payload.value, CellValue::from("Grace"));
        assert_eq!(s.status(), EditStatus::Success);
    }

    #[test]
    fn test_invalid_commit_rolls_back() {
        let mut s = session("Ada");
        s.set_value("".into());
        let validator = SyncValidator(|v: &CellValue| {
            if v.to_display_string().is_empty() {
                ValidationOutcome::invalid("Name is required")
            } else {
                ValidationOutcome::valid()
            }
        });
        let payload = block_on(s.commit(&validator)).unwrap();

        assert_eq!(payload.value, CellValue::from("Ada"));
        assert_eq!(
            payload.outcome,
            CommitOutcome::RolledBack {
                error: "Name is required".into()
            }
        );
        assert_eq!(s.status(), EditStatus::Error);
        assert_eq!(s.error(), Some("Name is required"));
    }

    #[test]
    fn test_invalid_without_message_uses_default() {
        let mut s = session("Ada");
        s.set_value("x".into());
        let payload = block_on(s.commit(&SyncValidator(|_: &CellValue| ValidationOutcome {
            is_valid: false,
            error: None,
        })))
        .unwrap();
        assert_eq!(
            payload.outcome,
            CommitOutcome::RolledBack {
                error: DEFAULT_INVALID_MESSAGE.into()
            }
        );
    }

    #[test]
    fn test_validator_failure_rolls_back() {
        let mut s = session("Ada");
        s.set_value("x".into());
        let validator = FnValidator(|_v: CellValue| async {
            Err::<ValidationOutcome, _>(GridError::Validator("offline".into()))
        });
        let payload = block_on(s.commit(&validator)).unwrap();
        assert_eq!(payload.value, CellValue::from("Ada"));
        assert!(matches!(payload.outcome, CommitOutcome::RolledBack { .. }));
    }

    #[test]
    fn test_pending_ignores_input() {
        let mut s = session("Ada");
        s.set_value("Grace".into());
        let request = s.request_commit().unwrap();
        assert!(matches!(request, CommitRequest::Validate(_)));
        assert_eq!(s.status(), EditStatus::Pending);
        assert!(!s.set_value("Other".into()));
        assert!(s.request_commit().is_none());
    }

    #[test]
    fn test_cancel_during_validation_aborts() {
        let mut s = session("Ada");
        s.set_value("Grace".into());
        let Some(CommitRequest::Validate(pending)) = s.request_commit() else {
            panic!("expected validation request");
        };

        let cancelled = s.cancel().unwrap();
        assert_eq!(cancelled.outcome, CommitOutcome::Cancelled);
        assert_eq!(cancelled.value, CellValue::from("Ada"));

        let validator = FnValidator(|_v: CellValue| futures::future::pending::<Result<ValidationOutcome>>());
        let (id, verdict) = block_on(pending.run(&validator));
        assert_eq!(id, SessionId(1));
        assert!(matches!(verdict, ValidationVerdict::Aborted));
        // Already settled: the late verdict changes nothing
        assert!(s.resolve(verdict).is_none());
        assert_eq!(s.status(), EditStatus::Cancelled);
    }

    #[test]
    fn test_cancel_before_commit_never_validates() {
        let mut s = session("Ada");
        s.set_value("Grace".into());
        let payload = s.cancel().unwrap();
        assert_eq!(payload.value, CellValue::from("Ada"));
        assert!(s.cancel().is_none());
        assert!(s.request_commit().is_none());
    }
}
