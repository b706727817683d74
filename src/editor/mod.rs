//! In-place cell editing.
//!
//! At most one [`EditSession`] is open at a time (the host keeps it in an
//! `Option`); opening another replaces it. A session moves through:
//! - Editing: draft diverges from the original, nothing validated yet
//! - Pending: an external [`Validator`] is deciding
//! - Success / Error / Cancelled: settled, with a [`CommitPayload`] telling the
//!   host which value to persist (the original on anything but success)

mod draft;
mod session;
mod validator;

pub use draft::parse_draft;
pub use session::{
    CommitOutcome, CommitPayload, CommitRequest, EditSession, EditStatus, PendingValidation,
    SessionId, ValidationVerdict, DEFAULT_INVALID_MESSAGE,
};
pub use validator::{AcceptAll, FnValidator, SyncValidator, ValidationOutcome, Validator};
