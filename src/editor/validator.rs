//! Externally supplied cell validators.

use futures::future::{self, FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::Result;
use crate::types::CellValue;

/// Verdict returned by a validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Asynchronous check run before a changed value is committed.
///
/// Futures are `!Send` so that promise-backed validators (wasm32) fit.
/// `Err` means no verdict could be obtained; the edit is rolled back just like
/// an invalid value.
pub trait Validator {
    fn validate(&self, value: &CellValue) -> LocalBoxFuture<'_, Result<ValidationOutcome>>;
}

/// Adapter for closures returning a future.
pub struct FnValidator<F>(pub F);

impl<F, Fut> Validator for FnValidator<F>
where
    F: Fn(CellValue) -> Fut,
    Fut: Future<Output = Result<ValidationOutcome>> + 'static,
{
    fn validate(&self, value: &CellValue) -> LocalBoxFuture<'_, Result<ValidationOutcome>> {
        (self.0)(value.clone()).boxed_local()
    }
}

/// Adapter for synchronous checks (resolves immediately).
pub struct SyncValidator<F>(pub F);

impl<F> Validator for SyncValidator<F>
where
    F: Fn(&CellValue) -> ValidationOutcome,
{
    fn validate(&self, value: &CellValue) -> LocalBoxFuture<'_, Result<ValidationOutcome>> {
        future::ready(Ok((self.0)(value))).boxed_local()
    }
}

/// Accepts everything.
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _value: &CellValue) -> LocalBoxFuture<'_, Result<ValidationOutcome>> {
        future::ready(Ok(ValidationOutcome::valid())).boxed_local()
    }
}
