use thiserror::Error;

use crate::store::StoreError;

/// Failure modes of the content repositories. None of these are retried;
/// the admin UI presents the failure and lets the user decide.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("record not found")]
    NotFound,

    #[error("image encoding failed: {0}")]
    Encoding(String),

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}
