use thiserror::Error;

use crate::reconstruction::ViewId;

/// Why a record that started with a valid identifier could not be completed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordDefect {
    #[error("stream ended at field `{field}` after {found} of 12 values")]
    UnexpectedEnd { field: &'static str, found: usize },
    #[error("field `{field}` is not a number: {token:?}")]
    InvalidNumber { field: &'static str, token: String },
}

#[derive(Debug, Error)]
pub enum ExtrinsicsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    #[error("malformed record #{index} ({image_id}): {defect}")]
    MalformedRecord {
        index: usize,
        image_id: String,
        defect: RecordDefect,
    },
    #[error("extrinsics file declares {declared} records but {expected} views were supplied")]
    CountMismatch { declared: usize, expected: usize },
    #[error("view {0} does not exist in the reconstruction")]
    UnknownView(ViewId),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtrinsicsError>;
