use std::path::PathBuf;
use std::str::Utf8Error;

use crate::kind::{DataFileKind, OperatorKind};

/// Errors raised by [`Migemo`](crate::Migemo) operations.
#[derive(Debug, thiserror::Error)]
pub enum MigemoError {
    /// The engine rejected the file: missing, unreadable, or malformed.
    #[error("failed to load {kind} from {}", path.display())]
    Load { kind: DataFileKind, path: PathBuf },

    #[error("path contains an interior NUL byte: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("query contains an interior NUL byte")]
    InvalidQuery,

    /// The engine refused a configured fragment (too long, or with a NUL).
    #[error("engine rejected {kind} fragment {fragment:?}")]
    OperatorRejected { kind: OperatorKind, fragment: String },

    #[error("engine reported unknown dictionary id {0}")]
    UnknownDictId(i32),

    /// `migemo_open` returned null; the handle is unusable.
    #[error("native engine is unavailable")]
    EngineUnavailable,

    #[error("pattern is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
}

pub type Result<T, E = MigemoError> = std::result::Result<T, E>;
