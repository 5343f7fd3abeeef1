//!
//! Errors raised by native digests and the context store.
//!
//! All errors are synchronous and local to the call that raised them.
//! Nothing is retried: digest computation is deterministic.
//!

use digest_traits::digest::{Error, ErrorKind};
use thiserror::Error;

use crate::store::ContextId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeDigestError {
    #[error("Unsupported digest algorithm '{name}'")]
    UnsupportedAlgorithm { name: String },

    #[error("Range at offset {offset} with length {length} exceeds source of {available} bytes")]
    InvalidArgument {
        offset: usize,
        length: usize,
        available: usize,
    },

    #[error("Failed to allocate {size} bytes for a native digest context")]
    ResourceExhausted { size: usize },

    #[error("{algorithm} digest used after its context was released")]
    UseAfterClose { algorithm: &'static str },

    #[error("Native context {context} released twice")]
    DoubleFreeDetected { context: ContextId },

    #[error("Handle for native context {context} does not match the block it names")]
    ContextMismatch { context: ContextId },

    #[error("Output buffer of {available} bytes cannot hold a {needed} byte digest")]
    OutputTooSmall { needed: usize, available: usize },
}

impl Error for NativeDigestError {
    fn kind(&self) -> ErrorKind {
        match self {
            NativeDigestError::UnsupportedAlgorithm { .. } => ErrorKind::UnsupportedAlgorithm,
            NativeDigestError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            NativeDigestError::ResourceExhausted { .. } => ErrorKind::ResourceExhausted,
            NativeDigestError::UseAfterClose { .. } => ErrorKind::UseAfterClose,
            NativeDigestError::DoubleFreeDetected { .. } => ErrorKind::DoubleFreeDetected,
            NativeDigestError::ContextMismatch { .. } => ErrorKind::InvalidArgument,
            NativeDigestError::OutputTooSmall { .. } => ErrorKind::InvalidOutputSize,
        }
    }
}

/// Checks that `[offset, offset + length)` lies within `available` bytes.
pub(crate) fn check_range(
    available: usize,
    offset: usize,
    length: usize,
) -> Result<(), NativeDigestError> {
    match offset.checked_add(length) {
        Some(end) if end <= available => Ok(()),
        _ => Err(NativeDigestError::InvalidArgument {
            offset,
            length,
            available,
        }),
    }
}
