//! Request interception module
//!
//! Classifies outgoing requests as upload candidates and decorates the
//! host's two request primitives with tracking observers. Observation is
//! strictly additive: the wrapped call, its arguments, and its return value
//! are never altered.

pub mod classify;
pub mod wrap;

// Re-export the main types for easier importing
pub use classify::{FALLBACK_NAME, Method, RequestBody, UploadCandidate, classify};
pub use wrap::{
    FetchRequest, ProgressEvent, TransferHandle, TransferOutcome, wrap_fetch, wrap_send,
};
