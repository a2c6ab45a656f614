//! Upload registry module
//!
//! This module defines the per-upload progress record and the in-memory
//! registry of all uploads currently in flight.

pub mod record;
pub mod store;

// Re-export the main types for easier importing
pub use record::{UploadRecord, next_upload_id};
pub use store::UploadRegistry;
