//! Panel module
//!
//! Builds a view model from a registry snapshot and paints it onto the
//! terminal. View construction is pure; only the surface touches IO.

pub mod format;
pub mod surface;
pub mod view;

// Re-export the main types for easier importing
pub use surface::PanelSurface;
pub use view::{PanelLayout, PanelView, UploadRow, build_view};
