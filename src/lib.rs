//! Passive upload monitoring for a host application's network layer.
//!
//! The monitor wraps the host's two request primitives, classifies outgoing
//! requests that carry file uploads to known storage endpoints, tracks their
//! progress with smoothed speed estimation, and renders a live panel of all
//! uploads in flight. It observes only: the wrapped requests are never
//! blocked, delayed, or altered, and no failure in tracking or rendering may
//! reach the request path.

pub mod config;
pub mod error;
pub mod intercept;
pub mod monitor;
pub mod panel;
pub mod registry;

pub use config::MonitorConfig;
pub use error::{Result, UploadMonitorError};
pub use monitor::UploadMonitor;
