//! Per-upload progress state

use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::time::{Duration, Instant};

/// Generate a fresh upload identifier.
///
/// Millisecond wall-clock timestamp plus a random alphanumeric suffix, so ids
/// stay unique within a session even when several uploads start in the same
/// millisecond.
pub fn next_upload_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();

    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Progress state for a single tracked upload
#[derive(Debug, Clone)]
pub struct UploadRecord {
    /// Unique identifier for this upload
    pub id: String,

    /// Best-effort display name of the file
    pub name: String,

    /// Total bytes to transfer; 0 until the transport reports it
    pub total: u64,

    /// Bytes transferred so far
    pub loaded: u64,

    /// Smoothed transfer rate in bytes per second
    pub speed: f64,

    /// When tracking of this upload began
    pub started_at: Instant,

    // Speed-sampling bookkeeping
    last_sample_loaded: u64,
    last_sample_at: Instant,
}

impl UploadRecord {
    /// Create a new record for an upload detected at `now`
    pub fn new(id: String, name: String, total: u64, now: Instant) -> Self {
        Self {
            id,
            name,
            total,
            loaded: 0,
            speed: 0.0,
            started_at: now,
            last_sample_loaded: 0,
            last_sample_at: now,
        }
    }

    /// Apply a progress notification.
    ///
    /// `loaded` and `total` are taken over immediately, except that a
    /// decreasing `loaded` report is ignored to keep the counter monotonic.
    /// The speed estimate is only recomputed once `sample_interval` has
    /// elapsed since the last sample, which smooths the displayed rate
    /// against bursty notification delivery.
    pub fn apply_progress(
        &mut self,
        loaded: u64,
        total: u64,
        now: Instant,
        sample_interval: Duration,
    ) {
        if loaded > self.loaded {
            self.loaded = loaded;
        }
        self.total = total;

        let elapsed = now.saturating_duration_since(self.last_sample_at);
        if elapsed >= sample_interval {
            let secs = elapsed.as_secs_f64();
            if secs > 0.0 {
                let delta = self.loaded.saturating_sub(self.last_sample_loaded);
                self.speed = delta as f64 / secs;
            }
            self.last_sample_at = now;
            self.last_sample_loaded = self.loaded;
        }
    }

    /// Estimated seconds until completion, or 0.0 when no speed sample exists yet
    pub fn remaining_seconds(&self) -> f64 {
        if self.speed > 0.0 {
            self.total.saturating_sub(self.loaded) as f64 / self.speed
        } else {
            0.0
        }
    }

    /// Time since tracking began
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
