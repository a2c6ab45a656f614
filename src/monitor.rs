//! Central coordinator tying the registry, panel, and interceptor together

use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::MonitorConfig;
use crate::intercept::classify::{Method, RequestBody, UploadCandidate, classify};
use crate::intercept::wrap::TransferOutcome;
use crate::panel::view::{PanelLayout, build_view};
use crate::panel::{PanelSurface, PanelView};
use crate::registry::{UploadRecord, UploadRegistry, next_upload_id};

/// Immutable settings shared by all clones of the monitor
struct MonitorSettings {
    endpoints: Vec<String>,
    sample_interval: Duration,
    coalesce_interval: Duration,
    layout: PanelLayout,
}

/// State mutated by notification callbacks, guarded as one unit so registry
/// updates and repaints never interleave
struct MonitorInner {
    registry: UploadRegistry,
    surface: PanelSurface,
    minimized: bool,
    last_paint: Option<Instant>,
}

/// The upload monitor.
///
/// Cheap to clone; all clones share one registry and one panel surface.
/// Observer callbacks hold clones, so the monitor lives as long as any
/// wrapped primitive does. Every operation swallows its own failures: no
/// error here may ever reach the wrapped request path.
#[derive(Clone)]
pub struct UploadMonitor {
    settings: Arc<MonitorSettings>,
    inner: Arc<Mutex<MonitorInner>>,
}

impl UploadMonitor {
    /// Create a monitor painting to stdout
    pub fn new(config: &MonitorConfig) -> Self {
        Self::with_surface(config, PanelSurface::stdout())
    }

    /// Create a monitor painting to the given surface
    pub fn with_surface(config: &MonitorConfig, surface: PanelSurface) -> Self {
        info!("Creating upload monitor with config: {}", config);

        Self {
            settings: Arc::new(MonitorSettings {
                endpoints: config.tracking.endpoints.clone(),
                sample_interval: Duration::from_millis(config.tracking.speed_sample_ms),
                coalesce_interval: Duration::from_millis(config.tracking.render_coalesce_ms),
                layout: PanelLayout::from(&config.panel),
            }),
            inner: Arc::new(Mutex::new(MonitorInner {
                registry: UploadRegistry::new(),
                surface,
                minimized: false,
                last_paint: None,
            })),
        }
    }

    /// Classify a request against the configured upload endpoints
    pub fn classify(
        &self,
        method: Method,
        url: &str,
        body: &RequestBody,
    ) -> Option<UploadCandidate> {
        classify(method, url, body, &self.settings.endpoints)
    }

    /// Start tracking a classified upload and return its id
    pub fn begin_tracking(&self, candidate: UploadCandidate) -> String {
        let id = next_upload_id();
        info!(
            "Tracking upload '{}' ({} bytes) as {}",
            candidate.name, candidate.size, id
        );

        let Ok(mut inner) = self.inner.lock() else {
            warn!("Monitor state unavailable; upload {} untracked", id);
            return id;
        };

        let record = UploadRecord::new(id.clone(), candidate.name, candidate.size, Instant::now());
        inner.registry.insert(record);
        Self::render(&mut inner, &self.settings, true);

        id
    }

    /// Apply a progress notification for a tracked upload.
    ///
    /// Unknown ids are a silent no-op; the upload may already have finished.
    pub fn record_progress(&self, id: &str, loaded: u64, total: u64) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };

        inner
            .registry
            .apply_progress(id, loaded, total, Instant::now(), self.settings.sample_interval);
        Self::render(&mut inner, &self.settings, false);
    }

    /// End tracking for an upload that reached a terminal outcome.
    ///
    /// Idempotent: a second terminal signal for the same id is a no-op.
    pub fn finish(&self, id: &str, outcome: TransferOutcome) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };

        match inner.registry.remove(id) {
            Some(record) => info!("Upload '{}' finished: {:?}", record.name, outcome),
            None => debug!("Terminal signal for unknown upload id: {}", id),
        }
        Self::render(&mut inner, &self.settings, true);
    }

    /// Flip the panel between expanded and minimized, returning the new state
    pub fn toggle_minimized(&self) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };

        inner.minimized = !inner.minimized;
        Self::render(&mut inner, &self.settings, true);
        inner.minimized
    }

    /// Whether the panel is currently minimized
    pub fn is_minimized(&self) -> bool {
        self.inner.lock().map(|inner| inner.minimized).unwrap_or(false)
    }

    /// Number of uploads currently tracked
    pub fn upload_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.registry.len()).unwrap_or(0)
    }

    /// Current registry contents in insertion order
    pub fn snapshot(&self) -> Vec<UploadRecord> {
        self.inner
            .lock()
            .map(|inner| inner.registry.snapshot())
            .unwrap_or_default()
    }

    /// The view the panel would paint right now
    pub fn current_view(&self) -> PanelView {
        match self.inner.lock() {
            Ok(inner) => build_view(
                &inner.registry.snapshot(),
                inner.minimized,
                &self.settings.layout,
            ),
            Err(_) => build_view(&[], false, &self.settings.layout),
        }
    }

    /// Rebuild the view and repaint.
    ///
    /// Progress-driven repaints are coalesced to the configured minimum
    /// interval; creation, terminal outcomes, and minimize toggles force an
    /// immediate repaint so the panel appears and disappears without delay.
    /// Paint failures are logged and swallowed.
    fn render(inner: &mut MonitorInner, settings: &MonitorSettings, force: bool) {
        let now = Instant::now();
        if !force {
            if let Some(last) = inner.last_paint {
                if now.saturating_duration_since(last) < settings.coalesce_interval {
                    return;
                }
            }
        }

        let view = build_view(&inner.registry.snapshot(), inner.minimized, &settings.layout);
        if let Err(e) = inner.surface.paint(&view) {
            warn!("Panel repaint failed: {}", e);
        }
        inner.last_paint = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_monitor() -> UploadMonitor {
        let config = MonitorConfig::default();
        UploadMonitor::with_surface(&config, PanelSurface::with_sink(Box::new(std::io::sink())))
    }

    fn candidate(name: &str, size: u64) -> UploadCandidate {
        UploadCandidate {
            name: name.to_string(),
            size,
        }
    }

    #[test]
    fn test_tracking_lifecycle_end_to_end() {
        let monitor = quiet_monitor();

        let body = RequestBody::Blob { size: 2_097_152 };
        let classified = monitor
            .classify(
                Method::Post,
                "https://cloud.example.com/remote.php/dav/files/user/report.pdf",
                &body,
            )
            .unwrap();
        assert_eq!(classified.name, "report.pdf");

        let id = monitor.begin_tracking(classified);
        assert_eq!(monitor.upload_count(), 1);
        assert!(monitor.current_view().visible);

        monitor.record_progress(&id, 2_097_152, 2_097_152);
        assert_eq!(monitor.snapshot()[0].loaded, 2_097_152);

        monitor.finish(&id, TransferOutcome::Completed);
        assert_eq!(monitor.upload_count(), 0);
        assert!(!monitor.current_view().visible);
    }

    #[test]
    fn test_duplicate_finish_is_noop() {
        let monitor = quiet_monitor();
        let id = monitor.begin_tracking(candidate("a.bin", 100));

        monitor.finish(&id, TransferOutcome::Aborted);
        monitor.finish(&id, TransferOutcome::TimedOut);
        assert_eq!(monitor.upload_count(), 0);
    }

    #[test]
    fn test_late_progress_after_finish_is_noop() {
        let monitor = quiet_monitor();
        let id = monitor.begin_tracking(candidate("a.bin", 100));
        monitor.finish(&id, TransferOutcome::Completed);

        monitor.record_progress(&id, 50, 100);
        assert_eq!(monitor.upload_count(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let monitor = quiet_monitor();
        let first = monitor.begin_tracking(candidate("a.bin", 100));
        let second = monitor.begin_tracking(candidate("b.bin", 100));
        assert_ne!(first, second);
        assert_eq!(monitor.upload_count(), 2);
    }

    #[test]
    fn test_toggle_minimized_does_not_touch_registry() {
        let monitor = quiet_monitor();
        monitor.begin_tracking(candidate("a.bin", 100));

        assert!(!monitor.is_minimized());
        assert!(monitor.toggle_minimized());
        assert!(monitor.current_view().minimized);
        assert_eq!(monitor.upload_count(), 1);

        // Toggling twice restores the original state
        assert!(!monitor.toggle_minimized());
        assert!(!monitor.is_minimized());
        assert_eq!(monitor.upload_count(), 1);
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let monitor = quiet_monitor();
        monitor.begin_tracking(candidate("first.bin", 1));
        monitor.begin_tracking(candidate("second.bin", 2));

        let names: Vec<String> = monitor.snapshot().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first.bin", "second.bin"]);
    }
}
