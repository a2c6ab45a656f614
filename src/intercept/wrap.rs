//! Decorators for the host's two request primitives

use log::debug;

use super::classify::{Method, RequestBody};
use crate::monitor::UploadMonitor;

/// Upload-progress notification from the transport
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent {
    /// Bytes transferred so far
    pub loaded: u64,

    /// Total bytes, when the transport can compute it
    pub total: Option<u64>,
}

/// Terminal outcome of a tracked request. Exactly one is delivered per
/// transfer; the observer reacts identically to all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Completed,
    Failed,
    Aborted,
    TimedOut,
}

/// The host's callback-based transfer primitive, as seen by the observer.
///
/// The host opens the transfer with a method and URL, and allows listeners
/// to be attached for upload-progress events and for the terminal outcome.
pub trait TransferHandle {
    fn method(&self) -> Method;

    fn url(&self) -> String;

    /// Attach a listener for upload-progress notifications
    fn on_upload_progress(&mut self, listener: Box<dyn FnMut(&ProgressEvent) + Send>);

    /// Attach a listener for the terminal outcome
    fn on_outcome(&mut self, listener: Box<dyn FnMut(TransferOutcome) + Send>);
}

/// A one-shot request as passed to the host's single-call primitive
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub body: RequestBody,
}

/// Decorate the host's callback-based send function.
///
/// The wrapper classifies the request; upload candidates get a registry
/// entry and progress/outcome observers before the inner function runs.
/// The inner function is always called, with the same arguments, whether
/// or not the request is tracked.
pub fn wrap_send<S>(
    monitor: UploadMonitor,
    mut send: S,
) -> impl FnMut(&mut dyn TransferHandle, &RequestBody)
where
    S: FnMut(&mut dyn TransferHandle, &RequestBody),
{
    move |handle, body| {
        observe_transfer(&monitor, &mut *handle, body);
        send(handle, body);
    }
}

/// Decorate the host's one-shot request function.
///
/// Generic passthrough: the inner function's return value comes back
/// untouched. A tracked entry is removed when the call returns, whether it
/// succeeded or failed, mirroring finally-semantics.
pub fn wrap_fetch<F, T, E>(
    monitor: UploadMonitor,
    mut fetch: F,
) -> impl FnMut(&FetchRequest) -> Result<T, E>
where
    F: FnMut(&FetchRequest) -> Result<T, E>,
{
    move |request| {
        let tracked = monitor
            .classify(request.method, &request.url, &request.body)
            .map(|candidate| monitor.begin_tracking(candidate));

        let result = fetch(request);

        if let Some(id) = tracked {
            let outcome = if result.is_ok() {
                TransferOutcome::Completed
            } else {
                TransferOutcome::Failed
            };
            monitor.finish(&id, outcome);
        }

        result
    }
}

/// Attach tracking observers to a classified transfer. Unclassified
/// transfers are left untouched.
fn observe_transfer(monitor: &UploadMonitor, handle: &mut dyn TransferHandle, body: &RequestBody) {
    let url = handle.url();
    let Some(candidate) = monitor.classify(handle.method(), &url, body) else {
        debug!("Not tracking {} {}", handle.method(), url);
        return;
    };

    let id = monitor.begin_tracking(candidate);

    let progress_monitor = monitor.clone();
    let progress_id = id.clone();
    handle.on_upload_progress(Box::new(move |event| {
        // Only totals the transport can compute are usable
        if let Some(total) = event.total {
            progress_monitor.record_progress(&progress_id, event.loaded, total);
        }
    }));

    let outcome_monitor = monitor.clone();
    handle.on_outcome(Box::new(move |outcome| {
        outcome_monitor.finish(&id, outcome);
    }));
}
