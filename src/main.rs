//! Demo driver standing in for the host application.
//!
//! Wires the upload monitor around two simulated request primitives and
//! drives a pair of overlapping fake uploads so the panel can be watched
//! live. Run with `RUST_LOG=info` for the tracking log alongside the panel.

use std::process;
use std::thread;
use std::time::Duration;

use upload_monitor::intercept::{
    FetchRequest, Method, ProgressEvent, RequestBody, TransferHandle, TransferOutcome, wrap_fetch,
    wrap_send,
};
use upload_monitor::{MonitorConfig, UploadMonitor};

fn main() {
    // Initialize logging
    env_logger::init();

    // Load configuration (defaults apply when no file is present)
    let config = match MonitorConfig::load("upload-monitor") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let monitor = UploadMonitor::new(&config);

    // Compose the wrappers at wiring time, as the host would
    let mut send = wrap_send(
        monitor.clone(),
        |_transfer: &mut dyn TransferHandle, _body: &RequestBody| {
            // The real host transmits the payload here
        },
    );

    // One-shot upload on a second thread so the two transfers overlap
    let fetch_monitor = monitor.clone();
    let fetch_thread = thread::spawn(move || {
        let mut fetch = wrap_fetch(fetch_monitor, |_request: &FetchRequest| {
            thread::sleep(Duration::from_millis(2500));
            Ok::<u16, String>(201)
        });

        let request = FetchRequest {
            method: Method::Put,
            url: "https://cloud.example.com/remote.php/dav/files/demo/archive.zip".to_string(),
            body: RequestBody::Blob {
                size: 8 * 1024 * 1024,
            },
        };
        let _ = fetch(&request);
    });

    // Event-driven upload with periodic progress notifications
    let total: u64 = 48 * 1024 * 1024;
    let mut transfer = SimulatedTransfer::new(
        Method::Put,
        "https://cloud.example.com/remote.php/dav/files/demo/holiday-video.mp4",
    );
    send(
        &mut transfer,
        &RequestBody::File {
            name: "holiday-video.mp4".to_string(),
            size: total,
        },
    );

    let steps = 40;
    for step in 1..=steps {
        thread::sleep(Duration::from_millis(120));
        transfer.emit_progress(total * step / steps, total);
    }
    transfer.emit_outcome(TransferOutcome::Completed);

    if fetch_thread.join().is_err() {
        eprintln!("Simulated fetch upload panicked");
        process::exit(1);
    }
}

fn print_usage() {
    println!("Upload Monitor");
    println!("Optional config file: upload-monitor.toml");
    println!("Environment Variables:");
    println!("  UPLOAD_MONITOR_ENDPOINTS=\"/remote.php/dav/,/uploads/\"");
    println!("  UPLOAD_MONITOR_SPEED_SAMPLE_MS=500");
    println!("  UPLOAD_MONITOR_RENDER_COALESCE_MS=100");
    println!("  UPLOAD_MONITOR_TITLE=Uploads");
    println!("  UPLOAD_MONITOR_BAR_WIDTH=30");
    println!("  UPLOAD_MONITOR_MAX_NAME_LEN=40");
    println!("  RUST_LOG=info");
}

/// Simulated callback-based transfer standing in for the host primitive
struct SimulatedTransfer {
    method: Method,
    url: String,
    progress_listeners: Vec<Box<dyn FnMut(&ProgressEvent) + Send>>,
    outcome_listeners: Vec<Box<dyn FnMut(TransferOutcome) + Send>>,
}

impl SimulatedTransfer {
    fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            progress_listeners: Vec::new(),
            outcome_listeners: Vec::new(),
        }
    }

    fn emit_progress(&mut self, loaded: u64, total: u64) {
        let event = ProgressEvent {
            loaded,
            total: Some(total),
        };
        for listener in &mut self.progress_listeners {
            listener(&event);
        }
    }

    fn emit_outcome(&mut self, outcome: TransferOutcome) {
        for listener in &mut self.outcome_listeners {
            listener(outcome);
        }
    }
}

impl TransferHandle for SimulatedTransfer {
    fn method(&self) -> Method {
        self.method
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn on_upload_progress(&mut self, listener: Box<dyn FnMut(&ProgressEvent) + Send>) {
        self.progress_listeners.push(listener);
    }

    fn on_outcome(&mut self, listener: Box<dyn FnMut(TransferOutcome) + Send>) {
        self.outcome_listeners.push(listener);
    }
}
