//! Pure view-model construction from registry snapshots

use crate::config::PanelConfig;
use crate::panel::format::{format_bytes, format_speed, format_time};
use crate::registry::UploadRecord;

/// Layout parameters for the rendered panel
#[derive(Debug, Clone)]
pub struct PanelLayout {
    pub title: String,
    pub bar_width: usize,
    pub max_name_len: usize,
}

impl From<&PanelConfig> for PanelLayout {
    fn from(config: &PanelConfig) -> Self {
        Self {
            title: config.title.clone(),
            bar_width: config.bar_width,
            max_name_len: config.max_name_len,
        }
    }
}

/// Display state for a single upload row
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRow {
    /// Full file name, for surfaces that can expose it on demand
    pub name: String,

    /// Name truncated to the panel's column width
    pub display_name: String,

    /// Completion percentage, capped at 100 for display
    pub percent: u8,

    /// Number of filled progress-bar cells
    pub bar_filled: usize,

    /// "loaded / total" sizes line
    pub transferred: String,

    /// Current speed text
    pub speed: String,

    /// Estimated remaining time text
    pub remaining: String,
}

/// Display state for the whole panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    /// Header title
    pub title: String,

    /// Number of uploads in flight, shown in the header badge
    pub count: usize,

    /// False when there is nothing to show and the panel should hide
    pub visible: bool,

    /// True when the body is collapsed to the header line
    pub minimized: bool,

    /// Total progress-bar width in cells, shared by every row
    pub bar_width: usize,

    pub rows: Vec<UploadRow>,
}

/// Build the panel view for a registry snapshot.
///
/// Pure and total: the same snapshot always yields the same view, and no
/// record can fail to produce a row.
pub fn build_view(snapshot: &[UploadRecord], minimized: bool, layout: &PanelLayout) -> PanelView {
    PanelView {
        title: layout.title.clone(),
        count: snapshot.len(),
        visible: !snapshot.is_empty(),
        minimized,
        bar_width: layout.bar_width,
        rows: snapshot.iter().map(|r| build_row(r, layout)).collect(),
    }
}

fn build_row(record: &UploadRecord, layout: &PanelLayout) -> UploadRow {
    let percent = display_percent(record.loaded, record.total);
    let bar_filled = layout.bar_width * percent as usize / 100;

    UploadRow {
        name: record.name.clone(),
        display_name: truncate_name(&record.name, layout.max_name_len),
        percent,
        bar_filled,
        transferred: format!(
            "{} / {}",
            format_bytes(record.loaded),
            format_bytes(record.total)
        ),
        speed: format_speed(record.speed),
        remaining: format_time(record.remaining_seconds()),
    }
}

/// Percentage for display: `round(loaded / total * 100)`, capped at 100.
///
/// The raw `loaded` value is kept in the record even when the transport
/// reports more than `total`; only the rendered percentage is clamped.
fn display_percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (loaded as f64 / total as f64 * 100.0).round();
    percent.min(100.0) as u8
}

fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }
    let kept: String = name.chars().take(max_len.saturating_sub(1)).collect();
    format!("{}…", kept)
}
