//! Terminal painting for the upload panel

use log::{debug, warn};
use std::io::{self, Write};

use super::view::{PanelView, UploadRow};

/// Paints a [`PanelView`] onto a terminal-like sink.
///
/// The surface redraws in place: each paint erases the lines of the previous
/// one with ANSI cursor movement, so the panel behaves as a single persistent
/// region at the bottom of the output. Hiding the panel just erases it; the
/// surface stays around and is cheap to show again.
pub struct PanelSurface {
    sink: Box<dyn Write + Send>,
    lines_drawn: usize,
    started: bool,
}

impl PanelSurface {
    /// Create a surface painting to stdout
    pub fn stdout() -> Self {
        Self::with_sink(Box::new(io::stdout()))
    }

    /// Create a surface painting to an arbitrary sink
    pub fn with_sink(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink,
            lines_drawn: 0,
            started: false,
        }
    }

    /// Paint the given view, replacing whatever this surface drew last.
    ///
    /// A failed row write is logged and skipped so the remaining rows still
    /// paint; only failures on the frame itself surface to the caller.
    pub fn paint(&mut self, view: &PanelView) -> io::Result<()> {
        if !self.started {
            self.started = true;
            debug!("Panel surface initialized");
        }

        // Erase the previous frame
        if self.lines_drawn > 0 {
            write!(self.sink, "\x1b[{}A\x1b[0J", self.lines_drawn)?;
            self.lines_drawn = 0;
        }

        if !view.visible {
            return self.sink.flush();
        }

        let indicator = if view.minimized { '+' } else { '−' };
        writeln!(self.sink, "{} ({}) [{}]", view.title, view.count, indicator)?;
        self.lines_drawn = 1;

        if !view.minimized {
            for row in &view.rows {
                match self.paint_row(row, view.bar_width) {
                    Ok(()) => self.lines_drawn += 1,
                    Err(e) => warn!("Failed to paint row for '{}': {}", row.name, e),
                }
            }
        }

        self.sink.flush()
    }

    fn paint_row(&mut self, row: &UploadRow, bar_width: usize) -> io::Result<()> {
        let filled = row.bar_filled.min(bar_width);
        let bar = "#".repeat(filled) + &" ".repeat(bar_width - filled);

        writeln!(
            self.sink,
            "  {} [{}] {:>3}%  {}  {}  {}",
            row.display_name, bar, row.percent, row.transferred, row.speed, row.remaining
        )
    }
}
