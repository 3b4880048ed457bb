//! Progress reporting utilities using indicatif.
//!
//! The [`ProgressCallback`] trait decouples the pipeline from any
//! particular UI; [`Progress`] implements it with terminal progress bars
//! for the walking and segmenting phases.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Progress callback for scan phases.
///
/// Implement this trait to receive progress updates while the detector
/// runs.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "walking", "segmenting")
    /// * `total` - Total number of items to process (0 if unknown)
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each item processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `path` - Path being processed
    fn on_progress(&self, current: usize, path: &str);

    /// Called when an item has been processed, providing its size.
    fn on_item_completed(&self, _bytes: u64) {}

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// Progress reporter using indicatif.
///
/// Manages one bar per phase under a [`MultiProgress`] so phases can
/// overlap cleanly with log output.
pub struct Progress {
    multi: MultiProgress,
    walking: Mutex<Option<ProgressBar>>,
    segmenting: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bars will be displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            walking: Mutex::new(None),
            segmenting: Mutex::new(None),
            quiet,
        }
    }

    fn walking_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn segmenting_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }

        match phase {
            "walking" => {
                let bar = self.multi.add(ProgressBar::new_spinner());
                bar.set_style(Self::walking_style());
                bar.set_message("Collecting documents");
                bar.enable_steady_tick(Duration::from_millis(100));
                *self.walking.lock().unwrap() = Some(bar);
            }
            "segmenting" => {
                let bar = self.multi.add(ProgressBar::new(total as u64));
                bar.set_style(Self::segmenting_style());
                bar.set_message("Segmenting");
                *self.segmenting.lock().unwrap() = Some(bar);
            }
            _ => {}
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = self.segmenting.lock().unwrap().as_ref() {
            bar.set_position(current as u64);
            // Show only the file name; full paths overflow narrow terminals
            let name = std::path::Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string());
            bar.set_message(name);
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if self.quiet {
            return;
        }

        let bar = match phase {
            "walking" => self.walking.lock().unwrap().take(),
            "segmenting" => self.segmenting.lock().unwrap().take(),
            _ => None,
        };
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }
}
