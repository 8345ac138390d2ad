//! Progress bar display for backup capture

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for capturing backup artifacts
pub struct ProgressDisplay {
    artifact_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total artifact count
    pub fn new(total_artifacts: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let artifact_pb = ProgressBar::new(total_artifacts);
        artifact_pb.set_style(style);

        Self { artifact_pb }
    }

    /// Update to show the artifact currently being captured
    pub fn update(&self, name: &str) {
        // Truncate long names for display
        let display_name = if name.len() > 50 {
            format!("...{}", &name[name.len() - 47..])
        } else {
            name.to_string()
        };
        self.artifact_pb.set_message(display_name);
        self.artifact_pb.inc(1);
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.artifact_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.artifact_pb.abandon();
    }
}
