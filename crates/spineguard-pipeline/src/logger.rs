//! Interval-gated posture snapshot log.
//!
//! Appends one CSV row per logging interval: wall-clock timestamp, the
//! averaged 9-value feature vector, and the debounced prediction. The file
//! is recreated with a header once at session start and strictly appended
//! thereafter. Gating uses the monotonic clock so wall-clock adjustments
//! cannot skip or double-fire rows.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use tracing::warn;

use spineguard_core::{FeatureVector, PostureLabel, FEATURE_NAMES};

/// Append-only CSV recorder of pipeline snapshots.
pub struct SnapshotLogger {
    writer: csv::Writer<File>,
    path: PathBuf,
    interval: Duration,
    last_log: Option<Instant>,
}

impl SnapshotLogger {
    /// Create (or truncate) the log file and write the header row.
    ///
    /// The interval gate starts counting from the first
    /// [`maybe_log`](Self::maybe_log) call.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be created or
    /// the header cannot be written; the session treats this as fatal at
    /// start.
    pub fn create(path: impl AsRef<Path>, interval: Duration) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = csv::Writer::from_writer(file);

        let mut header: Vec<&str> = Vec::with_capacity(FEATURE_NAMES.len() + 2);
        header.push("Timestamp");
        header.extend(FEATURE_NAMES);
        header.push("Prediction");
        writer.write_record(&header)?;
        writer.flush()?;

        Ok(Self {
            writer,
            path,
            interval,
            last_log: None,
        })
    }

    /// Append a snapshot row if the logging interval has elapsed.
    ///
    /// Returns `true` when a row was written. Write failures are reported
    /// and swallowed; the gate still advances so a persistently failing
    /// disk does not turn every tick into a write attempt.
    pub fn maybe_log(
        &mut self,
        now: Instant,
        features: &FeatureVector,
        prediction: PostureLabel,
    ) -> bool {
        match self.last_log {
            None => {
                self.last_log = Some(now);
                false
            }
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last_log = Some(now);
                if let Err(e) = self.write_row(features, prediction) {
                    warn!(path = %self.path.display(), error = %e, "snapshot log write failed");
                    return false;
                }
                true
            }
            Some(_) => false,
        }
    }

    fn write_row(
        &mut self,
        features: &FeatureVector,
        prediction: PostureLabel,
    ) -> Result<(), csv::Error> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut row: Vec<String> = Vec::with_capacity(FEATURE_NAMES.len() + 2);
        row.push(timestamp);
        for value in features.as_array() {
            row.push(format!("{value:.3}"));
        }
        row.push(prediction.as_str().to_string());
        self.writer.write_record(&row)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush buffered rows to disk; failures are reported and swallowed.
    pub fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!(path = %self.path.display(), error = %e, "snapshot log flush failed");
        }
    }

    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configured logging interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
