//! Calibration capture for the offline trainer.
//!
//! One-shot mode: read lines from a sample source, keep the ones that
//! decode to finite readings, and write `ax..gz,label` CSV rows for the
//! external training job. Decoding reuses the live pipeline's
//! last-six-numeric-fields rule, so a capture accepts exactly the lines
//! monitoring would.

use std::path::Path;

use tracing::{debug, info};

use spineguard_core::{MonitorError, MonitorResult, PostureLabel};
use spineguard_pipeline::{extract, parse_sample_line};

use crate::source::SampleSource;

/// CSV header of a calibration capture file.
pub const CAPTURE_HEADER: [&str; 7] = ["ax", "ay", "az", "gx", "gy", "gz", "label"];

/// Capture up to `samples` labeled readings into a CSV file.
///
/// The output file is truncated first. Malformed or non-finite lines are
/// skipped without counting; the capture ends early if the source does.
/// Returns the number of data rows written. Labels are rendered
/// uppercase, the form the trainer expects.
///
/// # Errors
///
/// [`MonitorError::Capture`] if the output cannot be created or written,
/// [`MonitorError::Source`] if the sample source fails mid-capture.
pub async fn capture(
    source: &mut SampleSource,
    label: PostureLabel,
    samples: usize,
    path: impl AsRef<Path>,
) -> MonitorResult<usize> {
    let path = path.as_ref();
    let capture_err = |e: csv::Error| MonitorError::Capture {
        path: path.display().to_string(),
        source: std::io::Error::other(e),
    };

    let file = std::fs::File::create(path).map_err(|e| MonitorError::Capture {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CAPTURE_HEADER).map_err(capture_err)?;

    let label_text = label.as_str().to_uppercase();
    let mut written = 0;
    while written < samples {
        let Some(line) = source.next_line().await? else {
            debug!(written, wanted = samples, "source ended before capture completed");
            break;
        };
        let Some(sample) = parse_sample_line(&line) else {
            continue;
        };
        if extract(&sample).is_err() {
            continue;
        }

        let mut row: Vec<String> = [sample.ax, sample.ay, sample.az, sample.gx, sample.gy, sample.gz]
            .iter()
            .map(ToString::to_string)
            .collect();
        row.push(label_text.clone());
        writer.write_record(&row).map_err(capture_err)?;
        written += 1;
    }

    writer
        .flush()
        .map_err(|e| MonitorError::Capture {
            path: path.display().to_string(),
            source: e,
        })?;
    info!(rows = written, label = %label, path = %path.display(), "calibration capture written");
    Ok(written)
}
