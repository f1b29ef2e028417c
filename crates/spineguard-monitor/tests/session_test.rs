//! Integration tests for the monitoring session runtime.
//!
//! These tests drive real sessions through the crate's public API: a
//! centroid classifier loaded from a JSON artifact on disk, file and
//! in-memory sample sources, and a channel-backed recording notifier.
//!
//! Test matrix:
//! - Replayed capture ends the session cleanly with a well-formed log
//! - Alert fire/resolve cycle reaches the notifier exactly once each
//! - Stop unblocks a pending read on a source that never ends
//! - Restart recreates the snapshot log and pipeline state
//! - The Monitor controller refuses a second concurrent session

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

use spineguard_core::{
    AlertEvent, AlertNotifier, MonitorError, NotifyError, PostureLabel, FEATURE_NAMES,
};
use spineguard_model::{CentroidClassifier, ClassCentroid, ModelArtifact, SCHEMA_VERSION};
use spineguard_monitor::{LogNotifier, Monitor, MonitorSession, SampleSource, SessionConfig};
use spineguard_pipeline::{AlertConfig, PipelineConfig, WindowConfig};

// Upright reading: tilt 0. Slouched reading: tilt 45.
const UPRIGHT_LINE: &str = "0.0,0.0,1.0,0.0,0.0,0.0";
const SLOUCHED_LINE: &str = "0.7,0.0,0.7,0.0,0.0,0.0";

const WAIT: Duration = Duration::from_secs(5);

#[derive(Clone, Default)]
struct RecordingNotifier {
    events: Arc<Mutex<Vec<AlertEvent>>>,
}

impl RecordingNotifier {
    fn recorded(&self) -> Vec<AlertEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AlertNotifier for RecordingNotifier {
    fn notify(&self, event: AlertEvent) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Write a two-class artifact whose centroids are the feature vectors of
/// the upright and slouched readings, and load a classifier from it.
fn classifier_on_disk(dir: &Path) -> CentroidClassifier {
    let artifact = ModelArtifact {
        schema_version: SCHEMA_VERSION,
        feature_names: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
        classes: vec![
            ClassCentroid {
                label: "good".to_string(),
                centroid: vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            },
            ClassCentroid {
                label: "bad".to_string(),
                centroid: vec![0.7, 0.0, 0.7, 0.0, 0.0, 0.0, 0.99, 0.0, 45.0],
            },
        ],
    };
    let path = dir.join("model.json");
    std::fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();
    CentroidClassifier::load(&path).unwrap()
}

/// Session config reacting on every sample: window and vote ring of one,
/// alert thresholds of three bad to fire and two good to resolve.
fn per_sample_config(log_path: PathBuf) -> SessionConfig {
    SessionConfig {
        pipeline: PipelineConfig {
            window: WindowConfig {
                fast_size: 1,
                slow_size: 1,
                tilt_threshold_deg: 15.0,
            },
            vote_buffer_size: 1,
            alert: AlertConfig {
                bad_trigger_threshold: 3,
                good_resolve_threshold: 2,
            },
        },
        log_path,
        log_interval: Duration::from_secs(600),
    }
}

#[tokio::test]
async fn replayed_capture_runs_to_completion() {
    let dir = tempfile::TempDir::new().unwrap();
    let classifier = classifier_on_disk(dir.path());

    let capture = dir.path().join("capture.csv");
    let mut lines = String::new();
    for _ in 0..8 {
        lines.push_str(UPRIGHT_LINE);
        lines.push('\n');
    }
    std::fs::write(&capture, lines).unwrap();

    let log_path = dir.path().join("posture_log.csv");
    let handle = MonitorSession::start(
        SessionConfig {
            log_path: log_path.clone(),
            ..SessionConfig::default()
        },
        Box::new(classifier),
        Box::new(LogNotifier::new()),
        SampleSource::open_file(&capture).await.unwrap(),
    )
    .unwrap();

    timeout(WAIT, handle.stopped()).await.unwrap();
    let status = handle.status();
    assert!(!status.active, "EOF ends the session");
    assert_eq!(status.current_posture, PostureLabel::Good);
    timeout(WAIT, handle.join()).await.unwrap().unwrap();

    let log = std::fs::read_to_string(&log_path).unwrap();
    let headers = log
        .lines()
        .filter(|l| l.starts_with("Timestamp"))
        .count();
    assert_eq!(headers, 1, "header exactly once");
    assert_eq!(
        log.lines().next().unwrap(),
        "Timestamp,ax,ay,az,gx,gy,gz,accel_mag,gyro_mag,tilt_angle,Prediction"
    );
}

#[tokio::test]
async fn alert_cycle_reaches_notifier_once_each() {
    let dir = tempfile::TempDir::new().unwrap();
    let classifier = classifier_on_disk(dir.path());
    let notifier = RecordingNotifier::default();

    let capture = dir.path().join("capture.csv");
    let mut lines = String::new();
    for _ in 0..3 {
        lines.push_str(SLOUCHED_LINE);
        lines.push('\n');
    }
    for _ in 0..2 {
        lines.push_str(UPRIGHT_LINE);
        lines.push('\n');
    }
    std::fs::write(&capture, lines).unwrap();

    let handle = MonitorSession::start(
        per_sample_config(dir.path().join("log.csv")),
        Box::new(classifier),
        Box::new(notifier.clone()),
        SampleSource::open_file(&capture).await.unwrap(),
    )
    .unwrap();
    timeout(WAIT, handle.join()).await.unwrap().unwrap();

    assert_eq!(
        notifier.recorded(),
        vec![AlertEvent::Fired, AlertEvent::Resolved]
    );
}

#[tokio::test]
async fn stop_unblocks_a_source_that_never_ends() {
    let dir = tempfile::TempDir::new().unwrap();
    let classifier = classifier_on_disk(dir.path());

    let (mut tx, rx) = tokio::io::duplex(1024);
    let handle = MonitorSession::start(
        per_sample_config(dir.path().join("log.csv")),
        Box::new(classifier),
        Box::new(LogNotifier::new()),
        SampleSource::from_reader(rx),
    )
    .unwrap();

    // Feed slouched readings and wait until the pipeline has visibly
    // processed them, proving the loop is past startup.
    tx.write_all(format!("{SLOUCHED_LINE}\n").repeat(3).as_bytes())
        .await
        .unwrap();
    let mut status = handle.status_stream();
    timeout(WAIT, status.wait_for(|s| s.current_posture == PostureLabel::Bad))
        .await
        .unwrap()
        .unwrap();

    // The writer half stays open: the next read would block forever
    // without the stop signal.
    handle.stop();
    timeout(WAIT, handle.stopped()).await.unwrap();
    assert!(!handle.status().active);
    assert_eq!(handle.status().current_posture, PostureLabel::Good);
    timeout(WAIT, handle.join()).await.unwrap().unwrap();
}

#[tokio::test]
async fn restart_begins_from_a_fresh_log_and_pipeline() {
    let dir = tempfile::TempDir::new().unwrap();
    let log_path = dir.path().join("log.csv");

    // First session: log every tick so rows accumulate.
    let capture = dir.path().join("capture.csv");
    std::fs::write(&capture, format!("{UPRIGHT_LINE}\n").repeat(5)).unwrap();
    let mut config = per_sample_config(log_path.clone());
    config.log_interval = Duration::ZERO;
    let handle = MonitorSession::start(
        config,
        Box::new(classifier_on_disk(dir.path())),
        Box::new(LogNotifier::new()),
        SampleSource::open_file(&capture).await.unwrap(),
    )
    .unwrap();
    timeout(WAIT, handle.join()).await.unwrap().unwrap();
    assert!(
        std::fs::read_to_string(&log_path).unwrap().lines().count() > 1,
        "first session wrote rows"
    );

    // Second session over an empty stream: the log is recreated with
    // only the header, and no stale state leaks in.
    let empty = dir.path().join("empty.csv");
    std::fs::write(&empty, "").unwrap();
    let handle = MonitorSession::start(
        per_sample_config(log_path.clone()),
        Box::new(classifier_on_disk(dir.path())),
        Box::new(LogNotifier::new()),
        SampleSource::open_file(&empty).await.unwrap(),
    )
    .unwrap();
    timeout(WAIT, handle.join()).await.unwrap().unwrap();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().count(), 1, "restart truncated the log");
}

#[tokio::test]
async fn monitor_refuses_second_concurrent_session() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut monitor = Monitor::new();

    // A duplex source with the writer held open keeps the first session
    // active for as long as the test needs.
    let (_tx, rx) = tokio::io::duplex(64);
    monitor
        .start(
            per_sample_config(dir.path().join("log1.csv")),
            Box::new(classifier_on_disk(dir.path())),
            Box::new(LogNotifier::new()),
            SampleSource::from_reader(rx),
        )
        .unwrap();
    assert!(monitor.is_active());

    let (_tx2, rx2) = tokio::io::duplex(64);
    let err = monitor
        .start(
            per_sample_config(dir.path().join("log2.csv")),
            Box::new(classifier_on_disk(dir.path())),
            Box::new(LogNotifier::new()),
            SampleSource::from_reader(rx2),
        )
        .unwrap_err();
    assert!(matches!(err, MonitorError::AlreadyActive));

    timeout(WAIT, monitor.stop()).await.unwrap().unwrap();
    assert!(!monitor.is_active());

    // With the first session stopped, a new one may start.
    let (_tx3, rx3) = tokio::io::duplex(64);
    monitor
        .start(
            per_sample_config(dir.path().join("log3.csv")),
            Box::new(classifier_on_disk(dir.path())),
            Box::new(LogNotifier::new()),
            SampleSource::from_reader(rx3),
        )
        .unwrap();
    timeout(WAIT, monitor.stop()).await.unwrap().unwrap();
}
