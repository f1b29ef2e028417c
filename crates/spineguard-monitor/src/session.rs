//! Monitoring session runtime.
//!
//! A session is one spawned tokio task running the synchronous pipeline
//! over a sample source. The task is the single writer of a watch-backed
//! status cell; external readers borrow the latest snapshot without ever
//! blocking the loop. Stop is cooperative: a `Notify` signal unblocks
//! the pending read, the in-flight sample finishes, the logger flushes,
//! and the task exits after publishing inactive status. A restart always
//! builds a fresh pipeline, so no partially-mutated state survives.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{error, info};

use spineguard_core::{
    AlertNotifier, Classifier, MonitorError, MonitorResult, MonitorStatus,
};
use spineguard_pipeline::{PipelineConfig, PosturePipeline, SnapshotLogger};

use crate::source::SampleSource;

/// Configuration for one monitoring session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Per-sample pipeline configuration.
    pub pipeline: PipelineConfig,
    /// Snapshot log path, recreated at session start.
    pub log_path: PathBuf,
    /// Interval between snapshot log rows.
    pub log_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            log_path: PathBuf::from("posture_log.csv"),
            log_interval: Duration::from_secs(10),
        }
    }
}

/// Entry point for starting monitoring sessions.
pub struct MonitorSession;

impl MonitorSession {
    /// Start a monitoring session as a background task.
    ///
    /// The classifier must already be loaded; loading it (and failing
    /// fast on a bad artifact) is the caller's first step. The snapshot
    /// log is recreated here, before the task spawns, so a session with
    /// an unwritable log path never starts. Must be called from within a
    /// tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::LogCreate`] if the snapshot log cannot be
    /// created; no task is spawned and no state is left behind.
    pub fn start(
        config: SessionConfig,
        classifier: Box<dyn Classifier>,
        notifier: Box<dyn AlertNotifier>,
        source: SampleSource,
    ) -> MonitorResult<MonitorHandle> {
        let logger = SnapshotLogger::create(&config.log_path, config.log_interval).map_err(|e| {
            MonitorError::LogCreate {
                path: config.log_path.display().to_string(),
                source: e,
            }
        })?;
        let pipeline = PosturePipeline::new(config.pipeline, classifier, notifier, logger);

        let (status_tx, status_rx) = watch::channel(MonitorStatus {
            active: true,
            ..MonitorStatus::default()
        });
        let stop = Arc::new(Notify::new());
        let task = tokio::spawn(run_loop(pipeline, source, status_tx, Arc::clone(&stop)));

        info!(log = %config.log_path.display(), "monitoring session started");
        Ok(MonitorHandle {
            status: status_rx,
            stop,
            task,
        })
    }
}

/// Handle to a running (or finished) monitoring session.
///
/// The handle is the only way to observe or control the session; there
/// is no process-wide session state.
pub struct MonitorHandle {
    status: watch::Receiver<MonitorStatus>,
    stop: Arc<Notify>,
    task: JoinHandle<MonitorResult<()>>,
}

impl MonitorHandle {
    /// Latest published status snapshot.
    #[must_use]
    pub fn status(&self) -> MonitorStatus {
        *self.status.borrow()
    }

    /// A receiver for following status updates.
    #[must_use]
    pub fn status_stream(&self) -> watch::Receiver<MonitorStatus> {
        self.status.clone()
    }

    /// Request a cooperative stop.
    ///
    /// The signal is buffered, so stopping before the loop reaches its
    /// next read is not lost. Idempotent.
    pub fn stop(&self) {
        self.stop.notify_one();
    }

    /// Wait until the session has published inactive status.
    pub async fn stopped(&self) {
        let mut status = self.status.clone();
        let _ = status.wait_for(|s| !s.active).await;
    }

    /// Wait for the session task and surface its result.
    ///
    /// # Errors
    ///
    /// Returns the session's terminal error, e.g. a failed source read.
    pub async fn join(self) -> MonitorResult<()> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Ok(()),
        }
    }
}

async fn run_loop(
    mut pipeline: PosturePipeline,
    mut source: SampleSource,
    status: watch::Sender<MonitorStatus>,
    stop: Arc<Notify>,
) -> MonitorResult<()> {
    let result = loop {
        tokio::select! {
            () = stop.notified() => {
                info!("stop requested");
                break Ok(());
            }
            line = source.next_line() => match line {
                Ok(Some(line)) => {
                    if let Some(tick) = pipeline.process_line(&line) {
                        status.send_replace(MonitorStatus {
                            active: true,
                            current_posture: tick.debounced,
                        });
                    }
                }
                Ok(None) => {
                    info!(samples = pipeline.samples_seen(), "sample source ended");
                    break Ok(());
                }
                Err(e) => {
                    error!(error = %e, "sample source failed");
                    break Err(MonitorError::from(e));
                }
            }
        }
    };

    pipeline.flush();
    status.send_replace(MonitorStatus::default());
    result
}

/// Owner of at most one monitoring session.
///
/// Replaces any "is a session active" process global: the control
/// surface holds a `Monitor` and every start/stop/status question goes
/// through it.
#[derive(Default)]
pub struct Monitor {
    handle: Option<MonitorHandle>,
}

impl Monitor {
    /// Create a controller with no session running.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, refusing if one is still active.
    ///
    /// # Errors
    ///
    /// [`MonitorError::AlreadyActive`] if the previous session has not
    /// finished, plus everything [`MonitorSession::start`] returns.
    pub fn start(
        &mut self,
        config: SessionConfig,
        classifier: Box<dyn Classifier>,
        notifier: Box<dyn AlertNotifier>,
        source: SampleSource,
    ) -> MonitorResult<()> {
        if self.is_active() {
            return Err(MonitorError::AlreadyActive);
        }
        self.handle = Some(MonitorSession::start(config, classifier, notifier, source)?);
        Ok(())
    }

    /// Whether a session is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.status().active)
    }

    /// Latest status; inactive when no session was ever started.
    #[must_use]
    pub fn status(&self) -> MonitorStatus {
        self.handle
            .as_ref()
            .map(MonitorHandle::status)
            .unwrap_or_default()
    }

    /// Stop the current session, if any, and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns the session's terminal error; stopping with no session
    /// running is a no-op.
    pub async fn stop(&mut self) -> MonitorResult<()> {
        match self.handle.take() {
            Some(handle) => {
                handle.stop();
                handle.join().await
            }
            None => Ok(()),
        }
    }
}
