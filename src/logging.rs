//! Structured log for one batch run.
//!
//! Events go to a daily JSON file under `logging.dir`, and WARN and above also
//! go to stderr. Every event of a run can be correlated through the `run_id`
//! logged at start and finish. Files older than the retention window are
//! pruned once the batch has been summarized.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use anyhow::{Context, Result};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use uuid::Uuid;

use crate::{config::LoggingConfig, driver::BatchSummary};

const LOG_FILE_PREFIX: &str = "checkout.log";
const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Owns the file writer of the current run. Dropping it flushes the log.
pub struct RunLog {
    run_id: Uuid,
    dir: PathBuf,
    retention_days: usize,
    _writer: WorkerGuard,
}

/// Outcome of one pruning pass. Failures never abort the run.
#[derive(Debug, Default)]
pub struct RetentionReport {
    pub removed: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl RunLog {
    pub fn start(config: &LoggingConfig) -> Result<Self> {
        let file_filter = env_filter(&config.filter)?;
        fs::create_dir_all(&config.dir)
            .with_context(|| format!("failed to create log directory {}", config.dir.display()))?;

        let (writer, writer_guard) =
            tracing_appender::non_blocking(rolling::daily(&config.dir, LOG_FILE_PREFIX));
        let file_layer = fmt::layer()
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(file_filter);
        let stderr_layer = config.stderr_warn_enabled.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(LevelFilter::WARN)
        });

        tracing_subscriber::registry()
            .with(ErrorLayer::default())
            .with(file_layer)
            .with(stderr_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;

        let run_id = Uuid::now_v7();
        tracing::info!(
            target: "run",
            run_id = %run_id,
            dir = %config.dir.display(),
            filter = %config.filter,
            "run_started"
        );

        Ok(Self {
            run_id,
            dir: config.dir.clone(),
            retention_days: config.retention_days,
            _writer: writer_guard,
        })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Logs the batch totals, then prunes log files past retention.
    pub fn finish(&self, summary: &BatchSummary) -> RetentionReport {
        tracing::info!(
            target: "run",
            run_id = %self.run_id,
            succeeded = summary.succeeded,
            failed = summary.failed_total(),
            failed_by_kind = ?summary.failed,
            "batch_finished"
        );

        let report = prune_expired(&self.dir, self.retention_days, SystemTime::now());
        for warning in &report.warnings {
            tracing::warn!(target: "run", run_id = %self.run_id, %warning, "log_retention_failed");
        }
        tracing::info!(
            target: "run",
            run_id = %self.run_id,
            removed = report.removed.len(),
            "log_retention_applied"
        );
        report
    }
}

fn env_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("invalid logging.filter '{directives}'"))
}

/// Removes run log files whose age at `now` is at least `retention_days`.
pub fn prune_expired(dir: &Path, retention_days: usize, now: SystemTime) -> RetentionReport {
    let max_age = Duration::from_secs((retention_days as u64).saturating_mul(SECS_PER_DAY));
    let mut report = RetentionReport::default();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            report
                .warnings
                .push(format!("cannot scan {}: {err}", dir.display()));
            return report;
        }
    };

    let run_logs = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_run_log(path));
    for path in run_logs {
        let age = fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .map(|modified| now.duration_since(modified).unwrap_or_default());
        match age {
            Ok(age) if age >= max_age => match fs::remove_file(&path) {
                Ok(()) => report.removed.push(path),
                Err(err) => report
                    .warnings
                    .push(format!("cannot remove {}: {err}", path.display())),
            },
            Ok(_) => {}
            Err(err) => report
                .warnings
                .push(format!("cannot stat {}: {err}", path.display())),
        }
    }

    report
}

fn is_run_log(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX))
}
