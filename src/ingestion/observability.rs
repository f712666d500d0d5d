use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ImportError;
use crate::transform::MergeStats;

use super::unified::InputFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Which of the two inputs a load refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    /// The main tenant export.
    Primary,
    /// The alternate-contact export.
    Alternate,
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The input path.
    pub path: PathBuf,
    /// Format used, if it could be determined.
    pub format: Option<InputFormat>,
    /// Primary or alternate input.
    pub role: InputRole,
}

/// Minimal stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of data rows read (blank rows included).
    pub rows: usize,
}

/// Observer interface for import outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ImportObserver: Send + Sync {
    /// Called when an input file loads.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when an input file fails to load.
    fn on_failure(&self, _ctx: &LoadContext, _severity: ImportSeverity, _error: &ImportError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: ImportSeverity, error: &ImportError) {
        self.on_failure(ctx, severity, error)
    }

    /// Called once the alternate-contact merge has run.
    fn on_merge(&self, _stats: &MergeStats) {}
}

/// Severity for a finished merge: duplicate keys were silently dropped, which is worth a warning.
pub fn merge_severity(stats: &MergeStats) -> ImportSeverity {
    if stats.duplicates_discarded > 0 {
        ImportSeverity::Warning
    } else {
        ImportSeverity::Info
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }

    fn on_merge(&self, stats: &MergeStats) {
        for o in &self.observers {
            o.on_merge(stats);
        }
    }
}

/// Forwards import events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ImportObserver for TracingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        tracing::info!(
            role = ?ctx.role,
            format = ?ctx.format,
            path = %ctx.path.display(),
            rows = stats.rows,
            "input loaded"
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: ImportSeverity, error: &ImportError) {
        tracing::error!(
            role = ?ctx.role,
            format = ?ctx.format,
            path = %ctx.path.display(),
            severity = ?severity,
            error = %error,
            "input failed to load"
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: ImportSeverity, error: &ImportError) {
        tracing::error!(
            alert = true,
            role = ?ctx.role,
            path = %ctx.path.display(),
            severity = ?severity,
            error = %error,
            "input load alert"
        );
    }

    fn on_merge(&self, stats: &MergeStats) {
        match merge_severity(stats) {
            ImportSeverity::Info => tracing::info!(
                alternate_rows = stats.alternate_rows,
                lookup_entries = stats.lookup_entries,
                matched = stats.matched,
                "alternate contacts merged"
            ),
            _ => tracing::warn!(
                alternate_rows = stats.alternate_rows,
                lookup_entries = stats.lookup_entries,
                duplicates_discarded = stats.duplicates_discarded,
                matched = stats.matched,
                "alternate contacts merged; later rows with a repeated LegacyTenantId were ignored"
            ),
        }
    }
}

/// Appends import events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ImportObserver for FileObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.append_line(&format!(
            "{} ok role={:?} format={:?} path={} rows={}",
            unix_ts(),
            ctx.role,
            ctx.format,
            ctx.path.display(),
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: ImportSeverity, error: &ImportError) {
        self.append_line(&format!(
            "{} fail severity={:?} role={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.role,
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: ImportSeverity, error: &ImportError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} role={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.role,
            ctx.path.display(),
            error
        ));
    }

    fn on_merge(&self, stats: &MergeStats) {
        self.append_line(&format!(
            "{} merge severity={:?} {}",
            unix_ts(),
            merge_severity(stats),
            describe_merge(stats)
        ));
    }
}

fn describe_merge(stats: &MergeStats) -> String {
    format!(
        "alternate_rows={} blank_dropped={} entries={} duplicates_discarded={} matched={}",
        stats.alternate_rows,
        stats.blank_rows_dropped,
        stats.lookup_entries,
        stats.duplicates_discarded,
        stats.matched
    )
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
