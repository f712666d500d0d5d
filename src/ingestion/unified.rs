//! Unified loading entrypoint.
//!
//! Most callers should use [`load_table`], which reads a CSV or spreadsheet into a
//! [`crate::types::SourceTable`].
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension.
//! - If an [`super::observability::ImportObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ImportError, ImportResult};
use crate::types::SourceTable;

use super::csv;
use super::observability::{ImportObserver, ImportSeverity, InputRole, LoadContext, LoadStats};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl InputFormat {
    /// Parse an input format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// Which sheet to read from a workbook. Ignored for CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    /// The first sheet in workbook order.
    #[default]
    First,
    /// A sheet by name.
    Named(String),
    /// A sheet by zero-based position.
    Index(usize),
}

/// Options controlling [`load_table`].
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<InputFormat>,
    /// Sheet to read from a workbook.
    pub sheet: SheetSelection,
    /// Which input this is, for observer context.
    pub role: InputRole,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ImportObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ImportSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("sheet", &self.sheet)
            .field("role", &self.role)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet: SheetSelection::default(),
            role: InputRole::Primary,
            observer: None,
            alert_at_or_above: ImportSeverity::Critical,
        }
    }
}

/// Read a CSV or spreadsheet file into a [`SourceTable`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use qms_tenant_import::ingestion::{load_table, LoadOptions, SheetSelection};
///
/// # fn main() -> Result<(), qms_tenant_import::ImportError> {
/// let opts = LoadOptions {
///     sheet: SheetSelection::Named("Tenants".to_string()),
///     ..Default::default()
/// };
/// let table = load_table("tenants.xlsx", &opts)?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_table(path: impl AsRef<Path>, options: &LoadOptions) -> ImportResult<SourceTable> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => Ok(f),
        None => infer_format_from_path(path),
    };

    let result = fmt.and_then(|fmt| match fmt {
        InputFormat::Csv => csv::read_csv_from_path(path),
        InputFormat::Excel => read_excel_dispatch(path, &options.sheet),
    });

    if let Some(obs) = options.observer.as_ref() {
        let ctx = LoadContext {
            path: path.to_path_buf(),
            format: options.format.or_else(|| infer_format_from_path(path).ok()),
            role: options.role,
        };
        match &result {
            Ok(table) => obs.on_success(&ctx, LoadStats { rows: table.row_count() }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Severity assigned to a load failure. I/O problems are critical; malformed input is an error.
pub fn severity_for_error(e: &ImportError) -> ImportSeverity {
    match e {
        ImportError::Io(_) => ImportSeverity::Critical,
        ImportError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ImportSeverity::Critical,
            _ => ImportSeverity::Error,
        },
        #[cfg(feature = "excel")]
        ImportError::Excel(calamine::Error::Io(_)) => ImportSeverity::Critical,
        #[cfg(feature = "excel")]
        ImportError::Excel(_) => ImportSeverity::Error,
        ImportError::Config(_) | ImportError::InvalidConfig { .. } => ImportSeverity::Error,
        ImportError::UnsupportedFormat { .. } | ImportError::SheetNotFound { .. } => {
            ImportSeverity::Error
        }
    }
}

fn infer_format_from_path(path: &Path) -> ImportResult<InputFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ImportError::UnsupportedFormat {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    InputFormat::from_extension(ext).ok_or_else(|| ImportError::UnsupportedFormat {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

fn read_excel_dispatch(path: &Path, sheet: &SheetSelection) -> ImportResult<SourceTable> {
    #[cfg(feature = "excel")]
    {
        super::excel::read_excel_from_path(path, sheet)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = (path, sheet);
        Err(ImportError::UnsupportedFormat {
            message: "excel input not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_inference_is_case_insensitive() {
        assert_eq!(InputFormat::from_extension("CSV"), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_extension("Xlsx"), Some(InputFormat::Excel));
        assert_eq!(InputFormat::from_extension("json"), None);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = load_table("tenants.json", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat { .. }));
        assert_eq!(severity_for_error(&err), ImportSeverity::Error);
    }
}
