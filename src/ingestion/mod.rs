//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_table`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`LoadOptions`])
//! - reads every cell as text into a [`crate::types::SourceTable`]
//! - optionally reports success/failure/alerts to an [`ImportObserver`]
//!
//! Format-specific functions are also available under [`csv`] and (with the `excel` feature)
//! `excel`.

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod unified;

pub use observability::{
    merge_severity, CompositeObserver, FileObserver, ImportObserver, ImportSeverity, InputRole, LoadContext,
    LoadStats, TracingObserver,
};
pub use unified::{load_table, severity_for_error, InputFormat, LoadOptions, SheetSelection};
