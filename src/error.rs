use thiserror::Error;

/// Convenience result type for loading, configuration and export operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Error type returned by the I/O adapters and configuration loading.
///
/// The mapping and merge rules in [`crate::transform`] never fail; every variant here comes from
/// reading inputs, parsing configuration, or writing the output file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel read error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV read or write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The mapping configuration file is not valid JSON for [`crate::config::MappingConfig`].
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// The mapping configuration parsed but names fields the QMS schema cannot accept.
    #[error("invalid mapping config: {message}")]
    InvalidConfig { message: String },

    /// The input format could not be inferred or is not enabled in this build.
    #[error("unsupported input format: {message}")]
    UnsupportedFormat { message: String },

    /// The requested sheet name or position does not exist in the workbook.
    #[error("sheet not found: {message}")]
    SheetNotFound { message: String },
}
