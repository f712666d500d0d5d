use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qms_tenant_import::config::MappingConfig;
use qms_tenant_import::ingestion::{CompositeObserver, FileObserver, ImportObserver, SheetSelection, TracingObserver};
use qms_tenant_import::pipeline::ImportRequest;

/// Convert a tenant export into the QMS tenant import CSV.
#[derive(Debug, Parser)]
#[command(name = "qms-tenant-import", version, about)]
struct Cli {
    /// Primary tenant export (.csv, .xlsx, .xls, .xlsm, .xlsb, .ods)
    #[arg(long)]
    tenants: PathBuf,

    /// Alternate-contact export, joined on LegacyTenantId
    #[arg(long)]
    alternates: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, short)]
    output: PathBuf,

    /// Sheet name to read from a primary workbook
    #[arg(long, conflicts_with = "sheet_index")]
    sheet: Option<String>,

    /// Zero-based sheet position to read from a primary workbook
    #[arg(long)]
    sheet_index: Option<usize>,

    /// JSON mapping config (denylist, phone candidates, column tables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also append load and merge events to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Map rows on a single thread
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config.as_ref() {
        Some(path) => MappingConfig::from_json_path(path)
            .with_context(|| format!("failed to load mapping config {}", path.display()))?,
        None => MappingConfig::default(),
    };

    let mut observers: Vec<Arc<dyn ImportObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(path) = cli.log_file.as_ref() {
        observers.push(Arc::new(FileObserver::new(path)));
    }

    let primary_sheet = match (cli.sheet, cli.sheet_index) {
        (Some(name), _) => SheetSelection::Named(name),
        (None, Some(idx)) => SheetSelection::Index(idx),
        (None, None) => SheetSelection::First,
    };

    let request = ImportRequest {
        primary_path: cli.tenants,
        primary_sheet,
        alternate_path: cli.alternates,
        output_path: cli.output,
        config,
        parallel: !cli.sequential,
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..ImportRequest::new("", "")
    };

    let summary = request
        .run()
        .with_context(|| format!("import of {} failed", request.primary_path.display()))?;

    tracing::info!(
        primary_rows = summary.primary_rows,
        blank_rows_dropped = summary.blank_rows_dropped,
        output_rows = summary.output_rows,
        output = %request.output_path.display(),
        "wrote QMS-formatted data"
    );
    Ok(())
}
