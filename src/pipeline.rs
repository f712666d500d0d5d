//! End-to-end import: load → map → merge → derive keys → write.
//!
//! [`QmsImporter::transform`] runs the in-memory part on already-loaded tables;
//! [`ImportRequest::run`] adds the file I/O around it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::MappingConfig;
use crate::error::ImportResult;
use crate::export::write_qms_csv_to_path;
use crate::ingestion::{load_table, ImportObserver, ImportSeverity, InputRole, LoadOptions, SheetSelection};
use crate::transform::{derive_dedup_keys, merge_alternate_contacts, MergeStats, RecordMapper};
use crate::types::{QmsRecord, SourceTable};

/// Counters for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows read from the primary input.
    pub primary_rows: usize,
    /// Primary rows dropped because every cell was unfilled.
    pub blank_rows_dropped: usize,
    /// Records produced.
    pub output_rows: usize,
    /// Merge counters, when an alternate input was supplied.
    pub merge: Option<MergeStats>,
}

/// Runs the mapping rules over loaded tables.
#[derive(Clone, Default)]
pub struct QmsImporter {
    mapper: RecordMapper,
    parallel: bool,
    observer: Option<Arc<dyn ImportObserver>>,
}

impl fmt::Debug for QmsImporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QmsImporter")
            .field("mapper", &self.mapper)
            .field("parallel", &self.parallel)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl QmsImporter {
    /// Validate `config` and build an importer from it.
    pub fn new(config: &MappingConfig) -> ImportResult<Self> {
        Ok(Self {
            mapper: RecordMapper::new(config)?,
            parallel: false,
            observer: None,
        })
    }

    /// Map primary rows on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Report merge results to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn ImportObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Produce the final records from a primary table and an optional alternate table.
    ///
    /// Blank primary rows are removed from `primary` before mapping. The lookup table is fully
    /// built before any record is merged, and dedup keys are derived last.
    pub fn transform(
        &self,
        primary: &mut SourceTable,
        alternates: Option<&SourceTable>,
    ) -> (Vec<QmsRecord>, ImportSummary) {
        let primary_rows = primary.row_count();
        let blank_rows_dropped = primary.drop_blank_rows();

        let mut records = self.mapper.map_table(primary, self.parallel);

        let merge = alternates.map(|alts| {
            let stats = merge_alternate_contacts(&mut records, alts, &self.mapper);
            if let Some(obs) = self.observer.as_ref() {
                obs.on_merge(&stats);
            }
            stats
        });

        records.iter_mut().for_each(derive_dedup_keys);

        let summary = ImportSummary {
            primary_rows,
            blank_rows_dropped,
            output_rows: records.len(),
            merge,
        };
        (records, summary)
    }
}

/// A complete file-to-file import.
#[derive(Clone)]
pub struct ImportRequest {
    /// Primary tenant export (CSV or spreadsheet).
    pub primary_path: PathBuf,
    /// Sheet to read from a primary workbook.
    pub primary_sheet: SheetSelection,
    /// Alternate-contact export; the merge is skipped when `None`.
    pub alternate_path: Option<PathBuf>,
    /// Destination CSV.
    pub output_path: PathBuf,
    /// Mapping configuration.
    pub config: MappingConfig,
    /// Map primary rows in parallel.
    pub parallel: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ImportObserver>>,
    /// Severity threshold at which load failures raise `on_alert`.
    pub alert_at_or_above: ImportSeverity,
}

impl fmt::Debug for ImportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportRequest")
            .field("primary_path", &self.primary_path)
            .field("primary_sheet", &self.primary_sheet)
            .field("alternate_path", &self.alternate_path)
            .field("output_path", &self.output_path)
            .field("parallel", &self.parallel)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl ImportRequest {
    /// Create a request with the built-in mapping and no observer.
    pub fn new(primary_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            primary_path: primary_path.into(),
            primary_sheet: SheetSelection::default(),
            alternate_path: None,
            output_path: output_path.into(),
            config: MappingConfig::default(),
            parallel: false,
            observer: None,
            alert_at_or_above: ImportSeverity::Critical,
        }
    }

    /// Set the alternate-contact input.
    pub fn with_alternates(mut self, path: impl Into<PathBuf>) -> Self {
        self.alternate_path = Some(path.into());
        self
    }

    /// Load both inputs, transform, and write the output CSV.
    ///
    /// Any load or write failure aborts the run; the output file is only created once every
    /// record has been produced.
    pub fn run(&self) -> ImportResult<ImportSummary> {
        let mut importer = QmsImporter::new(&self.config)?.with_parallel(self.parallel);
        if let Some(obs) = self.observer.as_ref() {
            importer = importer.with_observer(Arc::clone(obs));
        }

        let mut primary = load_table(&self.primary_path, &self.load_options(InputRole::Primary))?;

        // The alternate file is always read from its first sheet.
        let alternates = match self.alternate_path.as_ref() {
            Some(path) => Some(load_table(path, &self.load_options(InputRole::Alternate))?),
            None => None,
        };

        let (records, summary) = importer.transform(&mut primary, alternates.as_ref());
        write_qms_csv_to_path(&self.output_path, &records)?;
        Ok(summary)
    }

    fn load_options(&self, role: InputRole) -> LoadOptions {
        LoadOptions {
            format: None,
            sheet: match role {
                InputRole::Primary => self.primary_sheet.clone(),
                InputRole::Alternate => SheetSelection::First,
            },
            role,
            observer: self.observer.clone(),
            alert_at_or_above: self.alert_at_or_above,
        }
    }
}
