use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument};

use crate::config::{Config, SheetNames};
use crate::error::{CatalogError, Result};
use crate::metrics::CatalogMetrics;
use crate::pipeline::ingestion::open_workbook;
use crate::pipeline::processing::{
    assemble, AttributeIndex, CatalogEntry, GeneralAttributes, PnFieldSet,
};
use crate::pipeline::storage::{default_output_path, write_catalog};
use crate::types::{Sheet, Workbook};

/// Everything produced from one workbook, before it is written
#[derive(Debug, Clone)]
pub struct Catalog {
    pub fields: PnFieldSet,
    pub attribute_sheets: usize,
    pub entries: Vec<CatalogEntry>,
}

/// Result of a complete conversion run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub fields: Vec<String>,
    pub entries: usize,
    pub attribute_sheets: usize,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
}

fn required_sheet<'a>(workbook: &'a Workbook, name: &str) -> Result<&'a Sheet> {
    workbook
        .sheet(name)
        .ok_or_else(|| CatalogError::MissingRequiredSheet {
            sheet: name.to_string(),
            path: "workbook".to_string(),
        })
}

/// Run expansion, GENERAL reading, attribute indexing and assembly on an
/// already-loaded workbook. Every sheet that is neither PN nor GENERAL is
/// treated as an attribute sheet.
#[instrument(skip_all)]
pub fn generate_catalog(workbook: &Workbook, names: &SheetNames) -> Result<Catalog> {
    let pn_sheet = required_sheet(workbook, &names.pn)?;
    let general_sheet = required_sheet(workbook, &names.general)?;

    let fields = PnFieldSet::from_sheet(pn_sheet)?;
    let general = GeneralAttributes::from_sheet(general_sheet)?;
    let index = AttributeIndex::build(
        workbook
            .sheets
            .iter()
            .filter(|sheet| !names.is_reserved(&sheet.name)),
    )?;
    info!(
        "Expanding {} PN fields against {} attribute sheets",
        fields.len(),
        index.len()
    );

    let entries = assemble(&fields, &general, &index)?;
    Ok(Catalog {
        fields,
        attribute_sheets: index.len(),
        entries,
    })
}

/// Converts one spreadsheet into one JSON catalog file
#[derive(Debug, Clone)]
pub struct Generator {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Config,
}

impl Generator {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            config: Config::default(),
        }
    }

    /// Write to this path instead of the derived `<epoch>_<stem>.json`
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Run the conversion and return the path written
    pub fn run(&self) -> Result<PathBuf> {
        self.run_with_summary().map(|summary| summary.output)
    }

    #[instrument(skip(self), fields(input = %self.input.display()))]
    pub fn run_with_summary(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let timer = Instant::now();

        let result = self.execute(started_at, timer);
        match &result {
            Ok(summary) => {
                CatalogMetrics::record_run_success(
                    summary.entries,
                    summary.attribute_sheets,
                    summary.duration_secs,
                );
                info!(
                    "Wrote {} catalog entries to {}",
                    summary.entries,
                    summary.output.display()
                );
            }
            Err(e) => {
                CatalogMetrics::record_run_error(e.kind());
                error!("Conversion of {} failed: {}", self.input.display(), e);
            }
        }
        result
    }

    fn execute(&self, started_at: DateTime<Utc>, timer: Instant) -> Result<RunSummary> {
        let workbook = open_workbook(&self.input, &self.config.sheets)?;
        let catalog = generate_catalog(&workbook, &self.config.sheets)?;

        let output = match &self.output {
            Some(path) => path.clone(),
            None => default_output_path(
                &self.input,
                Utc::now().timestamp(),
                self.config.output.directory.as_deref(),
            ),
        };
        write_catalog(&output, &catalog.entries, self.config.output.pretty)?;

        Ok(RunSummary {
            input: self.input.clone(),
            output,
            fields: catalog.fields.columns().map(str::to_string).collect(),
            entries: catalog.entries.len(),
            attribute_sheets: catalog.attribute_sheets,
            started_at,
            duration_secs: timer.elapsed().as_secs_f64(),
        })
    }
}

/// Convert `input` with default configuration, returning the path written
pub fn convert(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let mut generator = Generator::new(input);
    if let Some(path) = output {
        generator = generator.with_output(path);
    }
    generator.run()
}
