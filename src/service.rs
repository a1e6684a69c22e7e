use anyhow::Context;
use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info};

use crate::{
    helpers::{layout::LayoutConfig, pdf, render},
    models::timesheet::TimesheetDocument,
};

/// Fixed name of the emitted artifact; output naming is not parameterized.
pub const OUTPUT_FILE: &str = "a4.pdf";

/// Configuration for the timesheet service
#[derive(Clone, Default)]
pub struct TimesheetConfig {
    pub layout: LayoutConfig,
}

/// The main timesheet service that validates documents, lays them out,
/// and encodes the page as a PDF
#[derive(Clone, Default)]
pub struct TimesheetService {
    pub config: TimesheetConfig,
}

impl TimesheetService {
    /// Create a new timesheet service instance
    pub fn new(config: TimesheetConfig) -> Self {
        info!("Creating new TimesheetService instance");
        Self { config }
    }

    /// Process one document: validate, render, create PDF bytes
    pub fn generate(&self, doc: &TimesheetDocument) -> Result<Vec<u8>, Box<dyn Error>> {
        info!("Generating timesheet for {} ({})", doc.name, doc.month);

        if let Err(e) = doc.validate() {
            error!("Timesheet document failed validation: {}", e);
            return Err(e.into());
        }

        let page = render::render_timesheet(doc, &self.config.layout);

        match pdf::write_pdf(&page) {
            Ok(timesheet_pdf) => {
                info!(
                    "Successfully created timesheet PDF, size: {} bytes",
                    timesheet_pdf.len()
                );
                Ok(timesheet_pdf)
            }
            Err(e) => {
                error!("Failed to create timesheet PDF: {}", e);
                Err(e.into())
            }
        }
    }

    /// Accept a document in its JSON wire shape, then generate
    pub fn generate_from_json(&self, json: &str) -> Result<Vec<u8>, Box<dyn Error>> {
        let doc = TimesheetDocument::from_json(json)?;
        info!(
            "Successfully parsed timesheet document with {} days",
            doc.days.len()
        );
        self.generate(&doc)
    }

    /// Generate and write the single-page artifact into `dir`
    pub fn save(&self, doc: &TimesheetDocument, dir: &Path) -> anyhow::Result<PathBuf> {
        let bytes = self
            .generate(doc)
            .map_err(|e| anyhow::anyhow!("Failed to generate timesheet: {}", e))?;

        let path = dir.join(OUTPUT_FILE);
        fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Saved timesheet to {}", path.display());
        Ok(path)
    }
}
