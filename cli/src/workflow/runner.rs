use crate::catalog::scan_directory;
use crate::export::{KmlExporter, VisualizationModel};
use crate::metadata::{ExifGpsReader, ExifToolWriter, MetadataReader, MetadataWriter};
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use geoshiftcore::processing::ScalerPair;
use geoshiftcore::{ObfuscationEngine, ObfuscationOutcome, RecordStore, RunContext};
use log::{info, warn};
use serde::Serialize;
use std::fs;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub files: usize,
    pub georeferenced: usize,
    pub scalers: ScalerPair,
    pub outcome: ObfuscationOutcome,
    pub placemarks: usize,
    /// Files tagged by the metadata writer; `None` on a dry run.
    pub written: Option<usize>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let writer = ExifToolWriter::new(self.config.exiftool.clone());
        self.execute_with(&ExifGpsReader, &writer)
    }

    /// Scan, obfuscate, write, export. A failed run leaves no KML behind and
    /// removes an output directory it created.
    pub fn execute_with(
        &self,
        reader: &dyn MetadataReader,
        writer: &dyn MetadataWriter,
    ) -> anyhow::Result<WorkflowResult> {
        self.config.validate()?;

        let scan = scan_directory(&self.config.source_directory, reader)
            .context("scanning source images")?;

        let engine = ObfuscationEngine::new();
        let mut context = RunContext::seeded(scan.store, self.config.seed);
        let outcome = context
            .obfuscate(&engine)
            .context("obfuscating image positions")?;

        let model = VisualizationModel::from_store(&context.store);
        let output_existed = self.config.output_directory.exists();
        let written = match self.emit(&context.store, &model, writer) {
            Ok(written) => written,
            Err(err) => {
                if !output_existed {
                    self.discard_output();
                }
                return Err(err);
            }
        };

        Ok(WorkflowResult {
            files: scan.files,
            georeferenced: scan.georeferenced,
            scalers: context.scalers,
            outcome,
            placemarks: model.points.len(),
            written,
        })
    }

    /// Tags the images first and exports the KML only once that succeeded.
    fn emit(
        &self,
        store: &RecordStore,
        model: &VisualizationModel,
        writer: &dyn MetadataWriter,
    ) -> anyhow::Result<Option<usize>> {
        let written = if self.config.dry_run {
            info!("dry run, image metadata left unchanged");
            None
        } else {
            fs::create_dir_all(&self.config.output_directory).with_context(|| {
                format!(
                    "creating output directory {}",
                    self.config.output_directory.display()
                )
            })?;
            let count = writer
                .write(
                    store,
                    &self.config.source_directory,
                    &self.config.output_directory,
                )
                .context("writing image metadata")?;
            Some(count)
        };

        KmlExporter::new(self.config.document_name.clone())
            .write(model, &self.config.kml_path)
            .context("exporting KML")?;
        Ok(written)
    }

    fn discard_output(&self) {
        let output = &self.config.output_directory;
        if output.exists() {
            if let Err(err) = fs::remove_dir_all(output) {
                warn!("could not remove partial output {}: {}", output.display(), err);
            }
        }
    }
}
