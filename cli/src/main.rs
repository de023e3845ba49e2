use anyhow::Context;
use clap::{Parser, Subcommand};
use geoshiftcore::{ObfuscationError, ObfuscationOutcome};
use metadata::{strip_directory, ExifToolWriter};
use std::fs;
use std::path::{Path, PathBuf};
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod catalog;
mod export;
mod metadata;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Move a batch of geotagged images somewhere else, keeping their layout")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
    /// Load a workflow config from YAML; the flags below are then ignored
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value = "images/source")]
    source: PathBuf,
    #[arg(long, default_value = "images/output")]
    output: PathBuf,
    /// Seed for a reproducible shift
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "tmpkml.kml")]
    kml: PathBuf,
    /// Name of the KML document
    #[arg(long, default_value = "TempKML")]
    document_name: String,
    #[arg(long, default_value = "exiftool")]
    exiftool: String,
    /// Export the KML without rewriting image metadata
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Write a JSON summary of the run
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<WorkflowConfig> {
        if let Some(path) = self.workflow {
            return WorkflowConfig::load(path);
        }
        let mut config = WorkflowConfig::from_args(self.source, self.output, self.seed);
        config.kml_path = self.kml;
        config.document_name = self.document_name;
        config.exiftool = self.exiftool;
        config.dry_run = self.dry_run;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Dump every file's EXIF to stripped-data/EXIF.csv and save metadata-free copies
    Strip {
        /// Directory holding the images; not searched recursively
        directory: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(Command::Strip { directory }) = &args.command {
        return strip(directory, &args.exiftool);
    }

    let report_path = args.report.clone();
    let runner = Runner::new(args.into_config()?);
    let result = match runner.execute() {
        Ok(result) => result,
        Err(err) => {
            if let Some(ObfuscationError::ZoneConflict { .. }) =
                err.downcast_ref::<ObfuscationError>()
            {
                println!("Aborted: UTM zone conflict, images were not processed.");
            }
            return Err(err);
        }
    };

    println!(
        "Processed {} files, {} georeferenced",
        result.files, result.georeferenced
    );
    match &result.outcome {
        ObfuscationOutcome::NoGeoreferencedRecords => {
            println!("No GPS positions found, nothing was moved.")
        }
        ObfuscationOutcome::Shifted(report) => println!(
            "Moved {} image(s) into zone {} (shift {} m east, {} m north)",
            report.shifted, report.target_zone, report.shift.x_adder, report.shift.y_adder
        ),
    }

    if let Some(report_path) = report_path {
        if let Some(parent) = report_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)?;
        }
        let report = serde_json::to_string_pretty(&result).context("serializing run report")?;
        fs::write(&report_path, report)
            .with_context(|| format!("writing run report {}", report_path.display()))?;
    }

    Ok(())
}

fn strip(directory: &Path, exiftool: &str) -> anyhow::Result<()> {
    let summary = strip_directory(directory, &ExifToolWriter::new(exiftool))
        .with_context(|| format!("stripping metadata in {}", directory.display()))?;
    println!(
        "{} file(s) imported and saved to {}, {} EXIF field(s) saved to {}",
        summary.files,
        summary.output_directory.display(),
        summary.fields,
        summary.dump_path.display()
    );
    Ok(())
}
