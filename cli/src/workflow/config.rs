use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub source_directory: PathBuf,
    pub output_directory: PathBuf,
    /// Fixed seed for a reproducible shift; entropy when absent.
    pub seed: Option<u64>,
    pub kml_path: PathBuf,
    pub document_name: String,
    pub exiftool: String,
    /// Produce the KML and report but leave image metadata alone.
    pub dry_run: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::from("images/source"),
            output_directory: PathBuf::from("images/output"),
            seed: None,
            kml_path: PathBuf::from("tmpkml.kml"),
            document_name: "TempKML".to_string(),
            exiftool: "exiftool".to_string(),
            dry_run: false,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(source_directory: PathBuf, output_directory: PathBuf, seed: Option<u64>) -> Self {
        Self {
            source_directory,
            output_directory,
            seed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.source_directory.is_dir() {
            anyhow::bail!(
                "source directory {} does not exist",
                self.source_directory.display()
            );
        }
        if self.source_directory == self.output_directory {
            anyhow::bail!("output directory must differ from the source directory");
        }
        Ok(())
    }
}
