use crate::config::toml_config::TomlConfig;
use crate::core::{ConfigProvider, TransformAction};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_path, validate_required_field, validate_single_input, Validate,
};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "data-transform")]
#[command(about = "Convert CSV <-> flat JSON and pretty-print flat JSON, fully offline")]
pub struct CliConfig {
    /// Conversion to run
    #[arg(value_enum, required_unless_present = "list_actions")]
    pub action: Option<TransformAction>,

    /// Input files (.csv/.txt for csv-to-json, .json/.txt otherwise)
    #[arg(required_unless_present = "list_actions")]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only); defaults to the suggested name next to the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for generated files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Replace existing output files
    #[arg(long)]
    pub overwrite: bool,

    /// Print the converted text instead of writing a file (single input only)
    #[arg(long, conflicts_with_all = ["output", "output_dir"])]
    pub stdout: bool,

    /// Path to TOML configuration file (default: ./data-transform.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// List the available actions and exit
    #[arg(long)]
    pub list_actions: bool,
}

impl CliConfig {
    /// 命令列參數優先，未指定時才套用設定檔的值
    pub fn merge_file_config(&mut self, file: &TomlConfig) {
        if self.output_dir.is_none() {
            self.output_dir = file.output.directory.clone();
        }
        self.overwrite = self.overwrite || file.overwrite();
        self.verbose = self.verbose || file.verbose();
        self.log_json = self.log_json || file.json_logs();
    }

    pub fn action(&self) -> Result<TransformAction> {
        validate_required_field("action", &self.action).copied()
    }
}

impl ConfigProvider for CliConfig {
    fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    fn overwrite(&self) -> bool {
        self.overwrite
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.list_actions {
            return Ok(());
        }

        let action = self.action()?;

        if self.inputs.is_empty() {
            return Err(AppError::config("At least one input file is required"));
        }
        for input in &self.inputs {
            validate_path("inputs", input)?;
        }

        if let Some(output) = &self.output {
            validate_path("--output", output)?;
            validate_single_input("--output", self.inputs.len())?;
        }
        if let Some(dir) = &self.output_dir {
            validate_path("--output-dir", dir)?;
        }
        if self.stdout {
            validate_single_input("--stdout", self.inputs.len())?;
        }

        tracing::debug!("Validated CLI config for {}", action.id());
        Ok(())
    }
}
