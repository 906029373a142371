use crate::core::transform::transform_bytes;
use crate::core::{ConfigProvider, Conversion, Storage, TransformAction};
use crate::utils::error::{AppError, Result, TransformError};
use std::path::{Path, PathBuf};

/// Reads an input file, runs the conversion and writes the result.
pub struct ConversionEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ConversionEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Converts the file in memory without writing anything.
    pub fn preview(&self, action: TransformAction, input: &Path) -> Result<String> {
        self.check_input(action, input)?;
        self.read_and_transform(action, input)
    }

    fn read_and_transform(&self, action: TransformAction, input: &Path) -> Result<String> {
        let raw = self.storage.read_file(input)?;
        tracing::debug!("Read {} bytes from {}", raw.len(), input.display());
        Ok(transform_bytes(action, &raw)?)
    }

    pub fn convert(
        &self,
        action: TransformAction,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<Conversion> {
        self.check_input(action, input)?;

        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => self.default_output_path(action, input),
        };

        if !self.config.overwrite() && self.storage.exists(&output_path) {
            return Err(AppError::config(format!(
                "Output file '{}' already exists (use --overwrite to replace it)",
                output_path.display()
            )));
        }

        let converted = self.read_and_transform(action, input)?;
        self.storage.write_file(&output_path, converted.as_bytes())?;

        tracing::info!(
            "{}: {} -> {}",
            action.label(),
            input.display(),
            output_path.display()
        );

        Ok(Conversion {
            action,
            input: input.to_path_buf(),
            output: output_path,
            bytes_written: converted.len(),
        })
    }

    /// 批次轉換：單一檔案失敗不會中斷其他檔案
    pub fn convert_all(
        &self,
        action: TransformAction,
        inputs: &[PathBuf],
    ) -> Vec<(PathBuf, Result<Conversion>)> {
        let results: Vec<(PathBuf, Result<Conversion>)> = inputs
            .iter()
            .map(|input| (input.clone(), self.convert(action, input, None)))
            .collect();

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        tracing::info!(
            "Converted {} of {} files ({} failed)",
            results.len() - failed,
            results.len(),
            failed
        );

        results
    }

    pub fn default_output_path(&self, action: TransformAction, input: &Path) -> PathBuf {
        let file_name = action.suggested_output_file_name(input);
        match self.config.output_dir() {
            Some(dir) => dir.join(file_name),
            None => input
                .parent()
                .map(|parent| parent.join(&file_name))
                .unwrap_or_else(|| PathBuf::from(&file_name)),
        }
    }

    fn check_input(&self, action: TransformAction, input: &Path) -> Result<()> {
        if action.accepts_input(input) {
            return Ok(());
        }
        Err(TransformError::invalid_input(format!(
            "'{}' is not a supported input for {}. Allowed extensions: {}",
            input.display(),
            action.label(),
            action.allowed_input_extensions().join(", ")
        ))
        .into())
    }
}
