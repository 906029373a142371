use crate::utils::error::{AppError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let text = path.to_string_lossy();

    if text.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: text.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if text.contains('\0') {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: text.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| AppError::config(format!("Missing required argument: {}", field_name)))
}

/// Flags that only make sense for a single input file.
pub fn validate_single_input(field_name: &str, input_count: usize) -> Result<()> {
    if input_count != 1 {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: input_count.to_string(),
            reason: "Requires exactly one input file".to_string(),
        });
    }
    Ok(())
}
