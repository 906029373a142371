#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, TomlConfig};

pub use crate::core::engine::ConversionEngine;
pub use crate::core::transform::{transform, transform_bytes};
pub use domain::model::{Conversion, FlatRecord, TransformAction};
pub use utils::error::{AppError, ErrorKind, Result, TransformError};
