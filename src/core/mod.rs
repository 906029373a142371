pub mod csv_codec;
pub mod engine;
pub mod flat_json;
pub mod transform;

pub use crate::domain::model::{Conversion, CsvTable, FlatRecord, TransformAction};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
