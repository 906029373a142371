use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 解析後的 CSV：依序的列，每列是依序的欄位字串
pub type CsvTable = Vec<Vec<String>>;

/// CSV 列與 JSON 物件之間共用的中介格式
pub type FlatRecord = BTreeMap<String, String>;

/// The three conversions the tool offers. Fixed at compile time, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TransformAction {
    #[serde(rename = "csvToJSON")]
    #[cfg_attr(feature = "cli", value(name = "csv-to-json"))]
    CsvToJson,
    #[serde(rename = "jsonToCSV")]
    #[cfg_attr(feature = "cli", value(name = "json-to-csv"))]
    JsonToCsv,
    #[serde(rename = "formatJSONByLine")]
    #[cfg_attr(feature = "cli", value(name = "format-json"))]
    FormatJsonByLine,
}

impl TransformAction {
    pub const ALL: [TransformAction; 3] = [
        TransformAction::CsvToJson,
        TransformAction::JsonToCsv,
        TransformAction::FormatJsonByLine,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TransformAction::CsvToJson => "csvToJSON",
            TransformAction::JsonToCsv => "jsonToCSV",
            TransformAction::FormatJsonByLine => "formatJSONByLine",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransformAction::CsvToJson => "CSV -> JSON",
            TransformAction::JsonToCsv => "JSON -> CSV",
            TransformAction::FormatJsonByLine => "Format JSON",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TransformAction::CsvToJson => "Converts a CSV file into pretty, flat JSON.",
            TransformAction::JsonToCsv => {
                "Converts flat JSON (object/array of objects) into CSV."
            }
            TransformAction::FormatJsonByLine => {
                "Formats flat JSON with one field/value per line and readable indentation."
            }
        }
    }

    pub fn allowed_input_extensions(&self) -> &'static [&'static str] {
        match self {
            TransformAction::CsvToJson => &["csv", "txt"],
            TransformAction::JsonToCsv | TransformAction::FormatJsonByLine => &["json", "txt"],
        }
    }

    pub fn output_extension(&self) -> &'static str {
        match self {
            TransformAction::CsvToJson | TransformAction::FormatJsonByLine => "json",
            TransformAction::JsonToCsv => "csv",
        }
    }

    /// 副檔名比對不分大小寫，沒有副檔名的檔案一律不接受
    pub fn accepts_input(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.allowed_input_extensions()
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// `data.csv` -> `data_converted.json`, `data.json` -> `data_line_formatted.json`
    pub fn suggested_output_file_name(&self, input: &Path) -> String {
        let base = input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or("output");

        match self {
            TransformAction::CsvToJson => format!("{}_converted.json", base),
            TransformAction::JsonToCsv => format!("{}_converted.csv", base),
            TransformAction::FormatJsonByLine => format!("{}_line_formatted.json", base),
        }
    }
}

impl fmt::Display for TransformAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransformAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csvToJSON" | "csv-to-json" => Ok(TransformAction::CsvToJson),
            "jsonToCSV" | "json-to-csv" => Ok(TransformAction::JsonToCsv),
            "formatJSONByLine" | "format-json" => Ok(TransformAction::FormatJsonByLine),
            other => Err(format!(
                "Unknown action '{}'. Valid actions: csv-to-json, json-to-csv, format-json",
                other
            )),
        }
    }
}

/// 單一檔案轉換完成後的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub action: TransformAction,
    pub input: PathBuf,
    pub output: PathBuf,
    pub bytes_written: usize,
}
