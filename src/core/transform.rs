use crate::core::{csv_codec, flat_json};
use crate::domain::model::{FlatRecord, TransformAction};
use crate::utils::error::TransformError;

/// 依照動作轉換輸入文字；不會回傳部分結果
pub fn transform(action: TransformAction, input: &str) -> Result<String, TransformError> {
    tracing::debug!("Running {} on {} bytes of input", action.id(), input.len());

    let result = match action {
        TransformAction::CsvToJson => csv_to_json(input),
        TransformAction::JsonToCsv => json_to_csv(input),
        TransformAction::FormatJsonByLine => format_json_by_line(input),
    };

    match &result {
        Ok(output) => tracing::debug!("{} produced {} bytes", action.id(), output.len()),
        Err(e) => tracing::debug!("{} failed: {}", action.id(), e),
    }

    result
}

/// Decodes UTF-8 (dropping one leading byte-order mark) before dispatching to [`transform`].
pub fn transform_bytes(action: TransformAction, input: &[u8]) -> Result<String, TransformError> {
    let text = std::str::from_utf8(input)
        .map_err(|_| TransformError::invalid_input("Input is not valid UTF-8 text."))?;
    transform(action, text.strip_prefix('\u{feff}').unwrap_or(text))
}

pub fn csv_to_json(input: &str) -> Result<String, TransformError> {
    let rows = csv_codec::parse(input)?;
    let (header_row, data_rows) = match rows.split_first() {
        Some((header, rest)) if !header.is_empty() => (header, rest),
        _ => {
            return Err(TransformError::invalid_input(
                "CSV is empty or missing a header row.",
            ))
        }
    };

    let headers: Vec<&str> = header_row.iter().map(|h| h.trim()).collect();

    let records: Vec<FlatRecord> = data_rows
        .iter()
        .filter(|row| !row.iter().all(|field| field.trim().is_empty()))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(index, header)| {
                    let value = row.get(index).cloned().unwrap_or_default();
                    (header.to_string(), value)
                })
                .collect()
        })
        .collect();

    tracing::debug!(
        "Parsed {} columns and {} records from CSV",
        headers.len(),
        records.len()
    );

    flat_json::render(&flat_json::records_to_value(&records))
}

pub fn json_to_csv(input: &str) -> Result<String, TransformError> {
    let value = flat_json::parse_json(input)?;
    let records = flat_json::extract_flat_objects(&value)?;
    if records.is_empty() {
        return Err(TransformError::invalid_input(
            "JSON has no records to convert.",
        ));
    }

    let mut headers: Vec<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();
    headers.sort_unstable();
    headers.dedup();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(csv_codec::serialize_row(&headers));

    for record in &records {
        let row: Vec<&str> = headers
            .iter()
            .map(|header| record.get(*header).map(String::as_str).unwrap_or(""))
            .collect();
        lines.push(csv_codec::serialize_row(&row));
    }

    Ok(lines.join("\n"))
}

pub fn format_json_by_line(input: &str) -> Result<String, TransformError> {
    let value = flat_json::parse_json(input)?;
    flat_json::validate_flat_json(&value)?;
    flat_json::render(&value)
}
