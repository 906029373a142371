//! Hand-written CSV tokenizer and field escaper.
//!
//! Quoting follows RFC 4180: a quoted field may contain commas, line breaks and
//! doubled quotes (`""`). Outside quotes a bare `\r` is dropped so CRLF input
//! parses the same as LF input.

use crate::domain::model::CsvTable;
use crate::utils::error::TransformError;

/// Parses CSV text into rows of fields.
///
/// An empty input yields zero rows. A final row without a trailing newline is
/// still emitted.
pub fn parse(text: &str) -> Result<CsvTable, TransformError> {
    let mut rows: CsvTable = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\r' => {}
            other => field.push(other),
        }
    }

    if in_quotes {
        return Err(TransformError::invalid_input(
            "CSV contains an unclosed quote.",
        ));
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}

/// Quotes a field when it holds a comma, a double quote or a newline.
pub fn escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Escapes every field and joins them with commas.
pub fn serialize_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| escape(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_parse_with_and_without_trailing_newline() {
        let expected = vec![row(&["a", "b", "c"]), row(&["1", "2", "3"])];
        assert_eq!(parse("a,b,c\n1,2,3").unwrap(), expected);
        assert_eq!(parse("a,b,c\n1,2,3\n").unwrap(), expected);
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let rows = parse("name,age\r\nAlice,30\r\n").unwrap();
        assert_eq!(rows, vec![row(&["name", "age"]), row(&["Alice", "30"])]);
    }

    #[test]
    fn test_parse_quoted_comma_and_escaped_quotes() {
        let rows = parse("\"a,\"\"b\"\"\",c").unwrap();
        assert_eq!(rows, vec![row(&["a,\"b\"", "c"])]);
    }

    #[test]
    fn test_parse_quoted_newline_and_carriage_return_kept() {
        let rows = parse("\"line1\r\nline2\",x\n").unwrap();
        assert_eq!(rows, vec![row(&["line1\r\nline2", "x"])]);
    }

    #[test]
    fn test_parse_empty_input_yields_no_rows() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_blank_lines_become_single_empty_field_rows() {
        let rows = parse("a\n\nb").unwrap();
        assert_eq!(rows, vec![row(&["a"]), row(&[""]), row(&["b"])]);
    }

    #[test]
    fn test_parse_trailing_comma_flushes_empty_field() {
        assert_eq!(parse("a,").unwrap(), vec![row(&["a", ""])]);
        assert_eq!(parse(",").unwrap(), vec![row(&["", ""])]);
    }

    #[test]
    fn test_parse_empty_quoted_field_at_end_is_dropped() {
        // `""` 沒有留下任何字元，也沒有已完成的欄位，因此不產生列
        assert!(parse("\"\"").unwrap().is_empty());
    }

    #[test]
    fn test_parse_unclosed_quote_fails() {
        let err = parse("\"abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.message().contains("unclosed quote"));

        assert!(parse("a,b\n\"open,field\nmore").is_err());
    }

    #[test]
    fn test_parse_unicode_fields() {
        let rows = parse("名稱,城市\n小明,台北").unwrap();
        assert_eq!(rows[1], row(&["小明", "台北"]));
    }

    #[test]
    fn test_escape_rules() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape(""), "");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_serialize_row_round_trips_through_parse() {
        let samples: Vec<Vec<String>> = vec![
            row(&["a", "b", "c"]),
            row(&["with,comma", "with \"quotes\"", "multi\nline"]),
            row(&["", "middle", ""]),
            row(&["\"", ",", "\n"]),
            row(&["tab\tseparated", "unicode ✓", " spaced "]),
        ];

        for fields in samples {
            let line = serialize_row(&fields);
            let parsed = parse(&line).unwrap();
            assert_eq!(parsed, vec![fields.clone()], "line was {:?}", line);
        }
    }
}
