//! The `data-transform` command flow, kept out of `main.rs` so it can run
//! against in-memory writers.

use crate::config::{CliConfig, LocalStorage, TomlConfig};
use crate::core::engine::ConversionEngine;
use crate::core::TransformAction;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::Validate;
use std::io::Write;

/// 讀取設定檔（若有）並合併進命令列參數
pub fn load_file_config(config: &mut CliConfig) -> Result<()> {
    if let Some(file_config) = TomlConfig::discover(config.config.as_deref())? {
        file_config.validate()?;
        config.merge_file_config(&file_config);
    }
    Ok(())
}

/// Runs the command and returns the process exit code.
///
/// Converted paths (or `--stdout` text) go to `out`; per-file failures and
/// recovery hints go to `err`. Only a failure to write to those streams is
/// returned as `Err`.
pub fn run<O: Write, E: Write>(config: CliConfig, out: &mut O, err: &mut E) -> Result<i32> {
    if config.list_actions {
        write_actions(out)?;
        return Ok(0);
    }

    if let Err(e) = config.validate() {
        return report(err, None, &e);
    }

    let action = config.action()?;
    let inputs = config.inputs.clone();
    let output = config.output.clone();
    let to_stdout = config.stdout;
    let engine = ConversionEngine::new(LocalStorage::new(), config);

    if to_stdout {
        return match engine.preview(action, &inputs[0]) {
            Ok(converted) => {
                writeln!(out, "{}", converted)?;
                Ok(0)
            }
            Err(e) => report(err, Some(&inputs[0]), &e),
        };
    }

    if let Some(output) = output {
        return match engine.convert(action, &inputs[0], Some(&output)) {
            Ok(conversion) => {
                writeln!(out, "✅ {}", conversion.output.display())?;
                Ok(0)
            }
            Err(e) => report(err, Some(&inputs[0]), &e),
        };
    }

    let mut worst: Option<AppError> = None;
    for (input, result) in engine.convert_all(action, &inputs) {
        match result {
            Ok(conversion) => writeln!(out, "✅ {}", conversion.output.display())?,
            Err(e) => {
                tracing::debug!("{} failed (Severity: {:?})", input.display(), e.severity());
                writeln!(err, "❌ {}: {}", input.display(), e.user_friendly_message())?;
                if worst.as_ref().map_or(true, |w| e.severity() > w.severity()) {
                    worst = Some(e);
                }
            }
        }
    }

    match worst {
        Some(e) => {
            writeln!(err, "💡 {}", e.recovery_suggestion())?;
            Ok(e.exit_code())
        }
        None => Ok(0),
    }
}

fn report<E: Write>(err: &mut E, input: Option<&std::path::Path>, e: &AppError) -> Result<i32> {
    match input {
        Some(input) => writeln!(err, "❌ {}: {}", input.display(), e.user_friendly_message())?,
        None => writeln!(err, "❌ {}", e.user_friendly_message())?,
    }
    writeln!(err, "💡 {}", e.recovery_suggestion())?;
    Ok(e.exit_code())
}

fn write_actions<O: Write>(out: &mut O) -> Result<()> {
    for action in TransformAction::ALL {
        writeln!(
            out,
            "{:<12} {:<17} {} (input: {}; output: .{})",
            action.label(),
            action.id(),
            action.description(),
            action.allowed_input_extensions().join(", "),
            action.output_extension()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("data-transform").chain(args.iter().copied()))
            .unwrap()
    }

    fn run_cli(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(cli(args), &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn path_arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_list_actions_prints_every_action() {
        let (code, out, err) = run_cli(&["--list-actions"]);
        assert_eq!(code, 0);
        assert!(err.is_empty());
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("csvToJSON"));
        assert!(out.contains("jsonToCSV"));
        assert!(out.contains("formatJSONByLine"));
    }

    #[test]
    fn test_stdout_prints_converted_text_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("data.json");
        std::fs::write(&input, r#"{"b":1,"a":2}"#).unwrap();

        let (code, out, _) = run_cli(&["format-json", &path_arg(&input), "--stdout"]);

        assert_eq!(code, 0);
        assert_eq!(out, "{\n  \"a\": 2,\n  \"b\": 1\n}\n");
        assert!(!temp_dir.path().join("data_line_formatted.json").exists());
    }

    #[test]
    fn test_explicit_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("rows.json");
        let output = temp_dir.path().join("table.csv");
        std::fs::write(&input, r#"[{"x":1}]"#).unwrap();

        let (code, out, _) =
            run_cli(&["json-to-csv", &path_arg(&input), "-o", &path_arg(&output)]);

        assert_eq!(code, 0);
        assert!(out.contains("table.csv"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "x\n1");
    }

    #[test]
    fn test_invalid_input_exits_with_one() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("nested.json");
        std::fs::write(&input, r#"{"a":{"b":1}}"#).unwrap();

        let (code, out, err) = run_cli(&["format-json", &path_arg(&input), "--stdout"]);

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.contains("Field 'a'"));
    }

    #[test]
    fn test_config_error_exits_with_two() {
        let (code, _, err) = run_cli(&["json-to-csv", "a.json", "b.json", "-o", "out.csv"]);
        assert_eq!(code, 2);
        assert!(err.contains("--output"));
    }

    #[test]
    fn test_batch_exit_code_follows_worst_failure() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.json");
        let nested = temp_dir.path().join("nested.json");
        let missing = temp_dir.path().join("missing.json");
        std::fs::write(&good, r#"{"k":"v"}"#).unwrap();
        std::fs::write(&nested, r#"[{"k":[1]}]"#).unwrap();

        // 只有輸入錯誤：結束碼 1
        let (code, out, err) = run_cli(&["json-to-csv", &path_arg(&nested), &path_arg(&good)]);
        assert_eq!(code, 1);
        assert!(out.contains("good_converted.csv"));
        assert!(err.contains("nested.json"));

        // 加上讀不到的檔案（I/O 錯誤較嚴重）：結束碼 3
        let (code, _, err) = run_cli(&[
            "json-to-csv",
            &path_arg(&nested),
            &path_arg(&missing),
            "--overwrite",
        ]);
        assert_eq!(code, 3);
        assert!(err.contains("missing.json"));
    }

    #[test]
    fn test_load_file_config_merges_into_cli() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        std::fs::write(&config_path, "[output]\noverwrite = true\n").unwrap();

        let mut config = cli(&["format-json", "a.json", "--config", &path_arg(&config_path)]);
        load_file_config(&mut config).unwrap();

        assert!(config.overwrite);
    }
}
