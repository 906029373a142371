use anyhow::Context;
use clap::Parser;
use data_transform::app;
use data_transform::utils::logger;
use data_transform::CliConfig;

fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    if let Err(e) = app::load_file_config(&mut config) {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let code = app::run(config, &mut stdout.lock(), &mut stderr.lock())
        .context("failed to write command output")?;

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
