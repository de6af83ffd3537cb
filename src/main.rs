use clap::Parser;
use kickrocks::config::LogFormat;
use kickrocks::utils::{logger, validation::Validate};
use kickrocks::{CliConfig, KickrocksError, RotationEngine};

fn main() {
    let cli = CliConfig::parse();

    let file_config = match cli.load_config_file() {
        Ok(file_config) => file_config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let verbose = cli.is_verbose(file_config.as_ref());
    match file_config.as_ref().map(|f| f.log_format()).unwrap_or_default() {
        LogFormat::Compact => logger::init_cli_logger(verbose),
        LogFormat::Json => logger::init_json_logger(verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli, file_config) {
        tracing::error!("❌ Rotation aborted: {:#}", e);
        match e.downcast_ref::<KickrocksError>() {
            Some(err) => {
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());
            }
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: &CliConfig, file_config: Option<kickrocks::TomlConfig>) -> anyhow::Result<()> {
    if let Some(file_config) = &file_config {
        file_config.validate()?;
    }

    let settings = cli.resolve(file_config.as_ref())?;
    settings.validate()?;

    let engine = RotationEngine::new(settings);
    let report = engine.run()?;

    if report.total_failed() > 0 {
        tracing::warn!(
            "{} entries could not be moved; see the warnings above",
            report.total_failed()
        );
    }
    tracing::info!("✅ Rotation finished, {} entries moved", report.total_moved());

    if cli.json {
        println!("{}", report.to_json()?);
    }

    Ok(())
}
