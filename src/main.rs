use clap::Parser;
use listing_notifier::utils::logger;
use listing_notifier::CliConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    tracing::info!(
        "Watching {} (snapshot {})",
        settings.search_url,
        settings.snapshot_path().display()
    );

    match listing_notifier::run_once(&settings).await {
        Ok(report) => {
            tracing::info!(
                "Run finished: {} fetched, {} new or cheaper, notified: {}",
                report.fetched,
                report.changed,
                report.notified
            );
        }
        Err(e) => {
            tracing::error!("Run failed: {} (severity: {:?})", e, e.severity());
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
