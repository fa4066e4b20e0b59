use clap::Parser;
use std::process::ExitCode;
use top_anime_etl::core::etl::TIMESTAMP_FORMAT;
use top_anime_etl::core::ConfigProvider;
use top_anime_etl::utils::{logger, validation::Validate};
use top_anime_etl::{
    CliConfig, EtlEngine, EtlError, ExportOutcome, HttpPageFetcher, LocalStorage, RunSummary,
    TomlConfig, TopListPipeline,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting top-anime-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let preview = cli.preview;
    match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => {
                    let monitor = cli.monitor || config.monitoring_enabled();
                    run(config, monitor, preview).await
                }
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    report_startup_error(&e)
                }
            }
        }
        None => {
            let monitor = cli.monitor;
            run(cli, monitor, preview).await
        }
    }
}

async fn run<C>(config: C, monitor: bool, preview: usize) -> ExitCode
where
    C: ConfigProvider + Validate + 'static,
{
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return report_startup_error(&e);
    }

    let fetcher = match HttpPageFetcher::new(config.api_endpoint()) {
        Ok(fetcher) => fetcher,
        Err(e) => return report_startup_error(&e),
    };

    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = TopListPipeline::new(fetcher, storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor);

    let task = tokio::spawn(async move { engine.run().await });

    tokio::select! {
        joined = task => match joined {
            Ok(summary) => {
                print_summary(&summary, preview);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("❌ Export failed: {}", e);
                eprintln!("❌ Export failed: {}", e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted by operator; nothing was exported");
            println!("\nExport interrupted by user.");
            ExitCode::SUCCESS
        }
    }
}

fn report_startup_error(e: &EtlError) -> ExitCode {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    ExitCode::FAILURE
}

fn print_outcome(label: &str, outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Written { path, count } => {
            println!("✅ {}: saved {} entries to {}", label, count, path.display())
        }
        ExportOutcome::Skipped => println!("⚠️  {}: nothing to write (empty collection)", label),
        ExportOutcome::Failed { path, error } => {
            eprintln!("❌ {}: could not write {}: {}", label, path.display(), error)
        }
    }
}

fn print_summary(summary: &RunSummary, preview: usize) {
    print_outcome("JSON", &summary.report.json);
    print_outcome("CSV", &summary.report.csv);

    println!(
        "\nScraping completed at: {}",
        summary.finished_at.format(TIMESTAMP_FORMAT)
    );
    println!(
        "Total anime collected: {} ({} page request(s), {})",
        summary.total_collected(),
        summary.collection.pages_fetched,
        summary.collection.stop_reason
    );

    let lines = summary.preview(preview);
    if !lines.is_empty() {
        println!("\nSample data (first {} entries):", preview.min(summary.total_collected()));
        for line in lines {
            println!("{}", line);
        }
    }
}
