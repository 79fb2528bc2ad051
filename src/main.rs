use catalog_harvest::Harvest;
use clap::Parser;
use tokio_util::sync::CancellationToken;

mod args;
use args::{Args, convert_schema_policy};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting harvest for catalog: {}", args.catalog_url);

    println!("Note: harvesting requires a WebDriver server (e.g. ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    // Ctrl-C stops new pagination clicks and unstarted fetches; in-flight
    // fetches drain before the table is written.
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ::log::warn!("interrupt received, letting in-flight fetches drain");
            interrupt.cancel();
        }
    });

    let mut harvest = Harvest::new(&args.catalog_url)
        .with_max_concurrency(args.concurrency)
        .with_output(&args.output)
        .with_webdriver_url(&args.webdriver_url)
        .with_schema_policy(convert_schema_policy(args.schema_policy))
        .with_cancellation(cancel);
    if let Some(base) = &args.detail_base_url {
        harvest = harvest.with_detail_base_url(base);
    }

    let start_time = std::time::Instant::now();
    match harvest.run().await {
        Ok(summary) => {
            if summary.written == 0 {
                ::log::warn!("harvest completed but zero products were written");
            }
            ::log::info!(
                "Harvest complete - {} discovered, {} written, {} failed, {} skipped in {:.2} seconds",
                summary.discovered,
                summary.written,
                summary.failed,
                summary.skipped,
                start_time.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            ::log::error!("Harvest failed: {}", e);
            std::process::exit(1);
        }
    }
}
