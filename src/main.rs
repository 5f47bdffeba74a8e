//! Main entry point for the yoat CLI

use clap::Parser;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yoat::cli::{Args, OutputFormatter};
use yoat::core::AudioResolver;
use yoat::platform::PlatformClient;
use yoat::utils::url::normalize_video_id;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    init_logging(args.verbosity_level().log_filter())?;
    debug!("Starting yoat with args: {:?}", args);

    let formatter = OutputFormatter::new(args.verbosity_level()).with_json(args.json);

    let client = PlatformClient::with_config(args.client_config())?;
    let resolver = Arc::new(AudioResolver::new(client));

    if args.serve {
        info!("Starting resolver service on {}", args.listen);
        yoat::server::serve(args.listen, resolver).await?;
        return Ok(());
    }

    let Some(input) = args.id.as_deref() else {
        formatter.print_help();
        return Ok(());
    };

    let video_id = normalize_video_id(input)?;
    match resolver.resolve(&video_id).await {
        Ok(resolution) => formatter.print_resolution(&video_id, &resolution)?,
        Err(e) => {
            formatter.error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Initialize logging system
///
/// `RUST_LOG` takes precedence over the level picked by the CLI flags.
fn init_logging(default_filter: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();

    Ok(())
}
