use std::path::PathBuf;

use clap::Parser;
use config::Config;
use tracing::info;
use udpxytv::settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Directory the playlist and status page are written to (overrides config)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Optional config file, overridden by environment variables
    // (SOURCE_URL, UDPXY_HOST, UDPXY_PORT, OUTPUT_DIR, OUTPUT_FILENAME, ...).
    let settings = Config::builder()
        .add_source(config::File::with_name(&args.config).required(false))
        .add_source(config::Environment::default())
        .build()?;
    let mut settings: Settings = settings.try_deserialize()?;

    if let Some(output_dir) = args.output_dir {
        settings.output_dir = output_dir;
    }

    info!("Configuration loaded from {}: {:?}", args.config, settings);

    udpxytv::run(&settings).await?;
    Ok(())
}
