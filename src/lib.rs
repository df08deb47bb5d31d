pub mod playlist;
pub mod publish;
pub mod settings;
pub mod source;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::settings::Settings;

/// Runs one fetch -> transform -> publish pass. Nothing is written unless
/// the source playlist was acquired successfully.
pub async fn run(settings: &Settings) -> Result<()> {
    let raw = source::fetch_playlist(settings.source_url.as_deref(), &settings.source_file).await?;
    info!("Loaded source playlist: {} bytes", raw.len());

    let body = playlist::transform(&raw, &settings.udpxy_host, settings.udpxy_port);

    publish::publish(&body, &settings.output_dir, &settings.output_filename).await?;

    let updated_at = Utc::now().format("%Y-%m-%d %H:%M:%S %Z").to_string();
    publish::write_index(&settings.output_dir, &settings.output_filename, &updated_at).await?;

    info!(
        "Wrote {} and index.html to {}",
        settings.output_filename,
        settings.output_dir.display()
    );
    Ok(())
}
