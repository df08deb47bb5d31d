use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Writes the rewritten playlist into `output_dir`, creating the directory
/// if needed and overwriting any previous run's output.
pub async fn publish(body: &str, output_dir: &Path, output_filename: &str) -> Result<()> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let path = output_dir.join(output_filename);
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("failed to write playlist to {}", path.display()))?;

    info!("Published playlist: path={} bytes={}", path.display(), body.len());
    Ok(())
}

/// Writes the static status page next to the playlist.
pub async fn write_index(output_dir: &Path, output_filename: &str, timestamp: &str) -> Result<()> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let index = format!(
        r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>udpxytv Playlist</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
            margin: 0 auto; max-width: 640px; padding: 40px 20px;
            background: #0d0d0d; color: #ffffff;
        }}
        h1 {{ font-size: 1.6rem; letter-spacing: -0.5px; }}
        p {{ color: #a0a0a0; }}
        a {{ color: #3b82f6; }}
    </style>
</head>
<body>
    <h1>udpxytv Playlist</h1>
    <p>Last updated: {}</p>
    <p><a href="{}">{}</a></p>
</body>
</html>
"#,
        escape_html(timestamp),
        escape_html(output_filename),
        escape_html(output_filename),
    );

    let path = output_dir.join("index.html");
    tokio::fs::write(&path, index)
        .await
        .with_context(|| format!("failed to write status page to {}", path.display()))?;

    Ok(())
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_creates_directory_and_writes_body() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("public");

        publish("#EXTM3U\n", &dir, "playlist.m3u").await.unwrap();

        let written = tokio::fs::read_to_string(dir.join("playlist.m3u"))
            .await
            .unwrap();
        assert_eq!(written, "#EXTM3U\n");
    }

    #[tokio::test]
    async fn test_publish_overwrites_previous_output() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();

        publish("old body\n", &dir, "playlist.m3u").await.unwrap();
        publish("new body\n", &dir, "playlist.m3u").await.unwrap();

        let written = tokio::fs::read_to_string(dir.join("playlist.m3u"))
            .await
            .unwrap();
        assert_eq!(written, "new body\n");
    }

    #[tokio::test]
    async fn test_index_links_playlist_and_escapes_html() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();

        write_index(&dir, "tv & <more>.m3u", "2025-01-02 03:04:05 UTC")
            .await
            .unwrap();

        let index = tokio::fs::read_to_string(dir.join("index.html"))
            .await
            .unwrap();
        assert!(index.contains("Last updated: 2025-01-02 03:04:05 UTC"));
        assert!(index.contains("href=\"tv &amp; &lt;more&gt;.m3u\""));
        assert!(!index.contains("<more>"));
    }
}
