use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Acquires the raw source playlist: over HTTP when a URL is configured,
/// otherwise from the local fallback file. Either path failing is fatal to
/// the run; no output is written on failure.
pub async fn fetch_playlist(source_url: Option<&str>, source_file: &Path) -> Result<String> {
    if let Some(url) = source_url {
        info!("Fetching source playlist from {}...", url);
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        let resp = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to fetch source playlist from {url}"))?
            .error_for_status()
            .with_context(|| format!("source playlist fetch from {url} was rejected"))?;
        return resp
            .text()
            .await
            .with_context(|| format!("failed to read source playlist body from {url}"));
    }

    info!("No source URL configured, reading {}", source_file.display());
    let bytes = tokio::fs::read(source_file).await.with_context(|| {
        format!(
            "no source URL configured and fallback file {} could not be read",
            source_file.display()
        )
    })?;

    // Provider exports occasionally carry stray non-UTF-8 bytes; keep the
    // lines we can decode rather than failing the run.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_fallback_file_when_no_url_configured() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("source.m3u");
        tokio::fs::write(&path, "#EXTM3U\nudp://@239.1.1.1:1234\n")
            .await
            .unwrap();

        let raw = fetch_playlist(None, &path).await.unwrap();
        assert_eq!(raw, "#EXTM3U\nudp://@239.1.1.1:1234\n");
    }

    #[tokio::test]
    async fn test_missing_fallback_file_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent.m3u");

        let err = fetch_playlist(None, &path).await.unwrap_err();
        assert!(err.to_string().contains("could not be read"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_in_fallback_is_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("source.m3u");
        tokio::fs::write(&path, b"#EXTM3U\nudp://@239.1.1.1:1234 \xff\n")
            .await
            .unwrap();

        let raw = fetch_playlist(None, &path).await.unwrap();
        assert!(raw.starts_with("#EXTM3U\n"));
        assert!(raw.contains('\u{FFFD}'));
    }
}
