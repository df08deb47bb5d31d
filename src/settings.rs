use std::path::PathBuf;

use serde::de::Deserializer;
use serde::Deserialize;

/// Runtime configuration, built once at startup and passed into the
/// pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Upstream playlist address. When unset the local fallback file is used.
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default = "default_source_file")]
    pub source_file: PathBuf,
    /// Host of the udpxy relay substituted into rewritten entry URLs.
    #[serde(default = "default_udpxy_host")]
    pub udpxy_host: String,
    #[serde(
        default = "default_udpxy_port",
        deserialize_with = "deserialize_port_or_default"
    )]
    pub udpxy_port: u16,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
}

fn default_source_file() -> PathBuf {
    PathBuf::from("source.m3u")
}

fn default_udpxy_host() -> String {
    "192.168.50.1".to_string()
}

fn default_udpxy_port() -> u16 {
    8889
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_output_filename() -> String {
    "playlist.m3u".to_string()
}

/// Environment values arrive as strings; a value that doesn't parse as a
/// port falls back to the default instead of aborting the run.
fn deserialize_port_or_default<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    Ok(match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => port,
        PortValue::Text(raw) => raw.trim().parse().unwrap_or_else(|_| default_udpxy_port()),
    })
}
