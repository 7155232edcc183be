use crewdesk_api::{BASE_URL_ENV, DEFAULT_BASE_URL};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Console configuration, read from a TOML file. Every field has a default,
/// so a missing file is not an error.
#[derive(Debug, Deserialize)]
pub struct CrewdeskConfig {
    /// API base URL. The `CREWDESK_API_URL` environment variable wins over
    /// this when set.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Directory holding the persisted session entries.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for CrewdeskConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".crewdesk"))
        .unwrap_or_else(|| PathBuf::from(".crewdesk"))
}

impl CrewdeskConfig {
    /// Loads the config file; a missing file yields defaults.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => toml::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("failed to parse config {}: {e}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(anyhow::anyhow!(
                "failed to read config {}: {e}",
                path.display()
            )),
        }
    }

    /// The effective base URL: environment override first, then the config
    /// value, which itself defaults to the production endpoint.
    pub fn resolved_base_url(&self) -> String {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.api_base_url.clone())
    }
}
