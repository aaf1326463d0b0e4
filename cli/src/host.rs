//! Process wiring: data directory, configuration and the store worker.

use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;
use waymark_bridge::{AddressClient, NavigationError, Navigator, worker};
use waymark_core::core::AddressStore;
use waymark_core::core::backing::RedbBacking;
use waymark_core::theme::ManualAppearance;
use waymark_core::types::{AppConfig, Config};

const DATA_DIR_ENV: &str = "WAYMARK_DATA_DIR";
const SYSTEM_DARK_ENV: &str = "WAYMARK_SYSTEM_DARK";

/// Inputs the host takes from its environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_path: PathBuf,
    /// Stand-in for the OS dark-mode preference.
    pub system_dark: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let base_path = match std::env::var(DATA_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_dir()
                .context("no data directory on this platform; set WAYMARK_DATA_DIR")?
                .join("waymark"),
        };
        let system_dark = std::env::var(SYSTEM_DARK_ENV).is_ok_and(|v| parse_flag(&v));

        Ok(Self {
            base_path,
            system_dark,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Opened storage plus the running store worker.
pub struct Host {
    pub config: AppConfig,
    pub backing: Arc<RedbBacking>,
    pub client: AddressClient,
    pub appearance: ManualAppearance,
    worker: JoinHandle<()>,
}

impl Host {
    pub fn open(settings: &Settings) -> anyhow::Result<Self> {
        let paths = Config {
            base_path: settings.base_path.clone(),
        };

        let config = AppConfig::load(&paths.config_path())
            .with_context(|| format!("reading {}", paths.config_path().display()))?;
        for problem in config.validate() {
            tracing::warn!("[Config] {problem}; using default");
        }
        let config = config.with_defaults_for_invalid();

        let backing = Arc::new(
            RedbBacking::open(&paths)
                .with_context(|| format!("opening {}", paths.db_path().display()))?,
        );

        let (requests, worker) = worker::start(
            AddressStore::new(backing.clone()),
            config.bridge.channel_capacity,
        );
        let client = AddressClient::new(requests, config.bridge.request_timeout());

        Ok(Self {
            config,
            backing,
            client,
            appearance: ManualAppearance::new(settings.system_dark),
            worker,
        })
    }

    /// Stops the worker after it has answered every queued request.
    pub async fn close(self) -> anyhow::Result<()> {
        self.client.shutdown().await?;
        tokio::task::spawn_blocking(move || self.worker.join())
            .await?
            .map_err(|_| anyhow::anyhow!("store worker panicked"))?;
        Ok(())
    }
}

/// Navigator for a terminal host: there is no page to render, so the
/// request is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    async fn navigate_to_address(&self, url: &str) -> Result<(), NavigationError> {
        tracing::info!("[Navigator] Opening {url}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values() {
        for on in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(on), "{on}");
        }
        for off in ["0", "false", "", "dark"] {
            assert!(!parse_flag(off), "{off}");
        }
    }

    #[test]
    fn open_creates_database_in_base_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let settings = Settings {
            base_path: temp.path().join("nested"),
            system_dark: false,
        };

        let host = Host::open(&settings).unwrap();

        assert!(temp.path().join("nested").join("waymark.redb").exists());
        assert_eq!(host.config, AppConfig::default());
    }
}
