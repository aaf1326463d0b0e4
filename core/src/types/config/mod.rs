mod app;
mod core;

pub use app::{AppConfig, AppConfigError, BridgeConfig, ViewsConfig};
pub use self::core::Config;
