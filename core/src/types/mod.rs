pub(crate) mod address;
pub use address::{Address, AddressError, DEFAULT_SCHEME_PREFIX};

pub(crate) mod config;
pub use config::{AppConfig, AppConfigError, BridgeConfig, Config, ViewsConfig};

pub(crate) mod record;
pub use record::{AddressRecord, RecordId, epoch_millis};

pub(crate) mod theme;
pub use theme::{ThemeMode, ThemeState, UnknownThemeMode};
