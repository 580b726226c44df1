//! Configuration management for the library page controllers

use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::UiResult;

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Origin the `/library/rest/...` paths are resolved against
    pub base_url: String,
}

/// Names of the `<meta>` tags carrying the CSRF token pair
#[derive(Debug, Deserialize, Clone)]
pub struct PageConfig {
    pub csrf_meta: String,
    pub csrf_header_meta: String,
}

/// Copy shown by the borrow controller
#[derive(Debug, Deserialize, Clone)]
pub struct BorrowMessages {
    pub success_message: String,
    pub conflict_message: String,
    pub unknown_error_message: String,
    pub network_error_message: String,
    pub unavailable_label: String,
    pub borrowed_badge_label: String,
}

/// Copy shown by the user-creation controller.
///
/// All four messages are required; there is no fallback text.
#[derive(Debug, Deserialize, Clone)]
pub struct UserCreationMessages {
    pub success_message: String,
    pub conflict_message: String,
    pub unknown_error_message: String,
    pub network_error_message: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub modal_close_delay_ms: u64,
}

impl UiConfig {
    pub fn modal_close_delay(&self) -> Duration {
        Duration::from_millis(self.modal_close_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub borrow: BorrowMessages,
    pub user_creation: UserCreationMessages,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Configuration with every optional section at its default
    pub fn new(user_creation: UserCreationMessages) -> Self {
        Self {
            backend: BackendConfig::default(),
            page: PageConfig::default(),
            borrow: BorrowMessages::default(),
            user_creation,
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from files and environment variables
    pub fn load() -> UiResult<Self> {
        dotenvy::dotenv().ok();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables (with prefix LIBRARY_UI), e.g. LIBRARY_UI_UI__MODAL_CLOSE_DELAY_MS
            .add_source(
                Environment::with_prefix("LIBRARY_UI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("backend.base_url", env::var("LIBRARY_BACKEND_URL").ok())?
            .build()?;

        Self::from_config(config)
    }

    /// Deserialize an already layered configuration.
    ///
    /// Fails when `[user_creation]` or one of its messages is missing.
    pub fn from_config(config: Config) -> UiResult<Self> {
        Ok(config.try_deserialize()?)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            csrf_meta: "_csrf".to_string(),
            csrf_header_meta: "_csrf_header".to_string(),
        }
    }
}

impl Default for BorrowMessages {
    fn default() -> Self {
        Self {
            success_message: "Buch wurde erfolgreich ausgeliehen.".to_string(),
            conflict_message: "Dieses Buch ist bereits ausgeliehen.".to_string(),
            unknown_error_message: "Ein unbekannter Fehler ist aufgetreten.".to_string(),
            network_error_message: "Fehler beim Verbinden mit dem Server.".to_string(),
            unavailable_label: "Nicht verfügbar".to_string(),
            borrowed_badge_label: "Ausgeliehen".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            modal_close_delay_ms: 800,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
