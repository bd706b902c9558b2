use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GroceryConfig {
    /// Partner ordering API settings
    #[serde(default)]
    pub partner: PartnerConfig,
    /// Local export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Configuration for the grocery partner integration
#[derive(Debug, Deserialize, Clone)]
pub struct PartnerConfig {
    /// API key for authentication (can also be set via INSTACART_API_KEY)
    pub api_key: Option<String>,
    /// Base URL of the partner API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Link shown on the partner landing page to return to the app
    #[serde(default = "default_linkback_url")]
    pub linkback_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for PartnerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            linkback_url: default_linkback_url(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for local exports
#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Title used when the caller does not give one
    #[serde(default = "default_title")]
    pub default_title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://connect.instacart.com".to_string()
}

fn default_linkback_url() -> String {
    "https://mealplan.app/grocery-list".to_string()
}

fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_title() -> String {
    "Shopping List".to_string()
}

impl GroceryConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEALPLAN__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEALPLAN__PARTNER__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`GroceryConfig::load`] for precedence.
pub fn load_config() -> Result<GroceryConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: MEALPLAN__PARTNER__API_KEY
        .add_source(
            Environment::with_prefix("MEALPLAN")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
