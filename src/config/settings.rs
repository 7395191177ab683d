//! Application settings.
//!
//! Everything that used to be a process-wide literal (database URI, session secret,
//! image hosting credentials, locale) lives in one [`AppConfig`] value. It is read
//! from `config.toml` (path overridable with `BANHANG_CONFIG`) when that file exists,
//! then individual keys are overridden from the environment, which `main` populates
//! from `.env` via `dotenvy`.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{fmt, path::Path};
use tracing::{debug, info, warn};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Full application configuration
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// Database connection string, e.g. `mysql://user:pw@localhost/banhang?charset=utf8mb4`
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Secret used by the web shell to sign sessions. Required.
    #[serde(default)]
    pub secret_key: String,
    /// Locale handed to the i18n layer
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Session key under which the shell keeps the shopping cart
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
    /// Credentials for the third-party image host
    #[serde(default)]
    pub image_hosting: ImageHostingConfig,
    /// Values used by the bootstrap seed
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Image hosting API credentials (cloud name, key, secret, optional proxy)
#[derive(Clone, Default, Deserialize)]
pub struct ImageHostingConfig {
    /// Account / cloud name
    #[serde(default)]
    pub cloud_name: String,
    /// Public API key
    #[serde(default)]
    pub api_key: String,
    /// API secret
    #[serde(default)]
    pub api_secret: String,
    /// Outbound HTTP proxy for upload requests
    #[serde(default)]
    pub api_proxy: Option<String>,
}

/// Admin account created by the bootstrap seed
#[derive(Clone, Deserialize)]
pub struct SeedConfig {
    /// Login name of the seeded administrator
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Plaintext password, hashed before it is stored
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Avatar URL of the seeded administrator
    #[serde(default = "default_admin_avatar")]
    pub admin_avatar: String,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_locale() -> String {
    "vi".to_string()
}

fn default_cart_key() -> String {
    "cart".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "123456".to_string()
}

fn default_admin_avatar() -> String {
    "https://res.cloudinary.com/dxxwcby8l/image/upload/v1647248722/r8sjly3st7estapvj19u.jpg"
        .to_string()
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            admin_avatar: default_admin_avatar(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            secret_key: String::new(),
            locale: default_locale(),
            cart_key: default_cart_key(),
            image_hosting: ImageHostingConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })
    }

    /// Overrides individual keys with values produced by `lookup`.
    ///
    /// `lookup` maps a variable name to its value; [`Self::apply_env_overrides`]
    /// passes the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut String); 8] = [
            ("DATABASE_URL", &mut self.database_url),
            ("SECRET_KEY", &mut self.secret_key),
            ("APP_LOCALE", &mut self.locale),
            ("CART_KEY", &mut self.cart_key),
            ("CLOUDINARY_CLOUD_NAME", &mut self.image_hosting.cloud_name),
            ("CLOUDINARY_API_KEY", &mut self.image_hosting.api_key),
            ("CLOUDINARY_API_SECRET", &mut self.image_hosting.api_secret),
            ("ADMIN_PASSWORD", &mut self.seed.admin_password),
        ];
        for (name, slot) in targets {
            if let Some(value) = lookup(name) {
                debug!("Overriding {} from environment", name);
                *slot = value;
            }
        }
        if let Some(proxy) = lookup("CLOUDINARY_API_PROXY") {
            self.image_hosting.api_proxy = Some(proxy);
        }
    }

    /// Overrides individual keys from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Checks that the settings required at startup are present.
    pub fn validate(&self) -> Result<()> {
        if self.secret_key.trim().is_empty() {
            return Err(Error::Config {
                message: "secret_key is not set (config.toml or SECRET_KEY)".to_string(),
            });
        }
        if self.database_url.trim().is_empty() {
            return Err(Error::Config {
                message: "database_url is empty".to_string(),
            });
        }
        if self.locale.trim().is_empty() {
            return Err(Error::Config {
                message: "locale is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Locale selector for the i18n layer. Always the configured default.
    #[must_use]
    pub fn select_locale(&self) -> &str {
        &self.locale
    }
}

/// Loads a configuration file from `path` without applying environment overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    AppConfig::from_toml_str(&contents)
}

/// Builds the startup configuration: file (if present), then environment, then validation.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("BANHANG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if Path::new(&path).exists() {
        let config = load_config(&path)?;
        info!("Loaded configuration from {}", path);
        config
    } else {
        warn!("No configuration file at {}; using defaults and environment", path);
        AppConfig::default()
    };

    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("locale", &self.locale)
            .field("cart_key", &self.cart_key)
            .field("image_hosting", &self.image_hosting)
            .field("seed", &self.seed)
            .finish()
    }
}

impl fmt::Debug for ImageHostingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHostingConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("api_proxy", &self.api_proxy)
            .finish()
    }
}

impl fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedConfig")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .field("admin_avatar", &self.admin_avatar)
            .finish()
    }
}
