// In crates/app-config/src/lib.rs

use std::path::Path;

use config::{Config, Environment, File, Map};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{
    AppSettings, ClassifierProvider, ClassifierSettings, NewsApiSettings, Settings, MAX_LOOKBACK_DAYS,
    MAX_PAGE_SIZE,
};

/// Environment variable holding the NewsAPI key.
pub const NEWSAPI_KEY_VAR: &str = "NEWSAPI_KEY";
/// Environment variable holding the optional Hugging Face token.
pub const HF_TOKEN_VAR: &str = "HF_API_TOKEN";

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Built-in defaults (every section is optional).
/// 2. An optional `config/base.toml` file.
/// 3. An optional environment-specific file (e.g., `config/development.toml`).
/// 4. Environment variables with the `APP` prefix (e.g., `APP_SCORING__ALPHA=0.5`).
/// 5. `NEWSAPI_KEY` and `HF_API_TOKEN`, which win over everything above.
///
/// The result is not validated; call [`Settings::validate`] once command-line
/// overrides have been applied.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment, None)
}

/// Same as [`load_settings`] but with an explicit config directory and,
/// optionally, an explicit set of environment variables instead of the
/// process environment.
pub fn load_settings_from(
    config_dir: &Path,
    environment: &str,
    env: Option<Map<String, String>>,
) -> Result<Settings> {
    let lookup = |key: &str| {
        let value = match &env {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    };

    let base = config_dir.join("base");
    let env_specific = config_dir.join(environment);

    let settings = Config::builder()
        .add_source(File::with_name(&base.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_specific.to_string_lossy()).required(false))
        // `APP_NEWSAPI__BASE_URL=...` sets `newsapi.base_url`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env.clone()),
        )
        .set_override_option("newsapi.api_key", lookup(NEWSAPI_KEY_VAR))?
        .set_override_option("classifier.api_key", lookup(HF_TOKEN_VAR))?
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    tracing::debug!(
        config_dir = %config_dir.display(),
        environment,
        provider = %settings.classifier.provider,
        "Configuration loaded."
    );

    Ok(settings)
}

impl Settings {
    /// Checks everything a run needs before any network call is made.
    pub fn validate(&self) -> Result<()> {
        // Scoring parameters first: a misconfigured rule is reported even
        // when the key is missing as well.
        scoring::Scorer::from_settings(&self.scoring)?;

        match self.newsapi.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(Error::MissingApiKey),
        }

        if self.newsapi.page_size == 0 || self.newsapi.page_size > MAX_PAGE_SIZE {
            return Err(Error::InvalidSetting {
                key: "newsapi.page_size",
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}, got {}", self.newsapi.page_size),
            });
        }

        if self.app.default_days == 0 || self.app.default_days > MAX_LOOKBACK_DAYS {
            return Err(Error::InvalidSetting {
                key: "app.default_days",
                reason: format!(
                    "the look-back window must be between 1 and {MAX_LOOKBACK_DAYS} days, got {}",
                    self.app.default_days
                ),
            });
        }

        if self.classifier.max_chars == 0 {
            return Err(Error::InvalidSetting {
                key: "classifier.max_chars",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
