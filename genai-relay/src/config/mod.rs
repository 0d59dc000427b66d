use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Gemini REST endpoint the relay talks to unless overridden.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Request body limit (20MB) applied to uploads and JSON bodies alike.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for every route (e.g., gemini-2.5-flash)
    pub text_model: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_body_bytes: usize,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        // Loads .env and the APP__ prefixed settings.
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let max_body_bytes = get_env(
            "MAX_UPLOAD_BYTES",
            Some(&DEFAULT_MAX_UPLOAD_BYTES.to_string()),
            is_prod,
        )?
        .parse::<usize>()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("MAX_UPLOAD_BYTES is not a number: {}", e))
        })?;

        Ok(RelayConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: Secret::new(get_env("GEMINI_API_KEY", None, is_prod)?),
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_API_BASE), is_prod)?,
            },
            models: ModelConfig {
                text_model: get_env("GEMINI_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
            },
            uploads: UploadConfig { max_body_bytes },
        })
    }

    /// Configuration for tests and embedding: everything defaulted except the key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        RelayConfig {
            common: core_config::Config::default(),
            google: GoogleConfig {
                api_key: Secret::new(api_key.into()),
                api_base: DEFAULT_API_BASE.to_string(),
            },
            models: ModelConfig {
                text_model: DEFAULT_TEXT_MODEL.to_string(),
            },
            uploads: UploadConfig {
                max_body_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
