//! Configuration loading and representation.

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use giftshop_access::AccessGate;
use giftshop_cart::DiscountPolicy;
use giftshop_catalog::{CurationConfig, storefront_curation};
use giftshop_observability::LogFormat;

pub const ENV_STATE_DIR: &str = "GIFTSHOP_STATE_DIR";
pub const ENV_ACCESS_KEY: &str = "GIFTSHOP_ACCESS_KEY";
pub const ENV_DISCOUNT_CODE: &str = "GIFTSHOP_DISCOUNT_CODE";
pub const ENV_DISCOUNT_PERCENT: &str = "GIFTSHOP_DISCOUNT_PERCENT";
pub const ENV_FEATURED_EXCLUDE: &str = "GIFTSHOP_FEATURED_EXCLUDE";
pub const ENV_SPECIAL_EXCLUDE: &str = "GIFTSHOP_SPECIAL_EXCLUDE";
pub const ENV_LOG_FORMAT: &str = "GIFTSHOP_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

impl ConfigError {
    fn invalid(name: &str, reason: impl ToString) -> Self {
        Self::InvalidEnvVar(name.to_string(), reason.to_string())
    }
}

/// Storefront configuration. Every field has a default.
#[derive(Debug)]
pub struct StorefrontConfig {
    /// `None` means the platform data directory.
    pub state_dir: Option<PathBuf>,
    pub access_key: SecretString,
    pub discount: DiscountPolicy,
    pub curation: CurationConfig,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            state_dir: None,
            access_key: SecretString::from(AccessGate::DEFAULT_KEY.to_string()),
            discount: DiscountPolicy::default(),
            curation: storefront_curation(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset, except for the exclusion lists where an
    /// empty value means "exclude nothing".
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let state_dir = non_empty(ENV_STATE_DIR).map(PathBuf::from);

        let access_key = non_empty(ENV_ACCESS_KEY)
            .map(SecretString::from)
            .unwrap_or(defaults.access_key);

        let discount = match (non_empty(ENV_DISCOUNT_CODE), non_empty(ENV_DISCOUNT_PERCENT)) {
            (None, None) => defaults.discount,
            (code, percent) => {
                let percent = match percent {
                    Some(raw) => raw
                        .trim()
                        .parse::<u32>()
                        .map_err(|e| ConfigError::invalid(ENV_DISCOUNT_PERCENT, e))?,
                    None => DiscountPolicy::DEFAULT_PERCENT,
                };
                let code = code.unwrap_or_else(|| DiscountPolicy::DEFAULT_CODE.to_string());
                DiscountPolicy::new(code, percent)
                    .map_err(|e| ConfigError::invalid(ENV_DISCOUNT_PERCENT, e))?
            }
        };

        let mut curation = defaults.curation;
        if let Some(raw) = lookup(ENV_FEATURED_EXCLUDE) {
            curation.featured_exclude_slugs = split_list(&raw);
        }
        if let Some(raw) = lookup(ENV_SPECIAL_EXCLUDE) {
            curation.special_exclude_slugs = split_list(&raw);
        }

        let log_format = match non_empty(ENV_LOG_FORMAT) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(ENV_LOG_FORMAT, e))?,
            None => defaults.log_format,
        };

        Ok(Self {
            state_dir,
            access_key,
            discount,
            curation,
            log_format,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
