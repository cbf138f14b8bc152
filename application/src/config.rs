//! [`Config`]-related definitions.

use std::{sync::Arc, time};

use common::pagination::{Size, SortKey};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use service::{domain::user::session, infra::http};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Remote API configuration.
    #[serde(default)]
    pub api: Api,

    /// Feed configuration.
    #[serde(default)]
    pub feed: Feed,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Remote API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the remote API.
    #[default("http://localhost:8081".to_owned())]
    pub base_url: String,

    /// Access token of the signed-in user, if any.
    #[serde(deserialize_with = "secret")]
    pub token: Option<SecretString>,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl Api {
    /// Returns the [`session::Token`] of the signed-in user, if any.
    #[must_use]
    pub fn token(&self) -> Option<Arc<session::Token>> {
        self.token
            .clone()
            .map(|t| Arc::new(session::Token::from(t)))
    }
}

impl From<Api> for http::Config {
    fn from(value: Api) -> Self {
        let token = value.token();
        let Api {
            base_url,
            token: _,
            timeout,
        } = value;

        Self {
            base_url,
            token,
            timeout,
        }
    }
}

/// Deserializes an optional [`SecretString`].
fn secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.is_empty())
        .map(SecretString::from))
}

/// Feed configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Feed {
    /// Number of items requested per page.
    #[default(9)]
    pub page_size: u32,

    /// Key to sort the requested items by.
    #[default("date".to_owned())]
    pub sort: String,

    /// Delay before loading the next page once the scroll reaches the bottom.
    #[default(time::Duration::from_secs(1))]
    #[serde(with = "humantime_serde")]
    pub scroll_debounce: time::Duration,
}

impl TryFrom<Feed> for service::Config {
    type Error = ConfigError;

    fn try_from(value: Feed) -> Result<Self, Self::Error> {
        let Feed {
            page_size,
            sort,
            scroll_debounce,
        } = value;

        Ok(Self {
            page_size: Size::new(page_size).ok_or_else(|| {
                ConfigError::Message("`feed.page_size` must be positive".into())
            })?,
            sort: SortKey::from(sort),
            scroll_debounce,
        })
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
