//! # UI Error Types
//!
//! Errors for the parts of the presentation layer that touch the outside:
//! the configuration file and scripted event input.
//!
//! Nothing here is shown to the shopper. Page behaviour degrades silently;
//! these errors only surface while loading settings or scripts.

use thiserror::Error;

/// Presentation-layer errors.
#[derive(Debug, Error)]
pub enum UiError {
    /// Config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Config file is not valid TOML for [`UiConfig`](crate::config::UiConfig).
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but holds values the page cannot use.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An event script could not be decoded.
    #[error("Invalid event script: {0}")]
    Script(#[from] serde_json::Error),
}

/// Convenience type alias for Results with UiError.
pub type UiResult<T> = Result<T, UiError>;
