use pogo_core::ConfigError;

/// Errors raised while loading controller configuration
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}
