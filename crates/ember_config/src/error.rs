//! Errors raised while reading `ember.toml`.

/// A configuration file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML is malformed or has unknown keys.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is well-formed but unusable.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// Dotted key path, e.g. `synth.wire_prefix`.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}
