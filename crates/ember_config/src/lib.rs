//! Loading of `ember.toml` synthesis settings.
//!
//! The file is optional; every key has a default. [`EmberConfig`] groups the
//! `[synth]` switches that enable the operator-local shortcuts and name
//! prefixes, and the `[diagnostics]` rendering options.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::{DiagnosticsConfig, EmberConfig, SynthConfig};
