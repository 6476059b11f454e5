//! Configuration structures deserialized from `ember.toml`.

use serde::{Deserialize, Serialize};

/// Top-level contents of `ember.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmberConfig {
    /// `[synth]` section.
    pub synth: SynthConfig,
    /// `[diagnostics]` section.
    pub diagnostics: DiagnosticsConfig,
}

/// Switches for expression synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    /// Replace `a & 0` / `a & 1` bits with direct connections.
    pub fold_constants: bool,
    /// Build a single reduction gate for comparisons against zero.
    pub zero_compare: bool,
    /// Drop unreferenced temporary operand buses after concatenation.
    pub reclaim_temporaries: bool,
    /// Prefix of generated wire names.
    pub wire_prefix: String,
    /// Prefix of generated device instance names.
    pub device_prefix: String,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            fold_constants: true,
            zero_compare: true,
            reclaim_temporaries: true,
            wire_prefix: "_s".to_string(),
            device_prefix: "_d".to_string(),
        }
    }
}

/// Rendering of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Use ANSI colors.
    pub color: bool,
}
