// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional TOML-backed engine configuration, behind the `config` feature.

use std::path::Path;

use anyhow::{Context, Result};
use schematic_geometry::Color;
use serde::Deserialize;

/// Host-tunable engine settings, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fill color for pixels no section ever writes.
    #[serde(with = "color_as_rgb_array")]
    pub background_color: Color,
    /// Whether the `diagnostics`-feature logging calls should actually run.
    pub diagnostics_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            background_color: schematic_geometry::BACKGROUND_COLOR,
            diagnostics_enabled: false,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a
    /// valid `EngineConfig`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading config file {}", path.as_ref().display()))?;
        toml::from_str(&text).context("parsing engine config")
    }
}

mod color_as_rgb_array {
    use schematic_geometry::Color;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let [r, g, b] = <[u8; 3]>::deserialize(deserializer)?;
        Ok(Color::rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_engine_background() {
        let config = EngineConfig::default();
        assert_eq!(config.background_color, schematic_geometry::BACKGROUND_COLOR);
        assert!(!config.diagnostics_enabled);
    }

    #[test]
    fn parses_a_minimal_toml_document() {
        let config: EngineConfig = toml::from_str(
            r#"
            background_color = [10, 20, 30]
            diagnostics_enabled = true
            "#,
        )
        .unwrap();
        assert_eq!(config.background_color, Color::rgb(10, 20, 30));
        assert!(config.diagnostics_enabled);
    }
}
