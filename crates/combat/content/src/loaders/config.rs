//! Combat tuning loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load combat tuning from a TOML file.
    ///
    /// Missing sections and fields keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat config TOML: {}", e))?;

        if !(config.bands.accuracy_cap.is_finite() && config.bands.accuracy_cap > 0.0) {
            anyhow::bail!(
                "bands.accuracy_cap must be positive, got {}",
                config.bands.accuracy_cap
            );
        }
        if !(0.0..=1.0).contains(&config.bands.transfer_rate) {
            anyhow::bail!(
                "bands.transfer_rate must be within [0, 1], got {}",
                config.bands.transfer_rate
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, CombatConfig::default());
    }

    #[test]
    fn partial_sections_override_selected_fields() {
        let config = ConfigLoader::parse(
            r#"
            [bands]
            transfer_rate = 0.25

            [rewards]
            loot_rolls = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.bands.transfer_rate, 0.25);
        assert_eq!(config.bands.accuracy_cap, 1.0);
        assert_eq!(config.rewards.loot_rolls, 4);
        assert_eq!(config.rewards.gold_base, 10);
    }

    #[test]
    fn rejects_out_of_range_transfer_rate() {
        let err = ConfigLoader::parse("[bands]\ntransfer_rate = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("transfer_rate"));
    }
}
