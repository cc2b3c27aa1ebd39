//! Cascade game configuration
//!
//! Four read-only tables drive the game: regular symbol weights, the per-cell
//! bonus probability, the pay table and the scatter award table. Files may be
//! YAML or JSON; the legacy `cascade_*` key names are accepted as aliases.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::paytable::PayTable;
use crate::symbols::Symbol;

/// Scatters needed before the award table is consulted
pub const MIN_SCATTERS_FOR_AWARD: usize = 3;

/// Game tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Relative draw weight per regular symbol index (0..=6)
    #[serde(alias = "cascade_symbol_weights")]
    pub symbol_weights: BTreeMap<u8, u32>,

    /// Chance that any single cell is drawn as the bonus symbol
    #[serde(alias = "cascade_bonus_per_column")]
    pub bonus_probability: f64,

    /// Base pay per cell for each regular symbol
    #[serde(alias = "cascade_pay_table")]
    pub pay_table: PayTable,

    /// Scatter count → free spins awarded
    #[serde(alias = "cascade_bonus_awards")]
    pub bonus_awards: BTreeMap<u32, u32>,
}

impl CascadeConfig {
    /// Built-in tables
    pub fn standard() -> Self {
        Self {
            symbol_weights: BTreeMap::from([
                (0, 30),
                (1, 26),
                (2, 22),
                (3, 18),
                (4, 14),
                (5, 10),
                (6, 6),
            ]),
            bonus_probability: 0.025,
            pay_table: PayTable::standard(),
            bonus_awards: BTreeMap::from([(3, 8), (4, 10), (5, 12), (6, 15), (7, 20)]),
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        log::info!("Loaded cascade config from {}", path.display());
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        serde_yml::to_string(self).map_err(|e| ConfigError::Yaml(e.to_string()))
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Reject tables the engine cannot draw from
    ///
    /// Pay or award entries that can never be reached only log a warning.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(&bad) = self
            .symbol_weights
            .keys()
            .find(|&&k| Symbol::regular(k).is_none())
        {
            return Err(ConfigError::Invalid(format!(
                "symbol weight key {bad} is not a regular symbol (0..=6)"
            )));
        }
        if !(0.0..=1.0).contains(&self.bonus_probability) {
            return Err(ConfigError::Invalid(format!(
                "bonus probability {} outside [0, 1]",
                self.bonus_probability
            )));
        }

        // unreachable entries are configuration gaps: kept, never paid
        for &key in self.pay_table.0.keys() {
            if Symbol::regular(key).is_none() {
                log::warn!("Pay table key {key} is not a regular symbol (0..=6); ignored");
            }
        }
        for &count in self.bonus_awards.keys() {
            if (count as usize) < MIN_SCATTERS_FOR_AWARD {
                log::warn!(
                    "Bonus award for {count} scatters can never trigger (minimum {MIN_SCATTERS_FOR_AWARD}); ignored"
                );
            }
        }
        if self.total_weight() == 0 {
            log::warn!("All symbol weights are zero; every regular draw will be symbol 0");
        }
        Ok(())
    }

    /// Sum of regular symbol weights
    pub fn total_weight(&self) -> u64 {
        self.symbol_weights.values().map(|&w| w as u64).sum()
    }

    /// Free spins awarded for a scatter count (0 below the trigger or when absent)
    pub fn awarded_spins(&self, scatter_count: usize) -> u32 {
        if scatter_count < MIN_SCATTERS_FOR_AWARD {
            return 0;
        }
        u32::try_from(scatter_count)
            .ok()
            .and_then(|count| self.bonus_awards.get(&count).copied())
            .unwrap_or(0)
    }
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_valid() {
        assert!(CascadeConfig::standard().validate().is_ok());
    }

    #[test]
    fn test_parse_legacy_yaml_keys() {
        let yaml = r#"
cascade_symbol_weights:
  0: 10
  1: 5
cascade_bonus_per_column: 0.05
cascade_bonus_awards:
  3: 10
  4: 15
cascade_pay_table:
  0: 1
  1: 2
"#;
        let config = CascadeConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.symbol_weights.get(&1), Some(&5));
        assert_eq!(config.bonus_probability, 0.05);
        assert_eq!(config.awarded_spins(4), 15);
        assert_eq!(config.pay_table.base_pay(Symbol::regular(1).unwrap()), 2);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CascadeConfig::standard();
        let json = config.to_json_string().unwrap();
        assert_eq!(CascadeConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        let mut config = CascadeConfig::standard();
        config.symbol_weights.insert(7, 3);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CascadeConfig::standard();
        config.bonus_probability = 1.5;
        assert!(config.validate().is_err());

        let mut config = CascadeConfig::standard();
        config.bonus_probability = f64::NAN;
        assert!(config.validate().is_err());

    }

    #[test]
    fn test_unreachable_entries_still_load() {
        let yaml = r#"
cascade_symbol_weights:
  0: 10
cascade_bonus_per_column: 0.01
cascade_bonus_awards:
  2: 3
  3: 10
cascade_pay_table:
  0: 1
  9: 50
"#;
        let config = CascadeConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.awarded_spins(2), 0);
        assert_eq!(config.awarded_spins(3), 10);
        assert_eq!(config.pay_table.base_pay(Symbol::BONUS), 0);
        assert_eq!(config.pay_table.base_pay(Symbol::regular(0).unwrap()), 1);
    }

    #[test]
    fn test_award_gaps() {
        let config = CascadeConfig::standard();
        assert_eq!(config.awarded_spins(2), 0);
        assert_eq!(config.awarded_spins(3), 8);
        assert_eq!(config.awarded_spins(40), 0);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("game.yaml");
        std::fs::write(&yaml_path, CascadeConfig::standard().to_yaml_string().unwrap()).unwrap();
        assert_eq!(CascadeConfig::load(&yaml_path).unwrap(), CascadeConfig::standard());

        let txt_path = dir.path().join("game.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(matches!(
            CascadeConfig::load(&txt_path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
