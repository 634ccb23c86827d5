// src/config.rs

//! Simulator configuration.

use crate::core::{
    DEFAULT_MAX_QUBITS, DEFAULT_NORM_TOLERANCE, MAX_SUPPORTED_QUBITS, QsimError, Result,
};
use serde::{Deserialize, Serialize};

/// Knobs for a [`Simulator`](crate::Simulator).
///
/// Deserializes from TOML with every field optional:
///
/// ```toml
/// max_qubits = 10
/// seed = 42
/// norm_tolerance = 1e-9
/// check_normalization = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest register the simulator will allocate.
    pub max_qubits: usize,
    /// Seed for measurement sampling. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Allowed deviation of total probability from 1 before a drift warning.
    pub norm_tolerance: f64,
    /// Check normalization after every step.
    pub check_normalization: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
            norm_tolerance: DEFAULT_NORM_TOLERANCE,
            check_normalization: true,
        }
    }
}

impl SimulatorConfig {
    /// Default config with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| QsimError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configs the simulator cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 {
            return Err(QsimError::Config {
                message: "max_qubits must be at least 1".to_string(),
            });
        }
        if self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(QsimError::Config {
                message: format!(
                    "max_qubits must be at most {}, got {}",
                    MAX_SUPPORTED_QUBITS, self.max_qubits
                ),
            });
        }
        if !self.norm_tolerance.is_finite() || self.norm_tolerance <= 0.0 {
            return Err(QsimError::Config {
                message: format!("norm_tolerance must be positive, got {}", self.norm_tolerance),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.max_qubits, 8);
        assert_eq!(config.seed, None);
        assert!(config.check_normalization);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() -> Result<()> {
        let config = SimulatorConfig::from_toml_str("max_qubits = 12\nseed = 99\n")?;
        assert_eq!(config.max_qubits, 12);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.norm_tolerance, DEFAULT_NORM_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_empty_toml_is_default() -> Result<()> {
        assert_eq!(SimulatorConfig::from_toml_str("")?, SimulatorConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SimulatorConfig::from_toml_str("max_qubits = 0"),
            Err(QsimError::Config { .. })
        ));
        assert!(matches!(
            SimulatorConfig::from_toml_str("norm_tolerance = -1.0"),
            Err(QsimError::Config { .. })
        ));
        assert!(matches!(
            SimulatorConfig::from_toml_str("max_qubits = \"many\""),
            Err(QsimError::Config { .. })
        ));
    }

    #[test]
    fn test_max_qubits_capped_at_supported_ceiling() -> Result<()> {
        let at_ceiling = format!("max_qubits = {}", MAX_SUPPORTED_QUBITS);
        assert_eq!(SimulatorConfig::from_toml_str(&at_ceiling)?.max_qubits, MAX_SUPPORTED_QUBITS);
        for too_many in [MAX_SUPPORTED_QUBITS + 1, 40, 60] {
            let config = SimulatorConfig { max_qubits: too_many, ..SimulatorConfig::default() };
            assert!(matches!(config.validate(), Err(QsimError::Config { .. })), "{}", too_many);
        }
        Ok(())
    }
}
