//! Extractor configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for the extraction pipeline. Missing JSON keys take defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Bytes of each input text that are scanned
    pub max_input_bytes: usize,
    /// New CPT codes accepted per extraction call
    pub max_new_cpt_codes: usize,
    /// New HCPCS codes accepted per extraction call
    pub max_new_hcpcs_codes: usize,
    /// New ICD-10 codes accepted per extraction call
    pub max_new_icd_codes: usize,
    /// Dollar values at or below this are treated as copays, not bill totals
    pub min_bill_amount: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 64 * 1024,
            max_new_cpt_codes: 20,
            max_new_hcpcs_codes: 10,
            max_new_icd_codes: 15,
            min_bill_amount: 50.0,
        }
    }
}

impl ExtractorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: ExtractorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would disable extraction outright.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_input_bytes == 0 {
            return Err(ConfigError::Invalid("max_input_bytes must be positive".into()));
        }
        for (name, cap) in [
            ("max_new_cpt_codes", self.max_new_cpt_codes),
            ("max_new_hcpcs_codes", self.max_new_hcpcs_codes),
            ("max_new_icd_codes", self.max_new_icd_codes),
        ] {
            if cap == 0 {
                return Err(ConfigError::Invalid(format!("{} must be positive", name)));
            }
        }
        if !self.min_bill_amount.is_finite() || self.min_bill_amount < 0.0 {
            return Err(ConfigError::Invalid(
                "min_bill_amount must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.max_new_cpt_codes, 20);
        assert_eq!(config.max_new_hcpcs_codes, 10);
        assert_eq!(config.max_new_icd_codes, 15);
        assert_eq!(config.min_bill_amount, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ExtractorConfig::from_json(r#"{"max_input_bytes": 1024}"#).unwrap();
        assert_eq!(config.max_input_bytes, 1024);
        assert_eq!(config.max_new_cpt_codes, 20);
    }

    #[test]
    fn test_invalid_config() {
        let err = ExtractorConfig::from_json(r#"{"max_new_hcpcs_codes": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ExtractorConfig::from_json(r#"{"min_bill_amount": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ExtractorConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
