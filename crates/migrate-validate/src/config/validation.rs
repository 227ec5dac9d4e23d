//! Configuration validation.

use super::Config;
use crate::error::{Result, ValidateError};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Side validation
    for (label, profile) in [("source", &config.source), ("target", &config.target)] {
        if profile.engine.is_empty() {
            return Err(ValidateError::Config(format!("{label}.engine is required")));
        }
        if profile.engine_kind().is_err() {
            return Err(ValidateError::Config(format!(
                "{label}.engine '{}' is not a supported engine",
                profile.engine
            )));
        }
        if profile.extract.as_os_str().is_empty() {
            return Err(ValidateError::Config(format!("{label}.extract is required")));
        }
        if let Some(schema) = &profile.schema {
            if schema.trim().is_empty() {
                return Err(ValidateError::Config(format!(
                    "{label}.schema must not be blank when set"
                )));
            }
        }
    }

    if config.source.extract == config.target.extract {
        return Err(ValidateError::Config(
            "source and target cannot use the same extract file".into(),
        ));
    }

    // Validator tuning
    let tolerance = config.validation.row_count_tolerance_percent;
    if !(0.0..=100.0).contains(&tolerance) {
        return Err(ValidateError::Config(format!(
            "validation.row_count_tolerance_percent must be between 0 and 100, got {tolerance}"
        )));
    }
    if config.validation.decimal_precision_tolerance < 0 {
        return Err(ValidateError::Config(format!(
            "validation.decimal_precision_tolerance must not be negative, got {}",
            config.validation.decimal_precision_tolerance
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConnectionProfile, ReportConfig, ValidatorOptions};
    use std::path::PathBuf;

    fn profile(engine: &str, extract: &str) -> ConnectionProfile {
        ConnectionProfile {
            engine: engine.to_string(),
            extract: PathBuf::from(extract),
            schema: None,
            host: None,
            port: None,
            database: None,
            user: None,
            password: None,
        }
    }

    fn valid_config() -> Config {
        Config {
            source: profile("oracle", "source.json"),
            target: profile("postgres", "target.json"),
            validation: ValidatorOptions::default(),
            report: ReportConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_unknown_engine_rejected() {
        let mut config = valid_config();
        config.source.engine = "db2".to_string();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("source.engine"));
    }

    #[test]
    fn test_empty_extract_rejected() {
        let mut config = valid_config();
        config.target.extract = PathBuf::new();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("target.extract"));
    }

    #[test]
    fn test_same_extract_rejected() {
        let mut config = valid_config();
        config.target.extract = config.source.extract.clone();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_tolerance_bounds() {
        let mut config = valid_config();
        config.validation.row_count_tolerance_percent = 101.0;
        assert!(validate(&config).is_err());
        config.validation.row_count_tolerance_percent = -1.0;
        assert!(validate(&config).is_err());
        config.validation.row_count_tolerance_percent = 5.0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_negative_decimal_tolerance_rejected() {
        let mut config = valid_config();
        config.validation.decimal_precision_tolerance = -1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_blank_schema_rejected() {
        let mut config = valid_config();
        config.source.schema = Some("  ".to_string());
        assert!(validate(&config).is_err());
    }
}
