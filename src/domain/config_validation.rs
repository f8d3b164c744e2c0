//! Configuration validation.
//!
//! Validates all config fields before any data is loaded.

use crate::domain::criterion::CriterionKind;
use crate::domain::error::TradescoreError;
use crate::domain::num::NumBackend;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_BACKEND: NumBackend = NumBackend::Decimal;
pub const DEFAULT_CRITERION: CriterionKind = CriterionKind::ProfitLoss;
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

pub fn validate_evaluation_config(config: &dyn ConfigPort) -> Result<(), TradescoreError> {
    parse_backend(config)?;
    require(config, "data", "dir")?;
    require(config, "data", "series")?;
    parse_criterion(config)?;
    parse_log_level(config)?;
    Ok(())
}

pub fn require(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, TradescoreError> {
    config
        .get_value(section, key)
        .ok_or_else(|| TradescoreError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

pub fn parse_backend(config: &dyn ConfigPort) -> Result<NumBackend, TradescoreError> {
    match config.get_value("numeric", "backend") {
        None => Ok(DEFAULT_BACKEND),
        Some(s) => s.parse().map_err(|reason| TradescoreError::ConfigInvalid {
            section: "numeric".to_string(),
            key: "backend".to_string(),
            reason,
        }),
    }
}

pub fn parse_criterion(config: &dyn ConfigPort) -> Result<CriterionKind, TradescoreError> {
    match config.get_value("evaluation", "criterion") {
        None => Ok(DEFAULT_CRITERION),
        Some(s) => s.parse().map_err(|reason| TradescoreError::ConfigInvalid {
            section: "evaluation".to_string(),
            key: "criterion".to_string(),
            reason,
        }),
    }
}

pub fn parse_log_level(config: &dyn ConfigPort) -> Result<log::LevelFilter, TradescoreError> {
    match config.get_value("logging", "level") {
        None => Ok(DEFAULT_LOG_LEVEL),
        Some(s) => match s.to_lowercase().as_str() {
            "trace" => Ok(log::LevelFilter::Trace),
            "debug" => Ok(log::LevelFilter::Debug),
            "info" => Ok(log::LevelFilter::Info),
            "warn" => Ok(log::LevelFilter::Warn),
            "error" => Ok(log::LevelFilter::Error),
            "off" => Ok(log::LevelFilter::Off),
            _ => Err(TradescoreError::ConfigInvalid {
                section: "logging".to_string(),
                key: "level".to_string(),
                reason: format!("unknown log level '{}'", s),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TestConfig {
        values: HashMap<(String, String), String>,
    }

    impl TestConfig {
        fn new() -> Self {
            Self {
                values: HashMap::new(),
            }
        }

        fn with(mut self, section: &str, key: &str, value: &str) -> Self {
            self.values
                .insert((section.to_string(), key.to_string()), value.to_string());
            self
        }
    }

    impl ConfigPort for TestConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.values
                .get(&(section.to_string(), key.to_string()))
                .cloned()
        }

        fn get_int(&self, _section: &str, _key: &str, default: i64) -> i64 {
            default
        }

        fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
            default
        }

        fn get_bool(&self, _section: &str, _key: &str, default: bool) -> bool {
            default
        }
    }

    fn valid_config() -> TestConfig {
        TestConfig::new()
            .with("numeric", "backend", "decimal")
            .with("data", "dir", "./data")
            .with("data", "series", "BHP")
            .with("evaluation", "criterion", "profit_loss")
            .with("logging", "level", "info")
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate_evaluation_config(&valid_config()).is_ok());
    }

    #[test]
    fn defaults_apply_when_optional_keys_missing() {
        let config = TestConfig::new()
            .with("data", "dir", "./data")
            .with("data", "series", "BHP");
        assert!(validate_evaluation_config(&config).is_ok());
        assert_eq!(parse_backend(&config).unwrap(), NumBackend::Decimal);
        assert_eq!(parse_criterion(&config).unwrap(), CriterionKind::ProfitLoss);
        assert_eq!(parse_log_level(&config).unwrap(), log::LevelFilter::Info);
    }

    #[test]
    fn missing_data_dir() {
        let config = TestConfig::new().with("data", "series", "BHP");
        let err = validate_evaluation_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TradescoreError::ConfigMissing { ref section, ref key }
                if section == "data" && key == "dir"
        ));
    }

    #[test]
    fn blank_series_counts_as_missing() {
        let config = valid_config().with("data", "series", "   ");
        assert!(matches!(
            validate_evaluation_config(&config),
            Err(TradescoreError::ConfigMissing { .. })
        ));
    }

    #[test]
    fn unknown_backend() {
        let config = valid_config().with("numeric", "backend", "bigfloat");
        let err = validate_evaluation_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TradescoreError::ConfigInvalid { ref key, .. } if key == "backend"
        ));
    }

    #[test]
    fn unknown_criterion() {
        let config = valid_config().with("evaluation", "criterion", "sharpe");
        let err = validate_evaluation_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TradescoreError::ConfigInvalid { ref key, .. } if key == "criterion"
        ));
    }

    #[test]
    fn unknown_log_level() {
        let config = valid_config().with("logging", "level", "loud");
        assert!(matches!(
            validate_evaluation_config(&config),
            Err(TradescoreError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn log_level_case_insensitive() {
        let config = valid_config().with("logging", "level", "DEBUG");
        assert_eq!(parse_log_level(&config).unwrap(), log::LevelFilter::Debug);
    }
}
