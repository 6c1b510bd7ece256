use crate::classification::engine::{
    ClassificationConfig, DEFAULT_EMBARGO_MEDIUM_MONTHS, DEFAULT_EMBARGO_SHORT_MONTHS,
    DEFAULT_REFERENCE_CURRENCY,
};
use std::env;
use std::fmt;
use std::num::ParseIntError;

/// Distinguishes runtime behavior for different stages of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the classifier and its tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub classification: ClassificationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let reference_currency = env::var("COAT_REFERENCE_CURRENCY")
            .map(|value| value.trim().to_ascii_uppercase())
            .unwrap_or_else(|_| DEFAULT_REFERENCE_CURRENCY.to_string());
        if reference_currency.is_empty() {
            return Err(ConfigError::EmptyCurrency);
        }

        let embargo_short_months =
            months_var("COAT_EMBARGO_SHORT_MONTHS", DEFAULT_EMBARGO_SHORT_MONTHS)?;
        let embargo_medium_months =
            months_var("COAT_EMBARGO_MEDIUM_MONTHS", DEFAULT_EMBARGO_MEDIUM_MONTHS)?;
        if embargo_short_months > embargo_medium_months {
            return Err(ConfigError::EmbargoThresholdOrder {
                short: embargo_short_months,
                medium: embargo_medium_months,
            });
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            classification: ClassificationConfig {
                reference_currency,
                embargo_short_months,
                embargo_medium_months,
            },
        })
    }
}

fn months_var(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|source| ConfigError::InvalidMonths { name, source }),
        Err(_) => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyCurrency,
    InvalidMonths {
        name: &'static str,
        source: ParseIntError,
    },
    EmbargoThresholdOrder {
        short: u32,
        medium: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyCurrency => {
                write!(f, "COAT_REFERENCE_CURRENCY must not be empty")
            }
            ConfigError::InvalidMonths { name, .. } => {
                write!(f, "{name} must be a whole number of months")
            }
            ConfigError::EmbargoThresholdOrder { short, medium } => write!(
                f,
                "short embargo threshold {short} exceeds medium threshold {medium}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidMonths { source, .. } => Some(source),
            ConfigError::EmptyCurrency | ConfigError::EmbargoThresholdOrder { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("COAT_REFERENCE_CURRENCY");
        env::remove_var("COAT_EMBARGO_SHORT_MONTHS");
        env::remove_var("COAT_EMBARGO_MEDIUM_MONTHS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.classification, ClassificationConfig::default());
    }

    #[test]
    fn reads_classification_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("COAT_REFERENCE_CURRENCY", "usd");
        env::set_var("COAT_EMBARGO_SHORT_MONTHS", "3");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.classification.reference_currency, "USD");
        assert_eq!(config.classification.embargo_short_months, 3);
        assert_eq!(config.classification.embargo_medium_months, 12);
        reset_env();
    }

    #[test]
    fn rejects_invalid_thresholds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("COAT_EMBARGO_MEDIUM_MONTHS", "six");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidMonths {
                name: "COAT_EMBARGO_MEDIUM_MONTHS",
                ..
            })
        ));

        env::set_var("COAT_EMBARGO_MEDIUM_MONTHS", "4");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::EmbargoThresholdOrder { short: 6, medium: 4 })
        ));
        reset_env();
    }
}
