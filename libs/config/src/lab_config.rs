//! Lab Configuration Module
//!
//! Loads visualizer configuration from an optional TOML file, an optional
//! profile override and `CLAMM_`-prefixed environment variables, in that order
//! of increasing precedence. Every section falls back to the built-in defaults.

use crate::defaults::{display, files, global, payoff, position, price_control};
use anyhow::{ensure, Context, Result};
use clamm_amm::{PayoffParams, PositionParams};
use config_crate::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main lab configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LabConfig {
    pub global: GlobalConfig,

    /// Defaults for the position form
    pub position: PositionConfig,

    /// Bounds of the validated price input
    pub price_control: PriceControlConfig,

    pub payoff: PayoffConfig,

    pub display: DisplayConfig,
}

/// Global configuration settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PositionConfig {
    pub lower_price: f64,
    pub upper_price: f64,
    pub entry_price: f64,
    pub current_price: f64,
    pub initial_principal: f64,
    pub withdraw_price: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PriceControlConfig {
    pub min_price: f64,
    pub max_price: f64,
    pub step: f64,
    pub initial_price: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PayoffConfig {
    pub strike_price: f64,
    pub cap_at_price: f64,
    pub max_pnl: f64,
}

/// Asset symbols and decimal places used by report cards
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub base_symbol: String,
    pub quote_symbol: String,
    pub base_decimals: u32,
    pub quote_decimals: u32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: global::LOG_LEVEL.to_string(),
        }
    }
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            lower_price: position::LOWER_PRICE,
            upper_price: position::UPPER_PRICE,
            entry_price: position::ENTRY_PRICE,
            current_price: position::CURRENT_PRICE,
            initial_principal: position::INITIAL_PRINCIPAL,
            withdraw_price: position::WITHDRAW_PRICE,
        }
    }
}

impl Default for PriceControlConfig {
    fn default() -> Self {
        Self {
            min_price: price_control::MIN_PRICE,
            max_price: price_control::MAX_PRICE,
            step: price_control::STEP,
            initial_price: price_control::INITIAL_PRICE,
        }
    }
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            strike_price: payoff::STRIKE_PRICE,
            cap_at_price: payoff::CAP_AT_PRICE,
            max_pnl: payoff::MAX_PNL,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            base_symbol: display::BASE_SYMBOL.to_string(),
            quote_symbol: display::QUOTE_SYMBOL.to_string(),
            base_decimals: display::BASE_DECIMALS,
            quote_decimals: display::QUOTE_DECIMALS,
        }
    }
}

impl PositionConfig {
    pub fn to_params(&self) -> PositionParams {
        PositionParams {
            lower_price: self.lower_price,
            upper_price: self.upper_price,
            entry_price: self.entry_price,
            current_price: self.current_price,
            initial_principal: self.initial_principal,
            withdraw_price: self.withdraw_price,
        }
    }
}

impl PayoffConfig {
    pub fn to_params(&self) -> PayoffParams {
        PayoffParams {
            strike_price: self.strike_price,
            cap_at_price: self.cap_at_price,
            max_pnl: self.max_pnl,
        }
    }
}

impl LabConfig {
    /// Load configuration from files with environment overrides
    pub fn load(base_path: Option<&Path>, profile: Option<&str>) -> Result<Self> {
        Self::load_with_env(base_path, profile, None)
    }

    /// Load configuration, reading environment overrides from `env_vars`
    /// instead of the process environment when given
    pub fn load_with_env(
        base_path: Option<&Path>,
        profile: Option<&str>,
        env_vars: Option<Map<String, String>>,
    ) -> Result<Self> {
        // An explicit path must exist, the default location is optional
        let (base, required) = match base_path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(files::DEFAULT_CONFIG_PATH), false),
        };

        debug!("Loading base config: {:?} (required: {})", base, required);
        let mut builder = Config::builder().add_source(File::from(base).required(required));

        if let Some(profile) = profile {
            let profile_file = PathBuf::from(files::PROFILE_DIR).join(format!("{}.toml", profile));

            if profile_file.exists() {
                info!("Loading profile config: {:?}", profile_file);
                builder = builder.add_source(File::from(profile_file));
            } else {
                warn!("Profile config not found: {:?}", profile_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(files::ENV_PREFIX)
                .prefix_separator("_")
                .separator(files::ENV_SEPARATOR)
                .try_parsing(true)
                .source(env_vars),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the price control or display cannot work with
    pub fn validate(&self) -> Result<()> {
        let control = &self.price_control;
        ensure!(
            control.min_price < control.max_price,
            "price_control.min_price ({}) must be below max_price ({})",
            control.min_price,
            control.max_price
        );
        ensure!(
            control.step > 0.0,
            "price_control.step must be positive, got {}",
            control.step
        );
        ensure!(
            (control.min_price..=control.max_price).contains(&control.initial_price),
            "price_control.initial_price ({}) must be within [{}, {}]",
            control.initial_price,
            control.min_price,
            control.max_price
        );
        ensure!(
            self.payoff.max_pnl > 0.0,
            "payoff.max_pnl must be positive, got {}",
            self.payoff.max_pnl
        );
        ensure!(
            self.payoff.cap_at_price > control.min_price,
            "payoff.cap_at_price ({}) must be above price_control.min_price ({})",
            self.payoff.cap_at_price,
            control.min_price
        );

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>, profile: Option<&str>) -> Result<LabConfig> {
    LabConfig::load(path, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;
    use tracing_subscriber::fmt::MakeWriter;

    fn no_env() -> Option<Map<String, String>> {
        Some(Map::new())
    }

    /// Log sink shared between a test subscriber and its assertions
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_load_base_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("visualizer.toml");

        let config_content = r#"
[global]
log_level = "debug"

[position]
lower_price = 1500.0
upper_price = 4000.0

[payoff]
strike_price = 3000.0
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = LabConfig::load_with_env(Some(&config_path), None, no_env()).unwrap();

        assert_eq!(config.global.log_level, "debug");
        assert_eq!(config.position.lower_price, 1500.0);
        assert_eq!(config.position.upper_price, 4000.0);
        // Unset keys keep their defaults
        assert_eq!(config.position.entry_price, position::ENTRY_PRICE);
        assert_eq!(config.payoff.strike_price, 3000.0);
        assert_eq!(config.payoff.max_pnl, payoff::MAX_PNL);
        assert_eq!(config.price_control, PriceControlConfig::default());
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let config = LabConfig::load_with_env(None, None, no_env()).unwrap();

        assert_eq!(config, LabConfig::default());
        assert_eq!(config.payoff.to_params(), PayoffParams::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(LabConfig::load_with_env(Some(&missing), None, no_env()).is_err());
    }

    #[test]
    fn test_environment_override() {
        let mut vars = Map::new();
        vars.insert("CLAMM_PAYOFF__STRIKE_PRICE".to_string(), "4000".to_string());
        vars.insert("CLAMM_GLOBAL__LOG_LEVEL".to_string(), "trace".to_string());

        let config = LabConfig::load_with_env(None, None, Some(vars)).unwrap();

        assert_eq!(config.payoff.strike_price, 4000.0);
        assert_eq!(config.global.log_level, "trace");
    }

    #[test]
    fn test_invalid_price_control_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("visualizer.toml");
        fs::write(
            &config_path,
            "[price_control]\nmin_price = 5000.0\nmax_price = 2000.0\n",
        )
        .unwrap();

        let err = LabConfig::load_with_env(Some(&config_path), None, no_env()).unwrap_err();
        assert!(err.to_string().contains("min_price"));
    }

    #[test]
    fn test_initial_price_outside_bounds_rejected() {
        let mut config = LabConfig::default();
        config.price_control.initial_price = 1000.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_payoff_axis_must_extend_past_price_minimum() {
        let mut config = LabConfig::default();
        config.payoff.cap_at_price = config.price_control.min_price;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cap_at_price"));
    }

    #[test]
    fn test_missing_profile_is_reported() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            LabConfig::load_with_env(None, Some("no_such_profile"), no_env())
        })
        .unwrap();

        assert_eq!(config, LabConfig::default());
        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("Profile config not found"));
        assert!(output.contains("no_such_profile.toml"));
    }

    #[test]
    fn test_position_defaults_convert_to_params() {
        let params = PositionConfig::default().to_params();

        assert_eq!(params.lower_price, 1000.0);
        assert_eq!(params.upper_price, 3000.0);
        assert_eq!(params.withdraw_price, 2000.0);
        assert!(params.check_preconditions().is_ok());
    }

    #[test]
    fn test_toml_dump_reloads() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("dump.toml");

        let mut original = LabConfig::default();
        original.display.base_symbol = "WBTC".to_string();
        fs::write(&config_path, original.to_toml_string().unwrap()).unwrap();

        let reloaded = LabConfig::load_with_env(Some(&config_path), None, no_env()).unwrap();
        assert_eq!(reloaded, original);
    }
}
