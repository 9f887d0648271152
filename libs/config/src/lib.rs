//! # Lab Configuration
//!
//! Centralized configuration and defaults for the concentrated liquidity lab.
//!
//! ## Features
//!
//! - **Position Defaults**: Initial range, entry, current and withdrawal prices
//! - **Price Control**: Bounds and step of the validated price input
//! - **Payoff Constants**: Strike price and display-axis hints
//! - **Display**: Asset symbols and decimal places for report cards
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clamm_config::{defaults, load_config};
//!
//! let config = load_config(None, None).unwrap();
//! let params = config.position.to_params();
//! assert_eq!(defaults::payoff::STRIKE_PRICE, 3500.0);
//! ```

pub mod defaults;
pub mod lab_config;

// Re-export commonly used types
pub use lab_config::{
    load_config, DisplayConfig, GlobalConfig, LabConfig, PayoffConfig, PositionConfig,
    PriceControlConfig,
};
