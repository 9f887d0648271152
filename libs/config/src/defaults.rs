//! Default values and constants
//!
//! Defaults mirror the values the lab starts with before any configuration
//! file or environment override is applied.

/// Configuration file locations and environment prefix
pub mod files {
    /// Base configuration file, optional
    pub const DEFAULT_CONFIG_PATH: &str = "config/visualizer.toml";

    /// Directory holding profile overrides (`<profile>.toml`)
    pub const PROFILE_DIR: &str = "config/profiles";

    /// Environment variable prefix, e.g. `CLAMM_PAYOFF__STRIKE_PRICE`
    pub const ENV_PREFIX: &str = "CLAMM";

    /// Separator between nested keys in environment variables
    pub const ENV_SEPARATOR: &str = "__";
}

pub mod global {
    /// Level applied to the lab's own crates unless `RUST_LOG` is set
    pub const LOG_LEVEL: &str = "info";
}

/// Position form defaults (ETH/USDC-like range)
pub mod position {
    pub const LOWER_PRICE: f64 = 1000.0;
    pub const UPPER_PRICE: f64 = 3000.0;
    pub const ENTRY_PRICE: f64 = 1000.0;
    pub const CURRENT_PRICE: f64 = 3000.0;

    /// Initial principal in base-asset units
    pub const INITIAL_PRINCIPAL: f64 = 1.0;

    pub const WITHDRAW_PRICE: f64 = 2000.0;
}

/// Price control bounds for the payoff views
pub mod price_control {
    pub const MIN_PRICE: f64 = 2000.0;
    pub const MAX_PRICE: f64 = 5000.0;

    /// Increment/decrement step
    pub const STEP: f64 = 1.0;

    pub const INITIAL_PRICE: f64 = 2000.0;
}

/// Borrowed-liquidity payoff defaults
pub mod payoff {
    pub const STRIKE_PRICE: f64 = 3500.0;

    /// Right edge of the price axis
    pub const CAP_AT_PRICE: f64 = 5000.0;

    /// Top of the PnL axis
    pub const MAX_PNL: f64 = 1500.0;
}

/// Payoff chart geometry (pixels)
pub mod chart {
    pub const WIDTH: f64 = 600.0;
    pub const HEIGHT: f64 = 220.0;

    /// Space left of the y-axis for labels
    pub const LEFT_OFFSET: f64 = 80.0;

    /// Space above the chart so the top label is not flush
    pub const TOP_PADDING: f64 = 20.0;

    pub const X_TICK_STEP: f64 = 500.0;
    pub const Y_TICK_STEP: f64 = 500.0;
}

/// Display precision for report cards
pub mod display {
    /// Decimal places for base-asset amounts
    pub const BASE_DECIMALS: u32 = 4;

    /// Decimal places for quote-asset amounts and values
    pub const QUOTE_DECIMALS: u32 = 2;

    pub const BASE_SYMBOL: &str = "ETH";
    pub const QUOTE_SYMBOL: &str = "USDC";
}
