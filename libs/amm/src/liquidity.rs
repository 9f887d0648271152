//! Concentrated liquidity position model
//!
//! Converts a single ranged position (price bounds, entry, current and
//! withdrawal prices, initial base-asset principal) into holdings, position
//! value and impermanent loss across the range, using the closed-form
//! Uniswap V3 relations between liquidity and the square root of price.
//!
//! All arithmetic is `f64` with no internal rounding. Prices are expected to
//! be non-negative: the square root of a negative price is outside the model's
//! domain and is not guarded here (see [`PositionParams::check_preconditions`]).

use crate::error::ParamError;
use crate::price_series::price_series;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Inputs describing one ranged position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionParams {
    pub lower_price: f64,
    pub upper_price: f64,
    pub entry_price: f64,
    pub current_price: f64,
    /// Deposited amount in base-asset units
    pub initial_principal: f64,
    pub withdraw_price: f64,
}

impl PositionParams {
    /// Check the numeric precondition of the model: every input finite and
    /// every price non-negative.
    ///
    /// Economic sanity (e.g. entry inside the range) is not checked;
    /// out-of-range prices produce well-defined, if negative, holdings.
    pub fn check_preconditions(&self) -> Result<(), ParamError> {
        let prices = [
            ("lower_price", self.lower_price),
            ("upper_price", self.upper_price),
            ("entry_price", self.entry_price),
            ("current_price", self.current_price),
            ("withdraw_price", self.withdraw_price),
        ];

        for (field, value) in prices {
            if !value.is_finite() {
                return Err(ParamError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(ParamError::NegativePrice { field, value });
            }
        }

        if !self.initial_principal.is_finite() {
            return Err(ParamError::NotFinite {
                field: "initial_principal",
                value: self.initial_principal,
            });
        }

        Ok(())
    }
}

/// Holdings and value of the position evaluated at one price
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub base_held: f64,
    pub quote_held: f64,
    /// Position value in quote units
    pub position_value: f64,
    /// Value of the original principal held unconverted
    pub hodl_value: f64,
    /// `|position_value - hodl_value|`
    pub impermanent_loss: f64,
}

/// Full model output: sampled curves plus the current and withdrawal snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityResult {
    /// Liquidity `L` of the position, zero for the degenerate case
    pub liquidity: f64,
    pub prices: Vec<f64>,
    pub base_holdings: Vec<f64>,
    pub quote_holdings: Vec<f64>,
    pub position_values: Vec<f64>,
    pub hodl_values: Vec<f64>,
    pub impermanent_loss: Vec<f64>,
    pub current: Snapshot,
    pub withdrawn: Snapshot,
    /// Set when `sqrt(upper) == sqrt(entry)` short-circuited the computation
    degenerate: bool,
}

impl LiquidityResult {
    /// All-zero result over the given price series
    fn degenerate(prices: Vec<f64>) -> Self {
        let zeros = vec![0.0; prices.len()];
        Self {
            liquidity: 0.0,
            base_holdings: zeros.clone(),
            quote_holdings: zeros.clone(),
            position_values: zeros.clone(),
            hodl_values: zeros.clone(),
            impermanent_loss: zeros,
            prices,
            current: Snapshot::default(),
            withdrawn: Snapshot::default(),
            degenerate: true,
        }
    }

    /// Whether the degenerate (`sqrt(upper) == sqrt(entry)`) branch produced this result
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Base-asset holdings paired with the price series as `(price, amount)` points
    pub fn base_series(&self) -> Vec<(f64, f64)> {
        self.pair(&self.base_holdings)
    }

    /// Quote-asset holdings paired with the price series
    pub fn quote_series(&self) -> Vec<(f64, f64)> {
        self.pair(&self.quote_holdings)
    }

    pub fn value_series(&self) -> Vec<(f64, f64)> {
        self.pair(&self.position_values)
    }

    pub fn hodl_series(&self) -> Vec<(f64, f64)> {
        self.pair(&self.hodl_values)
    }

    pub fn impermanent_loss_series(&self) -> Vec<(f64, f64)> {
        self.pair(&self.impermanent_loss)
    }

    fn pair(&self, curve: &[f64]) -> Vec<(f64, f64)> {
        self.prices.iter().copied().zip(curve.iter().copied()).collect()
    }
}

/// Closed-form concentrated liquidity relations
pub struct ConcentratedMath;

impl ConcentratedMath {
    /// Liquidity of a position that is entirely base asset at `entry_price`
    ///
    /// `L = principal * sqrt(entry) * sqrt(upper) / (sqrt(upper) - sqrt(entry))`
    ///
    /// Returns `None` only when `sqrt(upper) == sqrt(entry)` exactly. Near-equal
    /// roots still divide and may yield very large or non-finite liquidity.
    pub fn liquidity(initial_principal: f64, entry_price: f64, upper_price: f64) -> Option<f64> {
        let sqrt_entry = entry_price.sqrt();
        let sqrt_upper = upper_price.sqrt();

        if sqrt_upper == sqrt_entry {
            return None;
        }

        Some(initial_principal * sqrt_entry * sqrt_upper / (sqrt_upper - sqrt_entry))
    }

    /// Base asset held at `price`: `L * (sqrt(upper) - sqrt(P)) / (sqrt(P) * sqrt(upper))`
    pub fn base_held(liquidity: f64, price: f64, upper_price: f64) -> f64 {
        let sqrt_price = price.sqrt();
        let sqrt_upper = upper_price.sqrt();
        liquidity * (sqrt_upper - sqrt_price) / (sqrt_price * sqrt_upper)
    }

    /// Quote asset held at `price`: `L * (sqrt(P) - sqrt(lower))`
    pub fn quote_held(liquidity: f64, price: f64, lower_price: f64) -> f64 {
        liquidity * (price.sqrt() - lower_price.sqrt())
    }

    /// Evaluate holdings, value and impermanent loss directly at one price
    pub fn snapshot(liquidity: f64, price: f64, params: &PositionParams) -> Snapshot {
        let base_held = Self::base_held(liquidity, price, params.upper_price);
        let quote_held = Self::quote_held(liquidity, price, params.lower_price);
        let position_value = base_held * price + quote_held;
        let hodl_value = params.initial_principal * price;

        Snapshot {
            base_held,
            quote_held,
            position_value,
            hodl_value,
            impermanent_loss: (position_value - hodl_value).abs(),
        }
    }
}

/// Compute the sampled curves and the current/withdrawal snapshots for a position
///
/// Snapshots are evaluated at their exact prices rather than interpolated
/// from the sampled curve. The only short-circuit is the exact
/// `sqrt(upper) == sqrt(entry)` case, which returns an all-zero result.
pub fn compute_liquidity(params: &PositionParams) -> LiquidityResult {
    let prices = price_series(params.lower_price, params.upper_price);

    let liquidity = match ConcentratedMath::liquidity(
        params.initial_principal,
        params.entry_price,
        params.upper_price,
    ) {
        Some(liquidity) => liquidity,
        None => {
            debug!(
                entry_price = params.entry_price,
                upper_price = params.upper_price,
                "Entry and upper price share a square root, returning zeroed position"
            );
            return LiquidityResult::degenerate(prices);
        }
    };

    if !liquidity.is_finite() {
        warn!(
            entry_price = params.entry_price,
            upper_price = params.upper_price,
            liquidity,
            "Liquidity is not finite"
        );
    }

    let snapshots: Vec<Snapshot> = prices
        .iter()
        .map(|&price| ConcentratedMath::snapshot(liquidity, price, params))
        .collect();

    LiquidityResult {
        liquidity,
        base_holdings: snapshots.iter().map(|s| s.base_held).collect(),
        quote_holdings: snapshots.iter().map(|s| s.quote_held).collect(),
        position_values: snapshots.iter().map(|s| s.position_value).collect(),
        hodl_values: snapshots.iter().map(|s| s.hodl_value).collect(),
        impermanent_loss: snapshots.iter().map(|s| s.impermanent_loss).collect(),
        prices,
        current: ConcentratedMath::snapshot(liquidity, params.current_price, params),
        withdrawn: ConcentratedMath::snapshot(liquidity, params.withdraw_price, params),
        degenerate: false,
    }
}
