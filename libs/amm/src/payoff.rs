//! Borrowed-liquidity trader payoff
//!
//! A trader borrows one unit of base asset that an LP has placed as a single
//! tick at the strike price. Below the strike the LP would still hold base
//! asset, so the debt is one base unit and the trader has no profit. Above the
//! strike the LP's tick would have converted to quote asset, so the debt
//! becomes the strike value in quote units and the trader keeps the spread.
//!
//! `cap_at_price` and `max_pnl` describe the display axes only. The payoff
//! itself is unbounded: PnL keeps growing linearly above `cap_at_price` and
//! can exceed `max_pnl`.

use serde::{Deserialize, Serialize};

/// Quantity of base asset borrowed in the scenario
pub const BORROWED_BASE_UNITS: f64 = 1.0;

/// Strike and display-axis constants for the payoff curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffParams {
    /// Price above which the payoff becomes positive
    pub strike_price: f64,
    /// Right edge of the price axis, not a cap on the payoff
    pub cap_at_price: f64,
    /// Top of the PnL axis, not a ceiling on PnL
    pub max_pnl: f64,
}

impl Default for PayoffParams {
    fn default() -> Self {
        Self {
            strike_price: 3500.0,
            cap_at_price: 5000.0,
            max_pnl: 1500.0,
        }
    }
}

/// Amount owed back to the LP, in whichever asset the LP's tick holds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "denomination", content = "amount", rename_all = "snake_case")]
pub enum Debt {
    /// Owed in base-asset units (at or below the strike)
    Base(f64),
    /// Owed in quote-asset units (above the strike)
    Quote(f64),
}

impl Debt {
    pub fn amount(&self) -> f64 {
        match self {
            Debt::Base(amount) | Debt::Quote(amount) => *amount,
        }
    }

    /// Debt expressed in quote units at `price`
    pub fn quote_value(&self, price: f64) -> f64 {
        match self {
            Debt::Base(amount) => amount * price,
            Debt::Quote(amount) => *amount,
        }
    }
}

/// Payoff evaluated at one price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffResult {
    pub price: f64,
    pub pnl: f64,
    pub debt_owed: Debt,
    /// Quote value of the borrowed base asset at `price`
    pub borrowed_asset_value: f64,
}

pub struct PayoffMath;

impl PayoffMath {
    pub fn pnl(price: f64, strike_price: f64) -> f64 {
        if price <= strike_price {
            0.0
        } else {
            price - strike_price
        }
    }

    pub fn debt_owed(price: f64, strike_price: f64) -> Debt {
        if price <= strike_price {
            Debt::Base(BORROWED_BASE_UNITS)
        } else {
            Debt::Quote(strike_price * BORROWED_BASE_UNITS)
        }
    }

    pub fn borrowed_asset_value(price: f64) -> f64 {
        price * BORROWED_BASE_UNITS
    }
}

/// Evaluate the two-segment payoff at `price`
pub fn compute_payoff(price: f64, params: &PayoffParams) -> PayoffResult {
    PayoffResult {
        price,
        pnl: PayoffMath::pnl(price, params.strike_price),
        debt_owed: PayoffMath::debt_owed(price, params.strike_price),
        borrowed_asset_value: PayoffMath::borrowed_asset_value(price),
    }
}
