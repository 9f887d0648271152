//! # Concentrated Liquidity Math - Position and Payoff Models
//!
//! ## Purpose
//!
//! Closed-form mathematics for a single Uniswap V3-style ranged position and
//! for a borrowed-liquidity trader payoff. Converts pool parameters (price
//! bounds, entry price, current price, initial principal, withdrawal price)
//! into token holdings, position value and impermanent loss across the range.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Raw `f64` prices and principal from an input collaborator
//!   that has already validated them (see [`PositionParams::check_preconditions`])
//! - **Output Destinations**: Chart renderers and report cards consuming the
//!   sampled curves and the current/withdrawal snapshots
//! - **Serialization**: All results derive serde traits for JSON export
//!
//! ## Architecture Role
//!
//! Leaf library with no state. Every call is a pure, deterministic function of
//! its inputs; repeated calls with the same inputs return identical results.
//!
//! ## Performance Profile
//!
//! - **Position model**: one pass over [`SAMPLE_COUNT`] prices plus two direct
//!   snapshot evaluations
//! - **Payoff model**: constant time
//! - **Precision**: `f64` throughout, no internal rounding; display layers truncate

pub mod error;
pub mod liquidity;
pub mod payoff;
pub mod price_series;

pub use error::ParamError;
pub use liquidity::{compute_liquidity, ConcentratedMath, LiquidityResult, PositionParams, Snapshot};
pub use payoff::{compute_payoff, Debt, PayoffMath, PayoffParams, PayoffResult, BORROWED_BASE_UNITS};
pub use price_series::{linspace, price_series, SAMPLE_COUNT};
