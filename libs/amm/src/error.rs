//! Precondition errors for position inputs
//!
//! The models never return these. They exist so an input collaborator can
//! reject values the closed-form math is not defined for (non-finite numbers,
//! negative prices under a square root) before calling the model.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    /// Input is NaN or infinite
    #[error("{field} is not finite: {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// Price is below zero, so its square root is undefined
    #[error("{field} must be non-negative, got {value}")]
    NegativePrice { field: &'static str, value: f64 },
}
