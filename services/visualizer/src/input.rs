//! Validated price input
//!
//! Holds the raw text the user typed alongside the last accepted price, so a
//! partial or out-of-range entry never reaches the models.

use clamm_config::PriceControlConfig;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PriceInputError {
    #[error("Please enter a valid number")]
    InvalidNumber,

    #[error("Invalid input: Price must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
}

/// Parse raw text into a price within `[min_price, max_price]`
pub fn parse_price(raw: &str, bounds: &PriceControlConfig) -> Result<f64, PriceInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PriceInputError::InvalidNumber);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| PriceInputError::InvalidNumber)?;
    if !value.is_finite() {
        return Err(PriceInputError::InvalidNumber);
    }

    if value < bounds.min_price || value > bounds.max_price {
        return Err(PriceInputError::OutOfRange {
            min: bounds.min_price,
            max: bounds.max_price,
        });
    }

    Ok(value)
}

/// Price control state: raw text, accepted price and current validation error
#[derive(Debug, Clone)]
pub struct PriceInput {
    bounds: PriceControlConfig,
    text: String,
    price: f64,
    error: Option<PriceInputError>,
}

impl PriceInput {
    pub fn new(bounds: &PriceControlConfig) -> Self {
        Self {
            bounds: bounds.clone(),
            text: bounds.initial_price.to_string(),
            price: bounds.initial_price,
            error: None,
        }
    }

    /// Store `raw` and accept it if valid. A rejected entry keeps the
    /// previously accepted price and records the error.
    pub fn set_text(&mut self, raw: &str) -> Result<f64, PriceInputError> {
        self.text = raw.to_string();

        match parse_price(raw, &self.bounds) {
            Ok(price) => {
                self.price = price;
                self.error = None;
                Ok(price)
            }
            Err(err) => {
                debug!(input = raw, error = %err, "Rejected price input");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Step the price up, stopping at `max_price`
    pub fn increment(&mut self) {
        if self.price < self.bounds.max_price {
            self.accept((self.price + self.bounds.step).min(self.bounds.max_price));
        }
    }

    /// Step the price down, stopping at `min_price`
    pub fn decrement(&mut self) {
        if self.price > self.bounds.min_price {
            self.accept((self.price - self.bounds.step).max(self.bounds.min_price));
        }
    }

    /// Apply `steps` increments (positive) or decrements (negative)
    pub fn nudge(&mut self, steps: i64) {
        for _ in 0..steps.unsigned_abs() {
            if steps > 0 {
                self.increment();
            } else {
                self.decrement();
            }
        }
    }

    fn accept(&mut self, price: f64) {
        self.price = price;
        self.text = price.to_string();
        self.error = None;
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&PriceInputError> {
        self.error.as_ref()
    }

    pub fn can_increment(&self) -> bool {
        self.price < self.bounds.max_price
    }

    pub fn can_decrement(&self) -> bool {
        self.price > self.bounds.min_price
    }
}
