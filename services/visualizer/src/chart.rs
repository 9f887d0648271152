//! Payoff chart geometry
//!
//! Projects prices and PnL onto a fixed-size chart. Clamping here is purely
//! visual: the marker is pinned to the chart edge while the payoff model
//! keeps reporting the unclamped PnL.

use clamm_amm::{compute_payoff, linspace, PayoffParams, PayoffResult};
use clamm_config::defaults::chart;
use clamm_config::PriceControlConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: ChartPoint,
    pub to: ChartPoint,
}

impl Segment {
    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }

    /// Rotation of the segment in degrees, screen coordinates (y grows downward)
    pub fn angle_degrees(&self) -> f64 {
        (self.to.y - self.from.y)
            .atan2(self.to.x - self.from.x)
            .to_degrees()
    }
}

/// Segment endpoints together with the drawn length and rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentGeometry {
    pub from: ChartPoint,
    pub to: ChartPoint,
    pub length: f64,
    pub angle_degrees: f64,
}

impl From<Segment> for SegmentGeometry {
    fn from(segment: Segment) -> Self {
        Self {
            from: segment.from,
            to: segment.to,
            length: segment.length(),
            angle_degrees: segment.angle_degrees(),
        }
    }
}

/// Flat leg below the strike and diagonal leg up to the axis maximum
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayoffSegments {
    pub flat: Segment,
    pub diagonal: Segment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayoffChart {
    pub width: f64,
    pub height: f64,
    pub left_offset: f64,
    pub top_padding: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub strike_price: f64,
    pub max_pnl: f64,
}

impl PayoffChart {
    /// Chart spanning the price control's minimum to the payoff cap
    pub fn new(payoff: &PayoffParams, control: &PriceControlConfig) -> Self {
        Self {
            width: chart::WIDTH,
            height: chart::HEIGHT,
            left_offset: chart::LEFT_OFFSET,
            top_padding: chart::TOP_PADDING,
            min_price: control.min_price,
            max_price: payoff.cap_at_price,
            strike_price: payoff.strike_price,
            max_pnl: payoff.max_pnl,
        }
    }

    pub fn payoff_params(&self) -> PayoffParams {
        PayoffParams {
            strike_price: self.strike_price,
            cap_at_price: self.max_price,
            max_pnl: self.max_pnl,
        }
    }

    /// Horizontal position of `price`, pinned to the plot edges
    pub fn x_for(&self, price: f64) -> f64 {
        if price <= self.min_price {
            return self.left_offset;
        }
        if price >= self.max_price {
            return self.left_offset + self.width;
        }
        let fraction = (price - self.min_price) / (self.max_price - self.min_price);
        self.left_offset + fraction * self.width
    }

    /// Vertical position of `pnl`, zero at the bottom and `max_pnl` at the top
    pub fn y_for(&self, pnl: f64) -> f64 {
        if pnl < 0.0 {
            return self.height;
        }
        if pnl > self.max_pnl {
            return 0.0;
        }
        self.height - pnl / self.max_pnl * self.height
    }

    /// Marker for the current price, hidden for non-positive prices
    pub fn marker(&self, price: f64) -> Option<ChartPoint> {
        if price.is_nan() || price <= 0.0 {
            return None;
        }
        let payoff = compute_payoff(price, &self.payoff_params());
        Some(ChartPoint {
            x: self.x_for(price),
            y: self.y_for(payoff.pnl),
        })
    }

    /// Shift a chart-space point into canvas space
    pub fn to_canvas(&self, point: ChartPoint) -> ChartPoint {
        ChartPoint {
            x: point.x,
            y: point.y + self.top_padding,
        }
    }

    pub fn segments(&self) -> PayoffSegments {
        let base_y = self.y_for(0.0);
        let strike = ChartPoint {
            x: self.x_for(self.strike_price),
            y: base_y,
        };

        PayoffSegments {
            flat: Segment {
                from: ChartPoint {
                    x: self.left_offset,
                    y: base_y,
                },
                to: strike,
            },
            diagonal: Segment {
                from: strike,
                to: ChartPoint {
                    x: self.left_offset + self.width,
                    y: self.y_for(self.max_pnl),
                },
            },
        }
    }

    pub fn x_ticks(&self) -> Vec<f64> {
        ticks(self.min_price, self.max_price, chart::X_TICK_STEP)
    }

    pub fn y_ticks(&self) -> Vec<f64> {
        ticks(0.0, self.max_pnl, chart::Y_TICK_STEP)
    }

    /// Position of `price` along the split-T price bar as a fraction in `[0, 1]`
    pub fn slider_fraction(&self, price: f64) -> Option<f64> {
        if price == 0.0 || price.is_nan() {
            return None;
        }
        if price < self.min_price {
            return Some(0.0);
        }
        if price > self.max_price {
            return Some(1.0);
        }
        Some((price - self.min_price) / (self.max_price - self.min_price))
    }

    /// Payoff sampled evenly across the price axis
    pub fn sample_curve(&self, points: usize) -> Vec<PayoffResult> {
        let params = self.payoff_params();
        linspace(self.min_price, self.max_price, points)
            .into_iter()
            .map(|price| compute_payoff(price, &params))
            .collect()
    }
}

fn ticks(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let count = ((stop - start) / step).floor() as usize + 1;
    (0..count).map(|i| start + step * i as f64).collect()
}
