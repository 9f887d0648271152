//! Report cards for terminal output
//!
//! Model output is raw `f64`. Values are converted to `Decimal` here and
//! truncated to the configured number of places for display only.

use crate::chart::{ChartPoint, PayoffChart, Segment, SegmentGeometry};
use crate::visualization::Visualization;
use clamm_amm::{Debt, LiquidityResult, PayoffResult, Snapshot, SAMPLE_COUNT};
use clamm_config::DisplayConfig;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

/// Truncate `value` toward zero and print exactly `decimals` places
pub fn fixed(value: f64, decimals: u32) -> String {
    match Decimal::from_f64(value) {
        Some(d) => {
            let truncated = d.round_dp_with_strategy(decimals, RoundingStrategy::ToZero);
            format!("{:.*}", decimals as usize, truncated)
        }
        // NaN, infinities and magnitudes beyond Decimal's range
        None => value.to_string(),
    }
}

/// Truncate `value` to at most `decimals` places without trailing zeros
pub fn plain(value: f64, decimals: u32) -> String {
    match Decimal::from_f64(value) {
        Some(d) => d
            .round_dp_with_strategy(decimals, RoundingStrategy::ToZero)
            .normalize()
            .to_string(),
        None => value.to_string(),
    }
}

/// Titled block of label/value rows
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub rows: Vec<(String, String)>,
}

impl Card {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push((label.into(), value.into()));
        self
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let width = self.rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in &self.rows {
            writeln!(f, "  {:<width$}  {}", label, value, width = width)?;
        }
        Ok(())
    }
}

fn snapshot_card(title: &str, snapshot: &Snapshot, display: &DisplayConfig) -> Card {
    let base = &display.base_symbol;
    let quote = &display.quote_symbol;
    let q = display.quote_decimals;

    Card::new(title)
        .row(
            format!("{} Holdings:", base),
            format!("{} {}", fixed(snapshot.base_held, display.base_decimals), base),
        )
        .row(
            format!("{} Holdings:", quote),
            format!("{} {}", fixed(snapshot.quote_held, q), quote),
        )
        .row(
            "Portfolio Value:",
            format!("{} {}", fixed(snapshot.position_value, q), quote),
        )
        .row(
            "HODL Value:",
            format!("{} {}", fixed(snapshot.hodl_value, q), quote),
        )
        .row(
            "Impermanent Loss:",
            format!("{} {}", fixed(snapshot.impermanent_loss, q), quote),
        )
}

/// "Current Position" and "At Withdrawal Price" cards
pub fn position_cards(result: &LiquidityResult, display: &DisplayConfig) -> [Card; 2] {
    [
        snapshot_card("Current Position", &result.current, display),
        snapshot_card("At Withdrawal Price", &result.withdrawn, display),
    ]
}

pub fn format_debt(debt: &Debt, display: &DisplayConfig) -> String {
    match debt {
        Debt::Base(units) => format!(
            "{} {}",
            plain(*units, display.base_decimals),
            display.base_symbol
        ),
        Debt::Quote(amount) => format!(
            "{} {}",
            plain(*amount, display.quote_decimals),
            display.quote_symbol
        ),
    }
}

/// Borrowed value, debt and trader PnL cards for the borrowed tick view
pub fn payoff_card(payoff: &PayoffResult, display: &DisplayConfig) -> Card {
    let q = display.quote_decimals;

    Card::new("Borrowed Tick Payoff")
        .row(
            "Value of borrowed asset:",
            format!(
                "1 {} = {} {}",
                display.base_symbol,
                plain(payoff.borrowed_asset_value, q),
                display.quote_symbol
            ),
        )
        .row("Debt to repay LP:", format_debt(&payoff.debt_owed, display))
        .row(
            "Trader PnL:",
            format!("{} {}", plain(payoff.pnl, q), display.quote_symbol),
        )
}

/// Profit card and marker placement for the trader PnL chart
pub fn trader_pnl_card(payoff: &PayoffResult, chart: &PayoffChart, display: &DisplayConfig) -> Card {
    let marker = match chart.marker(payoff.price) {
        Some(point) => {
            let canvas = chart.to_canvas(point);
            format!("({}, {})", plain(canvas.x, 1), plain(canvas.y, 1))
        }
        None => "hidden".to_string(),
    };

    Card::new("Trader PnL")
        .row(
            "Profit:",
            format!(
                "{} {}",
                plain(payoff.pnl, display.quote_decimals),
                display.quote_symbol
            ),
        )
        .row("Marker:", marker)
}

/// Chart geometry in canvas coordinates, independent of the current price
#[derive(Debug, Serialize)]
pub struct ChartExport {
    pub flat: SegmentGeometry,
    pub diagonal: SegmentGeometry,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
    pub curve: Vec<PayoffResult>,
}

impl ChartExport {
    pub fn new(chart: &PayoffChart) -> Self {
        let segments = chart.segments();
        let on_canvas = |segment: Segment| Segment {
            from: chart.to_canvas(segment.from),
            to: chart.to_canvas(segment.to),
        };

        Self {
            flat: on_canvas(segments.flat).into(),
            diagonal: on_canvas(segments.diagonal).into(),
            x_ticks: chart.x_ticks(),
            y_ticks: chart.y_ticks(),
            curve: chart.sample_curve(SAMPLE_COUNT),
        }
    }
}

/// JSON export of a payoff view
#[derive(Debug, Serialize)]
pub struct PayoffExport {
    pub view: Visualization,
    pub payoff: PayoffResult,
    pub marker: Option<ChartPoint>,
    pub slider_fraction: Option<f64>,
    pub chart: ChartExport,
}

impl PayoffExport {
    pub fn new(view: Visualization, payoff: PayoffResult, chart: &PayoffChart) -> Self {
        Self {
            view,
            marker: chart.marker(payoff.price).map(|p| chart.to_canvas(p)),
            slider_fraction: chart.slider_fraction(payoff.price),
            chart: ChartExport::new(chart),
            payoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clamm_amm::{compute_liquidity, compute_payoff, PayoffParams, PositionParams};
    use clamm_config::PriceControlConfig;

    fn display() -> DisplayConfig {
        DisplayConfig::default()
    }

    #[test]
    fn test_fixed_truncates() {
        assert_eq!(fixed(1.23456, 4), "1.2345");
        assert_eq!(fixed(2.999, 2), "2.99");
        assert_eq!(fixed(3.0, 2), "3.00");
        assert_eq!(fixed(f64::NAN, 2), "NaN");
        assert_eq!(fixed(f64::INFINITY, 2), "inf");
    }

    #[test]
    fn test_plain_drops_trailing_zeros() {
        assert_eq!(plain(3500.0, 2), "3500");
        assert_eq!(plain(700.5, 2), "700.5");
        assert_eq!(plain(1.0, 4), "1");
    }

    #[test]
    fn test_position_cards() {
        let result = compute_liquidity(&PositionParams {
            lower_price: 1000.0,
            upper_price: 3000.0,
            entry_price: 1000.0,
            current_price: 1000.0,
            initial_principal: 1.0,
            withdraw_price: 2000.0,
        });
        let [current, withdrawn] = position_cards(&result, &display());

        assert_eq!(current.title, "Current Position");
        assert_eq!(current.value("USDC Holdings:"), Some("0.00 USDC"));
        assert_eq!(current.value("HODL Value:"), Some("1000.00 USDC"));
        assert_eq!(withdrawn.title, "At Withdrawal Price");
        assert!(withdrawn.value("ETH Holdings:").unwrap().ends_with(" ETH"));
    }

    #[test]
    fn test_payoff_card_below_and_above_strike() {
        let params = PayoffParams::default();

        let below = payoff_card(&compute_payoff(3000.0, &params), &display());
        assert_eq!(below.value("Debt to repay LP:"), Some("1 ETH"));
        assert_eq!(below.value("Trader PnL:"), Some("0 USDC"));
        assert_eq!(below.value("Value of borrowed asset:"), Some("1 ETH = 3000 USDC"));

        let above = payoff_card(&compute_payoff(4200.0, &params), &display());
        assert_eq!(above.value("Debt to repay LP:"), Some("3500 USDC"));
        assert_eq!(above.value("Trader PnL:"), Some("700 USDC"));
    }

    #[test]
    fn test_trader_pnl_card_marker() {
        let params = PayoffParams::default();
        let chart = PayoffChart::new(&params, &PriceControlConfig::default());

        let card = trader_pnl_card(&compute_payoff(5000.0, &params), &chart, &display());
        assert_eq!(card.value("Profit:"), Some("1500 USDC"));
        assert_eq!(card.value("Marker:"), Some("(680, 20)"));
    }

    #[test]
    fn test_card_display() {
        let card = Card::new("Title").row("A:", "1").row("Longer:", "2");
        let rendered = card.to_string();

        assert_eq!(rendered, "Title\n  A:       1\n  Longer:  2\n");
    }

    #[test]
    fn test_payoff_export() {
        let params = PayoffParams::default();
        let chart = PayoffChart::new(&params, &PriceControlConfig::default());
        let export = PayoffExport::new(
            Visualization::TraderPnl,
            compute_payoff(3500.0, &params),
            &chart,
        );
        let json = serde_json::to_value(&export).unwrap();

        assert_eq!(json["view"], "trader-pnl");
        assert_eq!(json["slider_fraction"], 0.5);
        assert_eq!(json["payoff"]["debt_owed"]["denomination"], "base");
    }

    #[test]
    fn test_payoff_export_carries_chart_geometry() {
        let params = PayoffParams::default();
        let chart = PayoffChart::new(&params, &PriceControlConfig::default());
        let export = PayoffExport::new(
            Visualization::BorrowedTickPayoff,
            compute_payoff(4200.0, &params),
            &chart,
        );

        let flat = &export.chart.flat;
        assert_eq!(flat.from, ChartPoint { x: 80.0, y: 240.0 });
        assert_eq!(flat.to, ChartPoint { x: 380.0, y: 240.0 });
        assert_eq!(flat.length, 300.0);
        assert_eq!(flat.angle_degrees, 0.0);
        assert_eq!(export.chart.diagonal.to, ChartPoint { x: 680.0, y: 20.0 });
        assert!(export.chart.diagonal.angle_degrees < 0.0);
        assert_eq!(export.chart.x_ticks.len(), 7);
        assert_eq!(export.chart.y_ticks, vec![0.0, 500.0, 1000.0, 1500.0]);
        assert_eq!(export.chart.curve.len(), SAMPLE_COUNT);

        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["chart"]["diagonal"]["from"]["x"], 380.0);
        assert_eq!(json["chart"]["curve"][0]["pnl"], 0.0);
    }
}
