//! Concentrated Liquidity Visualizer
//!
//! Presentation layer over the position and payoff models: validates raw
//! price input, projects the payoff onto chart coordinates and renders
//! report cards or JSON for chart renderers.

pub mod chart;
pub mod input;
pub mod report;
pub mod visualization;

pub use chart::{ChartPoint, PayoffChart, PayoffSegments, Segment, SegmentGeometry};
pub use input::{parse_price, PriceInput, PriceInputError};
pub use report::{position_cards, payoff_card, trader_pnl_card, Card, ChartExport, PayoffExport};
pub use visualization::Visualization;
