//! Selectable pool visualizations

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visualization {
    TickLiquidity,
    RangedLiquidity,
    BorrowedTickPayoff,
    TraderPnl,
}

impl Visualization {
    pub const ALL: [Visualization; 4] = [
        Visualization::TickLiquidity,
        Visualization::RangedLiquidity,
        Visualization::BorrowedTickPayoff,
        Visualization::TraderPnl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Visualization::TickLiquidity => "Tick Liquidity",
            Visualization::RangedLiquidity => "Ranged Liquidity",
            Visualization::BorrowedTickPayoff => "Borrowed Tick Payoff",
            Visualization::TraderPnl => "Trader PnL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Visualization::TickLiquidity => "How tick liquidity changes when price crosses a tick",
            Visualization::RangedLiquidity => {
                "How ranged liquidity changes when price of the base asset changes"
            }
            Visualization::BorrowedTickPayoff => {
                "When this liquidity is borrowed, swap does not happen"
            }
            Visualization::TraderPnl => "How trader PnL changes when price of the base asset changes",
        }
    }

    /// Whether the view is driven by the borrowed-liquidity payoff model
    pub fn uses_payoff(&self) -> bool {
        matches!(
            self,
            Visualization::BorrowedTickPayoff | Visualization::TraderPnl
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_view_is_described() {
        for view in Visualization::ALL {
            assert!(!view.label().is_empty());
            assert!(view.description().starts_with("How") || view.description().starts_with("When"));
        }
    }

    #[test]
    fn test_payoff_views() {
        let payoff: Vec<_> = Visualization::ALL
            .into_iter()
            .filter(Visualization::uses_payoff)
            .collect();

        assert_eq!(
            payoff,
            vec![Visualization::BorrowedTickPayoff, Visualization::TraderPnl]
        );
    }

    #[test]
    fn test_cli_names() {
        assert_eq!(
            Visualization::from_str("trader-pnl", false),
            Ok(Visualization::TraderPnl)
        );
        assert!(Visualization::from_str("borrowed-tick-payoff", false).is_ok());
    }
}
