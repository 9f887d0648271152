//! Concentrated liquidity visualizer entry point

use anyhow::{Context, Result};
use clamm_amm::{compute_liquidity, compute_payoff, PositionParams};
use clamm_config::{defaults, LabConfig, PositionConfig};
use clamm_visualizer::{
    payoff_card, position_cards, trader_pnl_card, PayoffChart, PayoffExport, PriceInput,
    Visualization,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Profile override loaded from config/profiles/<profile>.toml
    #[arg(long)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Holdings, value and impermanent loss of a ranged position
    Position {
        /// Lower bound of the range (quote per base)
        #[arg(long, allow_hyphen_values = true)]
        lower: Option<f64>,

        /// Upper bound of the range
        #[arg(long, allow_hyphen_values = true)]
        upper: Option<f64>,

        /// Price at which the position was opened
        #[arg(long, allow_hyphen_values = true)]
        entry: Option<f64>,

        /// Price used for the current position card
        #[arg(long, allow_hyphen_values = true)]
        current: Option<f64>,

        /// Deposited base-asset amount
        #[arg(long, allow_hyphen_values = true)]
        principal: Option<f64>,

        /// Price used for the withdrawal card
        #[arg(long, allow_hyphen_values = true)]
        withdraw: Option<f64>,

        /// Emit the full result with all sampled curves as JSON
        #[arg(long)]
        json: bool,
    },

    /// Borrowed-liquidity payoff at a price
    Payoff {
        /// Raw price text, validated against the price control bounds
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,

        /// Step the price up (positive) or down (negative) this many times
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        nudge: i64,

        #[arg(long, value_enum, default_value_t = Visualization::TraderPnl)]
        view: Visualization,

        #[arg(long)]
        json: bool,
    },

    /// List the available visualizations
    Describe,

    /// Print the effective configuration as TOML
    ShowConfig,
}

/// Crates whose events follow `global.log_level`
const LOG_TARGETS: [&str; 4] = ["clamm_viz", "clamm_visualizer", "clamm_config", "clamm_amm"];

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing before configuration so profile lookups are logged
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let (filter, filter_handle) = reload::Layer::new(
        env_filter.unwrap_or_else(|| EnvFilter::new(log_directive(defaults::global::LOG_LEVEL))),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = LabConfig::load(args.config.as_deref(), args.profile.as_deref())?;

    // RUST_LOG wins over the configured level
    if !from_env {
        filter_handle
            .reload(EnvFilter::new(log_directive(&config.global.log_level)))
            .context("Failed to apply configured log level")?;
    }

    debug!("Configuration loaded: {:?}", config);

    run(args.command, &config)
}

/// Filter directive applying `level` to every lab crate and `warn` elsewhere
fn log_directive(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .chain(std::iter::once("warn".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

fn run(command: Command, config: &LabConfig) -> Result<()> {
    match command {
        Command::Position {
            lower,
            upper,
            entry,
            current,
            principal,
            withdraw,
            json,
        } => {
            let params = position_params(
                &config.position,
                [lower, upper, entry, current, principal, withdraw],
            );
            params
                .check_preconditions()
                .context("Invalid position parameters")?;

            info!(
                lower = params.lower_price,
                upper = params.upper_price,
                entry = params.entry_price,
                "Computing position"
            );
            let result = compute_liquidity(&params);
            if result.is_degenerate() {
                warn!("Entry price matches the upper bound, position has zero liquidity");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for card in position_cards(&result, &config.display) {
                    println!("{}", card);
                }
            }
        }
        Command::Payoff {
            price,
            nudge,
            view,
            json,
        } => {
            let mut input = PriceInput::new(&config.price_control);
            if let Some(raw) = price {
                input.set_text(&raw)?;
            }
            input.nudge(nudge);

            let params = config.payoff.to_params();
            let chart = PayoffChart::new(&params, &config.price_control);
            let payoff = compute_payoff(input.price(), &params);
            info!(price = payoff.price, pnl = payoff.pnl, "Computed payoff");

            if !view.uses_payoff() {
                warn!(
                    "{} is not driven by the payoff model, showing trader PnL",
                    view.label()
                );
            }

            if json {
                let export = PayoffExport::new(view, payoff, &chart);
                println!("{}", serde_json::to_string_pretty(&export)?);
            } else if view == Visualization::BorrowedTickPayoff {
                println!("{}", payoff_card(&payoff, &config.display));
            } else {
                println!("{}", trader_pnl_card(&payoff, &chart, &config.display));
            }
        }
        Command::Describe => {
            for view in Visualization::ALL {
                println!("{:<22} {}", view.label(), view.description());
            }
        }
        Command::ShowConfig => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

/// Overlay command-line values onto the configured position defaults
fn position_params(defaults: &PositionConfig, overrides: [Option<f64>; 6]) -> PositionParams {
    let [lower, upper, entry, current, principal, withdraw] = overrides;
    PositionParams {
        lower_price: lower.unwrap_or(defaults.lower_price),
        upper_price: upper.unwrap_or(defaults.upper_price),
        entry_price: entry.unwrap_or(defaults.entry_price),
        current_price: current.unwrap_or(defaults.current_price),
        initial_principal: principal.unwrap_or(defaults.initial_principal),
        withdraw_price: withdraw.unwrap_or(defaults.withdraw_price),
    }
}
