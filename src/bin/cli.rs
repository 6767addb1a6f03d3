//! Kelly Planner CLI - position sizing from the command line

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use kelly_planner::error::{validate_funds, validate_price, validate_win_probability};
use kelly_planner::report::{self, Note};
use kelly_planner::{KellyMultiplier, PlannerConfig, PositionSizer, SizingError, TradeParameters};

#[derive(Parser)]
#[command(name = "kelly-planner")]
#[command(author, version, about = "Kelly criterion position sizing", long_about = None)]
struct Cli {
    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Available funds [default: 1000000, or KELLY_PLANNER_FUNDS]
    #[arg(long, value_parser = parse_funds)]
    funds: Option<f64>,

    /// Entry price [default: 2.795]
    #[arg(long, value_parser = parse_entry)]
    entry: Option<f64>,

    /// Target (take-profit) price [default: 3.119]
    #[arg(long, value_parser = parse_target)]
    target: Option<f64>,

    /// Stop-loss price [default: 2.498]
    #[arg(long, value_parser = parse_stop)]
    stop: Option<f64>,

    /// Win probability in percent, 1-99 [default: 80]
    #[arg(short = 'w', long, value_parser = parse_win_rate)]
    win_rate: Option<u8>,

    /// Kelly fraction: quarter, half, full (or 0.25, 0.5, 1.0) [default: full, or KELLY_PLANNER_MULTIPLIER]
    #[arg(short, long)]
    kelly: Option<KellyMultiplier>,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "interactive")]
    json: bool,

    /// Enable debug logging (overrides KELLY_PLANNER_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags layered over the configured defaults
    fn trade_parameters(&self, defaults: &TradeParameters) -> TradeParameters {
        TradeParameters {
            funds: self.funds.unwrap_or(defaults.funds),
            entry_price: self.entry.unwrap_or(defaults.entry_price),
            target_price: self.target.unwrap_or(defaults.target_price),
            stop_price: self.stop.unwrap_or(defaults.stop_price),
            win_probability_percent: self.win_rate.unwrap_or(defaults.win_probability_percent),
            kelly_multiplier: self.kelly.unwrap_or(defaults.kelly_multiplier),
        }
    }
}

fn parse_funds(s: &str) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|e| format!("{}", e))?;
    validate_funds(value).map_err(|e| e.to_string())
}

fn parse_price(field: &'static str, s: &str) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|e| format!("{}", e))?;
    validate_price(field, value).map_err(|e| e.to_string())
}

fn parse_entry(s: &str) -> Result<f64, String> {
    parse_price("Entry", s)
}

fn parse_target(s: &str) -> Result<f64, String> {
    parse_price("Target", s)
}

fn parse_stop(s: &str) -> Result<f64, String> {
    parse_price("Stop-loss", s)
}

fn parse_win_rate(s: &str) -> Result<u8, String> {
    let value: u32 = s.trim().parse().map_err(|e| format!("{}", e))?;
    validate_win_probability(value).map_err(|e| e.to_string())
}

fn init_logging(filter: &str) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PlannerConfig::from_env();

    let filter = if cli.verbose {
        "debug"
    } else {
        config.log_filter.as_str()
    };
    init_logging(filter)?;
    config.report_rejected();
    debug!(defaults = ?config.defaults, "configuration loaded");

    if cli.interactive {
        return run_interactive(&config.defaults);
    }

    let params = cli.trade_parameters(&config.defaults);
    info!(?params, "sizing position");

    let ok = if cli.json {
        print_json(&params)?
    } else {
        println!("{}", "Kelly Criterion Planner".cyan().bold());
        println!();
        print_plan(&params)
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

/// Print the plan as JSON; returns false on an invalid price configuration
fn print_json(params: &TradeParameters) -> Result<bool> {
    let sizer = PositionSizer::new();
    let output = match sizer.compute(params) {
        Ok(result) => serde_json::json!({
            "params": params,
            "result": result,
            "advice": result.advice(),
        }),
        Err(err) => serde_json::json!({
            "params": params,
            "error": error_code(&err),
            "message": err.to_string(),
        }),
    };

    let ok = output.get("error").is_none();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to serialize result")?
    );
    Ok(ok)
}

fn error_code(err: &SizingError) -> &'static str {
    match err {
        SizingError::InvalidPriceConfiguration { .. } => "invalid_price_configuration",
    }
}

/// Print the plan report; returns false on an invalid price configuration
fn print_plan(params: &TradeParameters) -> bool {
    println!(
        "{}: {} | entry {:.3} / target {:.3} / stop {:.3} | win {}%",
        "Parameters / 参数".yellow().bold(),
        report::format_currency(params.funds),
        params.entry_price,
        params.target_price,
        params.stop_price,
        params.win_probability_percent
    );
    println!();

    let result = match PositionSizer::new().compute(params) {
        Ok(result) => result,
        Err(err) => {
            println!("{}", report::error_message(&err).red().bold());
            return false;
        }
    };

    println!("{}", report::render(&result));
    println!();

    for note in report::notes(params, &result) {
        match note {
            Note::NegativeEdge => println!("{}", note.to_string().yellow().bold()),
            Note::PracticalCap { .. } => println!("{}", note.to_string().blue()),
            Note::TruncatedShares { .. } => println!("{}", note.to_string().dimmed()),
        }
    }

    true
}

fn run_interactive(defaults: &TradeParameters) -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!("Press Enter to accept the value shown in brackets.\n");

    let theme = ColorfulTheme::default();
    let mut current = defaults.clone();

    loop {
        let funds: f64 = Input::with_theme(&theme)
            .with_prompt("Available Funds / 可用资金")
            .default(current.funds)
            .validate_with(|v: &f64| validate_funds(*v).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;

        println!("{}", "Price Levels / 价格位".yellow());
        let entry = prompt_price(&theme, "Entry Price / 入场价", "Entry", current.entry_price)?;
        let target = prompt_price(&theme, "Target Price / 止盈价", "Target", current.target_price)?;
        let stop = prompt_price(&theme, "Stop-Loss / 止损价", "Stop-loss", current.stop_price)?;

        let win_rate: u32 = Input::with_theme(&theme)
            .with_prompt("Win Probability (%) / 预测胜率")
            .default(u32::from(current.win_probability_percent))
            .validate_with(|v: &u32| {
                validate_win_probability(*v)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;

        let labels: Vec<String> = KellyMultiplier::ALL.iter().map(|m| m.to_string()).collect();
        let default_idx = KellyMultiplier::ALL
            .iter()
            .position(|m| *m == current.kelly_multiplier)
            .unwrap_or(0);
        let selection = Select::with_theme(&theme)
            .with_prompt("Kelly Fraction / 凯利比例")
            .items(&labels)
            .default(default_idx)
            .interact()?;

        current = TradeParameters::new(
            funds,
            entry,
            target,
            stop,
            win_rate,
            KellyMultiplier::ALL[selection],
        )?;

        println!();
        print_plan(&current);
        println!();

        let again = Select::with_theme(&theme)
            .with_prompt("Calculate again?")
            .items(&["Yes", "No"])
            .default(0)
            .interact()?
            == 0;

        if !again {
            println!("Goodbye!");
            break;
        }
    }

    Ok(())
}

fn prompt_price(
    theme: &ColorfulTheme,
    prompt: &str,
    field: &'static str,
    default: f64,
) -> Result<f64> {
    let value = Input::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .validate_with(move |v: &f64| {
            validate_price(field, *v)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(value)
}
