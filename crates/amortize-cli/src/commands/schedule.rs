use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amortize_core::schedule::{self, LoanInput};

use crate::input;

/// Arguments for schedule calculation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5.0)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan period in months
    #[arg(long, alias = "term")]
    pub term_months: Option<u32>,

    /// Yearly extra payment as a percent of the loan amount,
    /// paid every 12th month towards principal
    #[arg(long, default_value = "0")]
    pub extra_pct: Decimal,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate
                .ok_or("--rate is required (or provide --input)")?,
            term_months: args.term_months
                .ok_or("--term-months is required (or provide --input)")?,
            yearly_extra_pct: args.extra_pct,
        }
    };

    let result = schedule::build_schedule(&loan)?;
    Ok(serde_json::to_value(result)?)
}
