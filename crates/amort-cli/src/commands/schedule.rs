use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amort_core::context::LoanContext;
use amort_core::engine::LoanRequest;
use amort_core::frequency::Frequency;
use amort_core::operators::{FeeOptions, InterestRateOptions};

use crate::input;

/// Arguments for schedule calculation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal interest rate as a decimal (0.06 = 6%)
    #[arg(long, allow_hyphen_values = true)]
    pub interest_rate: Option<Decimal>,

    /// Frequency the nominal rate is quoted in
    #[arg(long, default_value = "yearly")]
    pub interest_rate_frequency: Frequency,

    /// Loan term
    #[arg(long)]
    pub term: Option<Decimal>,

    /// Frequency the term is quoted in
    #[arg(long, default_value = "yearly")]
    pub term_frequency: Frequency,

    /// Repayment period granularity
    #[arg(long, default_value = "monthly")]
    pub repayment_frequency: Frequency,

    /// One-off fee charged in period 1
    #[arg(long)]
    pub upfront_fee: Option<Decimal>,

    /// Recurring fee amount
    #[arg(long)]
    pub ongoing_fee: Option<Decimal>,

    /// First period the ongoing fee applies to
    #[arg(long)]
    pub fee_start_period: Option<u32>,

    /// Last period the ongoing fee applies to (open-ended if omitted)
    #[arg(long)]
    pub fee_end_period: Option<u32>,

    /// Frequency the ongoing fee is quoted in
    #[arg(long)]
    pub ongoing_fee_frequency: Option<Frequency>,

    /// Introductory interest rate as a decimal
    #[arg(long, allow_hyphen_values = true)]
    pub intro_rate: Option<Decimal>,

    /// First period of the introductory rate
    #[arg(long)]
    pub intro_rate_start_period: Option<u32>,

    /// Last period of the introductory rate (open-ended if omitted)
    #[arg(long)]
    pub intro_rate_end_period: Option<u32>,
}

/// Assemble a loan request from file, piped stdin or individual flags,
/// in that order of precedence.
pub fn build_request(args: &ScheduleArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::read_file(path);
    }
    if let Some(data) = input::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }

    let context = LoanContext {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        interest_rate: args
            .interest_rate
            .ok_or("--interest-rate is required (or provide --input)")?,
        interest_rate_frequency: args.interest_rate_frequency,
        term: args.term.ok_or("--term is required (or provide --input)")?,
        term_frequency: args.term_frequency,
        repayment_frequency: args.repayment_frequency,
    };

    let fee = if args.upfront_fee.is_some() || args.ongoing_fee.is_some() {
        Some(FeeOptions {
            upfront_fee: args.upfront_fee,
            ongoing_fee: args.ongoing_fee,
            start_period: args.fee_start_period,
            end_period: args.fee_end_period,
            ongoing_fee_frequency: args.ongoing_fee_frequency,
        })
    } else {
        None
    };

    let interest_rate = args.intro_rate.map(|rate| InterestRateOptions {
        interest_rate: Some(rate),
        interest_rate_frequency: None,
        start_period: args.intro_rate_start_period,
        end_period: args.intro_rate_end_period,
    });

    Ok(LoanRequest {
        context,
        fee,
        interest_rate,
    })
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(&args)?;
    let engine = request.into_engine()?;
    let result = engine.calculate()?;
    Ok(serde_json::to_value(result)?)
}
