use clap::Args;
use serde_json::Value;

use crate::commands::schedule::{self, ScheduleArgs};

/// Arguments for per-period context inspection
#[derive(Args)]
pub struct ContextArgs {
    /// Period to resolve the context at (1-indexed)
    #[arg(long)]
    pub period: u32,

    #[command(flatten)]
    pub loan: ScheduleArgs,
}

pub fn run_context(args: ContextArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = schedule::build_request(&args.loan)?;
    let engine = request.into_engine()?;
    let context = engine.context_at(args.period)?;
    Ok(serde_json::to_value(context)?)
}
