use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use car_payment_core::auto_loan::{self, AutoLoanInput};
use car_payment_core::Months;

use crate::input;
use crate::OutputFormat;

#[derive(Args)]
pub struct QuoteArgs {
    /// Path to a JSON file describing the loan
    #[arg(long)]
    pub input: Option<String>,

    /// Vehicle price
    #[arg(long, allow_hyphen_values = true)]
    pub vehicle_price: Option<Decimal>,

    /// Annual interest rate in percent (5 = 5%)
    #[arg(long, allow_hyphen_values = true)]
    pub apr: Option<Decimal>,

    /// Loan term in months
    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<Months>,

    /// Down payment
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub down_payment: Decimal,

    /// Trade-in value
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub trade_in: Decimal,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub output: OutputFormat,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: AutoLoanInput = if let Some(ref path) = args.input {
        debug!("reading loan from {path}");
        input::file::read_json(path)?
    } else if let (Some(vehicle_price), Some(apr), Some(term)) =
        (args.vehicle_price, args.apr, args.term)
    {
        debug!("reading loan from flags");
        AutoLoanInput {
            vehicle_price,
            apr,
            loan_term_months: term,
            down_payment: args.down_payment,
            trade_in_value: args.trade_in,
        }
    } else if let Some(piped) = input::stdin::read_stdin()? {
        debug!("reading loan from stdin");
        piped
    } else {
        return Err(
            "--input <file.json>, --vehicle-price/--apr/--term, or stdin required for a quote"
                .into(),
        );
    };

    let result = auto_loan::calculate_monthly_payment(&loan)?;
    Ok(serde_json::to_value(result)?)
}
