use clap::Args;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use thiserror::Error;

use car_payment_core::auto_loan::{self, AutoLoanInput};
use car_payment_core::CarPaymentError;

use crate::input::console::{Console, ConsoleValue, Field, InputError, Reply};

pub const BANNER: &str = "Monthly Car Payment Calculator";

pub const VEHICLE_PRICE: Field = Field {
    name: "vehicle price",
    prompt: "Enter the vehicle price: $",
};
pub const APR: Field = Field {
    name: "annual interest rate",
    prompt: "Enter the annual interest rate (%): ",
};
pub const LOAN_TERM: Field = Field {
    name: "loan term",
    prompt: "Enter the loan term (in months): ",
};
pub const DOWN_PAYMENT: Field = Field {
    name: "down payment",
    prompt: "Enter the down payment: $",
};
pub const TRADE_IN: Field = Field {
    name: "trade-in value",
    prompt: "Enter the trade-in value: $",
};

#[derive(Args, Debug, Clone, Default)]
pub struct InteractiveArgs {
    /// Stop after this many calculations instead of running until input ends
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<u64>,

    /// Re-prompt on an unparseable answer instead of exiting
    #[arg(long)]
    pub retry_invalid: bool,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Calculation(#[from] CarPaymentError),

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// The prompt/compute/print loop.
pub struct Session<R, W> {
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>) -> Self {
        Self { console }
    }

    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Print the banner, then price loans until input ends, a quit word is
    /// typed, or `max_iterations` calculations have completed. Returns the
    /// number of completed calculations.
    pub fn run(&mut self, max_iterations: Option<u64>) -> Result<u64, SessionError> {
        self.print_banner()?;

        let mut completed = 0;
        while max_iterations.map_or(true, |max| completed < max) {
            let Some(input) = self.read_entry()? else {
                break;
            };

            let output = auto_loan::calculate_monthly_payment(&input)?;
            for w in &output.warnings {
                warn!("{w}");
            }
            debug!(
                "loan {} at {} over {} months -> {}",
                output.result.loan_amount,
                output.result.monthly_rate,
                input.loan_term_months,
                output.result.monthly_payment
            );

            self.print_payment(output.result.rounded_payment)?;
            completed += 1;
        }

        Ok(completed)
    }

    fn print_banner(&mut self) -> io::Result<()> {
        let w = self.console.writer();
        writeln!(w)?;
        writeln!(w, "{BANNER}")?;
        writeln!(w)?;
        w.flush()
    }

    fn print_payment(&mut self, rounded: Decimal) -> io::Result<()> {
        let w = self.console.writer();
        writeln!(w)?;
        writeln!(w, "Your estimated monthly payment is: ${rounded:.2}")?;
        writeln!(w)?;
        w.flush()
    }

    /// Read one full loan entry. `None` means the session should end cleanly.
    fn read_entry(&mut self) -> Result<Option<AutoLoanInput>, SessionError> {
        // End of input is only clean before the first field of an entry.
        let vehicle_price = match self.console.ask::<Decimal>(&VEHICLE_PRICE)? {
            Reply::Value(v) => v,
            Reply::Quit | Reply::Closed => return Ok(None),
        };
        let Some(apr) = self.answer::<Decimal>(&APR)? else {
            return Ok(None);
        };
        let Some(loan_term_months) = self.answer::<i64>(&LOAN_TERM)? else {
            return Ok(None);
        };
        let Some(down_payment) = self.answer::<Decimal>(&DOWN_PAYMENT)? else {
            return Ok(None);
        };
        let Some(trade_in_value) = self.answer::<Decimal>(&TRADE_IN)? else {
            return Ok(None);
        };

        Ok(Some(AutoLoanInput {
            vehicle_price,
            apr,
            loan_term_months,
            down_payment,
            trade_in_value,
        }))
    }

    fn answer<T: ConsoleValue>(&mut self, field: &Field) -> Result<Option<T>, SessionError> {
        match self.console.ask(field)? {
            Reply::Value(v) => Ok(Some(v)),
            Reply::Quit => Ok(None),
            Reply::Closed => Err(InputError::UnexpectedEof { field: field.name }.into()),
        }
    }
}

pub fn run_interactive(args: InteractiveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock()).retry_invalid(args.retry_invalid);

    let completed = Session::new(console).run(args.max_iterations)?;
    debug!("session ended after {completed} calculation(s)");
    Ok(())
}
