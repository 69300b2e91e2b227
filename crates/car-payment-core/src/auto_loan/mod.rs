pub mod payment;

pub use payment::{
    calculate_monthly_payment, loan_amount, monthly_payment, monthly_rate, round_to_cents,
    AutoLoanInput, AutoLoanOutput,
};
