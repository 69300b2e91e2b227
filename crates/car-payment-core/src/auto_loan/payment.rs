use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value;
use crate::{types::*, CarPaymentError, CarPaymentResult};

/// Annual percentage points to a monthly fractional rate: 12 months * 100.
const APR_TO_MONTHLY_DIVISOR: Decimal = dec!(1200);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoLoanInput {
    pub vehicle_price: Money,
    /// Annual percentage rate in percent units (5.0 = 5%).
    pub apr: Decimal,
    pub loan_term_months: Months,
    #[serde(default)]
    pub down_payment: Money,
    #[serde(default)]
    pub trade_in_value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoLoanOutput {
    /// Price less down payment and trade-in. May be negative.
    pub loan_amount: Money,
    pub monthly_rate: Rate,
    /// Full-precision level payment.
    pub monthly_payment: Money,
    /// `monthly_payment` rounded to cents for display.
    pub rounded_payment: Money,
    /// `None` when the total falls outside the decimal range.
    pub total_of_payments: Option<Money>,
    pub total_interest: Option<Money>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert an APR in percent to the monthly compounding rate.
pub fn monthly_rate(apr: Decimal) -> Rate {
    apr / APR_TO_MONTHLY_DIVISOR
}

/// Principal to be financed after the down payment and trade-in.
pub fn loan_amount(
    vehicle_price: Money,
    down_payment: Money,
    trade_in_value: Money,
) -> CarPaymentResult<Money> {
    vehicle_price
        .checked_sub(down_payment)
        .and_then(|m| m.checked_sub(trade_in_value))
        .ok_or_else(|| CarPaymentError::ArithmeticOverflow {
            context: "loan amount".into(),
        })
}

/// Fixed monthly payment for a vehicle loan.
///
/// Zero APR divides the loan amount evenly across the term; otherwise the
/// standard level-payment annuity formula applies. Nothing is validated: a
/// negative loan amount gives a negative payment, and a zero term is a
/// `DivisionByZero` error.
pub fn monthly_payment(
    vehicle_price: Money,
    apr: Decimal,
    loan_term_months: Months,
    down_payment: Money,
    trade_in_value: Money,
) -> CarPaymentResult<Money> {
    let principal = loan_amount(vehicle_price, down_payment, trade_in_value)?;
    time_value::level_payment(principal, monthly_rate(apr), loan_term_months)
}

/// Round to whole cents, ties to even.
pub fn round_to_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Price a vehicle loan and wrap the result in the standard envelope.
pub fn calculate_monthly_payment(
    input: &AutoLoanInput,
) -> CarPaymentResult<ComputationOutput<AutoLoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let principal = loan_amount(input.vehicle_price, input.down_payment, input.trade_in_value)?;
    let rate = monthly_rate(input.apr);

    if principal < Decimal::ZERO {
        warnings.push(format!(
            "Down payment and trade-in exceed the vehicle price by {}; the payment is negative.",
            -principal
        ));
    } else if principal.is_zero() {
        warnings.push("Nothing left to finance after down payment and trade-in.".into());
    }
    if input.apr < Decimal::ZERO {
        warnings.push("Negative APR applied as given.".into());
    }
    if input.loan_term_months < 0 {
        warnings.push("Negative loan term applied as given.".into());
    }

    let payment = time_value::level_payment(principal, rate, input.loan_term_months)?;

    let total_of_payments = payment.checked_mul(Decimal::from(input.loan_term_months));
    let total_interest = total_of_payments.and_then(|total| total.checked_sub(principal));
    if total_interest.is_none() {
        warnings.push("Loan totals exceed the decimal range and are omitted.".into());
    }

    let output = AutoLoanOutput {
        loan_amount: principal,
        monthly_rate: rate,
        monthly_payment: payment,
        rounded_payment: round_to_cents(payment),
        total_of_payments,
        total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let methodology = if rate.is_zero() {
        "Auto loan level payment (zero-rate straight-line)"
    } else {
        "Auto loan level payment (monthly-compounded annuity)"
    };

    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_input() -> AutoLoanInput {
        AutoLoanInput {
            vehicle_price: dec!(20_000),
            apr: dec!(6),
            loan_term_months: 36,
            down_payment: dec!(2_000),
            trade_in_value: dec!(1_000),
        }
    }

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_loan_amount_nets_down_payment_and_trade_in() {
        let amount = loan_amount(dec!(20_000), dec!(2_000), dec!(1_000)).unwrap();
        assert_eq!(amount, dec!(17_000));
    }

    #[test]
    fn test_round_to_cents_ties_to_even() {
        assert_eq!(round_to_cents(dec!(0.125)), dec!(0.12));
        assert_eq!(round_to_cents(dec!(0.135)), dec!(0.14));
        assert_eq!(round_to_cents(dec!(416.666666)), dec!(416.67));
    }

    #[test]
    fn test_envelope_result_fields() {
        let out = calculate_monthly_payment(&base_input()).unwrap();
        let r = &out.result;
        assert_eq!(r.loan_amount, dec!(17_000));
        assert_eq!(r.monthly_rate, dec!(0.005));
        assert_eq!(r.rounded_payment, dec!(517.17));
        let total = r.monthly_payment * dec!(36);
        assert_eq!(r.total_of_payments, Some(total));
        assert_eq!(r.total_interest, Some(total - dec!(17_000)));
        assert!(out.warnings.is_empty());
        assert!(out.methodology.contains("annuity"));
    }

    #[test]
    fn test_envelope_echoes_input_as_assumptions() {
        let out = calculate_monthly_payment(&base_input()).unwrap();
        assert_eq!(out.assumptions["loan_term_months"], 36);
        assert_eq!(out.assumptions["vehicle_price"], "20000");
    }

    #[test]
    fn test_zero_rate_methodology_and_no_interest() {
        let mut input = base_input();
        input.apr = Decimal::ZERO;
        let out = calculate_monthly_payment(&input).unwrap();
        assert!(out.methodology.contains("straight-line"));
        let interest = out.result.total_interest.unwrap();
        assert!(interest.abs() < dec!(0.000001));
    }

    #[test]
    fn test_warnings_for_negative_principal_and_apr() {
        let mut input = base_input();
        input.down_payment = dec!(25_000);
        input.apr = dec!(-1);
        let out = calculate_monthly_payment(&input).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert!(out.result.monthly_payment < Decimal::ZERO);
    }

    #[test]
    fn test_oversized_totals_are_omitted_not_fatal() {
        let input = AutoLoanInput {
            vehicle_price: Decimal::from_scientific("1e27").unwrap(),
            apr: dec!(120),
            loan_term_months: 1000,
            down_payment: Decimal::ZERO,
            trade_in_value: Decimal::ZERO,
        };
        let out = calculate_monthly_payment(&input).unwrap();
        // 1.1^1000 is beyond range, so the payment is interest-only.
        assert_eq!(out.result.monthly_payment, Decimal::from_scientific("1e26").unwrap());
        assert_eq!(out.result.total_of_payments, None);
        assert_eq!(out.result.total_interest, None);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_zero_term_is_division_by_zero() {
        let mut input = base_input();
        input.apr = Decimal::ZERO;
        input.loan_term_months = 0;
        let err = calculate_monthly_payment(&input).unwrap_err();
        assert!(matches!(err, CarPaymentError::DivisionByZero { .. }));
    }
}
