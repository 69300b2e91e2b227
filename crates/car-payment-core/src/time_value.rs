use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::CarPaymentError;
use crate::types::{Money, Months, Rate};
use crate::CarPaymentResult;

/// Discount factor `(1 + rate)^(-nper)`.
///
/// When `(1 + rate)^nper` grows past the decimal range its reciprocal is
/// below the smallest representable step, so the factor is reported as
/// `Some(0)`. When the factor itself grows past the range (shrinking base over
/// a positive term, or growing base over a negative one) it is `None`.
pub fn discount_factor(rate: Rate, nper: Months) -> CarPaymentResult<Option<Decimal>> {
    let one_plus_r = Decimal::ONE + rate;

    if one_plus_r.is_zero() && nper > 0 {
        return Err(CarPaymentError::DivisionByZero {
            context: format!("discount factor (1 + rate is zero over {nper} periods)"),
        });
    }

    let exponent = nper.checked_neg().ok_or_else(|| CarPaymentError::ArithmeticOverflow {
        context: format!("discount factor exponent for {nper} periods"),
    })?;

    let growing = one_plus_r.abs() > Decimal::ONE;
    let shrinking = one_plus_r.abs() < Decimal::ONE;
    match one_plus_r.checked_powi(exponent) {
        Some(factor) => Ok(Some(factor)),
        None if nper > 0 && growing => Ok(Some(Decimal::ZERO)),
        None if (nper > 0 && shrinking) || (nper < 0 && growing) => Ok(None),
        None => Err(CarPaymentError::ArithmeticOverflow {
            context: format!("discount factor (1 + {rate})^{exponent}"),
        }),
    }
}

/// Level periodic payment that amortizes `principal` to zero over `nper`
/// periods at `rate` per period.
///
/// Positive principal yields a positive payment. A zero rate falls back to
/// straight-line division. A discount factor beyond the decimal range drives
/// the annuity denominator to infinity and the payment to zero.
pub fn level_payment(principal: Money, rate: Rate, nper: Months) -> CarPaymentResult<Money> {
    if rate.is_zero() {
        if nper == 0 {
            return Err(CarPaymentError::DivisionByZero {
                context: "level payment (zero rate over zero periods)".into(),
            });
        }
        return Ok(principal / Decimal::from(nper));
    }

    let Some(factor) = discount_factor(rate, nper)? else {
        return Ok(Decimal::ZERO);
    };

    let annuity_denominator = Decimal::ONE - factor;
    if annuity_denominator.is_zero() {
        return Err(CarPaymentError::DivisionByZero {
            context: format!("level payment annuity denominator ({nper} periods)"),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(annuity_denominator))
        .ok_or_else(|| CarPaymentError::ArithmeticOverflow {
            context: "level payment".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_discount_factor_basic() {
        let df = discount_factor(dec!(0.10), 2).unwrap().unwrap();
        // 1 / 1.21 ≈ 0.8264
        assert!((df - dec!(0.8264)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_discount_factor_zero_periods_is_one() {
        assert_eq!(discount_factor(dec!(0.05), 0).unwrap(), Some(Decimal::ONE));
    }

    #[test]
    fn test_discount_factor_rate_of_minus_one() {
        let err = discount_factor(dec!(-1), 12).unwrap_err();
        assert!(matches!(err, CarPaymentError::DivisionByZero { .. }));
    }

    #[test]
    fn test_discount_factor_far_horizon_underflows_to_zero() {
        let df = discount_factor(dec!(0.5), 100_000).unwrap();
        assert_eq!(df, Some(Decimal::ZERO));
    }

    #[test]
    fn test_discount_factor_shrinking_base_is_unbounded() {
        // 0.5^-200 is far beyond the decimal range
        assert_eq!(discount_factor(dec!(-0.5), 200).unwrap(), None);
    }

    #[test]
    fn test_discount_factor_negative_term_growing_base_is_unbounded() {
        assert_eq!(discount_factor(dec!(0.5), -100_000).unwrap(), None);
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let p = level_payment(dec!(1200), Decimal::ZERO, 12).unwrap();
        assert_eq!(p, dec!(100));
    }

    #[test]
    fn test_level_payment_zero_rate_zero_periods() {
        let err = level_payment(dec!(1200), Decimal::ZERO, 0).unwrap_err();
        assert!(matches!(err, CarPaymentError::DivisionByZero { .. }));
    }

    #[test]
    fn test_level_payment_nonzero_rate_zero_periods() {
        // 1 - (1 + r)^0 = 0
        let err = level_payment(dec!(1200), dec!(0.01), 0).unwrap_err();
        assert!(matches!(err, CarPaymentError::DivisionByZero { .. }));
    }

    #[test]
    fn test_level_payment_standard_annuity() {
        // 100k over 360 months at 0.5%: textbook 599.55
        let p = level_payment(dec!(100_000), dec!(0.005), 360).unwrap();
        assert!((p - dec!(599.55)).abs() < dec!(0.01));
    }

    #[test]
    fn test_level_payment_far_horizon_is_interest_only() {
        let p = level_payment(dec!(1000), dec!(0.5), 100_000).unwrap();
        assert_eq!(p, dec!(500));
    }

    #[test]
    fn test_level_payment_unbounded_factor_pays_nothing() {
        let p = level_payment(dec!(10_000), dec!(-0.5), 200).unwrap();
        assert_eq!(p, Decimal::ZERO);
    }
}
