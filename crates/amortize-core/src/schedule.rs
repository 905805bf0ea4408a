//! Loan amortization schedule with optional yearly extra principal payments.
//!
//! Builds a month-by-month level-payment schedule from a principal, annual
//! rate, and term, applying an optional extra principal payment every 12th
//! month. All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AmortizeError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::AmortizeResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Months per year.
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Balance below this is considered paid off.
const PAYOFF_EPSILON: Decimal = dec!(0.000001);

/// Iteration headroom beyond the nominal term. Bounds the simulation loop
/// for numerically degenerate inputs.
const ITERATION_HEADROOM: u32 = 1200;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan terms for a schedule calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Original loan amount.
    pub principal: Money,
    /// Annual interest rate in percent (5.0 = 5%). Zero means interest-free.
    pub annual_rate_pct: Rate,
    /// Nominal loan length in months.
    pub term_months: u32,
    /// Extra principal payment every 12th month, as a percent of the
    /// original loan amount. Fixed in money terms; not recomputed against
    /// the shrinking balance.
    #[serde(default)]
    pub yearly_extra_pct: Rate,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single month in the amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Month number (1-indexed).
    pub month: u32,
    /// Amount charged this month. Equals the level payment except on the
    /// final month, where it shrinks to exactly clear the balance.
    pub monthly_payment: Money,
    /// Principal portion of the regular payment.
    pub principal: Money,
    /// Interest portion of the regular payment.
    pub interest: Money,
    /// Extra principal applied this month, zero unless the month is a
    /// multiple of 12 and a balance remains.
    pub extra_payment: Money,
    /// Balance after regular and extra principal payments.
    pub remaining_balance: Money,
}

/// Full schedule with summary figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    /// Monthly payment records, ordered by month.
    pub payments: Vec<PaymentRecord>,
    /// Sum of all interest portions.
    pub total_interest: Money,
    /// Number of months until the balance reached zero.
    pub months_to_repay: u32,
    /// Nominal term in years minus actual repayment time in years,
    /// clamped at zero.
    pub years_saved: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the amortization schedule for a loan.
pub fn build_schedule(input: &LoanInput) -> AmortizeResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();

    let (output, warnings) = compute_schedule(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Amortization with Annual Extra Principal",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Nominal level payment for a loan, per the standard annuity formula.
/// Straight-line when the rate is zero.
pub fn level_payment(
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
) -> AmortizeResult<Money> {
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(term_months));
    }

    let one_plus_r = Decimal::ONE + monthly_rate;
    let factor = one_plus_r.powi(term_months as i64);
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(AmortizeError::DivisionByZero {
            context: "level payment annuity factor".into(),
        });
    }

    Ok(principal * monthly_rate * factor / denominator)
}

// ---------------------------------------------------------------------------
// Schedule simulation
// ---------------------------------------------------------------------------

fn compute_schedule(input: &LoanInput) -> AmortizeResult<(ScheduleOutput, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();
    validate_loan(input)?;

    let monthly_rate = input.annual_rate_pct / dec!(100) / MONTHS_PER_YEAR;
    let payment = level_payment(input.principal, monthly_rate, input.term_months)?;
    let extra_amount = input.principal * input.yearly_extra_pct / dec!(100);

    let cap = input.term_months.saturating_add(ITERATION_HEADROOM);

    let mut balance = input.principal;
    let mut payments = Vec::with_capacity(input.term_months as usize);
    let mut total_interest = Decimal::ZERO;

    for month in 1..=cap {
        let interest = balance * monthly_rate;
        total_interest += interest;

        let mut principal_portion = payment - interest;
        let mut monthly_payment = payment;

        // Final regular payment: charge only what clears the balance.
        if balance <= principal_portion + PAYOFF_EPSILON {
            principal_portion = balance;
            monthly_payment = interest + principal_portion;
        }

        balance -= principal_portion;

        let mut extra_payment = Decimal::ZERO;
        if month % 12 == 0 && extra_amount > Decimal::ZERO && balance > Decimal::ZERO {
            if balance < extra_amount {
                extra_payment = balance;
                balance = Decimal::ZERO;
            } else {
                extra_payment = extra_amount;
                balance -= extra_payment;
            }
        }

        payments.push(PaymentRecord {
            month,
            monthly_payment,
            principal: principal_portion,
            interest,
            extra_payment,
            remaining_balance: balance,
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    if balance > Decimal::ZERO {
        warnings.push(format!(
            "Iteration cap of {} months reached with {} still outstanding; inputs do not converge",
            cap, balance
        ));
    }

    let months_to_repay = payments.len() as u32;
    let years_saved = years_saved(input.term_months, months_to_repay);

    Ok((
        ScheduleOutput {
            payments,
            total_interest,
            months_to_repay,
            years_saved,
        },
        warnings,
    ))
}

fn years_saved(term_months: u32, months_to_repay: u32) -> Decimal {
    let saved = (Decimal::from(term_months) - Decimal::from(months_to_repay)) / MONTHS_PER_YEAR;
    if saved < Decimal::ZERO {
        Decimal::ZERO
    } else {
        saved
    }
}

fn validate_loan(input: &LoanInput) -> AmortizeResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if input.term_months == 0 {
        return Err(AmortizeError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    if input.yearly_extra_pct < Decimal::ZERO || input.yearly_extra_pct > dec!(100) {
        return Err(AmortizeError::InvalidInput {
            field: "yearly_extra_pct".into(),
            reason: "Yearly extra payment must be between 0 and 100 percent".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_level_payment_standard() {
        // 10k at 5% over 60 months: classic PMT ≈ 188.71
        let rate = dec!(5) / dec!(100) / dec!(12);
        let payment = level_payment(dec!(10000), rate, 60).unwrap();
        assert!((payment - dec!(188.71)).abs() < dec!(0.01));
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let payment = level_payment(dec!(1200), Decimal::ZERO, 12).unwrap();
        assert_eq!(payment, dec!(100));
    }

    #[test]
    fn test_validate_rejects_nonpositive_principal() {
        let input = LoanInput {
            principal: Decimal::ZERO,
            annual_rate_pct: dec!(5),
            term_months: 60,
            yearly_extra_pct: Decimal::ZERO,
        };
        assert!(matches!(
            build_schedule(&input),
            Err(AmortizeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_extra() {
        let input = LoanInput {
            principal: dec!(10000),
            annual_rate_pct: dec!(5),
            term_months: 60,
            yearly_extra_pct: dec!(150),
        };
        assert!(matches!(
            build_schedule(&input),
            Err(AmortizeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_years_saved_clamps_at_zero() {
        assert_eq!(years_saved(60, 60), Decimal::ZERO);
        assert_eq!(years_saved(60, 72), Decimal::ZERO);
        assert_eq!(years_saved(60, 48), Decimal::ONE);
    }
}
