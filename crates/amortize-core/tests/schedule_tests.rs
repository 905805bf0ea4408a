use amortize_core::schedule::{self, LoanInput, ScheduleOutput};
use amortize_core::AmortizeError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Schedule tests
// ===========================================================================

fn sample_loan() -> LoanInput {
    // 10k over five years at 5%, no extra payments
    LoanInput {
        principal: dec!(10000),
        annual_rate_pct: dec!(5),
        term_months: 60,
        yearly_extra_pct: dec!(0),
    }
}

fn build(input: &LoanInput) -> ScheduleOutput {
    schedule::build_schedule(input).unwrap().result
}

#[test]
fn test_baseline_repays_in_nominal_term() {
    let out = build(&sample_loan());

    assert_eq!(out.months_to_repay, 60);
    assert_eq!(out.payments.len(), 60);
    assert_eq!(out.years_saved, Decimal::ZERO);

    // PMT ≈ 188.71, total interest ≈ 1322.74
    let first = &out.payments[0];
    assert!((first.monthly_payment - dec!(188.71)).abs() < dec!(0.01));
    assert!((out.total_interest - dec!(1322.74)).abs() < dec!(0.5));
}

#[test]
fn test_final_balance_is_exactly_zero() {
    let out = build(&sample_loan());
    let last = out.payments.last().unwrap();
    assert_eq!(last.remaining_balance, Decimal::ZERO);

    // Zero only on the final record
    for record in &out.payments[..out.payments.len() - 1] {
        assert!(record.remaining_balance > Decimal::ZERO);
    }
}

#[test]
fn test_balance_is_non_increasing() {
    let mut loan = sample_loan();
    loan.yearly_extra_pct = dec!(10);
    let out = build(&loan);

    let mut prev = loan.principal;
    for record in &out.payments {
        assert!(
            record.remaining_balance <= prev,
            "balance rose at month {}",
            record.month
        );
        prev = record.remaining_balance;
    }
}

#[test]
fn test_interest_portions_sum_to_total() {
    let out = build(&sample_loan());
    let summed: Decimal = out.payments.iter().map(|p| p.interest).sum();
    assert_eq!(summed, out.total_interest);
}

#[test]
fn test_principal_and_interest_sum_to_payment() {
    let out = build(&sample_loan());
    for record in &out.payments {
        assert_eq!(record.principal + record.interest, record.monthly_payment);
    }
}

#[test]
fn test_no_extra_payments_without_extra_percent() {
    let out = build(&sample_loan());
    assert!(out.payments.iter().all(|p| p.extra_payment.is_zero()));
}

#[test]
fn test_extra_payments_only_on_anniversary_months() {
    let mut loan = sample_loan();
    loan.yearly_extra_pct = dec!(10);
    let out = build(&loan);

    for record in &out.payments {
        if record.month % 12 != 0 {
            assert_eq!(
                record.extra_payment,
                Decimal::ZERO,
                "extra applied at month {}",
                record.month
            );
        }
    }
}

#[test]
fn test_extra_payment_is_fixed_against_original_principal() {
    let mut loan = sample_loan();
    loan.yearly_extra_pct = dec!(10);
    let out = build(&loan);

    // 10% of 10k = 1000 at month 12 and again at month 24, regardless of
    // the balance having shrunk in between.
    let month_12 = out.payments.iter().find(|p| p.month == 12).unwrap();
    let month_24 = out.payments.iter().find(|p| p.month == 24).unwrap();
    assert_eq!(month_12.extra_payment, dec!(1000));
    assert_eq!(month_24.extra_payment, dec!(1000));
}

#[test]
fn test_extra_payments_shorten_the_loan() {
    let mut loan = sample_loan();
    loan.yearly_extra_pct = dec!(10);
    let out = build(&loan);

    assert!(out.months_to_repay < 60);
    assert!(out.years_saved > Decimal::ZERO);
    assert!(out.total_interest < build(&sample_loan()).total_interest);
}

#[test]
fn test_final_extra_payment_clamps_to_balance() {
    // 50% a year clears the loan at an anniversary; the last extra payment
    // covers whatever balance remains rather than the full fixed amount.
    let mut loan = sample_loan();
    loan.yearly_extra_pct = dec!(50);
    let out = build(&loan);

    let last = out.payments.last().unwrap();
    assert_eq!(last.month % 12, 0);
    assert!(last.extra_payment > Decimal::ZERO);
    assert!(last.extra_payment < dec!(5000));
    assert_eq!(last.remaining_balance, Decimal::ZERO);
}

#[test]
fn test_zero_rate_is_straight_line() {
    let loan = LoanInput {
        principal: dec!(12000),
        annual_rate_pct: dec!(0),
        term_months: 24,
        yearly_extra_pct: dec!(0),
    };
    let out = build(&loan);

    assert_eq!(out.months_to_repay, 24);
    for record in &out.payments {
        assert_eq!(record.interest, Decimal::ZERO);
        assert_eq!(record.principal, record.monthly_payment);
    }
    assert_eq!(out.total_interest, Decimal::ZERO);
}

#[test]
fn test_single_month_loan() {
    let loan = LoanInput {
        principal: dec!(1000),
        annual_rate_pct: dec!(0.1),
        term_months: 1,
        yearly_extra_pct: dec!(0),
    };
    let out = build(&loan);

    assert_eq!(out.months_to_repay, 1);
    let only = &out.payments[0];
    assert_eq!(only.remaining_balance, Decimal::ZERO);
    assert!((only.principal - dec!(1000)).abs() < dec!(0.01));
}

#[test]
fn test_identical_inputs_give_identical_output() {
    let loan = sample_loan();
    let a = build(&loan);
    let b = build(&loan);
    assert_eq!(a, b);
}

#[test]
fn test_rejects_negative_rate() {
    let mut loan = sample_loan();
    loan.annual_rate_pct = dec!(-1);
    let err = schedule::build_schedule(&loan).unwrap_err();
    assert!(matches!(err, AmortizeError::InvalidInput { .. }));
}

#[test]
fn test_rejects_zero_term() {
    let mut loan = sample_loan();
    loan.term_months = 0;
    let err = schedule::build_schedule(&loan).unwrap_err();
    assert!(matches!(err, AmortizeError::InvalidInput { .. }));
}

#[test]
fn test_envelope_carries_assumptions_and_no_warnings() {
    let envelope = schedule::build_schedule(&sample_loan()).unwrap();
    assert!(envelope.warnings.is_empty());
    assert_eq!(
        envelope.assumptions.get("term_months").and_then(|v| v.as_u64()),
        Some(60)
    );
}
