use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::goal::{Goal, GoalKind, InterestType};

/// Estimated number of whole months until a goal is reached or paid off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffHorizon {
    /// The goal completes after this many whole months of contributions.
    ///
    /// Saturates at `u32::MAX` when the computed horizon exceeds the month
    /// counter; the horizon is still finite, just astronomically long.
    Months(u32),
    /// The contribution does not cover the interest accruing each month, so
    /// the balance never shrinks.
    NeverAtThisRate,
}

impl fmt::Display for PayoffHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffHorizon::NeverAtThisRate => write!(f, "never at this rate"),
            PayoffHorizon::Months(0) => write!(f, "Complete!"),
            PayoffHorizon::Months(1) => write!(f, "1 month"),
            PayoffHorizon::Months(m) if *m < 12 => write!(f, "{m} months"),
            PayoffHorizon::Months(m) => {
                let years = m / 12;
                let months = m % 12;
                if months == 0 {
                    if years == 1 {
                        write!(f, "1 year")
                    } else {
                        write!(f, "{years} years")
                    }
                } else {
                    write!(f, "{years}y {months}m")
                }
            }
        }
    }
}

/// Converts a stated rate in percentage points to a monthly periodic rate.
///
/// Annual rates are divided evenly across twelve months, the way card and
/// loan statements quote APR; no compounding adjustment is applied.
pub fn monthly_periodic_rate(interest_rate: Decimal, interest_type: InterestType) -> Decimal {
    let percent = interest_rate / dec!(100);
    match interest_type {
        InterestType::Yearly => percent / dec!(12),
        InterestType::Monthly => percent,
    }
}

fn monthly_rate_for(goal: &Goal) -> Decimal {
    match goal.kind {
        GoalKind::Savings => dec!(0),
        GoalKind::DebtFree {
            interest_rate,
            interest_type,
        } => monthly_periodic_rate(interest_rate, interest_type),
    }
}

// month counts beyond the u32 counter saturate
fn whole_months(months: Decimal) -> u32 {
    months.ceil().to_u32().unwrap_or(u32::MAX)
}

/// Estimates the number of whole months to complete a goal at a constant
/// monthly contribution.
///
/// Savings goals accrue no interest, so the horizon is a straight division of
/// the remaining amount. Debt goals apply the amortization month-count
/// formula to the declining balance:
///
/// n = -ln(1 - B*i / PMT) / ln(1 + i)
///
/// where B is the remaining balance, i the monthly periodic rate and PMT the
/// monthly contribution.
///
/// # Arguments
///
/// * `goal` - The normalized goal to estimate.
/// * `monthly_contribution` - The constant amount paid each month.
///
/// # Returns
///
/// * `None` when `monthly_contribution` is zero or negative — no estimate
///   can be made.
/// * `Some(PayoffHorizon::Months(0))` when nothing remains on the goal.
/// * `Some(PayoffHorizon::NeverAtThisRate)` when the contribution on a debt
///   goal does not exceed the interest accruing each month; the balance
///   never declines and the formula has no solution.
///
/// A finite horizon too long for the month counter is reported as
/// `Months(u32::MAX)`, never as `NeverAtThisRate`.
pub fn months_to_completion(goal: &Goal, monthly_contribution: Decimal) -> Option<PayoffHorizon> {
    if monthly_contribution <= dec!(0) {
        return None;
    }

    let remaining = goal.remaining();
    if remaining <= dec!(0) {
        return Some(PayoffHorizon::Months(0));
    }

    let monthly_rate = monthly_rate_for(goal);
    if monthly_rate.is_zero() {
        // quotients past Decimal's range saturate along with the counter
        let months = remaining
            .checked_div(monthly_contribution)
            .map_or(u32::MAX, whole_months);
        return Some(PayoffHorizon::Months(months));
    }

    // The logarithm is only defined while the payment beats the monthly
    // interest accrual; at or below it the balance never declines. An
    // accrual too large for Decimal dwarfs any payment outright.
    let Some(monthly_interest) = remaining.checked_mul(monthly_rate) else {
        return Some(PayoffHorizon::NeverAtThisRate);
    };
    if monthly_interest >= monthly_contribution {
        debug!(
            goal = %goal.goal_name,
            %monthly_contribution,
            %monthly_interest,
            "contribution does not cover accruing interest"
        );
        return Some(PayoffHorizon::NeverAtThisRate);
    }

    // n = -ln(1 - B*i/PMT) / ln(1 + i)
    let numerator = -(dec!(1) - monthly_interest / monthly_contribution).ln();
    let denominator = (dec!(1) + monthly_rate).ln();
    let months = numerator.checked_div(denominator).map_or(u32::MAX, whole_months);

    Some(PayoffHorizon::Months(months))
}

/// Represents one month of a projected payment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    /// The remaining balance after the payment.
    pub new_balance: Decimal,
    /// The portion of the payment that reduces the balance.
    pub principal: Decimal,
    /// The portion of the payment that covers accrued interest.
    pub interest: Decimal,
}

/// Projects the month-by-month payment breakdown for a goal paid down at a
/// constant monthly contribution.
///
/// The curve runs over the horizon computed by [`months_to_completion`]; the
/// final month's principal is trimmed to the amount actually owed so the
/// balance lands exactly on zero. An already complete goal yields an empty
/// curve.
///
/// # Returns
///
/// `None` when no projectable horizon exists: the contribution is zero or
/// negative, it does not cover the accruing interest, or the horizon
/// saturated the month counter.
pub fn payment_schedule(goal: &Goal, monthly_contribution: Decimal) -> Option<Vec<MonthlyPayment>> {
    let months = match months_to_completion(goal, monthly_contribution)? {
        PayoffHorizon::Months(n) if n < u32::MAX => n,
        _ => return None,
    };

    let monthly_rate = monthly_rate_for(goal);
    let mut current_balance = goal.remaining();
    let mut curve = Vec::with_capacity(months as usize);

    for _ in 0..months {
        let interest = current_balance * monthly_rate;
        let principal = (monthly_contribution - interest).min(current_balance);
        current_balance -= principal;
        curve.push(MonthlyPayment {
            new_balance: current_balance.max(dec!(0)),
            principal,
            interest,
        });
    }

    Some(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{GoalRecord, GoalType};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn savings_goal(target: Decimal, progress: Decimal) -> Goal {
        Goal::normalize(&GoalRecord {
            goal_name: "emergency fund".to_string(),
            goal_type: GoalType::Savings,
            target_amount: target,
            progress,
            interest_rate: None,
            interest_type: None,
            start_date: None,
            end_date: None,
        })
        .unwrap()
    }

    fn debt_goal(
        target: Decimal,
        progress: Decimal,
        rate: Decimal,
        interest_type: InterestType,
    ) -> Goal {
        Goal::normalize(&GoalRecord {
            goal_name: "card balance".to_string(),
            goal_type: GoalType::DebtFree,
            target_amount: target,
            progress,
            interest_rate: Some(rate),
            interest_type: Some(interest_type),
            start_date: None,
            end_date: None,
        })
        .unwrap()
    }

    #[rstest]
    #[case::yearly_rate(dec!(24), InterestType::Yearly, dec!(0.02))]
    #[case::monthly_rate(dec!(1.5), InterestType::Monthly, dec!(0.015))]
    #[case::zero_rate(dec!(0), InterestType::Yearly, dec!(0))]
    fn test_monthly_periodic_rate(
        #[case] stated: Decimal,
        #[case] interest_type: InterestType,
        #[case] expected: Decimal,
    ) {
        assert_eq!(monthly_periodic_rate(stated, interest_type), expected);
    }

    #[test]
    fn test_savings_goal_horizon_is_linear() {
        // 4000 remaining at 500 a month takes 8 months
        let goal = savings_goal(dec!(5000), dec!(1000));
        assert_eq!(
            months_to_completion(&goal, dec!(500)),
            Some(PayoffHorizon::Months(8))
        );
    }

    #[test]
    fn test_partial_final_month_rounds_up() {
        let goal = savings_goal(dec!(1000), dec!(0));
        assert_eq!(
            months_to_completion(&goal, dec!(300)),
            Some(PayoffHorizon::Months(4))
        );
    }

    #[test]
    fn test_zero_interest_debt_matches_savings_formula() {
        let goal = debt_goal(dec!(4000), dec!(0), dec!(0), InterestType::Yearly);
        assert_eq!(
            months_to_completion(&goal, dec!(500)),
            Some(PayoffHorizon::Months(8))
        );
    }

    #[test]
    fn test_debt_goal_amortization_formula() {
        // 10000 at 24% yearly is a 2% monthly rate; at 300 a month the
        // amortization formula gives -ln(1 - 10000*0.02/300)/ln(1.02),
        // about 55.5, so 56 whole months.
        let goal = debt_goal(dec!(10000), dec!(0), dec!(24), InterestType::Yearly);
        assert_eq!(
            months_to_completion(&goal, dec!(300)),
            Some(PayoffHorizon::Months(56))
        );
    }

    #[test]
    fn test_monthly_stated_rate_matches_equivalent_yearly() {
        let yearly = debt_goal(dec!(10000), dec!(0), dec!(24), InterestType::Yearly);
        let monthly = debt_goal(dec!(10000), dec!(0), dec!(2), InterestType::Monthly);
        assert_eq!(
            months_to_completion(&yearly, dec!(300)),
            months_to_completion(&monthly, dec!(300))
        );
    }

    #[rstest]
    #[case::below_accrual(dec!(150))]
    #[case::exactly_accrual(dec!(200))]
    fn test_insufficient_payment_is_detected(#[case] contribution: Decimal) {
        // interest accrues at 200 a month on this balance
        let goal = debt_goal(dec!(10000), dec!(0), dec!(24), InterestType::Yearly);
        assert_eq!(
            months_to_completion(&goal, contribution),
            Some(PayoffHorizon::NeverAtThisRate)
        );
    }

    #[rstest]
    #[case::zero(dec!(0))]
    #[case::negative(dec!(-5))]
    fn test_non_positive_contribution_has_no_estimate(#[case] contribution: Decimal) {
        let goal = savings_goal(dec!(5000), dec!(1000));
        assert_eq!(months_to_completion(&goal, contribution), None);
    }

    #[rstest]
    #[case::counter_overflow(dec!(10000000000000), dec!(1))]
    #[case::quotient_overflow(dec!(79228162514264337593543950335), dec!(0.000001))]
    fn test_zero_interest_horizon_saturates_instead_of_never(
        #[case] target: Decimal,
        #[case] contribution: Decimal,
    ) {
        // no interest accrues, so the horizon is finite however long
        let goal = savings_goal(target, dec!(0));
        assert_eq!(
            months_to_completion(&goal, contribution),
            Some(PayoffHorizon::Months(u32::MAX))
        );
    }

    #[test]
    fn test_accrual_beyond_decimal_range_is_never_payable() {
        let goal = debt_goal(
            dec!(79228162514264337593543950335),
            dec!(0),
            dec!(1000000),
            InterestType::Monthly,
        );
        assert_eq!(
            months_to_completion(&goal, dec!(5000)),
            Some(PayoffHorizon::NeverAtThisRate)
        );
    }

    #[test]
    fn test_schedule_unavailable_for_saturated_horizon() {
        let goal = savings_goal(dec!(10000000000000), dec!(0));
        assert_eq!(payment_schedule(&goal, dec!(1)), None);
    }

    #[test]
    fn test_completed_goal_takes_zero_months() {
        let goal = savings_goal(dec!(1000), dec!(1000));
        assert_eq!(
            months_to_completion(&goal, dec!(50)),
            Some(PayoffHorizon::Months(0))
        );

        let overpaid = debt_goal(dec!(1000), dec!(1500), dec!(24), InterestType::Yearly);
        assert_eq!(
            months_to_completion(&overpaid, dec!(50)),
            Some(PayoffHorizon::Months(0))
        );
    }

    #[test]
    fn test_schedule_zero_interest_debt() {
        let goal = debt_goal(dec!(1200), dec!(0), dec!(0), InterestType::Yearly);
        let curve = payment_schedule(&goal, dec!(500)).unwrap();

        assert_eq!(curve.len(), 3);
        assert_eq!(curve[0].principal, dec!(500));
        assert_eq!(curve[1].principal, dec!(500));
        assert_eq!(curve[2].principal, dec!(200));
        assert_eq!(curve[2].new_balance, dec!(0));
        assert!(curve.iter().all(|m| m.interest == dec!(0)));
    }

    #[test]
    fn test_schedule_pays_balance_down_to_zero() {
        let goal = debt_goal(dec!(10000), dec!(0), dec!(24), InterestType::Yearly);
        let curve = payment_schedule(&goal, dec!(300)).unwrap();

        assert_eq!(curve.len(), 56);
        // 2% of the opening balance accrues in the first month
        assert_eq!(curve[0].interest, dec!(200));
        assert_eq!(curve[0].principal, dec!(100));
        assert_eq!(curve.last().unwrap().new_balance, dec!(0));

        // every unit of principal across the curve retires the balance; the
        // running balance carries 28-significant-digit rounding, so compare
        // at cents precision
        let total_principal: Decimal = curve.iter().map(|m| m.principal).sum();
        assert_eq!(total_principal.round_dp(2), dec!(10000.00));
    }

    #[test]
    fn test_schedule_unavailable_without_finite_horizon() {
        let goal = debt_goal(dec!(10000), dec!(0), dec!(24), InterestType::Yearly);
        assert_eq!(payment_schedule(&goal, dec!(150)), None);
        assert_eq!(payment_schedule(&goal, dec!(0)), None);
    }

    #[test]
    fn test_schedule_empty_for_completed_goal() {
        let goal = savings_goal(dec!(1000), dec!(1000));
        assert_eq!(payment_schedule(&goal, dec!(100)), Some(Vec::new()));
    }

    #[rstest]
    #[case::complete(PayoffHorizon::Months(0), "Complete!")]
    #[case::one_month(PayoffHorizon::Months(1), "1 month")]
    #[case::under_a_year(PayoffHorizon::Months(7), "7 months")]
    #[case::one_year(PayoffHorizon::Months(12), "1 year")]
    #[case::exact_years(PayoffHorizon::Months(24), "2 years")]
    #[case::years_and_months(PayoffHorizon::Months(27), "2y 3m")]
    #[case::never(PayoffHorizon::NeverAtThisRate, "never at this rate")]
    fn test_horizon_display(#[case] horizon: PayoffHorizon, #[case] expected: &str) {
        assert_eq!(horizon.to_string(), expected);
    }
}
