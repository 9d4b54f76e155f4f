use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::goal::Goal;

/// Contains the portfolio-wide statistics across a set of debt goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    /// The sum of every goal's target amount.
    pub total_debt: Decimal,
    /// The sum of every goal's recorded progress.
    pub total_paid: Decimal,
    /// Total debt minus total paid.
    pub total_remaining: Decimal,
    /// Paid share of the total debt, as a percentage.
    pub overall_progress_pct: Decimal,
    /// Average stated rate weighted by each goal's outstanding balance.
    pub weighted_average_interest_rate: Decimal,
}

/// Contains the progress totals across a mixed savings and debt collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub total_target: Decimal,
    pub total_progress: Decimal,
    pub total_remaining: Decimal,
    pub overall_progress_pct: Decimal,
}

/// Orders goals for the debt-avalanche strategy: highest effective interest
/// rate first.
///
/// Zero and missing rates (savings goals included) sort last. Equal rates
/// keep their input order; `slice::sort_by` is stable, which the ordering
/// contract relies on. The first element of the result is the goal to
/// recommend extra payments toward.
pub fn prioritize(goals: &[Goal]) -> Vec<&Goal> {
    let mut ordered: Vec<&Goal> = goals.iter().collect();
    ordered.sort_by(|a, b| b.interest_rate().cmp(&a.interest_rate()));
    ordered
}

/// Aggregates portfolio statistics across a set of debt goals.
///
/// The average interest rate is weighted by each goal's outstanding balance
/// rather than its original size, skipping goals that are already paid off.
/// An empty or fully paid portfolio reports zero rather than dividing by
/// zero, and an empty input yields all-zero statistics.
pub fn aggregate(goals: &[Goal]) -> PortfolioStats {
    let total_debt: Decimal = goals.iter().map(|g| g.target_amount).sum();
    let total_paid: Decimal = goals.iter().map(|g| g.progress).sum();

    let mut weighted_rate_sum = dec!(0);
    let mut open_balance = dec!(0);
    for goal in goals {
        let remaining = goal.remaining();
        if remaining > dec!(0) {
            weighted_rate_sum += remaining * goal.interest_rate();
            open_balance += remaining;
        }
    }

    let weighted_average_interest_rate = if open_balance > dec!(0) {
        weighted_rate_sum / open_balance
    } else {
        dec!(0)
    };
    let overall_progress_pct = if total_debt > dec!(0) {
        total_paid / total_debt * dec!(100)
    } else {
        dec!(0)
    };

    debug!(
        goals = goals.len(),
        %total_debt,
        %open_balance,
        "aggregated debt portfolio"
    );

    PortfolioStats {
        total_debt,
        total_paid,
        total_remaining: total_debt - total_paid,
        overall_progress_pct,
        weighted_average_interest_rate,
    }
}

/// Totals progress across a mixed collection of savings and debt goals.
pub fn summarize(goals: &[Goal]) -> GoalSummary {
    let total_target: Decimal = goals.iter().map(|g| g.target_amount).sum();
    let total_progress: Decimal = goals.iter().map(|g| g.progress).sum();
    let overall_progress_pct = if total_target > dec!(0) {
        total_progress / total_target * dec!(100)
    } else {
        dec!(0)
    };

    GoalSummary {
        total_target,
        total_progress,
        total_remaining: total_target - total_progress,
        overall_progress_pct,
    }
}
