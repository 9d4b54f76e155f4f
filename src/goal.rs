use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Discriminates the two goal variants the application tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Savings,
    DebtFree,
}

/// Whether a stated interest rate is an annual or a monthly percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    #[default]
    Yearly,
    Monthly,
}

/// A goal record in the shape external storage produces.
///
/// `progress` defaults to zero when absent. The interest fields are only
/// meaningful for `debt_free` goals and default to a zero yearly rate.
/// The dates are informational and take no part in any calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub goal_name: String,
    pub goal_type: GoalType,
    pub target_amount: Decimal,
    #[serde(default)]
    pub progress: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_type: Option<InterestType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// The resolved variant of a normalized goal, carrying the interest terms
/// only where they apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GoalKind {
    Savings,
    DebtFree {
        /// Stated rate in percentage points (e.g. `5.5` for 5.5%).
        interest_rate: Decimal,
        interest_type: InterestType,
    },
}

/// A validated goal. Built only through [`Goal::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub goal_name: String,
    pub kind: GoalKind,
    pub target_amount: Decimal,
    pub progress: Decimal,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Goal {
    /// Validates a raw record and resolves the variant defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the goal name is empty or all whitespace, or if
    /// `target_amount`, `progress` or `interest_rate` is negative.
    pub fn normalize(record: &GoalRecord) -> Result<Goal, GoalError> {
        if record.goal_name.trim().is_empty() {
            return Err(GoalError::EmptyName);
        }
        if record.target_amount < dec!(0) {
            return Err(GoalError::NegativeAmount {
                field: "target_amount",
                value: record.target_amount,
            });
        }
        if record.progress < dec!(0) {
            return Err(GoalError::NegativeAmount {
                field: "progress",
                value: record.progress,
            });
        }

        let kind = match record.goal_type {
            GoalType::Savings => GoalKind::Savings,
            GoalType::DebtFree => {
                let interest_rate = record.interest_rate.unwrap_or_default();
                if interest_rate < dec!(0) {
                    return Err(GoalError::NegativeAmount {
                        field: "interest_rate",
                        value: interest_rate,
                    });
                }
                GoalKind::DebtFree {
                    interest_rate,
                    interest_type: record.interest_type.unwrap_or_default(),
                }
            }
        };

        Ok(Goal {
            goal_name: record.goal_name.clone(),
            kind,
            target_amount: record.target_amount,
            progress: record.progress,
            start_date: record.start_date,
            end_date: record.end_date,
        })
    }

    /// Reconstructs the storage-shaped record. The result normalizes back to
    /// an identical `Goal`.
    pub fn to_record(&self) -> GoalRecord {
        let (interest_rate, interest_type) = match self.kind {
            GoalKind::Savings => (None, None),
            GoalKind::DebtFree {
                interest_rate,
                interest_type,
            } => (Some(interest_rate), Some(interest_type)),
        };
        GoalRecord {
            goal_name: self.goal_name.clone(),
            goal_type: self.goal_type(),
            target_amount: self.target_amount,
            progress: self.progress,
            interest_rate,
            interest_type,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn goal_type(&self) -> GoalType {
        match self.kind {
            GoalKind::Savings => GoalType::Savings,
            GoalKind::DebtFree { .. } => GoalType::DebtFree,
        }
    }

    /// The amount still needed to reach the target, clamped at zero when the
    /// goal is overpaid.
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.progress).max(dec!(0))
    }

    /// Progress as a percentage of the target.
    ///
    /// A zero target yields zero rather than dividing. The value is not
    /// clamped at 100: an overpaid goal reports above 100 so callers can tell
    /// overpayment apart from exact completion.
    pub fn percentage_complete(&self) -> Decimal {
        if self.target_amount <= dec!(0) {
            return dec!(0);
        }
        self.progress / self.target_amount * dec!(100)
    }

    /// Effective stated interest rate in percentage points; zero for savings
    /// goals, which accrue no interest.
    pub fn interest_rate(&self) -> Decimal {
        match self.kind {
            GoalKind::Savings => dec!(0),
            GoalKind::DebtFree { interest_rate, .. } => interest_rate,
        }
    }
}
