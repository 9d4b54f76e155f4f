//! `goal_finance` is a Rust library for the financial model behind savings
//! and debt-payoff goals.
//!
//! It provides three small, pure components:
//! - **Goal model**: validates raw goal records and derives progress figures
//!   (remaining amount, percentage complete).
//! - **Amortization estimator**: estimates how many months of constant
//!   contributions reach a savings target or pay a debt down to zero under
//!   compounding interest, and projects the month-by-month payment schedule.
//! - **Payoff prioritizer**: ranks a debt portfolio by interest rate (the
//!   debt-avalanche strategy) and aggregates portfolio-wide statistics.
//!
//! Every operation is a deterministic function over in-memory values: no
//! I/O, no shared state, nothing to coordinate between threads. Callers own
//! the goal collection and re-invoke the calculator whenever it changes.
//!
//! ## Usage
//!
//! Add `goal_finance` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! goal_finance = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then normalize a goal record and ask for its payoff horizon:
//!
//! ```rust
//! use goal_finance::{months_to_completion, Goal, GoalRecord, GoalType, PayoffHorizon};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let record = GoalRecord {
//!         goal_name: "car loan".to_string(),
//!         goal_type: GoalType::DebtFree,
//!         target_amount: dec!(10_000),
//!         progress: dec!(0),
//!         interest_rate: Some(dec!(24)),
//!         interest_type: None,
//!         start_date: None,
//!         end_date: None,
//!     };
//!
//!     let goal = Goal::normalize(&record).expect("record is well formed");
//!
//!     match months_to_completion(&goal, dec!(300)) {
//!         Some(PayoffHorizon::Months(n)) => println!("Paid off in {} months", n),
//!         Some(PayoffHorizon::NeverAtThisRate) => println!("Payment never covers the interest"),
//!         None => println!("Enter a positive monthly payment"),
//!     }
//! }
//! ```

pub mod error;
pub mod estimator;
pub mod goal;
pub mod portfolio;

pub use error::GoalError;
pub use estimator::{
    monthly_periodic_rate, months_to_completion, payment_schedule, MonthlyPayment, PayoffHorizon,
};
pub use goal::{Goal, GoalKind, GoalRecord, GoalType, InterestType};
pub use portfolio::{aggregate, prioritize, summarize, GoalSummary, PortfolioStats};
