//! Equated monthly installment (EMI) calculation for fixed-rate amortizing loans.
//!
//! [`compute_summary`] derives the fixed monthly payment and the loan totals,
//! [`generate_schedule`] breaks the loan down month by month, and
//! [`export::to_csv`] renders that breakdown for download.

pub mod calculator;
pub mod calendar;
pub mod error;
pub mod export;
pub mod loan;
pub mod schedule;

pub use calculator::{CalculatorState, Theme};
pub use error::{EmiError, Result};
pub use loan::{amortize, compute_summary, Amortization, LoanInputs, LoanSummary};
pub use schedule::{generate_schedule, generate_schedule_with_prepayment, Schedule, ScheduleRow};
