use crate::loan::{round, DISPLAY_DECIMALS};
use log::{trace, warn};
use std::fmt;

/// Residual balance below which the loan counts as settled.
const SETTLEMENT_TOLERANCE: f64 = 0.005;

/// One month of the amortization ledger.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleRow {
    pub period: u32,
    pub payment_amount: f64,
    pub interest_portion: f64,
    pub principal_portion: f64,
    pub remaining_balance: f64,
}

impl ScheduleRow {
    pub fn new(
        period: u32,
        payment_amount: f64,
        interest_portion: f64,
        principal_portion: f64,
        remaining_balance: f64,
    ) -> Self {
        Self {
            period,
            payment_amount,
            interest_portion,
            principal_portion,
            remaining_balance,
        }
    }

    pub fn rounded(&self) -> Self {
        Self {
            period: self.period,
            payment_amount: round(self.payment_amount, DISPLAY_DECIMALS),
            interest_portion: round(self.interest_portion, DISPLAY_DECIMALS),
            principal_portion: round(self.principal_portion, DISPLAY_DECIMALS),
            remaining_balance: round(self.remaining_balance, DISPLAY_DECIMALS),
        }
    }
}

impl fmt::Display for ScheduleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "month {}, EMI paid {:.2}, interest paid {:.2}, principal paid {:.2}, balance {:.2}",
            self.period,
            self.payment_amount,
            self.interest_portion,
            self.principal_portion,
            self.remaining_balance
        )
    }
}

/// Rows ordered by period, ending at payoff or at the nominal term.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleRow> {
        self.rows.iter()
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest_portion).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal_portion).sum()
    }

    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.payment_amount).sum()
    }

    /// Balance after the last row, `None` for an empty schedule.
    pub fn final_balance(&self) -> Option<f64> {
        self.rows.last().map(|r| r.remaining_balance)
    }

    /// Period at which the balance reached zero, if it did.
    pub fn payoff_period(&self) -> Option<u32> {
        self.rows
            .iter()
            .find(|r| r.remaining_balance <= 0.)
            .map(|r| r.period)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleRow;
    type IntoIter = std::slice::Iter<'a, ScheduleRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Breaks a loan into monthly rows of interest and principal.
///
/// `periods` may be fractional; a row is emitted for every period `k` with
/// `k <= periods`. Generation stops early once the balance is paid off.
pub fn generate_schedule(principal: f64, periodic_rate: f64, periods: f64, payment: f64) -> Schedule {
    generate_schedule_with_prepayment(principal, periodic_rate, periods, payment, 0.)
}

/// Like [`generate_schedule`], with `prepayment` added to the principal
/// repaid every period. The final row is capped at the outstanding balance,
/// and a residual under half a cent is folded into that payment.
///
/// With an unbounded `periods`, a payment that never covers the first
/// period's interest yields an empty schedule.
pub fn generate_schedule_with_prepayment(
    principal: f64,
    periodic_rate: f64,
    periods: f64,
    payment: f64,
    prepayment: f64,
) -> Schedule {
    let mut rows: Vec<ScheduleRow> = Vec::new();
    let mut balance = principal; // balance at the start of the period
    let mut period: u32 = 0;

    if !periods.is_finite() && payment + prepayment <= principal * periodic_rate {
        warn!(
            "payment {:.2} never amortizes a balance of {:.2}",
            payment + prepayment,
            principal
        );
        return Schedule { rows };
    }

    while balance > 0. && f64::from(period + 1) <= periods && period < u32::MAX {
        period += 1;

        let interest = balance * periodic_rate;
        let scheduled_principal = payment - interest + prepayment;

        let (paid, principal_portion) = if scheduled_principal >= balance - SETTLEMENT_TOLERANCE {
            (interest + balance, balance)
        } else {
            (payment + prepayment, scheduled_principal)
        };
        balance -= principal_portion;

        trace!(
            "period {}, interest {}, principal {}, end bal {}",
            period,
            interest,
            principal_portion,
            balance
        );

        rows.push(ScheduleRow::new(
            period,
            paid,
            interest,
            principal_portion,
            balance.max(0.),
        ));
    }

    if balance > SETTLEMENT_TOLERANCE && !rows.is_empty() {
        warn!(
            "schedule ends at period {} with {:.2} outstanding",
            period, balance
        );
    }

    Schedule { rows }
}
