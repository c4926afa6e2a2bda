use crate::error::{EmiError, Result};
use crate::schedule::{generate_schedule_with_prepayment, Schedule};
use log::debug;
use std::fmt;

/// Payments per year. Interest compounds once per payment.
pub const PERIODS_PER_YEAR: f64 = 12.;

/// Decimal places used for display and export.
pub const DISPLAY_DECIMALS: i32 = 2;

/// Raw loan terms supplied for a single calculation.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanInputs {
    pub principal: f64,
    /// nominal annual rate as a percentage (i.e., 8.5, 10.0)
    pub annual_rate_percent: f64,
    /// term in years; fractional values allowed
    pub term_years: f64,
    /// extra principal paid every period on top of the EMI
    #[cfg_attr(feature = "serde", serde(default))]
    pub prepayment: f64,
}

impl LoanInputs {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: f64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
            prepayment: 0.,
        }
    }

    pub fn with_prepayment(self, prepayment: f64) -> Self {
        Self { prepayment, ..self }
    }

    /// Checks every field against its domain. Nothing is computed on failure.
    pub fn validate(&self) -> Result<()> {
        validate_terms(self.principal, self.annual_rate_percent, self.term_years)?;
        if !self.prepayment.is_finite() {
            return Err(EmiError::invalid("prepayment", "must be a finite number"));
        }
        if self.prepayment < 0. {
            return Err(EmiError::invalid("prepayment", "must not be negative"));
        }
        Ok(())
    }

    pub fn periodic_rate(&self) -> f64 {
        periodic_rate(self.annual_rate_percent)
    }

    pub fn periods(&self) -> f64 {
        period_count(self.term_years)
    }
}

/// Payment and totals for a loan. Values are kept at full precision;
/// use [`LoanSummary::rounded`] or `Display` for presentation.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanSummary {
    pub periodic_payment: f64,
    pub total_interest: f64,
    pub total_payment: f64,
}

impl LoanSummary {
    pub fn rounded(&self) -> Self {
        Self {
            periodic_payment: round(self.periodic_payment, DISPLAY_DECIMALS),
            total_interest: round(self.total_interest, DISPLAY_DECIMALS),
            total_payment: round(self.total_payment, DISPLAY_DECIMALS),
        }
    }
}

impl fmt::Display for LoanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "monthly EMI {:.2}, total interest {:.2}, total amount {:.2}",
            self.periodic_payment, self.total_interest, self.total_payment
        )
    }
}

/// A validated loan together with its summary and month-by-month breakdown.
#[derive(Clone, PartialEq, Debug)]
pub struct Amortization {
    pub inputs: LoanInputs,
    pub summary: LoanSummary,
    pub schedule: Schedule,
}

/// Annual percentage to monthly decimal rate: 12 -> 0.01.
pub fn periodic_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / PERIODS_PER_YEAR / 100.
}

/// Term in years to number of monthly periods. Not truncated.
pub fn period_count(term_years: f64) -> f64 {
    term_years * PERIODS_PER_YEAR
}

pub fn round(amt: f64, dec: i32) -> f64 {
    if amt == 0. {
        0.
    } else {
        (amt * 10_f64.powi(dec)).round() / 10_f64.powi(dec)
    }
}

fn validate_terms(principal: f64, annual_rate_percent: f64, term_years: f64) -> Result<()> {
    if !principal.is_finite() {
        return Err(EmiError::invalid("principal", "must be a finite number"));
    }
    if principal <= 0. {
        return Err(EmiError::invalid("principal", "must be greater than zero"));
    }
    if !annual_rate_percent.is_finite() {
        return Err(EmiError::invalid("annual rate", "must be a finite number"));
    }
    if annual_rate_percent < 0. {
        return Err(EmiError::invalid("annual rate", "must not be negative"));
    }
    if !term_years.is_finite() {
        return Err(EmiError::invalid("term", "must be a finite number"));
    }
    if term_years <= 0. {
        return Err(EmiError::invalid("term", "must be greater than zero"));
    }
    Ok(())
}

/// Fixed payment that amortizes `principal` over `periods` at `rate` per period.
pub fn payment_amount(principal: f64, rate: f64, periods: f64) -> f64 {
    if rate == 0. {
        return principal / periods;
    }

    // (1 + rate)^periods - 1 without cancellation for tiny rates
    let growth = (periods * rate.ln_1p()).exp_m1();
    if growth.is_infinite() {
        // the annuity factor tends to 1, leaving an interest-only payment
        return principal * rate;
    }
    if !growth.is_normal() {
        return principal / periods;
    }
    principal * rate * (growth + 1.) / growth
}

/// Computes the EMI and the totals paid over the full nominal term.
pub fn compute_summary(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
) -> Result<LoanSummary> {
    validate_terms(principal, annual_rate_percent, term_years)?;

    let rate = periodic_rate(annual_rate_percent);
    let periods = period_count(term_years);
    let periodic_payment = payment_amount(principal, rate, periods);
    let total_payment = periodic_payment * periods;
    let summary = LoanSummary {
        periodic_payment,
        total_interest: total_payment - principal,
        total_payment,
    };
    debug!(
        "principal {}, rate {}, periods {}: {}",
        principal, rate, periods, summary
    );

    Ok(summary)
}

/// Validates `inputs`, then computes the summary and the payment schedule.
pub fn amortize(inputs: &LoanInputs) -> Result<Amortization> {
    inputs.validate()?;

    let summary = compute_summary(
        inputs.principal,
        inputs.annual_rate_percent,
        inputs.term_years,
    )?;
    let schedule = generate_schedule_with_prepayment(
        inputs.principal,
        inputs.periodic_rate(),
        inputs.periods(),
        summary.periodic_payment,
        inputs.prepayment,
    );

    Ok(Amortization {
        inputs: *inputs,
        summary,
        schedule,
    })
}
