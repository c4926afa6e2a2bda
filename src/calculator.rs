//! Presentation state for an EMI calculator form.
//!
//! The form owns nothing; a [`CalculatorState`] value holds the raw field
//! text, the theme toggle and the last results, and [`CalculatorState::calculate`]
//! returns the next state.

use crate::error::{EmiError, Result};
use crate::export;
use crate::loan::{amortize, LoanInputs, LoanSummary};
use crate::schedule::Schedule;
use log::info;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatorState {
    pub loan_amount: String,
    /// annual rate in percent
    pub interest_rate: String,
    /// tenure in years
    pub loan_tenure: String,
    /// optional extra principal per month
    pub prepayment: String,
    pub theme: Theme,
    results: Option<LoanSummary>,
    breakdown: Schedule,
}

// a field keeps its text only while it reads as a number in its domain
fn accept_if(value: &str, in_domain: fn(f64) -> bool) -> String {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && in_domain(v) => value.to_string(),
        _ => String::new(),
    }
}

fn accept_positive(value: &str) -> String {
    accept_if(value, |v| v > 0.)
}

fn accept_non_negative(value: &str) -> String {
    accept_if(value, |v| v >= 0.)
}

fn required(value: &str, field: &'static str) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EmiError::invalid(field, "is required"));
    }
    value
        .parse()
        .map_err(|_| EmiError::invalid(field, "must be a number"))
}

fn optional(value: &str, field: &'static str) -> Result<f64> {
    if value.trim().is_empty() {
        Ok(0.)
    } else {
        required(value, field)
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loan_amount(&mut self, value: &str) {
        self.loan_amount = accept_positive(value);
    }

    pub fn set_interest_rate(&mut self, value: &str) {
        self.interest_rate = accept_non_negative(value);
    }

    pub fn set_loan_tenure(&mut self, value: &str) {
        self.loan_tenure = accept_positive(value);
    }

    pub fn set_prepayment(&mut self, value: &str) {
        self.prepayment = accept_positive(value);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn results(&self) -> Option<&LoanSummary> {
        self.results.as_ref()
    }

    pub fn breakdown(&self) -> &Schedule {
        &self.breakdown
    }

    /// Reads the form fields and computes the loan.
    ///
    /// Returns the state to display next. On error nothing is computed and
    /// the caller's current state is left as it was.
    pub fn calculate(&self) -> Result<CalculatorState> {
        let principal = required(&self.loan_amount, "loan amount")?;
        let annual_rate = required(&self.interest_rate, "interest rate")?;
        let tenure = required(&self.loan_tenure, "loan tenure")?;
        let prepayment = optional(&self.prepayment, "prepayment")?;

        let inputs = LoanInputs::new(principal, annual_rate, tenure).with_prepayment(prepayment);
        let amortization = amortize(&inputs)?;
        info!(
            "{} over {} months",
            amortization.summary,
            amortization.schedule.len()
        );

        Ok(CalculatorState {
            results: Some(amortization.summary),
            breakdown: amortization.schedule,
            ..self.clone()
        })
    }

    /// Labelled result values rounded for display.
    pub fn summary_lines(&self) -> Option<[(&'static str, String); 3]> {
        self.results.map(|s| {
            [
                ("Monthly EMI", format!("{:.2}", s.periodic_payment)),
                ("Total Interest", format!("{:.2}", s.total_interest)),
                ("Total Amount", format!("{:.2}", s.total_payment)),
            ]
        })
    }

    /// CSV of the current breakdown, or `None` before anything is calculated.
    pub fn export_csv(&self) -> Option<Result<String>> {
        if self.breakdown.is_empty() {
            None
        } else {
            Some(export::to_csv(&self.breakdown))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CalculatorState, Theme};
    use test_log::test;

    fn filled() -> CalculatorState {
        let mut state = CalculatorState::new();
        state.set_loan_amount("100000");
        state.set_interest_rate("10");
        state.set_loan_tenure("1");
        state
    }

    #[test]
    fn test_setters_reject_out_of_domain() {
        let mut state = CalculatorState::new();
        state.set_loan_amount("-10");
        assert_eq!(state.loan_amount, "");
        state.set_loan_amount("abc");
        assert_eq!(state.loan_amount, "");
        state.set_interest_rate("-1");
        assert_eq!(state.interest_rate, "");
        state.set_interest_rate("0");
        assert_eq!(state.interest_rate, "0");
        state.set_loan_tenure(" 2.5 ");
        assert_eq!(state.loan_tenure, "2.5");
        state.set_prepayment("500");
        assert_eq!(state.prepayment, "500");
        state.set_prepayment("");
        assert_eq!(state.prepayment, "");
    }

    #[test]
    fn test_toggle_theme() {
        let mut state = CalculatorState::new();
        assert_eq!(state.theme, Theme::Light);
        state.toggle_theme();
        assert_eq!(state.theme, Theme::Dark);
        state.toggle_theme();
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_calculate() {
        let state = filled().calculate().unwrap();

        assert_eq!(state.breakdown().len(), 12);
        let lines = state.summary_lines().unwrap();
        assert_eq!(lines[0], ("Monthly EMI", "8791.59".to_string()));
        assert_eq!(lines[1], ("Total Interest", "5499.06".to_string()));
        assert_eq!(lines[2], ("Total Amount", "105499.06".to_string()));
        assert_eq!(state.loan_amount, "100000");
    }

    #[test]
    fn test_calculate_at_zero_rate() {
        let mut state = CalculatorState::new();
        state.set_loan_amount("12000");
        state.set_interest_rate("0");
        state.set_loan_tenure("1");
        let state = state.calculate().unwrap();

        assert_eq!(state.breakdown().len(), 12);
        let lines = state.summary_lines().unwrap();
        assert_eq!(lines[0], ("Monthly EMI", "1000.00".to_string()));
        assert_eq!(lines[1], ("Total Interest", "0.00".to_string()));
        assert_eq!(state.breakdown().final_balance(), Some(0.));
    }

    #[test]
    fn test_calculate_with_prepayment() {
        let mut state = filled();
        state.set_prepayment("2000");
        let state = state.calculate().unwrap();
        assert_eq!(state.breakdown().len(), 10);
    }

    #[test]
    fn test_missing_field() {
        let mut state = filled();
        state.set_loan_tenure("0");
        let err = state.calculate().unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "invalid input: loan tenure is required");
        assert!(state.results().is_none());
    }

    #[test]
    fn test_non_numeric_field() {
        let mut state = filled();
        state.interest_rate = "ten".to_string();
        let err = state.calculate().unwrap_err();
        assert_eq!(err.to_string(), "invalid input: interest rate must be a number");
    }

    #[test]
    fn test_export_csv() {
        assert!(CalculatorState::new().export_csv().is_none());

        let csv = filled().calculate().unwrap().export_csv().unwrap().unwrap();
        assert!(csv.starts_with("Month,EMI Paid,Interest Paid,Principal Paid,Balance\n1,8791.59,"));
    }

    #[test]
    fn test_recalculate_replaces_results() {
        let first = filled().calculate().unwrap();
        let mut next = first.clone();
        next.set_loan_tenure("2");
        let second = next.calculate().unwrap();

        assert_eq!(second.breakdown().len(), 24);
        assert_ne!(first.results(), second.results());
    }
}
