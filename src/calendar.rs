use crate::error::{EmiError, Result};
use crate::schedule::Schedule;
use chrono::{Months, NaiveDate};

/// Due date of `period` (1-based) when the first installment falls on `first_due`.
///
/// Dates are counted from `first_due` rather than chained, so a loan starting
/// on the 31st returns to the 31st after a short month.
pub fn due_date(first_due: NaiveDate, period: u32) -> Option<NaiveDate> {
    let offset = period.checked_sub(1)?;
    first_due.checked_add_months(Months::new(offset))
}

/// Due dates for every row of `schedule`, in order.
pub fn due_dates(schedule: &Schedule, first_due: NaiveDate) -> Result<Vec<NaiveDate>> {
    schedule
        .iter()
        .map(|row| {
            due_date(first_due, row.period)
                .ok_or_else(|| EmiError::invalid("first due date", "is out of range"))
        })
        .collect()
}
