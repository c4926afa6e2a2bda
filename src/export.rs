//! CSV rendering of a payment schedule:
//! Month,EMI Paid,Interest Paid,Principal Paid,Balance

use crate::calendar::due_dates;
use crate::error::{EmiError, Result};
use crate::schedule::{Schedule, ScheduleRow};
use chrono::NaiveDate;
use csv::{Terminator, WriterBuilder};
use std::io::{self, Write};

/// Suggested file name for a downloaded schedule.
pub const EXPORT_FILE_NAME: &str = "emi_breakdown.csv";

pub const HEADERS: [&str; 5] = [
    "Month",
    "EMI Paid",
    "Interest Paid",
    "Principal Paid",
    "Balance",
];

const DUE_DATE_HEADER: &str = "Due Date";

fn money(amt: f64) -> String {
    format!("{:.2}", amt)
}

// a settled balance is written as a bare 0
fn balance(amt: f64) -> String {
    if amt > 0. {
        money(amt)
    } else {
        "0".to_string()
    }
}

fn record(row: &ScheduleRow) -> [String; 5] {
    [
        row.period.to_string(),
        money(row.payment_amount),
        money(row.interest_portion),
        money(row.principal_portion),
        balance(row.remaining_balance),
    ]
}

fn write_records<W: Write>(w: W, schedule: &Schedule, dates: Option<&[NaiveDate]>) -> Result<()> {
    let mut wrt = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(w);

    match dates {
        Some(dates) => {
            let mut header = vec![DUE_DATE_HEADER];
            header.extend(HEADERS);
            wrt.write_record(&header)?;
            for (row, date) in schedule.iter().zip(dates) {
                let mut fields = vec![date.format("%Y-%m-%d").to_string()];
                fields.extend(record(row));
                wrt.write_record(&fields)?;
            }
        }
        None => {
            wrt.write_record(HEADERS)?;
            for row in schedule {
                wrt.write_record(record(row))?;
            }
        }
    }
    wrt.flush()?;
    Ok(())
}

/// Streams the schedule as CSV, one newline-terminated record per row.
pub fn write_csv<W: Write>(w: W, schedule: &Schedule) -> Result<()> {
    write_records(w, schedule, None)
}

pub fn to_csv(schedule: &Schedule) -> Result<String> {
    let mut out = Vec::new();
    write_csv(&mut out, schedule)?;
    into_string(out)
}

/// Same as [`to_csv`] with a leading ISO `Due Date` column.
pub fn to_csv_with_dates(schedule: &Schedule, first_due: NaiveDate) -> Result<String> {
    let dates = due_dates(schedule, first_due)?;
    let mut out = Vec::new();
    write_records(&mut out, schedule, Some(dates.as_slice()))?;
    into_string(out)
}

fn into_string(buf: Vec<u8>) -> Result<String> {
    String::from_utf8(buf).map_err(|e| EmiError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
