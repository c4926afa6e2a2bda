use emi::{export, CalculatorState};
use log::info;
use simple_logger::SimpleLogger;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let mut state = CalculatorState::new();
    state.set_loan_amount("500000");
    state.set_interest_rate("8.5");
    state.set_loan_tenure("20");

    let state = state.calculate()?;
    if let Some(lines) = state.summary_lines() {
        for (label, value) in lines {
            info!("{}: {}", label, value);
        }
    }

    print!("{}", state.breakdown());

    if let Some(csv) = state.export_csv() {
        info!("writing {} to stdout", export::EXPORT_FILE_NAME);
        print!("{}", csv?);
    }
    Ok(())
}

// verifies that types can implement the gated traits below
#[allow(dead_code)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<emi::ScheduleRow>();
    is_normal::<emi::Schedule>();
    is_normal::<CalculatorState>();
}
