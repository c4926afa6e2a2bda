use emi::{amortize, compute_summary, export, generate_schedule, loan, LoanInputs};

const LOANS: [(f64, f64, f64); 6] = [
    (100000., 10., 1.),
    (500000., 8.5, 20.),
    (2500., 24., 0.5),
    (350000., 6.75, 30.),
    (1_000_000., 12., 5.),
    (18000., 3.2, 3.),
];

fn assert_close(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() <= eps,
        "{} is not within {} of {}",
        actual,
        eps,
        expected
    );
}

fn schedule_for(principal: f64, rate_percent: f64, years: f64) -> emi::Schedule {
    let summary = compute_summary(principal, rate_percent, years).unwrap();
    generate_schedule(
        principal,
        loan::periodic_rate(rate_percent),
        loan::period_count(years),
        summary.periodic_payment,
    )
}

#[test]
fn totals_follow_from_payment() {
    for (principal, rate, years) in LOANS {
        let summary = compute_summary(principal, rate, years).unwrap();
        let periods = loan::period_count(years);
        assert_close(summary.periodic_payment * periods, summary.total_payment, 0.01);
        assert_close(summary.total_payment - principal, summary.total_interest, 0.01);
    }
}

#[test]
fn schedules_pay_off_the_principal() {
    for (principal, rate, years) in LOANS {
        let schedule = schedule_for(principal, rate, years);

        assert!(schedule.len() as f64 <= loan::period_count(years));
        assert_close(schedule.final_balance().unwrap(), 0., 0.01);
        assert_close(schedule.total_principal(), principal, 0.01);
    }
}

#[test]
fn calculations_are_repeatable() {
    for (principal, rate, years) in LOANS {
        assert_eq!(
            compute_summary(principal, rate, years).unwrap(),
            compute_summary(principal, rate, years).unwrap()
        );
        assert_eq!(
            schedule_for(principal, rate, years),
            schedule_for(principal, rate, years)
        );
    }
}

#[test]
fn zero_rate_splits_principal_evenly() {
    let result = amortize(&LoanInputs::new(60000., 0., 5.)).unwrap();

    assert_eq!(result.summary.periodic_payment, 1000.);
    assert!(result.summary.total_interest.abs() < 1e-9);
    assert_eq!(result.schedule.len(), 60);
    assert_eq!(result.schedule.final_balance(), Some(0.));
}

#[test]
fn invalid_terms_produce_no_schedule() {
    assert!(amortize(&LoanInputs::new(0., 10., 1.)).unwrap_err().is_invalid_input());
    assert!(amortize(&LoanInputs::new(1000., 10., 0.)).unwrap_err().is_invalid_input());
    assert!(amortize(&LoanInputs::new(1000., -1., 1.)).unwrap_err().is_invalid_input());
}

#[test]
fn one_year_loan_end_to_end() {
    let result = amortize(&LoanInputs::new(100000., 10., 1.)).unwrap();
    let summary = result.summary.rounded();

    assert_eq!(summary.periodic_payment, 8791.59);
    assert_close(summary.total_payment, 105499.06, 0.01);
    assert_close(summary.total_interest, 5499.06, 0.01);
    assert_eq!(result.schedule.len(), 12);

    let csv = export::to_csv(&result.schedule).unwrap();
    assert_eq!(csv.lines().count(), 13);
    assert!(csv.ends_with("12,8791.59,72.66,8718.93,0\n"));
}

#[test]
fn twenty_year_loan_end_to_end() {
    let result = amortize(&LoanInputs::new(500000., 8.5, 20.)).unwrap();

    assert_eq!(result.schedule.len(), 240);
    assert_close(result.schedule.total_principal(), 500000., 0.01);
    assert_close(result.schedule.total_interest(), result.summary.total_interest, 0.01);
}
