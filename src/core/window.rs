use crate::domain::model::ReportingWindow;
use chrono::{Datelike, Local, NaiveDate};

/// Quarter a month belongs to, using the price service's own partition:
/// 1-3 -> Q1, 4-6 -> Q2, 7-10 -> Q3, 11-12 -> Q4. The four-month third
/// quarter is how the upstream service defines its periods, not a bug.
pub fn quarter_for_month(month: u32) -> u32 {
    match month {
        1..=3 => 1,
        4..=6 => 2,
        7..=10 => 3,
        _ => 4,
    }
}

fn period_code(year: i32, quarter: u32) -> String {
    format!("{}{}", year, quarter)
}

impl ReportingWindow {
    /// Search range for the given date: the service publishes with a
    /// two-quarter lag, so the window starts two quarters back and ends one
    /// quarter back. Dates at or before 2006-Q1 clamp to the service's
    /// earliest available quarter (data starts at 2005-Q3).
    pub fn for_date(date: NaiveDate) -> Self {
        let year = date.year();
        let quarter = quarter_for_month(date.month());

        if year <= 2006 && quarter <= 1 {
            return Self {
                from: "20053".to_string(),
                to: "20054".to_string(),
            };
        }

        let (from, to) = match quarter {
            1 => (period_code(year - 1, 3), period_code(year - 1, 4)),
            2 => (period_code(year - 1, 4), period_code(year, 1)),
            q => (period_code(year, q - 2), period_code(year, q - 1)),
        };
        Self { from, to }
    }

    /// Window for today, from the local clock. Never fails.
    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }
}
