use chrono::{Datelike, Duration, Months, NaiveDate};

/// Monday of the ISO week containing `date`, or `None` when that Monday is
/// before `NaiveDate::MIN`.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(i64::from(
        date.weekday().num_days_from_monday(),
    )))
}

/// Sunday closing the ISO week containing `date`, or `None` past `NaiveDate::MAX`.
pub fn week_end(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(i64::from(
        6 - date.weekday().num_days_from_monday(),
    )))
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date)).unwrap_or(date)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        4 | 6 | 9 | 11 => 30,
        2 if date.leap_year() => 29,
        2 => 28,
        _ => 31,
    }
}

pub fn first_day_of_year(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

pub fn last_day_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date)
}

/// Signed whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Signed calendar-month distance between the months containing `from` and `to`.
/// The day of month is ignored.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let years = i64::from(to.year() - from.year());
    let months = i64::from(to.month0()) - i64::from(from.month0());
    years * 12 + months
}

/// Move `date` by whole months, clamping the day to the target month's length.
/// `None` when the result leaves chrono's date range.
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

/// Move `date` by whole weeks. `None` when the result leaves chrono's date range.
pub fn shift_weeks(date: NaiveDate, weeks: i32) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::weeks(i64::from(weeks)))
}

/// Every day from `start` to `end`, both inclusive. Unlike `iter_days` this
/// also yields `NaiveDate::MAX`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}
