use time::{macros::format_description, Date, Duration, OffsetDateTime};

use crate::error::{ApiError, ApiResult};

/// Monday of the week containing `date`.
pub fn monday_of(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().number_days_from_monday()))
}

fn to_iso(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a `YYYY-MM-DD` date and snaps it back to its week's Monday.
pub fn normalize_week_start(raw: &str) -> ApiResult<String> {
    let fmt = format_description!("[year]-[month]-[day]");
    let date = Date::parse(raw.trim(), &fmt)
        .map_err(|_| ApiError::InvalidArgument("week_start must be a YYYY-MM-DD date".into()))?;
    Ok(to_iso(monday_of(date)))
}

/// Monday of the current week (UTC).
pub fn current_week_start() -> String {
    to_iso(monday_of(OffsetDateTime::now_utc().date()))
}

pub fn check_day_of_week(day: i64) -> ApiResult<()> {
    if (0..=6).contains(&day) {
        Ok(())
    } else {
        Err(ApiError::InvalidArgument(
            "Day must be 0 (Mon) to 6 (Sun)".into(),
        ))
    }
}
