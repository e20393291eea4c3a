use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use eisen_core::promotion::{days_until, MAX_SCHEDULE_DAYS};

pub fn parse_date(date_str: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    parse_date_string(date_str, now, Dialect::Us)
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", date_str, e))
}

/// Days from `now` until `date_str`, counting a partial day as a whole one.
pub fn parse_days_until(date_str: &str, now: DateTime<Utc>) -> Result<i64> {
    let date = parse_date(date_str, now)?;
    let days = days_until(now, date);
    if days < 1 {
        return Err(anyhow!("'{}' is not in the future", date_str));
    }
    if days > MAX_SCHEDULE_DAYS {
        return Err(anyhow!(
            "'{}' is more than {} days away",
            date_str,
            MAX_SCHEDULE_DAYS
        ));
    }
    Ok(days)
}
