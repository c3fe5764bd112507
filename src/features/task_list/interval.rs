//! Free-text interval parsing and display, in minutes

use crate::features::reminders::MAX_INTERVAL_MINUTES;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 60 * 24;
const MINUTES_PER_WEEK: i64 = 60 * 24 * 7;

/// Parse an interval like `45`, `30m`, `2h`, `1d`, `1w` or `1h30m` into minutes
///
/// A bare number means minutes. Returns `None` for anything unparseable or a
/// total outside `1..=MAX_INTERVAL_MINUTES`.
pub fn parse_interval(text: &str) -> Option<i64> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse::<i64>().ok().filter(|m| in_range(*m));
    }

    let mut total: i64 = 0;
    let mut current_number = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() {
            current_number.push(c);
        } else if c.is_whitespace() {
            continue;
        } else {
            if current_number.is_empty() {
                return None;
            }
            let value: i64 = current_number.parse().ok()?;
            current_number.clear();

            let minutes = match c {
                'm' => value,
                'h' => value.checked_mul(MINUTES_PER_HOUR)?,
                'd' => value.checked_mul(MINUTES_PER_DAY)?,
                'w' => value.checked_mul(MINUTES_PER_WEEK)?,
                _ => return None,
            };
            total = total.checked_add(minutes)?;
        }
    }

    // Trailing number without a unit, e.g. "1h30"
    if !current_number.is_empty() {
        return None;
    }

    in_range(total).then_some(total)
}

fn in_range(minutes: i64) -> bool {
    (1..=MAX_INTERVAL_MINUTES).contains(&minutes)
}

/// Human-readable duration for a number of minutes
pub fn format_interval(minutes: i64) -> String {
    fn unit(value: i64, name: &str) -> String {
        format!("{} {}{}", value, name, if value == 1 { "" } else { "s" })
    }

    if minutes < MINUTES_PER_HOUR {
        unit(minutes, "minute")
    } else if minutes < MINUTES_PER_DAY {
        let hours = minutes / MINUTES_PER_HOUR;
        let mins = minutes % MINUTES_PER_HOUR;
        if mins > 0 {
            format!("{} {}", unit(hours, "hour"), unit(mins, "minute"))
        } else {
            unit(hours, "hour")
        }
    } else {
        let days = minutes / MINUTES_PER_DAY;
        let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
        if hours > 0 {
            format!("{} {}", unit(days, "day"), unit(hours, "hour"))
        } else {
            unit(days, "day")
        }
    }
}
