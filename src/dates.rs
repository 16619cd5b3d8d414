//! Due-date parsing and formatting helpers.

use chrono::{Datelike, Duration, NaiveDate};

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow"
/// - "in 3d", "in 2w"
/// - bare weekday names ("friday", "fri") for this week's occurrence
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    // "in X" patterns
    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    // Weekday patterns: this week's occurrence, today included.
    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    for (day_name, target_day) in weekdays {
        if s == day_name {
            let current_day = today.weekday().num_days_from_monday() as i32;
            let days_ahead = (target_day + 7 - current_day) % 7;
            return Some(today + Duration::days(days_ahead as i64));
        }
    }

    // Try ISO format
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDate, today: NaiveDate) -> String {
    let delta = (due - today).num_days();
    if delta == 0 {
        "today".into()
    } else if delta == 1 {
        "tomorrow".into()
    } else if delta > 1 {
        format!("in {delta}d")
    } else {
        format!("{}d late", -delta)
    }
}
