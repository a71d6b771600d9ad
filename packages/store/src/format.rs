//! Display formatting helpers shared by cards, lists and the dashboard.

use chrono::{DateTime, Utc};

/// `12 Mar 2025`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Human-friendly age of `then` relative to `now`.
///
/// Falls back to [`format_date`] after 30 days. Future timestamps read as
/// "just now".
pub fn relative_time(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = (*now - *then).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return format!("{} ago", pluralize(minutes, "minute", "minutes"));
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} ago", pluralize(hours, "hour", "hours"));
    }
    let days = hours / 24;
    match days {
        1 => "yesterday".to_string(),
        2..=30 => format!("{days} days ago"),
        _ => format_date(then),
    }
}

/// Cut `text` to at most `max` characters, ending with `…` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push('…');
    out
}

/// `1 project`, `3 projects`.
pub fn pluralize(count: i64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Up to two uppercase initials from a name: `Ada Lovelace` → `AL`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&at(2025, 3, 2)), "2 Mar 2025");
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = at(2025, 3, 20);
        assert_eq!(relative_time(&(now - TimeDelta::seconds(5)), &now), "just now");
        assert_eq!(relative_time(&(now + TimeDelta::hours(1)), &now), "just now");
        assert_eq!(relative_time(&(now - TimeDelta::minutes(1)), &now), "1 minute ago");
        assert_eq!(relative_time(&(now - TimeDelta::minutes(45)), &now), "45 minutes ago");
        assert_eq!(relative_time(&(now - TimeDelta::hours(3)), &now), "3 hours ago");
        assert_eq!(relative_time(&(now - TimeDelta::hours(30)), &now), "yesterday");
        assert_eq!(relative_time(&(now - TimeDelta::days(6)), &now), "6 days ago");
        assert_eq!(relative_time(&at(2024, 12, 1), &now), "1 Dec 2024");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("hello wonderful world", 10), "hello won…");
        assert_eq!(truncate("hello world", 7), "hello…");
        assert_eq!(truncate("ünïcödé text", 5), "ünïc…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_pluralize_and_initials() {
        assert_eq!(pluralize(1, "project", "projects"), "1 project");
        assert_eq!(pluralize(0, "project", "projects"), "0 projects");
        assert_eq!(initials("ada lovelace byron"), "AL");
        assert_eq!(initials("  grace  "), "G");
        assert_eq!(initials(""), "");
    }
}
