use chrono::{DateTime, Utc};

/// Label an activity timestamp relative to `now`.
///
/// Under an hour is "Just now", then whole hours up to a day, "Yesterday" up
/// to two days, and the calendar date (`M/D/YYYY`) beyond that. Timestamps in
/// the future count as "Just now".
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - timestamp).num_hours();

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if hours < 48 {
        "Yesterday".to_string()
    } else {
        timestamp.format("%-m/%-d/%Y").to_string()
    }
}

/// Same as [`format_relative`] for a unix timestamp in seconds
pub fn format_relative_unix(timestamp: i64, now: DateTime<Utc>) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(ts) => format_relative(ts, now),
        None => {
            tracing::warn!("Timestamp {} is out of range", timestamp);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_within_the_hour() {
        let now = at("2024-01-15T12:00:00Z");
        assert_eq!(format_relative(at("2024-01-15T11:30:00Z"), now), "Just now");
        assert_eq!(format_relative(at("2024-01-15T11:00:01Z"), now), "Just now");
        assert_eq!(format_relative(now, now), "Just now");
    }

    #[test]
    fn test_hours_ago() {
        let now = at("2024-01-15T12:00:00Z");
        assert_eq!(format_relative(at("2024-01-15T02:00:00Z"), now), "10h ago");
        assert_eq!(format_relative(at("2024-01-15T11:00:00Z"), now), "1h ago");
        assert_eq!(format_relative(at("2024-01-14T12:00:01Z"), now), "23h ago");
    }

    #[test]
    fn test_yesterday() {
        let now = at("2024-01-15T12:00:00Z");
        assert_eq!(format_relative(at("2024-01-14T12:00:00Z"), now), "Yesterday");
        assert_eq!(format_relative(at("2024-01-14T00:00:00Z"), now), "Yesterday");
    }

    #[test]
    fn test_older_dates() {
        let now = at("2024-01-15T12:00:00Z");
        assert_eq!(format_relative(at("2024-01-13T12:00:00Z"), now), "1/13/2024");
        assert_eq!(format_relative(at("2023-11-02T08:00:00Z"), now), "11/2/2023");
    }

    #[test]
    fn test_future_timestamp() {
        let now = at("2024-01-15T12:00:00Z");
        assert_eq!(format_relative(at("2024-01-16T12:00:00Z"), now), "Just now");
    }

    #[test]
    fn test_unix_seconds() {
        let now = at("2024-01-15T12:00:00Z");
        let ten_hours_ago = now.timestamp() - 10 * 3600;
        assert_eq!(format_relative_unix(ten_hours_ago, now), "10h ago");
    }
}
