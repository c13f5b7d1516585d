use chrono::{DateTime, Duration, Utc};

pub fn time_now() -> String {
    Utc::now().to_rfc3339()
}

pub fn time_now_plus_days(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

pub fn time_now_plus_hours(hours: i64) -> String {
    (Utc::now() + Duration::hours(hours)).to_rfc3339()
}

pub fn time_now_minus_hours(hours: i64) -> String {
    (Utc::now() - Duration::hours(hours)).to_rfc3339()
}

/// Whether an RFC 3339 timestamp lies in the past. An unparsable
/// timestamp counts as past so expiry checks fail closed.
pub fn is_past(timestamp: &str) -> bool {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(ts) => Utc::now() > ts,
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_timestamp_is_not_past() {
        assert!(!is_past(&time_now_plus_days(7)));
        assert!(!is_past(&time_now_plus_hours(1)));
    }

    #[test]
    fn test_past_timestamp_is_past() {
        assert!(is_past(&time_now_minus_hours(1)));
    }

    #[test]
    fn test_garbage_timestamp_counts_as_past() {
        assert!(is_past("not a timestamp"));
        assert!(is_past(""));
    }
}
