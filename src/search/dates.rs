use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parse a free-form article date into a comparable instant.
///
/// Index metadata carries dates in whichever format the source site used, so
/// a fixed list of patterns is tried in order and the first match wins:
///
/// 1. `2025-02-23`
/// 2. `Feb 22, 2025 05:46 pm`
/// 3. `2025-02-23 17:46:00`
///
/// Anything else (including empty or missing input) falls back to the current
/// wall-clock time, which biases unparseable dates toward the top of a
/// recency sort.
pub(crate) fn normalize(raw: &str) -> NaiveDateTime {
    let s = raw.trim();
    if s.is_empty() {
        return Utc::now().naive_utc();
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_time(NaiveTime::MIN);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%b %d, %Y %I:%M %p") {
        return dt;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return dt;
    }

    Utc::now().naive_utc()
}
