use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime};

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Naive formats accepted for `order_purchase_timestamp`, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a purchase timestamp into a naive wall-clock [`NaiveDateTime`].
///
/// Accepts space- or `T`-separated date-times with optional fractional
/// seconds, RFC 3339 strings (the offset is dropped and the wall-clock time
/// kept), and bare `YYYY-MM-DD` dates (midnight). Returns `None` for empty
/// strings or unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a `YYYY-MM-DD` calendar date (used for CLI range bounds).
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {s:?} ({e})"))
}

// ── Date arithmetic ───────────────────────────────────────────────────────────

/// Move `date` by `delta` days, saturating at chrono's representable range.
pub fn shift_days(date: NaiveDate, delta: i64) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_days(Days::new(delta as u64))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Move `date` by `delta` calendar months.
///
/// The day is clamped to the end of the target month (Jan 31 + 1 month is
/// Feb 28/29).
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta as u32))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Clamp `date` into `[lo, hi]`.
pub fn clamp_date(date: NaiveDate, lo: NaiveDate, hi: NaiveDate) -> NaiveDate {
    date.max(lo).min(hi)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── parse_timestamp ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_space_separated() {
        let ts = parse_timestamp("2017-10-02 10:56:33").unwrap();
        assert_eq!(ts.date(), date(2017, 10, 2));
        assert_eq!(ts.format("%H:%M:%S").to_string(), "10:56:33");
    }

    #[test]
    fn test_parse_t_separated_with_fraction() {
        let ts = parse_timestamp("2018-07-24T20:41:37.123").unwrap();
        assert_eq!(ts.date(), date(2018, 7, 24));
    }

    #[test]
    fn test_parse_without_seconds() {
        let ts = parse_timestamp("2018-07-24 20:41").unwrap();
        assert_eq!(ts.format("%H:%M:%S").to_string(), "20:41:00");
    }

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        let ts = parse_timestamp("2018-01-31T23:30:00+07:00").unwrap();
        assert_eq!(ts.date(), date(2018, 1, 31));
        assert_eq!(ts.format("%H:%M").to_string(), "23:30");
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let ts = parse_timestamp("2018-08-08").unwrap();
        assert_eq!(ts.date(), date(2018, 8, 8));
        assert_eq!(ts.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_timestamp("  2018-08-08 10:00:00 ").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("2018-13-01 00:00:00").is_none());
        assert!(parse_timestamp("08/08/2018").is_none());
    }

    // ── parse_date ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_date_ok() {
        assert_eq!(parse_date("2021-01-31"), Ok(date(2021, 1, 31)));
    }

    #[test]
    fn test_parse_date_err_mentions_format() {
        let err = parse_date("31/01/2021").unwrap_err();
        assert!(err.contains("YYYY-MM-DD"), "got: {err}");
    }

    // ── shifting ──────────────────────────────────────────────────────────────

    #[test]
    fn test_shift_days_both_directions() {
        assert_eq!(shift_days(date(2021, 1, 31), 1), date(2021, 2, 1));
        assert_eq!(shift_days(date(2021, 3, 1), -1), date(2021, 2, 28));
        assert_eq!(shift_days(date(2021, 3, 1), 0), date(2021, 3, 1));
    }

    #[test]
    fn test_shift_months_clamps_day() {
        assert_eq!(shift_months(date(2021, 1, 31), 1), date(2021, 2, 28));
        assert_eq!(shift_months(date(2020, 3, 31), -1), date(2020, 2, 29));
        assert_eq!(shift_months(date(2020, 12, 15), 1), date(2021, 1, 15));
    }

    #[test]
    fn test_clamp_date() {
        let lo = date(2021, 1, 1);
        let hi = date(2021, 12, 31);
        assert_eq!(clamp_date(date(2020, 6, 1), lo, hi), lo);
        assert_eq!(clamp_date(date(2022, 6, 1), lo, hi), hi);
        assert_eq!(clamp_date(date(2021, 6, 1), lo, hi), date(2021, 6, 1));
    }
}
