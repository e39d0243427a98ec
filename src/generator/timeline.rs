use chrono::{DateTime, Duration, DurationRound, Utc};

/// Truncate `now` down to the previous multiple of `interval_minutes`.
pub fn aligned_now(now: DateTime<Utc>, interval_minutes: i64) -> DateTime<Utc> {
    now.duration_trunc(Duration::minutes(interval_minutes))
        .unwrap_or(now)
}

/// `count` equally spaced timestamps, oldest first, the last one aligned to
/// an `interval_minutes` boundary at or before `now`.
pub fn reading_timestamps(
    now: DateTime<Utc>,
    count: usize,
    interval_minutes: i64,
) -> Vec<DateTime<Utc>> {
    let end = aligned_now(now, interval_minutes);
    (0..count)
        .map(|i| {
            let steps_back = (count - 1 - i) as i64;
            end - Duration::minutes(interval_minutes * steps_back)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn aligns_down_to_quarter_hour() {
        let aligned = aligned_now(at("2026-05-04T10:44:59.731Z"), 15);
        assert_eq!(aligned, at("2026-05-04T10:30:00Z"));
    }

    #[test]
    fn already_aligned_is_unchanged() {
        let t = at("2026-05-04T10:45:00Z");
        assert_eq!(aligned_now(t, 15), t);
    }

    #[test]
    fn timestamps_equally_spaced_and_ordered() {
        let stamps = reading_timestamps(at("2026-05-04T10:44:00Z"), 192, 15);
        assert_eq!(stamps.len(), 192);
        assert_eq!(*stamps.last().unwrap(), at("2026-05-04T10:30:00Z"));
        assert_eq!(stamps[0], at("2026-05-02T10:45:00Z"));
        for pair in stamps.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(15));
        }
        assert!(stamps.iter().all(|t| t.minute() % 15 == 0 && t.second() == 0));
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(reading_timestamps(Utc::now(), 0, 15).is_empty());
    }
}
