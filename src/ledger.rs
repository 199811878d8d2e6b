use crate::storage::KeyValueStore;
use chrono::{Datelike, NaiveDate};
use tracing::warn;

pub const GOAL_KEY: &str = "dailyGoalInMinutes";
pub const DEFAULT_GOAL_MINUTES: u32 = 60;

const TOTAL_KEY_PREFIX: &str = "focusData_";

/// `focusData_<year>-<month>-<day>`, month and day without zero padding.
pub fn date_key(date: NaiveDate) -> String {
    format!(
        "{TOTAL_KEY_PREFIX}{}-{}-{}",
        date.year(),
        date.month(),
        date.day()
    )
}

pub fn total_for<S: KeyValueStore + ?Sized>(store: &S, date_key: &str) -> u64 {
    let Some(raw) = store.get(date_key) else {
        return 0;
    };
    match raw.trim().parse::<u64>() {
        Ok(total) => total,
        Err(_) => {
            warn!(key = date_key, value = %raw, "ignoring malformed focus total");
            0
        }
    }
}

/// Adds `delta_seconds` to the stored total and returns the new total.
/// Negative deltas (clock skew) are treated as zero.
pub fn add_to_total<S: KeyValueStore + ?Sized>(
    store: &mut S,
    date_key: &str,
    delta_seconds: i64,
) -> u64 {
    if delta_seconds < 0 {
        warn!(key = date_key, delta_seconds, "refusing negative focus delta");
    }
    let delta = u64::try_from(delta_seconds).unwrap_or(0);
    let total = total_for(store, date_key).saturating_add(delta);
    store.set(date_key, total.to_string());
    total
}

pub fn goal_minutes<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
    let Some(raw) = store.get(GOAL_KEY) else {
        return DEFAULT_GOAL_MINUTES;
    };
    match raw.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => minutes,
        _ => {
            warn!(value = %raw, "ignoring malformed daily goal");
            DEFAULT_GOAL_MINUTES
        }
    }
}

/// Non-positive goals are ignored.
pub fn set_goal_minutes<S: KeyValueStore + ?Sized>(store: &mut S, minutes: i64) -> bool {
    match u32::try_from(minutes) {
        Ok(minutes) if minutes > 0 => {
            store.set(GOAL_KEY, minutes.to_string());
            true
        }
        _ => false,
    }
}

/// Parses goal text typed by a user. Anything but a whole number is `None`.
pub fn parse_goal_input(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::AppData;

    #[test]
    fn date_key_is_not_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(date_key(date), "focusData_2026-1-5");
        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(date_key(date), "focusData_2026-12-31");
    }

    #[test]
    fn unseen_date_has_zero_total() {
        let data = AppData::default();
        assert_eq!(total_for(&data, "focusData_2026-1-5"), 0);
    }

    #[test]
    fn add_to_total_accumulates() {
        let mut data = AppData::default();
        assert_eq!(add_to_total(&mut data, "focusData_2026-1-5", 90), 90);
        assert_eq!(add_to_total(&mut data, "focusData_2026-1-5", 30), 120);
        assert_eq!(data.get("focusData_2026-1-5").as_deref(), Some("120"));
        assert_eq!(total_for(&data, "focusData_2026-1-6"), 0);
    }

    #[test]
    fn negative_delta_never_decreases_total() {
        let mut data = AppData::default();
        add_to_total(&mut data, "focusData_2026-1-5", 50);
        assert_eq!(add_to_total(&mut data, "focusData_2026-1-5", -20), 50);
    }

    #[test]
    fn malformed_total_counts_as_zero() {
        let mut data = AppData::default();
        data.set("focusData_2026-1-5", "twelve".to_string());
        assert_eq!(total_for(&data, "focusData_2026-1-5"), 0);
        assert_eq!(add_to_total(&mut data, "focusData_2026-1-5", 7), 7);
    }

    #[test]
    fn goal_defaults_to_sixty() {
        let mut data = AppData::default();
        assert_eq!(goal_minutes(&data), 60);
        data.set(GOAL_KEY, "abc".to_string());
        assert_eq!(goal_minutes(&data), 60);
        data.set(GOAL_KEY, "0".to_string());
        assert_eq!(goal_minutes(&data), 60);
    }

    #[test]
    fn non_positive_goals_are_rejected() {
        let mut data = AppData::default();
        assert!(set_goal_minutes(&mut data, 25));
        assert!(!set_goal_minutes(&mut data, 0));
        assert!(!set_goal_minutes(&mut data, -5));
        assert_eq!(goal_minutes(&data), 25);
    }

    #[test]
    fn goal_input_must_be_a_whole_number() {
        assert_eq!(parse_goal_input(" 45 "), Some(45));
        assert_eq!(parse_goal_input("-5"), Some(-5));
        assert_eq!(parse_goal_input("abc"), None);
        assert_eq!(parse_goal_input("12.5"), None);
        assert_eq!(parse_goal_input(""), None);
    }
}
