// Minute-granular cron-like schedule, matched against a point in time.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

/// Three independent match-sets. `None` means "match every value"; `Some(vec![])`
/// means "match nothing" — the latter arises when every token in a schedule
/// field failed to parse (see `oj-catalog`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub minutes: Option<Vec<u32>>,
    pub hours: Option<Vec<u32>>,
    pub days: Option<Vec<Weekday>>,
}

impl Schedule {
    pub fn matches(&self, t: DateTime<Utc>) -> bool {
        field_matches(&self.minutes, t.minute())
            && field_matches(&self.hours, t.hour())
            && field_matches(&self.days, t.weekday())
    }
}

fn field_matches<T: PartialEq>(field: &Option<Vec<T>>, value: T) -> bool {
    match field {
        None => true,
        Some(set) => set.iter().any(|v| *v == value),
    }
}
