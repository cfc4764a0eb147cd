use std::fmt;

use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Time left until a task is due, split into whole days and hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Overdue,
    Left { days: i64, hours: i64 },
}

impl Remaining {
    pub fn is_overdue(self) -> bool {
        matches!(self, Self::Overdue)
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue => write!(f, "⚠️ Overdue!"),
            Self::Left { days, hours } => write!(f, "{days}d {hours}h remaining"),
        }
    }
}

/// Computes the label for `due` as seen at `now`.
///
/// A due time equal to or before `now` is overdue. Partial hours are dropped.
pub fn remaining_time(due: DateTime<Utc>, now: DateTime<Utc>) -> Remaining {
    let diff = due.signed_duration_since(now).num_milliseconds();
    if diff <= 0 {
        return Remaining::Overdue;
    }
    let hours = diff / MILLIS_PER_HOUR;
    Remaining::Left {
        days: hours / 24,
        hours: hours % 24,
    }
}
