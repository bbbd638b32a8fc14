use chrono::{DateTime, TimeDelta, Utc};

/// Half-open time window `[start, end)`; an absent `end` is unbounded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Everything at or after `now - hours`. Out-of-range spans open the
    /// window all the way back.
    pub fn last_hours(now: DateTime<Utc>, hours: i64) -> Self {
        let start = TimeDelta::try_hours(hours.max(0))
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { start, end: None }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && self.end.is_none_or(|end| t < end)
    }
}
