//! TTL-based change-window estimation.
//!
//! A resolver only reports how long a record may still be cached, not when
//! it last changed. The estimate assumes the record was issued a full TTL ago,
//! so the result is a heuristic and must be presented as one.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::AnswerSet;

/// Estimated last change and next refresh for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StalenessEstimate {
    /// `now - ttl`
    pub estimated_last_change: DateTime<Utc>,

    /// `estimated_last_change + ttl`, which equals `now` at evaluation time
    pub next_refresh: DateTime<Utc>,
}

impl StalenessEstimate {
    /// Width of the window, always the TTL it was computed from
    #[must_use]
    pub fn window(&self) -> TimeDelta {
        self.next_refresh - self.estimated_last_change
    }
}

/// Estimate the change window for a TTL observed at `now`
#[must_use]
pub fn estimate_change_window(ttl_seconds: u32, now: DateTime<Utc>) -> StalenessEstimate {
    let ttl = TimeDelta::seconds(i64::from(ttl_seconds));
    let estimated_last_change = now - ttl;

    StalenessEstimate {
        estimated_last_change,
        next_refresh: estimated_last_change + ttl,
    }
}

/// Outcome of estimating from an answer set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Staleness {
    /// Estimate from the first record's TTL
    Estimated(StalenessEstimate),
    /// No record to estimate from
    Unavailable,
}

impl Staleness {
    /// Estimate from the first record of `answers`
    #[must_use]
    pub fn from_answers(answers: &AnswerSet, now: DateTime<Utc>) -> Self {
        answers
            .ttl_remaining()
            .map_or(Self::Unavailable, |ttl| Self::Estimated(estimate_change_window(ttl, now)))
    }

    /// The estimate, if one was possible
    #[must_use]
    pub const fn estimate(&self) -> Option<&StalenessEstimate> {
        match self {
            Self::Estimated(estimate) => Some(estimate),
            Self::Unavailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceRecord;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_window_equals_ttl() {
        let now = fixed_now();
        for ttl in [0, 1, 59, 300, 3600, 86_400, u32::MAX] {
            let estimate = estimate_change_window(ttl, now);
            assert_eq!(estimate.window(), TimeDelta::seconds(i64::from(ttl)));
        }
    }

    #[test]
    fn test_last_change_is_one_ttl_ago() {
        let now = fixed_now();
        let estimate = estimate_change_window(300, now);
        assert_eq!(
            estimate.estimated_last_change,
            Utc.with_ymd_and_hms(2025, 6, 1, 11, 55, 0).unwrap()
        );
        assert_eq!(estimate.next_refresh, now);
    }

    #[test]
    fn test_zero_ttl_collapses_to_now() {
        let now = fixed_now();
        let estimate = estimate_change_window(0, now);
        assert_eq!(estimate.estimated_last_change, now);
        assert_eq!(estimate.next_refresh, now);
    }

    #[test]
    fn test_empty_answers_unavailable() {
        assert_eq!(
            Staleness::from_answers(&AnswerSet::default(), fixed_now()),
            Staleness::Unavailable
        );
    }

    #[test]
    fn test_uses_first_record_ttl() {
        let answers = AnswerSet::new(vec![
            ResourceRecord::new("www.example.com.", 5, 120, "example.com."),
            ResourceRecord::new("example.com.", 1, 3600, "192.0.2.1"),
        ]);
        let staleness = Staleness::from_answers(&answers, fixed_now());
        let estimate = staleness.estimate().unwrap();
        assert_eq!(estimate.window(), TimeDelta::seconds(120));
    }
}
