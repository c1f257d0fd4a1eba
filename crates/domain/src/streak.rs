//! The per-user completion streak state machine.
//!
//! A streak counts consecutive qualifying days. Each recorded completion
//! lands in one of three windows relative to the previous one:
//!
//! - under 24 hours: same day, the streak does not grow
//! - 24 up to (but not including) 48 hours: the streak extends by one
//! - 48 hours or more: the streak lapsed and resets to one
//!
//! All instants are stored timezone-normalized to UTC. Display-zone
//! conversion happens at the reporting boundary only (see `status`).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::SteamId;

/// Window a new completion lands in, relative to the previous one.
///
/// Boundaries are half-open: exactly 24 hours extends, exactly 48 lapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionWindow {
    /// Less than 24 hours since the last completion.
    SameDay,
    /// At least 24 but less than 48 hours: the streak grows.
    Extend,
    /// 48 hours or more: the streak is broken.
    Lapsed,
}

impl CompletionWindow {
    /// Classify elapsed time since the last completion.
    ///
    /// Exhaustive over non-negative durations; comparisons are exact
    /// `chrono::Duration` comparisons, not floating-point hours.
    pub fn classify(elapsed: Duration) -> Self {
        if elapsed < Duration::hours(24) {
            Self::SameDay
        } else if elapsed < Duration::hours(48) {
            Self::Extend
        } else {
            Self::Lapsed
        }
    }
}

/// Classification of a recorded completion, for caller-facing feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompletionOutcome {
    /// First completion ever recorded for this user.
    FirstCompletion,
    /// Completed within the same 24-hour window; streak unchanged.
    AlreadyCompletedToday { hours_since: f64 },
    /// Completed in the 24-48 hour window; streak grew by one.
    StreakExtended { current: u32, longest: u32 },
    /// More than 48 hours elapsed; streak reset to one.
    StreakReset { previous: u32 },
}

/// Fractional hours between two instants, for human-facing reporting.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}

/// One streak record per user, keyed by Steam ID.
///
/// Counters are mutated exclusively through [`UserStreakRecord::apply_completion`];
/// `longest_streak >= current_streak` holds after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStreakRecord {
    pub steam_id: SteamId,
    pub display_name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u64,
    pub last_completion_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserStreakRecord {
    /// Fresh record with zeroed counters.
    ///
    /// Without a usable display name hint the name falls back to
    /// `User_<last 4 digits of the key>`.
    pub fn new(steam_id: SteamId, display_name: Option<&str>, now: DateTime<Utc>) -> Self {
        let display_name = match display_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("User_{}", steam_id.suffix(4)),
        };
        Self {
            steam_id,
            display_name,
            current_streak: 0,
            longest_streak: 0,
            total_completions: 0,
            last_completion_at: None,
            created_at: now,
        }
    }

    /// Advance the state machine for a completion observed at `now`.
    ///
    /// Every completion increments `total_completions` and refreshes
    /// `last_completion_at`, including the same-day case. A lapsed streak
    /// never touches `longest_streak` (the resulting streak is one).
    pub fn apply_completion(&mut self, now: DateTime<Utc>) -> CompletionOutcome {
        let outcome = match self.last_completion_at {
            None => {
                self.current_streak = 1;
                self.longest_streak = self.longest_streak.max(1);
                CompletionOutcome::FirstCompletion
            }
            Some(last) => match CompletionWindow::classify(now - last) {
                CompletionWindow::SameDay => CompletionOutcome::AlreadyCompletedToday {
                    hours_since: hours_between(last, now),
                },
                CompletionWindow::Extend => {
                    self.current_streak += 1;
                    self.longest_streak = self.longest_streak.max(self.current_streak);
                    CompletionOutcome::StreakExtended {
                        current: self.current_streak,
                        longest: self.longest_streak,
                    }
                }
                CompletionWindow::Lapsed => {
                    let previous = self.current_streak;
                    self.current_streak = 1;
                    CompletionOutcome::StreakReset { previous }
                }
            },
        };

        self.total_completions += 1;
        self.last_completion_at = Some(now);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_steam_id() -> SteamId {
        SteamId::new("76561198012345678").expect("valid id")
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid time")
    }

    #[test]
    fn window_boundaries_are_half_open() {
        assert_eq!(
            CompletionWindow::classify(Duration::zero()),
            CompletionWindow::SameDay
        );
        assert_eq!(
            CompletionWindow::classify(Duration::hours(24) - Duration::seconds(1)),
            CompletionWindow::SameDay
        );
        // Exactly 24.0 hours extends, not same-day.
        assert_eq!(
            CompletionWindow::classify(Duration::hours(24)),
            CompletionWindow::Extend
        );
        assert_eq!(
            CompletionWindow::classify(Duration::hours(48) - Duration::seconds(1)),
            CompletionWindow::Extend
        );
        // Exactly 48.0 hours lapses, not extends.
        assert_eq!(
            CompletionWindow::classify(Duration::hours(48)),
            CompletionWindow::Lapsed
        );
        assert_eq!(
            CompletionWindow::classify(Duration::days(30)),
            CompletionWindow::Lapsed
        );
    }

    #[test]
    fn fallback_display_name_uses_key_suffix() {
        let record = UserStreakRecord::new(test_steam_id(), None, t0());
        assert_eq!(record.display_name, "User_5678");

        let blank = UserStreakRecord::new(test_steam_id(), Some("   "), t0());
        assert_eq!(blank.display_name, "User_5678");

        let named = UserStreakRecord::new(test_steam_id(), Some("gordon"), t0());
        assert_eq!(named.display_name, "gordon");
    }

    #[test]
    fn first_completion_starts_streak_at_one() {
        let mut record = UserStreakRecord::new(test_steam_id(), None, t0());
        let outcome = record.apply_completion(t0());

        assert_eq!(outcome, CompletionOutcome::FirstCompletion);
        assert_eq!(record.current_streak, 1);
        assert_eq!(record.longest_streak, 1);
        assert_eq!(record.total_completions, 1);
        assert_eq!(record.last_completion_at, Some(t0()));
    }

    #[test]
    fn same_day_completion_leaves_streak_unchanged() {
        let mut record = UserStreakRecord::new(test_steam_id(), None, t0());
        record.apply_completion(t0());

        let later = t0() + Duration::hours(10);
        let outcome = record.apply_completion(later);

        match outcome {
            CompletionOutcome::AlreadyCompletedToday { hours_since } => {
                assert!((hours_since - 10.0).abs() < 1e-9);
            }
            other => panic!("expected same-day outcome, got {other:?}"),
        }
        assert_eq!(record.current_streak, 1);
        assert_eq!(record.total_completions, 2);
        // The same-day branch still refreshes the instant.
        assert_eq!(record.last_completion_at, Some(later));
    }

    #[test]
    fn thirty_hour_gap_extends_streak() {
        let mut record = UserStreakRecord::new(test_steam_id(), None, t0());
        record.apply_completion(t0());

        let outcome = record.apply_completion(t0() + Duration::hours(30));

        assert_eq!(
            outcome,
            CompletionOutcome::StreakExtended {
                current: 2,
                longest: 2
            }
        );
        assert_eq!(record.current_streak, 2);
        assert_eq!(record.longest_streak, 2);
        assert_eq!(record.total_completions, 2);
    }

    #[test]
    fn exactly_24_hours_extends_and_exactly_48_resets() {
        let mut record = UserStreakRecord::new(test_steam_id(), None, t0());
        record.apply_completion(t0());

        let outcome = record.apply_completion(t0() + Duration::hours(24));
        assert!(matches!(outcome, CompletionOutcome::StreakExtended { .. }));

        let outcome = record.apply_completion(t0() + Duration::hours(24) + Duration::hours(48));
        assert_eq!(outcome, CompletionOutcome::StreakReset { previous: 2 });
        assert_eq!(record.current_streak, 1);
    }

    #[test]
    fn lapse_resets_streak_but_keeps_longest() {
        let mut record = UserStreakRecord::new(test_steam_id(), None, t0());
        record.apply_completion(t0());
        record.apply_completion(t0() + Duration::hours(30));

        let outcome = record.apply_completion(t0() + Duration::hours(100));

        assert_eq!(outcome, CompletionOutcome::StreakReset { previous: 2 });
        assert_eq!(record.current_streak, 1);
        assert_eq!(record.longest_streak, 2);
        assert_eq!(record.total_completions, 3);
    }

    #[test]
    fn longest_streak_never_below_current() {
        let mut record = UserStreakRecord::new(test_steam_id(), None, t0());
        let mut now = t0();

        // Mixed sequence of first, same-day, extend, and lapse transitions.
        for gap_hours in [0i64, 5, 26, 30, 120, 24, 47, 48, 10] {
            now = now + Duration::hours(gap_hours);
            record.apply_completion(now);
            assert!(
                record.longest_streak >= record.current_streak,
                "invariant violated after gap of {gap_hours}h"
            );
        }
    }

    #[test]
    fn hours_between_reports_fractions() {
        let later = t0() + Duration::minutes(90);
        assert!((hours_between(t0(), later) - 1.5).abs() < 1e-9);
    }
}
