//! Read-only streak health classification.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::streak::{hours_between, CompletionWindow, UserStreakRecord};

/// Health of a streak relative to the 24/48-hour windows.
///
/// Uses the same half-open boundaries as [`CompletionWindow`]: at exactly
/// 24 hours the streak is ready to extend, at exactly 48 it is lapsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StreakStatus {
    /// No completion has ever been recorded.
    NoCompletions,
    /// Inside the same-day window; extending is not yet possible.
    Waiting { hours_remaining: f64 },
    /// Inside the extension window; a completion now grows the streak.
    ReadyToExtend { hours_since: f64 },
    /// Past the extension window; the next completion resets the streak.
    Lapsing { hours_since: f64 },
}

/// Point-in-time report of a user's streak, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub display_name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u64,
    pub last_completion_at: Option<DateTime<Utc>>,
    pub status: StreakStatus,
}

impl StatusReport {
    /// Classify a record against `now`. Pure; performs no writes.
    pub fn for_record(record: &UserStreakRecord, now: DateTime<Utc>) -> Self {
        let status = match record.last_completion_at {
            None => StreakStatus::NoCompletions,
            Some(last) => {
                let hours_since = hours_between(last, now);
                match CompletionWindow::classify(now - last) {
                    CompletionWindow::SameDay => StreakStatus::Waiting {
                        hours_remaining: (24.0 - hours_since).max(0.0),
                    },
                    CompletionWindow::Extend => StreakStatus::ReadyToExtend { hours_since },
                    CompletionWindow::Lapsed => StreakStatus::Lapsing { hours_since },
                }
            }
        };

        Self {
            display_name: record.display_name.clone(),
            current_streak: record.current_streak,
            longest_streak: record.longest_streak,
            total_completions: record.total_completions,
            last_completion_at: record.last_completion_at,
            status,
        }
    }

    /// The last completion instant converted into a display timezone.
    ///
    /// Storage stays UTC; this is the only place conversion happens.
    pub fn last_completion_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.last_completion_at.map(|t| t.with_timezone(tz))
    }
}
