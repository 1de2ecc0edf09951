//! Retention policies and candidate selection
//!
//! Selection is pure: given the entries of one run and the current time, a
//! policy splits them into files eligible for deletion and files retained.

use crate::FileEntry;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Rule deciding which files of a directory tree are eligible for deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Delete every file last modified before `now - threshold`
    ByAge(Duration),

    /// Keep the N most recently modified files, delete the rest
    ByCount(usize),
}

/// Result of applying a policy to the entries of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Files chosen for deletion, in deletion order
    pub eligible: Vec<FileEntry>,

    /// Files the policy keeps
    pub retained: Vec<FileEntry>,
}

impl Selection {
    /// True when nothing is eligible for deletion
    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }
}

impl RetentionPolicy {
    /// Short policy name for logs and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionPolicy::ByAge(_) => "age",
            RetentionPolicy::ByCount(_) => "count",
        }
    }

    /// Split `entries` into eligible and retained files as of `now`
    pub fn select(&self, entries: Vec<FileEntry>, now: SystemTime) -> Selection {
        match *self {
            RetentionPolicy::ByAge(max_age) => select_older_than(entries, cutoff(now, max_age)),
            RetentionPolicy::ByCount(keep) => select_all_but_newest(entries, keep),
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetentionPolicy::ByAge(max_age) => write!(f, "older than {}", describe_age(*max_age)),
            RetentionPolicy::ByCount(keep) => write!(f, "keep {} newest", keep),
        }
    }
}

/// Point in time before which files count as too old.
///
/// Thresholds reaching past the Unix epoch clamp to the epoch, so nothing is
/// selected.
pub fn cutoff(now: SystemTime, max_age: Duration) -> SystemTime {
    now.checked_sub(max_age).unwrap_or(UNIX_EPOCH)
}

/// Every entry modified strictly before `cutoff` is eligible; walk order is kept
pub fn select_older_than(entries: Vec<FileEntry>, cutoff: SystemTime) -> Selection {
    let (eligible, retained): (Vec<FileEntry>, Vec<FileEntry>) = entries
        .into_iter()
        .partition(|entry| entry.is_older_than(cutoff));

    Selection { eligible, retained }
}

/// Retain the `keep` newest entries and mark the rest eligible.
///
/// When there are at most `keep` entries nothing is eligible. Otherwise the
/// entries are stably sorted newest first, so equal timestamps keep their walk
/// order.
pub fn select_all_but_newest(mut entries: Vec<FileEntry>, keep: usize) -> Selection {
    if entries.len() <= keep {
        return Selection {
            eligible: Vec::new(),
            retained: entries,
        };
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    let eligible = entries.split_off(keep);

    Selection {
        eligible,
        retained: entries,
    }
}

/// Parse an age threshold such as `"7d"`, `"12h"`, `"30m"`, `"2w"` or
/// `"1h 30m"`.
///
/// Units are those of [`humantime::parse_duration`]. A bare number is read as
/// days.
pub fn parse_age(input: &str) -> Result<Duration, String> {
    let input = input.trim();

    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return input
            .parse::<u64>()
            .ok()
            .and_then(|days| days.checked_mul(SECS_PER_DAY))
            .map(Duration::from_secs)
            .ok_or_else(|| format!("Age '{}' is too large", input));
    }

    humantime::parse_duration(input).map_err(|e| format!("Invalid age '{}': {}", input, e))
}

/// Render an age threshold in its largest whole unit, e.g. `"7 days"`
pub fn describe_age(age: Duration) -> String {
    let secs = age.as_secs();

    let (value, unit) = if secs == 0 {
        (0, "second")
    } else if secs % SECS_PER_DAY == 0 {
        (secs / SECS_PER_DAY, "day")
    } else if secs % SECS_PER_HOUR == 0 {
        (secs / SECS_PER_HOUR, "hour")
    } else if secs % SECS_PER_MINUTE == 0 {
        (secs / SECS_PER_MINUTE, "minute")
    } else {
        (secs, "second")
    };

    if value == 1 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}
