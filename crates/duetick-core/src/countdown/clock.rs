//! Countdown math.
//!
//! The clock is a pure function over wall-clock inputs -- it keeps no time
//! of its own. The caller samples it periodically (see
//! [`Ticker`](crate::ticker::Ticker)) and renders whatever comes back.
//!
//! ## Anchoring
//!
//! ```text
//! target = last_completed_at + FREQUENCY   (anchored)
//! target = now + FREQUENCY                 (unanchored, no history)
//! ```
//!
//! An unanchored target is re-derived from `now` on every sample, so it
//! drifts forward and never goes overdue until a first completion anchors it.

use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch.
pub type EpochMillis = u64;

/// Recurrence interval between a completion and its next due time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    secs: u64,
}

impl Frequency {
    /// Shipped default: 10 seconds, short enough to watch a full cycle by
    /// hand. The intended production value is 14 days (1_209_600).
    pub const DEFAULT_SECS: u64 = 10;

    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    /// Interval in milliseconds, saturating instead of overflowing.
    pub fn as_millis(&self) -> u64 {
        self.secs.saturating_mul(1000)
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::from_secs(Self::DEFAULT_SECS)
    }
}

/// Duration magnitude split into whole days/hours/minutes/seconds.
///
/// Always non-negative; direction is carried solely by
/// [`CountdownStatus::is_overdue`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Distance {
    pub fn from_millis(ms: u64) -> Self {
        let total_secs = ms / 1000;
        Self {
            days: total_secs / 86_400,
            hours: total_secs % 86_400 / 3_600,
            minutes: total_secs % 3_600 / 60,
            seconds: total_secs % 60,
        }
    }
}

/// Derived, ephemeral countdown state. Recomputed every tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownStatus {
    /// Whether the next-due time is at or before the sampled instant.
    pub is_overdue: bool,
    /// Time to (or since) the next-due time.
    pub distance: Distance,
    /// The next-due time this status was derived from.
    pub target: EpochMillis,
}

/// One clock reading.
///
/// `Unanchored` means no completion has ever been recorded; the caller can
/// use this to distinguish a genuinely fresh start from history that is
/// still loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Sample {
    Anchored(CountdownStatus),
    Unanchored(CountdownStatus),
}

impl Sample {
    pub fn status(&self) -> &CountdownStatus {
        match self {
            Sample::Anchored(status) | Sample::Unanchored(status) => status,
        }
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self, Sample::Anchored(_))
    }
}

/// Pure status computation for a fixed recurrence interval.
#[derive(Debug, Clone, Copy)]
pub struct CountdownClock {
    frequency: Frequency,
}

impl CountdownClock {
    pub fn new(frequency: Frequency) -> Self {
        Self { frequency }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Compute one status sample at `now`.
    pub fn sample(&self, last_completed_at: Option<EpochMillis>, now: EpochMillis) -> Sample {
        match last_completed_at {
            Some(anchor) => Sample::Anchored(self.status_from(anchor, now)),
            None => Sample::Unanchored(self.status_from(now, now)),
        }
    }

    fn status_from(&self, anchor: EpochMillis, now: EpochMillis) -> CountdownStatus {
        let target = anchor.saturating_add(self.frequency.as_millis());
        let is_overdue = target <= now;
        let magnitude = if is_overdue { now - target } else { target - now };
        CountdownStatus {
            is_overdue,
            distance: Distance::from_millis(magnitude),
            target,
        }
    }
}

pub(crate) fn now_ms() -> EpochMillis {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
