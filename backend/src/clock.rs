//! Injectable wall clock

use chrono::{DateTime, FixedOffset, Offset, Utc};
use shared::TimeContext;

/// Source of the current time in the service area's local offset
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    fn time_context(&self) -> TimeContext {
        TimeContext::from_datetime(&self.now())
    }
}

/// System clock shifted to a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Offsets outside ±23 hours fall back to UTC
    pub fn with_offset_hours(hours: i32) -> Self {
        let offset = hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!("Invalid UTC offset {}h, using UTC", hours);
                Utc.fix()
            });
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
