//! Time-of-day and day-of-week pricing windows

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pricing::PricingError;

/// Clock reading used for temporal pricing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeContext {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub day_of_week: u32,
    pub is_weekend: bool,
}

impl TimeContext {
    /// Build from an hour and weekday already known to be in range.
    /// Use [`TimeContext::try_new`] for caller-supplied values.
    pub fn new(hour: u32, day_of_week: u32) -> Self {
        debug_assert!(hour < 24 && day_of_week < 7);
        Self {
            hour,
            day_of_week,
            is_weekend: day_of_week == 0 || day_of_week == 6,
        }
    }

    /// Build from untrusted input, rejecting hours past 23 and weekdays past 6
    pub fn try_new(hour: u32, day_of_week: u32) -> Result<Self, PricingError> {
        if hour > 23 {
            return Err(PricingError::InvalidInput {
                field: "hour",
                reason: format!("must be between 0 and 23, got {}", hour),
            });
        }
        if day_of_week > 6 {
            return Err(PricingError::InvalidInput {
                field: "day_of_week",
                reason: format!("must be between 0 and 6, got {}", day_of_week),
            });
        }
        Ok(Self::new(hour, day_of_week))
    }

    /// Read hour and weekday in the timezone carried by `at`
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self::new(at.hour(), at.weekday().num_days_from_sunday())
    }
}

/// Named outcome of the temporal precedence chain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Normal,
    Weekend,
    Peak,
    Late,
}

impl TimeWindow {
    /// Classify a clock reading. Peak beats late, late beats weekend.
    pub fn classify(time: &TimeContext) -> Self {
        if is_peak_hour(time.hour) {
            TimeWindow::Peak
        } else if time.hour >= 21 || time.hour <= 6 {
            TimeWindow::Late
        } else if time.is_weekend {
            TimeWindow::Weekend
        } else {
            TimeWindow::Normal
        }
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            TimeWindow::Normal => Decimal::ONE,
            TimeWindow::Weekend => Decimal::new(115, 2),
            TimeWindow::Peak => Decimal::new(13, 1),
            TimeWindow::Late => Decimal::new(12, 1),
        }
    }
}

/// Breakfast, lunch and dinner rush, inclusive on both ends
const PEAK_WINDOWS: [(u32, u32); 3] = [(7, 9), (12, 14), (18, 20)];

fn is_peak_hour(hour: u32) -> bool {
    PEAK_WINDOWS
        .iter()
        .any(|&(start, end)| hour >= start && hour <= end)
}

/// Surcharge factor for a clock reading
pub fn temporal_multiplier(time: &TimeContext) -> Decimal {
    TimeWindow::classify(time).multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    const SUNDAY: u32 = 0;
    const WEDNESDAY: u32 = 3;
    const SATURDAY: u32 = 6;

    #[test]
    fn test_peak_overrides_weekend() {
        let ctx = TimeContext::new(8, SATURDAY);
        assert_eq!(TimeWindow::classify(&ctx), TimeWindow::Peak);
        assert_eq!(temporal_multiplier(&ctx), Decimal::new(13, 1));
    }

    #[test]
    fn test_late_boundaries() {
        assert_eq!(temporal_multiplier(&TimeContext::new(22, WEDNESDAY)), Decimal::new(12, 1));
        assert_eq!(temporal_multiplier(&TimeContext::new(6, WEDNESDAY)), Decimal::new(12, 1));
        assert_eq!(temporal_multiplier(&TimeContext::new(21, WEDNESDAY)), Decimal::new(12, 1));
        assert_eq!(temporal_multiplier(&TimeContext::new(0, SUNDAY)), Decimal::new(12, 1));
    }

    #[test]
    fn test_peak_windows_inclusive() {
        for hour in [7, 9, 12, 14, 18, 20] {
            assert_eq!(
                TimeWindow::classify(&TimeContext::new(hour, WEDNESDAY)),
                TimeWindow::Peak,
                "hour {}",
                hour
            );
        }
        for hour in [10, 11, 15, 16, 17] {
            assert_eq!(
                TimeWindow::classify(&TimeContext::new(hour, WEDNESDAY)),
                TimeWindow::Normal,
                "hour {}",
                hour
            );
        }
    }

    #[test]
    fn test_weekend_off_peak() {
        assert_eq!(temporal_multiplier(&TimeContext::new(10, SUNDAY)), Decimal::new(115, 2));
        assert_eq!(temporal_multiplier(&TimeContext::new(16, SATURDAY)), Decimal::new(115, 2));
        assert_eq!(temporal_multiplier(&TimeContext::new(16, WEDNESDAY)), Decimal::ONE);
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(matches!(
            TimeContext::try_new(24, WEDNESDAY),
            Err(PricingError::InvalidInput { field: "hour", .. })
        ));
        assert!(matches!(
            TimeContext::try_new(10, 7),
            Err(PricingError::InvalidInput { field: "day_of_week", .. })
        ));
        assert_eq!(
            TimeContext::try_new(23, SATURDAY).unwrap(),
            TimeContext::new(23, SATURDAY)
        );
    }

    #[test]
    fn test_from_datetime_uses_local_offset() {
        // 2024-06-01 00:30 UTC is Saturday 08:30 in Manila
        let utc = Utc.with_ymd_and_hms(2024, 6, 1, 0, 30, 0).unwrap();
        let manila = utc.with_timezone(&FixedOffset::east_opt(8 * 3600).unwrap());
        let ctx = TimeContext::from_datetime(&manila);
        assert_eq!(ctx.hour, 8);
        assert_eq!(ctx.day_of_week, SATURDAY);
        assert!(ctx.is_weekend);
    }
}
