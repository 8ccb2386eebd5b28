//! Wrapping millisecond time.
//!
//! The tick source is a free-running unsigned counter which wraps around.
//! Durations are always measured with [`timer_sub`], which stays correct across
//! a wrap as long as no single interval exceeds half of the counter range.

/// Timestamp in milliseconds, as handed to [`crate::ButtonManager::process`].
#[cfg(not(feature = "timer16"))]
pub type Time = u32;
/// Signed difference of two [`Time`]s.
#[cfg(not(feature = "timer16"))]
pub type TimeDiff = i32;

/// Timestamp in milliseconds, as handed to [`crate::ButtonManager::process`].
#[cfg(feature = "timer16")]
pub type Time = u16;
/// Signed difference of two [`Time`]s.
#[cfg(feature = "timer16")]
pub type TimeDiff = i16;

/// Returns `time1 - time2` as a signed value, using wrapping arithmetic.
#[inline]
pub const fn timer_sub(time1: Time, time2: Time) -> TimeDiff {
    time1.wrapping_sub(time2) as TimeDiff
}

/// Elapsed milliseconds from `since` to `now`, widened so it can be compared with
/// `u16` thresholds without sign surprises on 16-bit timers.
#[inline]
pub(crate) fn elapsed(now: Time, since: Time) -> i32 {
    i32::from(timer_sub(now, since))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_sub_across_wrap() {
        assert_eq!(timer_sub(5, Time::MAX - 4), 10);
        assert_eq!(timer_sub(Time::MAX - 4, 5), -10);
        assert_eq!(timer_sub(100, 100), 0);
    }

    #[test]
    fn test_elapsed_compares_with_u16_threshold() {
        let threshold = u16::MAX;
        assert!(elapsed(3, 1) <= i32::from(threshold));
        assert!(elapsed(0, 1) < 0);
    }
}
