//! `mach_absolute_time` tick conversion.
//!
//! `CGEventGetTimestamp` reports mach ticks, not nanoseconds. Ticks equal
//! nanoseconds on Intel Macs (1/1) but run at 24 MHz on Apple Silicon
//! (125/3), so every event timestamp goes through the host timebase.

use std::sync::OnceLock;
use std::time::Duration;

use mach2::kern_return::KERN_SUCCESS;
use mach2::mach_time::{mach_timebase_info, mach_timebase_info_data_t};

static HOST: OnceLock<Timebase> = OnceLock::new();

/// Ratio converting mach ticks to nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timebase {
    numer: u32,
    denom: u32,
}

impl Timebase {
    /// Ticks are nanoseconds.
    pub const IDENTITY: Self = Self::new(1, 1);

    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self { Self { numer, denom } }

    /// The running host's timebase, queried once.
    ///
    /// Falls back to [`Timebase::IDENTITY`] if the kernel call fails.
    pub fn host() -> Self {
        *HOST.get_or_init(|| {
            let mut info = mach_timebase_info_data_t { numer: 0, denom: 0 };
            let status = unsafe { mach_timebase_info(&raw mut info) };
            if status != KERN_SUCCESS || info.numer == 0 || info.denom == 0 {
                tracing::warn!(status, "mach_timebase_info failed, treating ticks as nanoseconds");
                return Self::IDENTITY;
            }
            Self::new(info.numer, info.denom)
        })
    }

    /// Converts ticks to nanoseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn ticks_to_nanos(self, ticks: u64) -> u64 {
        if self.denom == 0 {
            return ticks;
        }
        let nanos = u128::from(ticks) * u128::from(self.numer) / u128::from(self.denom);
        u64::try_from(nanos).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn duration(self, ticks: u64) -> Duration { Duration::from_nanos(self.ticks_to_nanos(ticks)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLE_SILICON: Timebase = Timebase::new(125, 3);

    #[test]
    fn test_apple_silicon_ticks_run_at_24mhz() {
        assert_eq!(APPLE_SILICON.ticks_to_nanos(24_000_000), 1_000_000_000);
        assert_eq!(APPLE_SILICON.ticks_to_nanos(3), 125);
    }

    #[test]
    fn test_one_display_frame_of_ticks() {
        // 120 Hz pointer events arrive about 200_000 ticks apart.
        assert_eq!(APPLE_SILICON.duration(200_000), Duration::from_nanos(8_333_333));
    }

    #[test]
    fn test_other_ratios() {
        assert_eq!(Timebase::IDENTITY.ticks_to_nanos(123_456_789), 123_456_789);
        assert_eq!(Timebase::new(3, 125).ticks_to_nanos(250), 6);
    }

    #[test]
    fn test_large_tick_counts_do_not_overflow() {
        assert_eq!(APPLE_SILICON.ticks_to_nanos(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_zero_denominator_is_identity() {
        assert_eq!(Timebase::new(125, 0).ticks_to_nanos(42), 42);
    }

    #[test]
    fn test_host_timebase_is_usable() {
        let host = Timebase::host();
        assert_ne!(host.ticks_to_nanos(1_000_000), 0);
        assert_eq!(host, Timebase::host());
    }
}
