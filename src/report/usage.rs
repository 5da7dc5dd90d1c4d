use std::{mem::MaybeUninit, time::Duration};

/// Resource usage of the current process.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceUsage {
    pub user_time: Duration,
    pub system_time: Duration,
    /// Peak resident set size in kilobytes.
    pub max_rss_kb: u64,
}

impl ResourceUsage {
    /// Samples `getrusage(RUSAGE_SELF)`, `None` if the call fails.
    #[cfg(unix)]
    pub fn current() -> Option<Self> {
        let mut usage = MaybeUninit::<libc::rusage>::uninit();
        if unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) } != 0 {
            return None;
        }
        let usage = unsafe { usage.assume_init() };
        Some(Self {
            user_time: timeval_duration(usage.ru_utime),
            system_time: timeval_duration(usage.ru_stime),
            max_rss_kb: max_rss_kb(usage.ru_maxrss as u64),
        })
    }

    #[cfg(not(unix))]
    pub fn current() -> Option<Self> {
        None
    }
}

#[cfg(unix)]
fn timeval_duration(tv: libc::timeval) -> Duration {
    Duration::from_secs(tv.tv_sec as u64) + Duration::from_micros(tv.tv_usec as u64)
}

// macOS reports bytes, Linux kilobytes.
#[cfg(target_os = "macos")]
fn max_rss_kb(max_rss: u64) -> u64 {
    max_rss / 1024
}

#[cfg(all(unix, not(target_os = "macos")))]
fn max_rss_kb(max_rss: u64) -> u64 {
    max_rss
}

/// Available physical memory in kilobytes.
pub fn available_memory_kb() -> Option<u64> {
    sys_info::mem_info().ok().map(|info| info.avail)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_current() {
        let usage = ResourceUsage::current().unwrap();
        assert!(usage.max_rss_kb > 0);
    }

    #[test]
    fn test_timeval_duration() {
        let tv = libc::timeval {
            tv_sec: 2,
            tv_usec: 500_000,
        };
        assert_eq!(timeval_duration(tv), Duration::from_millis(2500));
    }
}
