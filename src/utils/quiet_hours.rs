//! Quiet-hours policy evaluated in US Eastern time.

use jiff::Timestamp;
use jiff::tz::TimeZone;
use once_cell::sync::Lazy;
use std::fmt::Debug;

/// IANA name of the zone the sending window is expressed in.
pub const US_EASTERN_TZ: &str = "America/New_York";

/// First hour (inclusive) of the default sending window.
pub const DEFAULT_START_HOUR: u8 = 8;

/// Last hour (exclusive) of the default sending window.
pub const DEFAULT_END_HOUR: u8 = 21;

static US_EASTERN: Lazy<TimeZone> =
    Lazy::new(|| TimeZone::get(US_EASTERN_TZ).expect("bundled tzdb has America/New_York"));

/// Returns true when `now`, seen in US Eastern time, falls outside
/// `[start_hour, end_hour)`, i.e. sending is not allowed.
///
/// ```rust
/// use jiff::Zoned;
/// use n2p_relay::within_quiet_hours;
///
/// let at = |s: &str| s.parse::<Zoned>().unwrap().timestamp();
///
/// assert!(within_quiet_hours(at("2025-03-04T07:59:00-05:00[America/New_York]"), 8, 21));
/// assert!(!within_quiet_hours(at("2025-03-04T08:00:00-05:00[America/New_York]"), 8, 21));
/// ```
pub fn within_quiet_hours(now: Timestamp, start_hour: u8, end_hour: u8) -> bool {
    let hour = now.to_zoned(US_EASTERN.clone()).hour() as u8;
    !(start_hour <= hour && hour < end_hour)
}

/// Source of the current time for policy checks.
pub trait Clock: Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
