use chrono::{DateTime, Duration, NaiveDateTime, SubsecRound, Utc};
use parking_lot::Mutex;

/// Source of "now" for everything that compares against stored timestamps.
///
/// Challenge expiry and credential expiry both read the clock through this
/// trait so tests can pin or advance time without sleeping.
pub trait SystemTimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSourceDefault;

impl SystemTimeSource for SystemTimeSourceDefault {
    fn now(&self) -> DateTime<Utc> {
        // Stored timestamps carry whole seconds; comparisons must agree.
        Utc::now().trunc_subsecs(0)
    }
}

/// Manually driven clock for tests.
#[derive(Debug)]
pub struct SystemTimeSourceStub {
    now: Mutex<DateTime<Utc>>,
}

impl SystemTimeSourceStub {
    pub fn new_set(t: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(t.trunc_subsecs(0)),
        }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        *self.now.lock() = t.trunc_subsecs(0);
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl SystemTimeSource for SystemTimeSourceStub {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

pub fn to_naive(t: DateTime<Utc>) -> NaiveDateTime {
    t.naive_utc()
}

pub fn from_naive(t: NaiveDateTime) -> DateTime<Utc> {
    t.and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stub_advances_and_resets() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let clock = SystemTimeSourceStub::new_set(start);
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now(), start + Duration::seconds(90));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn default_clock_has_no_subseconds() {
        let now = SystemTimeSourceDefault.now();
        assert_eq!(now.timestamp_subsec_nanos(), 0);
    }
}
