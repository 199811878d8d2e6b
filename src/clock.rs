use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
    /// The local calendar date.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use chrono::{DateTime, NaiveDate};
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Hand-driven clock; its calendar date is the UTC date of the current instant.
    pub struct ManualClock {
        millis: AtomicI64,
    }

    impl ManualClock {
        pub fn at(millis: i64) -> Self {
            Self {
                millis: AtomicI64::new(millis),
            }
        }

        pub fn advance_secs(&self, secs: i64) {
            self.millis.fetch_add(secs * 1000, Ordering::SeqCst);
        }

        pub fn set_millis(&self, millis: i64) {
            self.millis.store(millis, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.millis.load(Ordering::SeqCst)
        }

        fn today(&self) -> NaiveDate {
            DateTime::from_timestamp_millis(self.now_millis())
                .map(|instant| instant.date_naive())
                .unwrap_or(NaiveDate::MIN)
        }
    }
}
