use crate::application::ports::time::Clock;
use chrono::{Local, NaiveDateTime};

/// Wall clock in the local time zone, matching `CURRENT_TIMESTAMP` on a
/// server that shares it.
#[derive(Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
