//! System clock adapter: local wall-clock time.

use crate::ports::ClockPort;
use chrono::{Local, NaiveDateTime};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub const fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
