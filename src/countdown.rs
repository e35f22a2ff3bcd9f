use crate::models::CountdownFields;
use chrono::{DateTime, Local, TimeZone};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub millis: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDisplay {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl CountdownDisplay {
    pub fn zero() -> Self {
        Self::from_parts(0, 0, 0, 0)
    }

    pub fn from_parts(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            days: pad2(days),
            hours: pad2(hours),
            minutes: pad2(minutes),
            seconds: pad2(seconds),
        }
    }
}

impl From<CountdownFields> for CountdownDisplay {
    fn from(fields: CountdownFields) -> Self {
        Self::from_parts(fields.days, fields.hours, fields.minutes, fields.seconds)
    }
}

impl Remaining {
    pub fn is_zero(&self) -> bool {
        self.total_millis() == 0
    }

    pub fn total_millis(&self) -> i64 {
        self.days * MILLIS_PER_DAY
            + self.hours * MILLIS_PER_HOUR
            + self.minutes * MILLIS_PER_MINUTE
            + self.seconds * MILLIS_PER_SECOND
            + self.millis
    }

    pub fn display(&self) -> CountdownDisplay {
        CountdownDisplay::from_parts(
            self.days as u64,
            self.hours as u64,
            self.minutes as u64,
            self.seconds as u64,
        )
    }
}

pub fn remaining<Tz: TimeZone>(now: DateTime<Tz>, target: DateTime<Tz>) -> Remaining {
    let left = (target - now).num_milliseconds();
    if left <= 0 {
        return Remaining::default();
    }

    Remaining {
        days: left / MILLIS_PER_DAY,
        hours: (left % MILLIS_PER_DAY) / MILLIS_PER_HOUR,
        minutes: (left % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
        seconds: (left % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
        millis: left % MILLIS_PER_SECOND,
    }
}

fn pad2(value: u64) -> String {
    format!("{value:02}")
}
