//! Time quantities. Seconds are the standard unit; recipe production times
//! arrive from the scraper as plain seconds.

use super::{Dimension, Scalar, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDimension;

impl Dimension for TimeDimension {
    fn standard_unit() -> Unit<Self> {
        SECONDS
    }
}

pub type Time = Scalar<TimeDimension>;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = SECONDS_PER_MINUTE * 60.0;

pub const SECONDS: Unit<TimeDimension> = Unit::base("seconds", "s", 1.0);
pub const MINUTES: Unit<TimeDimension> = Unit::base("minutes", "m", SECONDS_PER_MINUTE);
pub const HOURS: Unit<TimeDimension> = Unit::base("hours", "hr", SECONDS_PER_HOUR);

impl Time {
    pub fn of_seconds(seconds: f64) -> Time {
        SECONDS.of(seconds)
    }
}
