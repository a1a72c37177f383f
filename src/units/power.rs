//! Power quantities. Watts are the standard unit; building power draw is
//! catalog data expressed in kilowatts and megawatts.

use super::{Dimension, Scalar, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerDimension;

impl Dimension for PowerDimension {
    fn standard_unit() -> Unit<Self> {
        WATTS
    }
}

pub type Power = Scalar<PowerDimension>;

pub const WATTS: Unit<PowerDimension> = Unit::base("watts", "W", 1.0);
