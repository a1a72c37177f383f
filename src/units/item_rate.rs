//! Item throughput quantities. Items per second are the standard unit.
//!
//! Rate units take their names, symbols, and conversion factors from the
//! matching time unit, so the supported rates track the supported time
//! units.

use super::time::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use super::{Dimension, Scalar, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRateDimension;

impl Dimension for ItemRateDimension {
    fn standard_unit() -> Unit<Self> {
        ITEMS_PER_SECOND
    }
}

pub type ItemRate = Scalar<ItemRateDimension>;

pub const ITEMS_PER_SECOND: Unit<ItemRateDimension> = Unit::base("items/seconds", "ips", 1.0);
pub const ITEMS_PER_MINUTE: Unit<ItemRateDimension> =
    Unit::base("items/minutes", "ipm", SECONDS_PER_MINUTE);
pub const ITEMS_PER_HOUR: Unit<ItemRateDimension> =
    Unit::base("items/hours", "iphr", SECONDS_PER_HOUR);
