//! Dimensioned scalars for crafting data.
//!
//! Every quantity here is an immutable `(amount, unit)` pair tied to one
//! dimension (time, power, item rate). Each dimension designates a standard
//! unit, and every conversion routes through it:
//! `target.from_standard(source.to_standard(amount))`. Adding a unit to a
//! dimension therefore only means supplying its own standard-unit
//! conversion; conversions against every other unit follow.
//!
//! Mixing dimensions does not compile: the dimension is a type parameter,
//! so `SECONDS.of(1.0).add(&WATTS.of(1.0))` is rejected statically.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

pub mod item_rate;
pub mod power;
pub mod time;

/// A physical-quantity kind. Implemented by zero-sized marker types, one
/// per dimension; the set is closed.
pub trait Dimension: Copy + fmt::Debug + 'static {
    /// The interchange unit all conversions route through.
    fn standard_unit() -> Unit<Self>;
}

/// A named scale within one dimension. Conversion to and from the standard
/// unit is multiplicative; base units are `const`s, prefixed units are
/// derived at runtime.
#[derive(Debug, Clone)]
pub struct Unit<D: Dimension> {
    name: Cow<'static, str>,
    symbol: Cow<'static, str>,
    to_standard_factor: f64,
    dimension: PhantomData<D>,
}

impl<D: Dimension> Unit<D> {
    pub const fn base(name: &'static str, symbol: &'static str, to_standard_factor: f64) -> Self {
        Self {
            name: Cow::Borrowed(name),
            symbol: Cow::Borrowed(symbol),
            to_standard_factor,
            dimension: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn to_standard(&self, amount: f64) -> f64 {
        amount * self.to_standard_factor
    }

    pub fn from_standard(&self, standard_amount: f64) -> f64 {
        standard_amount / self.to_standard_factor
    }

    /// A scalar of `amount`, expressed in this unit.
    pub fn of(&self, amount: f64) -> Scalar<D> {
        Scalar {
            amount,
            unit: self.clone(),
        }
    }
}

impl<D: Dimension> PartialEq for Unit<D> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.symbol == other.symbol
            && self.to_standard_factor == other.to_standard_factor
    }
}

/// An immutable dimensioned quantity. All operations return new values;
/// `NaN` amounts (variable rates) flow through untouched.
#[derive(Debug, Clone)]
pub struct Scalar<D: Dimension> {
    amount: f64,
    unit: Unit<D>,
}

impl<D: Dimension> Scalar<D> {
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn unit(&self) -> &Unit<D> {
        &self.unit
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            amount: self.amount * factor,
            unit: self.unit.clone(),
        }
    }

    /// The amount this scalar represents in `unit`, via the standard unit.
    pub fn value_as(&self, unit: &Unit<D>) -> f64 {
        unit.from_standard(self.unit.to_standard(self.amount))
    }

    /// The same quantity, re-expressed in `unit`.
    pub fn as_unit(&self, unit: &Unit<D>) -> Self {
        Self {
            amount: self.value_as(unit),
            unit: unit.clone(),
        }
    }

    /// Sum, expressed in `self`'s unit.
    pub fn add(&self, other: &Self) -> Self {
        Self {
            amount: self.amount + other.value_as(&self.unit),
            unit: self.unit.clone(),
        }
    }

    /// Difference, expressed in `self`'s unit.
    pub fn subtract(&self, other: &Self) -> Self {
        Self {
            amount: self.amount - other.value_as(&self.unit),
            unit: self.unit.clone(),
        }
    }

    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    pub fn abs(&self) -> Self {
        if self.amount >= 0.0 {
            self.clone()
        } else {
            self.negate()
        }
    }
}

impl<D: Dimension> fmt::Display for Scalar<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.symbol())
    }
}

/// A multiplicative name/symbol prefix applicable to any unit of any
/// dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    name: &'static str,
    symbol: &'static str,
    factor: f64,
}

impl Prefix {
    pub const fn new(name: &'static str, symbol: &'static str, factor: f64) -> Self {
        Self {
            name,
            symbol,
            factor,
        }
    }

    /// Derive the prefixed unit. `si::kilo(&WATTS).of(5.0)` means five
    /// kilowatts, not five watts scaled.
    pub fn of_unit<D: Dimension>(&self, base: &Unit<D>) -> Unit<D> {
        Unit {
            name: Cow::Owned(format!("{}{}", self.name, base.name)),
            symbol: Cow::Owned(format!("{}{}", self.symbol, base.symbol)),
            to_standard_factor: self.factor * base.to_standard_factor,
            dimension: PhantomData,
        }
    }
}

pub mod si {
    use super::{Dimension, Prefix, Unit};

    pub const KILO: Prefix = Prefix::new("kilo", "k", 1e3);
    pub const MEGA: Prefix = Prefix::new("mega", "M", 1e6);
    pub const GIGA: Prefix = Prefix::new("giga", "G", 1e9);

    pub fn kilo<D: Dimension>(base: &Unit<D>) -> Unit<D> {
        KILO.of_unit(base)
    }

    pub fn mega<D: Dimension>(base: &Unit<D>) -> Unit<D> {
        MEGA.of_unit(base)
    }

    pub fn giga<D: Dimension>(base: &Unit<D>) -> Unit<D> {
        GIGA.of_unit(base)
    }
}
