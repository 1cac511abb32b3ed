// intfp/src/radix.rs

//! Rescaling base-2 log values into other logarithmic bases, e.g. decibels.
//!
//! Rescaling is a fixed-point multiplication of the magnitude by a tabulated
//! constant. The `to` and `from` constants of a radix are not exact inverses
//! of each other, so a round trip can drift by a few units in the last place.

use crate::bits::{self, Signed};
use crate::fixed::Fixed;
use crate::pseudo_log::Log;
use crate::Error;

/// Logarithmic bases a base-2 log value can be rescaled into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Radix {
    /// Power decibels: one unit is a factor of `10^(1/10)`.
    DbPower,
    /// One unit is a factor of 1.25.
    OnePointTwoFive,
}

pub const NUM_RADIXES: usize = 2;

/// Fixed-point multipliers for one radix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadixConstants {
    /// log2 -> radix multiplier.
    pub to: u32,
    /// radix -> log2 multiplier.
    pub from: u32,
    /// Fractional bits of `to`.
    pub to_shr: u8,
    /// Fractional bits of `from`.
    pub from_shr: u8,
}

pub static RADIX_TABLE: [RadixConstants; NUM_RADIXES] = [
    // DbPower: 10 * log10(2) and its reciprocal
    RadixConstants {
        to: 0xC0A8_C129,
        to_shr: 30,
        from: 0x550A_9686,
        from_shr: 32,
    },
    // OnePointTwoFive: 1 / log2(1.25) and its reciprocal
    RadixConstants {
        to: 0xC6CD_5A3B,
        to_shr: 30,
        from: 0x5269_E11A,
        from_shr: 32,
    },
];

impl Radix {
    pub const ALL: [Radix; NUM_RADIXES] = [Radix::DbPower, Radix::OnePointTwoFive];

    #[inline]
    pub fn constants(self) -> &'static RadixConstants {
        &RADIX_TABLE[self as usize]
    }
}

/// Signed widths small enough for the 32-bit rescale constants.
pub trait Rescale: Signed {}

impl Rescale for i8 {}
impl Rescale for i16 {}
impl Rescale for i32 {}

/// Rescales a base-2 log value into `radix`.
#[inline]
pub fn to_radix<S>(v: S, radix: Radix) -> S
where
    S: Rescale,
{
    let constants = radix.constants();
    scale(v, constants.to, constants.to_shr)
}

/// Rescales a log value expressed in `radix` back into base 2.
#[inline]
pub fn from_radix<S>(v: S, radix: Radix) -> S
where
    S: Rescale,
{
    let constants = radix.constants();
    scale(v, constants.from, constants.from_shr)
}

fn scale<S>(v: S, multiplier: u32, shift: u8) -> S
where
    S: Rescale,
{
    // Zero and the zero sentinel pass through untouched.
    if v == S::default() || v == bits::signed_min() {
        return v;
    }

    // Scale the magnitude and put the sign back. The magnitude is below 2^31,
    // so the product fits in 64 bits.
    let magnitude = v.to_i64().unsigned_abs();
    let scaled = S::from_i64(((magnitude * multiplier as u64) >> shift) as i64).to_i64();
    S::from_i64(if v.to_i64() < 0 { -scaled } else { scaled })
}

impl<S> Log<S>
where
    S: Rescale,
{
    /// The value in `radix`, as fixed point with this value's mantissa bits
    /// as fractional bits.
    pub fn to_radix(self, radix: Radix) -> Fixed<S> {
        // Log mantissa bits always leave room for the sign, so the tag fits.
        Fixed::from_parts(to_radix(self.bits(), radix), self.mantissa_bits())
    }

    /// The base-2 log value of an amount expressed in `radix`, e.g. a gain in
    /// decibels. The fractional bits of `v` become the mantissa bits.
    pub fn from_radix(v: Fixed<S>, radix: Radix) -> Result<Self, Error> {
        Self::from_bits(from_radix(v.raw(), radix), v.frac_bits())
    }

    /// Scales the magnitude by a gain expressed in `radix`, e.g. `-3` dB.
    /// The gain must carry this value's mantissa bits as fractional bits.
    pub fn apply_gain(self, gain: Fixed<S>, radix: Radix) -> Result<Self, Error> {
        self.checked_mul(Self::from_radix(gain, radix)?)
    }
}
