// intfp/src/convert.rs

//! Width and precision changes between loc and log values.
//!
//! Moving the exponent/mantissa boundary or changing the word width never
//! re-derives the exponent: past the zero sentinel, every conversion is a
//! single shift by the difference in mantissa widths. Values are truncated
//! to the output width, so a narrower output must keep enough exponent bits.

use log::debug;

use crate::bits::{self, Signed, Unsigned};
use crate::loc::Loc;
use crate::pseudo_log::Log;
use crate::Error;

// Max-precision splits. The exponent range is set by the width the value
// was first compressed from, which is taken to be the input width.

fn loc_max_mantissa_bits(exponent_width: u32, width: u32) -> u8 {
    (width - bits::fls32(exponent_width - 1)) as u8
}

fn log_max_mantissa_bits(exponent_width: u32, width: u32) -> u8 {
    (width - 1 - bits::fls32(exponent_width - 1)) as u8
}

/// Re-encodes a loc value with `out_mantissa_bits` mantissa bits in an `O`.
pub fn loc_to_loc<I, O>(v: I, in_mantissa_bits: u8, out_mantissa_bits: u8) -> O
where
    I: Unsigned,
    O: Unsigned,
{
    if v == bits::unsigned_min::<I>() {
        return bits::unsigned_min();
    }
    O::from_u64(bits::rebase(v.to_u64(), in_mantissa_bits, out_mantissa_bits))
}

pub fn loc_to_loc_max<I, O>(v: I) -> O
where
    I: Unsigned,
    O: Unsigned,
{
    loc_to_loc(
        v,
        loc_max_mantissa_bits(I::BITS, I::BITS),
        loc_max_mantissa_bits(I::BITS, O::BITS),
    )
}

/// Re-encodes a log value with `out_mantissa_bits` mantissa bits in an `O`.
/// The sign is preserved.
pub fn log_to_log<I, O>(v: I, in_mantissa_bits: u8, out_mantissa_bits: u8) -> O
where
    I: Signed,
    O: Signed,
{
    if v == bits::signed_min::<I>() {
        return bits::signed_min();
    }
    O::from_i64(bits::rebase_signed(
        v.to_i64(),
        in_mantissa_bits,
        out_mantissa_bits,
    ))
}

pub fn log_to_log_max<I, O>(v: I) -> O
where
    I: Signed,
    O: Signed,
{
    log_to_log(
        v,
        log_max_mantissa_bits(I::BITS, I::BITS),
        log_max_mantissa_bits(I::BITS, O::BITS),
    )
}

/// Reinterprets a loc value as a log value. Loc is never negative, so it
/// lands on the non-negative half of the log range.
pub fn loc_to_log<I, O>(v: I, in_mantissa_bits: u8, out_mantissa_bits: u8) -> O
where
    I: Unsigned,
    O: Signed,
{
    if v == bits::unsigned_min::<I>() {
        return bits::signed_min();
    }
    O::from_i64(bits::rebase(v.to_u64(), in_mantissa_bits, out_mantissa_bits) as i64)
}

pub fn loc_to_log_max<I, O>(v: I) -> O
where
    I: Unsigned,
    O: Signed,
{
    loc_to_log(
        v,
        loc_max_mantissa_bits(I::BITS, I::BITS),
        log_max_mantissa_bits(I::BITS, O::BITS),
    )
}

/// Reinterprets a log value as a loc value. Loc can't hold magnitudes below
/// one, so every negative log value (the zero sentinel included) becomes
/// loc's zero.
pub fn log_to_loc<I, O>(v: I, in_mantissa_bits: u8, out_mantissa_bits: u8) -> O
where
    I: Signed,
    O: Unsigned,
{
    if v < I::default() {
        if v != bits::signed_min::<I>() {
            debug!("log value {} is below one, flushing to loc zero", v);
        }
        return bits::unsigned_min();
    }
    O::from_u64(bits::rebase(
        v.to_i64() as u64,
        in_mantissa_bits,
        out_mantissa_bits,
    ))
}

pub fn log_to_loc_max<I, O>(v: I) -> O
where
    I: Signed,
    O: Unsigned,
{
    log_to_loc(
        v,
        log_max_mantissa_bits(I::BITS, I::BITS),
        loc_max_mantissa_bits(I::BITS, O::BITS),
    )
}

impl<I> Loc<I>
where
    I: Unsigned,
{
    /// Changes the width and/or the mantissa width.
    pub fn convert<O>(self, mantissa_bits: u8) -> Result<Loc<O>, Error>
    where
        O: Unsigned,
    {
        Loc::from_bits(
            loc_to_loc(self.bits(), self.mantissa_bits(), mantissa_bits),
            mantissa_bits,
        )
    }

    pub fn to_log<O>(self, mantissa_bits: u8) -> Result<Log<O>, Error>
    where
        O: Signed,
    {
        Log::from_bits(
            loc_to_log(self.bits(), self.mantissa_bits(), mantissa_bits),
            mantissa_bits,
        )
    }
}

impl<I> Log<I>
where
    I: Signed,
{
    /// Changes the width and/or the mantissa width.
    pub fn convert<O>(self, mantissa_bits: u8) -> Result<Log<O>, Error>
    where
        O: Signed,
    {
        Log::from_bits(
            log_to_log(self.bits(), self.mantissa_bits(), mantissa_bits),
            mantissa_bits,
        )
    }

    /// Magnitudes below one become loc's zero.
    pub fn to_loc<O>(self, mantissa_bits: u8) -> Result<Loc<O>, Error>
    where
        O: Unsigned,
    {
        Loc::from_bits(
            log_to_loc(self.bits(), self.mantissa_bits(), mantissa_bits),
            mantissa_bits,
        )
    }
}
