// intfp/src/fixed.rs

//! Linear fixed-point layer.
//!
//! A fixed-point value is a plain integer whose low `fp` bits are the
//! fractional part. Conversions are shifts; nothing here saturates.

use crate::bits::{self, Compressible, Signed, Unsigned, Word};
use crate::Error;

/// Widens `v` and shifts it left by `fp` fractional bits.
#[inline]
pub fn to_fixed<L, H>(v: L, fp: u8) -> H
where
    L: Unsigned,
    H: Compressible<L>,
{
    H::from_u64(bits::shl(v.to_u64(), fp as u32))
}

/// Drops the `fp` fractional bits of `v` (truncating toward zero) and
/// narrows the result.
#[inline]
pub fn from_fixed<H, L>(v: H, fp: u8) -> L
where
    L: Unsigned,
    H: Compressible<L>,
{
    L::from_u64(bits::shr(v.to_u64(), fp as u32))
}

/// Signed counterpart of [`to_fixed`].
#[inline]
pub fn to_fixed_signed<SL, SH>(v: SL, fp: u8) -> SH
where
    SL: Signed,
    SH: Signed,
    SH::Unsigned: Compressible<SL::Unsigned>,
{
    SH::from_i64(bits::shl(v.to_i64() as u64, fp as u32) as i64)
}

/// Signed counterpart of [`from_fixed`]. The shift is arithmetic, so
/// negative values round toward negative infinity.
#[inline]
pub fn from_fixed_signed<SH, SL>(v: SH, fp: u8) -> SL
where
    SL: Signed,
    SH: Signed,
    SH::Unsigned: Compressible<SL::Unsigned>,
{
    SL::from_i64(v.to_i64() >> fp.min(63))
}

/// A fixed-point value tagged with its number of fractional bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fixed<T> {
    raw: T,
    frac_bits: u8,
}

impl<T> Fixed<T>
where
    T: Word,
{
    /// Tags an already-scaled integer. `frac_bits` must leave at least one
    /// integer bit in `T`.
    pub fn new(raw: T, frac_bits: u8) -> Result<Self, Error> {
        check_frac_bits::<T>(frac_bits)?;
        Ok(Self { raw, frac_bits })
    }

    #[inline]
    pub(crate) fn from_parts(raw: T, frac_bits: u8) -> Self {
        Self { raw, frac_bits }
    }

    #[inline]
    pub fn raw(self) -> T {
        self.raw
    }

    #[inline]
    pub fn frac_bits(self) -> u8 {
        self.frac_bits
    }
}

impl<H> Fixed<H>
where
    H: Unsigned,
{
    /// Converts the integer `v` into a fixed-point value with `frac_bits`
    /// fractional bits.
    pub fn from_int<L>(v: L, frac_bits: u8) -> Result<Self, Error>
    where
        L: Unsigned,
        H: Compressible<L>,
    {
        check_frac_bits::<H>(frac_bits)?;
        Ok(Self {
            raw: to_fixed(v, frac_bits),
            frac_bits,
        })
    }

    /// The integer part.
    pub fn to_int<L>(self) -> L
    where
        L: Unsigned,
        H: Compressible<L>,
    {
        from_fixed(self.raw, self.frac_bits)
    }
}

impl<SH> Fixed<SH>
where
    SH: Signed,
{
    pub fn from_signed_int<SL>(v: SL, frac_bits: u8) -> Result<Self, Error>
    where
        SL: Signed,
        SH::Unsigned: Compressible<SL::Unsigned>,
    {
        check_frac_bits::<SH>(frac_bits)?;
        Ok(Self {
            raw: to_fixed_signed(v, frac_bits),
            frac_bits,
        })
    }

    pub fn to_signed_int<SL>(self) -> SL
    where
        SL: Signed,
        SH::Unsigned: Compressible<SL::Unsigned>,
    {
        from_fixed_signed(self.raw, self.frac_bits)
    }
}

pub(crate) fn check_frac_bits<T>(frac_bits: u8) -> Result<(), Error>
where
    T: Word,
{
    if frac_bits as u32 >= T::BITS {
        return Err(Error::InvalidPrecision {
            bits: frac_bits,
            width: T::BITS,
        });
    }
    Ok(())
}
