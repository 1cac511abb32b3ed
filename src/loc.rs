// intfp/src/loc.rs

//! Unsigned logarithmic compressed ("loc") codec.
//!
//! A loc value is laid out as `| exponent | mantissa |` and stands for
//! `2^exponent * (1 + mantissa / 2^mantissa_bits)`. It is meant for storage
//! and transmission; arithmetic on the bits is meaningless. Two patterns are
//! special: `1` is zero and `0` is one.

use log::{debug, trace};

use crate::bits::{self, Compressible, Unsigned};
use crate::fixed::check_frac_bits;
use crate::Error;

/// Mantissa width that leaves just enough exponent bits to address every
/// exponent of an `H`, i.e. `0..H::BITS`.
#[inline]
pub fn max_mantissa_bits<H, L>() -> u8
where
    H: Compressible<L>,
    L: Unsigned,
{
    (L::BITS - bits::fls32(H::BITS - 1)) as u8
}

/// Encodes `v` with `mantissa_bits` mantissa bits.
pub fn encode<H, L>(v: H, mantissa_bits: u8) -> L
where
    H: Compressible<L>,
    L: Unsigned,
{
    // Special encoding: 0 -> 1, 1 -> 0
    if v.to_u64() <= 1 {
        return L::from_u64((v.to_u64() == 0) as u64);
    }

    let (exponent, mantissa) = split(v, mantissa_bits);

    // + allows mantissa->exp overflow
    L::from_u64(bits::shl(exponent as u64, mantissa_bits as u32).wrapping_add(mantissa))
}

/// Splits a non-zero `v` into `floor(log2(v)) - 1` and the top
/// `mantissa_bits + 1` bits of `v`.
///
/// The implicit leading 1 stays in the mantissa, which is why the exponent
/// comes back one short: summing the two fields carries the 1 into the
/// exponent.
pub(crate) fn split<H>(v: H, mantissa_bits: u8) -> (i64, u64)
where
    H: Unsigned,
{
    // Normalize: hidden high bit moves to the top of the word. The shift is
    // also the distance of floor(log2(v)) from the top.
    let leading_zeros = bits::leading_zero_count(v);
    let normalized = bits::shl(v.to_u64(), leading_zeros);

    let mantissa = bits::shift_right(normalized, H::BITS as i64 - 1 - mantissa_bits as i64);
    let exponent = H::BITS as i64 - 2 - leading_zeros as i64;
    (exponent, mantissa)
}

/// [`encode`] with [`max_mantissa_bits`].
#[inline]
pub fn encode_max<H, L>(v: H) -> L
where
    H: Compressible<L>,
    L: Unsigned,
{
    encode(v, max_mantissa_bits::<H, L>())
}

/// Decodes a loc value that was encoded with `mantissa_bits` mantissa bits.
/// Exponents that don't fit an `H` saturate to `H::MAX`.
pub fn decode<H, L>(v: L, mantissa_bits: u8) -> H
where
    H: Compressible<L>,
    L: Unsigned,
{
    if v == bits::unsigned_min::<L>() {
        return H::default();
    }

    let exponent = bits::shr(v.to_u64(), mantissa_bits as u32);
    if exponent >= H::BITS as u64 {
        debug!("loc decode overflow: exponent {} >= {}", exponent, H::BITS);
        return H::MAX;
    }

    let mantissa = v.to_u64() & bits::low_bits_mask(mantissa_bits as u32);
    denormalize(mantissa, mantissa_bits, exponent as u32)
}

/// Rebuilds `2^exponent * (1 + mantissa / 2^mantissa_bits)` in an `H`.
/// `exponent` must be below `H::BITS`.
pub(crate) fn denormalize<H>(mantissa: u64, mantissa_bits: u8, exponent: u32) -> H
where
    H: Unsigned,
{
    let top = H::BITS - 1;

    // Put the implicit leading 1 back above the mantissa
    let fraction = bits::shift_right(mantissa, mantissa_bits as i64 - top as i64);
    let normalized = ((1u64 << top) | fraction) & bits::low_bits_mask(H::BITS);

    // De-normalize by shifting right based on the exponent
    H::from_u64(normalized >> (top - exponent))
}

/// [`decode`] with [`max_mantissa_bits`].
#[inline]
pub fn decode_max<H, L>(v: L) -> H
where
    H: Compressible<L>,
    L: Unsigned,
{
    decode(v, max_mantissa_bits::<H, L>())
}

/// A loc value tagged with its mantissa width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc<L> {
    bits: L,
    mantissa_bits: u8,
}

impl<L> Loc<L>
where
    L: Unsigned,
{
    pub fn zero(mantissa_bits: u8) -> Result<Self, Error> {
        Self::from_bits(bits::unsigned_min(), mantissa_bits)
    }

    /// Tags raw loc bits, e.g. ones read back from storage.
    pub fn from_bits(bits: L, mantissa_bits: u8) -> Result<Self, Error> {
        check_frac_bits::<L>(mantissa_bits)?;
        Ok(Self {
            bits,
            mantissa_bits,
        })
    }

    pub fn encode<H>(v: H, mantissa_bits: u8) -> Result<Self, Error>
    where
        H: Compressible<L>,
    {
        check_frac_bits::<L>(mantissa_bits)?;
        trace!("Loc::encode({}, {})", v, mantissa_bits);
        Ok(Self {
            bits: encode(v, mantissa_bits),
            mantissa_bits,
        })
    }

    pub fn encode_max<H>(v: H) -> Self
    where
        H: Compressible<L>,
    {
        Self {
            bits: encode_max(v),
            mantissa_bits: max_mantissa_bits::<H, L>(),
        }
    }

    pub fn decode<H>(self) -> H
    where
        H: Compressible<L>,
    {
        decode(self.bits, self.mantissa_bits)
    }

    #[inline]
    pub fn bits(self) -> L {
        self.bits
    }

    #[inline]
    pub fn mantissa_bits(self) -> u8 {
        self.mantissa_bits
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.bits == bits::unsigned_min()
    }
}
