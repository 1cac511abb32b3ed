// intfp/src/pseudo_log.rs

//! Signed pseudo-logarithmic ("log") codec.
//!
//! A log value is a signed word laid out as `| sign | exponent | mantissa |`
//! over its magnitude. Non-negative values stand for magnitudes of at least
//! one, negative values for magnitudes below one, and the most negative
//! value is reserved for zero.
//!
//! The encoding is `e + m` with `e = floor(log2(v))` and `m` the *linear*
//! fraction of the normalized value, not the true `e + log2(1 + m)`. That
//! makes encoding a couple of shifts, and it means adding two log values
//! approximates multiplying their magnitudes, subtracting approximates
//! dividing. The approximation is exact at powers of two and worst midway
//! between them.

use log::{debug, trace};

use crate::bits::{self, Compressible, Signed, Unsigned};
use crate::fixed::{check_frac_bits, Fixed};
use crate::loc;
use crate::Error;

/// Mantissa width that leaves just enough exponent bits, next to the sign
/// bit, to address every exponent of an `H`.
#[inline]
pub fn max_mantissa_bits<H, L>() -> u8
where
    H: Compressible<L>,
    L: Unsigned,
{
    (L::BITS - 1 - bits::fls32(H::BITS - 1)) as u8
}

/// Encodes the unsigned fixed-point value `v`, which has `frac_bits`
/// fractional bits, with `mantissa_bits` mantissa bits.
pub fn encode_fixed<H, L>(v: H, frac_bits: u8, mantissa_bits: u8) -> L::Signed
where
    H: Compressible<L>,
    L: Unsigned,
{
    if v == H::default() {
        return bits::signed_min();
    }

    let (exponent, mantissa) = loc::split(v, mantissa_bits);

    // The fixed-point scale folds into the exponent.
    let exponent = exponent - frac_bits as i64;
    let bits = bits::shl(exponent as u64, mantissa_bits as u32).wrapping_add(mantissa);
    L::from_u64(bits).to_signed()
}

/// [`encode_fixed`] with [`max_mantissa_bits`].
#[inline]
pub fn encode_fixed_max<H, L>(v: H, frac_bits: u8) -> L::Signed
where
    H: Compressible<L>,
    L: Unsigned,
{
    encode_fixed::<H, L>(v, frac_bits, max_mantissa_bits::<H, L>())
}

/// Encodes the integer `v`.
#[inline]
pub fn encode<H, L>(v: H, mantissa_bits: u8) -> L::Signed
where
    H: Compressible<L>,
    L: Unsigned,
{
    encode_fixed::<H, L>(v, 0, mantissa_bits)
}

#[inline]
pub fn encode_max<H, L>(v: H) -> L::Signed
where
    H: Compressible<L>,
    L: Unsigned,
{
    encode_fixed_max::<H, L>(v, 0)
}

/// Decodes a log value encoded with `mantissa_bits` mantissa bits into an
/// unsigned fixed-point value with `frac_bits` fractional bits.
///
/// Magnitudes too small for `frac_bits` underflow to zero; magnitudes too
/// large for an `H` saturate to `H::MAX`.
pub fn decode_fixed<H, L>(v: L::Signed, mantissa_bits: u8, frac_bits: u8) -> H
where
    H: Compressible<L>,
    L: Unsigned,
{
    if v == bits::signed_min() {
        return H::default();
    }

    // The sentinel is excluded above, so the magnitude can't overflow.
    let negative = v.to_i64() < 0;
    let magnitude = v.to_i64().unsigned_abs();

    // The exponent itself is signed. A negative log value means the encoded
    // value was below 1.0.
    let mut exponent = bits::shr(magnitude, mantissa_bits as u32) as i64;
    if negative {
        exponent = -exponent;
    }

    let scaled_exponent = exponent + frac_bits as i64;
    if scaled_exponent < 0 {
        debug!("log decode underflow: scaled exponent {}", scaled_exponent);
        return H::default();
    }
    if scaled_exponent >= H::BITS as i64 {
        debug!(
            "log decode overflow: scaled exponent {} >= {}",
            scaled_exponent,
            H::BITS
        );
        return H::MAX;
    }

    let mantissa = magnitude & bits::low_bits_mask(mantissa_bits as u32);
    loc::denormalize(mantissa, mantissa_bits, scaled_exponent as u32)
}

/// [`decode_fixed`] with [`max_mantissa_bits`].
#[inline]
pub fn decode_fixed_max<H, L>(v: L::Signed, frac_bits: u8) -> H
where
    H: Compressible<L>,
    L: Unsigned,
{
    decode_fixed::<H, L>(v, max_mantissa_bits::<H, L>(), frac_bits)
}

/// Decodes into an integer, dropping any fraction.
#[inline]
pub fn decode<H, L>(v: L::Signed, mantissa_bits: u8) -> H
where
    H: Compressible<L>,
    L: Unsigned,
{
    decode_fixed::<H, L>(v, mantissa_bits, 0)
}

#[inline]
pub fn decode_max<H, L>(v: L::Signed) -> H
where
    H: Compressible<L>,
    L: Unsigned,
{
    decode_fixed_max::<H, L>(v, 0)
}

/// Multiplication surrogate: the wrapping sum of the bits. Neither operand
/// may be the zero sentinel.
#[inline]
pub fn mul<S>(a: S, b: S) -> S
where
    S: Signed,
{
    S::from_i64(a.to_i64().wrapping_add(b.to_i64()))
}

/// Division surrogate: the wrapping difference of the bits. Neither operand
/// may be the zero sentinel.
#[inline]
pub fn div<S>(a: S, b: S) -> S
where
    S: Signed,
{
    S::from_i64(a.to_i64().wrapping_sub(b.to_i64()))
}

/// A log value tagged with its mantissa width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Log<S> {
    bits: S,
    mantissa_bits: u8,
}

impl<S> Log<S>
where
    S: Signed,
{
    pub fn zero(mantissa_bits: u8) -> Result<Self, Error> {
        Self::from_bits(bits::signed_min(), mantissa_bits)
    }

    /// The value 1.0, which is all-zero bits at any precision.
    pub fn one(mantissa_bits: u8) -> Result<Self, Error> {
        Self::from_bits(S::default(), mantissa_bits)
    }

    pub fn from_bits(bits: S, mantissa_bits: u8) -> Result<Self, Error> {
        // One bit goes to the sign.
        check_frac_bits::<S>(mantissa_bits.saturating_add(1))?;
        Ok(Self {
            bits,
            mantissa_bits,
        })
    }

    pub fn encode<H>(v: H, mantissa_bits: u8) -> Result<Self, Error>
    where
        H: Compressible<S::Unsigned>,
    {
        Self::encode_fixed(Fixed::new(v, 0)?, mantissa_bits)
    }

    pub fn encode_max<H>(v: H) -> Self
    where
        H: Compressible<S::Unsigned>,
    {
        Self {
            bits: encode_max::<H, S::Unsigned>(v),
            mantissa_bits: max_mantissa_bits::<H, S::Unsigned>(),
        }
    }

    pub fn encode_fixed<H>(v: Fixed<H>, mantissa_bits: u8) -> Result<Self, Error>
    where
        H: Compressible<S::Unsigned>,
    {
        trace!(
            "Log::encode_fixed({}, frac_bits={}, mantissa_bits={})",
            v.raw(),
            v.frac_bits(),
            mantissa_bits
        );
        Self::from_bits(
            encode_fixed::<H, S::Unsigned>(v.raw(), v.frac_bits(), mantissa_bits),
            mantissa_bits,
        )
    }

    pub fn encode_fixed_max<H>(v: Fixed<H>) -> Self
    where
        H: Compressible<S::Unsigned>,
    {
        Self {
            bits: encode_fixed_max::<H, S::Unsigned>(v.raw(), v.frac_bits()),
            mantissa_bits: max_mantissa_bits::<H, S::Unsigned>(),
        }
    }

    pub fn decode<H>(self) -> H
    where
        H: Compressible<S::Unsigned>,
    {
        decode::<H, S::Unsigned>(self.bits, self.mantissa_bits)
    }

    pub fn decode_fixed<H>(self, frac_bits: u8) -> Result<Fixed<H>, Error>
    where
        H: Compressible<S::Unsigned>,
    {
        let raw = decode_fixed::<H, S::Unsigned>(self.bits, self.mantissa_bits, frac_bits);
        Fixed::new(raw, frac_bits)
    }

    /// Approximates the product of the two magnitudes.
    ///
    /// Results outside the representable range saturate, so they decode to
    /// the overflow or underflow value.
    pub fn checked_mul(self, rhs: Self) -> Result<Self, Error> {
        self.check_same_precision(rhs)?;
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::zero_like(self));
        }
        let sum = self.bits.to_i64().saturating_add(rhs.bits.to_i64());
        Ok(self.with_bits(saturate(sum)))
    }

    /// Approximates the quotient of the two magnitudes.
    pub fn checked_div(self, rhs: Self) -> Result<Self, Error> {
        self.check_same_precision(rhs)?;
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero_like(self));
        }
        let difference = self.bits.to_i64().saturating_sub(rhs.bits.to_i64());
        Ok(self.with_bits(saturate(difference)))
    }

    #[inline]
    pub fn bits(self) -> S {
        self.bits
    }

    #[inline]
    pub fn mantissa_bits(self) -> u8 {
        self.mantissa_bits
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.bits == bits::signed_min()
    }

    pub(crate) fn with_bits(self, bits: S) -> Self {
        Self {
            bits,
            mantissa_bits: self.mantissa_bits,
        }
    }

    fn zero_like(other: Self) -> Self {
        other.with_bits(bits::signed_min())
    }

    pub(crate) fn check_same_precision(self, rhs: Self) -> Result<(), Error> {
        if self.mantissa_bits != rhs.mantissa_bits {
            debug!(
                "log precision mismatch: {} vs {}",
                self.mantissa_bits, rhs.mantissa_bits
            );
            return Err(Error::PrecisionMismatch {
                left: self.mantissa_bits,
                right: rhs.mantissa_bits,
            });
        }
        Ok(())
    }
}

/// Clamps `v` into the range of `S`.
fn saturate<S>(v: i64) -> S
where
    S: Signed,
{
    S::from_i64(v.clamp(S::MIN.to_i64(), S::MAX.to_i64()))
}
