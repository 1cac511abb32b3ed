// intfp/src/bits.rs

//! Width traits and bit primitives shared by every codec.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Any integer word the codecs operate on.
pub trait Word:
    Clone + Copy + Default + PartialEq + Eq + PartialOrd + Ord + Hash + Debug + Display
{
    const BITS: u32;
}

/// An unsigned machine word the codecs can be instantiated for.
///
/// All arithmetic is carried out in `u64` and truncated back through
/// `from_u64`, which gives the same modular results as arithmetic performed
/// natively at the narrower width.
pub trait Unsigned: Word {
    type Signed: Signed<Unsigned = Self>;

    const MAX: Self;

    /// Truncates `val` to this width.
    fn from_u64(val: u64) -> Self;
    fn to_u64(self) -> u64;

    /// Reinterprets the bits as the signed type of the same width.
    fn to_signed(self) -> Self::Signed;
}

/// A signed machine word; the two's complement twin of an [`Unsigned`].
pub trait Signed: Word {
    type Unsigned: Unsigned<Signed = Self>;

    const MIN: Self;
    const MAX: Self;

    /// Truncates `val` to this width.
    fn from_i64(val: i64) -> Self;
    fn to_i64(self) -> i64;

    /// Reinterprets the bits as the unsigned type of the same width.
    fn to_unsigned(self) -> Self::Unsigned;
}

/// Marks `Self` as a source width whose values can be compressed into the
/// narrower-or-equal width `L`.
///
/// Implemented for exactly the pairs the integer <-> loc/log codecs and the
/// fixed-point conversions are provided for.
pub trait Compressible<L>: Unsigned
where
    L: Unsigned,
{
}

macro_rules! impl_words {
    ($($unsigned:ty, $signed:ty);* $(;)?) => {
        $(
            impl Word for $unsigned {
                const BITS: u32 = <$unsigned>::BITS;
            }

            impl Word for $signed {
                const BITS: u32 = <$signed>::BITS;
            }

            impl Unsigned for $unsigned {
                type Signed = $signed;

                const MAX: Self = <$unsigned>::MAX;

                #[inline]
                fn from_u64(val: u64) -> Self {
                    val as $unsigned
                }

                #[inline]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn to_signed(self) -> $signed {
                    self as $signed
                }
            }

            impl Signed for $signed {
                type Unsigned = $unsigned;

                const MIN: Self = <$signed>::MIN;
                const MAX: Self = <$signed>::MAX;

                #[inline]
                fn from_i64(val: i64) -> Self {
                    val as $signed
                }

                #[inline]
                fn to_i64(self) -> i64 {
                    self as i64
                }

                #[inline]
                fn to_unsigned(self) -> $unsigned {
                    self as $unsigned
                }
            }
        )*
    };
}

impl_words! {
    u8, i8;
    u16, i16;
    u32, i32;
    u64, i64;
}

macro_rules! impl_compressible {
    ($($high:ty => $low:ty),* $(,)?) => {
        $(impl Compressible<$low> for $high {})*
    };
}

impl_compressible! {
    u8 => u8,
    u16 => u8,
    u32 => u8,
    u64 => u8,
    u16 => u16,
    u32 => u16,
    u64 => u16,
    u32 => u32,
    u64 => u32,
    u64 => u64,
}

/// Find last set: the position of the most significant set bit, plus one.
/// Zero for zero.
#[inline]
pub fn fls32(v: u32) -> u32 {
    32 - v.leading_zeros()
}

/// `1 + floor(log2(v))` for `v > 0`, zero for `v == 0`.
#[inline]
pub fn highest_set_bit(v: u64) -> u32 {
    64 - v.leading_zeros()
}

/// Number of zero bits above the highest set bit of `v`, counted within the
/// width of `T`.
///
/// This is both `T::BITS - 1 - floor(log2(v))` and the left shift that
/// normalizes `v` so its top set bit lands on bit `T::BITS - 1`.
#[inline]
pub fn leading_zero_count<T>(v: T) -> u32
where
    T: Unsigned,
{
    v.to_u64().leading_zeros() - (64 - T::BITS)
}

/// `floor(log2(v))`. `v` must be non-zero.
#[inline]
pub fn floor_log2<T>(v: T) -> u32
where
    T: Unsigned,
{
    debug_assert!(v != T::default());
    T::BITS - 1 - leading_zero_count(v)
}

/// All-ones mask over bits `0..=high_bit` of a `T`-wide word.
///
/// A `high_bit` at or past the top of the word yields the full mask.
#[inline]
pub fn bitmask<T>(high_bit: u32) -> T
where
    T: Unsigned,
{
    T::from_u64(low_bits_mask(high_bit.saturating_add(1)))
}

/// Smallest non-zero unsigned value. Doubles as loc's zero sentinel.
#[inline]
pub fn unsigned_min<T>() -> T
where
    T: Unsigned,
{
    T::from_u64(1)
}

#[inline]
pub fn unsigned_max<T>() -> T
where
    T: Unsigned,
{
    T::MAX
}

/// Most negative signed value. Doubles as log's zero sentinel.
#[inline]
pub fn signed_min<T>() -> T
where
    T: Signed,
{
    T::MIN
}

#[inline]
pub fn signed_max<T>() -> T
where
    T: Signed,
{
    T::MAX
}

// Word helpers for the codecs. Shift amounts at or past 64 produce zero
// instead of panicking.

/// The `count` lowest bits set.
#[inline]
pub(crate) fn low_bits_mask(count: u32) -> u64 {
    match count {
        0 => 0,
        c if c >= 64 => u64::MAX,
        _ => u64::MAX >> (64 - count),
    }
}

#[inline]
pub(crate) fn shl(v: u64, amount: u32) -> u64 {
    v.checked_shl(amount).unwrap_or(0)
}

#[inline]
pub(crate) fn shr(v: u64, amount: u32) -> u64 {
    v.checked_shr(amount).unwrap_or(0)
}

/// Shifts right by `amount`, or left by `-amount` when it is negative.
#[inline]
pub(crate) fn shift_right(v: u64, amount: i64) -> u64 {
    if amount >= 0 {
        shr(v, u32::try_from(amount).unwrap_or(u32::MAX))
    } else {
        shl(v, u32::try_from(-amount).unwrap_or(u32::MAX))
    }
}

/// Rebases a field boundary from `from` to `to` bits: shifts left when `to`
/// is larger, right otherwise.
#[inline]
pub(crate) fn rebase(v: u64, from: u8, to: u8) -> u64 {
    shift_right(v, from as i64 - to as i64)
}

/// Arithmetic counterpart of [`rebase`] for signed words.
#[inline]
pub(crate) fn rebase_signed(v: i64, from: u8, to: u8) -> i64 {
    if to >= from {
        (v as u64).checked_shl((to - from) as u32).unwrap_or(0) as i64
    } else {
        let amount = (from - to) as u32;
        if amount >= 64 {
            if v < 0 {
                -1
            } else {
                0
            }
        } else {
            v >> amount
        }
    }
}
