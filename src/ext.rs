// intfp/src/ext.rs

//! Convenience helpers layered on the codecs.

use crate::bits::{Compressible, Unsigned};
use crate::{loc, pseudo_log};

/// Returns the value `v` reads back as after being stored in a loc value
/// with `mantissa_bits` mantissa bits.
pub fn loc_quantize<H, L>(v: H, mantissa_bits: u8) -> H
where
    H: Compressible<L>,
    L: Unsigned,
{
    loc::decode::<H, L>(loc::encode::<H, L>(v, mantissa_bits), mantissa_bits)
}

/// Returns the value `v` reads back as after a trip through a log value
/// with `mantissa_bits` mantissa bits.
pub fn log_quantize<H, L>(v: H, mantissa_bits: u8) -> H
where
    H: Compressible<L>,
    L: Unsigned,
{
    pseudo_log::decode::<H, L>(pseudo_log::encode::<H, L>(v, mantissa_bits), mantissa_bits)
}
