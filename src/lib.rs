// intfp/src/lib.rs

//! Integer-only fixed-point and pseudo-logarithmic numbers.
//!
//! Three representations of a real value, none of which needs a floating
//! point unit:
//!
//! * Linear fixed point ([`fixed`]), the foundation of the others.
//! * Unsigned logarithmic compressed, "loc" ([`loc`]): dense storage of large
//!   integers in few bits. Not meant for arithmetic.
//! * Signed pseudo-logarithmic, "log" ([`pseudo_log`]): adding two log values
//!   approximates multiplying the numbers they stand for, subtracting
//!   approximates dividing.
//!
//! Every codec is a single generic function instantiated per width. Raw
//! functions take the precision split as an argument; the tagged [`Fixed`],
//! [`Loc`], and [`Log`] types carry it along instead.
//!
//! The log encoding is `floor(log2(v))` plus a *linear* mantissa, not the
//! true logarithm. The error this introduces is exact zero at powers of two
//! and largest between them.

use thiserror::Error;

pub mod bits;
pub mod convert;
pub mod ewma;
pub mod ext;
pub mod fixed;
pub mod loc;
pub mod pseudo_log;
pub mod radix;


pub use bits::{Compressible, Signed, Unsigned, Word};
pub use ewma::{ewma_div, ewma_shr};
pub use fixed::Fixed;
pub use loc::Loc;
pub use pseudo_log::Log;
pub use radix::{Radix, RadixConstants, RADIX_TABLE};

/// Errors from the tagged value types. The raw codecs never fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("precision mismatch: {left} vs {right} mantissa bits")]
    PrecisionMismatch { left: u8, right: u8 },
    #[error("division by a zero log value")]
    DivisionByZero,
    #[error("{bits} fractional bits don't fit a {width}-bit word")]
    InvalidPrecision { bits: u8, width: u32 },
}
