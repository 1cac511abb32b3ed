// intfp/src/ewma.rs

//! Exponentially weighted moving averages over signed fixed-point values.
//!
//! Both variants clamp the incoming value and the running average to
//! `bottom_limit`, then move the average toward the new value by a damped
//! fraction of their distance. A `damper` of 1 or less disables smoothing.

use crate::bits::{Signed, Unsigned};

/// EWMA damped by division. The step is rounded up so the average keeps
/// moving even when the distance is smaller than `damper`.
pub fn ewma_div<S>(new: S, old: S, bottom_limit: S, damper: S::Unsigned) -> S
where
    S: Signed,
{
    let damper = damper.to_u64();
    if damper <= 1 {
        return new;
    }
    smooth(new, old, bottom_limit, |distance| {
        // Ceiling division
        distance / damper + (distance % damper != 0) as u64
    })
}

/// EWMA damped by a right shift of `damper` bits. Cheaper than
/// [`ewma_div`], but small distances round down to no step at all.
pub fn ewma_shr<S>(new: S, old: S, bottom_limit: S, damper: u8) -> S
where
    S: Signed,
{
    if damper <= 1 {
        return new;
    }
    smooth(new, old, bottom_limit, |distance| {
        distance.checked_shr(damper as u32).unwrap_or(0)
    })
}

fn smooth<S, F>(new: S, old: S, bottom_limit: S, step: F) -> S
where
    S: Signed,
    F: FnOnce(u64) -> u64,
{
    let old = old.max(bottom_limit).to_i64();
    let new = new.max(bottom_limit).to_i64();
    if new == old {
        return S::from_i64(old);
    }

    // The step never exceeds the distance, so the result stays between `old`
    // and `new`.
    let step = step(new.abs_diff(old)) as i64;
    S::from_i64(if new > old {
        old.wrapping_add(step)
    } else {
        old.wrapping_sub(step)
    })
}
