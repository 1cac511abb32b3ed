//! `intfp-demo`: exercises the codecs end to end and reports pass/fail per
//! group.
//!
//! **Usage:**
//! ```text
//! intfp-demo [-b] [-c] [-e] [-l] [-r] [-v]
//! ```
//!
//! With no group selected every group runs. Exits non-zero if any group
//! fails.

use std::process;

use anyhow::Result;
use clap::Parser;
use intfp::{bits, ewma_div, ewma_shr, fixed, loc, pseudo_log, Fixed, Log, Radix};

// Mantissa bits for u64 -> log32 at max precision (32 - 1 - 6).
const LOG_FRACT_BITS: u8 = 25;

/// Run the intfp demonstration groups.
#[derive(Parser)]
#[command(name = "intfp-demo", about = "Exercise the intfp fixed-point and log codecs")]
struct Args {
    /// Run the basic integer <-> log conversion group.
    #[arg(short = 'b')]
    basic: bool,

    /// Run the loc compression group.
    #[arg(short = 'c')]
    loc: bool,

    /// Run the EWMA group.
    #[arg(short = 'e')]
    ewma: bool,

    /// Run the log arithmetic group.
    #[arg(short = 'l')]
    log_arithmetic: bool,

    /// Run the radix conversion group.
    #[arg(short = 'r')]
    radix: bool,

    /// Narrate every intermediate value.
    #[arg(short, long)]
    verbose: bool,
}

type Group = fn(bool) -> Result<bool>;

fn main() -> Result<()> {
    let args = Args::parse();

    let groups: [(&str, bool, Group); 5] = [
        ("Basic Conversion", args.basic, basic_conversion),
        ("LOC Compression", args.loc, loc_compression),
        ("EWMA Functions", args.ewma, ewma_functions),
        ("Log Arithmetic", args.log_arithmetic, log_arithmetic),
        ("Radix Conversion", args.radix, radix_conversion),
    ];
    let run_all = groups.iter().all(|&(_, selected, _)| !selected);

    println!("intfp demo");
    println!("==========");

    let mut passed = 0usize;
    let mut failed = 0usize;
    for (name, selected, group) in groups {
        if !run_all && !selected {
            continue;
        }
        if group(args.verbose)? {
            passed += 1;
            println!("[PASS] {}", name);
        } else {
            failed += 1;
            println!("[FAIL] {}", name);
        }
    }

    println!();
    println!(
        "Summary: {} run, {} passed, {} failed",
        passed + failed,
        passed,
        failed
    );

    if failed > 0 {
        process::exit(1);
    }
    Ok(())
}

fn print_error(original: u64, recovered: u64) {
    if original == 0 {
        println!("  Error: n/a (original is 0)");
        return;
    }
    let error = original.abs_diff(recovered) as f64 / original as f64 * 100.0;
    println!("  Error: {:.6}%", error);
}

fn basic_conversion(verbose: bool) -> Result<bool> {
    let mut passed = true;

    let original = 1_000_000u64;
    let log = Log::<i32>::encode(original, LOG_FRACT_BITS)?;
    let recovered = log.decode::<u64>();
    if verbose {
        println!("\n=== Integer <-> log ===");
        println!("  Original:  {}", original);
        println!("  Log value: {:#010x}", log.bits());
        println!("  Recovered: {}", recovered);
        print_error(original, recovered);
    }
    if recovered == 0 || recovered > original * 2 {
        passed = false;
    }

    let zero = pseudo_log::encode_max::<u64, u32>(0);
    if verbose {
        println!("  Log of 0:  {}", zero);
    }
    if zero != bits::signed_min::<i32>() {
        passed = false;
    }

    let one = pseudo_log::encode_max::<u64, u32>(1);
    if verbose {
        println!("  Log of 1:  {:#010x}", one);
    }
    if pseudo_log::decode_max::<u64, u32>(one) > 2 {
        passed = false;
    }

    Ok(passed)
}

fn loc_compression(verbose: bool) -> Result<bool> {
    if verbose {
        println!("\n=== Loc compression ===");
    }

    for original in [1000u64, 50000, 1000000, 0x1234_5678_9abc_def0] {
        let loc = loc::encode_max::<u64, u16>(original);
        let recovered = loc::decode_max::<u64, u16>(loc);
        if verbose {
            println!("  Original:   {} ({:016x})", original, original);
            println!("  Compressed: {} ({:04x})", loc, loc);
            println!("  Recovered:  {}", recovered);
            print_error(original, recovered);
        }
    }

    // Storage precision for a 32-bit loc
    let original = 50000u64;
    let loc32 = loc::encode::<u64, u32>(original, LOG_FRACT_BITS);
    let recovered = loc::decode::<u64, u32>(loc32, LOG_FRACT_BITS);
    if verbose {
        println!(
            "  32-bit loc: {} -> {:#010x} -> {}",
            original, loc32, recovered
        );
    }

    let zero = loc::encode_max::<u64, u16>(0);
    let one = loc::encode_max::<u64, u16>(1);
    if verbose {
        println!("  Loc of 0: {}", zero);
        println!("  Loc of 1: {}", one);
    }

    Ok(zero == bits::unsigned_min::<u16>() && one == 0 && recovered == original)
}

fn ewma_functions(verbose: bool) -> Result<bool> {
    let (old, new) = (100i32, 200i32);
    let by_division = ewma_div(new, old, 0, 4);
    let by_shift = ewma_shr(new, old, 0, 2);
    if verbose {
        println!("\n=== EWMA ===");
        println!("  Old average: {}, new value: {}", old, new);
        println!("  Division damper (4): {}", by_division);
        println!("  Shift damper (2):    {}", by_shift);
    }

    // Q24.8 fixed point
    let old_q8 = Fixed::<i32>::from_signed_int(old, 8)?;
    let new_q8 = Fixed::<i32>::from_signed_int(new, 8)?;
    let next = Fixed::<i32>::new(ewma_div(new_q8.raw(), old_q8.raw(), 0, 4), 8)?;
    let next_value = next.raw() as f64 / (1 << next.frac_bits()) as f64;
    if verbose {
        println!(
            "  Q24.8: old=100.0, new=200.0 -> next={:.2} (expected 125.0)",
            next_value
        );
    }

    Ok(by_division >= old
        && by_division <= new
        && next.raw() == fixed::to_fixed_signed::<i32, i32>(125, 8))
}

fn log_arithmetic(verbose: bool) -> Result<bool> {
    let (a, b) = (1000u64, 2000u64);
    let log_a = Log::<i32>::encode_max(a);
    let log_b = Log::<i32>::encode_max(b);
    let product = log_a.checked_mul(log_b)?;
    let recovered = product.decode::<u64>();
    if verbose {
        println!("\n=== Multiplication by log addition ===");
        println!("  a = {}, b = {}", a, b);
        println!("  log(a)          = {:#010x}", log_a.bits());
        println!("  log(b)          = {:#010x}", log_b.bits());
        println!("  log(a) + log(b) = {:#010x}", product.bits());
        println!("  Expected product:  {}", a * b);
        println!("  Recovered product: {}", recovered);
        print_error(a * b, recovered);
    }

    Ok(recovered >= a && recovered <= a * b * 2)
}

fn radix_conversion(verbose: bool) -> Result<bool> {
    let log = Log::<i32>::encode(12345u64, LOG_FRACT_BITS)?;
    if verbose {
        println!("\n=== Radix conversion ===");
    }

    let mut passed = true;
    for radix in Radix::ALL {
        let rescaled = log.to_radix(radix);
        let round_trip = Log::from_radix(rescaled, radix)?;
        let difference = round_trip.bits() as i64 - log.bits() as i64;
        if verbose {
            println!("  {:?}:", radix);
            println!("    Original log2:     {:#010x}", log.bits());
            println!("    Rescaled:          {:#010x}", rescaled.raw());
            println!("    Round-tripped log2: {:#010x}", round_trip.bits());
            println!("    Difference:        {}", difference);
        }
        // The tabulated constants aren't exact inverses; allow a few units.
        if difference.abs() > 16 {
            passed = false;
        }
    }

    // Scaled gains
    let base_value = 1_000_000u64;
    let base = Log::<i32>::encode(base_value, LOG_FRACT_BITS)?;
    for radix in Radix::ALL {
        for gain in [-10i32, -5, -3, -2, -1, 1, 2, 3, 5, 10] {
            let factor = match radix {
                Radix::DbPower => 10f64.powf(gain as f64 / 10.0),
                Radix::OnePointTwoFive => 1.25f64.powi(gain),
            };
            let expected = base_value as f64 * factor;

            let scaled = base.apply_gain(Fixed::from_signed_int(gain, LOG_FRACT_BITS)?, radix)?;
            let result = scaled.decode::<u64>();
            if verbose {
                println!(
                    "  Applying {} {:?} gain to {}: {} (expected ~{:.0})",
                    gain, radix, base_value, result, expected
                );
            }
            // Linear-mantissa error stays well inside 15% either way.
            let ratio = result as f64 / expected;
            if !(0.85..=1.15).contains(&ratio) {
                passed = false;
            }
        }
    }

    Ok(passed)
}
