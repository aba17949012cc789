// src/raw_data/ibm.rs
//! IBM System/360 single precision floating point.
//!
//! Layout of the 32-bit big-endian word:
//!
//! ```text
//!  31 | 30 ........ 24 | 23 ............................ 0
//! sign| exponent (7)   | fraction (24)
//! ```
//!
//! value = sign * (fraction / 2^24) * 16^(exponent - 64)
//!
//! Encoding truncates the fraction, so `ibm_to_f32(f32_to_ibm(x))` is
//! within 2^-20 relative error of `x` but not always bit-exact.

const FRACTION_MASK: u32 = 0x00FF_FFFF;
const EXPONENT_BIAS: i32 = 64;
const TWO_POW_24: f64 = 16_777_216.0;

/// Largest magnitude IBM word (positive)
pub const IBM_MAX: u32 = 0x7FFF_FFFF;

/// Decode an IBM float word into an `f32`
#[inline]
pub fn ibm_to_f32(word: u32) -> f32 {
    if word == 0 {
        return 0.0;
    }

    let negative = word >> 31 != 0;
    let exponent = ((word >> 24) & 0x7F) as i32;
    let fraction = (word & FRACTION_MASK) as f64 / TWO_POW_24;

    let magnitude = fraction * 16f64.powi(exponent - EXPONENT_BIAS);
    let value = if negative { -magnitude } else { magnitude };
    value as f32
}

/// Encode an `f32` as an IBM float word.
///
/// The base-16 exponent comes from `floor(log16(|v|))`; the mantissa is then
/// scaled into `[1/16, 1)`, which puts the stored exponent one above that
/// (`+64` bias, `+1` for the scaling). Overflow saturates to the largest
/// magnitude, underflow flushes to zero and NaN encodes as zero.
pub fn f32_to_ibm(value: f32) -> u32 {
    if value == 0.0 || value.is_nan() {
        return 0;
    }

    let sign = if value < 0.0 { 1u32 << 31 } else { 0 };
    if value.is_infinite() {
        return sign | IBM_MAX;
    }

    let magnitude = (value as f64).abs();
    let mut exponent = (magnitude.ln() / 16f64.ln()).floor() as i32;
    let mut mantissa = magnitude / 16f64.powi(exponent);

    // log rounding can land one step off at exact powers of 16
    if mantissa >= 16.0 {
        mantissa /= 16.0;
        exponent += 1;
    } else if mantissa < 1.0 {
        mantissa *= 16.0;
        exponent -= 1;
    }

    let ibm_exponent = exponent + EXPONENT_BIAS + 1;
    if ibm_exponent > 0x7F {
        return sign | IBM_MAX;
    }
    if ibm_exponent < 0 {
        return 0;
    }

    let fraction = ((mantissa / 16.0) * TWO_POW_24).floor() as u32 & FRACTION_MASK;
    sign | ((ibm_exponent as u32) << 24) | fraction
}
