use crate::error::{EvalError, Result};
use rand::Rng;

/// Largest operand whose factorial still fits in an `f64`.
pub const FACTORIAL_LIMIT: f64 = 170.0;

/// `n!` for non-negative integral `n`. Past [`FACTORIAL_LIMIT`] the product is `+inf`.
pub fn factorial(n: f64) -> Result<f64> {
    if !(n >= 0.0) || n.fract() != 0.0 {
        return Err(EvalError::InvalidFactorial { value: n });
    }
    if n > FACTORIAL_LIMIT {
        return Ok(f64::INFINITY);
    }

    let mut result = 1.0;
    let mut factor = n;
    while factor > 1.0 {
        result *= factor;
        factor -= 1.0;
    }
    Ok(result)
}

/// The `n`-th root of `x`.
pub fn nth_root(x: f64, n: f64) -> f64 {
    x.powf(1.0 / n)
}

/// Maximum number of fractional digits `round_digits` honours.
pub const ROUND_DIGITS_LIMIT: f64 = 15.0;

/// Rounds `x` to `digits` fractional digits, midpoints to even. `digits` is
/// clamped to `0..=15`; at 15 or more `x` is returned unchanged.
pub fn round_digits(x: f64, digits: f64) -> f64 {
    let digits = digits.trunc().clamp(0.0, ROUND_DIGITS_LIMIT);
    if digits >= ROUND_DIGITS_LIMIT {
        return x;
    }
    let factor = 10f64.powi(digits as i32);
    (x * factor).round_ties_even() / factor
}

/// Next representable value above `x`.
pub fn bit_increment(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Next representable value below `x`.
pub fn bit_decrement(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY {
        return x;
    }
    if x == 0.0 {
        return -f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits - 1)
    } else {
        f64::from_bits(bits + 1)
    }
}

/// Unbiased binary exponent of `x`.
pub fn logb(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::NEG_INFINITY;
    }
    if x.is_infinite() {
        return f64::INFINITY;
    }

    let exponent = ((x.to_bits() >> 52) & 0x7ff) as i64;
    if exponent == 0 {
        // subnormal
        x.abs().log2().floor()
    } else {
        (exponent - 1023) as f64
    }
}

/// Whichever operand has the larger magnitude; ties go to the positive one.
pub fn max_magnitude(x: f64, y: f64) -> f64 {
    let (ax, ay) = (x.abs(), y.abs());
    if ax > ay || x.is_nan() {
        x
    } else if ax == ay {
        if x.is_sign_negative() {
            y
        } else {
            x
        }
    } else {
        y
    }
}

/// Whichever operand has the smaller magnitude; ties go to the negative one.
pub fn min_magnitude(x: f64, y: f64) -> f64 {
    let (ax, ay) = (x.abs(), y.abs());
    if ax < ay || x.is_nan() {
        x
    } else if ax == ay {
        if x.is_sign_negative() {
            x
        } else {
            y
        }
    } else {
        y
    }
}

/// Uniform random integer in `[lo, hi)`. Returns `lo` for an empty range and
/// `NaN` when the bounds are reversed.
pub fn random_int(lo: f64, hi: f64) -> f64 {
    let (lo, hi) = (lo as i64, hi as i64);
    if lo == hi {
        lo as f64
    } else if lo > hi {
        f64::NAN
    } else {
        rand::rng().random_range(lo..hi) as f64
    }
}

pub fn random_unit() -> f64 {
    rand::rng().random::<f64>()
}

pub fn bitwise_and(x: f64, y: f64) -> f64 {
    ((x as i64) & (y as i64)) as f64
}

pub fn bitwise_or(x: f64, y: f64) -> f64 {
    ((x as i64) | (y as i64)) as f64
}

pub fn bitwise_xor(x: f64, y: f64) -> f64 {
    ((x as i64) ^ (y as i64)) as f64
}

pub fn bitwise_not(x: f64) -> f64 {
    !(x as i64) as f64
}

pub fn shift_left(x: f64, by: f64) -> f64 {
    (x as i64).wrapping_shl(by as u32) as f64
}

pub fn shift_right(x: f64, by: f64) -> f64 {
    (x as i64).wrapping_shr(by as u32) as f64
}
