//! Shared numeric primitives: polynomial evaluation, IEEE-754
//! mantissa/exponent decomposition, continued-fraction and series evaluators,
//! and log-space arithmetic.
//!
//! The continued-fraction and series evaluators take their terms from
//! `FnMut` closures; each closure carries the recurrence state for one
//! evaluation and is consumed exactly once. Neither evaluator fails on
//! non-convergence — the caller accepts the best available estimate once the
//! iteration budget is spent.

use crate::SpecialError;

/// Natural log of the largest finite `f64`, rounded down.
pub(crate) const LOG_MAX: f64 = 709.0;

/// Natural log of the smallest normal positive `f64`, rounded up.
pub(crate) const LOG_MIN: f64 = -709.0;

/// Substituted for an exact-zero convergent inside the Lentz recurrences.
const TINY: f64 = 1e-300;

/// Evaluate `p[0] + p[1]·z + p[2]·z² + …` by Horner's rule.
#[inline]
pub(crate) fn poly(p: &[f64], z: f64) -> f64 {
    let mut s = 0.0;
    for &c in p.iter().rev() {
        s = s * z + c;
    }
    s
}

/// Decompose a finite non-zero `x` into `(m, e)` with `|m| ∈ [0.5, 1)` and
/// `x == m · 2^e`. Subnormal inputs are renormalized through a `2^64` scale
/// before the exponent is read off. Zero and non-finite inputs come back
/// unchanged with exponent 0.
///
/// `ldexp(frexp(x))` is exact (bit-for-bit) for every finite `x`.
pub fn frexp(x: f64) -> (f64, i32) {
    if x == 0.0 || !x.is_finite() {
        return (x, 0);
    }
    let mut biased = ((x.to_bits() >> 52) & 0x7ff) as i32;
    if biased == 0 {
        let scaled = x * 2f64.powi(64);
        biased = (((scaled.to_bits() >> 52) & 0x7ff) as i32) - 64;
    }
    let exponent = biased - 1022;
    (ldexp(x, -exponent), exponent)
}

/// Reconstruct `mantissa · 2^exponent`, splitting the scale across at most
/// three factors so no intermediate power of two overflows even when the
/// result is subnormal.
pub fn ldexp(mantissa: f64, exponent: i32) -> f64 {
    let steps = ((exponent.abs() + 1022) / 1023).min(3);
    let mut result = mantissa;
    for i in 0..steps {
        result *= 2f64.powi((exponent + i).div_euclid(steps));
    }
    result
}

/// Modified Lentz evaluation of `a1/(b1 + a2/(b2 + …))` where `next` yields
/// `(a_n, b_n)` pairs starting at n = 1; the first call's `a` is returned as
/// the numerator over the converged tail. Stops when the per-step update is
/// within `factor` of 1, or after `max_terms` further terms.
pub(crate) fn cont_frac_a(mut next: impl FnMut() -> (f64, f64), factor: f64, max_terms: u32) -> f64 {
    let terminator = factor.abs();

    let (a0, b0) = next();
    let mut f = if b0 == 0.0 { TINY } else { b0 };
    let mut c = f;
    let mut d = 0.0;
    for _ in 0..max_terms {
        let (an, bn) = next();
        d = bn + an * d;
        if d == 0.0 {
            d = TINY;
        }
        c = bn + an / c;
        if c == 0.0 {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = c * d;
        f *= delta;
        if (delta - 1.0).abs() < terminator {
            break;
        }
    }
    a0 / f
}

/// As [`cont_frac_a`], but for the `b0 + a1/(b1 + a2/(b2 + …))` convention:
/// the first call's `b` seeds the convergent and the fraction value itself is
/// returned.
pub(crate) fn cont_frac_b(mut next: impl FnMut() -> (f64, f64), factor: f64, max_terms: u32) -> f64 {
    let terminator = factor.abs();

    let (_, b0) = next();
    let mut f = if b0 == 0.0 { TINY } else { b0 };
    let mut c = f;
    let mut d = 0.0;
    for _ in 0..max_terms {
        let (an, bn) = next();
        d = bn + an * d;
        if d == 0.0 {
            d = TINY;
        }
        c = bn + an / c;
        if c == 0.0 {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = c * d;
        f *= delta;
        if (delta - 1.0).abs() < terminator {
            break;
        }
    }
    f
}

/// Accumulate terms from `next` onto `init` until the newest term is smaller
/// in magnitude than `factor` times the running sum, or `max_terms` is
/// reached.
pub(crate) fn sum_series(mut next: impl FnMut() -> f64, factor: f64, max_terms: u32, init: f64) -> f64 {
    let mut sum = init;
    for _ in 0..max_terms {
        let term = next();
        sum += term;
        if term.abs() < (factor * sum).abs() {
            break;
        }
    }
    sum
}

/// `x^y − 1` without cancellation for small `y·ln x`.
///
/// Requires `y` integral when `x ≤ 0`. Fails with [`SpecialError::OverflowError`]
/// when the result exceeds the representable range.
pub fn powm1(x: f64, y: f64) -> Result<f64, SpecialError> {
    if x <= 0.0 && y.trunc() != y {
        return Err(SpecialError::DomainError);
    }
    if x > 0.0 {
        if (y * (x - 1.0)).abs() < 0.5 || y.abs() < 0.2 {
            // y·ln(x) is small enough for expm1 to keep full precision
            let l = y * x.ln();
            if l < 0.5 {
                return Ok(l.exp_m1());
            }
            if l > LOG_MAX {
                return Err(SpecialError::OverflowError);
            }
        }
    } else if (y / 2.0).trunc() == y / 2.0 {
        // even integer power of a negative base
        return powm1(-x, y);
    }
    Ok(x.powf(y) - 1.0)
}

/// `ln(1+x) − x`, accurate near zero where the direct form cancels.
/// Requires `x > −1`.
pub(crate) fn log1pmx(x: f64) -> Result<f64, SpecialError> {
    if x <= -1.0 {
        return Err(SpecialError::DomainError);
    }
    let a = x.abs();
    if a > 0.95 {
        return Ok(x.ln_1p() - x);
    }
    if a < 1e-20 {
        return Ok(-x * x / 2.0);
    }
    // The ln(1+x) series with its linear term dropped: -x²/2 + x³/3 - …
    let mut k = 0u32;
    let m = -x;
    let mut p = -1.0;
    let mut term = move || {
        k += 1;
        p *= m;
        p / k as f64
    };
    term();
    Ok(sum_series(term, 1e-20, 100, 0.0))
}

/// `ln(1 + eˣ)` without overflow, split over three sub-ranges.
pub fn log1pexp(x: f64) -> f64 {
    if x < -37.0 {
        return x.exp();
    }
    if x <= 18.0 {
        return x.exp().ln_1p();
    }
    if x <= 33.3 {
        return x + (-x).exp();
    }
    x
}

/// `ln(1 − e⁻ᵃ)` for `a > 0`, switching forms at ln 2 to avoid cancellation.
pub fn log1mexp(a: f64) -> Result<f64, SpecialError> {
    if a <= 0.0 {
        return Err(SpecialError::DomainError);
    }
    if a <= core::f64::consts::LN_2 {
        Ok((-(-a).exp_m1()).ln())
    } else {
        Ok((-(-a).exp()).ln_1p())
    }
}

/// `ln(eᵃ + eᵇ)` in log space.
pub fn log_add(a: f64, b: f64) -> f64 {
    let hi = a.max(b);
    let lo = a.min(b);
    hi + log1pexp(lo - hi)
}

/// `sin(πx)` with exact argument reduction, so half-integer and integer
/// multiples come out exact even for large `x`.
pub(crate) fn sin_pi(x: f64) -> f64 {
    let pi = core::f64::consts::PI;
    if x < 0.0 {
        return -sin_pi(-x);
    }
    let mut x = x;
    let mut invert = false;
    if x < 0.5 {
        return (pi * x).sin();
    }
    if x < 1.0 {
        invert = true;
        x = -x;
    }
    let mut rem = x.floor();
    if (rem as i64) & 1 != 0 {
        invert = !invert;
    }
    rem = x - rem;
    if rem > 0.5 {
        rem = 1.0 - rem;
    }
    if rem == 0.5 {
        return if invert { -1.0 } else { 1.0 };
    }
    let res = (pi * rem).sin();
    if invert {
        -res
    } else {
        res
    }
}

/// `cos(πx)` with the same reduction scheme as [`sin_pi`].
pub(crate) fn cos_pi(x: f64) -> f64 {
    let pi = core::f64::consts::PI;
    let mut x = x;
    let mut invert = false;
    if x.abs() < 0.25 {
        return (pi * x).cos();
    }
    if x < 0.0 {
        x = -x;
    }
    let mut rem = x.floor();
    if (rem as i64) & 1 != 0 {
        invert = !invert;
    }
    rem = x - rem;
    if rem > 0.5 {
        rem = 1.0 - rem;
        invert = !invert;
    }
    if rem == 0.5 {
        return 0.0;
    }
    let res = if rem > 0.25 {
        (pi * (0.5 - rem)).sin()
    } else {
        (pi * rem).cos()
    };
    if invert {
        -res
    } else {
        res
    }
}
