//! Polygamma functions ψ⁽ⁿ⁾(x) of arbitrary non-negative order.
//!
//! Orders 0 and 1 delegate to the dedicated digamma and trigamma
//! approximations. Higher orders combine four regimes: a zeta-function
//! series hugging the pole at zero, a Bernoulli asymptotic expansion for
//! large x, exact closed forms at x = 1 and x = ½, and a finite recurrence
//! sum bridging the gap. Negative arguments reflect through the n-th
//! derivative of π·cot(πx), available in closed form up to order 16.

use crate::digamma_fn::{digamma, trigamma};
use crate::gamma_fn::{factorial, lgamma, EPS};
use crate::numeric::{cos_pi, ldexp, poly, sin_pi, LOG_MAX};
use crate::tables::{b2n, FACTORIALS, MAX_B2N, MAX_FACTORIAL};
use crate::zeta_fn::zeta;
use crate::SpecialError;

/// Polynomial coefficients (in cos²πx) of dⁿ/dxⁿ cot(πx) · sⁿ⁺¹/πⁿ for
/// n = 3..=16; orders 1 and 2 have closed forms and are handled inline.
const COT_PI_COEFFS: [&[f64]; 17] = [
    &[],
    &[],
    &[],
    &[-2.0, -4.0],
    &[16.0, 8.0],
    &[-16.0, 88.0, -16.0],
    &[272.0, 416.0, 32.0],
    &[-272.0, -2880.0, -1824.0, -64.0],
    &[7936.0, 24576.0, 7680.0, 128.0],
    &[-7936.0, -137216.0, -185856.0, -31616.0, -256.0],
    &[353792.0, 1841152.0, 1304832.0, 128512.0, 512.0],
    &[-353792.0, -9061376.0, -21253376.0, -8728576.0, -518656.0, -1024.0],
    &[
        22368256.0,
        175627264.0,
        222398464.0,
        56520704.0,
        2084864.0,
        2048.0,
    ],
    &[
        -22368256.0,
        -795300864.0,
        -2868264960.0,
        -2174832640.0,
        -357888000.0,
        -8361984.0,
        -4096.0,
    ],
    &[
        1903757312.0,
        21016670208.0,
        41731645440.0,
        20261765120.0,
        2230947840.0,
        33497088.0,
        8192.0,
    ],
    &[
        -1903757312.0,
        -89702612992.0,
        -460858269696.0,
        -559148810240.0,
        -182172651520.0,
        -13754155008.0,
        -134094848.0,
        -16384.0,
    ],
    &[
        209865342976.0,
        3099269660672.0,
        8885192097792.0,
        7048869314560.0,
        1594922762240.0,
        84134068224.0,
        536608768.0,
        32768.0,
    ],
];

/// n-th derivative of cot(πx) divided by π, used by the reflection formula.
/// `xc` is 1 − x, whichever of the two is smaller in magnitude feeds the
/// exact-reduction sine. Orders above 16 have no tabulated polynomial.
fn poly_cot_pi(n: u32, x: f64, xc: f64) -> Result<f64, SpecialError> {
    let s = if x.abs() < xc.abs() {
        sin_pi(x)
    } else {
        sin_pi(xc)
    };
    let c = cos_pi(x);
    let pi = core::f64::consts::PI;
    if n == 1 {
        return Ok(-pi / (s * s));
    }
    if n == 2 {
        return Ok((2.0 * pi * pi * c) / (s * s * s));
    }
    if n > 16 {
        return Err(SpecialError::DomainError);
    }
    let sum = poly(COT_PI_COEFFS[n as usize], c * c);
    let scale = pi.powi(n as i32) / s.powi(n as i32 + 1);
    if n & 1 == 1 {
        Ok(scale * sum)
    } else {
        Ok(scale * c * sum)
    }
}

/// Series ψ⁽ⁿ⁾(x) = (−1)ⁿ⁺¹ n! [x⁻ⁿ⁻¹ + Σₖ ζ(n+k+1)·C(n+k,k)(−x)ᵏ] for x
/// close to the pole at zero.
fn polygamma_near_zero(n: u32, x: f64) -> Result<f64, SpecialError> {
    let scale = factorial(n)?;
    let mut fac_part = 1.0;
    let prefix = 1.0 / x.powi(n as i32 + 1);

    if prefix > 2.0 / EPS {
        // The pole term dwarfs the series entirely
        return Ok(if n & 1 == 1 { prefix * scale } else { -prefix * scale });
    }

    let mut sum = prefix;
    let mut k = 0u32;
    loop {
        let t = fac_part * zeta((k + n + 1) as f64)?;
        sum += t;
        if t.abs() < (sum * EPS).abs() {
            break;
        }
        k += 1;
        fac_part *= (-x * (n + k) as f64) / k as f64;
        if k > 100 {
            return Err(SpecialError::ConvergenceFailure);
        }
    }
    sum *= scale;
    Ok(if n & 1 == 1 { sum } else { -sum })
}

/// Bernoulli asymptotic expansion of ψ⁽ⁿ⁾(x), valid once x is well past
/// the transition band; switches to log space when (n−1)!·x⁻ⁿ⁻¹ is not
/// representable.
fn polygamma_at_infinity(n: u32, x: f64) -> Result<f64, SpecialError> {
    if n as f64 + x == x {
        // x so large only the leading term survives
        if n == 1 {
            return Ok(1.0 / x);
        }
        let nf = n as f64;
        let nlx = nf * x.ln();
        let sign = if n & 1 == 1 { 1.0 } else { -1.0 };
        if nlx < LOG_MAX && (n as usize) < MAX_FACTORIAL {
            return Ok(sign * FACTORIALS[(n - 1) as usize] * x.powf(-nf));
        }
        return Ok(sign * (lgamma(nf)? - nlx).exp());
    }

    let nf = n as f64;
    let x2 = x * x;

    let mut sum;
    let mut part_term = if (n as usize) <= MAX_FACTORIAL {
        FACTORIALS[(n - 1) as usize] * x.powf(-nf - 1.0)
    } else {
        0.0
    };
    if part_term == 0.0 {
        part_term = lgamma(nf)? - (nf + 1.0) * x.ln();
        sum = (part_term + (nf + 2.0 * x).ln() - core::f64::consts::LN_2).exp();
        part_term += (nf * (nf + 1.0)).ln() - core::f64::consts::LN_2 - x.ln();
        part_term = part_term.exp();
    } else {
        sum = (part_term * (nf + 2.0 * x)) / 2.0;
        part_term *= (nf * (nf + 1.0)) / 2.0;
        part_term /= x;
    }

    if sum == 0.0 {
        return Ok(0.0);
    }

    let mut k = 1usize;
    loop {
        let t = part_term * b2n(k);
        sum += t;
        if (t / sum).abs() < EPS {
            break;
        }
        k += 1;
        let k2 = (2 * k) as f64;
        part_term *= (nf + k2 - 2.0) * (nf - 1.0 + k2);
        part_term /= (k2 - 1.0) * k2;
        part_term /= x2;
        if k >= MAX_B2N {
            return Err(SpecialError::ConvergenceFailure);
        }
    }

    if (n - 1) & 1 == 1 {
        sum = -sum;
    }
    Ok(sum)
}

/// Bridge regime: sum the recurrence terms n!/ (x+k)ⁿ⁺¹ until the argument
/// reaches the asymptotic region, then hand off to
/// [`polygamma_at_infinity`].
fn polygamma_at_transition(n: u32, x: f64) -> Result<f64, SpecialError> {
    let big_n = (0.4f64 * 20.0).trunc() + 4.0 * n as f64;
    let itr = (big_n - x.trunc()) as i64;
    if itr > 100 * n as i64 {
        return Err(SpecialError::ConvergenceFailure);
    }

    let nf = n as f64;
    let mmmo = -nf - 1.0;
    let mut z = x;
    let mut sum0 = 0.0;

    if (z + itr as f64).ln() * mmmo > -LOG_MAX {
        for _ in 1..=itr {
            sum0 += z.powf(mmmo);
            z += 1.0;
        }
        sum0 *= factorial(n)?;
    } else {
        for _ in 1..=itr {
            let lt = z.ln() * mmmo + lgamma(nf + 1.0)?;
            sum0 += lt.exp();
            z += 1.0;
        }
    }
    if (n - 1) & 1 == 1 {
        sum0 = -sum0;
    }
    Ok(sum0 + polygamma_at_infinity(n, z)?)
}

/// Polygamma function ψ⁽ⁿ⁾(x), the n-th derivative of ψ(x).
///
/// Orders 0 and 1 are [`digamma`] and [`trigamma`]. Negative arguments
/// reflect via the tabulated cot-derivative polynomials, which limits them
/// to n ≤ 16; poles (x a non-positive integer) and unsupported reflections
/// fail with [`SpecialError::DomainError`].
///
/// # Example
///
/// ```
/// use specfn::polygamma;
///
/// // ψ″(1) = −2ζ(3)
/// let apery = 1.20205690315959428540;
/// assert!((polygamma(2, 1.0).unwrap() + 2.0 * apery).abs() < 1e-14);
/// ```
pub fn polygamma(n: u32, x: f64) -> Result<f64, SpecialError> {
    if n == 0 {
        return digamma(x);
    }
    if n == 1 {
        return trigamma(x);
    }
    if x.is_nan() {
        return Err(SpecialError::DomainError);
    }

    if x < 0.0 {
        if x.floor() == x {
            return Err(SpecialError::DomainError);
        }
        let z = 1.0 - x;
        let res = polygamma(n, z)? + core::f64::consts::PI * poly_cot_pi(n, z, x)?;
        return Ok(if n & 1 == 1 { -res } else { res });
    }
    if x == 0.0 {
        return Err(SpecialError::DomainError);
    }

    let sign = if n & 1 == 1 { 1.0 } else { -1.0 };
    let lim = (5.0 / n as f64).min(0.25);
    if x < lim {
        polygamma_near_zero(n, x)
    } else if x > 0.4 * 20.0 + 4.0 * n as f64 {
        polygamma_at_infinity(n, x)
    } else if x == 1.0 {
        Ok(sign * factorial(n)? * zeta(n as f64 + 1.0)?)
    } else if x == 0.5 {
        let mut res = sign * factorial(n)? * zeta(n as f64 + 1.0)?;
        if res.abs() >= ldexp(f64::MAX, -(n as i32) - 1) {
            return Err(SpecialError::OverflowError);
        }
        res *= ldexp(1.0, n as i32 + 1) - 1.0;
        Ok(res)
    } else {
        polygamma_at_transition(n, x)
    }
}
