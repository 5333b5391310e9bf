//! Incomplete beta function, normalised and not, with its x-derivative.
//!
//! The dispatcher mirrors the structure of the incomplete gamma one but has
//! far more regions: closed forms for the degenerate parameter choices, two
//! power series, a 20-step recurrence ("A-step") that moves `a` into range
//! for the asymptotic small-b/large-a series, an exact binomial sum for
//! integer parameters, and a continued fraction for the central region.
//! Whenever a region converges faster for the complement, the working
//! arguments are swapped via [`Tail`] and the result is un-inverted once at
//! the end.

use crate::beta_fn::{beta, EPS};
use crate::gamma_fn::{gamma, gamma_delta_ratio, lgamma, scaled_gamma, MIN_REC};
use crate::incgamma::{
    full_gamma_prefix, incomplete_gamma, regularised_gamma_prefix, IncompleteGammaOptions,
};
use crate::numeric::{cont_frac_b, powm1, sum_series};
use crate::tables::FACTORIALS;
use crate::SpecialError;

const MAX_TERMS: u32 = 100;
const HALF_PI: f64 = core::f64::consts::FRAC_PI_2;

/// Tail and normalisation selectors for [`incomplete_beta`].
///
/// Defaults to the regularized lower function I_x(a, b).
#[derive(Debug, Clone, Copy)]
pub struct IncompleteBetaOptions {
    /// Lower tail when true, upper tail when false.
    pub lower: bool,
    /// Divide by B(a, b) when true.
    pub normalised: bool,
}

impl Default for IncompleteBetaOptions {
    fn default() -> Self {
        Self {
            lower: true,
            normalised: true,
        }
    }
}

/// Working arguments of the dispatcher. `swap` exchanges the roles of the
/// two tails; `invert` records how many net swaps are pending so the final
/// un-inversion happens exactly once.
struct Tail {
    a: f64,
    b: f64,
    x: f64,
    y: f64,
    invert: bool,
}

impl Tail {
    fn swap(&mut self) {
        core::mem::swap(&mut self.a, &mut self.b);
        core::mem::swap(&mut self.x, &mut self.y);
        self.invert = !self.invert;
    }
}

fn denormal(x: f64) -> bool {
    x.abs() < f64::MIN_POSITIVE
}

/// `prefix · x^a y^b / B(a,b)` (or without the beta divide when `!norm`),
/// rearranged so the power terms cannot denormalise prematurely; falls back
/// to recurrence-rescued and then log-space forms.
fn incomplete_beta_power_terms(
    a: f64,
    b: f64,
    x: f64,
    y: f64,
    norm: bool,
    prefix: f64,
) -> Result<f64, SpecialError> {
    if !norm {
        return Ok(prefix * x.powf(a) * y.powf(b));
    }

    let c = a + b;

    let a_shift = if a < MIN_REC {
        1 + (MIN_REC - a).trunc() as u32
    } else {
        0
    };
    let b_shift = if b < MIN_REC {
        1 + (MIN_REC - b).trunc() as u32
    } else {
        0
    };

    if a_shift == 0 && b_shift == 0 {
        let (pow1, pow2) = if a < b {
            (
                ((x * y * c * c) / (a * b)).powf(a),
                ((y * c) / b).powf(b - a),
            )
        } else {
            (
                ((x * y * c * c) / (a * b)).powf(b),
                ((x * c) / a).powf(a - b),
            )
        };
        if denormal(pow1) || denormal(pow2) {
            return Ok(
                (prefix * (a * ((x * c) / a).ln() + b * ((y * c) / b).ln()).exp()
                    * scaled_gamma(c, false)?)
                    / (scaled_gamma(a, false)? * scaled_gamma(b, false)?),
            );
        }
        return Ok((prefix * pow1 * pow2 * scaled_gamma(c, false)?)
            / (scaled_gamma(a, false)? * scaled_gamma(b, false)?));
    }

    let pow1 = x.powf(a);
    let pow2 = y.powf(b);
    let bet = beta(a, b)?;

    if denormal(pow1) || denormal(pow2) || denormal(bet) {
        let c_shift = a_shift + b_shift;
        let mut res =
            incomplete_beta_power_terms(a + a_shift as f64, b + b_shift as f64, x, y, norm, prefix)?;
        if !denormal(res) {
            for i in 0..c_shift {
                if i < a_shift {
                    res *= a + i as f64;
                    res /= x;
                }
                if i < b_shift {
                    res *= b + i as f64;
                    res /= y;
                }
                res /= c + i as f64;
            }
            return Ok(prefix * res);
        }
        let mut log_res = x.ln() * a + y.ln() * b + prefix.ln();
        if !denormal(bet) {
            log_res -= bet.ln();
        } else {
            log_res += lgamma(c)? - lgamma(a)? - lgamma(b)?;
        }
        return Ok(log_res.exp());
    }
    Ok(prefix * pow1 * (pow2 / bet))
}

/// Power series Σ (1−b)ₙ xⁿ / (n! (a+n)) scaled by the power-term prefix,
/// accumulated onto `s0`.
fn incomplete_beta_series(
    a: f64,
    b: f64,
    x: f64,
    s0: f64,
    norm: bool,
    y: f64,
    deriv: Option<&mut f64>,
) -> Result<f64, SpecialError> {
    let res;
    if norm {
        let c = a + b;

        let a_shift = if a < MIN_REC {
            1 + (MIN_REC - a).trunc() as u32
        } else {
            0
        };
        let b_shift = if b < MIN_REC {
            1 + (MIN_REC - b).trunc() as u32
        } else {
            0
        };
        if a_shift == 0 && b_shift == 0 {
            res = (((x * c) / a).powf(a) * (c / b).powf(b) * scaled_gamma(c, false)?)
                / (scaled_gamma(a, false)? * scaled_gamma(b, false)?);
        } else if a < 1.0 && b > 1.0 {
            res = x.powf(a) / (gamma(a)? * gamma_delta_ratio(b, a)?);
        } else {
            let pow0 = x.powf(a);
            let bet = beta(a, b)?;
            if denormal(pow0) || denormal(bet) {
                res = (a * x.ln() + lgamma(c)? - lgamma(a)? - lgamma(b)?).exp();
            } else {
                res = pow0 / bet;
            }
        }
        if let Some(d) = deriv {
            *d = res * y.powf(b);
        }
    } else {
        res = x.powf(a);
    }
    if denormal(res) {
        return Ok(s0);
    }

    let mut term = res;
    let mut apn = a;
    let mut poch = 1.0 - b;
    let mut n = 1.0;
    Ok(sum_series(
        move || {
            let r = term / apn;
            apn += 1.0;
            term *= (poch * x) / n;
            n += 1.0;
            poch += 1.0;
            r
        },
        EPS,
        MAX_TERMS,
        s0,
    ))
}

/// Continued fraction for I_x(a, b), best in the central region where
/// neither series converges quickly.
fn incomplete_beta_fraction(
    a: f64,
    b: f64,
    x: f64,
    y: f64,
    norm: bool,
    deriv: Option<&mut f64>,
) -> Result<f64, SpecialError> {
    let res = incomplete_beta_power_terms(a, b, x, y, norm, 1.0)?;
    if let Some(d) = deriv {
        *d = res;
    }
    if res == 0.0 {
        return Ok(res);
    }

    let mut m = 0.0;
    let frac = cont_frac_b(
        move || {
            let mut an = (a + m - 1.0) * (a + b + m - 1.0) * m * (b - m) * x * x;
            let den = a + 2.0 * m - 1.0;
            an /= den * den;

            let mut bn = m;
            bn += (m * (b - m) * x) / (a + 2.0 * m - 1.0);
            bn += ((a + m) * (a * y - b * x + 1.0 + m * (2.0 - x))) / (a + 2.0 * m + 1.0);

            m += 1.0;
            (an, bn)
        },
        EPS,
        MAX_TERMS,
    );
    Ok(res / frac)
}

/// Sum of the first `k` terms of the recurrence that relates I_x(a, b) to
/// I_x(a+k, b); used to raise `a` before the asymptotic series applies.
fn incomplete_beta_a_step(
    a: f64,
    b: f64,
    x: f64,
    y: f64,
    k: u32,
    norm: bool,
    deriv: Option<&mut f64>,
) -> Result<f64, SpecialError> {
    let mut pfx = incomplete_beta_power_terms(a, b, x, y, norm, 1.0)?;
    if let Some(d) = deriv {
        *d = pfx;
    }
    pfx /= a;
    if pfx == 0.0 {
        return Ok(pfx);
    }
    let mut s = 1.0;
    let mut t = 1.0;
    for i in 0..k.saturating_sub(1) {
        t *= ((a + b + i as f64) * x) / (a + i as f64 + 1.0);
        s += t;
    }
    Ok(pfx * s)
}

/// `(a)ₖ / (b)ₖ` — ratio of rising factorials.
fn rising_factorial_ratio(a: f64, b: f64, k: u32) -> f64 {
    let mut res = 1.0;
    for i in 0..k {
        res *= (a + i as f64) / (b + i as f64);
    }
    res
}

const PN_SIZE: usize = 30;

/// Asymptotic expansion of I_x(a, b) for large a and small b, driven by a
/// sequence of incomplete-gamma ratios `j` and polynomial coefficients `p`
/// built by recurrence.
fn incomplete_beta_small_b_large_a_series(
    a: f64,
    b: f64,
    x: f64,
    y: f64,
    s0: f64,
    mult: f64,
    norm: bool,
) -> Result<f64, SpecialError> {
    let bm1 = b - 1.0;
    let t = a + bm1 / 2.0;
    let lx = if y < 0.35 { (-y).ln_1p() } else { x.ln() };
    let u = -t * lx;
    let h = regularised_gamma_prefix(b, u)?;
    if denormal(h) {
        return Ok(s0);
    }
    let mut pfx;
    if norm {
        pfx = h / gamma_delta_ratio(a, b)?;
        pfx /= t.powf(b);
    } else {
        pfx = full_gamma_prefix(b, u) / t.powf(b);
    }
    pfx *= mult;

    let mut p = [0.0; PN_SIZE];
    p[0] = 1.0;

    let mut j = incomplete_gamma(
        b,
        u,
        IncompleteGammaOptions {
            lower: false,
            normalised: true,
        },
    )? / h;

    let mut s = s0 + pfx * j;
    let mut tnp1 = 1usize;
    let lx2 = (lx / 2.0) * (lx / 2.0);
    let mut lxp = 1.0;
    let t4 = 4.0 * t * t;
    let mut b2n = b;

    for n in 1..PN_SIZE {
        tnp1 += 2;
        let mut tmp1 = 3usize;
        let mut pn = 0.0;
        for m in 1..n {
            let mbn = m as f64 * b - n as f64;
            pn += (mbn * p[n - m]) / FACTORIALS[tmp1];
            tmp1 += 2;
        }
        pn /= n as f64;
        pn += bm1 / FACTORIALS[tnp1];
        p[n] = pn;

        j = (b2n * (b2n + 1.0) * j + (u + b2n + 1.0) * lxp) / t4;
        lxp *= lx2;
        b2n += 2.0;

        let r = pfx * pn * j;
        s += r;
        if r > 1.0 {
            if r < EPS * s {
                break;
            }
        } else if (r / EPS).abs() < s.abs() {
            break;
        }
    }
    Ok(s)
}

/// `C(n, k)` for possibly huge real-valued n, formed in log space.
fn choose_log(n: f64, k: f64) -> Result<f64, SpecialError> {
    Ok((lgamma(n + 1.0)? - lgamma(k + 1.0)? - lgamma(n - k + 1.0)?).exp())
}

/// Exact upper tail of the binomial: Σ_{i>k} C(n,i) x^i y^{n−i}, with a
/// restart from the central term when x^n denormalises.
fn binomial_ccdf(n: f64, k: f64, x: f64, y: f64) -> Result<f64, SpecialError> {
    let mut res = x.powf(n);
    if !denormal(res) {
        let mut t = res;
        let mut i = n - 1.0;
        while i > k {
            t *= ((i + 1.0) * y) / ((n - i) * x);
            res += t;
            i -= 1.0;
        }
    } else {
        let mut start = (n * x).trunc();
        if start <= k + 1.0 {
            start = (k + 2.0).trunc();
        }
        res = x.powf(start) * y.powf(n - start) * choose_log(n, start)?;
        if res == 0.0 {
            let mut i = start - 1.0;
            while i > k {
                res += x.powf(i) * y.powf(n - i) * choose_log(n, i)?;
                i -= 1.0;
            }
        } else {
            let t0 = res;
            let mut t = res;
            let mut i = start - 1.0;
            while i > k {
                t *= ((i + 1.0) * y) / ((n - i) * x);
                res += t;
                i -= 1.0;
            }
            t = t0;
            let mut i = start + 1.0;
            while i <= n {
                t *= ((n - i + 1.0) * x) / (i * y);
                res += t;
                i += 1.0;
            }
        }
    }
    Ok(res)
}

fn incomplete_beta_impl(
    a: f64,
    b: f64,
    x: f64,
    invert: bool,
    norm: bool,
    mut deriv: Option<&mut f64>,
) -> Result<f64, SpecialError> {
    if !(0.0..=1.0).contains(&x) {
        return Err(SpecialError::DomainError);
    }
    if norm {
        if !(a >= 0.0) || !(b >= 0.0) || (a == 0.0 && b == 0.0) {
            return Err(SpecialError::DomainError);
        }
        if a == 0.0 {
            return Ok(if invert { 0.0 } else { 1.0 });
        }
        if b == 0.0 {
            return Ok(if invert { 1.0 } else { 0.0 });
        }
    } else if !(a > 0.0) || !(b > 0.0) {
        return Err(SpecialError::DomainError);
    }

    let mut w = Tail {
        a,
        b,
        x,
        y: 1.0 - x,
        invert,
    };

    // Sentinel: a negative derivative at the end means no branch filled it
    // in and the power-term form is used instead.
    if let Some(d) = deriv.as_deref_mut() {
        *d = -1.0;
    }

    if w.x == 0.0 {
        if let Some(d) = deriv.as_deref_mut() {
            *d = if w.a == 1.0 {
                1.0
            } else if w.a < 1.0 {
                f64::MAX / 2.0
            } else {
                f64::MIN_POSITIVE * 2.0
            };
        }
        return Ok(if w.invert {
            if norm {
                1.0
            } else {
                beta(w.a, w.b)?
            }
        } else {
            0.0
        });
    }
    if w.x == 1.0 {
        if let Some(d) = deriv.as_deref_mut() {
            *d = if w.b == 1.0 {
                1.0
            } else if w.b < 1.0 {
                f64::MAX / 2.0
            } else {
                f64::MIN_POSITIVE * 2.0
            };
        }
        return Ok(if !w.invert {
            if norm {
                1.0
            } else {
                beta(w.a, w.b)?
            }
        } else {
            0.0
        });
    }
    if w.a == 0.5 && w.b == 0.5 {
        // Arcsine distribution
        if let Some(d) = deriv.as_deref_mut() {
            *d = 1.0 / (core::f64::consts::PI * (w.x * w.y).sqrt());
        }
        let mut p = if w.invert {
            w.y.sqrt().asin() / HALF_PI
        } else {
            w.x.sqrt().asin() / HALF_PI
        };
        if !norm {
            p *= core::f64::consts::PI;
        }
        return Ok(p);
    }

    if w.a == 1.0 {
        w.swap();
    }

    if w.b == 1.0 {
        if w.a == 1.0 {
            if let Some(d) = deriv.as_deref_mut() {
                *d = 1.0;
            }
            return Ok(if w.invert { w.y } else { w.x });
        }

        if let Some(d) = deriv.as_deref_mut() {
            *d = w.a * w.x.powf(w.a - 1.0);
        }
        let mut p = if w.y < 0.5 {
            if w.invert {
                -(w.a * (-w.y).ln_1p()).exp_m1()
            } else {
                (w.a * (-w.y).ln_1p()).exp()
            }
        } else if w.invert {
            -powm1(w.x, w.a)?
        } else {
            w.x.powf(w.a)
        };
        if !norm {
            p /= w.a;
        }
        return Ok(p);
    }

    let mut frac;
    if w.a.min(w.b) <= 1.0 {
        if w.x > 0.5 {
            w.swap();
        }

        if w.a.max(w.b) <= 1.0 {
            // Both parameters at most one
            if w.a >= 0.2f64.min(w.b) || w.x.powf(w.a) < 0.9 {
                if !w.invert {
                    frac =
                        incomplete_beta_series(w.a, w.b, w.x, 0.0, norm, w.y, deriv.as_deref_mut())?;
                } else {
                    frac = if norm { -1.0 } else { -beta(w.a, w.b)? };
                    w.invert = false;
                    frac = -incomplete_beta_series(
                        w.a,
                        w.b,
                        w.x,
                        frac,
                        norm,
                        w.y,
                        deriv.as_deref_mut(),
                    )?;
                }
            } else {
                w.swap();
                if w.y >= 0.3 {
                    if !w.invert {
                        frac = incomplete_beta_series(
                            w.a,
                            w.b,
                            w.x,
                            0.0,
                            norm,
                            w.y,
                            deriv.as_deref_mut(),
                        )?;
                    } else {
                        frac = if norm { -1.0 } else { -beta(w.a, w.b)? };
                        w.invert = false;
                        frac = -incomplete_beta_series(
                            w.a,
                            w.b,
                            w.x,
                            frac,
                            norm,
                            w.y,
                            deriv.as_deref_mut(),
                        )?;
                    }
                } else {
                    let pfx = if !norm {
                        rising_factorial_ratio(w.a + w.b, w.a, 20)
                    } else {
                        1.0
                    };
                    frac = incomplete_beta_a_step(
                        w.a,
                        w.b,
                        w.x,
                        w.y,
                        20,
                        norm,
                        deriv.as_deref_mut(),
                    )?;
                    if !w.invert {
                        frac = incomplete_beta_small_b_large_a_series(
                            w.a + 20.0,
                            w.b,
                            w.x,
                            w.y,
                            frac,
                            pfx,
                            norm,
                        )?;
                    } else {
                        frac -= if norm { 1.0 } else { beta(w.a, w.b)? };
                        w.invert = false;
                        frac = -incomplete_beta_small_b_large_a_series(
                            w.a + 20.0,
                            w.b,
                            w.x,
                            w.y,
                            frac,
                            pfx,
                            norm,
                        )?;
                    }
                }
            }
        } else if w.b <= 1.0 || (w.x < 0.1 && (w.b * w.x).powf(w.a) <= 0.7) {
            if !w.invert {
                frac = incomplete_beta_series(w.a, w.b, w.x, 0.0, norm, w.y, deriv.as_deref_mut())?;
            } else {
                frac = if norm { -1.0 } else { -beta(w.a, w.b)? };
                w.invert = false;
                frac =
                    -incomplete_beta_series(w.a, w.b, w.x, frac, norm, w.y, deriv.as_deref_mut())?;
            }
        } else {
            w.swap();
            if w.y >= 0.3 {
                if !w.invert {
                    frac =
                        incomplete_beta_series(w.a, w.b, w.x, 0.0, norm, w.y, deriv.as_deref_mut())?;
                } else {
                    frac = if norm { -1.0 } else { -beta(w.a, w.b)? };
                    w.invert = false;
                    frac = -incomplete_beta_series(
                        w.a,
                        w.b,
                        w.x,
                        frac,
                        norm,
                        w.y,
                        deriv.as_deref_mut(),
                    )?;
                }
            } else if w.a >= 15.0 {
                if !w.invert {
                    frac = incomplete_beta_small_b_large_a_series(
                        w.a, w.b, w.x, w.y, 0.0, 1.0, norm,
                    )?;
                } else {
                    frac = if norm { -1.0 } else { -beta(w.a, w.b)? };
                    w.invert = false;
                    frac = -incomplete_beta_small_b_large_a_series(
                        w.a, w.b, w.x, w.y, frac, 1.0, norm,
                    )?;
                }
            } else {
                let pfx = if !norm {
                    rising_factorial_ratio(w.a + w.b, w.a, 20)
                } else {
                    1.0
                };
                frac =
                    incomplete_beta_a_step(w.a, w.b, w.x, w.y, 20, norm, deriv.as_deref_mut())?;
                if !w.invert {
                    frac = incomplete_beta_small_b_large_a_series(
                        w.a + 20.0,
                        w.b,
                        w.x,
                        w.y,
                        frac,
                        pfx,
                        norm,
                    )?;
                } else {
                    frac -= if norm { 1.0 } else { beta(w.a, w.b)? };
                    w.invert = false;
                    frac = -incomplete_beta_small_b_large_a_series(
                        w.a + 20.0,
                        w.b,
                        w.x,
                        w.y,
                        frac,
                        pfx,
                        norm,
                    )?;
                }
            }
        }
    } else {
        // Both parameters above one: centre on the mean and keep the
        // smaller tail.
        let lam = if w.a < w.b {
            w.a - (w.a + w.b) * w.x
        } else {
            (w.a + w.b) * w.y - w.b
        };
        if lam < 0.0 {
            w.swap();
        }

        if w.b < 40.0 {
            if w.a.floor() == w.a && w.b.floor() == w.b && w.a < f64::MAX - 100.0 && w.y != 1.0 {
                // Integer parameters: exact binomial tail sum
                let k = w.a - 1.0;
                let n = w.b + k;
                frac = binomial_ccdf(n, k, w.x, w.y)?;
                if !norm {
                    frac *= beta(w.a, w.b)?;
                }
            } else if w.b * w.x < 0.7 {
                if !w.invert {
                    frac =
                        incomplete_beta_series(w.a, w.b, w.x, 0.0, norm, w.y, deriv.as_deref_mut())?;
                } else {
                    frac = if norm { -1.0 } else { -beta(w.a, w.b)? };
                    w.invert = false;
                    frac = -incomplete_beta_series(
                        w.a,
                        w.b,
                        w.x,
                        frac,
                        norm,
                        w.y,
                        deriv.as_deref_mut(),
                    )?;
                }
            } else if w.a > 15.0 {
                // Peel the integer part of b off by recurrence, then use the
                // asymptotic series with the fractional remainder.
                let mut n = w.b.floor();
                if n == w.b {
                    n -= 1.0;
                }
                let bbar = w.b - n;
                let pfx = if !norm {
                    rising_factorial_ratio(w.a + bbar, bbar, n as u32)
                } else {
                    1.0
                };
                frac = incomplete_beta_a_step(bbar, w.a, w.y, w.x, n as u32, norm, None)?;
                frac = incomplete_beta_small_b_large_a_series(w.a, bbar, w.x, w.y, frac, 1.0, norm)?;
                frac /= pfx;
            } else if norm {
                let mut n = w.b.floor();
                let mut bbar = w.b - n;
                if bbar <= 0.0 {
                    n -= 1.0;
                    bbar += 1.0;
                }
                frac = incomplete_beta_a_step(bbar, w.a, w.y, w.x, n as u32, norm, None)?;
                frac += incomplete_beta_a_step(w.a, bbar, w.x, w.y, 20, norm, None)?;
                if w.invert {
                    frac -= 1.0;
                }
                frac = incomplete_beta_small_b_large_a_series(
                    w.a + 20.0,
                    bbar,
                    w.x,
                    w.y,
                    frac,
                    1.0,
                    norm,
                )?;
                if w.invert {
                    frac = -frac;
                    w.invert = false;
                }
            } else {
                frac = incomplete_beta_fraction(w.a, w.b, w.x, w.y, norm, deriv.as_deref_mut())?;
            }
        } else {
            frac = incomplete_beta_fraction(w.a, w.b, w.x, w.y, norm, deriv.as_deref_mut())?;
        }
    }

    if let Some(d) = deriv {
        if *d < 0.0 {
            *d = incomplete_beta_power_terms(w.a, w.b, w.x, w.y, true, 1.0)?;
        }
        let div = w.y * w.x;
        if *d != 0.0 {
            if f64::MAX * div < *d {
                *d = f64::MAX / 2.0;
            } else {
                *d /= div;
            }
        }
    }
    if w.invert {
        let whole = if norm { 1.0 } else { beta(w.a, w.b)? };
        Ok(whole - frac)
    } else {
        Ok(frac)
    }
}

/// Incomplete beta function with tail and normalisation chosen by
/// `options`: I_x(a,b), 1−I_x(a,b), B_x(a,b), or B(a,b)−B_x(a,b).
///
/// Requires x ∈ [0, 1] and a, b > 0 (a or b may be zero in the normalised
/// forms, where the limit value is well defined).
///
/// # Example
///
/// ```
/// use specfn::{incomplete_beta, IncompleteBetaOptions};
///
/// // I_x(a, b) + (1 - I_x(a, b)) = 1
/// let lo = incomplete_beta(3.2, 1.7, 0.4, IncompleteBetaOptions::default()).unwrap();
/// let hi = incomplete_beta(3.2, 1.7, 0.4, IncompleteBetaOptions { lower: false, normalised: true }).unwrap();
/// assert!((lo + hi - 1.0).abs() < 1e-15);
/// ```
pub fn incomplete_beta(
    a: f64,
    b: f64,
    x: f64,
    options: IncompleteBetaOptions,
) -> Result<f64, SpecialError> {
    incomplete_beta_impl(a, b, x, !options.lower, options.normalised, None)
}

/// Regularized lower incomplete beta I_x(a, b) together with its
/// x-derivative `x^{a−1} y^{b−1} / B(a,b)`.
///
/// The derivative comes for free from the power-term prefix the evaluation
/// computes anyway, which matters to quantile solvers that need both.
pub fn incomplete_beta_with_derivative(
    a: f64,
    b: f64,
    x: f64,
) -> Result<(f64, f64), SpecialError> {
    let mut d = 0.0;
    let v = incomplete_beta_impl(a, b, x, false, true, Some(&mut d))?;
    Ok((v, d))
}

/// ∂I_x(a,b)/∂x = `x^{a−1} (1−x)^{b−1} / B(a,b)`, the beta density.
///
/// At the endpoints the limit is returned where it is finite: 0 when the
/// relevant parameter exceeds 1, 1/B(a,b) when it equals 1, and
/// [`SpecialError::OverflowError`] when the density diverges there.
pub fn incomplete_beta_derivative(a: f64, b: f64, x: f64) -> Result<f64, SpecialError> {
    if !(a > 0.0) || !(b > 0.0) || !(0.0..=1.0).contains(&x) {
        return Err(SpecialError::DomainError);
    }

    if x == 0.0 {
        if a > 1.0 {
            return Ok(0.0);
        }
        if a == 1.0 {
            return Ok(1.0 / beta(a, b)?);
        }
        return Err(SpecialError::OverflowError);
    }
    if x == 1.0 {
        if b > 1.0 {
            return Ok(0.0);
        }
        if b == 1.0 {
            return Ok(1.0 / beta(a, b)?);
        }
        return Err(SpecialError::OverflowError);
    }
    let y = 1.0 - x;
    let z = x * y;
    incomplete_beta_power_terms(a, b, x, y, true, 1.0 / z)
}

/// Regularized lower incomplete beta I_x(a, b).
///
/// # Example
///
/// ```
/// use specfn::betainc;
///
/// // I_x(1, 1) is the identity
/// assert!((betainc(1.0, 1.0, 0.3).unwrap() - 0.3).abs() < 1e-16);
/// ```
pub fn betainc(a: f64, b: f64, x: f64) -> Result<f64, SpecialError> {
    incomplete_beta_impl(a, b, x, false, true, None)
}
