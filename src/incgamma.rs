//! Incomplete gamma functions P(a,x) and Q(a,x), normalised and not.
//!
//! Evaluation picks one of eight methods based on where (a, x) falls:
//! finite sums for small integer and half-integer a, power series around
//! x = 0, a continued fraction for x well above a, a Temme uniform
//! asymptotic expansion in the large-a transition region, and dedicated
//! tiny-x and huge-x series. The complement is computed wherever it
//! converges faster and un-inverted at the end.

use crate::erf_fn::erfc;
use crate::gamma_fn::{
    gamma, gamma1pm1, lgamma, scaled_gamma, EPS, MAX_ITER, MIN_REC, ROOT_EPS, ROOT_PI,
    ROOT_TWO_PI,
};
use crate::numeric::{cont_frac_a, log1pmx, poly, powm1, sum_series, LOG_MAX, LOG_MIN};
use crate::tables::{FACTORIALS, MAX_FACTORIAL};
use crate::SpecialError;

/// Tail and normalisation selectors for [`incomplete_gamma`].
///
/// Defaults to the regularized lower function P(a, x).
#[derive(Debug, Clone, Copy)]
pub struct IncompleteGammaOptions {
    /// Lower tail γ(a,x) when true, upper tail Γ(a,x) when false.
    pub lower: bool,
    /// Divide by Γ(a) when true.
    pub normalised: bool,
}

impl Default for IncompleteGammaOptions {
    fn default() -> Self {
        Self {
            lower: true,
            normalised: true,
        }
    }
}

/// Continued fraction for Q(a,z)·Γ(a)·z^{−a}e^z: the Legendre fraction
/// with terms k(a−k) / (z − a + 1 + 2k).
fn upper_gamma_fraction(a: f64, z: f64) -> f64 {
    let mut zk = z - a + 1.0;
    let mut k = 0.0;
    let frac = cont_frac_a(
        move || {
            k += 1.0;
            zk += 2.0;
            (k * (a - k), zk)
        },
        EPS,
        40,
    );
    1.0 / (z - a + 1.0 + frac)
}

/// Series for γ(a,z)·a·z^{−a}e^z: terms ∏ z/(a+k).
fn lower_gamma_series(a: f64, z: f64, init: f64) -> f64 {
    let mut ak = a;
    let mut res = 1.0;
    sum_series(
        move || {
            let r = res;
            ak += 1.0;
            res *= z / ak;
            r
        },
        EPS,
        MAX_ITER,
        init,
    )
}

/// Q(a,x) for small positive integer a: the closed finite sum
/// e^{−x} Σ x^n/n!.
fn finite_gamma_q(a: f64, x: f64, deriv: Option<&mut f64>) -> f64 {
    let e = (-x).exp();
    let mut sum = e;
    if sum != 0.0 {
        let mut t = sum;
        let mut n = 1.0;
        while n < a {
            t /= n;
            t *= x;
            sum += t;
            n += 1.0;
        }
    }
    if let Some(d) = deriv {
        *d = (e * x.powf(a)) / FACTORIALS[(a - 1.0) as usize];
    }
    sum
}

/// Q(a,x) for small half-integer a: erfc(√x) plus a finite correction sum.
fn finite_half_gamma_q(a: f64, x: f64, deriv: Option<&mut f64>) -> f64 {
    let mut e = erfc(x.sqrt());
    if e != 0.0 && a > 1.0 {
        let mut t = (-x).exp() / (core::f64::consts::PI * x).sqrt();
        t *= x;
        t /= 0.5;
        let mut sum = t;
        let mut n = 2.0;
        while n < a {
            t /= n - 0.5;
            t *= x;
            sum += t;
            n += 1.0;
        }
        e += sum;
        if let Some(d) = deriv {
            *d = 0.0;
        }
    } else if let Some(d) = deriv {
        *d = (x.sqrt() * (-x).exp()) / ROOT_PI;
    }
    e
}

/// Asymptotic series for Q(a,x)·x^{1−a}e^x·Γ(a)⁻¹-free tail at very large x:
/// terms ∏ (a−k)/x.
fn incomplete_gamma_large(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut t = 1.0;
    sum_series(
        move || {
            let res = t;
            ap -= 1.0;
            t *= ap / x;
            res
        },
        1e-25,
        1000,
        0.0,
    )
}

/// `z^a e^{−z} / Γ(a)` without overflow, shifting small a above the
/// Stirling threshold by recurrence when needed.
pub(crate) fn regularised_gamma_prefix(a: f64, z: f64) -> Result<f64, SpecialError> {
    if a < 1.0 && z < 1.0 {
        Ok((z.powf(a) * (-z).exp()) / gamma(a)?)
    } else if a > MIN_REC {
        let scaled = scaled_gamma(a, false)?;
        let pow_term = (z / a).powf(a / 2.0);
        let amz = a - z;
        if pow_term == 0.0 || amz.abs() > LOG_MAX {
            return Ok((a * (z / a).ln() + amz - scaled.ln()).exp());
        }
        Ok(pow_term * amz.exp() * (pow_term / scaled))
    } else {
        let shift = 1 + (MIN_REC - a).trunc() as i32;
        let mut res = regularised_gamma_prefix(a + shift as f64, z)?;
        if res != 0.0 {
            for i in 0..shift {
                res /= z;
                res *= a + i as f64;
            }
            Ok(res)
        } else {
            let a_shift = a + shift as f64;
            let scaled = scaled_gamma(a_shift, false)?;
            let pow_term1 = (z / a_shift).powf(a);
            let pow_term2 = a_shift.powf(-(shift as f64));
            let pow_term3 = (a_shift - z).exp();
            if pow_term1 == 0.0
                || pow_term2 == 0.0
                || pow_term3 == 0.0
                || (a_shift - z).abs() > LOG_MAX
            {
                return Ok((a * z.ln() - z - lgamma(a)?).exp());
            }
            res = (pow_term1 * pow_term2 * pow_term3) / scaled;
            for i in 0..shift {
                res *= a + i as f64;
            }
            Ok(res)
        }
    }
}

/// `z^a e^{−z}` with the factors rearranged to dodge premature
/// overflow/underflow.
pub(crate) fn full_gamma_prefix(a: f64, z: f64) -> f64 {
    let alz = a * z.ln();
    if z >= 1.0 {
        if alz < LOG_MAX && -z > LOG_MIN {
            z.powf(a) * (-z).exp()
        } else if a >= 1.0 {
            (z / (z / a).exp()).powf(a)
        } else {
            (alz - z).exp()
        }
    } else if alz > LOG_MIN {
        z.powf(a) * (-z).exp()
    } else if z / a < LOG_MAX {
        (z / (z / a).exp()).powf(a)
    } else {
        (alz - z).exp()
    }
}

/// Series form of Γ(a) − γ(a,x) for small a and x, built on `gamma1pm1`
/// and `powm1` so both factors keep precision near zero. Returns the
/// (possibly sign-folded) upper part together with Γ(a).
fn gamma_small_upper_part(
    a: f64,
    x: f64,
    invert: bool,
    deriv: Option<&mut f64>,
) -> Result<(f64, f64), SpecialError> {
    let mut res = gamma1pm1(a)?;
    let gam = (res + 1.0) / a;
    let mut p = powm1(x, a)?;
    res -= p;
    res /= a;
    p += 1.0;
    if let Some(d) = deriv {
        *d = p / (gam * x.exp());
    }
    let init = if invert { gam } else { 0.0 };
    let init = (init - res) / p;

    let mut k = 0.0;
    let mut part = 1.0;
    let series = move || {
        k += 1.0;
        part *= -x;
        part /= k;
        part / (a + k)
    };
    res = -p * sum_series(series, EPS, MAX_ITER - 10, init);
    if invert {
        res = -res;
    }
    Ok((res, gam))
}

/// Temme's uniform asymptotic expansion coefficient polynomials C₀..C₁₂,
/// each evaluated at z = ±√(2φ) and then combined as a polynomial in 1/a.
const TEMME_COEFFS: [&[f64]; 13] = [
    &[
        -0.333333333333333333333,
        0.0833333333333333333333,
        -0.0148148148148148148148,
        0.00115740740740740740741,
        0.000352733686067019400353,
        -0.0001787551440329218107,
        0.39192631785224377817e-4,
        -0.218544851067999216147e-5,
        -0.18540622107151599607e-5,
        0.829671134095308600502e-6,
        -0.176659527368260793044e-6,
        0.670785354340149858037e-8,
        0.102618097842403080426e-7,
        -0.438203601845335318655e-8,
        0.914769958223679023418e-9,
        -0.255141939949462497669e-10,
        -0.583077213255042506746e-10,
        0.243619480206674162437e-10,
        -0.502766928011417558909e-11,
    ],
    &[
        -0.00185185185185185185185,
        -0.00347222222222222222222,
        0.00264550264550264550265,
        -0.000990226337448559670782,
        0.000205761316872427983539,
        -0.40187757201646090535e-6,
        -0.18098550334489977837e-4,
        0.764916091608111008464e-5,
        -0.161209008945634460038e-5,
        0.464712780280743434226e-8,
        0.137863344691572095931e-6,
        -0.575254560351770496402e-7,
        0.119516285997781473243e-7,
        -0.175432417197476476238e-10,
        -0.100915437106004126275e-8,
        0.416279299184258263623e-9,
        -0.856390702649298063807e-10,
    ],
    &[
        0.00413359788359788359788,
        -0.00268132716049382716049,
        0.000771604938271604938272,
        0.200938786008230452675e-5,
        -0.000107366532263651605215,
        0.529234488291201254164e-4,
        -0.127606351886187277134e-4,
        0.342357873409613807419e-7,
        0.137219573090629332056e-5,
        -0.629899213838005502291e-6,
        0.142806142060642417916e-6,
        -0.204770984219908660149e-9,
        -0.140925299108675210533e-7,
        0.622897408492202203356e-8,
        -0.136704883966171134993e-8,
    ],
    &[
        0.000649434156378600823045,
        0.000229472093621399176955,
        -0.000469189494395255712128,
        0.000267720632062838852962,
        -0.756180167188397641073e-4,
        -0.239650511386729665193e-6,
        0.110826541153473023615e-4,
        -0.56749528269915965675e-5,
        0.142309007324358839146e-5,
        -0.278610802915281422406e-10,
        -0.169584040919302772899e-6,
        0.809946490538808236335e-7,
        -0.191111684859736540607e-7,
    ],
    &[
        -0.000861888290916711698605,
        0.000784039221720066627474,
        -0.000299072480303190179733,
        -0.146384525788434181781e-5,
        0.664149821546512218666e-4,
        -0.396836504717943466443e-4,
        0.113757269706784190981e-4,
        0.250749722623753280165e-9,
        -0.169541495365583060147e-5,
        0.890750753220530968883e-6,
        -0.229293483400080487057e-6,
    ],
    &[
        -0.000336798553366358150309,
        -0.697281375836585777429e-4,
        0.000277275324495939207873,
        -0.000199325705161888477003,
        0.679778047793720783882e-4,
        0.141906292064396701483e-6,
        -0.135940481897686932785e-4,
        0.801847025633420153972e-5,
        -0.229148117650809517038e-5,
    ],
    &[
        0.000531307936463992223166,
        -0.000592166437353693882865,
        0.000270878209671804482771,
        0.790235323266032787212e-6,
        -0.815396936756196875093e-4,
        0.561168275310624965004e-4,
        -0.183291165828433755673e-4,
        -0.307961345060330478256e-8,
        0.346515536880360908674e-5,
        -0.20291327396058603727e-5,
        0.57887928631490037089e-6,
    ],
    &[
        0.000344367606892377671254,
        0.517179090826059219337e-4,
        -0.000334931610811422363117,
        0.000281269515476323702274,
        -0.000109765822446847310235,
        -0.127410090954844853795e-6,
        0.277444515115636441571e-4,
        -0.182634888057113326614e-4,
        0.578769494973505239894e-5,
    ],
    &[
        -0.000652623918595309418922,
        0.000839498720672087279993,
        -0.000438297098541721005061,
        -0.696909145842055197137e-6,
        0.000166448466420675478374,
        -0.000127835176797692185853,
        0.462995326369130429061e-4,
    ],
    &[
        -0.000596761290192746250124,
        -0.720489541602001055909e-4,
        0.000678230883766732836162,
        -0.0006401475260262758451,
        0.000277501076343287044992,
    ],
    &[
        0.00133244544948006563713,
        -0.0019144384985654775265,
        0.00110893691345966373396,
    ],
    &[
        0.00157972766073083495909,
        0.000162516262783915816899,
        -0.00206334210355432762645,
        0.00213896861856890981541,
        -0.00101085593912630031708,
    ],
    &[
        -0.00407251211951401664727,
        0.00640336283380806979482,
        -0.00404101610816766177474,
    ],
];

/// Temme's uniform expansion of Q(a,x) about the transition x ≈ a:
/// erfc(√(aφ))/2 plus a two-variable polynomial correction in
/// (±√(2φ), 1/a).
fn incomplete_gamma_temme_large(a: f64, x: f64) -> Result<f64, SpecialError> {
    let sigma = (x - a) / a;
    let phi = -log1pmx(sigma)?;
    let y = a * phi;
    let mut z = (2.0 * phi).sqrt();
    if x < a {
        z = -z;
    }

    let mut workspace = [0.0; 13];
    for (w, c) in workspace.iter_mut().zip(TEMME_COEFFS.iter()) {
        *w = poly(c, z);
    }

    let mut res = poly(&workspace, 1.0 / a);
    res *= (-y).exp() / (core::f64::consts::TAU * a).sqrt();
    if x < a {
        res = -res;
    }
    res += erfc(y.sqrt()) / 2.0;
    Ok(res)
}

fn gamma_incomplete_impl(
    a: f64,
    x: f64,
    norm: bool,
    invert: bool,
    mut deriv: Option<&mut f64>,
) -> Result<f64, SpecialError> {
    if !(a > 0.0) || !(x >= 0.0) {
        return Err(SpecialError::DomainError);
    }

    let mut inv = invert;
    let mut res;

    // Unnormalised with a past the factorial table: work in log space and
    // only exponentiate the final answer.
    if a >= MAX_FACTORIAL as f64 && !norm {
        if inv && 4.0 * a < x {
            res = a * x.ln() - x;
            if let Some(d) = deriv.as_deref_mut() {
                *d = res.exp();
            }
            res += upper_gamma_fraction(a, x).ln();
        } else if !inv && a > 4.0 * x {
            res = a * x.ln() - x;
            if let Some(d) = deriv.as_deref_mut() {
                *d = res.exp();
            }
            res += (lower_gamma_series(a, x, 0.0) / a).ln();
        } else {
            res = gamma_incomplete_impl(a, x, true, inv, deriv.as_deref_mut())?;
            if res == 0.0 {
                if inv {
                    // Regularised value underflowed upward: Q ≈ 1, so Γ(a,x) ≈ Γ(a)
                    res = 1.0 + 1.0 / (12.0 * a) + 1.0 / (288.0 * a * a);
                    res = res.ln() - a + (a - 0.5) * a.ln() + ROOT_TWO_PI.ln();
                    if let Some(d) = deriv.as_deref_mut() {
                        *d = (a * x.ln() - x).exp();
                    }
                } else {
                    res = a * x.ln() - x;
                    if let Some(d) = deriv.as_deref_mut() {
                        *d = res.exp();
                    }
                    res += (lower_gamma_series(a, x, 0.0) / a).ln();
                }
            } else {
                res = res.ln() + lgamma(a)?;
            }
        }
        if res > LOG_MAX {
            return Err(SpecialError::OverflowError);
        }
        return Ok(res.exp());
    }

    let mut is_int = false;
    let mut is_half_int = false;
    let is_small_a = a < 30.0 && a <= x + 1.0 && x < LOG_MAX;
    if is_small_a {
        let fa = a.floor();
        is_int = fa == a;
        is_half_int = !is_int && (fa - a).abs() == 0.5;
    }

    let eval_method: u8;
    if is_int && x > 0.6 {
        inv = !inv;
        eval_method = 0;
    } else if is_half_int && x > 0.2 {
        inv = !inv;
        eval_method = 1;
    } else if x < ROOT_EPS && a > 1.0 {
        eval_method = 6;
    } else if x > 1000.0 && (a < x || (a - 50.0).abs() / x < 1.0) {
        inv = !inv;
        eval_method = 7;
    } else if x < 0.5 {
        eval_method = if -0.4 / x.ln() < a { 2 } else { 3 };
    } else if x < 1.1 {
        eval_method = if x * 0.75 < a { 2 } else { 3 };
    } else {
        let mut use_temme = false;
        if norm && a > 20.0 {
            let sigma = ((x - a) / a).abs();
            if a > 200.0 {
                if 20.0 / a > sigma * sigma {
                    use_temme = true;
                }
            } else if sigma < 0.4 {
                use_temme = true;
            }
        }
        if use_temme {
            eval_method = 5;
        } else if x - 1.0 / (3.0 * x) < a {
            eval_method = 2;
        } else {
            inv = !inv;
            eval_method = 4;
        }
    }

    match eval_method {
        // Finite sum for integer a
        0 => {
            res = finite_gamma_q(a, x, deriv.as_deref_mut());
            if !norm {
                res *= gamma(a)?;
            }
        }
        // erfc plus finite sum for half-integer a
        1 => {
            res = finite_half_gamma_q(a, x, deriv.as_deref_mut());
            if !norm {
                res *= gamma(a)?;
            }
            if let Some(d) = deriv.as_deref_mut() {
                if *d == 0.0 {
                    *d = regularised_gamma_prefix(a, x)?;
                }
            }
        }
        // Lower series, possibly with the complement folded into init
        2 => {
            res = if norm {
                regularised_gamma_prefix(a, x)?
            } else {
                full_gamma_prefix(a, x)
            };
            if let Some(d) = deriv.as_deref_mut() {
                *d = res;
            }
            if res != 0.0 {
                let mut init = 0.0;
                let mut opt_inv = false;
                if inv {
                    init = if norm { 1.0 } else { gamma(a)? };
                    if norm || res >= 1.0 || f64::MAX * res > init {
                        init /= res;
                        if norm || a < 1.0 || f64::MAX / a > init {
                            init *= -a;
                            opt_inv = true;
                        } else {
                            init = 0.0;
                        }
                    }
                }
                res *= lower_gamma_series(a, x, init) / a;
                if opt_inv {
                    inv = false;
                    res = -res;
                }
            }
        }
        // Small-a upper-part series
        3 => {
            inv = !inv;
            let (v, gam) = gamma_small_upper_part(a, x, inv, deriv.as_deref_mut())?;
            inv = false;
            res = v;
            if norm {
                res /= gam;
            }
        }
        // Continued fraction for the upper tail
        4 => {
            res = if norm {
                regularised_gamma_prefix(a, x)?
            } else {
                full_gamma_prefix(a, x)
            };
            if let Some(d) = deriv.as_deref_mut() {
                *d = res;
            }
            if res != 0.0 {
                res *= upper_gamma_fraction(a, x);
            }
        }
        // Temme uniform asymptotic, large a near the transition
        5 => {
            res = incomplete_gamma_temme_large(a, x)?;
            if x >= a {
                inv = !inv;
            }
            if let Some(d) = deriv.as_deref_mut() {
                *d = regularised_gamma_prefix(a, x)?;
            }
        }
        // Two-term series for x below root epsilon
        6 => {
            res = if !norm {
                x.powf(a) / a
            } else {
                x.powf(a) / gamma(a + 1.0)?
            };
            res *= 1.0 - (a * x) / (a + 1.0);
            if let Some(d) = deriv.as_deref_mut() {
                *d = regularised_gamma_prefix(a, x)?;
            }
        }
        // Asymptotic series for very large x
        _ => {
            res = if norm {
                regularised_gamma_prefix(a, x)?
            } else {
                full_gamma_prefix(a, x)
            };
            if let Some(d) = deriv.as_deref_mut() {
                *d = res;
            }
            res /= x;
            if res != 0.0 {
                res *= incomplete_gamma_large(a, x);
            }
        }
    }

    if norm && res > 1.0 {
        res = 1.0;
    }
    if inv {
        let gam = if norm { 1.0 } else { gamma(a)? };
        res = gam - res;
    }
    if let Some(d) = deriv {
        if x < 1.0 && f64::MAX * x < *d {
            *d = f64::MAX / 2.0;
        }
        *d /= x;
    }
    Ok(res)
}

/// Incomplete gamma function with tail and normalisation chosen by
/// `options`: P(a,x), Q(a,x), γ(a,x), or Γ(a,x).
///
/// Requires a > 0 and x ≥ 0. Fails with [`SpecialError::OverflowError`]
/// only on the unnormalised forms when the result itself overflows.
///
/// # Example
///
/// ```
/// use specfn::{incomplete_gamma, IncompleteGammaOptions};
///
/// // P(1, 1) = 1 - 1/e
/// let p = incomplete_gamma(1.0, 1.0, IncompleteGammaOptions::default()).unwrap();
/// assert!((p - 0.63212055882855767).abs() < 1e-15);
/// ```
pub fn incomplete_gamma(
    a: f64,
    x: f64,
    options: IncompleteGammaOptions,
) -> Result<f64, SpecialError> {
    gamma_incomplete_impl(a, x, options.normalised, !options.lower, None)
}

/// Regularized lower incomplete gamma P(a, x) together with its
/// x-derivative `x^{a−1} e^{−x} / Γ(a)`.
///
/// The derivative falls out of the prefix the evaluation computes anyway,
/// which matters to quantile solvers that need both.
pub fn incomplete_gamma_with_derivative(a: f64, x: f64) -> Result<(f64, f64), SpecialError> {
    if !(x > 0.0) {
        return Err(SpecialError::DomainError);
    }
    let mut d = 0.0;
    let v = gamma_incomplete_impl(a, x, true, false, Some(&mut d))?;
    Ok((v, d))
}

/// ∂P(a,x)/∂x = x^{a−1} e^{−x} / Γ(a), the gamma density in x.
///
/// Requires a > 0 and x > 0.
pub fn incomplete_gamma_derivative(a: f64, x: f64) -> Result<f64, SpecialError> {
    if !(a > 0.0) || !(x > 0.0) {
        return Err(SpecialError::DomainError);
    }
    let mut d = regularised_gamma_prefix(a, x)?;
    if x < 1.0 && f64::MAX * x < d {
        return Err(SpecialError::OverflowError);
    }
    d /= x;
    Ok(d)
}

/// Regularized lower incomplete gamma P(a, x).
///
/// # Example
///
/// ```
/// use specfn::gamma_inc;
///
/// // P(a, x) + Q(a, x) = 1
/// let p = gamma_inc(2.5, 1.3).unwrap();
/// let q = specfn::gamma_inc_upper(2.5, 1.3).unwrap();
/// assert!((p + q - 1.0).abs() < 1e-15);
/// ```
pub fn gamma_inc(a: f64, x: f64) -> Result<f64, SpecialError> {
    gamma_incomplete_impl(a, x, true, false, None)
}

/// Regularized upper incomplete gamma Q(a, x) = 1 − P(a, x).
pub fn gamma_inc_upper(a: f64, x: f64) -> Result<f64, SpecialError> {
    gamma_incomplete_impl(a, x, true, true, None)
}
