//! Digamma ψ(x) and trigamma ψ′(x).

use crate::numeric::{poly, sin_pi};
use crate::SpecialError;

/// Asymptotic Bernoulli expansion of ψ(x) for x ≥ 20.
fn digamma_large(x: f64) -> f64 {
    const P: [f64; 11] = [
        0.083333333333333333333333333333333333333333333333333,
        -0.0083333333333333333333333333333333333333333333333333,
        0.003968253968253968253968253968253968253968253968254,
        -0.0041666666666666666666666666666666666666666666666667,
        0.0075757575757575757575757575757575757575757575757576,
        -0.021092796092796092796092796092796092796092796092796,
        0.083333333333333333333333333333333333333333333333333,
        -0.44325980392156862745098039215686274509803921568627,
        3.0539543302701197438039543302701197438039543302701,
        -26.456212121212121212121212121212121212121212121212,
        281.4601449275362318840579710144927536231884057971,
    ];
    let x = x - 1.0;
    let mut res = x.ln();
    res += 1.0 / (2.0 * x);
    let z = 1.0 / (x * x);
    res -= z * poly(&P, z);
    res
}

/// Rational approximation of ψ(x) on [1, 2], anchored at the positive root
/// near 1.4616, which is carried in three pieces so the subtraction from x
/// loses no bits.
fn digamma_rational(x: f64) -> f64 {
    const Y: f64 = 0.99558162689208984375;
    const R1: f64 = 1569415565.0 / 1073741824.0;
    const R2: f64 = 381566830.0 / 1073741824.0 / 1073741824.0;
    const R3: f64 = 0.9016312093258695918615325266959189453125e-19;
    const P: [f64; 6] = [
        0.254798510611315515235,
        -0.314628554532916496608,
        -0.665836341559876230295,
        -0.314767657147375752913,
        -0.0541156266153505273939,
        -0.00289268368333918761452,
    ];
    const Q: [f64; 8] = [
        1.0,
        2.1195759927055347547,
        1.54350554664961128724,
        0.486986018231042975162,
        0.0660481487173569812846,
        0.00298999662592323990972,
        -0.165079794012604905639e-5,
        0.317940243105952177571e-7,
    ];
    let mut g = x - R1;
    g -= R2;
    g -= R3;
    let r = poly(&P, x - 1.0) / poly(&Q, x - 1.0);
    g * Y + g * r
}

/// Digamma function ψ(x) = Γ′(x)/Γ(x).
///
/// Arguments at or left of −1 reflect through π·cot(πx); everything below
/// 20 is shifted into [1, 2] by the recurrence ψ(x+1) = ψ(x) + 1/x and
/// finished by a rational approximation. Fails with
/// [`SpecialError::DomainError`] at the poles (0, −1, −2, …).
///
/// # Example
///
/// ```
/// use specfn::digamma;
///
/// // ψ(1) = −γ
/// let euler = 0.57721566490153286061;
/// assert!((digamma(1.0).unwrap() + euler).abs() < 1e-15);
/// ```
pub fn digamma(x: f64) -> Result<f64, SpecialError> {
    if x.is_nan() {
        return Err(SpecialError::DomainError);
    }
    let mut x = x;
    let mut res = 0.0;

    if x <= -1.0 {
        x = 1.0 - x;
        let mut rem = x - x.floor();
        if rem > 0.5 {
            rem -= 1.0;
        }
        if rem == 0.0 {
            return Err(SpecialError::DomainError);
        }
        res = core::f64::consts::PI / (core::f64::consts::PI * rem).tan();
    }
    if x == 0.0 {
        return Err(SpecialError::DomainError);
    }
    if x >= 20.0 {
        res += digamma_large(x);
    } else {
        while x > 2.0 {
            x -= 1.0;
            res += 1.0 / x;
        }
        while x < 1.0 {
            res -= 1.0 / x;
            x += 1.0;
        }
        res += digamma_rational(x);
    }
    Ok(res)
}

/// Rational approximations of ψ′(x) on (0, 2], (2, 8], and (8, ∞).
fn trigamma_rational(x: f64) -> f64 {
    const OFFSET_1_2: f64 = 2.109325408935546875;
    const P_1_2: [f64; 7] = [
        -1.10932535608960258341,
        -4.18793841543017129052,
        -4.63865531898487734531,
        -0.919832884430500908047,
        1.68074038333180423012,
        1.21172611429185622377,
        0.259635673503366427284,
    ];
    const Q_1_2: [f64; 7] = [
        1.0,
        3.77521119359546982995,
        5.664338024578956321,
        4.25995134879278028361,
        1.62956638448940402182,
        0.259635512844691089868,
        0.629642219810618032207e-8,
    ];
    const P_2_8: [f64; 8] = [
        -0.387540035162952880976e-11,
        0.500000000276430504,
        3.21926880986360957306,
        10.2550347708483445775,
        18.9002075150709144043,
        21.0357215832399705625,
        13.4346512182925923978,
        3.98656291026448279118,
    ];
    const Q_2_8: [f64; 8] = [
        1.0,
        6.10520430478613667724,
        18.475001060603645512,
        31.7087534567758405638,
        31.908814523890465398,
        17.4175479039227084798,
        3.98749106958394941276,
        -0.000115917322224411128566,
    ];
    const P_8_INF: [f64; 6] = [
        -0.263527875092466899848e-19,
        0.500000000000000058145,
        0.0730121433777364138677,
        1.94505878379957149534,
        0.0517092358874932620529,
        1.07995383547483921121,
    ];
    const Q_8_INF: [f64; 7] = [
        1.0,
        -0.187309046577818095504,
        3.95255391645238842975,
        -1.14743283327078949087,
        2.52989799376344914499,
        -0.627414303172402506396,
        0.141554248216425512536,
    ];

    if x <= 2.0 {
        (OFFSET_1_2 + poly(&P_1_2, x) / poly(&Q_1_2, x)) / (x * x)
    } else if x <= 8.0 {
        let y = 1.0 / x;
        (1.0 + poly(&P_2_8, y) / poly(&Q_2_8, y)) / x
    } else {
        let y = 1.0 / x;
        (1.0 + poly(&P_8_INF, y) / poly(&Q_8_INF, y)) / x
    }
}

/// Trigamma function ψ′(x) = d²/dx² ln Γ(x).
///
/// Non-positive arguments reflect through π²/sin²(πx). Fails with
/// [`SpecialError::DomainError`] at the poles.
///
/// # Example
///
/// ```
/// use specfn::trigamma;
///
/// // ψ′(1) = π²/6
/// let target = core::f64::consts::PI.powi(2) / 6.0;
/// assert!((trigamma(1.0).unwrap() - target).abs() < 1e-14);
/// ```
pub fn trigamma(x: f64) -> Result<f64, SpecialError> {
    if x.is_nan() {
        return Err(SpecialError::DomainError);
    }
    if x <= 0.0 {
        if x.floor() == x {
            return Err(SpecialError::DomainError);
        }
        let z = 1.0 - x;
        let s = if x.abs() < z.abs() { sin_pi(x) } else { sin_pi(z) };
        let pi_sq = core::f64::consts::PI * core::f64::consts::PI;
        return Ok(-trigamma(z)? + pi_sq / (s * s));
    }
    let mut x = x;
    let mut res = 0.0;
    if x < 1.0 {
        res = 1.0 / (x * x);
        x += 1.0;
    }
    Ok(res + trigamma_rational(x))
}
