//! Numerical inversion of Laplace transforms by Stehfest's algorithm.
//!
//! The inverse at time `t` is approximated by a fixed quadrature,
//!
//! $$f(t) \approx \frac{\ln 2}{t} \sum_{i=1}^{n} V_i \, F\!\left(\frac{i \ln 2}{t}\right)$$
//!
//! with weights $V_i$ that depend only on the (even) order `n` and are
//! precomputed once per order. The weights alternate in sign and grow
//! quickly with `n`, so the sum is ill-conditioned at large orders: in
//! double precision accuracy improves up to a model-dependent order
//! (typically 8 to 16) and degrades beyond it.
//!
//! Reference: H. Stehfest, Algorithm 368: Numerical Inversion of Laplace
//! Transforms, Communications of the ACM 13(1), 1970.

use ndarray::Array1;
use std::f64::consts::LN_2;

use crate::error::WellTestError;

/// Largest accepted inversion order.
pub const MAX_ORDER: usize = 32;

pub(crate) fn check_order(n: usize) -> Result<(), WellTestError> {
    if n % 2 != 0 {
        return Err(WellTestError::StehfestOrder {
            n,
            reason: "order must be even",
        });
    }
    if n < 2 || n > MAX_ORDER {
        return Err(WellTestError::StehfestOrder {
            n,
            reason: "order must be between 2 and 32",
        });
    }
    Ok(())
}

// Exact in f64 for every factorial reachable with MAX_ORDER = 32.
fn factorial(m: usize) -> f64 {
    (1..=m).fold(1.0, |acc, i| acc * i as f64)
}

/// Stehfest weights for an even order `n`.
///
/// The weights depend only on `n`: compute them once and reuse them across
/// every inversion at that order.
pub fn weights(n: usize) -> Result<Array1<f64>, WellTestError> {
    check_order(n)?;
    let half = n / 2;
    let mut v = Array1::zeros(n);
    for i in 1..=n {
        let mut sum = 0.0;
        for k in (i + 1) / 2..=i.min(half) {
            sum += (k as f64).powi(half as i32) * factorial(2 * k)
                / (factorial(half - k)
                    * factorial(k)
                    * factorial(k - 1)
                    * factorial(i - k)
                    * factorial(2 * k - i));
        }
        v[i - 1] = if (half + i) % 2 == 0 { sum } else { -sum };
    }
    Ok(v)
}

/// Invert a Laplace-space function at time `t > 0`.
///
/// `f` is a closure capturing the concrete model parameters; it receives
/// the Laplace variable and may fail, in which case the whole inversion
/// fails. A non-finite term or partial sum is reported as an instability
/// rather than folded into a plausible-looking finite result. The terms are
/// summed in fixed ascending order so results are bitwise reproducible.
pub fn invert<F>(mut f: F, v: &Array1<f64>, t: f64) -> Result<f64, WellTestError>
where
    F: FnMut(f64) -> Result<f64, WellTestError>,
{
    check_order(v.len())?;
    if !t.is_finite() || t <= 0.0 {
        return Err(WellTestError::NonPhysicalParameter { name: "t", value: t });
    }
    let ln2_t = LN_2 / t;
    let mut sum = 0.0;
    for (i, vi) in v.iter().enumerate() {
        let u = (i + 1) as f64 * ln2_t;
        sum += vi * f(u)?;
        if !sum.is_finite() {
            log::warn!(
                "Stehfest sum lost significance at t = {t} (node {} of {})",
                i + 1,
                v.len()
            );
            return Err(WellTestError::InversionDiverged { t });
        }
    }
    Ok(ln2_t * sum)
}

/// Physical-space evaluation with the `t = 0 -> 0` convention shared by
/// every pressure-drop wrapper: no inversion is performed at the origin.
pub(crate) fn time_domain<F>(f: F, v: &Array1<f64>, t: f64) -> Result<f64, WellTestError>
where
    F: FnMut(f64) -> Result<f64, WellTestError>,
{
    if t == 0.0 {
        return Ok(0.0);
    }
    invert(f, v, t)
}
