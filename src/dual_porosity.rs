//! Double-porosity reservoir with transient interporosity flow from
//! slab-shaped matrix blocks, infinite-acting, with wellbore storage and
//! skin.
//!
//! Reference: Bourdet & Gringarten, Determination of Fissured Volume and
//! Block Size in Fractured Reservoirs by Type-Curve Analysis, SPE 9293,
//! 1980.

use ndarray::{Array1, ArrayView1};

use crate::error::{ensure_finite, WellTestError};
use crate::parameters::{DimensionlessGroups, ModelParameters};
use crate::special::{k0, k1};
use crate::{stehfest, storage};

/// Transient interporosity flow function for slab matrix blocks.
///
/// $$f(u_D) = \omega + \sqrt{\frac{\lambda_s (1-\omega)}{3 u_D}}
/// \tanh\sqrt{\frac{3 u_D (1-\omega)}{\lambda_s}}$$
///
/// Total for `ud > 0`, `omega` in (0, 1), `lambda_s > 0`. Tends to `omega`
/// at late Laplace times (`ud` large) and to 1 at early ones, so the
/// fracture system sees the full storativity early and only its own share
/// late. The value multiplies the Laplace variable in the governing
/// equation; it is not itself a pressure.
pub fn ftsl(ud: f64, omega: f64, lambda_s: f64) -> f64 {
    omega
        + (lambda_s * (1.0 - omega) / (3.0 * ud)).sqrt()
            * (3.0 * ud * (1.0 - omega) / lambda_s).sqrt().tanh()
}

/// Laplace-space pressure drop at the well.
///
/// The interporosity transfer folds into the Bessel argument of the
/// infinite-acting radial solution; storage and skin enter through the
/// shared convolution denominator and the effective wellbore radius.
pub fn dpwf_bar(p: &ModelParameters, u: f64) -> Result<f64, WellTestError> {
    let g = DimensionlessGroups::new(p);
    let aux0 = u * g.b;
    let fu = ftsl(aux0, p.omega, p.lambda_s);
    let arg = (aux0 * fu).sqrt();
    let alpha = k0(arg) / (aux0 * arg * k1(arg));
    let denom = 1.0 + aux0 * aux0 * g.cd * alpha;
    ensure_finite(g.a * g.b * alpha / denom, u)
}

/// `d(pwf_bar)/dC`, through the storage convolution identity.
pub fn dpwf_dc_bar(p: &ModelParameters, u: f64) -> Result<f64, WellTestError> {
    storage::dc_bar(dpwf_bar, p, u)
}

/// Pressure drop at the well in physical space; `t = 0` is 0 by convention.
pub fn dpwf(p: &ModelParameters, t: f64) -> Result<f64, WellTestError> {
    p.validate()?;
    stehfest::time_domain(|u| dpwf_bar(p, u), &p.v, t)
}

/// Storage sensitivity in physical space.
pub fn dpwf_dc(p: &ModelParameters, t: f64) -> Result<f64, WellTestError> {
    p.validate()?;
    stehfest::time_domain(|u| dpwf_dc_bar(p, u), &p.v, t)
}

/// Pressure-drop curve over a time array, for building residuals.
pub fn dpwf_curve(
    p: &ModelParameters,
    time: ArrayView1<'_, f64>,
) -> Result<Array1<f64>, WellTestError> {
    p.validate()?;
    let values = time
        .iter()
        .map(|&t| stehfest::time_domain(|u| dpwf_bar(p, u), &p.v, t))
        .collect::<Result<Vec<f64>, _>>()?;
    Ok(Array1::from(values))
}
