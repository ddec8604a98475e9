//! Homogeneous circular reservoir with a no-flow outer boundary, wellbore
//! storage and skin, produced at constant rate.
//!
//! Laplace-space solution after Van Everdingen & Hurst (SPE-949305-G,
//! 1949), with the skin folded into an effective wellbore radius
//! `rws = rw e^{-S}`. Alongside the pressure drop, this module provides the
//! exact closed-form sensitivities to the estimated parameters (storage
//! coefficient, skin, external radius, permeability) that the fitting
//! application assembles into its Jacobian.
//!
//! The sensitivities are expressed over the same dimensionless groups and
//! Laplace-space terms as the base response, computed in one shared place,
//! so they stay algebraically exact with respect to the response they
//! differentiate. Each one satisfies
//!
//! $$\frac{\partial \bar{p}_{wf}}{\partial \theta} \approx
//! \frac{\bar{p}_{wf}(\theta + h) - \bar{p}_{wf}(\theta - h)}{2h}$$
//!
//! to finite-difference accuracy, which the tests assert in both Laplace
//! and physical space.

use ndarray::{Array1, ArrayView1};

use crate::error::{ensure_finite, WellTestError};
use crate::parameters::{DimensionlessGroups, ModelParameters};
use crate::special::{i0, i1, k0, k1};
use crate::{stehfest, storage};

/// Laplace-space terms shared by the base response and its sensitivities.
struct BoundaryTerms {
    /// `u b`, the dimensionless Laplace variable.
    aux0: f64,
    /// `(I1(aux2) K1(aux1) - I1(aux1) K1(aux2))^2`, the boundary-reflection
    /// Wronskian entering the `re` and `k` sensitivities.
    aux3: f64,
    numer: f64,
    denom: f64,
}

/// Evaluate the infinite-acting, storage and boundary-reflection terms at
/// one Laplace node.
///
/// When the outer boundary degenerates onto the effective wellbore radius
/// the reflection ratio `gamma` reaches 1 and `numer` becomes 0/0; that is
/// surfaced as a domain failure here rather than aborting or leaking NaN
/// into the quadrature. A very distant boundary drives `gamma` to infinity
/// and resolves, in IEEE arithmetic, to the infinite-acting response.
fn boundary_terms(
    g: &DimensionlessGroups,
    re: f64,
    u: f64,
) -> Result<BoundaryTerms, WellTestError> {
    let aux0 = u * g.b;
    let aux1 = aux0.sqrt();
    let aux2 = re * (u * g.z).sqrt();

    let i1w = i1(aux1);
    let k1w = k1(aux1);
    let i1e = i1(aux2);
    let k1e = k1(aux2);

    let alpha = k0(aux1) / (aux0 * aux1 * k1w);
    let zeta = i0(aux1) / (aux0 * aux1 * i1w);
    let gamma = (i1e * k1w) / (i1w * k1e);

    let w = i1e * k1w - i1w * k1e;
    let aux3 = w * w;

    let numer = alpha / (1.0 - 1.0 / gamma) - zeta / (1.0 - gamma);
    let denom = 1.0 + aux0 * aux0 * g.cd * numer;

    if !numer.is_finite() || !denom.is_finite() {
        log::warn!("degenerate boundary response at u = {u} (re close to rw e^-S?)");
        return Err(WellTestError::DegenerateResponse { u });
    }
    Ok(BoundaryTerms {
        aux0,
        aux3,
        numer,
        denom,
    })
}

/// Laplace-space pressure drop at the well.
pub fn dpwf_bar(p: &ModelParameters, u: f64) -> Result<f64, WellTestError> {
    let g = DimensionlessGroups::new(p);
    let bt = boundary_terms(&g, p.re, u)?;
    ensure_finite(g.a * g.b * bt.numer / bt.denom, u)
}

/// `d(pwf_bar)/dC`, through the storage convolution identity.
pub fn dpwf_dc_bar(p: &ModelParameters, u: f64) -> Result<f64, WellTestError> {
    storage::dc_bar(dpwf_bar, p, u)
}

/// `d(pwf_bar)/dS`.
///
/// The skin acts only through the effective radius, so the sensitivity
/// collapses to a closed form over the shared terms:
/// `(a/u) (1 - aux0^3 numer^2) / denom^2`.
pub fn dpwf_ds_bar(p: &ModelParameters, u: f64) -> Result<f64, WellTestError> {
    let g = DimensionlessGroups::new(p);
    let bt = boundary_terms(&g, p.re, u)?;
    let d2 = bt.denom * bt.denom;
    ensure_finite(
        (g.a / u) * (1.0 - bt.aux0.powi(3) * bt.numer * bt.numer) / d2,
        u,
    )
}

/// `d(pwf_bar)/dre`.
///
/// The external radius acts only through the reflection ratio; the
/// Wronskian of the modified Bessel pair reduces the sensitivity to
/// `-(a b) / (aux3 re aux0^2 denom^2)`.
pub fn dpwf_dre_bar(p: &ModelParameters, u: f64) -> Result<f64, WellTestError> {
    let g = DimensionlessGroups::new(p);
    let bt = boundary_terms(&g, p.re, u)?;
    let d2 = bt.denom * bt.denom;
    ensure_finite(
        -(g.a * g.b) / (bt.aux3 * p.re * bt.aux0 * bt.aux0 * d2),
        u,
    )
}

/// `d(pwf_bar)/dk`.
///
/// Permeability enters both explicitly, through the `1/k` scaling of the
/// pressure and time groups, and implicitly, through the Bessel arguments
/// and the reflection ratio; the chain rule over the shared terms gives
///
/// $$\left(-\frac{a b}{k}\,N + \frac{a}{2 u k}
/// - \frac{a b\, \mathrm{aux0}^2}{2 k}\,N^2
/// + \frac{a b}{2 k\, \mathrm{aux0}^2\, \mathrm{aux3}}\right) \Big/ D^2$$
///
/// with `N = numer`, `D = denom`.
pub fn dpwf_dk_bar(p: &ModelParameters, u: f64) -> Result<f64, WellTestError> {
    let g = DimensionlessGroups::new(p);
    let bt = boundary_terms(&g, p.re, u)?;
    let ab = g.a * g.b;
    let n = bt.numer;
    let d2 = bt.denom * bt.denom;
    ensure_finite(
        (-(ab / p.k) * n + g.a / (2.0 * u * p.k)
            - (ab * bt.aux0 * bt.aux0 / (2.0 * p.k)) * n * n
            + ab / (2.0 * p.k * bt.aux0 * bt.aux0 * bt.aux3))
            / d2,
        u,
    )
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

/// Skin sensitivity in physical space.
pub fn dpwf_ds(p: &ModelParameters, t: f64) -> Result<f64, WellTestError> {
    p.validate()?;
    stehfest::time_domain(|u| dpwf_ds_bar(p, u), &p.v, t)
}

/// External-radius sensitivity in physical space.
pub fn dpwf_dre(p: &ModelParameters, t: f64) -> Result<f64, WellTestError> {
    p.validate()?;
    stehfest::time_domain(|u| dpwf_dre_bar(p, u), &p.v, t)
}

/// Permeability sensitivity in physical space.
pub fn dpwf_dk(p: &ModelParameters, t: f64) -> Result<f64, WellTestError> {
    p.validate()?;
    stehfest::time_domain(|u| dpwf_dk_bar(p, u), &p.v, t)
}

/// Pressure-drop curve over a time array, for building residuals.
///
/// Fails on the first degenerate time rather than returning a partially
/// valid curve.
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
