//! Wellbore-storage convolution in Laplace space.
//!
//! Every base response in this crate folds wellbore storage into the same
//! denominator `1 + u^2 b_c C \bar{p}_{ns}`, where `\bar{p}_{ns}` is the
//! storage-free solution. Differentiating that convolution with respect to
//! the storage coefficient gives one exact chain-rule form shared by all
//! models,
//!
//! $$\frac{\partial \bar{p}_{wf}}{\partial C} = -b_c\, u^2\, \bar{p}_{wf}^2,
//! \qquad b_c = \frac{C_3}{C_1 C_2\, qB}$$
//!
//! expressed through the full (storage-included) response itself. Keeping
//! the identity in one place means a change to the convolution formula is
//! mirrored in every storage sensitivity at once.

use crate::error::WellTestError;
use crate::parameters::ModelParameters;

/// Storage scaling of the convolution denominator, `C3 / (C1 C2 qB)`.
pub(crate) fn bc(p: &ModelParameters) -> f64 {
    p.c3 / (p.c1 * p.c2 * p.qb)
}

/// `d(pwf_bar)/dC` for any base solution built on the shared storage
/// convolution. `base` is the full Laplace-space response including
/// storage and skin.
pub fn dc_bar<F>(base: F, p: &ModelParameters, u: f64) -> Result<f64, WellTestError>
where
    F: Fn(&ModelParameters, f64) -> Result<f64, WellTestError>,
{
    let pwf = base(p, u)?;
    Ok(-bc(p) * u * u * pwf * pwf)
}
