//! Model parameters shared by every Laplace-space response.

use ndarray::Array1;

use crate::error::WellTestError;
use crate::stehfest;

/// Customary-oilfield constant for dimensionless time, `tD = C1 k t / (phi mu ct rw^2)`.
pub const OILFIELD_C1: f64 = 2.637e-4;
/// Customary-oilfield constant for dimensionless pressure, `pD = k h dp / (C2 qB mu)`.
pub const OILFIELD_C2: f64 = 141.2;
/// Customary-oilfield constant for dimensionless storage, `CD = C3 C / (phi ct h rw^2)`.
pub const OILFIELD_C3: f64 = 0.8936;

/// Physical and configuration inputs read by one model evaluation.
///
/// Constructed once per evaluation by the driving application and never
/// mutated by any model function. The unit constants `c1`, `c2`, `c3` must
/// be mutually consistent with the unit system of the physical quantities;
/// the `OILFIELD_*` constants cover hours / psi / STB/d / md / ft / cp.
///
/// # Fields
/// * `k`: permeability \[md\]
/// * `mu`: fluid viscosity \[cp\]
/// * `phi`: porosity, in (0, 1\]
/// * `ct`: total compressibility \[1/psi\]
/// * `h`: net formation thickness \[ft\]
/// * `rw`: wellbore radius \[ft\]
/// * `re`: external (outer boundary) radius \[ft\]
/// * `s`: skin factor, may be negative for a stimulated well
/// * `c`: wellbore storage coefficient \[bbl/psi\], may be zero
/// * `qb`: flow rate times formation volume factor \[RB/d\]
/// * `lambda_s`: interporosity flow coefficient (double porosity)
/// * `omega`: storativity ratio, in (0, 1) (double porosity)
/// * `c1`, `c2`, `c3`: unit-conversion constants
/// * `nstehfest`: inversion order, even
/// * `v`: precomputed Stehfest weights, `v.len() == nstehfest`
#[derive(Debug, Clone)]
pub struct ModelParameters {
    pub k: f64,
    pub mu: f64,
    pub phi: f64,
    pub ct: f64,
    pub h: f64,
    pub rw: f64,
    pub re: f64,
    pub s: f64,
    pub c: f64,
    pub qb: f64,
    pub lambda_s: f64,
    pub omega: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub nstehfest: usize,
    pub v: Array1<f64>,
}

impl ModelParameters {
    /// Effective wellbore radius `rw e^{-S}`, positive for any finite skin.
    pub fn rws(&self) -> f64 {
        self.rw * (-self.s).exp()
    }

    /// Check the snapshot before evaluation.
    ///
    /// Non-physical quantities are domain failures; an inconsistent
    /// inversion configuration is fatal at setup.
    pub fn validate(&self) -> Result<(), WellTestError> {
        for (name, value) in [
            ("k", self.k),
            ("mu", self.mu),
            ("ct", self.ct),
            ("h", self.h),
            ("rw", self.rw),
            ("re", self.re),
            ("qB", self.qb),
            ("lambda_s", self.lambda_s),
            ("C1", self.c1),
            ("C2", self.c2),
            ("C3", self.c3),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WellTestError::NonPhysicalParameter { name, value });
            }
        }
        if !self.phi.is_finite() || self.phi <= 0.0 || self.phi > 1.0 {
            return Err(WellTestError::NonPhysicalParameter {
                name: "phi",
                value: self.phi,
            });
        }
        if !self.omega.is_finite() || self.omega <= 0.0 || self.omega >= 1.0 {
            return Err(WellTestError::NonPhysicalParameter {
                name: "omega",
                value: self.omega,
            });
        }
        if !self.c.is_finite() || self.c < 0.0 {
            return Err(WellTestError::NonPhysicalParameter {
                name: "C",
                value: self.c,
            });
        }
        if !self.s.is_finite() {
            return Err(WellTestError::NonPhysicalParameter {
                name: "S",
                value: self.s,
            });
        }
        stehfest::check_order(self.nstehfest)?;
        if self.v.len() != self.nstehfest {
            return Err(WellTestError::WeightCount {
                expected: self.nstehfest,
                actual: self.v.len(),
            });
        }
        Ok(())
    }
}

/// Dimensionless groups consumed by the base responses and every
/// sensitivity function.
///
/// Computed in exactly one place so the closed-form derivatives stay
/// algebraically consistent with the base response they differentiate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DimensionlessGroups {
    /// Effective wellbore radius `rw e^{-S}`.
    pub rws: f64,
    /// Pressure scale `qB mu C2 / (h k)`.
    pub a: f64,
    /// Time scale `phi mu ct rws^2 / (k C1)`.
    pub b: f64,
    /// Diffusivity group `phi mu ct / (k C1)`, i.e. `b / rws^2`.
    pub z: f64,
    /// Dimensionless wellbore storage `C C3 / (phi h ct rws^2)`.
    pub cd: f64,
}

impl DimensionlessGroups {
    pub fn new(p: &ModelParameters) -> Self {
        let rws = p.rws();
        let a = p.qb * p.mu * p.c2 / (p.h * p.k);
        let b = p.phi * p.mu * p.ct * rws * rws / (p.k * p.c1);
        let z = p.phi * p.mu * p.ct / (p.k * p.c1);
        let cd = p.c * p.c3 / (p.phi * p.h * p.ct * rws * rws);
        DimensionlessGroups { rws, a, b, z, cd }
    }
}
