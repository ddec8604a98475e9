//! Drives the crate the way the fitting application consumes it: one
//! residual curve and a set of Jacobian columns per parameter vector, in
//! customary oilfield units.

use approx::assert_relative_eq;
use ndarray::Array1;
use welltest::{
    bounded_radial, dual_porosity, stehfest, ModelParameters, WellTestError, OILFIELD_C1,
    OILFIELD_C2, OILFIELD_C3,
};

/// A moderately damaged well in a small closed drainage area.
fn oilfield() -> ModelParameters {
    ModelParameters {
        k: 50.0,
        mu: 0.8,
        phi: 0.15,
        ct: 1e-5,
        h: 30.0,
        rw: 0.3,
        re: 500.0,
        s: 2.0,
        c: 0.01,
        qb: 120.0,
        lambda_s: 1e-6,
        omega: 0.05,
        c1: OILFIELD_C1,
        c2: OILFIELD_C2,
        c3: OILFIELD_C3,
        nstehfest: 12,
        v: stehfest::weights(12).unwrap(),
    }
}

fn finite_difference<F>(f: F, p: &ModelParameters, set: fn(&mut ModelParameters, f64), x: f64, h: f64, t: f64) -> f64
where
    F: Fn(&ModelParameters, f64) -> Result<f64, WellTestError>,
{
    let mut hi = p.clone();
    set(&mut hi, x + h);
    let mut lo = p.clone();
    set(&mut lo, x - h);
    (f(&hi, t).unwrap() - f(&lo, t).unwrap()) / (2.0 * h)
}

#[test]
fn drawdown_curve_is_finite_and_monotone() {
    let p = oilfield();
    let times = Array1::geomspace(1e-2, 200.0, 25).unwrap();
    let curve = bounded_radial::dpwf_curve(&p, times.view()).unwrap();
    for w in curve.as_slice().unwrap().windows(2) {
        assert!(w[0].is_finite() && w[1] > w[0], "curve must grow: {w:?}");
    }
    // Early time is storage-dominated: dp ~ qB t / (24 C) on the unit slope.
    let early = bounded_radial::dpwf(&p, 1e-3).unwrap();
    assert_relative_eq!(early, 120.0 * 1e-3 / (24.0 * 0.01), max_relative = 0.05);
}

#[test]
fn jacobian_columns_match_finite_differences() {
    let p = oilfield();

    // Storage controls the early-time response.
    for &t in &[0.1, 1.0] {
        let fd = finite_difference(bounded_radial::dpwf, &p, |q, x| q.c = x, p.c, 1e-5 * p.c, t);
        assert_relative_eq!(bounded_radial::dpwf_dc(&p, t).unwrap(), fd, max_relative = 1e-4);
    }

    // Skin and permeability are felt across the whole test.
    for &t in &[1.0, 10.0, 100.0] {
        let fd = finite_difference(bounded_radial::dpwf, &p, |q, x| q.s = x, p.s, 1e-5, t);
        assert_relative_eq!(bounded_radial::dpwf_ds(&p, t).unwrap(), fd, max_relative = 1e-4);

        let fd = finite_difference(bounded_radial::dpwf, &p, |q, x| q.k = x, p.k, 1e-5 * p.k, t);
        assert_relative_eq!(bounded_radial::dpwf_dk(&p, t).unwrap(), fd, max_relative = 1e-4);
    }

    // The boundary is only felt once depletion sets in.
    for &t in &[50.0, 200.0] {
        let fd = finite_difference(bounded_radial::dpwf, &p, |q, x| q.re = x, p.re, 1e-4 * p.re, t);
        assert_relative_eq!(bounded_radial::dpwf_dre(&p, t).unwrap(), fd, max_relative = 1e-4);
    }
}

#[test]
fn jacobian_signs_are_physical() {
    let p = oilfield();
    // More storage delays the drawdown, more skin and a tighter formation
    // deepen it.
    assert!(bounded_radial::dpwf_dc(&p, 0.1).unwrap() < 0.0);
    assert!(bounded_radial::dpwf_ds(&p, 10.0).unwrap() > 0.0);
    assert!(bounded_radial::dpwf_dk(&p, 10.0).unwrap() < 0.0);
    assert!(bounded_radial::dpwf_dre(&p, 200.0).unwrap() < 0.0);
}

#[test]
fn dual_porosity_curve_and_sensitivity() {
    let p = oilfield();
    let times = Array1::geomspace(1e-2, 100.0, 20).unwrap();
    let curve = dual_porosity::dpwf_curve(&p, times.view()).unwrap();
    for w in curve.as_slice().unwrap().windows(2) {
        assert!(w[0].is_finite() && w[1] > w[0]);
    }

    for &t in &[0.1, 1.0] {
        let fd = finite_difference(dual_porosity::dpwf, &p, |q, x| q.c = x, p.c, 1e-5 * p.c, t);
        assert_relative_eq!(dual_porosity::dpwf_dc(&p, t).unwrap(), fd, max_relative = 1e-4);
    }
}

#[test]
fn time_origin_is_exact_zero_without_inversion() {
    let p = oilfield();
    assert_eq!(bounded_radial::dpwf(&p, 0.0), Ok(0.0));
    assert_eq!(bounded_radial::dpwf_dre(&p, 0.0), Ok(0.0));
    assert_eq!(dual_porosity::dpwf_dc(&p, 0.0), Ok(0.0));
}

#[test]
fn misconfigured_inversion_is_fatal_at_setup() {
    let mut p = oilfield();
    p.nstehfest = 7;
    let err = p.validate().unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(
        bounded_radial::dpwf(&p, 1.0),
        Err(WellTestError::StehfestOrder { n: 7, .. })
    ));

    let mut p = oilfield();
    p.v = stehfest::weights(10).unwrap();
    assert!(matches!(
        bounded_radial::dpwf(&p, 1.0),
        Err(WellTestError::WeightCount { .. })
    ));
}

#[test]
fn non_physical_trial_is_rejected_not_fatal() {
    let mut p = oilfield();
    p.k = -1.0;
    let err = bounded_radial::dpwf(&p, 1.0).unwrap_err();
    assert!(!err.is_configuration());
    assert_eq!(
        err,
        WellTestError::NonPhysicalParameter {
            name: "k",
            value: -1.0
        }
    );
}
