// Python bindings for the interpretation application.

use ndarray::{Array1, ArrayView1};
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::{pyfunction, pymodule, types::PyModule, wrap_pyfunction, PyResult, Python};

use crate::error::WellTestError;
use crate::parameters::ModelParameters;
use crate::{bounded_radial, dual_porosity, stehfest};

fn to_py_err(e: WellTestError) -> pyo3::PyErr {
    if e.is_configuration() {
        PyValueError::new_err(e.to_string())
    } else {
        PyRuntimeError::new_err(e.to_string())
    }
}

#[allow(clippy::too_many_arguments)]
fn build_parameters(
    k: f64,
    mu: f64,
    phi: f64,
    ct: f64,
    h: f64,
    rw: f64,
    re: f64,
    s: f64,
    c: f64,
    qb: f64,
    lambda_s: f64,
    omega: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    nstehfest: usize,
) -> Result<ModelParameters, WellTestError> {
    let v = stehfest::weights(nstehfest)?;
    let p = ModelParameters {
        k,
        mu,
        phi,
        ct,
        h,
        rw,
        re,
        s,
        c,
        qb,
        lambda_s,
        omega,
        c1,
        c2,
        c3,
        nstehfest,
        v,
    };
    p.validate()?;
    Ok(p)
}

fn curve<F>(
    f: F,
    p: &ModelParameters,
    time: ArrayView1<'_, f64>,
) -> Result<Array1<f64>, WellTestError>
where
    F: Fn(&ModelParameters, f64) -> Result<f64, WellTestError>,
{
    let values = time
        .iter()
        .map(|&t| f(p, t))
        .collect::<Result<Vec<f64>, _>>()?;
    Ok(Array1::from(values))
}

#[pyfunction]
fn stehfest_weights<'py>(py: Python<'py>, n: usize) -> PyResult<&'py PyArray1<f64>> {
    let v = stehfest::weights(n).map_err(to_py_err)?;
    Ok(v.into_pyarray(py))
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
fn bounded_radial_dpwf<'py>(
    py: Python<'py>,
    time: PyReadonlyArray1<f64>,
    k: f64,
    mu: f64,
    phi: f64,
    ct: f64,
    h: f64,
    rw: f64,
    re: f64,
    s: f64,
    c: f64,
    qb: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    nstehfest: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let p = build_parameters(
        k, mu, phi, ct, h, rw, re, s, c, qb, 1.0, 0.5, c1, c2, c3, nstehfest,
    )
    .map_err(to_py_err)?;
    let out = bounded_radial::dpwf_curve(&p, time.as_array()).map_err(to_py_err)?;
    Ok(out.into_pyarray(py))
}

/// Jacobian columns (dC, dS, dre, dk) of the bounded radial model.
#[pyfunction]
#[allow(clippy::too_many_arguments)]
fn bounded_radial_sensitivities<'py>(
    py: Python<'py>,
    time: PyReadonlyArray1<f64>,
    k: f64,
    mu: f64,
    phi: f64,
    ct: f64,
    h: f64,
    rw: f64,
    re: f64,
    s: f64,
    c: f64,
    qb: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    nstehfest: usize,
) -> PyResult<(
    &'py PyArray1<f64>,
    &'py PyArray1<f64>,
    &'py PyArray1<f64>,
    &'py PyArray1<f64>,
)> {
    let p = build_parameters(
        k, mu, phi, ct, h, rw, re, s, c, qb, 1.0, 0.5, c1, c2, c3, nstehfest,
    )
    .map_err(to_py_err)?;
    let time = time.as_array();
    let dc = curve(bounded_radial::dpwf_dc, &p, time).map_err(to_py_err)?;
    let ds = curve(bounded_radial::dpwf_ds, &p, time).map_err(to_py_err)?;
    let dre = curve(bounded_radial::dpwf_dre, &p, time).map_err(to_py_err)?;
    let dk = curve(bounded_radial::dpwf_dk, &p, time).map_err(to_py_err)?;
    Ok((
        dc.into_pyarray(py),
        ds.into_pyarray(py),
        dre.into_pyarray(py),
        dk.into_pyarray(py),
    ))
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
fn dual_porosity_dpwf<'py>(
    py: Python<'py>,
    time: PyReadonlyArray1<f64>,
    k: f64,
    mu: f64,
    phi: f64,
    ct: f64,
    h: f64,
    rw: f64,
    re: f64,
    s: f64,
    c: f64,
    qb: f64,
    lambda_s: f64,
    omega: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    nstehfest: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let p = build_parameters(
        k, mu, phi, ct, h, rw, re, s, c, qb, lambda_s, omega, c1, c2, c3, nstehfest,
    )
    .map_err(to_py_err)?;
    let out = dual_porosity::dpwf_curve(&p, time.as_array()).map_err(to_py_err)?;
    Ok(out.into_pyarray(py))
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
fn dual_porosity_dpwf_dc<'py>(
    py: Python<'py>,
    time: PyReadonlyArray1<f64>,
    k: f64,
    mu: f64,
    phi: f64,
    ct: f64,
    h: f64,
    rw: f64,
    re: f64,
    s: f64,
    c: f64,
    qb: f64,
    lambda_s: f64,
    omega: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    nstehfest: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let p = build_parameters(
        k, mu, phi, ct, h, rw, re, s, c, qb, lambda_s, omega, c1, c2, c3, nstehfest,
    )
    .map_err(to_py_err)?;
    let time = time.as_array();
    let out = curve(dual_porosity::dpwf_dc, &p, time).map_err(to_py_err)?;
    Ok(out.into_pyarray(py))
}

#[pymodule]
fn welltest(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(stehfest_weights, m)?)?;
    m.add_function(wrap_pyfunction!(bounded_radial_dpwf, m)?)?;
    m.add_function(wrap_pyfunction!(bounded_radial_sensitivities, m)?)?;
    m.add_function(wrap_pyfunction!(dual_porosity_dpwf, m)?)?;
    m.add_function(wrap_pyfunction!(dual_porosity_dpwf_dc, m)?)?;
    Ok(())
}
