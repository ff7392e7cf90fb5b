//! Python bindings for the matrix functions

use num_complex::Complex64;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;
use trigm_core::{SchurMode, TrigmError, TrigmOptions};

type RealArray<'py> = Bound<'py, PyArray2<f64>>;
type ComplexArray<'py> = Bound<'py, PyArray2<Complex64>>;

fn value_error(e: TrigmError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

fn schur_mode(schur: i64) -> PyResult<SchurMode> {
    SchurMode::try_from(schur).map_err(value_error)
}

/// Matrix cosine of a real square array
///
/// Args:
///     a: Square float64 array
///     schur: 0 (no factorization), 1 (real Schur) or 2 (complex Schur)
///
/// Returns:
///     cos(a) as a float64 array
#[pyfunction]
#[pyo3(signature = (a, schur=0))]
pub fn cosm<'py>(py: Python<'py>, a: PyReadonlyArray2<'py, f64>, schur: i64) -> PyResult<RealArray<'py>> {
    let mode = schur_mode(schur)?;
    let c = trigm_core::cosm(&a.as_array().to_owned(), mode).map_err(value_error)?;
    Ok(c.into_pyarray(py))
}

/// Matrix sine of a real square array
///
/// Args:
///     a: Square float64 array
///     schur: 0 (no factorization), 1 (real Schur) or 2 (complex Schur)
///
/// Returns:
///     sin(a) as a float64 array
#[pyfunction]
#[pyo3(signature = (a, schur=0))]
pub fn sinm<'py>(py: Python<'py>, a: PyReadonlyArray2<'py, f64>, schur: i64) -> PyResult<RealArray<'py>> {
    let mode = schur_mode(schur)?;
    let s = trigm_core::sinm(&a.as_array().to_owned(), mode).map_err(value_error)?;
    Ok(s.into_pyarray(py))
}

/// Matrix cosine and sine of a real square array
///
/// Returns:
///     Tuple (cos(a), sin(a))
#[pyfunction]
#[pyo3(signature = (a, schur=0))]
pub fn cosmsinm<'py>(
    py: Python<'py>,
    a: PyReadonlyArray2<'py, f64>,
    schur: i64,
) -> PyResult<(RealArray<'py>, RealArray<'py>)> {
    let mode = schur_mode(schur)?;
    let (c, s) = trigm_core::cosmsinm(&a.as_array().to_owned(), mode).map_err(value_error)?;
    Ok((c.into_pyarray(py), s.into_pyarray(py)))
}

/// Matrix cosine of a complex square array
#[pyfunction]
#[pyo3(signature = (a, schur=0))]
pub fn cosm_complex<'py>(
    py: Python<'py>,
    a: PyReadonlyArray2<'py, Complex64>,
    schur: i64,
) -> PyResult<ComplexArray<'py>> {
    let mode = schur_mode(schur)?;
    let c = trigm_core::cosm(&a.as_array().to_owned(), mode).map_err(value_error)?;
    Ok(c.into_pyarray(py))
}

/// Matrix sine of a complex square array
#[pyfunction]
#[pyo3(signature = (a, schur=0))]
pub fn sinm_complex<'py>(
    py: Python<'py>,
    a: PyReadonlyArray2<'py, Complex64>,
    schur: i64,
) -> PyResult<ComplexArray<'py>> {
    let mode = schur_mode(schur)?;
    let s = trigm_core::sinm(&a.as_array().to_owned(), mode).map_err(value_error)?;
    Ok(s.into_pyarray(py))
}

/// Matrix cosine and sine of a complex square array
#[pyfunction]
#[pyo3(signature = (a, schur=0))]
pub fn cosmsinm_complex<'py>(
    py: Python<'py>,
    a: PyReadonlyArray2<'py, Complex64>,
    schur: i64,
) -> PyResult<(ComplexArray<'py>, ComplexArray<'py>)> {
    let mode = schur_mode(schur)?;
    let (c, s) = trigm_core::cosmsinm(&a.as_array().to_owned(), mode).map_err(value_error)?;
    Ok((c.into_pyarray(py), s.into_pyarray(py)))
}

/// Parameters the cosine of a real array would use
///
/// Returns:
///     Tuple (layout, s, m): working-matrix layout name, number of
///     double-angle steps and approximant degree
#[pyfunction]
#[pyo3(signature = (a, schur=0))]
pub fn parameters(a: PyReadonlyArray2<'_, f64>, schur: i64) -> PyResult<(String, u32, usize)> {
    let opts = TrigmOptions::new().schur(schur_mode(schur)?);
    let (_, info) = trigm_core::cosm_with_info(&a.as_array().to_owned(), &opts).map_err(value_error)?;
    Ok((info.layout.to_string(), info.scaling, info.degree))
}
