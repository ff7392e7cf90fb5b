//! Python bindings for trigm-core
//!
//! This module exposes the matrix cosine and sine to Python via PyO3.
//!
//! ## Functions
//!
//! - `cosm`, `sinm`, `cosmsinm` - float64 arrays
//! - `cosm_complex`, `sinm_complex`, `cosmsinm_complex` - complex128 arrays
//! - `parameters` - layout, scaling and degree chosen for an input

use pyo3::prelude::*;

mod functions;

/// trigm_python - Matrix cosine and sine implemented in Rust
///
/// Example:
///     >>> import numpy as np
///     >>> import trigm_python as trigm
///     >>> a = np.array([[0.0, 1.0], [-1.0, 0.0]])
///     >>> c, s = trigm.cosmsinm(a, schur=1)
#[pymodule]
fn trigm_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(functions::cosm, m)?)?;
    m.add_function(wrap_pyfunction!(functions::sinm, m)?)?;
    m.add_function(wrap_pyfunction!(functions::cosmsinm, m)?)?;
    m.add_function(wrap_pyfunction!(functions::cosm_complex, m)?)?;
    m.add_function(wrap_pyfunction!(functions::sinm_complex, m)?)?;
    m.add_function(wrap_pyfunction!(functions::cosmsinm_complex, m)?)?;
    m.add_function(wrap_pyfunction!(functions::parameters, m)?)?;

    // Add module version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
