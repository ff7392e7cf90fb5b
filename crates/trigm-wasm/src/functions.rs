//! WASM bindings for the matrix functions
//!
//! Matrices cross the boundary as flat row-major `Float64Array` buffers
//! together with their order.

use js_sys::Float64Array;
use ndarray::Array2;
use trigm_core::{SchurMode, TrigmError};
use wasm_bindgen::prelude::*;

fn js_error(e: TrigmError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Schur flag from a JS number, which arrives untruncated as `f64`
fn parse_schur(schur: Option<f64>) -> Result<SchurMode, TrigmError> {
    match schur {
        None => Ok(SchurMode::None),
        Some(x) if x.is_finite() && x.fract() == 0.0 => SchurMode::try_from(x as i64),
        Some(x) => Err(TrigmError::InvalidSchur(x.to_string())),
    }
}

fn schur_mode(schur: Option<f64>) -> Result<SchurMode, JsValue> {
    parse_schur(schur).map_err(js_error)
}

fn to_matrix(data: &[f64], n: usize) -> Result<Array2<f64>, JsValue> {
    Array2::from_shape_vec((n, n), data.to_vec()).map_err(|_| {
        JsValue::from_str(&format!(
            "Expected {} entries for a {}x{} matrix, got {}",
            n * n,
            n,
            n,
            data.len()
        ))
    })
}

fn to_js(a: &Array2<f64>) -> Float64Array {
    // Standard layout is row-major
    match a.as_slice() {
        Some(s) => Float64Array::from(s),
        None => Float64Array::from(a.iter().cloned().collect::<Vec<f64>>().as_slice()),
    }
}

/// Matrix cosine
///
/// @param data - Row-major entries of a square matrix
/// @param n - Matrix order
/// @param schur - 0 (none, default), 1 (real Schur) or 2 (complex Schur)
#[wasm_bindgen]
pub fn cosm(data: &[f64], n: usize, schur: Option<f64>) -> Result<Float64Array, JsValue> {
    let mode = schur_mode(schur)?;
    let a = to_matrix(data, n)?;
    let c = trigm_core::cosm(&a, mode).map_err(js_error)?;
    Ok(to_js(&c))
}

/// Matrix sine
///
/// @param data - Row-major entries of a square matrix
/// @param n - Matrix order
/// @param schur - 0 (none, default), 1 (real Schur) or 2 (complex Schur)
#[wasm_bindgen]
pub fn sinm(data: &[f64], n: usize, schur: Option<f64>) -> Result<Float64Array, JsValue> {
    let mode = schur_mode(schur)?;
    let a = to_matrix(data, n)?;
    let s = trigm_core::sinm(&a, mode).map_err(js_error)?;
    Ok(to_js(&s))
}

/// Cosine and sine of one matrix
#[wasm_bindgen]
pub struct WasmCosSin {
    cos: Array2<f64>,
    sin: Array2<f64>,
}

#[wasm_bindgen]
impl WasmCosSin {
    /// Row-major cosine
    #[wasm_bindgen(getter)]
    pub fn cos(&self) -> Float64Array {
        to_js(&self.cos)
    }

    /// Row-major sine
    #[wasm_bindgen(getter)]
    pub fn sin(&self) -> Float64Array {
        to_js(&self.sin)
    }

    /// Matrix order
    #[wasm_bindgen(getter)]
    pub fn n(&self) -> usize {
        self.cos.nrows()
    }
}

/// Matrix cosine and sine together
///
/// @param data - Row-major entries of a square matrix
/// @param n - Matrix order
/// @param schur - 0 (none, default), 1 (real Schur) or 2 (complex Schur)
#[wasm_bindgen]
pub fn cosmsinm(data: &[f64], n: usize, schur: Option<f64>) -> Result<WasmCosSin, JsValue> {
    let mode = schur_mode(schur)?;
    let a = to_matrix(data, n)?;
    let (cos, sin) = trigm_core::cosmsinm(&a, mode).map_err(js_error)?;
    Ok(WasmCosSin { cos, sin })
}
