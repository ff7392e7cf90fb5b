//! WASM bindings for trigm-core
//!
//! This module exposes the matrix cosine and sine to JavaScript/WASM.

use wasm_bindgen::prelude::*;

mod functions;

pub use functions::{cosm, cosmsinm, sinm, WasmCosSin};

/// Get the library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_follows_manifest() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(version().split('.').count(), 3);
    }
}
