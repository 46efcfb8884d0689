//! WASM bindings for load case generation
//!
//! Runs generation and vector table derivation in the browser. Every entry
//! point takes a project file as JSON and returns a JSON response string.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::prelude::*;

// Use wee_alloc for smaller WASM binary
#[cfg(feature = "wasm")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

#[derive(Debug, Serialize)]
struct Response<T> {
    success: bool,
    error: Option<String>,
    results: Option<T>,
    ms_elapsed: u64,
}

impl<T: Serialize> Response<T> {
    fn from_result(result: LoadGenResult<T>, start: f64) -> String {
        Self::to_json(result, elapsed_ms(start))
    }

    fn to_json(result: LoadGenResult<T>, ms_elapsed: u64) -> String {
        let response = match result {
            Ok(results) => Response {
                success: true,
                error: None,
                results: Some(results),
                ms_elapsed,
            },
            Err(e) => Response {
                success: false,
                error: Some(e.to_string()),
                results: None,
                ms_elapsed,
            },
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(r#"{{"success":false,"error":"Serialization failed: {}"}}"#, e)
        })
    }
}

#[derive(Debug, Serialize)]
struct VectorResults {
    columns: Vec<ExportColumn>,
    rows: Vec<TableRow>,
}

/// Generate force rows from a project file
#[wasm_bindgen]
pub fn generate(project_json: &str) -> String {
    let start = now();
    let result = ProjectFile::from_json(project_json).and_then(|file| {
        let mut project = LoadCaseProject::from_project_file(file);
        Ok(project.generate()?.to_vec())
    });
    Response::from_result(result, start)
}

/// Build the vector load case table from a project file
#[wasm_bindgen]
pub fn vector_table(project_json: &str) -> String {
    let start = now();
    let result = ProjectFile::from_json(project_json).and_then(|file| {
        let mut project = LoadCaseProject::from_project_file(file);
        match project.generate() {
            Ok(_) | Err(LoadGenError::NoLoadCases) => {}
            Err(e) => return Err(e),
        }
        Ok(VectorResults {
            columns: VectorTable::columns(),
            rows: project.build_vector_table().to_table_rows(),
        })
    });
    Response::from_result(result, start)
}

/// Generated rows as tab separated text for the clipboard; `results` holds
/// the text
#[wasm_bindgen]
pub fn generated_tsv(project_json: &str) -> String {
    let start = now();
    Response::from_result(tsv_text(project_json), start)
}

fn tsv_text(project_json: &str) -> LoadGenResult<String> {
    let file = ProjectFile::from_json(project_json)?;
    let mut project = LoadCaseProject::from_project_file(file);
    let rows: Vec<TableRow> = project
        .generate()?
        .iter()
        .map(GeneratedForceRow::to_table_row)
        .collect();
    Ok(to_tsv(&GeneratedForceRow::columns(), &rows))
}

/// Get current time in milliseconds (for WASM)
fn now() -> f64 {
    #[cfg(feature = "wasm")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "wasm"))]
    {
        0.0
    }
}

fn elapsed_ms(start: f64) -> u64 {
    #[cfg(feature = "wasm")]
    {
        (js_sys::Date::now() - start) as u64
    }
    #[cfg(not(feature = "wasm"))]
    {
        let _ = start;
        0
    }
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_error_uses_response_envelope() {
        let json = Response::to_json(tsv_text("not json"), 0);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert!(value["results"].is_null());
    }

    #[test]
    fn test_tsv_success_carries_text() {
        let json = Response::to_json(Ok::<_, LoadGenError>("a\tb".to_string()), 3);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["results"], "a\tb");
        assert_eq!(value["ms_elapsed"], 3);
    }
}
