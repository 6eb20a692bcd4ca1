//! WASM bindings for tagdiff.
//!
//! Exposes tokenizing, canonical levels and diffing to JavaScript via
//! wasm-bindgen. Parse errors and depth mismatches are thrown as JS errors.

use tagdiff_diff::{CanonicalForm, DiffReport};
use wasm_bindgen::prelude::*;

/// Tokenize a document. Returns an array of token strings
/// (`<`, `>`, `/`, `?`, `=`, `"`, or the quoted text).
#[wasm_bindgen]
pub fn tokens(source: &str) -> js_sys::Array {
    tagdiff_lexer::tokenize(source)
        .iter()
        .map(|token| JsValue::from(token.to_string()))
        .collect()
}

/// Canonical forms of a document grouped by depth.
///
/// Returns `[[{ kind, value }, ...], ...]`. Throws if the document does not parse.
#[wasm_bindgen]
pub fn levels(source: &str) -> Result<JsValue, JsError> {
    let levels = native_levels(source).map_err(|e| JsError::new(&e))?;
    serde_wasm_bindgen::to_value(&levels).map_err(|e| JsError::new(&e.to_string()))
}

/// Compare document `a` with document `b`.
///
/// Returns `{ levels: [{ depth, only_in_b, only_in_a, in_both }] }`.
/// Throws on parse errors or when the documents differ in depth.
#[wasm_bindgen]
pub fn diff(a: &str, b: &str) -> Result<JsValue, JsError> {
    let report = native_diff(a, b).map_err(|e| JsError::new(&e))?;
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsError::new(&e.to_string()))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn native_levels(source: &str) -> Result<Vec<Vec<CanonicalForm>>, String> {
    let tree = tagdiff_parser::parse_str(source).map_err(|e| e.to_string())?;
    Ok(tagdiff_diff::canonical_levels(&tree))
}

fn native_diff(a: &str, b: &str) -> Result<DiffReport, String> {
    let a = tagdiff_parser::parse_str(a).map_err(|e| format!("document a: {e}"))?;
    let b = tagdiff_parser::parse_str(b).map_err(|e| format!("document b: {e}"))?;
    tagdiff_diff::diff(&a, &b).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM): the pipeline behind each binding
    // =========================================================================

    #[test]
    fn test_levels() {
        let levels = native_levels("<a><b>x</b></a>").unwrap();
        assert_eq!(
            levels,
            vec![
                vec![CanonicalForm::Element("a".into())],
                vec![CanonicalForm::Element("b".into())],
                vec![CanonicalForm::Text("x".into())],
            ]
        );
    }

    #[test]
    fn test_levels_parse_error() {
        let err = native_levels("<a></b>").unwrap_err();
        assert!(err.contains("does not match"));
    }

    #[test]
    fn test_diff_identical() {
        let report = native_diff("<a x=\"1\" y=\"2\"></a>", "<a y=\"2\" x=\"1\"></a>").unwrap();
        assert!(report.is_identical());
    }

    #[test]
    fn test_diff_reports_changes() {
        let report = native_diff("<a>old</a>", "<a>new</a>").unwrap();
        assert_eq!(report.only_in_a().count(), 1);
        assert_eq!(report.only_in_b().count(), 1);
    }

    #[test]
    fn test_diff_names_failing_document() {
        let err = native_diff("<a></a>", "<a>").unwrap_err();
        assert!(err.starts_with("document b:"), "{err}");
    }

    #[test]
    fn test_diff_depth_mismatch() {
        let err = native_diff("<a></a>", "<a><b></b></a>").unwrap_err();
        assert!(err.contains("different depths"));
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }

    #[test]
    fn test_no_state_between_calls() {
        let first = native_levels("<x></x>").unwrap();
        let second = native_levels("<y></y>").unwrap();
        assert_ne!(first, second);
        assert_eq!(native_levels("<x></x>").unwrap(), first);
    }
}
