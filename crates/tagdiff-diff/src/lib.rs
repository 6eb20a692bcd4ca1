//! tagdiff Differ
//!
//! Compares two document trees level by level. Each node is reduced to a
//! canonical form; the forms at every depth are sorted and the two trees'
//! levels are matched up by depth:
//!
//! ```text
//! Tree A, Tree B → canonical_levels() → diff() → DiffReport { levels: [LevelDiff] }
//! ```
//!
//! Comparison is set-based per level. It reports which forms are present at
//! a depth, not where they sit under their parents, so two identical nodes
//! at the same depth are indistinguishable.

pub mod canonical;
pub mod report;

pub use canonical::{canonical, canonical_levels, CanonicalForm};
pub use report::{DiffReport, LevelDiff};

use tagdiff_parser::Tree;

/// Comparison error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// The trees have a different number of levels; nothing is compared.
    #[error("Diff error: trees have different depths ({left} levels vs {right} levels)")]
    DepthMismatch { left: usize, right: usize },
}

/// Compare tree `a` with tree `b`.
pub fn diff(a: &Tree, b: &Tree) -> Result<DiffReport, DiffError> {
    let left = canonical_levels(a);
    let right = canonical_levels(b);

    if left.len() != right.len() {
        return Err(DiffError::DepthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let levels: Vec<LevelDiff> = left
        .iter()
        .zip(&right)
        .enumerate()
        .map(|(depth, (a, b))| compare_level(depth, a, b))
        .collect();

    let report = DiffReport { levels };
    tracing::debug!(
        levels = report.levels.len(),
        only_in_a = report.only_in_a().count(),
        only_in_b = report.only_in_b().count(),
        "compared trees"
    );
    Ok(report)
}

/// Split two sorted levels into the three relations.
fn compare_level(depth: usize, a: &[CanonicalForm], b: &[CanonicalForm]) -> LevelDiff {
    let mut level = LevelDiff {
        depth,
        ..Default::default()
    };

    for form in a {
        if b.binary_search(form).is_ok() {
            level.in_both.push(form.clone());
        } else {
            level.only_in_a.push(form.clone());
        }
    }
    for form in b {
        if a.binary_search(form).is_err() {
            level.only_in_b.push(form.clone());
        }
    }

    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree(source: &str) -> Tree {
        tagdiff_parser::parse_str(source).unwrap()
    }

    fn diff_sources(a: &str, b: &str) -> Result<DiffReport, DiffError> {
        diff(&tree(a), &tree(b))
    }

    fn el(form: &str) -> CanonicalForm {
        CanonicalForm::Element(form.into())
    }

    fn text(content: &str) -> CanonicalForm {
        CanonicalForm::Text(content.into())
    }

    // =========================================================================
    // Identical trees
    // =========================================================================

    #[test]
    fn test_identical_documents() {
        let report = diff_sources("<a><b>x</b></a>", "<a>\n  <b>x</b>\n</a>").unwrap();
        assert!(report.is_identical());
        assert_eq!(report.levels.len(), 3);
        assert_eq!(
            report.in_both().cloned().collect::<Vec<_>>(),
            vec![el("a"), el("b"), text("x")]
        );
    }

    #[test]
    fn test_attribute_order_ignored() {
        let report =
            diff_sources("<a x=\"1\" y=\"2\"></a>", "<a y=\"2\" x=\"1\"></a>").unwrap();
        assert!(report.is_identical());
        assert_eq!(report.in_both().count(), 1);
    }

    #[test]
    fn test_sibling_order_ignored() {
        let report = diff_sources("<r><a></a><b></b></r>", "<r><b></b><a></a></r>").unwrap();
        assert!(report.is_identical());
    }

    // =========================================================================
    // Differences
    // =========================================================================

    #[test]
    fn test_changed_attribute_value() {
        let report = diff_sources(
            "<catalog><book id=\"bk101\"></book></catalog>",
            "<catalog><book id=\"bk102\"></book></catalog>",
        )
        .unwrap();

        assert_eq!(
            report.levels[1],
            LevelDiff {
                depth: 1,
                only_in_b: vec![el("book id=bk102")],
                only_in_a: vec![el("book id=bk101")],
                in_both: vec![],
            }
        );
        assert!(report.levels[0].is_identical());
    }

    #[test]
    fn test_changed_text() {
        let report = diff_sources("<t>old</t>", "<t>new</t>").unwrap();
        assert_eq!(report.only_in_a().collect::<Vec<_>>(), vec![&text("old")]);
        assert_eq!(report.only_in_b().collect::<Vec<_>>(), vec![&text("new")]);
    }

    #[test]
    fn test_extra_sibling() {
        let report = diff_sources("<r><a></a></r>", "<r><a></a><b></b></r>").unwrap();
        assert_eq!(report.levels[1].only_in_b, vec![el("b")]);
        assert!(report.levels[1].only_in_a.is_empty());
        assert_eq!(report.levels[1].in_both, vec![el("a")]);
    }

    #[test]
    fn test_text_and_element_never_match() {
        let report = diff_sources("<r><a></a></r>", "<r>a</r>").unwrap();
        assert_eq!(report.levels[1].only_in_a, vec![el("a")]);
        assert_eq!(report.levels[1].only_in_b, vec![text("a")]);
    }

    #[test]
    fn test_same_depth_nodes_are_interchangeable() {
        // Children swap parents; every level still holds the same forms.
        let report = diff_sources(
            "<r><a><x></x></a><b><y></y></b></r>",
            "<r><a><y></y></a><b><x></x></b></r>",
        )
        .unwrap();
        assert!(report.is_identical());
    }

    // =========================================================================
    // Depth mismatch
    // =========================================================================

    #[test]
    fn test_depth_mismatch() {
        assert_eq!(
            diff_sources("<a></a>", "<a><b></b></a>"),
            Err(DiffError::DepthMismatch { left: 1, right: 2 })
        );
    }

    #[test]
    fn test_depth_mismatch_message() {
        let err = diff_sources("<a><b>x</b></a>", "<a></a>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Diff error: trees have different depths (3 levels vs 1 levels)"
        );
    }
}
