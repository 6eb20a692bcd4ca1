//! Diff report types and their text rendering.

use std::fmt;

use serde::Serialize;

use crate::canonical::CanonicalForm;

/// The three relations for one depth level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelDiff {
    pub depth: usize,
    pub only_in_b: Vec<CanonicalForm>,
    pub only_in_a: Vec<CanonicalForm>,
    pub in_both: Vec<CanonicalForm>,
}

impl LevelDiff {
    pub fn is_identical(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }
}

/// Result of comparing two trees level by level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub levels: Vec<LevelDiff>,
}

impl DiffReport {
    /// Entries present in B but not A, concatenated across levels.
    pub fn only_in_b(&self) -> impl Iterator<Item = &CanonicalForm> {
        self.levels.iter().flat_map(|level| &level.only_in_b)
    }

    /// Entries present in A but not B, concatenated across levels.
    pub fn only_in_a(&self) -> impl Iterator<Item = &CanonicalForm> {
        self.levels.iter().flat_map(|level| &level.only_in_a)
    }

    pub fn in_both(&self) -> impl Iterator<Item = &CanonicalForm> {
        self.levels.iter().flat_map(|level| &level.in_both)
    }

    pub fn is_identical(&self) -> bool {
        self.levels.iter().all(LevelDiff::is_identical)
    }
}

/// One block per level: `+` only in B, `-` only in A, `=` in both.
impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in &self.levels {
            writeln!(f, "level {}:", level.depth)?;
            for form in &level.only_in_b {
                writeln!(f, "  + {form}")?;
            }
            for form in &level.only_in_a {
                writeln!(f, "  - {form}")?;
            }
            for form in &level.in_both {
                writeln!(f, "  = {form}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn el(form: &str) -> CanonicalForm {
        CanonicalForm::Element(form.into())
    }

    fn sample() -> DiffReport {
        DiffReport {
            levels: vec![
                LevelDiff {
                    depth: 0,
                    in_both: vec![el("catalog")],
                    ..Default::default()
                },
                LevelDiff {
                    depth: 1,
                    only_in_b: vec![el("book id=2")],
                    only_in_a: vec![el("book id=1")],
                    in_both: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_concatenated_relations() {
        let report = sample();
        assert_eq!(report.only_in_b().collect::<Vec<_>>(), vec![&el("book id=2")]);
        assert_eq!(report.only_in_a().collect::<Vec<_>>(), vec![&el("book id=1")]);
        assert_eq!(report.in_both().collect::<Vec<_>>(), vec![&el("catalog")]);
    }

    #[test]
    fn test_is_identical() {
        assert!(!sample().is_identical());
        assert!(sample().levels[0].is_identical());
        assert!(DiffReport::default().is_identical());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "level 0:\n  = catalog\nlevel 1:\n  + book id=2\n  - book id=1\n"
        );
    }
}
