//! Non-fatal diagnostics attached to every embedding and axis analysis.
//!
//! The numeric core absorbs a handful of irregular conditions with
//! documented defaults rather than failing:
//! - the eigen-solver hitting its iteration cap before the tolerance,
//! - a non-positive eigenvalue on a requested axis (zero coordinates),
//! - fewer than two positive eigenvalues (variance explained reported as 100),
//! - zero-variance inputs to a correlation (coefficient reported as 0),
//! - items with no value for some entities (filled with 0).
//!
//! Each occurrence is recorded here so callers can tell "converged cleanly"
//! from "returned a best effort".
//!
//! # Example
//!
//! ```rust
//! use tastemap::{ClassicalMds, DissimilarityMatrix};
//! use ndarray::array;
//!
//! let d = DissimilarityMatrix::new(
//!     vec!["a".into(), "b".into(), "c".into()],
//!     array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0], [2.0, 1.0, 0.0]],
//! ).unwrap();
//! let embedding = ClassicalMds::new().fit(&d).unwrap();
//! for entry in &embedding.diagnostics().entries {
//!     eprintln!("{entry}");
//! }
//! ```

use std::collections::HashMap;

use crate::axis::Axis;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Expected degeneracy in the data.
    Info,
    /// Result is an approximation the caller may want to inspect.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
        }
    }
}

/// What kind of condition was absorbed.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// Jacobi stopped at the iteration cap.
    NonConvergence {
        /// Rotations performed.
        iterations: usize,
        /// Largest remaining off-diagonal magnitude.
        residual: f64,
    },
    /// Axis eigenvalue was non-positive (or absent); coordinates set to zero.
    DegenerateAxis {
        /// The affected axis.
        axis: Axis,
        /// Eigenvalue on that axis, `None` when the matrix is too small to have one.
        eigenvalue: Option<f64>,
    },
    /// Fewer than two positive eigenvalues; variance explained defaults to 100.
    TrivialVariance {
        /// Number of positive eigenvalues found.
        positive: usize,
    },
    /// An item's metric vector is constant; all its loadings are 0.
    ZeroVariance {
        /// Item id.
        item: String,
    },
    /// An item had no value for some entities; zeros were substituted.
    MissingMetric {
        /// Item id.
        item: String,
        /// Number of entities filled with 0.
        missing: usize,
    },
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::NonConvergence { .. } => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::NonConvergence {
                iterations,
                residual,
            } => write!(
                f,
                "eigen-solver stopped after {iterations} rotations with off-diagonal {residual:.3e}"
            ),
            DiagnosticKind::DegenerateAxis { axis, eigenvalue } => match eigenvalue {
                Some(v) => write!(f, "{axis} is degenerate (eigenvalue {v:.3e})"),
                None => write!(f, "{axis} is degenerate (no eigenvalue)"),
            },
            DiagnosticKind::TrivialVariance { positive } => write!(
                f,
                "only {positive} positive eigenvalue(s); variance explained set to 100"
            ),
            DiagnosticKind::ZeroVariance { item } => {
                write!(f, "item '{item}' has constant values")
            }
            DiagnosticKind::MissingMetric { item, missing } => {
                write!(f, "item '{item}' missing for {missing} entities")
            }
        }
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity of the condition.
    pub severity: Severity,
    /// The condition itself.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a diagnostic with the kind's default severity.
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            severity: kind.severity(),
            kind,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.kind)
    }
}

/// Ordered collection of diagnostics from one computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticReport {
    /// All diagnostics, in the order they were raised.
    pub entries: Vec<Diagnostic>,
}

impl DiagnosticReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a condition.
    pub fn push(&mut self, kind: DiagnosticKind) {
        self.entries.push(Diagnostic::new(kind));
    }

    /// Append every entry of another report.
    pub fn extend(&mut self, other: &DiagnosticReport) {
        self.entries.extend(other.entries.iter().cloned());
    }

    /// True when nothing was recorded.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// True unless the eigen-solver hit its iteration cap.
    pub fn converged(&self) -> bool {
        !self
            .entries
            .iter()
            .any(|d| matches!(d.kind, DiagnosticKind::NonConvergence { .. }))
    }

    /// Axes reported as degenerate.
    pub fn degenerate_axes(&self) -> Vec<Axis> {
        self.entries
            .iter()
            .filter_map(|d| match d.kind {
                DiagnosticKind::DegenerateAxis { axis, .. } => Some(axis),
                _ => None,
            })
            .collect()
    }

    /// Diagnostics at or above a severity.
    pub fn at_level(&self, min_severity: Severity) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity >= min_severity)
            .collect()
    }

    /// Count diagnostics by severity.
    pub fn counts(&self) -> HashMap<Severity, usize> {
        let mut counts = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.severity).or_default() += 1;
        }
        counts
    }
}

impl std::fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_clean() {
            return write!(f, "no diagnostics");
        }

        let counts = self.counts();
        let parts: Vec<String> = [(Severity::Warning, "warnings"), (Severity::Info, "info")]
            .iter()
            .filter_map(|(sev, name)| counts.get(sev).map(|c| format!("{c} {name}")))
            .collect();
        writeln!(f, "diagnostics: {}", parts.join(", "))?;

        for entry in &self.entries {
            writeln!(f, "  {entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
    }

    #[test]
    fn test_report_convergence_flag() {
        let mut report = DiagnosticReport::new();
        assert!(report.is_clean());
        assert!(report.converged());

        report.push(DiagnosticKind::ZeroVariance { item: "s1".into() });
        assert!(report.converged());

        report.push(DiagnosticKind::NonConvergence {
            iterations: 100,
            residual: 1e-3,
        });
        assert!(!report.converged());
        assert_eq!(report.at_level(Severity::Warning).len(), 1);
        assert_eq!(report.counts()[&Severity::Info], 1);
    }

    #[test]
    fn test_degenerate_axes_listed() {
        let mut report = DiagnosticReport::new();
        report.push(DiagnosticKind::DegenerateAxis {
            axis: Axis::Z,
            eigenvalue: None,
        });
        report.push(DiagnosticKind::DegenerateAxis {
            axis: Axis::Y,
            eigenvalue: Some(-0.5),
        });
        assert_eq!(report.degenerate_axes(), vec![Axis::Z, Axis::Y]);
    }

    #[test]
    fn test_report_display() {
        let mut report = DiagnosticReport::new();
        assert_eq!(format!("{report}"), "no diagnostics");

        report.push(DiagnosticKind::MissingMetric {
            item: "song-a".into(),
            missing: 2,
        });
        report.push(DiagnosticKind::NonConvergence {
            iterations: 100,
            residual: 2.5e-4,
        });
        let s = format!("{report}");
        assert!(s.contains("1 warnings"));
        assert!(s.contains("1 info"));
        assert!(s.contains("song-a"));
        assert!(s.contains("[WARN]"));
    }
}
