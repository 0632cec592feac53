//! Structural and security validation for parsed tables
//!
//! Checks run in a fixed order: empty-table short-circuit, row
//! ceiling, header charset, then the injection scan over every cell
//! (header included). Violations are collected exhaustively rather
//! than stopping at the first match, so a host can report every
//! problem; the empty-table case is the one short-circuit.
//!
//! This stage never fails. It always returns a report, and the caller
//! decides whether to abort.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::application::use_cases::injection_detectors::{default_detectors, InjectionDetector};
use crate::domain::upload::{ParsedTable, UploadConfig, ValidationReport};

/// Allowed header charset: letters, digits, underscore, whitespace
static HEADER_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\s]*$").expect("header pattern is valid"));

/// Structural and security validator for parsed tables
pub struct TableValidator {
    config: UploadConfig,
    detectors: Vec<Box<dyn InjectionDetector>>,
}

impl TableValidator {
    pub fn new(config: UploadConfig) -> Self {
        Self::with_detectors(config, default_detectors())
    }

    /// Replace the default detector set
    pub fn with_detectors(
        config: UploadConfig,
        detectors: Vec<Box<dyn InjectionDetector>>,
    ) -> Self {
        Self { config, detectors }
    }

    /// Validate a parsed table against structure and content rules
    pub fn validate(&self, table: &ParsedTable) -> ValidationReport {
        let mut report = ValidationReport::valid();

        // An empty table is never valid and nothing else applies
        if table.is_empty() {
            report.add_violation("EMPTY_FILE", "CSV file is empty", None, None);
            return report;
        }

        if table.row_count() > self.config.max_row_count {
            report.add_violation(
                "ROW_LIMIT_EXCEEDED",
                &format!(
                    "CSV file has {} rows, maximum allowed is {}",
                    table.row_count(),
                    self.config.max_row_count
                ),
                None,
                None,
            );
        }

        if let Some(header) = table.header() {
            for (idx, cell) in header.iter().enumerate() {
                if !HEADER_NAME_RE.is_match(cell) {
                    report.add_violation(
                        "INVALID_HEADER",
                        &format!(
                            "Header column {} contains invalid characters: '{}'",
                            idx + 1,
                            cell
                        ),
                        Some(1),
                        Some(idx + 1),
                    );
                }
            }
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                for detector in &self.detectors {
                    if detector.detects(cell) {
                        report.add_violation(
                            "INJECTION_PATTERN",
                            &format!(
                                "Suspicious content at row {}, column {}: {} match",
                                row_idx + 1,
                                col_idx + 1,
                                detector.name()
                            ),
                            Some(row_idx + 1),
                            Some(col_idx + 1),
                        );
                    }
                }
            }
        }

        debug!(
            rows = table.row_count(),
            violations = report.violations.len(),
            "Table validation finished"
        );
        report
    }
}
