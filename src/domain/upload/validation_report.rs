use serde::{Deserialize, Serialize};

/// A single validation failure, tagged with its cell location when
/// the violation points at one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Stable machine-readable code, e.g. `INJECTION_PATTERN`
    pub code: String,
    pub message: String,
    /// 1-based row index
    pub row: Option<usize>,
    /// 1-based column index
    pub column: Option<usize>,
}

/// Outcome of structural and security validation. Violations are
/// accumulated in table order; `is_valid` holds exactly when the list
/// is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            violations: vec![],
        }
    }

    pub fn add_violation(
        &mut self,
        code: &str,
        message: &str,
        row: Option<usize>,
        column: Option<usize>,
    ) {
        self.is_valid = false;
        self.violations.push(Violation {
            code: code.to_string(),
            message: message.to_string(),
            row,
            column,
        });
    }

    /// Message of the first violation; hosts that surface a single
    /// diagnostic use this
    pub fn first_message(&self) -> Option<&str> {
        self.violations.first().map(|v| v.message.as_str())
    }
}
