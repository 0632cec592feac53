use serde::{Deserialize, Serialize};

/// One parsed row of string cells
pub type TableRow = Vec<String>;

/// Rectangular row/cell structure produced by parsing CSV bytes.
/// The first row is conventionally the header row; the validator owns
/// that interpretation. Produced once per upload attempt and discarded
/// when the attempt reaches a terminal state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedTable {
    pub rows: Vec<TableRow>,
}

impl ParsedTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The conventional header row, when the table has one
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Width of the header row; 0 for an empty table
    pub fn column_count(&self) -> usize {
        self.header().map(|h| h.len()).unwrap_or(0)
    }
}

/// Bounded prefix of the sanitized table. This, plus the file
/// metadata, is the only table-shaped artifact the rest of the
/// application ever sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedPreview {
    pub rows: Vec<TableRow>,
}

impl SanitizedPreview {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }
}
