// ============================================================
// CELL SANITIZER & PREVIEW BUILDER
// ============================================================
// Strip markup/script/SQL-associated characters from every cell and
// build the bounded preview the conversation layer displays

use crate::domain::upload::{ParsedTable, SanitizedPreview};

/// Characters removed from every cell
const STRIPPED_CHARS: [char; 6] = ['<', '>', '\'', '"', '`', ';'];

/// Per-cell sanitizer and preview builder. Pure functions, no I/O.
pub struct CellSanitizer;

impl CellSanitizer {
    /// Remove dangerous characters from a cell, then trim surrounding
    /// whitespace. Idempotent: sanitizing an already-sanitized cell
    /// yields the same value.
    pub fn sanitize(cell: &str) -> String {
        cell.chars()
            .filter(|c| !STRIPPED_CHARS.contains(c))
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Sanitize every cell of every row, the header row included
    pub fn sanitize_table(table: &ParsedTable) -> ParsedTable {
        ParsedTable::new(
            table
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| Self::sanitize(cell)).collect())
                .collect(),
        )
    }

    /// Keep the first `limit` rows of a sanitized table; the remainder
    /// is discarded, not retained anywhere
    pub fn build_preview(table: &ParsedTable, limit: usize) -> SanitizedPreview {
        SanitizedPreview {
            rows: table.rows.iter().take(limit).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_dangerous_character_set() {
        assert_eq!(CellSanitizer::sanitize("O'Brien"), "OBrien");
        assert_eq!(CellSanitizer::sanitize("<b>bold</b>"), "bbold/b");
        assert_eq!(CellSanitizer::sanitize("a;b\"c`d"), "abcd");
    }

    #[test]
    fn trims_whitespace_after_stripping() {
        assert_eq!(CellSanitizer::sanitize("  padded  "), "padded");
        assert_eq!(CellSanitizer::sanitize(" ; "), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in [
            "O'Brien",
            "<script>alert(1)</script>",
            "  plain text  ",
            "",
            "a;b;c",
            "tab\tseparated",
        ] {
            let once = CellSanitizer::sanitize(input);
            let twice = CellSanitizer::sanitize(&once);
            assert_eq!(once, twice, "sanitize not idempotent for {:?}", input);
        }
    }

    #[test]
    fn sanitize_table_covers_the_header_row() {
        let table = ParsedTable::new(vec![
            vec!["<id>".to_string(), "name".to_string()],
            vec!["1".to_string(), "O'Brien".to_string()],
        ]);
        let sanitized = CellSanitizer::sanitize_table(&table);
        assert_eq!(sanitized.rows[0][0], "id");
        assert_eq!(sanitized.rows[1][1], "OBrien");
    }

    #[test]
    fn preview_is_bounded_at_the_limit() {
        let table = ParsedTable::new(vec![vec!["x".to_string()]; 200]);
        assert_eq!(CellSanitizer::build_preview(&table, 5).row_count(), 5);
    }

    #[test]
    fn preview_keeps_short_tables_whole() {
        let table = ParsedTable::new(vec![vec!["x".to_string()]; 3]);
        assert_eq!(CellSanitizer::build_preview(&table, 5).row_count(), 3);
    }
}
