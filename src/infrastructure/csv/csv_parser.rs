// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV bytes with encoding fallback and delimiter detection

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};

use super::TableParser;
use crate::domain::error::{AppError, Result};
use crate::domain::upload::{CandidateFile, ParsedTable, TableRow};

/// CSV parser over in-memory content
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse raw bytes into a table. Every record is kept as a plain
    /// row, the header row included; the validator owns header
    /// semantics.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedTable> {
        let content = Self::decode(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from a string
    pub fn parse_content(&self, content: &str) -> Result<ParsedTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let mut rows: Vec<TableRow> = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let row: TableRow = record.iter().map(|s| s.to_string()).collect();
            if row.iter().all(|s| s.trim().is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(ParsedTable::new(rows))
    }

    /// Decode bytes as UTF-8, falling back to Windows-1252
    fn decode(bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(content) => content.to_string(),
            Err(_) => {
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                decoded.into_owned()
            }
        }
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe).
    /// Scored by per-line count consistency over a small sample.
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();
        if sample_lines.is_empty() {
            return b',';
        }

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());
            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }

    /// Parse bytes with automatic delimiter detection
    pub fn parse_bytes_auto_detect(bytes: &[u8]) -> Result<ParsedTable> {
        let content = Self::decode(bytes);
        let delimiter = Self::detect_delimiter(&content);
        Self::default()
            .with_delimiter(delimiter)
            .parse_content(&content)
    }
}

/// Production parser backend for the upload pipeline
pub struct CsvTableParser;

#[async_trait]
impl TableParser for CsvTableParser {
    async fn parse(&self, file: &CandidateFile) -> Result<ParsedTable> {
        CsvParser::parse_bytes_auto_detect(&file.content)
    }
}
