// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing with encoding and delimiter detection, behind the
// asynchronous parser seam the pipeline suspends on

mod csv_parser;

pub use csv_parser::{CsvParser, CsvTableParser};

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::upload::{CandidateFile, ParsedTable};

/// Parsing collaborator: raw file bytes in, rectangular table out.
/// The pipeline passes the file through unchanged and treats any
/// error as terminal for the attempt.
#[async_trait]
pub trait TableParser {
    async fn parse(&self, file: &CandidateFile) -> Result<ParsedTable>;
}
