//! Upload pipeline orchestration
//!
//! One attempt runs guard -> parse -> validate -> sanitize/preview and
//! terminates in exactly one outcome value:
//!
//! `NoFile -> Guarding -> {Rejected | Parsing} -> {ParseFailed | Validating}
//!  -> {Invalid | Sanitizing} -> Ready(preview)`
//!
//! The outcome is returned to the caller; the hosting UI alone decides
//! how to render it. The pipeline never touches a notification channel
//! and never panics. The parse is the only suspension point; each
//! attempt claims a generation from a monotonic counter, and a
//! completion belonging to a superseded generation is discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::use_cases::intake_guard::IntakeGuard;
use crate::application::use_cases::sanitizer::CellSanitizer;
use crate::application::use_cases::table_validator::TableValidator;
use crate::domain::error::AppError;
use crate::domain::upload::{
    AcceptedUpload, CandidateFile, RejectionKind, UploadConfig, UploadOutcome, UploadRejection,
};
use crate::infrastructure::csv::TableParser;

/// CSV ingestion pipeline for one conversation
pub struct UploadPipeline {
    config: UploadConfig,
    guard: IntakeGuard,
    validator: TableValidator,
    parser: Arc<dyn TableParser + Send + Sync>,
    /// Generation counter; only the newest attempt may complete
    attempt: AtomicU64,
}

impl UploadPipeline {
    pub fn new(config: UploadConfig, parser: Arc<dyn TableParser + Send + Sync>) -> Self {
        let validator = TableValidator::new(config.clone());
        Self::with_validator(config, parser, validator)
    }

    /// Use a custom validator, e.g. one with a replaced detector set
    pub fn with_validator(
        config: UploadConfig,
        parser: Arc<dyn TableParser + Send + Sync>,
        validator: TableValidator,
    ) -> Self {
        Self {
            guard: IntakeGuard::new(config.clone()),
            validator,
            parser,
            attempt: AtomicU64::new(0),
            config,
        }
    }

    /// Run one upload attempt to its terminal outcome
    pub async fn process(&self, file: CandidateFile) -> UploadOutcome {
        let attempt = self.attempt.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            file = %file.name,
            size_bytes = file.size_bytes,
            attempt,
            "Starting upload attempt"
        );

        if let Err(rejection) = self.guard.admit(&file) {
            return UploadOutcome::Rejected(rejection);
        }

        // The only suspension point; a newer attempt may start while
        // the parse is in flight
        let parsed = match self.parser.parse(&file).await {
            Ok(table) => table,
            Err(err) => {
                warn!(file = %file.name, error = %err, "CSV parse failed");
                // Surface the parser's own message verbatim
                let message = match err {
                    AppError::ParseError(msg) => msg,
                    other => other.to_string(),
                };
                return UploadOutcome::Rejected(UploadRejection::new(
                    RejectionKind::ParseFailure,
                    message,
                ));
            }
        };

        if self.is_superseded(attempt) {
            info!(attempt, "Discarding completion of a superseded attempt");
            return UploadOutcome::Superseded { attempt };
        }

        let report = self.validator.validate(&parsed);
        if !report.is_valid {
            warn!(
                file = %file.name,
                violations = report.violations.len(),
                "Upload failed validation"
            );
            let message = report
                .first_message()
                .unwrap_or("CSV failed validation")
                .to_string();
            return UploadOutcome::Rejected(UploadRejection::with_violations(
                RejectionKind::SecurityValidationFailed,
                message,
                report.violations,
            ));
        }

        let sanitized = CellSanitizer::sanitize_table(&parsed);
        let preview = CellSanitizer::build_preview(&sanitized, self.config.preview_row_count);

        let accepted = AcceptedUpload {
            upload_id: Uuid::new_v4(),
            file: file.metadata(),
            preview,
            total_rows: parsed.row_count(),
            uploaded_at: Utc::now(),
        };
        info!(
            file = %accepted.file.name,
            rows = accepted.total_rows,
            upload_id = %accepted.upload_id,
            "Upload accepted"
        );
        UploadOutcome::Accepted(accepted)
    }

    fn is_superseded(&self, attempt: u64) -> bool {
        self.attempt.load(Ordering::SeqCst) != attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::CsvTableParser;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use tokio::sync::Notify;

    use crate::domain::error::Result;
    use crate::domain::upload::ParsedTable;

    fn pipeline() -> UploadPipeline {
        UploadPipeline::new(UploadConfig::default(), Arc::new(CsvTableParser))
    }

    fn csv_file(name: &str, content: &str) -> CandidateFile {
        CandidateFile::from_bytes(name, content.as_bytes().to_vec())
    }

    /// Counts parse calls so tests can assert the parser was never hit
    struct CountingParser {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TableParser for CountingParser {
        async fn parse(&self, file: &CandidateFile) -> Result<ParsedTable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            CsvTableParser.parse(file).await
        }
    }

    /// Blocks the first parse until released, so a second attempt can
    /// start while the first is suspended
    struct GatedParser {
        started: Notify,
        release: Notify,
        first: AtomicBool,
    }

    impl GatedParser {
        fn new() -> Self {
            Self {
                started: Notify::new(),
                release: Notify::new(),
                first: AtomicBool::new(true),
            }
        }
    }

    #[async_trait]
    impl TableParser for GatedParser {
        async fn parse(&self, _file: &CandidateFile) -> Result<ParsedTable> {
            if self.first.swap(false, Ordering::SeqCst) {
                self.started.notify_one();
                self.release.notified().await;
            }
            Ok(ParsedTable::new(vec![
                vec!["id".to_string()],
                vec!["1".to_string()],
            ]))
        }
    }

    #[tokio::test]
    async fn accepts_a_clean_two_row_csv_and_sanitizes_the_preview() {
        let outcome = pipeline()
            .process(csv_file("people.csv", "id,name\n1,O'Brien"))
            .await;

        let accepted = outcome.as_accepted().expect("should be accepted");
        assert_eq!(accepted.total_rows, 2);
        assert_eq!(accepted.preview.row_count(), 2);
        assert_eq!(accepted.preview.rows[1], vec!["1", "OBrien"]);
        assert_eq!(accepted.file.name, "people.csv");
    }

    #[tokio::test]
    async fn rejects_an_injection_payload_with_its_location() {
        let outcome = pipeline()
            .process(csv_file(
                "data.csv",
                "id,payload\n1,fine\n2,\"; DROP TABLE users;--\"",
            ))
            .await;

        let rejection = outcome.as_rejection().expect("should be rejected");
        assert_eq!(rejection.kind, RejectionKind::SecurityValidationFailed);
        let violation = &rejection.violations[0];
        assert_eq!(violation.row, Some(3));
        assert_eq!(violation.column, Some(2));
        assert!(rejection.notification().contains("row 3, column 2"));
    }

    #[tokio::test]
    async fn rejects_an_empty_file_with_the_empty_message() {
        let outcome = pipeline().process(csv_file("empty.csv", "")).await;

        let rejection = outcome.as_rejection().expect("should be rejected");
        assert_eq!(rejection.kind, RejectionKind::SecurityValidationFailed);
        assert_eq!(rejection.notification(), "CSV file is empty");
    }

    #[tokio::test]
    async fn an_oversized_file_never_reaches_the_parser() {
        let parser = Arc::new(CountingParser {
            calls: AtomicUsize::new(0),
        });
        let pipeline = UploadPipeline::new(UploadConfig::default(), parser.clone());

        let outcome = pipeline
            .process(CandidateFile::new("big.csv", 11 * 1024 * 1024, vec![]))
            .await;

        let rejection = outcome.as_rejection().expect("should be rejected");
        assert_eq!(rejection.kind, RejectionKind::FileTooLarge);
        assert_eq!(parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn a_wrong_extension_never_reaches_the_parser() {
        let parser = Arc::new(CountingParser {
            calls: AtomicUsize::new(0),
        });
        let pipeline = UploadPipeline::new(UploadConfig::default(), parser.clone());

        let outcome = pipeline.process(csv_file("data.xlsx", "id\n1")).await;

        let rejection = outcome.as_rejection().expect("should be rejected");
        assert_eq!(rejection.kind, RejectionKind::InvalidExtension);
        assert_eq!(parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn a_row_limit_violation_rejects_the_upload() {
        let config = UploadConfig {
            max_row_count: 10,
            ..UploadConfig::default()
        };
        let pipeline = UploadPipeline::new(config, Arc::new(CsvTableParser));

        let mut content = String::from("id\n");
        for i in 0..20 {
            content.push_str(&format!("{}\n", i));
        }
        let outcome = pipeline.process(csv_file("long.csv", &content)).await;

        let rejection = outcome.as_rejection().expect("should be rejected");
        assert!(rejection
            .violations
            .iter()
            .any(|v| v.code == "ROW_LIMIT_EXCEEDED"));
    }

    #[tokio::test]
    async fn a_superseded_attempt_is_discarded() {
        let parser = Arc::new(GatedParser::new());
        let pipeline = Arc::new(UploadPipeline::new(UploadConfig::default(), parser.clone()));

        let first = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.process(csv_file("first.csv", "id\n1")).await })
        };

        // Wait for the first attempt to suspend inside its parse, then
        // start a second attempt that supersedes it
        parser.started.notified().await;
        let second = pipeline.process(csv_file("second.csv", "id\n1")).await;
        parser.release.notify_one();
        let first = first.await.expect("task should not panic");

        assert!(matches!(first, UploadOutcome::Superseded { .. }));
        assert!(second.as_accepted().is_some());
    }

    #[tokio::test]
    async fn preview_is_capped_at_the_configured_row_count() {
        let mut content = String::from("id,value\n");
        for i in 0..200 {
            content.push_str(&format!("{},v{}\n", i, i));
        }
        let outcome = pipeline().process(csv_file("wide.csv", &content)).await;

        let accepted = outcome.as_accepted().expect("should be accepted");
        assert_eq!(accepted.preview.row_count(), 5);
        assert_eq!(accepted.total_rows, 201);
    }
}
