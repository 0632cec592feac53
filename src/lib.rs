pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::injection_detectors::{
    default_detectors, InjectionDetector, ScriptPatternDetector, SqlPatternDetector,
};
pub use application::use_cases::intake_guard::IntakeGuard;
pub use application::use_cases::sanitizer::CellSanitizer;
pub use application::use_cases::table_validator::TableValidator;
pub use application::use_cases::upload_pipeline::UploadPipeline;
pub use domain::error::{AppError, Result};
pub use domain::upload::{
    AcceptedUpload, CandidateFile, FileMetadata, ParsedTable, RejectionKind, SanitizedPreview,
    TableRow, UploadConfig, UploadOutcome, UploadRejection, ValidationReport, Violation,
};
pub use infrastructure::analysis::{AnalysisClient, SimulatedAnalysisClient};
pub use infrastructure::config::{load_config, load_config_from};
pub use infrastructure::csv::{CsvParser, CsvTableParser, TableParser};

/// Install the default tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}
