use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CasecheckError {
    #[error("document extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to read rule document {path}: {reason}")]
    RuleDocument { path: PathBuf, reason: String },

    #[error("failed to read records from {path}: {reason}")]
    RecordSource { path: PathBuf, reason: String },

    #[error("record source is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
