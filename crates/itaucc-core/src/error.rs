use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ItauccError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no issue date found in the expected region on page {page}")]
    IssueDateNotFound { page: usize },

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("no input statements given")]
    NoInputs,

    #[error("output file {} already exists and overwriting is disabled", .0.display())]
    OutputExists(PathBuf),

    #[error("failed to process {}: {source}", path.display())]
    Document {
        path: PathBuf,
        source: Box<ItauccError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
