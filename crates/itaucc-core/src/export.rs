use crate::error::ItauccError;
use crate::extraction::PdfExtractor;
use crate::parser::StatementParser;
use crate::writer::RecordWriter;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write the header row before the first statement's rows.
    pub include_header: bool,
    /// Replace an existing output file instead of refusing to run.
    pub force: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            include_header: true,
            force: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub documents: usize,
    pub rows: usize,
}

/// Parse each statement in order and write all records to one CSV file.
///
/// The first failure aborts the batch: the partially written output is
/// deleted and the error names the offending statement. An existing output
/// is left untouched unless `options.force` is set.
pub fn export_statements(
    inputs: &[PathBuf],
    output: &Path,
    options: &ExportOptions,
    parser: &StatementParser,
    extractor: &dyn PdfExtractor,
) -> Result<ExportSummary, ItauccError> {
    if inputs.is_empty() {
        return Err(ItauccError::NoInputs);
    }
    if output.exists() && !options.force {
        return Err(ItauccError::OutputExists(output.to_path_buf()));
    }

    let file = File::create(output)?;
    let result = write_statements(file, inputs, options, parser, extractor);
    if result.is_err() {
        discard_partial_output(output);
    }
    result
}

fn write_statements(
    file: File,
    inputs: &[PathBuf],
    options: &ExportOptions,
    parser: &StatementParser,
    extractor: &dyn PdfExtractor,
) -> Result<ExportSummary, ItauccError> {
    let mut writer = RecordWriter::new(BufWriter::new(file), options.include_header)?;
    let mut summary = ExportSummary::default();

    for path in inputs {
        let rows = export_one(path, &mut writer, parser, extractor).map_err(|e| {
            ItauccError::Document {
                path: path.clone(),
                source: Box::new(e),
            }
        })?;
        summary.documents += 1;
        summary.rows += rows;
    }

    writer.finish()?.into_inner().map_err(|e| e.into_error())?;
    Ok(summary)
}

fn export_one<W: std::io::Write>(
    path: &Path,
    writer: &mut RecordWriter<W>,
    parser: &StatementParser,
    extractor: &dyn PdfExtractor,
) -> Result<usize, ItauccError> {
    info!(path = %path.display(), "processing statement");

    let pdf_bytes = std::fs::read(path)?;
    let parsed = parser.parse_pdf(&pdf_bytes, extractor)?;
    writer.write_all(&parsed.records)?;

    info!(
        path = %path.display(),
        issue_date = %parsed.issue_date,
        records = parsed.records.len(),
        "statement exported"
    );
    Ok(parsed.records.len())
}

fn discard_partial_output(output: &Path) {
    if let Err(e) = std::fs::remove_file(output) {
        warn!(path = %output.display(), error = %e, "could not remove partial output");
    }
}
