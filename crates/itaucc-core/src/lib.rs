pub mod backfill;
pub mod error;
pub mod export;
pub mod extraction;
pub mod layout;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod writer;

use error::ItauccError;
use extraction::PdfExtractor;
use layout::schema::StatementLayout;
use parser::{ParsedStatement, StatementParser};
use std::path::Path;

pub use export::{export_statements, ExportOptions, ExportSummary};

/// Resolve the layout to use: a custom layout file wins over a named preset.
pub fn resolve_layout(
    layout_file: Option<&Path>,
    preset: &str,
) -> Result<StatementLayout, ItauccError> {
    match layout_file {
        Some(path) => layout::load_layout(path),
        None => layout::builtin::load_preset(preset),
    }
}

/// Main API entry point: parse one statement PDF with the given layout.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    layout: StatementLayout,
) -> Result<ParsedStatement, ItauccError> {
    let parser = StatementParser::new(layout)?;
    parser.parse_pdf(pdf_bytes, extractor)
}
