use itaucc_core::error::ItauccError;
use itaucc_core::extraction::pdftotext::PdftotextExtractor;
use itaucc_core::extraction::PdfExtractor;
use std::path::PathBuf;

use super::LayoutArgs;
use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    raw: bool,
    layout: &LayoutArgs,
) -> Result<(), ItauccError> {
    let parser = layout.parser()?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let document = extractor.extract(&pdf_bytes)?;

    if raw {
        // Layout text is what the line patterns run against
        print!("{}", document.text);
        match document.text_in_region(&parser.layout().issue_date) {
            Some(issue_date) => eprintln!("Issue date region: {issue_date:?}"),
            None => eprintln!("Issue date region: <empty>"),
        }
        return Ok(());
    }

    let parsed = parser.parse_document(&document)?;

    match output_format {
        "json" => output::json::print(&parsed)?,
        _ => output::table::print(&parsed),
    }

    eprintln!(
        "{} record(s) from {}",
        parsed.records.len(),
        pdf_file.display()
    );

    Ok(())
}
