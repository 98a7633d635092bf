use clap::Args;
use itaucc_core::error::ItauccError;
use itaucc_core::extraction::pdftotext::PdftotextExtractor;
use itaucc_core::{export_statements, ExportOptions};
use std::path::PathBuf;

use super::LayoutArgs;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Statement PDF(s) to process, in order
    #[arg(short, long = "input", value_name = "PDF", num_args = 1.., default_value = "V_22.pdf")]
    pub input: Vec<PathBuf>,

    /// CSV file to write the purchases to
    #[arg(short, long, value_name = "CSV", default_value = "itau.csv")]
    pub output: PathBuf,

    /// Write the header row (default)
    #[arg(long, overrides_with = "no_headers")]
    pub headers: bool,

    /// Do not write the header row
    #[arg(long, overrides_with = "headers")]
    pub no_headers: bool,

    /// Overwrite the output file if it already exists
    #[arg(long, overrides_with = "no_force")]
    pub force: bool,

    /// Refuse to overwrite an existing output file (default)
    #[arg(long, overrides_with = "force")]
    pub no_force: bool,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

impl ExtractArgs {
    fn options(&self) -> ExportOptions {
        ExportOptions {
            include_header: self.headers || !self.no_headers,
            force: self.force && !self.no_force,
        }
    }
}

pub fn run(args: ExtractArgs) -> Result<(), ItauccError> {
    let parser = args.layout.parser()?;
    let extractor = PdftotextExtractor::new();

    eprintln!(
        "Processing {} statement(s) with layout '{}', writing to {}...",
        args.input.len(),
        parser.layout().name,
        args.output.display()
    );

    let summary = export_statements(
        &args.input,
        &args.output,
        &args.options(),
        &parser,
        &extractor,
    )?;

    eprintln!(
        "Exported {} record(s) from {} statement(s) to {}",
        summary.rows,
        summary.documents,
        args.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Cli, Commands};
    use clap::Parser;

    fn extract_args(flags: &[&str]) -> super::ExtractArgs {
        let argv = ["itaucc", "extract"].iter().chain(flags);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Extract(args) => args,
            _ => panic!("expected the extract subcommand"),
        }
    }

    #[test]
    fn test_defaults() {
        let args = extract_args(&[]);
        assert_eq!(args.input, vec![std::path::PathBuf::from("V_22.pdf")]);
        assert_eq!(args.output, std::path::PathBuf::from("itau.csv"));

        let options = args.options();
        assert!(options.include_header);
        assert!(!options.force);
    }

    #[test]
    fn test_no_headers() {
        assert!(!extract_args(&["--no-headers"]).options().include_header);
    }

    #[test]
    fn test_last_header_flag_wins() {
        assert!(!extract_args(&["--headers", "--no-headers"]).options().include_header);
        assert!(extract_args(&["--no-headers", "--headers"]).options().include_header);
    }

    #[test]
    fn test_last_force_flag_wins() {
        assert!(extract_args(&["--no-force", "--force"]).options().force);
        assert!(!extract_args(&["--force", "--no-force"]).options().force);
    }

    #[test]
    fn test_multiple_inputs_kept_in_order() {
        let args = extract_args(&["-i", "a.pdf", "b.pdf", "-o", "out.csv"]);
        let names: Vec<_> = args.input.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }
}
