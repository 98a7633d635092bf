pub mod extract;
pub mod layouts;
pub mod parse;

use clap::Args;
use itaucc_core::error::ItauccError;
use itaucc_core::layout::builtin::DEFAULT_PRESET;
use itaucc_core::parser::StatementParser;
use std::path::PathBuf;

/// Which statement layout to parse with.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Predefined layout name (see `itaucc layouts list`)
    #[arg(short, long, default_value = DEFAULT_PRESET)]
    pub preset: String,

    /// Custom JSON layout file; takes precedence over --preset
    #[arg(short, long = "layout", value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

impl LayoutArgs {
    pub fn parser(&self) -> Result<StatementParser, ItauccError> {
        let layout = itaucc_core::resolve_layout(self.layout.as_deref(), &self.preset)?;
        StatementParser::new(layout)
    }
}
