use itaucc_core::error::ItauccError;
use itaucc_core::parser::ParsedStatement;

pub fn print(parsed: &ParsedStatement) -> Result<(), ItauccError> {
    let json = serde_json::to_string_pretty(parsed)?;
    println!("{json}");
    Ok(())
}
