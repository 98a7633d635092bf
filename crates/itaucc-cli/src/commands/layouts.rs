use itaucc_core::error::ItauccError;
use itaucc_core::extraction::Region;
use itaucc_core::layout::builtin;
use itaucc_core::layout::schema::{LinePatternDef, StatementLayout};
use itaucc_core::parser::StatementParser;
use std::path::Path;

pub fn list() -> Result<(), ItauccError> {
    println!("Available predefined layouts:\n");
    for name in builtin::PRESETS {
        let layout = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<10} {} (v{}){}",
            name, layout.name, layout.version, default_marker
        );
        if let Some(ref desc) = layout.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), ItauccError> {
    let layout = builtin::load_preset(preset)?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), ItauccError> {
    let layout = itaucc_core::layout::load_layout(file)?;
    // Compiling catches amount patterns that are not valid regexes
    let parser = StatementParser::new(layout)?;
    let layout = parser.layout();

    println!("Layout '{}' (v{}) is valid.", layout.name, layout.version);
    println!("  Issue date: {}", describe_region(&layout.issue_date));
    match layout.surcharge {
        Some(ref s) => println!(
            "  Surcharge: \"{}\" at {}",
            s.description,
            describe_region(&s.region)
        ),
        None => println!("  Surcharge: none"),
    }
    println!("  Patterns (applied in order):");
    for pattern in &layout.patterns {
        println!("    {}", describe_pattern(pattern));
    }

    let warnings = layout_warnings(layout);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

fn describe_region(region: &Region) -> String {
    let b = &region.bbox;
    format!(
        "page {}, ({}, {}) - ({}, {})",
        region.page, b.x_min, b.y_min, b.x_max, b.y_max
    )
}

fn describe_pattern(pattern: &LinePatternDef) -> String {
    let fields: Vec<&str> = pattern.fields().iter().map(|f| f.as_str()).collect();
    match pattern {
        LinePatternDef::FixedColumns { name, columns } => {
            let width: usize = columns.iter().map(|c| c.width()).sum();
            format!(
                "{} (fixed columns, {} chars wide): {}",
                name,
                width,
                fields.join(", ")
            )
        }
        LinePatternDef::Labeled { name, label, .. } => {
            format!("{} (label \"{}\"): {}", name, label, fields.join(", "))
        }
    }
}

/// Suspicious but legal layout choices.
fn layout_warnings(layout: &StatementLayout) -> Vec<String> {
    let mut warnings = Vec::new();
    for pattern in &layout.patterns {
        let fields = pattern.fields();
        let dated = fields.iter().filter(|f| f.is_date_part()).count();
        if dated > 0 && dated < 3 {
            warnings.push(format!(
                "pattern '{}' captures only part of the date; the rest is taken from the issue date",
                pattern.name()
            ));
        }
    }
    warnings
}
