use itaucc_core::model::Field;
use itaucc_core::parser::ParsedStatement;

pub fn print(parsed: &ParsedStatement) {
    print!("{}", format_parsed(parsed));
}

/// Render records as left-aligned columns under the CSV header names.
pub fn format_parsed(parsed: &ParsedStatement) -> String {
    let mut out = format!("Issue date: {}\n\n", parsed.issue_date.as_str().trim());

    if parsed.records.is_empty() {
        out.push_str("  (no records)\n");
        return out;
    }

    let rows: Vec<[&str; 9]> = parsed.records.iter().map(|r| r.cells()).collect();
    let widths: Vec<usize> = Field::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(field.column_name().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<&str> = Field::ALL.iter().map(|f| f.column_name()).collect();
    push_row(&mut out, &header, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(|s| s.as_str()).collect();
    push_row(&mut out, &rule, &widths);

    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    out
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str("  ");
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
