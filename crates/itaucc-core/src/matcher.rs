use crate::error::ItauccError;
use crate::layout::schema::{ColumnDef, LinePatternDef};
use crate::model::{Field, TransactionRecord};
use regex::Regex;
use tracing::debug;

/// A line pattern compiled to a regex with one named group per captured field.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    regex: Regex,
    fields: Vec<Field>,
}

impl CompiledPattern {
    pub fn compile(def: &LinePatternDef) -> Result<Self, ItauccError> {
        let source = pattern_source(def);
        let regex = Regex::new(&source).map_err(|e| {
            ItauccError::LayoutInvalid(format!("pattern '{}' does not compile: {}", def.name(), e))
        })?;
        debug!(pattern = def.name(), regex = %source, "compiled line pattern");

        Ok(CompiledPattern {
            name: def.name().to_string(),
            regex,
            fields: def.fields(),
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// All records this pattern yields, in source order.
    pub fn records<'a>(&'a self, text: &'a str) -> impl Iterator<Item = TransactionRecord> + 'a {
        self.regex.captures_iter(text).map(move |caps| {
            let mut record = TransactionRecord::default();
            for field in &self.fields {
                if let Some(m) = caps.name(field.as_str()) {
                    record.set(*field, m.as_str().trim());
                }
            }
            record
        })
    }
}

/// Applies the ordered line patterns of a layout to statement text.
#[derive(Debug, Clone)]
pub struct RecordMatcher {
    patterns: Vec<CompiledPattern>,
}

impl RecordMatcher {
    pub fn compile(defs: &[LinePatternDef]) -> Result<Self, ItauccError> {
        let patterns = defs
            .iter()
            .map(CompiledPattern::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RecordMatcher { patterns })
    }

    pub fn pattern_names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name.as_str()).collect()
    }

    /// Every matched record: all matches of the first pattern, then the
    /// second, and so on, each in the order lines appear in `text`.
    ///
    /// Matches without a description or without any currency amount are dropped.
    pub fn match_records(&self, text: &str) -> Vec<TransactionRecord> {
        let mut records = Vec::new();

        for pattern in &self.patterns {
            let before = records.len();
            for record in pattern.records(text) {
                if record.is_complete() {
                    records.push(record);
                } else {
                    debug!(pattern = %pattern.name, ?record, "skipping incomplete match");
                }
            }
            debug!(
                pattern = %pattern.name,
                matched = records.len() - before,
                "applied line pattern"
            );
        }

        records
    }
}

/// Build the regex source for a pattern definition.
///
/// Fixed columns become exact-width groups (`[0-9]{n}`, `.{n}`, `\s{n}`) ending
/// at end of line; labeled lines become the escaped label followed by one
/// optional `[ \t]+amount` group per amount, all on the same line. Line ends
/// may be `\n` or `\r\n`.
fn pattern_source(def: &LinePatternDef) -> String {
    let mut source = String::from("(?mR)");

    match def {
        LinePatternDef::FixedColumns { columns, .. } => {
            for column in columns {
                match column {
                    ColumnDef::Gap { width } => source.push_str(&format!(r"\s{{{width}}}")),
                    ColumnDef::Digits {
                        field,
                        width,
                        optional,
                    } => push_group(&mut source, *field, &format!("[0-9]{{{width}}}"), *optional),
                    ColumnDef::Text {
                        field,
                        width,
                        optional,
                    } => push_group(&mut source, *field, &format!(".{{{width}}}"), *optional),
                }
            }
            source.push('$');
        }
        LinePatternDef::Labeled {
            label,
            amounts,
            amount_pattern,
            ..
        } => {
            push_group(&mut source, Field::Description, &regex::escape(label), false);
            for field in amounts {
                source.push_str(&format!(
                    r"(?:[ \t]+(?P<{}>{}))?",
                    field.as_str(),
                    amount_pattern
                ));
            }
        }
    }

    source
}

fn push_group(source: &mut String, field: Field, body: &str, optional: bool) {
    source.push_str(&format!("(?P<{}>{})", field.as_str(), body));
    if optional {
        source.push('?');
    }
}
