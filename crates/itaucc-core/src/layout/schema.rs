use crate::extraction::Region;
use crate::model::Field;
use serde::{Deserialize, Serialize};

/// Where everything lives on one kind of statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementLayout {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Region holding the statement issue date, used to backfill undated lines.
    pub issue_date: Region,
    /// Synthetic record appended once per statement.
    #[serde(default)]
    pub surcharge: Option<SurchargeDef>,
    /// Line patterns, applied in this order.
    pub patterns: Vec<LinePatternDef>,
}

/// Foreign-consumption surcharge printed at a fixed position on the statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurchargeDef {
    /// Description written for the synthetic record.
    pub description: String,
    /// Region holding the foreign-currency amount.
    pub region: Region,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinePatternDef {
    /// Fixed-width columns, matched left to right and anchored at end of line.
    FixedColumns { name: String, columns: Vec<ColumnDef> },
    /// A literal label followed by whitespace-separated amounts on the same line.
    Labeled {
        name: String,
        label: String,
        amounts: Vec<Field>,
        #[serde(default = "default_amount_pattern")]
        amount_pattern: String,
    },
}

impl LinePatternDef {
    pub fn name(&self) -> &str {
        match self {
            LinePatternDef::FixedColumns { name, .. } => name,
            LinePatternDef::Labeled { name, .. } => name,
        }
    }

    /// Fields this pattern captures, in capture order.
    pub fn fields(&self) -> Vec<Field> {
        match self {
            LinePatternDef::FixedColumns { columns, .. } => {
                columns.iter().filter_map(ColumnDef::field).collect()
            }
            LinePatternDef::Labeled { amounts, .. } => std::iter::once(Field::Description)
                .chain(amounts.iter().copied())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnDef {
    /// Exactly `width` whitespace characters, not captured.
    Gap { width: usize },
    /// Exactly `width` ASCII digits.
    Digits {
        field: Field,
        width: usize,
        #[serde(default)]
        optional: bool,
    },
    /// Exactly `width` characters of any kind.
    Text {
        field: Field,
        width: usize,
        #[serde(default)]
        optional: bool,
    },
}

impl ColumnDef {
    pub fn field(&self) -> Option<Field> {
        match self {
            ColumnDef::Gap { .. } => None,
            ColumnDef::Digits { field, .. } | ColumnDef::Text { field, .. } => Some(*field),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            ColumnDef::Gap { width }
            | ColumnDef::Digits { width, .. }
            | ColumnDef::Text { width, .. } => *width,
        }
    }
}

pub fn default_amount_pattern() -> String {
    "[0-9,]+".to_string()
}
