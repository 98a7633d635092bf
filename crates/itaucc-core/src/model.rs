use serde::{Deserialize, Serialize};
use std::fmt;

/// One output column of a statement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Day,
    Month,
    Year,
    Card,
    Description,
    Installments,
    OriginAmount,
    LocalAmount,
    ForeignAmount,
}

impl Field {
    /// All fields, in output column order.
    pub const ALL: [Field; 9] = [
        Field::Day,
        Field::Month,
        Field::Year,
        Field::Card,
        Field::Description,
        Field::Installments,
        Field::OriginAmount,
        Field::LocalAmount,
        Field::ForeignAmount,
    ];

    /// Identifier used in layout files and as the regex capture group name.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
            Field::Card => "card",
            Field::Description => "description",
            Field::Installments => "installments",
            Field::OriginAmount => "origin_amount",
            Field::LocalAmount => "local_amount",
            Field::ForeignAmount => "foreign_amount",
        }
    }

    /// Header name written to the CSV file.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Day => "dia",
            Field::Month => "mes",
            Field::Year => "ano",
            Field::Card => "tarjeta",
            Field::Description => "detalle",
            Field::Installments => "cuotas",
            Field::OriginAmount => "importe_origen",
            Field::LocalAmount => "importe_pesos",
            Field::ForeignAmount => "importe_dolares",
        }
    }

    pub fn is_date_part(self) -> bool {
        matches!(self, Field::Day | Field::Month | Field::Year)
    }

    pub fn is_amount(self) -> bool {
        matches!(self, Field::LocalAmount | Field::ForeignAmount)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchase line recovered from a statement.
///
/// `None` means the line pattern did not capture the field at all, while
/// `Some("")` means it was captured but blank. Both render as an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub day: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub card: Option<String>,
    pub description: Option<String>,
    pub installments: Option<String>,
    pub origin_amount: Option<String>,
    pub local_amount: Option<String>,
    pub foreign_amount: Option<String>,
}

impl TransactionRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Cell values in column order; absent fields become empty strings.
    pub fn cells(&self) -> [&str; 9] {
        Field::ALL.map(|field| self.get(field).unwrap_or(""))
    }

    /// True if day, month and year are all present.
    pub fn has_date(&self) -> bool {
        self.day.is_some() && self.month.is_some() && self.year.is_some()
    }

    /// A record worth emitting: a description and at least one currency amount.
    pub fn is_complete(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.description) && (filled(&self.local_amount) || filled(&self.foreign_amount))
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Day => &self.day,
            Field::Month => &self.month,
            Field::Year => &self.year,
            Field::Card => &self.card,
            Field::Description => &self.description,
            Field::Installments => &self.installments,
            Field::OriginAmount => &self.origin_amount,
            Field::LocalAmount => &self.local_amount,
            Field::ForeignAmount => &self.foreign_amount,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Day => &mut self.day,
            Field::Month => &mut self.month,
            Field::Year => &mut self.year,
            Field::Card => &mut self.card,
            Field::Description => &mut self.description,
            Field::Installments => &mut self.installments,
            Field::OriginAmount => &mut self.origin_amount,
            Field::LocalAmount => &mut self.local_amount,
            Field::ForeignAmount => &mut self.foreign_amount,
        }
    }
}

/// Issue date text as read from the statement's first page.
///
/// The text is expected to render as `DD?MM?YY` with one separator character
/// between parts. It is sliced by character position, never parsed as a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueDate(String);

impl IssueDate {
    pub fn new(text: impl Into<String>) -> Self {
        IssueDate(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Characters 0..2.
    pub fn day(&self) -> String {
        self.slice(0, 2)
    }

    /// Characters 3..5.
    pub fn month(&self) -> String {
        self.slice(3, 5)
    }

    /// Characters 6..8.
    pub fn year(&self) -> String {
        self.slice(6, 8)
    }

    /// Whether the text starts with two digits, a separator, two digits,
    /// a separator and two digits.
    pub fn is_well_formed(&self) -> bool {
        let chars: Vec<char> = self.0.chars().take(8).collect();
        chars.len() == 8
            && [0, 1, 3, 4, 6, 7].iter().all(|&i| chars[i].is_ascii_digit())
            && !chars[2].is_ascii_digit()
            && !chars[5].is_ascii_digit()
    }

    // Out-of-range positions yield a shorter (possibly empty) string.
    fn slice(&self, start: usize, end: usize) -> String {
        self.0.chars().skip(start).take(end - start).collect()
    }
}

impl fmt::Display for IssueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
