use crate::backfill::{backfill_dates, backfill_record};
use crate::error::ItauccError;
use crate::extraction::{PdfExtractor, StatementDocument};
use crate::layout::schema::{StatementLayout, SurchargeDef};
use crate::layout::validate_layout;
use crate::matcher::RecordMatcher;
use crate::model::{Field, IssueDate, TransactionRecord};
use serde::Serialize;
use tracing::{debug, warn};

/// Records recovered from one statement.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedStatement {
    pub issue_date: IssueDate,
    pub records: Vec<TransactionRecord>,
}

/// A validated layout with its line patterns compiled, reusable across statements.
#[derive(Debug, Clone)]
pub struct StatementParser {
    layout: StatementLayout,
    matcher: RecordMatcher,
}

impl StatementParser {
    pub fn new(layout: StatementLayout) -> Result<Self, ItauccError> {
        validate_layout(&layout)?;
        let matcher = RecordMatcher::compile(&layout.patterns)?;
        Ok(StatementParser { layout, matcher })
    }

    pub fn layout(&self) -> &StatementLayout {
        &self.layout
    }

    pub fn matcher(&self) -> &RecordMatcher {
        &self.matcher
    }

    /// Extract a statement PDF and parse it.
    pub fn parse_pdf(
        &self,
        pdf_bytes: &[u8],
        extractor: &dyn PdfExtractor,
    ) -> Result<ParsedStatement, ItauccError> {
        let document = extractor.extract(pdf_bytes)?;
        debug!(backend = extractor.backend_name(), "statement extracted");
        self.parse_document(&document)
    }

    /// Parse an already extracted statement.
    ///
    /// Matched lines come first in pattern order, followed by the synthetic
    /// surcharge record when the layout defines one.
    pub fn parse_document(
        &self,
        document: &StatementDocument,
    ) -> Result<ParsedStatement, ItauccError> {
        let issue_date = self.read_issue_date(document)?;

        let mut records = self.matcher.match_records(&document.text);
        backfill_dates(&mut records, &issue_date);

        if let Some(ref surcharge) = self.layout.surcharge {
            records.push(surcharge_record(document, surcharge, &issue_date));
        }

        Ok(ParsedStatement {
            issue_date,
            records,
        })
    }

    fn read_issue_date(&self, document: &StatementDocument) -> Result<IssueDate, ItauccError> {
        let region = &self.layout.issue_date;
        let text = document
            .text_in_region(region)
            .ok_or(ItauccError::IssueDateNotFound { page: region.page })?;

        let issue_date = IssueDate::new(text);
        if !issue_date.is_well_formed() {
            warn!(
                issue_date = %issue_date,
                "issue date is not laid out as DD?MM?YY; backfilled dates may be wrong"
            );
        }
        Ok(issue_date)
    }
}

fn surcharge_record(
    document: &StatementDocument,
    def: &SurchargeDef,
    issue_date: &IssueDate,
) -> TransactionRecord {
    let mut record = TransactionRecord::default();
    record.set(Field::Description, def.description.as_str());
    if let Some(amount) = document.text_in_region(&def.region) {
        record.set(Field::ForeignAmount, amount.trim());
    }
    backfill_record(&mut record, issue_date);
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{BBox, PageLayout, TextSpan};
    use crate::layout::builtin::load_preset;

    fn word(x_min: f32, y_min: f32, x_max: f32, y_max: f32, text: &str) -> TextSpan {
        TextSpan {
            bbox: BBox {
                x_min,
                y_min,
                x_max,
                y_max,
            },
            text: text.to_string(),
        }
    }

    fn document(text: &str, words: Vec<TextSpan>) -> StatementDocument {
        StatementDocument {
            text: text.to_string(),
            pages: vec![PageLayout {
                page_number: 1,
                width: 612.0,
                height: 792.0,
                words,
            }],
        }
    }

    fn parser() -> StatementParser {
        StatementParser::new(load_preset("itau-visa").unwrap()).unwrap()
    }

    #[test]
    fn test_surcharge_appended_last_with_issue_date() {
        let doc = document(
            "SEGURO DE VIDA SOBRE SALDO     45,10\n",
            vec![
                word(495.0, 725.0, 535.0, 733.0, "15/03/24"),
                word(503.0, 620.0, 518.0, 626.0, "3,21"),
            ],
        );

        let parsed = parser().parse_document(&doc).unwrap();
        assert_eq!(parsed.issue_date.as_str(), "15/03/24");
        assert_eq!(parsed.records.len(), 2);

        let surcharge = &parsed.records[1];
        assert_eq!(
            surcharge.get(Field::Description),
            Some("RECARGO POR CONSUMOS EN EL EXTERIOR")
        );
        assert_eq!(surcharge.get(Field::ForeignAmount), Some("3,21"));
        assert_eq!(surcharge.get(Field::Day), Some("15"));
        assert_eq!(surcharge.get(Field::Month), Some("03"));
        assert_eq!(surcharge.get(Field::Year), Some("24"));
        assert_eq!(surcharge.get(Field::Card), None);
    }

    #[test]
    fn test_malformed_issue_date_still_parses() {
        let doc = document(
            "SEGURO DE VIDA SOBRE SALDO     45,10\n",
            vec![
                word(495.0, 725.0, 520.0, 733.0, "3/4/24"),
                word(503.0, 620.0, 518.0, 626.0, "0,39"),
            ],
        );

        let parsed = parser().parse_document(&doc).unwrap();
        assert_eq!(parsed.issue_date.as_str(), "3/4/24");
        assert!(!parsed.issue_date.is_well_formed());
        assert_eq!(parsed.records.len(), 2);

        for record in &parsed.records {
            assert_eq!(record.get(Field::Day), Some("3/"));
            assert_eq!(record.get(Field::Month), Some("/2"));
            assert_eq!(record.get(Field::Year), Some(""));
        }
        assert_eq!(parsed.records[0].get(Field::LocalAmount), Some("45,10"));
        assert_eq!(parsed.records[1].get(Field::ForeignAmount), Some("0,39"));
    }

    #[test]
    fn test_empty_surcharge_region_leaves_amount_absent() {
        let doc = document("", vec![word(495.0, 725.0, 535.0, 733.0, "15/03/24")]);

        let parsed = parser().parse_document(&doc).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].get(Field::ForeignAmount), None);
    }

    #[test]
    fn test_missing_issue_date_is_an_error() {
        let doc = document("SEGURO DE VIDA SOBRE SALDO     45,10\n", vec![]);
        let err = parser().parse_document(&doc).unwrap_err();
        assert!(matches!(err, ItauccError::IssueDateNotFound { page: 1 }));
    }

    #[test]
    fn test_layout_without_surcharge() {
        let mut layout = load_preset("itau-visa").unwrap();
        layout.surcharge = None;
        let parser = StatementParser::new(layout).unwrap();

        let doc = document("", vec![word(495.0, 725.0, 535.0, 733.0, "15/03/24")]);
        assert!(parser.parse_document(&doc).unwrap().records.is_empty());
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let mut layout = load_preset("itau-visa").unwrap();
        layout.patterns.clear();
        assert!(StatementParser::new(layout).is_err());
    }
}
