use crate::model::{Field, IssueDate, TransactionRecord};

/// Fill missing day, month and year of each record from the issue date.
///
/// Values captured from the statement line are kept as they are.
pub fn backfill_dates(records: &mut [TransactionRecord], issue_date: &IssueDate) {
    for record in records.iter_mut() {
        backfill_record(record, issue_date);
    }
}

pub fn backfill_record(record: &mut TransactionRecord, issue_date: &IssueDate) {
    if record.get(Field::Day).is_none() {
        record.set(Field::Day, issue_date.day());
    }
    if record.get(Field::Month).is_none() {
        record.set(Field::Month, issue_date.month());
    }
    if record.get(Field::Year).is_none() {
        record.set(Field::Year, issue_date.year());
    }
}
