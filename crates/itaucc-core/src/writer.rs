use crate::error::ItauccError;
use crate::model::{Field, TransactionRecord};
use std::io::Write;

/// Writes records as CSV rows: fixed column order, every field quoted, CRLF line ends.
pub struct RecordWriter<W: Write> {
    inner: csv::Writer<W>,
    rows_written: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap `inner`, writing the header row immediately when `include_header` is set.
    pub fn new(inner: W, include_header: bool) -> Result<Self, ItauccError> {
        let mut inner = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);

        if include_header {
            inner.write_record(Field::ALL.iter().map(|f| f.column_name()))?;
        }

        Ok(RecordWriter {
            inner,
            rows_written: 0,
        })
    }

    pub fn write(&mut self, record: &TransactionRecord) -> Result<(), ItauccError> {
        self.inner.write_record(record.cells())?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_all<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a TransactionRecord>,
    ) -> Result<(), ItauccError> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Data rows written so far (the header is not counted).
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered rows and hand back the underlying writer.
    pub fn finish(self) -> Result<W, ItauccError> {
        self.inner
            .into_inner()
            .map_err(|e| ItauccError::Io(e.into_error()))
    }
}
