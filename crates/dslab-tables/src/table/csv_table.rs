//! Delimiter-separated table.

use std::io::Write;

use crate::error::Result;
use crate::table::{TableBuilder, TableData};

/// Prints table as CSV: column titles, then subtitles (if any column has one), then data rows.
/// The title is not printed.
pub struct CsvTableBuilder {
    data: TableData,
    output: Box<dyn Write>,
    delimiter: u8,
}

impl Default for CsvTableBuilder {
    fn default() -> Self {
        Self::with_output(Box::new(std::io::stdout()))
    }
}

impl CsvTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            data: TableData::default(),
            output,
            delimiter: b';',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl TableBuilder for CsvTableBuilder {
    fn data(&self) -> &TableData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut TableData {
        &mut self.data
    }

    fn output(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }

    fn render(&self, out: &mut dyn Write) -> Result<()> {
        self.data.check_rows()?;
        let mut wtr = csv::WriterBuilder::new().delimiter(self.delimiter).from_writer(out);
        wtr.write_record(self.data.columns.iter().map(|c| c.title.as_str()))?;
        if self.data.has_subtitles() {
            wtr.write_record(self.data.columns.iter().map(|c| c.subtitle()))?;
        }
        for row in self.data.formatted_rows() {
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
