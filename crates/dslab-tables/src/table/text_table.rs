//! Plain text table with aligned columns.

use std::io::Write;

use crate::error::Result;
use crate::table::{TableBuilder, TableData};

const COLUMN_SEPARATOR: &str = "|";

/// Prints table as aligned plain text:
///
/// ```text
///
///         SIMULATION RESULTS
///
/// Cloudlet| Status|...
///       ID|       |...
/// ---------------------
///        3|SUCCESS|...
/// ---------------------
/// ```
pub struct TextTableBuilder {
    data: TableData,
    output: Box<dyn Write>,
}

impl Default for TextTableBuilder {
    fn default() -> Self {
        Self::with_output(Box::new(std::io::stdout()))
    }
}

impl TextTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            data: TableData::default(),
            output,
        }
    }

    fn format_line(cells: &[&str], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR)
    }
}

impl TableBuilder for TextTableBuilder {
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
        let rows = self.data.formatted_rows();

        let mut widths = self
            .data
            .columns
            .iter()
            .map(|c| c.title.chars().count().max(c.subtitle().chars().count()))
            .collect::<Vec<_>>();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let line_len = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * COLUMN_SEPARATOR.len();
        let horizontal_line = "-".repeat(line_len);

        let title_len = self.data.title.chars().count();
        let indent = " ".repeat(line_len.saturating_sub(title_len) / 2);
        writeln!(out)?;
        writeln!(out, "{}{}", indent, self.data.title)?;
        writeln!(out)?;

        let titles = self.data.columns.iter().map(|c| c.title.as_str()).collect::<Vec<_>>();
        writeln!(out, "{}", Self::format_line(&titles, &widths))?;
        if self.data.has_subtitles() {
            let subtitles = self.data.columns.iter().map(|c| c.subtitle()).collect::<Vec<_>>();
            writeln!(out, "{}", Self::format_line(&subtitles, &widths))?;
        }
        writeln!(out, "{}", horizontal_line)?;
        for row in &rows {
            let cells = row.iter().map(|c| c.as_str()).collect::<Vec<_>>();
            writeln!(out, "{}", Self::format_line(&cells, &widths))?;
        }
        writeln!(out, "{}", horizontal_line)?;
        Ok(())
    }
}
