//! Markdown (GitHub flavored) table.

use std::io::Write;

use crate::error::Result;
use crate::table::{TableBuilder, TableColumn, TableData};

/// Prints table in Markdown. Subtitles are appended to column titles in parentheses.
pub struct MarkdownTableBuilder {
    data: TableData,
    output: Box<dyn Write>,
}

impl Default for MarkdownTableBuilder {
    fn default() -> Self {
        Self::with_output(Box::new(std::io::stdout()))
    }
}

impl MarkdownTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            data: TableData::default(),
            output,
        }
    }

    fn header(column: &TableColumn) -> String {
        match &column.subtitle {
            Some(subtitle) => format!("{} ({})", column.title, subtitle),
            None => column.title.clone(),
        }
    }
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

impl TableBuilder for MarkdownTableBuilder {
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
        if !self.data.title.is_empty() {
            writeln!(out, "# {}", self.data.title)?;
            writeln!(out)?;
        }
        let headers = self.data.columns.iter().map(|c| escape(&Self::header(c))).collect::<Vec<_>>();
        writeln!(out, "| {} |", headers.join(" | "))?;
        writeln!(out, "|{}", "---|".repeat(headers.len()))?;
        for row in self.data.formatted_rows() {
            let cells = row.iter().map(|c| escape(c)).collect::<Vec<_>>();
            writeln!(out, "| {} |", cells.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    #[test]
    fn test_markdown_output() {
        let mut builder = MarkdownTableBuilder::with_output(Box::new(std::io::sink()));
        builder.set_title("Results");
        builder.add_column("Cloudlet").set_subtitle("ID");
        builder.add_column("Status");
        builder.new_row().extend([CellValue::from(3u64), CellValue::from("a|b")]);

        let text = builder.render_to_string().unwrap();
        assert_eq!(
            text,
            "# Results\n\n| Cloudlet (ID) | Status |\n|---|---|\n| 3 | a\\|b |\n"
        );
    }
}
