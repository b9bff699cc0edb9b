//! Table builders which collect columns and rows and render them in some text format.

pub mod column;
pub mod csv_table;
pub mod json_table;
pub mod markdown_table;
pub mod text_table;

use std::fmt::{Display, Formatter};
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

pub use column::{CellFormat, CellValue, TableColumn};
pub use csv_table::CsvTableBuilder;
pub use json_table::JsonTableBuilder;
pub use markdown_table::MarkdownTableBuilder;
pub use text_table::TextTableBuilder;

/// Contents of a table shared by all builders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableData {
    pub title: String,
    /// Columns in display order.
    pub columns: Vec<TableColumn>,
    /// Rows, each holding one value per column.
    pub rows: Vec<Vec<CellValue>>,
}

impl TableData {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Checks that every row has exactly one value per column.
    pub fn check_rows(&self) -> Result<()> {
        let expected = self.columns.len();
        for (row, values) in self.rows.iter().enumerate() {
            if values.len() != expected {
                return Err(TableError::RowLength {
                    row,
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }

    pub fn has_subtitles(&self) -> bool {
        self.columns.iter().any(|c| c.subtitle.is_some())
    }

    /// Returns rows with values formatted according to their column formats.
    pub fn formatted_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().zip(&self.columns).map(|(value, col)| col.format(value)).collect())
            .collect()
    }
}

/// Builds a table and prints it to the output.
///
/// Implementations only decide how the collected [`TableData`] is rendered,
/// columns and rows are managed by the provided methods.
pub trait TableBuilder {
    fn data(&self) -> &TableData;

    fn data_mut(&mut self) -> &mut TableData;

    /// Output the table is printed to.
    fn output(&mut self) -> &mut dyn Write;

    /// Renders the table into `out`.
    fn render(&self, out: &mut dyn Write) -> Result<()>;

    fn title(&self) -> &str {
        &self.data().title
    }

    fn set_title(&mut self, title: &str) {
        self.data_mut().title = title.to_string();
    }

    /// Appends a new column and returns it for further configuration.
    fn add_column(&mut self, title: &str) -> &mut TableColumn {
        let columns = &mut self.data_mut().columns;
        columns.push(TableColumn::new(title));
        let last = columns.len() - 1;
        &mut columns[last]
    }

    /// Appends a new empty row and returns it to be filled with values.
    fn new_row(&mut self) -> &mut Vec<CellValue> {
        let rows = &mut self.data_mut().rows;
        rows.push(Vec::new());
        let last = rows.len() - 1;
        &mut rows[last]
    }

    fn render_to_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.render(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Renders the table and writes it to the output.
    fn print(&mut self) -> Result<()> {
        let text = self.render_to_string()?;
        let out = self.output();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Text,
    Csv,
    Markdown,
    Json,
}

impl TableFormat {
    /// Creates builder for this format which prints to stdout.
    pub fn builder(&self) -> Box<dyn TableBuilder> {
        self.builder_with_output(Box::new(std::io::stdout()))
    }

    pub fn builder_with_output(&self, output: Box<dyn Write>) -> Box<dyn TableBuilder> {
        match self {
            TableFormat::Text => Box::new(TextTableBuilder::with_output(output)),
            TableFormat::Csv => Box::new(CsvTableBuilder::with_output(output)),
            TableFormat::Markdown => Box::new(MarkdownTableBuilder::with_output(output)),
            TableFormat::Json => Box::new(JsonTableBuilder::with_output(output)),
        }
    }
}

impl Display for TableFormat {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            TableFormat::Text => write!(f, "text"),
            TableFormat::Csv => write!(f, "csv"),
            TableFormat::Markdown => write!(f, "markdown"),
            TableFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for TableFormat {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(TableFormat::Text),
            "csv" => Ok(TableFormat::Csv),
            "markdown" | "md" => Ok(TableFormat::Markdown),
            "json" => Ok(TableFormat::Json),
            _ => Err(TableError::UnknownTableFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(builder: &mut dyn TableBuilder) {
        builder.set_title("T");
        builder.add_column("A").set_subtitle("a");
        builder.add_column("B");
        builder.new_row().extend([CellValue::from(1), CellValue::from("x")]);
    }

    #[test]
    fn test_columns_and_rows_keep_order() {
        let mut builder = TextTableBuilder::new();
        sample(&mut builder);
        builder.new_row().extend([CellValue::from(2), CellValue::from("y")]);

        let data = builder.data();
        assert_eq!(builder.title(), "T");
        let titles: Vec<_> = data.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(
            data.formatted_rows(),
            vec![vec!["1".to_string(), "x".to_string()], vec!["2".to_string(), "y".to_string()]]
        );
        assert!(data.has_subtitles());
    }

    #[test]
    fn test_row_length_is_checked() {
        for format in [TableFormat::Text, TableFormat::Csv, TableFormat::Markdown, TableFormat::Json] {
            let mut builder = format.builder_with_output(Box::new(std::io::sink()));
            sample(builder.as_mut());
            builder.new_row().push(CellValue::from(2));
            assert!(matches!(
                builder.render_to_string(),
                Err(TableError::RowLength {
                    row: 1,
                    expected: 2,
                    actual: 1
                })
            ));
        }
    }

    #[test]
    fn test_parse_table_format() {
        assert_eq!("CSV".parse::<TableFormat>().unwrap(), TableFormat::Csv);
        assert_eq!("md".parse::<TableFormat>().unwrap(), TableFormat::Markdown);
        assert_eq!(TableFormat::Json.to_string(), "json");
        assert!(matches!(
            "html".parse::<TableFormat>(),
            Err(TableError::UnknownTableFormat(_))
        ));
    }
}
