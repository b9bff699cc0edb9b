//! JSON table.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::table::{TableBuilder, TableData};

#[derive(Serialize)]
struct JsonColumn<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonTable<'a> {
    title: &'a str,
    columns: Vec<JsonColumn<'a>>,
    rows: Vec<Vec<String>>,
}

/// Prints table as a pretty-printed JSON document with formatted row values.
pub struct JsonTableBuilder {
    data: TableData,
    output: Box<dyn Write>,
}

impl Default for JsonTableBuilder {
    fn default() -> Self {
        Self::with_output(Box::new(std::io::stdout()))
    }
}

impl JsonTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            data: TableData::default(),
            output,
        }
    }
}

impl TableBuilder for JsonTableBuilder {
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
        let table = JsonTable {
            title: &self.data.title,
            columns: self
                .data
                .columns
                .iter()
                .map(|c| JsonColumn {
                    title: &c.title,
                    subtitle: c.subtitle.as_deref(),
                })
                .collect(),
            rows: self.data.formatted_rows(),
        };
        serde_json::to_writer_pretty(&mut *out, &table)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellFormat, CellValue};

    #[test]
    fn test_json_output() {
        let mut builder = JsonTableBuilder::with_output(Box::new(std::io::sink()));
        builder.set_title("R");
        builder.add_column("Host").set_subtitle("ID");
        builder.add_column("FinishTime").set_format(CellFormat::Integer);
        builder.new_row().extend([CellValue::from(0u64), CellValue::from(10.5)]);

        let text = builder.render_to_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "R",
                "columns": [{"title": "Host", "subtitle": "ID"}, {"title": "FinishTime"}],
                "rows": [["0", "10"]],
            })
        );
    }
}
