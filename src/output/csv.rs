//! Delimited file writer

use std::io::Write;

use crate::model::Table;

use super::TableWriter;

/// Writes a header row followed by every data row, without an index column
pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl CsvWriter {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl TableWriter for CsvWriter {
    fn write_table(&self, table: &Table, writer: &mut dyn Write) -> std::result::Result<(), csv::Error> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        if table.column_count() > 0 {
            csv_writer.write_record(table.columns.iter().map(|c| c.name.as_bytes()))?;

            for row in &table.rows {
                let fields: Vec<_> = row.cells.iter().map(|c| c.display()).collect();
                csv_writer.write_record(fields.iter().map(|f| f.as_bytes()))?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Column};

    fn to_delimited_string(table: &Table, delimiter: u8) -> String {
        let mut buffer = Vec::new();
        CsvWriter::new(delimiter).write_table(table, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_writes_header_and_rows() {
        let mut table = Table::new(vec![Column::new("product"), Column::new("price")]);
        table.add_row(vec![CellValue::from("Widget, large"), CellValue::Float(2.0)], 2);
        table.add_row(vec![CellValue::Null, CellValue::Float(9.99)], 3);

        let out = to_delimited_string(&table, b',');
        assert_eq!(out, "product,price\n\"Widget, large\",2.0\n,9.99\n");
    }

    #[test]
    fn test_tab_delimited() {
        let mut table = Table::new(vec![Column::new("a"), Column::new("b")]);
        table.add_row(vec![CellValue::Int(1), CellValue::from("x y")], 2);

        let out = to_delimited_string(&table, b'\t');
        assert_eq!(out, "a\tb\n1\tx y\n");
    }

    #[test]
    fn test_no_columns_writes_nothing() {
        let out = to_delimited_string(&Table::default(), b',');
        assert!(out.is_empty());
    }
}
