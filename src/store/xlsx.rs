use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::app::Result;
use crate::store::{Cell, TableWriter};

const SHEET_NAME: &str = "News";

/// Writes tables as a single-sheet `.xlsx` workbook.
#[derive(Debug, Default, Clone)]
pub struct XlsxWriter;

impl TableWriter for XlsxWriter {
    fn write_table(&self, header: &[&str], rows: &[Vec<Cell>], path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let bold = Format::new().set_bold();
        for (col, name) in header.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &bold)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let row_num = index as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(value) => {
                        worksheet.write_string(row_num, col, value.as_str())?;
                    }
                    Cell::Bool(value) => {
                        worksheet.write_boolean(row_num, col, *value)?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row_num, col, *value)?;
                    }
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}
