use crate::errors::ServerError;
use crate::listing::{Cell, ExportSheet};
use crate::responses::{xlsx_response, ResultResp};
use rust_xlsxwriter::{Format, Workbook};

/// One sheet: bold header row of column labels, then one row per record.
pub fn build_workbook(sheet: &ExportSheet, rows: &[Vec<Cell>]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet.sheet_name)
        .map_err(|e| ServerError::XlsxError(format!("Failed to name sheet: {e}")))?;

    let bold = Format::new().set_bold();
    for (col, header) in sheet.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{header}': {e}"))
            })?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let c = col as u16;
            match cell {
                Cell::Text(s) => worksheet.write_string(r, c, s),
                Cell::Number(n) => worksheet.write_number(r, c, *n),
            }
            .map_err(|e| ServerError::XlsxError(format!("Failed to write row {r}: {e}")))?;
        }
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn export_permits_xlsx(sheet: &ExportSheet, rows: &[Vec<Cell>]) -> ResultResp {
    let buffer = build_workbook(sheet, rows)?;
    tracing::info!(file = sheet.file_stem, rows = rows.len(), "exported report");
    xlsx_response(buffer, &sheet.file_name())
}
