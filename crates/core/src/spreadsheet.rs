//! Workbook codec.
//!
//! Reads the first worksheet of an uploaded workbook into string cells using
//! `calamine`, and writes a single-sheet `.xlsx` using `rust_xlsxwriter`.
//! Both directions are synchronous and CPU-bound; async callers should run
//! them on a blocking thread.

use std::io::{Cursor, Read, Seek};

use calamine::{Data, Reader, Xls, Xlsb, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::error::CoreError;

/// MIME type of the workbooks produced by [`write_sheet`].
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// OLE compound document magic (legacy `.xls`).
const OLE_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];
/// ZIP magic (`.xlsx`, `.xlsm`, `.xlsb`).
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// A worksheet flattened to strings. `headers` is the first row of the used
/// range; `rows` are the remaining rows, each padded to the range width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parse the first worksheet of a workbook.
///
/// Fails with [`CoreError::Validation`] when the bytes are not a readable
/// workbook or the workbook has no worksheet.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Sheet, CoreError> {
    if bytes.len() < 4 {
        return Err(unreadable("file is too small to be a workbook"));
    }

    if bytes[..4] == OLE_MAGIC {
        let mut workbook: Xls<_> =
            Xls::new(Cursor::new(bytes)).map_err(|e| unreadable(format!("Failed to open XLS: {e}")))?;
        return first_sheet(&mut workbook);
    }

    if bytes[..4] == ZIP_MAGIC {
        if let Ok(mut workbook) = Xlsx::new(Cursor::new(bytes)) {
            return first_sheet(&mut workbook);
        }
        if let Ok(mut workbook) = Xlsb::new(Cursor::new(bytes)) {
            return first_sheet(&mut workbook);
        }
        return Err(unreadable("failed to parse as XLSX or XLSB"));
    }

    Err(unreadable("unrecognized file format"))
}

fn first_sheet<RS, R>(workbook: &mut R) -> Result<Sheet, CoreError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unreadable("workbook contains no worksheet"))?
        .map_err(|e| unreadable(format!("Failed to read worksheet: {e}")))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>());

    let headers = rows.next().unwrap_or_default();
    Ok(Sheet {
        headers,
        rows: rows.collect(),
    })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole numbers (EANs, vintages) must not gain a ".0" suffix.
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{f:.0}")
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn unreadable(reason: impl std::fmt::Display) -> CoreError {
    CoreError::Validation(format!("Unreadable spreadsheet: {reason}"))
}

/// Encode one worksheet named `sheet_name` with a bold header row.
pub fn write_sheet(
    sheet_name: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<Vec<u8>, CoreError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(write_failed)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(write_failed)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let row_idx = (i + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row_idx, col as u16, value)
                .map_err(write_failed)?;
        }
    }

    workbook.save_to_buffer().map_err(write_failed)
}

fn write_failed(err: rust_xlsxwriter::XlsxError) -> CoreError {
    CoreError::Internal(format!("Failed to write spreadsheet: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn written_workbook_reads_back() {
        let bytes = write_sheet(
            "Products",
            &["Name", "Vintage"],
            &[
                vec!["Barolo".into(), "2016".into()],
                vec!["Cava".into(), String::new()],
            ],
        )
        .unwrap();

        let sheet = read_first_sheet(&bytes).unwrap();
        assert_eq!(sheet.headers, vec!["Name", "Vintage"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0], vec!["Barolo", "2016"]);
        assert_eq!(sheet.rows[1][0], "Cava");
        assert_eq!(sheet.rows[1][1], "");
    }

    #[test]
    fn garbage_is_rejected() {
        assert_matches!(
            read_first_sheet(b"name,brand\nfoo,bar\n"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(read_first_sheet(b"PK"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn zip_that_is_not_a_workbook_is_rejected() {
        let mut bytes = ZIP_MAGIC.to_vec();
        bytes.extend_from_slice(&[0u8; 64]);
        assert_matches!(read_first_sheet(&bytes), Err(CoreError::Validation(_)));
    }

    #[test]
    fn float_cells_drop_trailing_zero() {
        assert_eq!(cell_to_string(&Data::Float(2016.0)), "2016");
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }
}
