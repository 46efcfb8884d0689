//! Table export: CSV, tab-separated clipboard text and single-sheet XLSX

use serde::{Deserialize, Serialize};
use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::LoadGenResult;
use crate::table::{CellValue, TableRow};

/// Default worksheet name
pub const DEFAULT_SHEET_NAME: &str = "ExtractedData";

/// One export column: `key` selects the cell, `label` is the header text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportColumn {
    pub key: String,
    pub label: String,
}

impl ExportColumn {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

fn cell_text(row: &TableRow, column: &ExportColumn) -> String {
    row.get(&column.key).map(|v| v.to_string()).unwrap_or_default()
}

/// Render rows as CSV. Fields containing a comma, quote or newline are quoted.
///
/// Records are joined with `\n`; there is no trailing terminator.
pub fn to_csv(columns: &[ExportColumn], rows: &[TableRow]) -> LoadGenResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.label.as_str()))?;
    for row in rows {
        writer.write_record(columns.iter().map(|c| cell_text(row, c)))?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Tab separated text suitable for pasting into a spreadsheet
pub fn to_tsv(columns: &[ExportColumn], rows: &[TableRow]) -> String {
    let header = columns
        .iter()
        .map(|c| c.label.as_str())
        .collect::<Vec<_>>()
        .join("\t");
    let body = rows.iter().map(|row| {
        columns
            .iter()
            .map(|c| cell_text(row, c))
            .collect::<Vec<_>>()
            .join("\t")
    });
    std::iter::once(header).chain(body).collect::<Vec<_>>().join("\n")
}

/// Build an XLSX workbook with a single worksheet
pub fn to_xlsx(columns: &[ExportColumn], rows: &[TableRow], sheet_name: &str) -> LoadGenResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml(&sheet_title(sheet_name))),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(columns, rows)),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    let cursor = zip.finish()?;
    log::debug!("wrote xlsx with {} rows x {} columns", rows.len(), columns.len());
    Ok(cursor.into_inner())
}

pub fn write_csv(path: impl AsRef<Path>, columns: &[ExportColumn], rows: &[TableRow]) -> LoadGenResult<()> {
    std::fs::write(path, to_csv(columns, rows)?)?;
    Ok(())
}

pub fn write_xlsx(
    path: impl AsRef<Path>,
    columns: &[ExportColumn],
    rows: &[TableRow],
    sheet_name: &str,
) -> LoadGenResult<()> {
    std::fs::write(path, to_xlsx(columns, rows, sheet_name)?)?;
    Ok(())
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape(xml_text(sheet_name).as_str())
    )
}

fn sheet_xml(columns: &[ExportColumn], rows: &[TableRow]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    let header: Vec<CellValue> = columns.iter().map(|c| CellValue::text(&c.label)).collect();
    push_row(&mut xml, 1, header.iter().map(Some));
    for (i, row) in rows.iter().enumerate() {
        push_row(&mut xml, i + 2, columns.iter().map(|c| row.get(&c.key)));
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_row<'a>(xml: &mut String, number: usize, cells: impl Iterator<Item = Option<&'a CellValue>>) {
    xml.push_str(&format!(r#"<row r="{}">"#, number));
    for (col, cell) in cells.enumerate() {
        let reference = format!("{}{}", column_letters(col), number);
        match cell {
            Some(CellValue::Number(v)) if v.is_finite() => {
                xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, v));
            }
            Some(value) if !value.to_string().is_empty() => {
                xml.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    reference,
                    escape(xml_text(&value.to_string()).as_str())
                ));
            }
            _ => {}
        }
    }
    xml.push_str("</row>");
}

/// Worksheet name Excel accepts: none of `[]:*?/\`, no leading or trailing
/// apostrophe, at most 31 characters. Blank names become the default.
pub fn sheet_title(name: &str) -> String {
    const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

    let cleaned: String = xml_text(name)
        .chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .collect();
    let title: String = cleaned.trim().trim_matches('\'').chars().take(31).collect();
    let title = title.trim_end().trim_end_matches('\'');
    if title.is_empty() {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        title.to_string()
    }
}

/// Drop code points XML 1.0 does not allow in character data
fn xml_text(text: &str) -> String {
    text.chars()
        .filter(|c| {
            matches!(*c, '\t' | '\n' | '\r')
                || ('\u{20}'..='\u{FFFD}').contains(c)
                || *c >= '\u{10000}'
        })
        .collect()
}

/// Zero-based column index to spreadsheet letters (0 -> A, 26 -> AA)
fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn columns() -> Vec<ExportColumn> {
        vec![
            ExportColumn::new("desc", "Load Case"),
            ExportColumn::new("sw_v", "SW-V"),
        ]
    }

    fn rows() -> Vec<TableRow> {
        let mut first = TableRow::new();
        first.insert("desc".into(), CellValue::text("1. Heavy, \"NESC\""));
        first.insert("sw_v".into(), CellValue::Number(2.5));
        let mut second = TableRow::new();
        second.insert("desc".into(), CellValue::text("2. Wind"));
        vec![first, second]
    }

    #[test]
    fn test_csv_quoting() {
        let csv = to_csv(&columns(), &rows()).unwrap();
        assert_eq!(
            csv,
            "Load Case,SW-V\n\"1. Heavy, \"\"NESC\"\"\",2.5\n2. Wind,"
        );
    }

    #[test]
    fn test_csv_header_only() {
        let csv = to_csv(&columns(), &[]).unwrap();
        assert_eq!(csv, "Load Case,SW-V");
    }

    #[test]
    fn test_sheet_title() {
        assert_eq!(sheet_title("Bad[1]:?"), "Bad1");
        assert_eq!(sheet_title("a/b\\c*d"), "abcd");
        assert_eq!(sheet_title("'Loads'"), "Loads");
        assert_eq!(sheet_title("  "), DEFAULT_SHEET_NAME);
        assert_eq!(sheet_title("[]"), DEFAULT_SHEET_NAME);
        assert_eq!(sheet_title("\u{1}"), DEFAULT_SHEET_NAME);

        let long = "Vector Load Cases for Tangent Structures";
        assert_eq!(sheet_title(long), "Vector Load Cases for Tangent S");
        assert_eq!(sheet_title(long).chars().count(), 31);
    }

    #[test]
    fn test_xml_text_drops_control_characters() {
        assert_eq!(xml_text("x\u{1}y\u{1f}z"), "xyz");
        assert_eq!(xml_text("a\tb\nc\rd"), "a\tb\nc\rd");
        assert_eq!(xml_text("\u{FFFE}ok\u{1F600}"), "ok\u{1F600}");
    }

    #[test]
    fn test_tsv() {
        let tsv = to_tsv(&columns(), &rows());
        assert_eq!(tsv, "Load Case\tSW-V\n1. Heavy, \"NESC\"\t2.5\n2. Wind\t");
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_xlsx_archive() {
        let bytes = to_xlsx(&columns(), &rows(), DEFAULT_SHEET_NAME).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut workbook = String::new();
        archive
            .by_name("xl/workbook.xml")
            .unwrap()
            .read_to_string(&mut workbook)
            .unwrap();
        assert!(workbook.contains(r#"name="ExtractedData""#));

        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        assert!(sheet.contains(r#"<c r="B2"><v>2.5</v></c>"#));
        assert!(sheet.contains("1. Heavy, &quot;NESC&quot;"));
        assert!(!sheet.contains(r#"r="B3""#));
    }

    #[test]
    fn test_xlsx_with_dirty_input() {
        let columns = vec![ExportColumn::new("a", "A")];
        let mut row = TableRow::new();
        row.insert("a".into(), CellValue::text("x\u{1}y"));
        let bytes = to_xlsx(&columns, &[row], "Bad[1]:?").unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut workbook = String::new();
        archive
            .by_name("xl/workbook.xml")
            .unwrap()
            .read_to_string(&mut workbook)
            .unwrap();
        assert!(workbook.contains(r#"name="Bad1""#));

        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        assert!(sheet.contains(">xy</t>"));
        assert!(!sheet.contains('\u{1}'));
    }
}
