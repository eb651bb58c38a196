//! Output of a processed sheet as a table, CSV or JSON.

use crate::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use sheetdate_core::Processed;
use sheetdate_sheet::CellValue;
use std::collections::BTreeSet;
use std::io::Write;

/// Write `processed` to `out` in the given format.
pub fn render<W: Write>(
    out: &mut W,
    processed: &Processed,
    format: OutputFormat,
    color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, processed, color),
        OutputFormat::Csv => write_csv(out, processed),
        OutputFormat::Json => write_json(out, processed),
    }
}

fn write_table<W: Write>(out: &mut W, processed: &Processed, color: bool) -> Result<()> {
    let table = &processed.table;
    if table.width() == 0 {
        writeln!(out, "(empty table)")?;
        return Ok(());
    }

    let headers: Vec<String> = table.headers.iter().map(CellValue::to_string).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(CellValue::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let header_line = header_cells(&headers, &widths, processed.date_columns(), color);
    writeln!(out, "{}", header_line.join(" | "))?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect();
        writeln!(out, "{}", cells.join(" | ").trim_end())?;
    }

    if rows.is_empty() {
        writeln!(out, "(no rows)")?;
    }
    Ok(())
}

/// Padded header cells; date columns are highlighted when `color` is set.
fn header_cells(
    headers: &[String],
    widths: &[usize],
    date_columns: &BTreeSet<usize>,
    color: bool,
) -> Vec<String> {
    headers
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (header, width))| {
            let padded = pad(header, *width);
            if color && date_columns.contains(&col) {
                padded.cyan().bold().to_string()
            } else if color {
                padded.bold().to_string()
            } else {
                padded
            }
        })
        .collect()
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{s}{}", " ".repeat(width.saturating_sub(len)))
}

fn write_csv<W: Write>(out: &mut W, processed: &Processed) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(processed.table.headers.iter().map(CellValue::to_string))?;
    for row in &processed.table.rows {
        writer.write_record(row.iter().map(CellValue::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, processed: &Processed) -> Result<()> {
    let json = serde_json::json!({
        "sheet": processed.sheet_name,
        "headers": processed.table.headers,
        "rows": processed.table.rows,
        "date_columns": processed.date_columns(),
    });
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetdate_core::{HeaderLocation, NormalizeStats, NormalizedTable};

    fn t(s: &str) -> CellValue {
        CellValue::text(s)
    }

    fn processed() -> Processed {
        Processed {
            sheet_name: "User Details".to_string(),
            location: HeaderLocation {
                row_index: 1,
                date_columns: BTreeSet::from([1]),
            },
            table: NormalizedTable {
                headers: vec![t("Name"), t("Hire Date")],
                rows: vec![
                    vec![t("Alice"), t("01/01/2021")],
                    vec![t("Bob, Jr."), t("03/03/2020")],
                ],
            },
            stats: NormalizeStats::default(),
        }
    }

    fn rendered(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        render(&mut buf, &processed(), format, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_aligned() {
        let out = rendered(OutputFormat::Table);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Name     | Hire Date ");
        assert_eq!(lines[1], "---------+-----------");
        assert_eq!(lines[2], "Alice    | 01/01/2021");
        assert_eq!(lines[3], "Bob, Jr. | 03/03/2020");
    }

    #[test]
    fn test_table_without_rows() {
        let mut processed = processed();
        processed.table.rows.clear();

        let mut buf = Vec::new();
        render(&mut buf, &processed, OutputFormat::Table, false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.ends_with("(no rows)\n"));
    }

    #[test]
    fn test_csv_quotes_fields() {
        let out = rendered(OutputFormat::Csv);
        assert_eq!(
            out,
            "Name,Hire Date\nAlice,01/01/2021\n\"Bob, Jr.\",03/03/2020\n"
        );
    }

    #[test]
    fn test_json_shape() {
        let out = rendered(OutputFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["sheet"], "User Details");
        assert_eq!(json["headers"], serde_json::json!(["Name", "Hire Date"]));
        assert_eq!(json["rows"][1][1], "03/03/2020");
        assert_eq!(json["date_columns"], serde_json::json!([1]));
    }
}
