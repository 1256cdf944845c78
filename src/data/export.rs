use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use super::model::{ClaimRecord, EXPORT_COLUMNS};
use crate::error::Error;

/// Sheet name used for `.xlsx` exports.
const SHEET_NAME: &str = "Precatórios";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write `records` to `path`. Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx`    – Excel workbook, one sheet (the dashboard's default)
/// * `.csv`     – comma-separated, header row
/// * `.json`    – `[{ "Número": "1000", ... }, ...]`
/// * `.parquet` – one row group, amounts as Float64
///
/// Columns are always written in the order of [`EXPORT_COLUMNS`]. An existing
/// file at `path` is overwritten.
pub fn export_records(path: &Path, records: &[ClaimRecord]) -> Result<(), Error> {
    write_file(path, records)
        .map(|()| {
            log::info!("Exported {} precatórios to {}", records.len(), path.display());
        })
        .map_err(|e| Error::Export {
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })
}

fn write_file(path: &Path, records: &[ClaimRecord]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" => write_xlsx(path, records),
        "csv" => write_csv(path, records),
        "json" => write_json(path, records),
        "parquet" | "pq" => write_parquet(path, records),
        other => bail!("Unsupported export format: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Excel
// ---------------------------------------------------------------------------

fn write_xlsx(path: &Path, records: &[ClaimRecord]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).context("naming worksheet")?;

    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *name, &header)
            .context("writing header row")?;
    }

    for (i, rec) in records.iter().enumerate() {
        let row = u32::try_from(i + 1).context("too many rows for a worksheet")?;
        sheet
            .write_string(row, 0, &rec.id)
            .and_then(|s| s.write_string(row, 1, rec.claimant.to_string()))
            .and_then(|s| s.write_number(row, 2, decimal_to_f64(rec.amount)))
            .and_then(|s| s.write_string(row, 3, rec.status.label()))
            .and_then(|s| s.write_number(row, 4, f64::from(rec.documents_attached_pct)))
            .and_then(|s| s.write_number(row, 5, decimal_to_f64(rec.fee)))
            .with_context(|| format!("writing row {row}"))?;
    }

    workbook.save(path).context("saving workbook")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV / JSON
// ---------------------------------------------------------------------------

fn write_csv(path: &Path, records: &[ClaimRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    if records.is_empty() {
        // serde only emits headers alongside the first record
        writer.write_record(EXPORT_COLUMNS).context("writing CSV header")?;
    }
    for rec in records {
        writer
            .serialize(rec)
            .with_context(|| format!("writing record {}", rec.id))?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_json(path: &Path, records: &[ClaimRecord]) -> Result<()> {
    let file = std::fs::File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), records)
        .context("writing JSON")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

fn write_parquet(path: &Path, records: &[ClaimRecord]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(EXPORT_COLUMNS[0], DataType::Utf8, false),
        Field::new(EXPORT_COLUMNS[1], DataType::Utf8, false),
        Field::new(EXPORT_COLUMNS[2], DataType::Float64, false),
        Field::new(EXPORT_COLUMNS[3], DataType::Utf8, false),
        Field::new(EXPORT_COLUMNS[4], DataType::UInt8, false),
        Field::new(EXPORT_COLUMNS[5], DataType::Float64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.id.as_str()))),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.claimant.to_string()),
        )),
        Arc::new(Float64Array::from_iter_values(
            records.iter().map(|r| decimal_to_f64(r.amount)),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.status.label()),
        )),
        Arc::new(UInt8Array::from_iter_values(
            records.iter().map(|r| r.documents_attached_pct),
        )),
        Arc::new(Float64Array::from_iter_values(
            records.iter().map(|r| decimal_to_f64(r.fee)),
        )),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn decimal_to_f64(value: rust_decimal::Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::{DEFAULT_FEE_RATE, generate};

    #[test]
    fn unsupported_extension_is_an_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let err = export_records(&path, &[]).unwrap_err();
        match err {
            Error::Export { path: p, reason } => {
                assert_eq!(p, path);
                assert!(reason.contains(".txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn csv_header_follows_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let records = generate(42, 5, DEFAULT_FEE_RATE).unwrap();
        export_records(&path, &records).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, EXPORT_COLUMNS);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[0][0], "1000");
        assert_eq!(&rows[0][1], "Advogado 1");
        assert_eq!(&rows[0][3], records[0].status.label());
    }

    #[test]
    fn empty_csv_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        export_records(&path, &[]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), EXPORT_COLUMNS.len());
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("report.xlsx");
        let records = generate(42, 3, DEFAULT_FEE_RATE).unwrap();
        assert!(matches!(
            export_records(&path, &records),
            Err(Error::Export { .. })
        ));
    }
}
