//! End-to-end: store → filter → reports → export.

use std::fs::File;

use parquet::file::reader::{FileReader, SerializedFileReader};
use rust_decimal_macros::dec;

use sapre_dashboard::data::export::export_records;
use sapre_dashboard::data::filter::{FilterSpec, apply};
use sapre_dashboard::data::model::EXPORT_COLUMNS;
use sapre_dashboard::data::report::{group_by_claimant_fee, group_by_status, incomplete, summary};
use sapre_dashboard::data::store::{DEFAULT_FEE_RATE, RecordStore};

fn seeded_store() -> RecordStore {
    RecordStore::new(42, 50, DEFAULT_FEE_RATE).unwrap()
}

#[test]
fn dashboard_views_agree_with_each_other() {
    let mut store = seeded_store();
    let records = store.records().to_vec();
    let view = apply(&records, &FilterSpec::for_records(&records));

    let s = summary(&view);
    let by_status = group_by_status(&view);
    let fees = group_by_claimant_fee(&view);

    assert_eq!(by_status.values().map(|g| g.count).sum::<usize>(), s.count);
    assert_eq!(by_status.values().map(|g| g.total_amount).sum::<rust_decimal::Decimal>(), s.total_amount);
    assert_eq!(fees.values().copied().sum::<rust_decimal::Decimal>(), s.total_fee);
    assert_eq!(s.total_fee, dec!(0.05) * s.total_amount);
    assert!(incomplete(&view).iter().all(|r| r.documents_attached_pct < 100));
}

#[test]
fn narrowing_to_one_claimant() {
    let mut store = seeded_store();
    let records = store.records().to_vec();
    let mut spec = FilterSpec {
        claimants: Some(Default::default()),
        ..FilterSpec::default()
    };
    spec.toggle_claimant(records[0].claimant);

    let view = apply(&records, &spec);
    assert_eq!(view.len(), 5);
    assert!(view.iter().all(|r| r.claimant == records[0].claimant));
    assert_eq!(group_by_claimant_fee(&view).len(), 1);
}

#[test]
fn empty_view_reports_zero() {
    let mut store = seeded_store();
    let records = store.records().to_vec();
    let spec = FilterSpec {
        docs_min: 101,
        ..FilterSpec::default()
    };
    let view = apply(&records, &spec);
    assert!(view.is_empty());

    let s = summary(&view);
    assert_eq!(s.count, 0);
    assert_eq!(s.avg_docs_pct, 0.0);
    assert!(group_by_status(&view).is_empty());
    assert!(incomplete(&view).is_empty());
}

#[test]
fn json_export_keeps_column_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relatorio.json");
    let mut store = seeded_store();
    let records = store.records().to_vec();
    export_records(&path, &records[..3]).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let first = text.find('{').unwrap();
    let object = &text[first..text[first..].find('}').unwrap() + first];
    let positions: Vec<usize> = EXPORT_COLUMNS
        .iter()
        .map(|c| object.find(&format!("\"{c}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
    assert_eq!(parsed[0]["Número"], "1000");
}

#[test]
fn parquet_export_has_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relatorio.parquet");
    let mut store = seeded_store();
    let records = store.records().to_vec();
    export_records(&path, &records).unwrap();

    let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
    let meta = reader.metadata();
    assert_eq!(meta.file_metadata().num_rows(), 50);
    let names: Vec<&str> = meta
        .file_metadata()
        .schema_descr()
        .columns()
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(names, EXPORT_COLUMNS);
}

#[test]
fn xlsx_export_overwrites_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relatorio_precatorios.xlsx");
    let mut store = seeded_store();
    let records = store.records().to_vec();

    export_records(&path, &records).unwrap();
    let full = std::fs::metadata(&path).unwrap().len();
    export_records(&path, &records[..1]).unwrap();
    let small = std::fs::metadata(&path).unwrap().len();

    assert!(small > 0);
    assert!(small < full);
}
