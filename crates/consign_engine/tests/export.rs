use std::fs;

use consign_core::ShipmentRecord;
use consign_engine::{export_filename, write_shipment_json};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn record_with_bol(bol: Option<&str>) -> ShipmentRecord {
    ShipmentRecord {
        bill_of_lading_number: bol.map(str::to_string),
        line_items_count: Some(4),
        total_gross_weight: Some(400.0),
        average_gross_weight: Some(100.0),
        ..ShipmentRecord::default()
    }
}

#[test]
fn filename_uses_bol_when_present() {
    assert_eq!(export_filename(Some("BOL123")), "shipment_BOL123.json");
}

#[test]
fn filename_falls_back_without_a_usable_bol() {
    assert_eq!(export_filename(None), "shipment_export.json");
    assert_eq!(export_filename(Some("   ")), "shipment_export.json");
    assert_eq!(export_filename(Some("///")), "shipment_export.json");
}

#[test]
fn filename_is_sanitized_and_deterministic() {
    let first = export_filename(Some("BOL/12:3 X"));
    assert_eq!(first, "shipment_BOL_12_3_X.json");
    assert_eq!(first, export_filename(Some("BOL/12:3 X")));

    // Reserved device names are patched.
    assert_eq!(export_filename(Some("CON")), "shipment_CON_.json");
}

#[test]
fn export_writes_pretty_json_that_round_trips() {
    let temp = TempDir::new().unwrap();
    let record = record_with_bol(Some("BOL123"));

    let written = write_shipment_json(temp.path(), &record).unwrap();
    assert_eq!(written.file_name().unwrap(), "shipment_BOL123.json");

    let body = fs::read_to_string(&written).unwrap();
    assert!(body.contains('\n'), "export should be pretty-printed");
    let parsed: ShipmentRecord = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn export_replaces_previous_file_for_same_bol() {
    let temp = TempDir::new().unwrap();

    let first = write_shipment_json(temp.path(), &record_with_bol(Some("BOL123"))).unwrap();
    let mut edited = record_with_bol(Some("BOL123"));
    edited.consignee_name = Some("Acme Imports".to_string());
    let second = write_shipment_json(temp.path(), &edited).unwrap();

    assert_eq!(first, second);
    let parsed: ShipmentRecord =
        serde_json::from_str(&fs::read_to_string(&second).unwrap()).unwrap();
    assert_eq!(parsed.consignee_name.as_deref(), Some("Acme Imports"));
}

#[test]
fn export_creates_missing_directory() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("exports");

    let written = write_shipment_json(&nested, &record_with_bol(None)).unwrap();
    assert!(written.exists());
    assert_eq!(written.parent().unwrap(), nested);
}

#[test]
fn failed_export_leaves_no_partial_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let result = write_shipment_json(&blocker, &record_with_bol(Some("BOL123")));
    assert!(result.is_err());
    assert!(!blocker.join("shipment_BOL123.json").exists());
}
