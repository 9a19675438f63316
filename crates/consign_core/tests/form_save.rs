use std::path::PathBuf;
use std::sync::Once;

use consign_core::{
    update, AppState, Effect, FormField, Msg, SaveReceipt, SaveStatus, ShipmentRecord,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(consign_logging::initialize_for_tests);
}

/// Server-derived averages deliberately disagree with total ÷ count so a
/// client-side recomputation would be caught.
fn server_record() -> ShipmentRecord {
    ShipmentRecord {
        bill_of_lading_number: Some("BOL123".to_string()),
        container_number: Some("MSKU1234567".to_string()),
        consignee_name: Some("Acme Imports".to_string()),
        consignee_address: None,
        date_of_export: Some("2024-01-12".to_string()),
        line_items_count: Some(4),
        total_gross_weight: Some(400.0),
        total_invoice_amount: Some(1000.0),
        average_gross_weight: Some(95.5),
        average_price: Some(240.25),
    }
}

fn extracted() -> AppState {
    let paths = vec![PathBuf::from("bol.pdf"), PathBuf::from("packing.xlsx")];
    let (state, _) = update(AppState::new(), Msg::FilesSelected(paths));
    update(
        state,
        Msg::ExtractionCompleted {
            result: Ok(server_record()),
        },
    )
    .0
}

fn field_value(state: &AppState, field: FormField) -> String {
    state
        .view()
        .form
        .expect("form present")
        .fields
        .into_iter()
        .find(|f| f.field == field)
        .expect("field present")
        .value
}

fn reset_token(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScheduleStatusReset { token } => Some(*token),
            _ => None,
        })
        .expect("reset effect")
}

#[test]
fn extraction_result_populates_form_with_server_derived_averages() {
    init_logging();
    let state = extracted();

    let view = state.view();
    assert!(!view.loading);
    assert!(view.notice.is_none());

    // 400 / 4 would be 100; the form must show the server's 95.5.
    assert_eq!(field_value(&state, FormField::AverageGrossWeight), "95.5");
    assert_eq!(field_value(&state, FormField::AveragePrice), "240.25");
    // Null source fields land as empty buffers, not as omissions.
    assert_eq!(field_value(&state, FormField::ConsigneeAddress), "");
}

#[test]
fn extraction_failure_raises_notice_and_leaves_record_unset() {
    init_logging();
    let paths = vec![PathBuf::from("bol.pdf"), PathBuf::from("packing.xlsx")];
    let (state, _) = update(AppState::new(), Msg::FilesSelected(paths));

    let (state, effects) = update(
        state,
        Msg::ExtractionCompleted {
            result: Err("extraction endpoint returned 500".to_string()),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.loading);
    assert!(view.form.is_none());
    assert!(view.notice.unwrap().contains("500"));
}

#[test]
fn save_walks_idle_saving_success_then_auto_resets() {
    init_logging();
    let state = extracted();
    assert_eq!(state.view().form.unwrap().save_status, SaveStatus::Idle);

    let (state, effects) = update(state, Msg::SaveClicked);
    assert!(
        matches!(&effects[..], [Effect::SaveShipment { record }]
            if record.bill_of_lading_number.as_deref() == Some("BOL123"))
    );
    let panel = state.view().form.unwrap();
    assert_eq!(panel.save_status, SaveStatus::Saving);
    assert!(!panel.save_enabled);

    let (state, effects) = update(
        state,
        Msg::SaveCompleted {
            result: Ok(SaveReceipt {
                message: "Data saved successfully".to_string(),
                filename: "shipment_BOL123_20240112.json".to_string(),
            }),
        },
    );
    let token = reset_token(&effects);
    let panel = state.view().form.unwrap();
    assert_eq!(panel.save_status, SaveStatus::Success);
    // Disabled right after success to block a duplicate submit.
    assert!(!panel.save_enabled);
    assert!(panel.status_line.unwrap().contains("shipment_BOL123"));

    let (state, effects) = update(state, Msg::StatusResetElapsed { token });
    assert!(effects.is_empty());
    let panel = state.view().form.unwrap();
    assert_eq!(panel.save_status, SaveStatus::Idle);
    assert!(panel.save_enabled);
}

#[test]
fn failed_save_keeps_form_values_and_reenables_after_reset() {
    init_logging();
    let state = extracted();
    let (state, _) = update(
        state,
        Msg::FieldEdited {
            field: FormField::ConsigneeName,
            value: "Edited Consignee".to_string(),
        },
    );

    let (state, _) = update(state, Msg::SaveClicked);
    let (state, effects) = update(
        state,
        Msg::SaveCompleted {
            result: Err("connection refused".to_string()),
        },
    );
    let token = reset_token(&effects);

    let panel = state.view().form.unwrap();
    assert_eq!(panel.save_status, SaveStatus::Error);
    // Errors re-enable immediately; only success gates resubmission.
    assert!(panel.save_enabled);
    assert_eq!(
        field_value(&state, FormField::ConsigneeName),
        "Edited Consignee"
    );

    let (state, _) = update(state, Msg::StatusResetElapsed { token });
    assert_eq!(state.view().form.unwrap().save_status, SaveStatus::Idle);
}

#[test]
fn stale_status_reset_is_ignored() {
    init_logging();
    let state = extracted();

    // First save fails; its reset timer is armed with token A.
    let (state, _) = update(state, Msg::SaveClicked);
    let (state, effects) = update(
        state,
        Msg::SaveCompleted {
            result: Err("timeout".to_string()),
        },
    );
    let stale = reset_token(&effects);

    // Second save succeeds before timer A fires; token B supersedes A.
    let (state, _) = update(state, Msg::SaveClicked);
    let (state, effects) = update(
        state,
        Msg::SaveCompleted {
            result: Ok(SaveReceipt {
                message: "ok".to_string(),
                filename: "shipment_BOL123.json".to_string(),
            }),
        },
    );
    let current = reset_token(&effects);
    assert_ne!(stale, current);

    let (state, _) = update(state, Msg::StatusResetElapsed { token: stale });
    assert_eq!(state.view().form.unwrap().save_status, SaveStatus::Success);

    let (state, _) = update(state, Msg::StatusResetElapsed { token: current });
    assert_eq!(state.view().form.unwrap().save_status, SaveStatus::Idle);
}

#[test]
fn save_clicked_while_saving_is_a_noop() {
    init_logging();
    let state = extracted();
    let (state, _) = update(state, Msg::SaveClicked);

    let (next, effects) = update(state.clone(), Msg::SaveClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn export_serializes_current_edited_values() {
    init_logging();
    let state = extracted();
    let (state, _) = update(
        state,
        Msg::FieldEdited {
            field: FormField::TotalInvoiceAmount,
            value: "999.5".to_string(),
        },
    );

    let (_, effects) = update(state, Msg::ExportClicked);

    match &effects[..] {
        [Effect::ExportShipment { record }] => {
            assert_eq!(record.total_invoice_amount, Some(999.5));
            assert_eq!(record.bill_of_lading_number.as_deref(), Some("BOL123"));
            // The server-derived average passes through untouched.
            assert_eq!(record.average_gross_weight, Some(95.5));
        }
        other => panic!("expected export effect, got {other:?}"),
    }
}

#[test]
fn export_outcome_is_surfaced() {
    init_logging();
    let state = extracted();

    let (state, _) = update(
        state,
        Msg::ExportCompleted {
            result: Ok(PathBuf::from("exports/shipment_BOL123.json")),
        },
    );
    let line = state.view().form.unwrap().status_line.unwrap();
    assert!(line.contains("shipment_BOL123.json"));

    let (state, _) = update(
        state,
        Msg::ExportCompleted {
            result: Err("disk full".to_string()),
        },
    );
    assert!(state.view().notice.unwrap().contains("disk full"));
}

#[test]
fn export_without_a_record_is_a_noop() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = update(state.clone(), Msg::ExportClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
