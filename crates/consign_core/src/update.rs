use std::path::PathBuf;

use crate::state::{AppState, DocKind, StagedFile};
use crate::{Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(paths) => {
            // The loading flag is a strict intake gate: no queuing, no
            // cancellation of the in-flight extraction.
            if state.is_loading() {
                return (state, Vec::new());
            }
            let files = stage(paths);
            if files.is_empty() {
                return (state, Vec::new());
            }
            let has_pdf = files.iter().any(|f| f.kind == DocKind::Pdf);
            let has_sheet = files.iter().any(|f| f.kind == DocKind::Spreadsheet);
            if !has_pdf || !has_sheet {
                state.raise_notice(
                    "Please provide at least one PDF bill of lading and one Excel \
                     packing list or invoice (.xlsx/.xls)."
                        .to_string(),
                );
                return (state, Vec::new());
            }
            state.stage_files(files.clone());
            let mut effects = vec![Effect::StartExtraction { files }];
            effects.extend(load_active_preview(&state));
            effects
        }
        Msg::TabSelected(index) => {
            if state.activate(index) {
                load_active_preview(&state)
            } else {
                Vec::new()
            }
        }
        Msg::NextPageClicked => turn_page(&mut state, 1),
        Msg::PrevPageClicked => turn_page(&mut state, -1),
        Msg::PreviewLoaded {
            generation,
            content,
        } => {
            state.apply_preview(generation, content);
            Vec::new()
        }
        Msg::PreviewFailed {
            generation,
            message,
        } => {
            state.fail_preview(generation, message);
            Vec::new()
        }
        Msg::PdfPageLoaded {
            generation,
            page,
            text,
        } => {
            state.apply_pdf_page(generation, page, text);
            Vec::new()
        }
        Msg::ExtractionCompleted { result } => {
            state.settle_extraction(result);
            Vec::new()
        }
        Msg::FieldEdited { field, value } => {
            state.edit_field(field, value);
            Vec::new()
        }
        Msg::SaveClicked => match state.begin_save() {
            Some(record) => vec![Effect::SaveShipment { record }],
            None => Vec::new(),
        },
        Msg::SaveCompleted { result } => {
            let token = state.settle_save(result);
            vec![Effect::ScheduleStatusReset { token }]
        }
        Msg::ExportClicked => match state.export_record() {
            Some(record) => vec![Effect::ExportShipment { record }],
            None => Vec::new(),
        },
        Msg::ExportCompleted { result } => {
            state.settle_export(result);
            Vec::new()
        }
        Msg::StatusResetElapsed { token } => {
            state.expire_status(token);
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn stage(paths: Vec<PathBuf>) -> Vec<StagedFile> {
    paths.into_iter().map(StagedFile::from_path).collect()
}

/// Preview effect for the file just activated. Unrecognized kinds render a
/// placeholder and need no IO.
fn load_active_preview(state: &AppState) -> Vec<Effect> {
    match state.active_file() {
        Some(file) if file.kind != DocKind::Other => vec![Effect::LoadPreview {
            generation: state.generation(),
            file: file.clone(),
        }],
        _ => Vec::new(),
    }
}

fn turn_page(state: &mut AppState, delta: i64) -> Vec<Effect> {
    let Some(page) = state.turn_page(delta) else {
        return Vec::new();
    };
    match state.active_file() {
        Some(file) => vec![Effect::LoadPdfPage {
            generation: state.generation(),
            path: file.path.clone(),
            page,
        }],
        None => Vec::new(),
    }
}
