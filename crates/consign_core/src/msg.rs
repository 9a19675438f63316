use std::path::PathBuf;

use crate::form::FormField;
use crate::record::{SaveReceipt, ShipmentRecord};
use crate::state::Generation;

/// Preview content produced by the engine for one activation.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewContent {
    Pdf {
        page_count: u32,
        first_page_text: String,
    },
    /// Row-major cells of the first sheet; the first row is data like any
    /// other, never a promoted header.
    Sheet { rows: Vec<Vec<String>> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Files dropped on the window or chosen in the picker.
    FilesSelected(Vec<PathBuf>),
    /// User clicked a preview tab.
    TabSelected(usize),
    /// User clicked the next-page control in the PDF preview.
    NextPageClicked,
    /// User clicked the previous-page control in the PDF preview.
    PrevPageClicked,
    /// Engine finished reading the active file for preview.
    PreviewLoaded {
        generation: Generation,
        content: PreviewContent,
    },
    /// Engine could not read the active file.
    PreviewFailed {
        generation: Generation,
        message: String,
    },
    /// Engine loaded one page of the active PDF.
    PdfPageLoaded {
        generation: Generation,
        page: u32,
        text: String,
    },
    /// Extraction request settled, either way.
    ExtractionCompleted {
        result: Result<ShipmentRecord, String>,
    },
    /// User edited a form field.
    FieldEdited { field: FormField, value: String },
    /// User clicked Save.
    SaveClicked,
    /// Save request settled, either way.
    SaveCompleted {
        result: Result<SaveReceipt, String>,
    },
    /// User clicked Export.
    ExportClicked,
    /// Local export finished, either way.
    ExportCompleted { result: Result<PathBuf, String> },
    /// Auto-reset timer for the transient save status fired.
    StatusResetElapsed { token: u64 },
    /// User dismissed the blocking notice.
    NoticeDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
