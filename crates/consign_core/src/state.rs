use std::path::PathBuf;

use crate::form::{FormField, ShipmentForm};
use crate::msg::PreviewContent;
use crate::record::{SaveReceipt, ShipmentRecord};
use crate::view_model::{AppViewModel, FieldView, FormPanelView, PreviewView, TabView};

/// Monotonic counter identifying one preview activation. Async completions
/// carry the generation they were issued for; a mismatch means the user has
/// moved on and the result must be dropped.
pub type Generation = u64;

/// Delay before a terminal save status falls back to `Idle`.
pub const STATUS_RESET_SECS: u64 = 3;

/// File classification, derived from the file name only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Pdf,
    Spreadsheet,
    Other,
}

impl DocKind {
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            DocKind::Pdf
        } else if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
            DocKind::Spreadsheet
        } else {
            DocKind::Other
        }
    }
}

/// One user-provided file, staged for extraction and preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub path: PathBuf,
    pub kind: DocKind,
}

impl StagedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let kind = DocKind::from_name(&name);
        Self { name, path, kind }
    }
}

/// Transient state of the remote save action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Success,
    Error,
}

/// Per-activation render state of the preview pane. Reset wholesale on
/// every activation change, before any IO result for the new file lands.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum PreviewPane {
    #[default]
    Empty,
    PdfPending,
    Pdf {
        page: u32,
        page_count: u32,
        text: String,
    },
    SheetPending,
    Sheet {
        rows: Vec<Vec<String>>,
    },
    Unsupported {
        name: String,
    },
    Failed {
        message: String,
    },
}

/// Single source of truth for the application. Mutated only through
/// [`crate::update`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    files: Vec<StagedFile>,
    active_index: usize,
    generation: Generation,
    preview: PreviewPane,
    loading: bool,
    form: Option<ShipmentForm>,
    save_status: SaveStatus,
    status_token: u64,
    save_error: Option<String>,
    receipt: Option<SaveReceipt>,
    exported_to: Option<PathBuf>,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }

    pub(crate) fn active_file(&self) -> Option<&StagedFile> {
        self.files.get(self.active_index)
    }

    /// Accepted intake: the whole set is replaced, never appended to, and
    /// every projection derived from the previous set is dropped with it.
    pub(crate) fn stage_files(&mut self, files: Vec<StagedFile>) {
        self.files = files;
        self.active_index = 0;
        self.form = None;
        self.receipt = None;
        self.exported_to = None;
        self.save_error = None;
        self.save_status = SaveStatus::Idle;
        // Invalidate any reset timer still pending from the previous record.
        self.status_token = self.status_token.wrapping_add(1);
        self.notice = None;
        self.loading = true;
        self.enter_preview();
        self.mark_dirty();
    }

    /// Tab click. Returns true when the activation actually changed.
    pub(crate) fn activate(&mut self, index: usize) -> bool {
        if index >= self.files.len() || index == self.active_index {
            return false;
        }
        self.active_index = index;
        self.enter_preview();
        self.mark_dirty();
        true
    }

    fn enter_preview(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        let pane = match self.active_file() {
            Some(file) => match file.kind {
                DocKind::Pdf => PreviewPane::PdfPending,
                DocKind::Spreadsheet => PreviewPane::SheetPending,
                DocKind::Other => PreviewPane::Unsupported {
                    name: file.name.clone(),
                },
            },
            None => PreviewPane::Empty,
        };
        self.preview = pane;
    }

    pub(crate) fn apply_preview(&mut self, generation: Generation, content: PreviewContent) {
        if generation != self.generation {
            // Stale read for a file that is no longer active.
            return;
        }
        self.preview = match content {
            PreviewContent::Pdf {
                page_count,
                first_page_text,
            } => PreviewPane::Pdf {
                page: 1,
                page_count,
                text: first_page_text,
            },
            PreviewContent::Sheet { rows } => PreviewPane::Sheet { rows },
        };
        self.mark_dirty();
    }

    pub(crate) fn fail_preview(&mut self, generation: Generation, message: String) {
        if generation != self.generation {
            return;
        }
        self.preview = PreviewPane::Failed { message };
        self.mark_dirty();
    }

    /// Bounded page navigation. Returns the page to load when the counter
    /// actually moved.
    pub(crate) fn turn_page(&mut self, delta: i64) -> Option<u32> {
        let PreviewPane::Pdf {
            page, page_count, ..
        } = &mut self.preview
        else {
            return None;
        };
        let target = (*page as i64 + delta).clamp(1, *page_count as i64) as u32;
        if target == *page {
            return None;
        }
        *page = target;
        self.mark_dirty();
        Some(target)
    }

    pub(crate) fn apply_pdf_page(&mut self, generation: Generation, page: u32, text: String) {
        if generation != self.generation {
            return;
        }
        if let PreviewPane::Pdf {
            page: current,
            text: slot,
            ..
        } = &mut self.preview
        {
            // The user may have paged on while this load was in flight.
            if *current == page {
                *slot = text;
                self.mark_dirty();
            }
        }
    }

    /// Extraction settles either way; the record is forked into editable
    /// form state field by field and not retained separately.
    pub(crate) fn settle_extraction(&mut self, result: Result<ShipmentRecord, String>) {
        self.loading = false;
        match result {
            Ok(record) => {
                self.form = Some(ShipmentForm::from_record(&record));
            }
            Err(message) => {
                self.notice = Some(message);
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn edit_field(&mut self, field: FormField, value: String) {
        if let Some(form) = &mut self.form {
            form.set(field, value);
            self.mark_dirty();
        }
    }

    /// Start a save if the form exists and the button is not gated.
    pub(crate) fn begin_save(&mut self) -> Option<ShipmentRecord> {
        if matches!(self.save_status, SaveStatus::Saving | SaveStatus::Success) {
            return None;
        }
        let record = self.form.as_ref()?.to_record();
        self.save_status = SaveStatus::Saving;
        self.save_error = None;
        self.receipt = None;
        self.mark_dirty();
        Some(record)
    }

    /// Terminal save transition; returns the token the reset timer must
    /// carry to still be current when it fires.
    pub(crate) fn settle_save(&mut self, result: Result<SaveReceipt, String>) -> u64 {
        match result {
            Ok(receipt) => {
                self.save_status = SaveStatus::Success;
                self.receipt = Some(receipt);
            }
            Err(message) => {
                self.save_status = SaveStatus::Error;
                self.save_error = Some(message);
            }
        }
        self.status_token = self.status_token.wrapping_add(1);
        self.mark_dirty();
        self.status_token
    }

    /// Token-gated auto reset: a timer armed before a superseding
    /// transition carries a stale token and is ignored.
    pub(crate) fn expire_status(&mut self, token: u64) {
        if token != self.status_token {
            return;
        }
        if matches!(self.save_status, SaveStatus::Success | SaveStatus::Error) {
            self.save_status = SaveStatus::Idle;
            self.save_error = None;
            self.receipt = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn export_record(&self) -> Option<ShipmentRecord> {
        self.form.as_ref().map(ShipmentForm::to_record)
    }

    pub(crate) fn settle_export(&mut self, result: Result<PathBuf, String>) {
        match result {
            Ok(path) => self.exported_to = Some(path),
            Err(message) => self.notice = Some(message),
        }
        self.mark_dirty();
    }

    pub(crate) fn raise_notice(&mut self, message: String) {
        self.notice = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub fn view(&self) -> AppViewModel {
        let tabs = self
            .files
            .iter()
            .enumerate()
            .map(|(index, file)| TabView {
                name: file.name.clone(),
                kind: file.kind,
                active: index == self.active_index,
            })
            .collect();

        let preview = match &self.preview {
            PreviewPane::Empty => PreviewView::Empty,
            PreviewPane::PdfPending | PreviewPane::SheetPending => PreviewView::Loading,
            PreviewPane::Pdf {
                page,
                page_count,
                text,
            } => PreviewView::Pdf {
                page: *page,
                page_count: *page_count,
                text: text.clone(),
                can_prev: *page > 1,
                can_next: *page < *page_count,
            },
            PreviewPane::Sheet { rows } => PreviewView::Sheet { rows: rows.clone() },
            PreviewPane::Unsupported { name } => PreviewView::Unsupported { name: name.clone() },
            PreviewPane::Failed { message } => PreviewView::Failed {
                message: message.clone(),
            },
        };

        let form = self.form.as_ref().map(|form| FormPanelView {
            fields: FormField::ALL
                .iter()
                .map(|&field| FieldView {
                    field,
                    label: field.label(),
                    value: form.value(field).to_string(),
                })
                .collect(),
            save_status: self.save_status,
            save_enabled: !matches!(self.save_status, SaveStatus::Saving | SaveStatus::Success),
            export_enabled: true,
            status_line: self.status_line(),
        });

        AppViewModel {
            tabs,
            preview,
            loading: self.loading,
            notice: self.notice.clone(),
            form,
            dirty: self.dirty,
        }
    }

    fn status_line(&self) -> Option<String> {
        match self.save_status {
            SaveStatus::Saving => Some("Saving…".to_string()),
            SaveStatus::Success => Some(match &self.receipt {
                Some(receipt) => format!("Saved as {}", receipt.filename),
                None => "Saved".to_string(),
            }),
            SaveStatus::Error => Some(match &self.save_error {
                Some(message) => format!("Save failed: {message}"),
                None => "Save failed".to_string(),
            }),
            SaveStatus::Idle => self
                .exported_to
                .as_ref()
                .map(|path| format!("Exported to {}", path.display())),
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
