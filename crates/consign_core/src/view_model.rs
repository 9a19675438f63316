use crate::form::FormField;
use crate::state::{DocKind, SaveStatus};

/// Immutable snapshot handed to the render layer on each change. The shell
/// never reaches back into [`crate::AppState`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub tabs: Vec<TabView>,
    pub preview: PreviewView,
    pub loading: bool,
    /// Blocking message; rendered modally until dismissed.
    pub notice: Option<String>,
    /// Present once an extraction has succeeded.
    pub form: Option<FormPanelView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub name: String,
    pub kind: DocKind,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PreviewView {
    #[default]
    Empty,
    /// A read for the active file is pending.
    Loading,
    Pdf {
        page: u32,
        page_count: u32,
        text: String,
        can_prev: bool,
        can_next: bool,
    },
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPanelView {
    pub fields: Vec<FieldView>,
    pub save_status: SaveStatus,
    pub save_enabled: bool,
    pub export_enabled: bool,
    /// Inline transient line: saving/saved/failed, or the last export path.
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: FormField,
    pub label: &'static str,
    pub value: String,
}
