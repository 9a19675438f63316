use std::path::PathBuf;

use consign_core::{Generation, PreviewContent, SaveReceipt, ShipmentRecord};

use crate::api::ApiError;
use crate::export::ExportError;

/// Results reported by the engine, drained by the shell every frame.
///
/// Preview events carry the generation of the activation that requested
/// them; staleness is decided by the core, never here.
#[derive(Debug)]
pub enum EngineEvent {
    PreviewReady {
        generation: Generation,
        content: PreviewContent,
    },
    PreviewFailed {
        generation: Generation,
        message: String,
    },
    PdfPageReady {
        generation: Generation,
        page: u32,
        text: String,
    },
    ExtractionSettled {
        result: Result<ShipmentRecord, ApiError>,
    },
    SaveSettled {
        result: Result<SaveReceipt, ApiError>,
    },
    ExportSettled {
        result: Result<PathBuf, ExportError>,
    },
    StatusResetDue {
        token: u64,
    },
}
