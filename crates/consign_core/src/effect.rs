use std::path::PathBuf;

use crate::record::ShipmentRecord;
use crate::state::{Generation, StagedFile};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// POST the staged file set to the extraction endpoint.
    StartExtraction { files: Vec<StagedFile> },
    /// Read the newly activated file and produce preview content.
    LoadPreview {
        generation: Generation,
        file: StagedFile,
    },
    /// Load one page of the active PDF.
    LoadPdfPage {
        generation: Generation,
        path: PathBuf,
        page: u32,
    },
    /// POST the edited record to the save endpoint.
    SaveShipment { record: ShipmentRecord },
    /// Write the edited record to a local JSON file.
    ExportShipment { record: ShipmentRecord },
    /// Arm the auto-reset timer for the transient save status.
    ScheduleStatusReset { token: u64 },
}
