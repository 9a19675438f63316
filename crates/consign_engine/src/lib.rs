//! Consign engine: IO pipeline and effect execution.
mod api;
mod engine;
mod export;
mod pdf;
mod sheet;
mod types;

pub use api::{ApiError, ApiFailure, ApiSettings, ReqwestShipmentApi, ShipmentApi};
pub use engine::{EngineConfig, EngineHandle};
pub use export::{export_filename, write_shipment_json, ExportError};
pub use pdf::{pdf_overview, pdf_page_text, PdfError, PdfOverview};
pub use sheet::{parse_first_sheet, SheetError};
pub use types::EngineEvent;
