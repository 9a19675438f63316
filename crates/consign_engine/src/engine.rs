use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use consign_core::{
    DocKind, Generation, PreviewContent, ShipmentRecord, StagedFile, STATUS_RESET_SECS,
};

use crate::api::{ApiSettings, ReqwestShipmentApi, ShipmentApi};
use crate::types::EngineEvent;
use crate::{export, pdf, sheet};

enum EngineCommand {
    Extract {
        files: Vec<StagedFile>,
    },
    Preview {
        generation: Generation,
        file: StagedFile,
    },
    PdfPage {
        generation: Generation,
        path: PathBuf,
        page: u32,
    },
    Save {
        record: ShipmentRecord,
    },
    Export {
        record: ShipmentRecord,
    },
    ArmStatusReset {
        token: u64,
    },
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api: ApiSettings,
    pub export_dir: PathBuf,
    pub status_reset_delay: Duration,
}

impl EngineConfig {
    pub fn default_with_export(export_dir: PathBuf) -> Self {
        Self {
            api: ApiSettings::from_env(),
            export_dir,
            status_reset_delay: Duration::from_secs(STATUS_RESET_SECS),
        }
    }
}

/// Command/event bridge to the IO thread. Commands enqueue and return
/// immediately; results surface through [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let api = Arc::new(ReqwestShipmentApi::new(config.api).expect("http client"));
            let export_dir = config.export_dir;
            let reset_delay = config.status_reset_delay;

            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                let export_dir = export_dir.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, &export_dir, reset_delay, event_tx)
                        .await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn extract(&self, files: Vec<StagedFile>) {
        let _ = self.cmd_tx.send(EngineCommand::Extract { files });
    }

    pub fn preview(&self, generation: Generation, file: StagedFile) {
        let _ = self.cmd_tx.send(EngineCommand::Preview { generation, file });
    }

    pub fn pdf_page(&self, generation: Generation, path: PathBuf, page: u32) {
        let _ = self.cmd_tx.send(EngineCommand::PdfPage {
            generation,
            path,
            page,
        });
    }

    pub fn save(&self, record: ShipmentRecord) {
        let _ = self.cmd_tx.send(EngineCommand::Save { record });
    }

    pub fn export(&self, record: ShipmentRecord) {
        let _ = self.cmd_tx.send(EngineCommand::Export { record });
    }

    pub fn arm_status_reset(&self, token: u64) {
        let _ = self.cmd_tx.send(EngineCommand::ArmStatusReset { token });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn ShipmentApi,
    command: EngineCommand,
    export_dir: &Path,
    reset_delay: Duration,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Extract { files } => {
            let result = api.extract(&files).await;
            if let Err(err) = &result {
                log::warn!("extraction failed: {err}");
            }
            let _ = event_tx.send(EngineEvent::ExtractionSettled { result });
        }
        EngineCommand::Preview { generation, file } => {
            let event = match load_preview(&file).await {
                Ok(content) => EngineEvent::PreviewReady {
                    generation,
                    content,
                },
                Err(message) => {
                    log::warn!("preview of {} failed: {message}", file.name);
                    EngineEvent::PreviewFailed {
                        generation,
                        message,
                    }
                }
            };
            let _ = event_tx.send(event);
        }
        EngineCommand::PdfPage {
            generation,
            path,
            page,
        } => {
            let event = match load_pdf_page(&path, page).await {
                Ok(text) => EngineEvent::PdfPageReady {
                    generation,
                    page,
                    text,
                },
                Err(message) => EngineEvent::PreviewFailed {
                    generation,
                    message,
                },
            };
            let _ = event_tx.send(event);
        }
        EngineCommand::Save { record } => {
            let result = api.save(&record).await;
            if let Err(err) = &result {
                log::warn!("save failed: {err}");
            }
            let _ = event_tx.send(EngineEvent::SaveSettled { result });
        }
        EngineCommand::Export { record } => {
            let result = export::write_shipment_json(export_dir, &record);
            let _ = event_tx.send(EngineEvent::ExportSettled { result });
        }
        EngineCommand::ArmStatusReset { token } => {
            tokio::time::sleep(reset_delay).await;
            let _ = event_tx.send(EngineEvent::StatusResetDue { token });
        }
    }
}

async fn load_preview(file: &StagedFile) -> Result<PreviewContent, String> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|err| format!("failed to read {}: {err}", file.name))?;
    match file.kind {
        DocKind::Pdf => {
            let overview = pdf::pdf_overview(&bytes).map_err(|err| err.to_string())?;
            Ok(PreviewContent::Pdf {
                page_count: overview.page_count,
                first_page_text: overview.first_page_text,
            })
        }
        DocKind::Spreadsheet => {
            let rows = sheet::parse_first_sheet(&bytes).map_err(|err| err.to_string())?;
            Ok(PreviewContent::Sheet { rows })
        }
        DocKind::Other => Err(format!("no preview for {}", file.name)),
    }
}

async fn load_pdf_page(path: &Path, page: u32) -> Result<String, String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| err.to_string())?;
    pdf::pdf_page_text(&bytes, page).map_err(|err| err.to_string())
}
