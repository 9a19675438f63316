use consign_core::{Effect, Msg};
use consign_engine::{EngineConfig, EngineEvent, EngineHandle};
use consign_logging::{app_info, app_warn};

/// Bridges the pure core to the engine: effects out, events back in as
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: EngineHandle::new(config),
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartExtraction { files } => {
                    app_info!("extraction started with {} file(s)", files.len());
                    self.engine.extract(files);
                }
                Effect::LoadPreview { generation, file } => {
                    self.engine.preview(generation, file);
                }
                Effect::LoadPdfPage {
                    generation,
                    path,
                    page,
                } => {
                    self.engine.pdf_page(generation, path, page);
                }
                Effect::SaveShipment { record } => {
                    app_info!("saving shipment record");
                    self.engine.save(record);
                }
                Effect::ExportShipment { record } => {
                    self.engine.export(record);
                }
                Effect::ScheduleStatusReset { token } => {
                    self.engine.arm_status_reset(token);
                }
            }
        }
    }

    /// Drain engine events into core messages; called once per frame.
    pub fn pump(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PreviewReady {
            generation,
            content,
        } => Msg::PreviewLoaded {
            generation,
            content,
        },
        EngineEvent::PreviewFailed {
            generation,
            message,
        } => {
            app_warn!("preview failed: {message}");
            Msg::PreviewFailed {
                generation,
                message,
            }
        }
        EngineEvent::PdfPageReady {
            generation,
            page,
            text,
        } => Msg::PdfPageLoaded {
            generation,
            page,
            text,
        },
        EngineEvent::ExtractionSettled { result } => Msg::ExtractionCompleted {
            result: result.map_err(|err| {
                app_warn!("extraction failed: {err}");
                format!("Extraction failed: {err}")
            }),
        },
        EngineEvent::SaveSettled { result } => Msg::SaveCompleted {
            result: result.map_err(|err| {
                app_warn!("save failed: {err}");
                err.to_string()
            }),
        },
        EngineEvent::ExportSettled { result } => Msg::ExportCompleted {
            result: result.map_err(|err| {
                app_warn!("export failed: {err}");
                format!("Export failed: {err}")
            }),
        },
        EngineEvent::StatusResetDue { token } => Msg::StatusResetElapsed { token },
    }
}
