use std::path::PathBuf;
use std::time::Duration;

use consign_core::{update, AppState, Msg};
use consign_engine::EngineConfig;
use eframe::egui;

use crate::effects::EffectRunner;
use crate::ui;

pub struct ConsignApp {
    state: AppState,
    runner: EffectRunner,
}

impl ConsignApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let export_dir = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("exports");
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(EngineConfig::default_with_export(export_dir)),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }
}

impl eframe::App for ConsignApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for msg in self.runner.pump() {
            self.dispatch(msg);
        }

        let dropped: Vec<PathBuf> = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.dispatch(Msg::FilesSelected(dropped));
        }

        let view = self.state.view();
        for msg in ui::render(ctx, &view) {
            self.dispatch(msg);
        }

        if self.state.consume_dirty() {
            ctx.request_repaint();
        }
        // Engine events arrive on a plain channel; keep polling while idle.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
