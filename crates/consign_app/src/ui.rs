use consign_core::{AppViewModel, FormPanelView, Msg, PreviewView, SaveStatus, TabView};
use eframe::egui::{self, Align2, Color32, RichText};

/// Renders one frame from the view model and returns the messages produced
/// by the user's interactions. Rendering never touches state directly.
pub fn render(ctx: &egui::Context, view: &AppViewModel) -> Vec<Msg> {
    let mut msgs = Vec::new();

    if let Some(form) = &view.form {
        egui::SidePanel::right("shipment_form")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| form_panel(ui, form, &mut msgs));
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        header(ui, view, &mut msgs);
        ui.separator();
        if view.tabs.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("Drop shipment documents anywhere in this window to begin.");
            });
        } else {
            tab_strip(ui, &view.tabs, &mut msgs);
            ui.separator();
            preview_pane(ui, &view.preview, &mut msgs);
        }
    });

    if let Some(notice) = &view.notice {
        notice_window(ctx, notice, &mut msgs);
    }

    msgs
}

fn header(ui: &mut egui::Ui, view: &AppViewModel, msgs: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        ui.heading("Consign");
        ui.separator();
        if view.loading {
            ui.spinner();
            ui.label("Extracting shipment data…");
        } else {
            ui.label("Drop a PDF bill of lading and an Excel packing list, or");
            if ui.button("Select files…").clicked() {
                if let Some(paths) = rfd::FileDialog::new()
                    .add_filter("Shipment documents", &["pdf", "xlsx", "xls"])
                    .pick_files()
                {
                    msgs.push(Msg::FilesSelected(paths));
                }
            }
        }
    });
}

fn tab_strip(ui: &mut egui::Ui, tabs: &[TabView], msgs: &mut Vec<Msg>) {
    ui.horizontal_wrapped(|ui| {
        for (index, tab) in tabs.iter().enumerate() {
            if ui.selectable_label(tab.active, &tab.name).clicked() && !tab.active {
                msgs.push(Msg::TabSelected(index));
            }
        }
    });
}

fn preview_pane(ui: &mut egui::Ui, preview: &PreviewView, msgs: &mut Vec<Msg>) {
    match preview {
        PreviewView::Empty => {}
        PreviewView::Loading => {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
        }
        PreviewView::Pdf {
            page,
            page_count,
            text,
            can_prev,
            can_next,
        } => {
            ui.horizontal(|ui| {
                if ui.add_enabled(*can_prev, egui::Button::new("◀")).clicked() {
                    msgs.push(Msg::PrevPageClicked);
                }
                ui.label(format!("Page {page} / {page_count}"));
                if ui.add_enabled(*can_next, egui::Button::new("▶")).clicked() {
                    msgs.push(Msg::NextPageClicked);
                }
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(RichText::new(text).monospace());
                });
        }
        PreviewView::Sheet { rows } => {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::Grid::new("sheet_preview").striped(true).show(ui, |ui| {
                        for row in rows {
                            for cell in row {
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });
                });
        }
        PreviewView::Unsupported { name } => {
            ui.label(format!("No preview available for {name}"));
        }
        PreviewView::Failed { message } => {
            ui.colored_label(Color32::LIGHT_RED, message);
        }
    }
}

fn form_panel(ui: &mut egui::Ui, form: &FormPanelView, msgs: &mut Vec<Msg>) {
    ui.heading("Extracted shipment");
    ui.separator();
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("shipment_fields")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    for field in &form.fields {
                        ui.label(field.label);
                        let mut buffer = field.value.clone();
                        if ui.text_edit_singleline(&mut buffer).changed() {
                            msgs.push(Msg::FieldEdited {
                                field: field.field,
                                value: buffer,
                            });
                        }
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let save = egui::Button::new(save_label(form.save_status));
                if ui.add_enabled(form.save_enabled, save).clicked() {
                    msgs.push(Msg::SaveClicked);
                }
                let export = egui::Button::new("Export JSON");
                if ui.add_enabled(form.export_enabled, export).clicked() {
                    msgs.push(Msg::ExportClicked);
                }
            });

            if let Some(line) = &form.status_line {
                ui.add_space(4.0);
                ui.label(status_text(form.save_status, line));
            }
        });
}

fn save_label(status: SaveStatus) -> &'static str {
    match status {
        SaveStatus::Saving => "Saving…",
        SaveStatus::Success => "Saved ✓",
        SaveStatus::Idle | SaveStatus::Error => "Save",
    }
}

fn status_text(status: SaveStatus, line: &str) -> RichText {
    match status {
        SaveStatus::Error => RichText::new(line).color(Color32::LIGHT_RED),
        SaveStatus::Success => RichText::new(line).color(Color32::LIGHT_GREEN),
        SaveStatus::Idle | SaveStatus::Saving => RichText::new(line),
    }
}

fn notice_window(ctx: &egui::Context, notice: &str, msgs: &mut Vec<Msg>) {
    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(notice);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    msgs.push(Msg::NoticeDismissed);
                }
            });
        });
}
