use std::sync::mpsc;
use std::time::Duration;

use capture_core::{update, AppState, Msg};
use capture_engine::CaptureSettings;
use eframe::egui;

use crate::effects::EffectRunner;

/// The control panel: a thin event-driven shell around the core state
/// machine. All capture work happens on the engine's worker thread; this
/// thread only dispatches messages and renders the view model.
pub struct CaptureApp {
    state: AppState,
    msg_rx: mpsc::Receiver<Msg>,
    runner: EffectRunner,
}

impl CaptureApp {
    pub fn new(settings: CaptureSettings) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(msg_tx, settings);
        Self {
            state: AppState::new(),
            msg_rx,
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }
}

impl eframe::App for CaptureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.runner.pump();
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }

        let view = self.state.view();
        let mut pending: Vec<Msg> = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Chat Image Capture");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Save directory:");
                let mut dir = view.save_dir.clone();
                if ui.text_edit_singleline(&mut dir).changed() {
                    pending.push(Msg::DirChanged(dir));
                }
                if ui.button("Browse…").clicked() {
                    if let Some(path) = rfd::FileDialog::new().pick_folder() {
                        pending.push(Msg::DirChanged(path.display().to_string()));
                    }
                }
            });

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(view.can_start, egui::Button::new("Start capture"))
                    .clicked()
                {
                    pending.push(Msg::StartClicked);
                }
                // Stop stays enabled; a stray stop is reported as a no-op.
                if ui.button("Stop capture").clicked() {
                    pending.push(Msg::StopClicked);
                }
            });

            ui.add_space(4.0);
            ui.label(format!("Images in folder: {}", view.saved_count));
            ui.label(view.status_line());
            ui.separator();

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for line in &view.log {
                        ui.monospace(line.as_str());
                    }
                });
        });

        for msg in pending {
            self.dispatch(msg);
        }

        // Keep draining engine events even without user input.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
