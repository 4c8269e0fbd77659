use std::path::PathBuf;

use crate::{AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DirChanged(text) => {
            state.set_save_dir(text);
            Vec::new()
        }
        Msg::StartClicked => {
            if !state.session().can_start() {
                return (state, Vec::new());
            }
            let dir = state.save_dir().trim().to_string();
            if dir.is_empty() {
                state.push_log("select a save directory first");
                return (state, Vec::new());
            }
            state.begin_scan();
            vec![Effect::StartCapture {
                save_dir: PathBuf::from(dir),
            }]
        }
        Msg::ScanCompleted { existing } => {
            state.seed_count(existing);
            state.push_log(format!(
                "scanned directory, {existing} images already present"
            ));
            state.wait_for_auth();
            state.push_log("waiting for chat login...");
            Vec::new()
        }
        Msg::ScanFailed { reason } => {
            state.push_log(format!("directory scan failed: {reason}"));
            state.finish_run();
            Vec::new()
        }
        Msg::Authenticated => {
            if state.session() == SessionState::WaitingForAuth {
                state.begin_capture();
                state.push_log("logged in, capturing images");
            }
            Vec::new()
        }
        Msg::ImageSaved { url: _, path } => {
            state.record_saved();
            state.push_log(format!("saved: {}", path.display()));
            Vec::new()
        }
        Msg::FetchFailed { url, reason } => {
            state.push_log(format!("download failed: {url} ({reason})"));
            Vec::new()
        }
        Msg::SaveFailed { url, reason } => {
            state.push_log(format!("save failed: {url} ({reason})"));
            Vec::new()
        }
        Msg::SessionFailed { reason } => {
            state.push_log(format!("browser session failed: {reason}"));
            state.finish_run();
            Vec::new()
        }
        Msg::StopClicked => {
            if state.session().is_active() {
                state.push_log("stop requested");
                vec![Effect::StopCapture]
            } else {
                // Stop with no active run is a reported no-op.
                state.push_log("no capture in progress");
                Vec::new()
            }
        }
        Msg::CaptureStopped => {
            state.finish_run();
            state.push_log("capture stopped");
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
