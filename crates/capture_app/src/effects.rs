use std::sync::mpsc;

use capture_core::{Effect, Msg};
use capture_engine::{scan_existing_hashes, CaptureSettings, EngineEvent, EngineHandle};
use capture_logging::{capture_error, capture_info};

/// Executes core effects against the engine and feeds engine events back
/// into the message channel.
pub struct EffectRunner {
    msg_tx: mpsc::Sender<Msg>,
    settings: CaptureSettings,
    engine: Option<EngineHandle>,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, settings: CaptureSettings) -> Self {
        Self {
            msg_tx,
            settings,
            engine: None,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartCapture { save_dir } => {
                    // The scan is synchronous on the UI thread; directory
                    // listings are expected to be small.
                    match scan_existing_hashes(&save_dir) {
                        Ok(seeds) => {
                            capture_info!(
                                "scanned {:?}: {} existing images",
                                save_dir,
                                seeds.len()
                            );
                            let _ = self.msg_tx.send(Msg::ScanCompleted {
                                existing: seeds.len(),
                            });
                            self.engine = Some(EngineHandle::start(
                                self.settings.clone(),
                                save_dir,
                                seeds,
                            ));
                        }
                        Err(err) => {
                            capture_error!("scan of {:?} failed: {}", save_dir, err);
                            let _ = self.msg_tx.send(Msg::ScanFailed {
                                reason: err.to_string(),
                            });
                        }
                    }
                }
                Effect::StopCapture => {
                    if let Some(engine) = &self.engine {
                        engine.request_stop();
                    }
                }
            }
        }
    }

    /// Drain pending engine events into the message channel. Called once
    /// per UI frame.
    pub fn pump(&mut self) {
        let Some(engine) = &self.engine else {
            return;
        };
        while let Some(event) = engine.try_recv() {
            let _ = self.msg_tx.send(map_event(event));
        }
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        // The core already logs the login wait when the scan completes.
        EngineEvent::WaitingForLogin => Msg::NoOp,
        EngineEvent::Authenticated => Msg::Authenticated,
        EngineEvent::ImageSaved { url, path } => Msg::ImageSaved { url, path },
        EngineEvent::FetchFailed { url, reason } => Msg::FetchFailed { url, reason },
        EngineEvent::SaveFailed { url, reason } => Msg::SaveFailed { url, reason },
        EngineEvent::SessionFailed { reason } => Msg::SessionFailed { reason },
        EngineEvent::Stopped => Msg::CaptureStopped,
    }
}
