use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use capture_logging::{capture_error, capture_info};

use crate::browser::WebDriverSession;
use crate::capture::{capture_loop, wait_for_auth};
use crate::fetch::ReqwestFetcher;
use crate::session::ChatSession;
use crate::settings::CaptureSettings;
use crate::store::ImageStore;
use crate::types::EngineEvent;

/// Handle to the single background worker of one capture run.
///
/// The worker owns the browser session, the HTTP client and the dedup
/// store end-to-end; the UI side only sets the stop flag and drains
/// events. There is no cancellation beyond the flag.
pub struct EngineHandle {
    stop: Arc<AtomicBool>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Launch the worker. `seeds` is the dedup index built by the
    /// startup directory scan.
    pub fn start(settings: CaptureSettings, save_dir: PathBuf, seeds: HashSet<String>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (event_tx, event_rx) = mpsc::channel();
        let flag = stop.clone();

        thread::spawn(move || run_worker(settings, save_dir, seeds, flag, event_tx));

        Self { stop, event_rx }
    }

    /// Cooperative stop: the loop exits at its next flag check.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

fn run_worker(
    settings: CaptureSettings,
    save_dir: PathBuf,
    seeds: HashSet<String>,
    stop: Arc<AtomicBool>,
    events: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            capture_error!("failed to start worker runtime: {err}");
            let _ = events.send(EngineEvent::SessionFailed {
                reason: err.to_string(),
            });
            return;
        }
    };

    runtime.block_on(async {
        let mut session = match WebDriverSession::connect(&settings).await {
            Ok(session) => session,
            Err(err) => {
                capture_error!("webdriver connect failed: {err}");
                let _ = events.send(EngineEvent::SessionFailed {
                    reason: err.to_string(),
                });
                return;
            }
        };

        if let Err(err) = session.goto_chat().await {
            capture_error!("navigation to {} failed: {err}", settings.chat_url);
            let _ = events.send(EngineEvent::SessionFailed {
                reason: err.to_string(),
            });
            return;
        }

        let _ = events.send(EngineEvent::WaitingForLogin);
        if !wait_for_auth(&mut session, &settings, &stop).await {
            capture_info!("stop requested while waiting for login");
            let _ = events.send(EngineEvent::Stopped);
            return;
        }
        let _ = events.send(EngineEvent::Authenticated);

        let cookies = match session.export_cookies().await {
            Ok(cookies) => cookies,
            Err(err) => {
                capture_error!("cookie export failed: {err}");
                let _ = events.send(EngineEvent::SessionFailed {
                    reason: err.to_string(),
                });
                return;
            }
        };
        let fetcher = match ReqwestFetcher::with_cookies(&cookies) {
            Ok(fetcher) => fetcher,
            Err(err) => {
                capture_error!("http client setup failed: {err}");
                let _ = events.send(EngineEvent::SessionFailed {
                    reason: err.to_string(),
                });
                return;
            }
        };

        if let Err(err) = session.install_observer().await {
            capture_error!("observer injection failed: {err}");
            let _ = events.send(EngineEvent::SessionFailed {
                reason: err.to_string(),
            });
            return;
        }

        let mut store = ImageStore::new(save_dir, seeds);
        capture_loop(&mut session, &fetcher, &mut store, &settings, &stop, &events).await;

        if let Err(err) = session.close().await {
            capture_error!("webdriver session close failed: {err}");
        }
        let _ = events.send(EngineEvent::Stopped);
    });
}
