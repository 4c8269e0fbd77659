use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use capture_logging::{capture_debug, capture_info, capture_warn};

use crate::fetch::Fetcher;
use crate::hash::content_hash;
use crate::session::ChatSession;
use crate::settings::CaptureSettings;
use crate::store::ImageStore;
use crate::types::EngineEvent;

/// Poll for the login-completion element until it appears or stop is
/// requested. Returns `false` when stopped before login.
///
/// Probe errors mean the page context is not ready yet and count as
/// "not authenticated"; only the stop flag ends the wait early.
pub async fn wait_for_auth<S: ChatSession>(
    session: &mut S,
    settings: &CaptureSettings,
    stop: &AtomicBool,
) -> bool {
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        if let Ok(true) = session.is_authenticated().await {
            return true;
        }
        tokio::time::sleep(settings.auth_poll_interval).await;
    }
}

/// Steady-state polling cycle: drain newly-observed URLs, download each
/// one at most once, sleep, repeat until the stop flag is observed.
///
/// A drain failure (observer not installed yet, page navigating) is an
/// empty batch, never an error. Termination is bounded by one poll
/// interval plus whatever download is in flight.
pub async fn capture_loop<S: ChatSession>(
    session: &mut S,
    fetcher: &dyn Fetcher,
    store: &mut ImageStore,
    settings: &CaptureSettings,
    stop: &AtomicBool,
    events: &mpsc::Sender<EngineEvent>,
) {
    let mut seen_urls: HashSet<String> = HashSet::new();
    loop {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        let batch = session.drain_new_image_urls().await.unwrap_or_default();
        for url in batch {
            // URLs are not a stable identity across runs, only within
            // one; insertion happens before the download so a failed
            // fetch is never retried.
            if !seen_urls.insert(url.clone()) {
                continue;
            }
            download_one(&url, fetcher, store, events).await;
        }
        tokio::time::sleep(settings.poll_interval).await;
    }
}

/// Fetch one URL, hash the bytes, persist if the content is new.
///
/// Every failure here is terminal for this one URL and reported as an
/// event; the loop never crashes from a single bad fetch.
async fn download_one(
    url: &str,
    fetcher: &dyn Fetcher,
    store: &mut ImageStore,
    events: &mpsc::Sender<EngineEvent>,
) {
    let bytes = match fetcher.fetch(url).await {
        Ok(bytes) => bytes,
        Err(err) => {
            capture_warn!("download failed for {url}: {err}");
            let _ = events.send(EngineEvent::FetchFailed {
                url: url.to_string(),
                reason: err.to_string(),
            });
            return;
        }
    };

    let hash = content_hash(&bytes);
    if store.contains(&hash) {
        // Same content re-served under another URL, or a timing race;
        // either way it is already on disk.
        capture_debug!("duplicate content {hash} from {url}");
        return;
    }

    match store.save(&hash, &bytes) {
        Ok(path) => {
            capture_info!("saved {}", path.display());
            let _ = events.send(EngineEvent::ImageSaved {
                url: url.to_string(),
                path,
            });
        }
        Err(err) => {
            capture_warn!("save failed for {url}: {err}");
            let _ = events.send(EngineEvent::SaveFailed {
                url: url.to_string(),
                reason: err.to_string(),
            });
        }
    }
}
