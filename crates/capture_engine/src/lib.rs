//! Capture engine: browser session, image fetching, dedup store and the
//! background capture loop.
mod browser;
mod capture;
mod engine;
mod fetch;
mod hash;
mod scan;
mod session;
mod settings;
mod store;
mod types;

pub use browser::WebDriverSession;
pub use capture::{capture_loop, wait_for_auth};
pub use engine::EngineHandle;
pub use fetch::{FetchError, Fetcher, ReqwestFetcher};
pub use hash::content_hash;
pub use scan::{hash_token_from_filename, scan_existing_hashes, ScanError};
pub use session::{ChatSession, SessionCookie, SessionError};
pub use settings::CaptureSettings;
pub use store::{ImageStore, PersistError};
pub use types::EngineEvent;
