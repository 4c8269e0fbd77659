use std::path::PathBuf;

/// Events the worker thread reports back to the UI.
///
/// Duplicate images are deliberately silent: no file, no event, no
/// counter movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The chat page is up; waiting for the operator to log in.
    WaitingForLogin,
    /// Login detected; capture begins.
    Authenticated,
    /// A new image was written to the save directory.
    ImageSaved { url: String, path: PathBuf },
    /// One URL failed to download; the run continues.
    FetchFailed { url: String, reason: String },
    /// One image could not be written; the run continues.
    SaveFailed { url: String, reason: String },
    /// The browser session could not be established or was lost.
    SessionFailed { reason: String },
    /// The worker observed the stop flag and exited.
    Stopped,
}
