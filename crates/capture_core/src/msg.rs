use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the save-directory input box (typed or picked).
    DirChanged(String),
    /// User clicked Start.
    StartClicked,
    /// User clicked Stop.
    StopClicked,
    /// Startup directory scan finished; `existing` images already on disk.
    ScanCompleted { existing: usize },
    /// Startup directory scan could not read the save directory.
    ScanFailed { reason: String },
    /// The browser session detected a completed login.
    Authenticated,
    /// Worker wrote a new image to disk.
    ImageSaved { url: String, path: PathBuf },
    /// One URL failed to download; the run continues.
    FetchFailed { url: String, reason: String },
    /// One image could not be written to disk; the run continues.
    SaveFailed { url: String, reason: String },
    /// The browser session could not be established; the run is over.
    SessionFailed { reason: String },
    /// Worker observed the stop flag and exited its loop.
    CaptureStopped,
    /// Fallback for placeholder wiring.
    NoOp,
}
