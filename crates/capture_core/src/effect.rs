use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Scan `save_dir` for existing hashes, then launch the capture worker.
    StartCapture { save_dir: PathBuf },
    /// Set the worker's stop flag; the loop exits within one poll interval.
    StopCapture,
}
