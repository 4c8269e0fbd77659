use crate::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub save_dir: String,
    pub saved_count: usize,
    pub log: Vec<String>,
    /// Start button enablement; Stop is always available so that a stop
    /// with no active run can be reported as a no-op.
    pub can_start: bool,
}

impl AppViewModel {
    /// One-line status for the panel header.
    pub fn status_line(&self) -> &'static str {
        match self.session {
            SessionState::Idle => "Idle",
            SessionState::Scanning => "Scanning save directory...",
            SessionState::WaitingForAuth => "Waiting for chat login...",
            SessionState::Capturing => "Capturing images",
            SessionState::Stopped => "Stopped",
        }
    }
}
