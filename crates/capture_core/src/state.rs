use crate::view_model::AppViewModel;

/// Maximum number of log lines retained for display.
pub const LOG_LIMIT: usize = 200;

/// Lifecycle of one capture run.
///
/// `Stopped` is terminal for a run; a fresh start rebuilds the dedup
/// index from disk and goes through `Scanning` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Scanning,
    WaitingForAuth,
    Capturing,
    Stopped,
}

impl SessionState {
    /// A new run may begin only when no run is in flight.
    pub fn can_start(self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Stopped)
    }

    /// True while a worker (or the synchronous scan) owns the run.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            SessionState::Scanning | SessionState::WaitingForAuth | SessionState::Capturing
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    save_dir: String,
    saved_count: usize,
    log: Vec<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn save_dir(&self) -> &str {
        &self.save_dir
    }

    pub fn saved_count(&self) -> usize {
        self.saved_count
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            save_dir: self.save_dir.clone(),
            saved_count: self.saved_count,
            log: self.log.clone(),
            can_start: self.session.can_start(),
        }
    }

    pub(crate) fn set_save_dir(&mut self, dir: String) {
        self.save_dir = dir;
    }

    pub(crate) fn begin_scan(&mut self) {
        self.session = SessionState::Scanning;
    }

    /// Counter starts at the number of images found by the startup scan.
    pub(crate) fn seed_count(&mut self, existing: usize) {
        self.saved_count = existing;
    }

    pub(crate) fn wait_for_auth(&mut self) {
        self.session = SessionState::WaitingForAuth;
    }

    pub(crate) fn begin_capture(&mut self) {
        self.session = SessionState::Capturing;
    }

    pub(crate) fn finish_run(&mut self) {
        self.session = SessionState::Stopped;
    }

    pub(crate) fn record_saved(&mut self) {
        self.saved_count += 1;
    }

    pub(crate) fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > LOG_LIMIT {
            let excess = self.log.len() - LOG_LIMIT;
            self.log.drain(..excess);
        }
    }
}
