use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("webdriver connect error: {0}")]
    Connect(#[from] fantoccini::error::NewSessionError),
    #[error("webdriver command error: {0}")]
    Command(#[from] fantoccini::error::CmdError),
    #[error("unexpected script result: {0}")]
    ScriptResult(String),
}

/// One browser cookie exported for reuse in the plain HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
}

impl SessionCookie {
    /// Render this cookie as a `Set-Cookie` string plus the URL it is
    /// scoped to, the pair `reqwest::cookie::Jar::add_cookie_str` wants.
    /// Cookies without a domain cannot be scoped and yield `None`.
    pub fn jar_entry(&self) -> Option<(String, String)> {
        let domain = self.domain.as_deref()?;
        let host = domain.trim_start_matches('.');
        if host.is_empty() {
            return None;
        }
        let cookie = format!("{}={}; Domain={}; Path=/", self.name, self.value, host);
        let url = format!("https://{host}/");
        Some((cookie, url))
    }
}

/// Browser automation boundary.
///
/// The worker thread is the sole caller; the page's MutationObserver is
/// the only change-detection mechanism, polled through script execution.
#[async_trait::async_trait]
pub trait ChatSession: Send {
    /// Navigate to the chat page.
    async fn goto_chat(&mut self) -> Result<(), SessionError>;

    /// Is the login-completion element present in the page?
    async fn is_authenticated(&mut self) -> Result<bool, SessionError>;

    /// Inject the observer script that accumulates new image URLs into a
    /// page-global array. Called once, after authentication.
    async fn install_observer(&mut self) -> Result<(), SessionError>;

    /// Atomically drain the accumulated URL array; no URL is read twice.
    async fn drain_new_image_urls(&mut self) -> Result<Vec<String>, SessionError>;

    /// Export the browser's current cookies for the HTTP client.
    async fn export_cookies(&mut self) -> Result<Vec<SessionCookie>, SessionError>;
}
