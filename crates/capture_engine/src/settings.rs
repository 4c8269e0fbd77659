use std::time::Duration;

/// Tunables for one capture run.
///
/// Fetches deliberately carry no request timeout: a hung download blocks
/// the loop until the network layer's own default gives up, and stop only
/// takes effect between cycles.
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    /// WebDriver endpoint the worker attaches to.
    pub webdriver_url: String,
    /// Chat page the browser is navigated to.
    pub chat_url: String,
    /// DOM element id whose presence signals a completed login.
    pub auth_element_id: String,
    /// Substring an `img` source must contain to be captured.
    pub image_url_filter: String,
    /// Sleep between drain cycles of the capture loop.
    pub poll_interval: Duration,
    /// Sleep between login-presence probes.
    pub auth_poll_interval: Duration,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            chat_url: "https://szfilehelper.weixin.qq.com/".to_string(),
            auth_element_id: "chatPanel".to_string(),
            image_url_filter: "webwxgetmsgimg".to_string(),
            poll_interval: Duration::from_millis(100),
            auth_poll_interval: Duration::from_secs(1),
        }
    }
}
