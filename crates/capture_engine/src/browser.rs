use fantoccini::ClientBuilder;

use crate::session::{ChatSession, SessionCookie, SessionError};
use crate::settings::CaptureSettings;

/// Injected once after login. Watches the live DOM for newly-inserted
/// `img` elements (directly or nested) whose source matches the filter
/// and accumulates their URLs in a page-global array.
const OBSERVER_SCRIPT: &str = r#"
window.__newChatImages = window.__newChatImages || [];
const observer = new MutationObserver((mutations) => {
    for (const mutation of mutations) {
        for (const node of mutation.addedNodes) {
            if (node.tagName === 'IMG' && node.src.includes(__FILTER__)) {
                window.__newChatImages.push(node.src);
            } else if (node.querySelectorAll) {
                for (const img of node.querySelectorAll('img')) {
                    if (img.src.includes(__FILTER__)) {
                        window.__newChatImages.push(img.src);
                    }
                }
            }
        }
    }
});
observer.observe(document.body, { childList: true, subtree: true });
"#;

/// `splice` empties the array in the same expression that returns its
/// contents, so a URL is never handed out twice.
const DRAIN_SCRIPT: &str =
    "return window.__newChatImages.splice(0, window.__newChatImages.length);";

/// Production [`ChatSession`] over a WebDriver endpoint.
pub struct WebDriverSession {
    client: fantoccini::Client,
    chat_url: String,
    auth_probe: String,
    observer_script: String,
}

impl WebDriverSession {
    /// Attach to the WebDriver endpoint named in `settings`.
    pub async fn connect(settings: &CaptureSettings) -> Result<Self, SessionError> {
        let client = ClientBuilder::native()
            .connect(&settings.webdriver_url)
            .await?;
        Ok(Self {
            client,
            chat_url: settings.chat_url.clone(),
            auth_probe: format!(
                "return document.getElementById({}) !== null;",
                js_string(&settings.auth_element_id)
            ),
            observer_script: OBSERVER_SCRIPT
                .replace("__FILTER__", &js_string(&settings.image_url_filter)),
        })
    }

    /// End the WebDriver session.
    pub async fn close(self) -> Result<(), SessionError> {
        self.client.close().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ChatSession for WebDriverSession {
    async fn goto_chat(&mut self) -> Result<(), SessionError> {
        self.client.goto(&self.chat_url).await?;
        Ok(())
    }

    async fn is_authenticated(&mut self) -> Result<bool, SessionError> {
        let value = self.client.execute(&self.auth_probe, vec![]).await?;
        value
            .as_bool()
            .ok_or_else(|| SessionError::ScriptResult(value.to_string()))
    }

    async fn install_observer(&mut self) -> Result<(), SessionError> {
        self.client.execute(&self.observer_script, vec![]).await?;
        Ok(())
    }

    async fn drain_new_image_urls(&mut self) -> Result<Vec<String>, SessionError> {
        let value = self.client.execute(DRAIN_SCRIPT, vec![]).await?;
        let entries = value
            .as_array()
            .ok_or_else(|| SessionError::ScriptResult(value.to_string()))?;
        Ok(entries
            .iter()
            .filter_map(|entry| entry.as_str().map(ToOwned::to_owned))
            .collect())
    }

    async fn export_cookies(&mut self) -> Result<Vec<SessionCookie>, SessionError> {
        let cookies = self.client.get_all_cookies().await?;
        Ok(cookies
            .iter()
            .map(|cookie| SessionCookie {
                name: cookie.name().to_string(),
                value: cookie.value().to_string(),
                domain: cookie.domain().map(ToOwned::to_owned),
            })
            .collect())
    }
}

/// Embed a Rust string as a JS string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::js_string;

    #[test]
    fn js_string_quotes_and_escapes() {
        assert_eq!(js_string("chatPanel"), "\"chatPanel\"");
        assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
    }
}
