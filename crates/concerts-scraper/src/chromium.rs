//! Page capabilities backed by a Chromium instance over CDP.

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element as CdpElement;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::dom::{Document, Element, Session, TicketPage};
use crate::error::{with_timeout, ScraperError};

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight)";
const BODY_TEXT: &str = "document.body ? document.body.innerText : ''";
const INNER_TEXT_FN: &str = "function() { return this.innerText || this.textContent || ''; }";
const FRAME_SRC_FN: &str = "function() { return this.src || ''; }";

/// Bound on loading a chart frame's document into its ticketing page.
const FRAME_LOAD_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

/// A running browser plus the task driving its CDP connection.
pub struct ChromiumBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromiumBrowser {
    /// Launch Chromium and start its event handler.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Launch`] for an invalid configuration and
    /// [`ScraperError::Cdp`] when the browser cannot be started.
    pub async fn launch(options: &LaunchOptions) -> Result<Self, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .window_size(options.viewport_width, options.viewport_height)
            .viewport(Viewport {
                width: options.viewport_width,
                height: options.viewport_height,
                ..Viewport::default()
            })
            .arg(format!("--user-agent={}", options.user_agent));
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(ScraperError::Launch)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::warn!(error = %e, "browser handler event error");
                }
            }
        });
        tracing::info!(headless = options.headless, "browser launched");

        Ok(Self { browser, handler })
    }

    /// Open the listing page in a new tab.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Timeout`] when navigation exceeds `timeout`.
    pub async fn open_listing(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<ChromiumPage, ScraperError> {
        let page = self.navigate(url, timeout).await?;
        Ok(ChromiumPage { page })
    }

    /// Open a blank tab and navigate it, closing the tab again if navigation
    /// fails.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<Page, ScraperError> {
        let page = self.browser.new_page("about:blank").await?;
        let navigated = with_timeout("page navigation", timeout, async {
            page.goto(url).await?;
            Ok(())
        })
        .await;

        match navigated {
            Ok(()) => Ok(page),
            Err(e) => {
                if let Err(close_err) = page.close().await {
                    tracing::warn!(url, error = %close_err, "failed to close tab after navigation error");
                }
                Err(e)
            }
        }
    }

    /// Close the browser and stop the handler task.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Cdp`] when the browser refuses to close.
    pub async fn shutdown(mut self) -> Result<(), ScraperError> {
        let closed = self.browser.close().await.map(|_| ());
        if let Err(e) = self.browser.wait().await {
            tracing::warn!(error = %e, "browser process did not exit cleanly");
        }
        self.handler.abort();
        tracing::info!("browser closed");
        closed.map_err(ScraperError::from)
    }
}

impl Session for ChromiumBrowser {
    type Page = ChromiumTab;

    async fn open(&self, url: &str, timeout: Duration) -> Result<ChromiumTab, ScraperError> {
        let page = self.navigate(url, timeout).await?;
        Ok(ChromiumTab {
            inner: ChromiumPage { page },
        })
    }
}

pub struct ChromiumElement(CdpElement);

impl ChromiumElement {
    async fn call_string_fn(&self, function: &str) -> Result<String, ScraperError> {
        let returns = self.0.call_js_fn(function, false).await?;
        match returns.result.value {
            Some(serde_json::Value::String(text)) => Ok(text),
            other => Err(ScraperError::ElementUnavailable(format!(
                "node returned {other:?} instead of text"
            ))),
        }
    }
}

impl Element for ChromiumElement {
    async fn text(&self) -> Result<String, ScraperError> {
        self.call_string_fn(INNER_TEXT_FN).await
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, ScraperError> {
        Ok(self.0.attribute(name).await?)
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, ScraperError> {
        Ok(self
            .0
            .find_elements(selector)
            .await?
            .into_iter()
            .map(ChromiumElement)
            .collect())
    }

    async fn hover(&self) -> Result<(), ScraperError> {
        self.0.hover().await?;
        Ok(())
    }
}

/// A tab showing the listing page or a chart frame document.
#[derive(Clone)]
pub struct ChromiumPage {
    page: Page,
}

impl Document for ChromiumPage {
    type Element = ChromiumElement;

    async fn find_all(&self, selector: &str) -> Result<Vec<ChromiumElement>, ScraperError> {
        Ok(self
            .page
            .find_elements(selector)
            .await?
            .into_iter()
            .map(ChromiumElement)
            .collect())
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        self.page.evaluate(SCROLL_TO_BOTTOM).await?;
        Ok(())
    }

    async fn body_text(&self) -> Result<String, ScraperError> {
        self.page
            .evaluate(BODY_TEXT)
            .await?
            .into_value::<String>()
            .map_err(|e| ScraperError::Script {
                context: "body text",
                reason: e.to_string(),
            })
    }

    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// An isolated tab opened for one ticketing lookup.
pub struct ChromiumTab {
    inner: ChromiumPage,
}

impl Document for ChromiumTab {
    type Element = ChromiumElement;

    async fn find_all(&self, selector: &str) -> Result<Vec<ChromiumElement>, ScraperError> {
        self.inner.find_all(selector).await
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        self.inner.scroll_to_bottom().await
    }

    async fn body_text(&self) -> Result<String, ScraperError> {
        self.inner.body_text().await
    }

    async fn wait(&self, duration: Duration) {
        self.inner.wait(duration).await;
    }
}

impl TicketPage for ChromiumTab {
    type Frame = ChromiumPage;

    /// Loads the frame's own document into this tab, so the chart can be
    /// driven without cross-origin frame access. The tab stays the only
    /// resource to release.
    ///
    /// The chart then runs top-level rather than embedded. A widget that
    /// reads its parent page or waits for `postMessage` from it may render
    /// differently, or not at all.
    async fn content_frame(&self, selector: &str) -> Result<Option<ChromiumPage>, ScraperError> {
        let Some(frame) = self.inner.find(selector).await? else {
            return Ok(None);
        };
        let src = frame.call_string_fn(FRAME_SRC_FN).await?;
        if src.is_empty() || src == "about:blank" {
            tracing::debug!(selector, "frame has no loadable source");
            return Ok(None);
        }

        with_timeout("chart frame navigation", FRAME_LOAD_TIMEOUT, async {
            self.inner.page.goto(src.as_str()).await?;
            Ok(())
        })
        .await?;
        Ok(Some(self.inner.clone()))
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.inner.page.close().await?;
        Ok(())
    }
}
