//! Page capabilities consumed by the extraction core.
//!
//! The loader, extractor and seat aggregator are written against these
//! traits rather than a concrete browser, so each can be exercised with an
//! in-memory page. [`crate::chromium`] provides the real implementation.

use std::time::Duration;

use crate::error::ScraperError;

/// A node inside a rendered document.
#[allow(async_fn_in_trait)]
pub trait Element: Sized {
    /// Full text content of the node, untrimmed.
    async fn text(&self) -> Result<String, ScraperError>;

    async fn attribute(&self, name: &str) -> Result<Option<String>, ScraperError>;

    /// All descendants matching a CSS selector, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, ScraperError>;

    /// First descendant matching a CSS selector.
    async fn find(&self, selector: &str) -> Result<Option<Self>, ScraperError> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    /// Move the pointer over the node.
    async fn hover(&self) -> Result<(), ScraperError>;
}

/// A rendered document: the listing page, a ticketing page, or a chart frame.
#[allow(async_fn_in_trait)]
pub trait Document {
    type Element: Element;

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, ScraperError>;

    async fn find(&self, selector: &str) -> Result<Option<Self::Element>, ScraperError> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    /// Scroll the viewport to the bottom of the document.
    async fn scroll_to_bottom(&self) -> Result<(), ScraperError>;

    /// Full text content of the document body.
    async fn body_text(&self) -> Result<String, ScraperError>;

    /// Suspend for a fixed settle interval.
    async fn wait(&self, duration: Duration);
}

/// An isolated page opened for one record's ticketing lookup.
///
/// The holder must call [`TicketPage::close`] on every exit path.
#[allow(async_fn_in_trait)]
pub trait TicketPage: Document {
    type Frame: Document;

    /// Content document of the first frame element matching `selector`.
    async fn content_frame(&self, selector: &str) -> Result<Option<Self::Frame>, ScraperError>;

    async fn close(self) -> Result<(), ScraperError>;
}

/// Capability to open isolated ticketing pages within the browsing session.
#[allow(async_fn_in_trait)]
pub trait Session {
    type Page: TicketPage;

    /// Open `url` in a fresh page, bounded by `timeout`.
    ///
    /// Implementations release the page themselves when navigation fails.
    async fn open(&self, url: &str, timeout: Duration) -> Result<Self::Page, ScraperError>;
}
