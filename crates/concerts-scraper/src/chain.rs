//! Ordered selector fallback chains.
//!
//! A chain is a list of selector strategies evaluated left to right with
//! early exit. Each extraction mode (first element, first non-empty text,
//! first validated link) is one evaluation function over the same chain.

use crate::dom::Element;
use crate::error::ScraperError;

#[derive(Debug, Clone, Copy)]
pub struct SelectorChain {
    pub field: &'static str,
    pub selectors: &'static [&'static str],
}

/// A chain hit: the winning selector plus what it produced.
#[derive(Debug)]
pub struct Hit<T> {
    pub selector: &'static str,
    pub value: T,
}

impl SelectorChain {
    #[must_use]
    pub const fn new(field: &'static str, selectors: &'static [&'static str]) -> Self {
        Self { field, selectors }
    }

    /// First element matched by any selector, regardless of its content.
    ///
    /// # Errors
    ///
    /// Propagates page errors from the underlying queries.
    pub async fn first_element<E: Element>(
        &self,
        root: &E,
    ) -> Result<Option<Hit<E>>, ScraperError> {
        for &selector in self.selectors {
            if let Some(value) = root.find(selector).await? {
                return Ok(Some(Hit { selector, value }));
            }
        }
        Ok(None)
    }

    /// Trimmed text of the first element of the first selector whose first
    /// match has non-empty text. Later matches of the same selector are not
    /// considered.
    ///
    /// # Errors
    ///
    /// Propagates page errors from the underlying queries.
    pub async fn first_text<E: Element>(
        &self,
        root: &E,
    ) -> Result<Option<Hit<String>>, ScraperError> {
        for &selector in self.selectors {
            let Some(element) = root.find(selector).await? else {
                continue;
            };
            let text = element.text().await?;
            let text = text.trim();
            if !text.is_empty() {
                return Ok(Some(Hit {
                    selector,
                    value: text.to_owned(),
                }));
            }
        }
        Ok(None)
    }

    /// `href` of the first matched anchor whose link contains one of
    /// `markers`. Anchors failing validation fall through to the next
    /// selector.
    ///
    /// # Errors
    ///
    /// Propagates page errors from the underlying queries.
    pub async fn first_link<E: Element>(
        &self,
        root: &E,
        markers: &[&str],
    ) -> Result<Option<Hit<String>>, ScraperError> {
        for &selector in self.selectors {
            let Some(anchor) = root.find(selector).await? else {
                continue;
            };
            let href = anchor.attribute("href").await?;
            if let Some(href) = href.filter(|h| markers.iter().any(|m| h.contains(m))) {
                return Ok(Some(Hit {
                    selector,
                    value: href,
                }));
            }
            tracing::debug!(
                field = self.field,
                selector,
                "matched anchor rejected: href lacks a ticketing marker"
            );
        }
        Ok(None)
    }
}
