//! In-memory page model implementing the [`crate::dom`] capabilities.
//!
//! Selectors are matched by exact string, so a fixture registers children
//! under the very selector the code under test will query.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::dom::{Document, Element, Session, TicketPage};
use crate::error::ScraperError;

#[derive(Debug, Clone)]
enum Hover {
    Inert,
    Reveal(Arc<Mutex<String>>, String),
    Fail,
    Hang,
}

fn stale_node() -> ScraperError {
    ScraperError::ElementUnavailable("stale node".to_owned())
}

#[derive(Debug, Clone)]
pub(crate) struct FakeElement {
    text: String,
    attrs: HashMap<String, String>,
    children: HashMap<String, Vec<FakeElement>>,
    hover: Hover,
    failing: bool,
}

impl FakeElement {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            attrs: HashMap::new(),
            children: HashMap::new(),
            hover: Hover::Inert,
            failing: false,
        }
    }

    pub(crate) fn with_text(mut self, text: &str) -> Self {
        text.clone_into(&mut self.text);
        self
    }

    pub(crate) fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_owned(), value.to_owned());
        self
    }

    pub(crate) fn with_child(mut self, selector: &str, child: FakeElement) -> Self {
        self.children
            .entry(selector.to_owned())
            .or_default()
            .push(child);
        self
    }

    pub(crate) fn failing_hover(mut self) -> Self {
        self.hover = Hover::Fail;
        self
    }

    /// Hovering never completes.
    pub(crate) fn hanging_hover(mut self) -> Self {
        self.hover = Hover::Hang;
        self
    }

    /// Every read or query on this node fails, as on a node detached
    /// mid-run.
    pub(crate) fn failing_query(mut self) -> Self {
        self.failing = true;
        self
    }
}

impl Element for FakeElement {
    async fn text(&self) -> Result<String, ScraperError> {
        if self.failing {
            return Err(stale_node());
        }
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, ScraperError> {
        if self.failing {
            return Err(stale_node());
        }
        Ok(self.attrs.get(name).cloned())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, ScraperError> {
        if self.failing {
            return Err(stale_node());
        }
        Ok(self.children.get(selector).cloned().unwrap_or_default())
    }

    async fn hover(&self) -> Result<(), ScraperError> {
        match &self.hover {
            Hover::Inert => Ok(()),
            Hover::Reveal(body, text) => {
                text.clone_into(&mut body.lock().unwrap());
                Ok(())
            }
            Hover::Fail => Err(ScraperError::ElementUnavailable("detached node".to_owned())),
            Hover::Hang => std::future::pending().await,
        }
    }
}

/// Element counts revealed by successive scrolls of a listing page.
#[derive(Debug)]
struct ScrollScript {
    selector: String,
    initial: usize,
    after_scroll: Vec<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct FakePage {
    elements: HashMap<String, Vec<FakeElement>>,
    failing_selectors: Vec<String>,
    scroll: Option<ScrollScript>,
    body: Arc<Mutex<String>>,
    frame: Mutex<Option<Box<FakePage>>>,
    scrolls: AtomicUsize,
    waits: Mutex<Vec<Duration>>,
    closed: Option<Arc<AtomicUsize>>,
}

impl FakePage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_elements(mut self, selector: &str, elements: Vec<FakeElement>) -> Self {
        self.elements.insert(selector.to_owned(), elements);
        self
    }

    /// Queries for `selector` fail instead of matching.
    pub(crate) fn with_failing_query(mut self, selector: &str) -> Self {
        self.failing_selectors.push(selector.to_owned());
        self
    }

    /// `selector` matches `initial` elements before any scroll and
    /// `after_scroll[n - 1]` after the n-th scroll (last value repeats).
    pub(crate) fn with_scroll_script(
        mut self,
        selector: &str,
        initial: usize,
        after_scroll: Vec<usize>,
    ) -> Self {
        self.scroll = Some(ScrollScript {
            selector: selector.to_owned(),
            initial,
            after_scroll,
        });
        self
    }

    pub(crate) fn with_body(self, text: &str) -> Self {
        text.clone_into(&mut self.body.lock().unwrap());
        self
    }

    pub(crate) fn with_frame(mut self, selector: &str, frame: FakePage) -> Self {
        self.elements
            .insert(selector.to_owned(), vec![FakeElement::new()]);
        self.frame = Mutex::new(Some(Box::new(frame)));
        self
    }

    /// Chart primitives that each reveal `tooltip` in the body text when
    /// hovered (`None` reveals nothing).
    pub(crate) fn with_chart(mut self, selector: &str, tooltips: &[Option<&str>]) -> Self {
        let primitives = tooltips
            .iter()
            .map(|tooltip| {
                let mut el = FakeElement::new();
                if let Some(text) = tooltip {
                    el.hover = Hover::Reveal(Arc::clone(&self.body), (*text).to_owned());
                }
                el
            })
            .collect();
        self.elements.insert(selector.to_owned(), primitives);
        self
    }

    /// Insert `element` ahead of whatever `selector` already matches.
    pub(crate) fn with_leading_element(mut self, selector: &str, element: FakeElement) -> Self {
        self.elements
            .entry(selector.to_owned())
            .or_default()
            .insert(0, element);
        self
    }

    pub(crate) fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }

    pub(crate) fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

impl Document for FakePage {
    type Element = FakeElement;

    async fn find_all(&self, selector: &str) -> Result<Vec<FakeElement>, ScraperError> {
        if self.failing_selectors.iter().any(|s| s == selector) {
            return Err(ScraperError::Script {
                context: "query",
                reason: "target closed".to_owned(),
            });
        }
        if let Some(script) = self.scroll.as_ref().filter(|s| s.selector == selector) {
            let count = match self.scrolls() {
                0 => script.initial,
                n => script
                    .after_scroll
                    .get(n - 1)
                    .or(script.after_scroll.last())
                    .copied()
                    .unwrap_or(script.initial),
            };
            return Ok(vec![FakeElement::new(); count]);
        }
        Ok(self.elements.get(selector).cloned().unwrap_or_default())
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn body_text(&self) -> Result<String, ScraperError> {
        Ok(self.body.lock().unwrap().clone())
    }

    async fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

impl TicketPage for FakePage {
    type Frame = FakePage;

    async fn content_frame(&self, selector: &str) -> Result<Option<FakePage>, ScraperError> {
        if !self.elements.contains_key(selector) {
            return Ok(None);
        }
        Ok(self.frame.lock().unwrap().take().map(|frame| *frame))
    }

    async fn close(self) -> Result<(), ScraperError> {
        if let Some(closed) = &self.closed {
            closed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Session serving pre-built ticketing pages by URL. Unknown URLs fail as a
/// navigation timeout would.
#[derive(Debug, Default)]
pub(crate) struct FakeSession {
    pages: Mutex<HashMap<String, FakePage>>,
    opened: Mutex<Vec<String>>,
    closed: Arc<AtomicUsize>,
}

impl FakeSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn serve(self, url: &str, mut page: FakePage) -> Self {
        page.closed = Some(Arc::clone(&self.closed));
        self.pages.lock().unwrap().insert(url.to_owned(), page);
        self
    }

    pub(crate) fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub(crate) fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Session for FakeSession {
    type Page = FakePage;

    async fn open(&self, url: &str, timeout: Duration) -> Result<FakePage, ScraperError> {
        self.opened.lock().unwrap().push(url.to_owned());
        self.pages
            .lock()
            .unwrap()
            .remove(url)
            .ok_or(ScraperError::Timeout {
                action: "ticket page navigation",
                millis: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })
    }
}
