//! Markup knowledge of the listing and ticketing pages.
//!
//! Every chain is ordered from most to least specific; the first selector
//! that yields a usable element wins.

use crate::chain::SelectorChain;

/// Record-root locators, tried once per run. The first one matching at
/// least one element is committed to for the whole session.
pub const RECORD_LOCATORS: &[&str] = &[
    "div.elementor-loop-container > div",
    "div[data-elementor-type='loop-item']",
    "article.elementor-post",
    "div.e-loop-item",
];

/// Container class shared by the date, time and venue fields of a card.
pub const DYNAMIC_FIELD: &str = "div.jet-listing-dynamic-field__content";

pub const DATE: SelectorChain = SelectorChain::new(
    "date",
    &[
        DYNAMIC_FIELD,
        "div[class*='date']",
        "div.elementor-widget-container",
        "div",
    ],
);

pub const TITLE_LINK: SelectorChain = SelectorChain::new(
    "title_link",
    &["a[href*='-21-']", "a[href*='concert']", "a"],
);

pub const ACTION_BUTTON: SelectorChain = SelectorChain::new(
    "action_button",
    &[
        "a.elementor-button span.elementor-button-text",
        "span.elementor-button-text",
        "a.elementor-button",
        "a[class*='button']",
    ],
);

pub const TICKET_LINK: SelectorChain = SelectorChain::new(
    "ticket_link",
    &[
        "a.elementor-button[href*='qtickets']",
        "a[href*='qtickets']",
        "a[href*='ticket']",
        "a.elementor-button",
    ],
);

/// Href fragments that identify a ticketing page link.
pub const TICKET_HREF_MARKERS: &[&str] = &["qtickets", "ticket"];

/// Banner shown by the ticketing vendor when the event is over.
pub const EVENT_PASSED_BANNER: &str = "div.jquery-message-container";

/// Frame embedding the seating chart on a ticketing page.
pub const CHART_FRAME: &str = "iframe";

/// Vector primitives that may act as seat or section hotspots.
pub const CHART_PRIMITIVES: &str = "svg circle, svg rect, svg path, svg g";
