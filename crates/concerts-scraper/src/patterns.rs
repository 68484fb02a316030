//! Text patterns for the Russian-language listing and ticketing pages.

use std::sync::LazyLock;

use regex::Regex;

/// Button caption shown when every ticket is gone.
pub const SOLD_OUT_PHRASE: &str = "Все билеты проданы";

/// Separator between the program and the city in a card title.
const PROGRAM_SEPARATOR: &str = " в ";

/// Preposition "в" followed by a city name made of Cyrillic letters and hyphens.
static CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)в\s+([А-Яа-яЁё\-]+)").expect("valid regex"));

/// Tooltip line "Свободных мест: N".
static FREE_SEATS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)свободных мест[:\s]*([0-9]+)").expect("valid regex"));

/// Section name followed by a seat or row range, e.g. "Партер 1-20".
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Партер|Балкон|Амфитеатр|Ложа|[А-Яа-яЁё ]+)\s+\d+\s*[-–]\s*\d+")
        .expect("valid regex")
});

/// Program and city decomposed from a card title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleParts {
    pub program: String,
    pub city: Option<String>,
}

/// Split a card title such as `"Симфония №5 в Москве"` into program and city.
///
/// The program is everything before the first `" в "`; when the separator is
/// absent the whole title is the program. The city is the word following the
/// first standalone preposition.
#[must_use]
pub fn split_title(title: &str) -> TitleParts {
    let title = title.trim();
    let program = title
        .split(PROGRAM_SEPARATOR)
        .next()
        .unwrap_or(title)
        .trim()
        .to_owned();
    let city = CITY_RE
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned());
    TitleParts { program, city }
}

/// `true` when an action-button caption announces a sold-out event.
#[must_use]
pub fn is_sold_out(caption: &str) -> bool {
    caption.contains(SOLD_OUT_PHRASE)
}

/// Position of the venue among a card's dynamic-field containers.
///
/// Cards lay out date, time and venue in that order: with three or more
/// fields the venue is the last one, with exactly two it is the second.
#[must_use]
pub fn venue_index(field_count: usize) -> Option<usize> {
    match field_count {
        0 | 1 => None,
        2 => Some(1),
        n => Some(n - 1),
    }
}

/// Free-seat count from the first "свободных мест" mention in `text`.
///
/// Only the first mention is used: a hover surfaces one tooltip at a time,
/// so later mentions belong to unrelated content. Counts beyond `u32`
/// saturate.
#[must_use]
pub fn free_seats(text: &str) -> Option<u32> {
    let digits = FREE_SEATS_RE.captures(text)?.get(1)?.as_str();
    // ASCII digits only, so overflow is the one way parsing can fail.
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// Human-readable section label such as `"Партер 1-20"`, if one is visible.
#[must_use]
pub fn section_label(text: &str) -> Option<String> {
    SECTION_RE
        .find(text)
        .map(|m| m.as_str().trim().to_owned())
        .filter(|label| !label.is_empty())
}

/// Placeholder label for the `ordinal`-th probed primitive (1-based).
#[must_use]
pub fn synthetic_section_label(ordinal: usize) -> String {
    format!("Секция_{ordinal}")
}

#[cfg(test)]
#[path = "patterns_test.rs"]
mod tests;
