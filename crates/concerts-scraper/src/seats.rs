//! Seat-availability probing of an interactive seating chart.
//!
//! The ticketing widget exposes no seat inventory. The only signal is the
//! tooltip text it renders while the pointer hovers a chart shape, so the
//! probe hovers a bounded sample of shapes, reads the tooltip back out of
//! the document text and aggregates one count per distinct section.

use std::time::Duration;

use concerts_core::SeatSection;

use crate::dom::{Document, Element};
use crate::error::{with_timeout, ScraperError};
use crate::patterns::{free_seats, section_label, synthetic_section_label};
use crate::selectors::CHART_PRIMITIVES;

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Wait for the chart to finish rendering before probing.
    pub render_settle: Duration,
    /// Number of leading chart shapes to hover.
    pub max_primitives: usize,
    pub hover_timeout: Duration,
    /// Wait after each hover for the tooltip to render.
    pub tooltip_settle: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            render_settle: Duration::from_millis(1500),
            max_primitives: 12,
            hover_timeout: Duration::from_millis(400),
            tooltip_settle: Duration::from_millis(250),
        }
    }
}

/// Distinct sections observed during one probing pass, first-seen first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatProbe {
    pub sections: Vec<SeatSection>,
}

impl SeatProbe {
    /// Record `section` unless a section with the same name was already seen.
    /// Returns `true` when it was recorded.
    pub fn record(&mut self, section: SeatSection) -> bool {
        if self.sections.iter().any(|s| s.name == section.name) {
            return false;
        }
        self.sections.push(section);
        true
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.sections
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.seats))
    }
}

/// Total free seats on the chart in `frame`, summed over distinct sections.
///
/// Returns 0 when the chart has no shapes or cannot be read; that is a valid
/// outcome rather than an error. `record_id` only correlates log lines.
pub async fn probe_available_seats<D: Document>(
    frame: &D,
    record_id: usize,
    config: &ProbeConfig,
) -> u32 {
    match collect_sections(frame, record_id, config).await {
        Ok(probe) => {
            for section in &probe.sections {
                tracing::info!(record_id, section = %section.name, seats = section.seats, "chart section");
            }
            let total = probe.total();
            tracing::info!(record_id, sections = probe.sections.len(), total, "seat probe finished");
            total
        }
        Err(e) => {
            tracing::error!(record_id, error = %e, "seat probe failed");
            0
        }
    }
}

/// Hover the leading chart shapes and gather one count per section label.
///
/// # Errors
///
/// Only enumerating the chart shapes can fail; failures on individual shapes
/// are skipped.
pub async fn collect_sections<D: Document>(
    frame: &D,
    record_id: usize,
    config: &ProbeConfig,
) -> Result<SeatProbe, ScraperError> {
    frame.wait(config.render_settle).await;

    let primitives = frame.find_all(CHART_PRIMITIVES).await?;
    tracing::info!(record_id, primitives = primitives.len(), "chart shapes found");

    let mut probe = SeatProbe::default();
    if primitives.is_empty() {
        tracing::warn!(record_id, "no chart shapes to probe");
        return Ok(probe);
    }

    for (ordinal, primitive) in primitives.iter().take(config.max_primitives).enumerate() {
        let ordinal = ordinal + 1;
        match hover_section(frame, primitive, record_id, ordinal, config).await {
            Ok(Some(section)) => {
                let name = section.name.clone();
                if probe.record(section) {
                    tracing::debug!(record_id, ordinal, section = %name, "new chart section");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::trace!(record_id, ordinal, error = %e, "chart shape skipped"),
        }
    }

    Ok(probe)
}

/// Hover one shape and read the section it reveals, if any.
async fn hover_section<D: Document>(
    frame: &D,
    primitive: &D::Element,
    record_id: usize,
    ordinal: usize,
    config: &ProbeConfig,
) -> Result<Option<SeatSection>, ScraperError> {
    with_timeout("chart hover", config.hover_timeout, primitive.hover()).await?;
    frame.wait(config.tooltip_settle).await;

    let text = frame.body_text().await?;
    let Some(seats) = free_seats(&text) else {
        tracing::debug!(record_id, ordinal, "hover revealed no free-seat count");
        return Ok(None);
    };
    let name = section_label(&text).unwrap_or_else(|| synthetic_section_label(ordinal));
    Ok(Some(SeatSection { name, seats }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeElement, FakePage};

    fn instant() -> ProbeConfig {
        ProbeConfig {
            render_settle: Duration::ZERO,
            tooltip_settle: Duration::ZERO,
            ..ProbeConfig::default()
        }
    }

    #[tokio::test]
    async fn duplicate_section_labels_are_counted_once() {
        let frame = FakePage::new().with_chart(
            CHART_PRIMITIVES,
            &[
                Some("Партер 1-20\nСвободных мест: 12"),
                Some("Партер 1-20\nСвободных мест: 12"),
                Some("Балкон 1-10\nСвободных мест: 7"),
            ],
        );
        assert_eq!(probe_available_seats(&frame, 1, &instant()).await, 19);
    }

    #[tokio::test]
    async fn first_observation_of_a_section_wins() {
        let frame = FakePage::new().with_chart(
            CHART_PRIMITIVES,
            &[
                Some("Ложа 1-4 Свободных мест: 2"),
                Some("Ложа 1-4 Свободных мест: 9"),
            ],
        );
        let probe = collect_sections(&frame, 1, &instant()).await.unwrap();
        assert_eq!(
            probe.sections,
            vec![SeatSection {
                name: "Ложа 1-4".to_owned(),
                seats: 2
            }]
        );
    }

    #[tokio::test]
    async fn no_chart_shapes_yields_zero() {
        let frame = FakePage::new().with_body("Схема зала недоступна");
        assert_eq!(probe_available_seats(&frame, 4, &instant()).await, 0);
    }

    #[tokio::test]
    async fn unlabeled_tooltips_get_synthetic_sections() {
        let frame = FakePage::new().with_chart(
            CHART_PRIMITIVES,
            &[Some("Свободных мест: 5"), None, Some("свободных мест: 5")],
        );
        let probe = collect_sections(&frame, 1, &instant()).await.unwrap();
        let names: Vec<&str> = probe.sections.iter().map(|s| s.name.as_str()).collect();
        // The second shape reveals nothing new, so the stale tooltip is read
        // again under its own ordinal.
        assert_eq!(names, ["Секция_1", "Секция_2", "Секция_3"]);
        assert_eq!(probe.total(), 15);
    }

    #[tokio::test]
    async fn failing_shape_does_not_abort_probe() {
        let frame = FakePage::new()
            .with_chart(
                CHART_PRIMITIVES,
                &[
                    Some("Партер 1-20 Свободных мест: 12"),
                    Some("Балкон 1-10 Свободных мест: 7"),
                ],
            )
            .with_leading_element(CHART_PRIMITIVES, FakeElement::new().failing_hover());
        assert_eq!(probe_available_seats(&frame, 2, &instant()).await, 19);
    }

    #[tokio::test]
    async fn hung_shape_times_out_and_later_shapes_still_count() {
        let frame = FakePage::new()
            .with_chart(
                CHART_PRIMITIVES,
                &[
                    Some("Партер 1-20 Свободных мест: 12"),
                    Some("Балкон 1-10 Свободных мест: 7"),
                ],
            )
            .with_leading_element(CHART_PRIMITIVES, FakeElement::new().hanging_hover());
        let config = ProbeConfig {
            hover_timeout: Duration::from_millis(20),
            ..instant()
        };

        let probe = collect_sections(&frame, 3, &config).await.unwrap();

        let names: Vec<&str> = probe.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Партер 1-20", "Балкон 1-10"]);
        assert_eq!(probe.total(), 19);
    }

    #[tokio::test]
    async fn only_leading_shapes_are_probed() {
        let tooltips = vec![Some("Свободных мест: 1"); 20];
        let frame = FakePage::new().with_chart(CHART_PRIMITIVES, &tooltips);
        let probe = collect_sections(&frame, 1, &instant()).await.unwrap();
        assert_eq!(probe.sections.len(), 12);
        assert_eq!(probe.total(), 12);
    }

    #[tokio::test]
    async fn waits_for_render_and_each_tooltip() {
        let frame = FakePage::new().with_chart(
            CHART_PRIMITIVES,
            &[Some("Свободных мест: 1"), Some("Свободных мест: 1")],
        );
        let config = ProbeConfig::default();
        collect_sections(&frame, 1, &config).await.unwrap();
        assert_eq!(
            frame.waits(),
            vec![
                Duration::from_millis(1500),
                Duration::from_millis(250),
                Duration::from_millis(250)
            ]
        );
    }

    #[test]
    fn total_saturates() {
        let mut probe = SeatProbe::default();
        probe.record(SeatSection { name: "a".to_owned(), seats: u32::MAX });
        probe.record(SeatSection { name: "b".to_owned(), seats: 1 });
        assert_eq!(probe.total(), u32::MAX);
    }
}
