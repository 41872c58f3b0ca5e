// SPDX-License-Identifier: MIT OR Apache-2.0
//! Hand-off seam between a committed schedule and a render backend.

use crate::registry::DrawableRegistry;
use crate::schedule::{EntryKind, Timeline};

/// Consumer of a committed timeline.
///
/// A backend applies each entry's changes to the identified drawables over
/// the entry's time span and produces frames. Rasterization lives entirely
/// behind this trait.
pub trait RenderBackend {
    /// Backend-specific failure type
    type Error;

    /// Render a committed timeline against a drawable registry
    fn render(
        &mut self,
        timeline: &Timeline,
        registry: &DrawableRegistry,
    ) -> Result<(), Self::Error>;
}

/// Backend that logs the schedule instead of drawing it.
///
/// Useful for inspecting pacing without a rendering stack attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceRenderer;

impl RenderBackend for TraceRenderer {
    type Error = std::convert::Infallible;

    fn render(
        &mut self,
        timeline: &Timeline,
        registry: &DrawableRegistry,
    ) -> Result<(), Self::Error> {
        for entry in timeline.entries() {
            match entry.kind {
                EntryKind::Wait => {
                    tracing::info!(
                        "[{:.2}s - {:.2}s] wait",
                        entry.start_time,
                        entry.end_time
                    );
                }
                EntryKind::Animation => {
                    for member in &entry.members {
                        let target = registry
                            .get(member.unit.target())
                            .map_or("<unregistered>", |d| d.name.as_str());
                        tracing::info!(
                            "[{:.2}s - {:.2}s] {} on {target}",
                            member.start_time,
                            member.end_time,
                            member.unit.kind().name()
                        );
                    }
                }
            }
        }
        Ok(())
    }
}
