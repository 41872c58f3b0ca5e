// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene sequencer: orders groupings into a committed schedule.

use crate::animation::{Grouping, InvalidAnimationError};
use crate::clock::{InvalidDurationError, TimelineClock};
use crate::config::SequencerConfig;
use crate::narration::{NarrationBinding, NarrationResolver, SpeechService};
use crate::schedule::{EntryId, EntryKind, MemberSpan, ScheduleEntry, Timeline};

/// Two member times closer than this are treated as coincident
const TIME_EPSILON: f32 = 1e-4;

/// Error aborting a single `enqueue` call.
///
/// The timeline is left at its last committed state; callers may skip the
/// offending grouping or substitute another and continue building.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnqueueError {
    /// The grouping or one of its parameters failed validation
    #[error(transparent)]
    InvalidAnimation(#[from] InvalidAnimationError),

    /// A committed duration was negative or non-finite
    #[error(transparent)]
    InvalidDuration(#[from] InvalidDurationError),
}

/// Builds a committed render schedule from a linear trace of grouping
/// enqueues and waits.
///
/// Single-threaded by design: schedule construction is a trace of one content
/// script's intent, not a live runtime. One sequencer owns one timeline;
/// independent sequencers never share state. Dropping a sequencer mid-build
/// discards the partial timeline with no other side effects.
pub struct SceneSequencer {
    config: SequencerConfig,
    clock: TimelineClock,
    timeline: Timeline,
    narration: NarrationResolver,
}

impl SceneSequencer {
    /// Create a sequencer with no speech backend.
    ///
    /// Narration bindings resolve to their requested or default durations
    /// even when `narration_enabled` is set.
    pub fn new(config: SequencerConfig) -> Self {
        let narration = NarrationResolver::new(&config, None);
        Self {
            config,
            clock: TimelineClock::new(),
            timeline: Timeline::new(),
            narration,
        }
    }

    /// Create a sequencer resolving narration through `service`
    pub fn with_service(config: SequencerConfig, service: Box<dyn SpeechService>) -> Self {
        let narration = NarrationResolver::new(&config, Some(service));
        Self {
            config,
            clock: TimelineClock::new(),
            timeline: Timeline::new(),
            narration,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> f32 {
        self.clock.now()
    }

    /// The sequencer configuration
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// The schedule committed so far
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Commit a grouping, optionally bound to narration.
    ///
    /// Resolves the effective duration, lays out member spans per the
    /// grouping kind, advances the clock to the group end and appends the
    /// entry. An empty grouping is a zero-duration no-op: the clock does not
    /// advance and nothing is appended, signalled by `Ok(None)`.
    pub fn enqueue(
        &mut self,
        grouping: Grouping,
        narration: Option<NarrationBinding>,
    ) -> Result<Option<&ScheduleEntry>, EnqueueError> {
        grouping.validate()?;

        if grouping.is_empty() {
            tracing::debug!("skipping empty grouping");
            return Ok(None);
        }

        // Member layout relative to the group start, before narration.
        let (mut layout, natural_end) = self.natural_layout(&grouping);

        let (group_duration, clip) = match narration {
            Some(binding) => self.narration.resolve(&binding, Some(natural_end)),
            None => (natural_end, None),
        };

        // Narration overrides the group duration; stretch or compress the
        // member layout to fill it, like a run_time override.
        if (group_duration - natural_end).abs() > TIME_EPSILON {
            if natural_end > TIME_EPSILON {
                let scale = group_duration / natural_end;
                for (offset, duration) in &mut layout {
                    *offset *= scale;
                    *duration *= scale;
                }
            } else {
                // All members are zero-duration; spread each over the span
                for (offset, duration) in &mut layout {
                    *offset = 0.0;
                    *duration = group_duration;
                }
            }
        }

        let start_time = self.clock.now();
        let end_time = self.clock.advance(group_duration)?;

        let members = grouping
            .units()
            .iter()
            .zip(&layout)
            .map(|(unit, (offset, duration))| MemberSpan {
                unit: unit.clone(),
                start_time: start_time + offset,
                end_time: start_time + offset + duration,
            })
            .collect();

        let entry = self.timeline.push(ScheduleEntry {
            id: EntryId::new(),
            start_time,
            end_time,
            kind: EntryKind::Animation,
            members,
            narration: clip,
        });
        Ok(Some(entry))
    }

    /// Advance the clock without scheduling anything to draw.
    ///
    /// Appends a pacing entry so downstream backends see the gap.
    pub fn wait(&mut self, duration: f32) -> Result<&ScheduleEntry, InvalidDurationError> {
        let start_time = self.clock.now();
        let end_time = self.clock.advance(duration)?;

        Ok(self.timeline.push(ScheduleEntry {
            id: EntryId::new(),
            start_time,
            end_time,
            kind: EntryKind::Wait,
            members: Vec::new(),
            narration: None,
        }))
    }

    /// Commit a grouping, narrated when `text` is non-empty.
    pub fn narrate_or_play(
        &mut self,
        grouping: Grouping,
        text: &str,
    ) -> Result<Option<&ScheduleEntry>, EnqueueError> {
        if text.is_empty() {
            self.enqueue(grouping, None)
        } else {
            self.enqueue(grouping, Some(NarrationBinding::spoken(text)))
        }
    }

    /// Run `f` with the binding's duration resolved up front.
    ///
    /// Resolution happens before `f` is entered and always yields a usable
    /// duration: a failing speech backend falls back to the default, so `f`
    /// proceeds with fallback timing. The resolved clip is cached, so an
    /// `enqueue` of the same binding inside `f` reuses it.
    pub fn with_narration<R>(
        &mut self,
        binding: &NarrationBinding,
        f: impl FnOnce(&mut Self, f32) -> R,
    ) -> R {
        let (duration, _) = self.narration.resolve(binding, None);
        f(self, duration)
    }

    /// Finish building and hand over the committed timeline
    pub fn finalize(self) -> Timeline {
        self.timeline
    }

    /// Duration a unit occupies when laid out without narration
    fn member_duration(&self, unit: &crate::animation::AnimationUnit) -> f32 {
        unit.requested_duration()
            .unwrap_or(self.config.default_unit_duration)
    }

    /// Member `(offset, duration)` pairs relative to the group start, and the
    /// group's natural end.
    fn natural_layout(&self, grouping: &Grouping) -> (Vec<(f32, f32)>, f32) {
        match grouping {
            Grouping::Sequential(units) => {
                let mut layout = Vec::with_capacity(units.len());
                let mut cursor = 0.0;
                for unit in units {
                    let duration = self.member_duration(unit);
                    layout.push((cursor, duration));
                    cursor += duration;
                }
                (layout, cursor)
            }
            Grouping::Parallel(units) => {
                let layout: Vec<(f32, f32)> = units
                    .iter()
                    .map(|unit| (0.0, self.member_duration(unit)))
                    .collect();
                let end = layout
                    .iter()
                    .map(|(_, duration)| *duration)
                    .fold(0.0, f32::max);
                (layout, end)
            }
            Grouping::Lagged { units, lag_ratio } => {
                let ratio = lag_ratio.unwrap_or(self.config.lag_ratio_default);
                let layout: Vec<(f32, f32)> = units
                    .iter()
                    .enumerate()
                    .map(|(k, unit)| {
                        let duration = self.member_duration(unit);
                        (k as f32 * ratio * duration, duration)
                    })
                    .collect();
                let end = layout
                    .iter()
                    .map(|(offset, duration)| offset + duration)
                    .fold(0.0, f32::max);
                (layout, end)
            }
        }
    }
}
