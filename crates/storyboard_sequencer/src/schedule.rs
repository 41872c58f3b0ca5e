// SPDX-License-Identifier: MIT OR Apache-2.0
//! Committed schedule entries and the timeline that holds them.

use crate::animation::AnimationUnit;
use crate::narration::NarrationClip;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a schedule entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Create a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a schedule entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A committed animation grouping
    Animation,
    /// A pacing gap with nothing to draw
    Wait,
}

/// One member unit with its committed time span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSpan {
    /// The animation unit
    pub unit: AnimationUnit,
    /// Absolute start time in seconds
    pub start_time: f32,
    /// Absolute end time in seconds
    pub end_time: f32,
}

impl MemberSpan {
    /// Span duration in seconds
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }
}

/// A committed slice of the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Unique entry ID
    pub id: EntryId,
    /// Absolute start time in seconds
    pub start_time: f32,
    /// Absolute end time in seconds, never before `start_time`
    pub end_time: f32,
    /// What this entry represents
    pub kind: EntryKind,
    /// Member units with their committed spans; empty for waits
    pub members: Vec<MemberSpan>,
    /// Narration attached to this entry, if any
    pub narration: Option<NarrationClip>,
}

impl ScheduleEntry {
    /// Entry duration in seconds
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }
}

/// Time-ordered sequence of committed schedule entries.
///
/// Owned exclusively by one sequencer and mutated only through its
/// `enqueue`/`wait` operations; start times are non-decreasing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<ScheduleEntry>,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, entry: ScheduleEntry) -> &ScheduleEntry {
        self.entries.push(entry);
        // push is infallible, the element is always there
        self.entries.last().unwrap()
    }

    /// All entries in commit order
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Entries overlapping the time range `[start, end]`
    pub fn entries_in_range(&self, start: f32, end: f32) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.start_time <= end && e.end_time >= start)
            .collect()
    }

    /// End time of the last entry, or zero for an empty timeline
    pub fn duration(&self) -> f32 {
        self.entries.last().map(|e| e.end_time).unwrap_or(0.0)
    }

    /// Number of committed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
