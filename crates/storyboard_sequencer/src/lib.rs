// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation sequencing engine for narrated scenes.
//!
//! This crate turns a linear trace of scene-script intent into a committed
//! render schedule:
//! - Validated animation unit descriptors
//! - Sequential, parallel and lagged grouping layout
//! - Narration-synchronized durations with graceful fallback
//! - A monotonic virtual clock and time-ordered timeline
//!
//! ## Architecture
//!
//! The sequencer is built on:
//! - A virtual [`clock::TimelineClock`] advanced only by committed entries
//! - Pure [`animation::AnimationUnit`] descriptors grouped per call site
//! - A [`narration::NarrationResolver`] caching per-text durations
//! - [`render::RenderBackend`] as the hand-off seam to rasterization

pub mod animation;
pub mod clock;
pub mod config;
pub mod narration;
pub mod registry;
pub mod render;
pub mod schedule;
pub mod sequencer;

pub use animation::{AnimationUnit, Change, ChangeKind, Easing, Grouping, InvalidAnimationError};
pub use clock::{InvalidDurationError, TimelineClock};
pub use config::SequencerConfig;
pub use narration::{
    NarrationBinding, NarrationClip, NarrationResolver, NarrationSource,
    NarrationUnavailableError, PacedSpeech, SpeechService,
};
pub use registry::{Drawable, DrawableId, DrawableRegistry, ShapeDescriptor};
pub use render::{RenderBackend, TraceRenderer};
pub use schedule::{EntryId, EntryKind, MemberSpan, ScheduleEntry, Timeline};
pub use sequencer::{EnqueueError, SceneSequencer};
