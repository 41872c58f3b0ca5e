// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation unit and grouping descriptors.

use crate::registry::{DrawableId, ShapeDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error for a structurally inconsistent animation descriptor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidAnimationError {
    /// Fade opacity outside `[0, 1]` or non-finite
    #[error("fade opacity out of range: {0}")]
    OpacityOutOfRange(f32),

    /// Move displacement has a non-finite component
    #[error("non-finite displacement component: {0}")]
    NonFiniteDisplacement(f32),

    /// Write change with nothing to write
    #[error("write change requires non-empty text")]
    EmptyText,

    /// Custom change without a backend-recognizable name
    #[error("custom change requires a name")]
    EmptyCustomName,

    /// Requested duration is negative or non-finite
    #[error("invalid requested duration: {0}")]
    InvalidDuration(f32),

    /// Lag ratio is negative or non-finite
    #[error("invalid lag ratio: {0}")]
    InvalidLagRatio(f32),
}

/// Kind of visual change, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Draw the target into existence
    Create,
    /// Morph the target into another shape
    Transform,
    /// Interpolate the target's opacity
    Fade,
    /// Translate the target
    Move,
    /// Reveal text stroke by stroke
    Write,
    /// Backend-specific change
    Custom,
}

impl ChangeKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Transform => "Transform",
            Self::Fade => "Fade",
            Self::Move => "Move",
            Self::Write => "Write",
            Self::Custom => "Custom",
        }
    }
}

/// A visual change together with its interpolation parameters.
///
/// Closed variant set: the vocabulary of transition kinds is small and fixed
/// per render backend, so parameters live with their kind and inconsistent
/// combinations are unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Change {
    /// Draw the target into existence
    Create,
    /// Morph the target into another shape
    Transform {
        /// Shape the target morphs into
        into: ShapeDescriptor,
    },
    /// Interpolate opacity between two values
    Fade {
        /// Starting opacity
        from: f32,
        /// Ending opacity
        to: f32,
    },
    /// Translate the target by a displacement
    Move {
        /// Displacement vector in scene units
        displacement: [f32; 3],
    },
    /// Reveal text stroke by stroke
    Write {
        /// Text to reveal
        text: String,
    },
    /// Backend-specific change with free-form parameters
    Custom {
        /// Backend-recognized change name
        name: String,
        /// Free-form parameters forwarded to the backend
        params: HashMap<String, String>,
    },
}

impl Change {
    /// Get the kind of this change
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Create => ChangeKind::Create,
            Self::Transform { .. } => ChangeKind::Transform,
            Self::Fade { .. } => ChangeKind::Fade,
            Self::Move { .. } => ChangeKind::Move,
            Self::Write { .. } => ChangeKind::Write,
            Self::Custom { .. } => ChangeKind::Custom,
        }
    }

    fn validate(&self) -> Result<(), InvalidAnimationError> {
        match self {
            Self::Create | Self::Transform { .. } => Ok(()),
            Self::Fade { from, to } => {
                for opacity in [*from, *to] {
                    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
                        return Err(InvalidAnimationError::OpacityOutOfRange(opacity));
                    }
                }
                Ok(())
            }
            Self::Move { displacement } => {
                for component in displacement {
                    if !component.is_finite() {
                        return Err(InvalidAnimationError::NonFiniteDisplacement(*component));
                    }
                }
                Ok(())
            }
            Self::Write { text } => {
                if text.is_empty() {
                    return Err(InvalidAnimationError::EmptyText);
                }
                Ok(())
            }
            Self::Custom { name, .. } => {
                if name.is_empty() {
                    return Err(InvalidAnimationError::EmptyCustomName);
                }
                Ok(())
            }
        }
    }
}

/// Rate function shaping how interpolation progresses over a unit's span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Easing {
    /// Constant rate
    Linear,
    /// Ease in and out
    #[default]
    Smooth,
    /// Slow start, fast finish
    RushInto,
    /// Fast start, slow finish
    RushFrom,
    /// Forward to completion then back to the start
    ThereAndBack,
}

impl Easing {
    /// Map normalized progress `t` in `[0, 1]` through this rate function
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => smoothstep(t),
            Self::RushInto => 2.0 * smoothstep(0.5 * t),
            Self::RushFrom => 2.0 * smoothstep(0.5 * t + 0.5) - 1.0,
            Self::ThereAndBack => {
                if t < 0.5 {
                    smoothstep(2.0 * t)
                } else {
                    smoothstep(2.0 - 2.0 * t)
                }
            }
        }
    }
}

/// Quintic smoothstep with zero first and second derivatives at the ends
fn smoothstep(t: f32) -> f32 {
    t * t * t * (10.0 - 15.0 * t + 6.0 * t * t)
}

/// A single visual change to apply to one drawable over one time span.
///
/// Pure descriptor, validated at construction and immutable once enqueued.
/// Applying it to a renderer is the render backend's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationUnit {
    target: DrawableId,
    change: Change,
    requested_duration: Option<f32>,
    easing: Easing,
}

impl AnimationUnit {
    /// Create a unit, validating the change parameters
    pub fn new(target: DrawableId, change: Change) -> Result<Self, InvalidAnimationError> {
        change.validate()?;
        Ok(Self {
            target,
            change,
            requested_duration: None,
            easing: Easing::default(),
        })
    }

    /// Set an explicit duration in seconds
    pub fn with_duration(mut self, duration: f32) -> Result<Self, InvalidAnimationError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(InvalidAnimationError::InvalidDuration(duration));
        }
        self.requested_duration = Some(duration);
        Ok(self)
    }

    /// Set the rate function
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Target drawable handle
    pub fn target(&self) -> DrawableId {
        self.target
    }

    /// The described change
    pub fn change(&self) -> &Change {
        &self.change
    }

    /// Kind of the described change
    pub fn kind(&self) -> ChangeKind {
        self.change.kind()
    }

    /// Explicitly requested duration, if any
    pub fn requested_duration(&self) -> Option<f32> {
        self.requested_duration
    }

    /// Rate function for this unit
    pub fn easing(&self) -> Easing {
        self.easing
    }
}

/// How member units' time intervals relate within one committed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Grouping {
    /// Members play back to back
    Sequential(Vec<AnimationUnit>),
    /// Members share the same start time
    Parallel(Vec<AnimationUnit>),
    /// Members start staggered by a fraction of their duration
    Lagged {
        /// Member units in stagger order
        units: Vec<AnimationUnit>,
        /// Stagger fraction; `None` uses the configured default
        lag_ratio: Option<f32>,
    },
}

impl Grouping {
    /// Member units in input order
    pub fn units(&self) -> &[AnimationUnit] {
        match self {
            Self::Sequential(units) | Self::Parallel(units) => units,
            Self::Lagged { units, .. } => units,
        }
    }

    /// Number of member units
    pub fn len(&self) -> usize {
        self.units().len()
    }

    /// Whether the grouping has no members
    pub fn is_empty(&self) -> bool {
        self.units().is_empty()
    }

    pub(crate) fn validate(&self) -> Result<(), InvalidAnimationError> {
        if let Self::Lagged {
            lag_ratio: Some(ratio),
            ..
        } = self
        {
            if !ratio.is_finite() || *ratio < 0.0 {
                return Err(InvalidAnimationError::InvalidLagRatio(*ratio));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(change: Change) -> Result<AnimationUnit, InvalidAnimationError> {
        AnimationUnit::new(DrawableId::new(), change)
    }

    #[test]
    fn test_fade_opacity_validation() {
        assert!(unit(Change::Fade { from: 0.0, to: 1.0 }).is_ok());
        assert_eq!(
            unit(Change::Fade { from: 0.0, to: 1.5 }),
            Err(InvalidAnimationError::OpacityOutOfRange(1.5))
        );
        assert!(unit(Change::Fade {
            from: f32::NAN,
            to: 1.0
        })
        .is_err());
    }

    #[test]
    fn test_move_displacement_validation() {
        assert!(unit(Change::Move {
            displacement: [2.0, -1.0, 0.0]
        })
        .is_ok());
        assert!(unit(Change::Move {
            displacement: [0.0, f32::INFINITY, 0.0]
        })
        .is_err());
    }

    #[test]
    fn test_write_and_custom_require_content() {
        assert_eq!(
            unit(Change::Write { text: String::new() }),
            Err(InvalidAnimationError::EmptyText)
        );
        assert_eq!(
            unit(Change::Custom {
                name: String::new(),
                params: HashMap::new()
            }),
            Err(InvalidAnimationError::EmptyCustomName)
        );
    }

    #[test]
    fn test_duration_validation() {
        let u = unit(Change::Create).unwrap();
        assert!(u.clone().with_duration(0.5).is_ok());
        assert_eq!(
            u.clone().with_duration(-1.0),
            Err(InvalidAnimationError::InvalidDuration(-1.0))
        );
        assert!(u.with_duration(f32::NAN).is_err());
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Smooth,
            Easing::RushInto,
            Easing::RushFrom,
        ] {
            assert!((easing.apply(0.0) - 0.0).abs() < 1e-5, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{easing:?} at 1");
        }
        // ThereAndBack returns to its starting value
        assert!((Easing::ThereAndBack.apply(1.0)).abs() < 1e-5);
        assert!((Easing::ThereAndBack.apply(0.5) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_lag_ratio_validation() {
        let units = vec![unit(Change::Create).unwrap()];
        let ok = Grouping::Lagged {
            units: units.clone(),
            lag_ratio: Some(0.5),
        };
        assert!(ok.validate().is_ok());

        let bad = Grouping::Lagged {
            units,
            lag_ratio: Some(-0.5),
        };
        assert_eq!(
            bad.validate(),
            Err(InvalidAnimationError::InvalidLagRatio(-0.5))
        );
    }
}
