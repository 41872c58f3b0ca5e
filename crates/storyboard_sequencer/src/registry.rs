// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drawable handles and the registry render backends resolve them against.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle to a visual object owned by the render backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawableId(pub Uuid);

impl DrawableId {
    /// Create a new random drawable ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DrawableId {
    fn default() -> Self {
        Self::new()
    }
}

/// Construction parameters for a drawable primitive.
///
/// The sequencer never interprets these beyond carrying them to the render
/// backend; the vocabulary matches the primitives scene scripts build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeDescriptor {
    /// Regular polygon
    Polygon {
        /// Number of vertices
        vertices: u32,
        /// Circumradius
        radius: f32,
    },
    /// Axis-aligned rectangle
    Rectangle {
        /// Width
        width: f32,
        /// Height
        height: f32,
    },
    /// Straight line segment
    Line {
        /// Start point
        from: [f32; 3],
        /// End point
        to: [f32; 3],
    },
    /// Laid-out text block
    Text {
        /// Text content
        content: String,
        /// Font size in scene units
        font_size: f32,
    },
    /// Composite of previously registered drawables
    Group(Vec<DrawableId>),
    /// Backend-specific primitive
    Custom {
        /// Backend-recognized primitive name
        name: String,
    },
}

/// A registered drawable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawable {
    /// Unique drawable ID
    pub id: DrawableId,
    /// Human-readable name for diagnostics
    pub name: String,
    /// Construction parameters
    pub shape: ShapeDescriptor,
}

/// Insertion-ordered registry of drawables referenced by a schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawableRegistry {
    drawables: IndexMap<DrawableId, Drawable>,
}

impl DrawableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            drawables: IndexMap::new(),
        }
    }

    /// Register a drawable and return its handle
    pub fn register(&mut self, name: impl Into<String>, shape: ShapeDescriptor) -> DrawableId {
        let id = DrawableId::new();
        self.drawables.insert(
            id,
            Drawable {
                id,
                name: name.into(),
                shape,
            },
        );
        id
    }

    /// Get a drawable
    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.get(&id)
    }

    /// Whether the registry contains a drawable
    pub fn contains(&self, id: DrawableId) -> bool {
        self.drawables.contains_key(&id)
    }

    /// Iterate drawables in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Drawable> {
        self.drawables.values()
    }

    /// Number of registered drawables
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = DrawableRegistry::new();
        let id = registry.register(
            "cache_box",
            ShapeDescriptor::Rectangle {
                width: 2.0,
                height: 2.0,
            },
        );

        assert!(registry.contains(id));
        assert_eq!(registry.get(id).unwrap().name, "cache_box");
        assert!(!registry.contains(DrawableId::new()));
    }

    #[test]
    fn test_iteration_preserves_registration_order() {
        let mut registry = DrawableRegistry::new();
        registry.register("a", ShapeDescriptor::Custom { name: "dot".into() });
        registry.register("b", ShapeDescriptor::Custom { name: "dot".into() });
        registry.register("c", ShapeDescriptor::Custom { name: "dot".into() });

        let names: Vec<&str> = registry.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
