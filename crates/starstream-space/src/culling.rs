//! Flag-only render-zone culling.
//!
//! The lighter-weight alternative to pooled streaming: nothing is recycled,
//! entities just have their `renderable` flag toggled by bounds membership.
//! Configurations that do not need bounded memory can run this against a
//! static entity list; the full design layers it under the streaming tick by
//! using a zone tighter than the render window.

use glam::Vec2;
use starstream_math::Rect;

use crate::entity::Entity;

/// An axis-aligned zone around the viewpoint within which entities render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderZone {
    bounds: Rect,
}

impl RenderZone {
    /// Wrap screen bounds as a render zone.
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// The zone's bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Pure membership predicate.
    pub fn contains(&self, position: Vec2) -> bool {
        self.bounds.contains(position)
    }

    /// Toggle each entity's `renderable` flag by bounds membership.
    /// Returns how many entities are visible afterwards.
    pub fn apply(&self, entities: &mut [Entity]) -> usize {
        let mut visible = 0;
        for entity in entities {
            entity.renderable = self.contains(entity.position);
            if entity.renderable {
                visible += 1;
            }
        }
        visible
    }
}
