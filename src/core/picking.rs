use glam::Vec2;

use super::window::{FALLBACK_HEIGHT, FALLBACK_WIDTH};

/// Screen rectangle of the render surface, in the same units as the cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px <= self.x + self.width && py <= self.y + self.height
    }
}

/// Cursor position to normalized device coordinates (y up). A zero-sized
/// rectangle is treated as 800×600.
pub fn to_ndc(cursor: (f32, f32), rect: SurfaceRect) -> Vec2 {
    let width = if rect.width > 0.0 { rect.width } else { FALLBACK_WIDTH as f32 };
    let height = if rect.height > 0.0 { rect.height } else { FALLBACK_HEIGHT as f32 };
    Vec2::new(
        (cursor.0 - rect.x) / width * 2.0 - 1.0,
        -((cursor.1 - rect.y) / height) * 2.0 + 1.0,
    )
}

/// A candidate hit from a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit<Id> {
    pub id: Id,
    pub distance: f32,
}

/// Nearest hit wins
pub fn nearest<Id>(hits: impl IntoIterator<Item = PickHit<Id>>) -> Option<PickHit<Id>> {
    hits.into_iter()
        .filter(|h| h.distance.is_finite())
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
