//! Collision queries between bullets, mushrooms and centipede segments
//!
//! All scans run in store order and stop at the first match, so ties between
//! several overlapping entities always resolve to the oldest one.

use super::geom::Aabb;
use super::state::{Heading, Mushroom, Segment};
use crate::consts::{TILE_SIZE, WINDOW_WIDTH};

/// What a bullet struck this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletHit {
    /// Index into the mushroom store
    Mushroom(usize),
    /// Index into the centipede segment list
    Segment(usize),
}

/// Find the first mushroom overlapping `bounds`
pub fn first_mushroom_hit(bounds: &Aabb, mushrooms: &[Mushroom]) -> Option<usize> {
    mushrooms.iter().position(|m| m.bounds().intersects(bounds))
}

/// Find the first segment overlapping `bounds`
pub fn first_segment_hit(bounds: &Aabb, segments: &[Segment]) -> Option<usize> {
    segments.iter().position(|s| s.bounds().intersects(bounds))
}

/// Resolve a bullet against the field. Mushrooms take priority over segments.
pub fn bullet_hit(
    bounds: &Aabb,
    mushrooms: &[Mushroom],
    segments: &[Segment],
) -> Option<BulletHit> {
    if let Some(i) = first_mushroom_hit(bounds, mushrooms) {
        return Some(BulletHit::Mushroom(i));
    }
    first_segment_hit(bounds, segments).map(BulletHit::Segment)
}

/// Whether the centipede head must drop a row and reverse
pub fn head_blocked(head: &Segment, heading: Heading, mushrooms: &[Mushroom]) -> bool {
    let at_edge = match heading {
        Heading::Right => head.pos.x >= WINDOW_WIDTH - TILE_SIZE,
        Heading::Left => head.pos.x <= 0.0,
    };
    at_edge || first_mushroom_hit(&head.bounds(), mushrooms).is_some()
}
