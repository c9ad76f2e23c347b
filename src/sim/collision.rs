//! Collision primitives and the shared entity contract
//!
//! Every hostile entity is a box that moves once per tick and may die. The
//! coordinator drives them all through [`Entity`] and never needs to know
//! which archetype it is holding.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use super::state::GameEvent;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::tuning::Tuning;

/// Axis-aligned bounding box (screen space, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// True when `pos` lies outside the screen by more than `margin` on any side
pub fn is_off_screen(pos: Vec2, margin: f32) -> bool {
    pos.x < -margin
        || pos.x > SCREEN_WIDTH + margin
        || pos.y < -margin
        || pos.y > SCREEN_HEIGHT + margin
}

/// Off-screen margin for an entity: its largest dimension
#[inline]
pub fn off_screen_margin(size: Vec2) -> f32 {
    size.max_element()
}

/// Everything an entity may read or emit during its update
pub struct UpdateContext<'a> {
    /// Seconds elapsed this tick
    pub dt: f32,
    /// Player position (tracking target)
    pub target: Vec2,
    pub tuning: &'a Tuning,
    /// Projectiles fired this tick, merged by the coordinator after the turret pass
    pub fired: &'a mut Vec<Projectile>,
    pub events: &'a mut Vec<GameEvent>,
}

/// Shared update/collision contract for enemies and projectiles
pub trait Entity {
    /// Advance one tick
    fn update(&mut self, ctx: &mut UpdateContext<'_>);

    fn is_alive(&self) -> bool;

    /// Current collision box
    fn bounds(&self) -> Rect;

    /// Mark dead (collision or scripted removal)
    fn destroy(&mut self);

    /// Live and overlapping `other`
    fn hits(&self, other: &Rect) -> bool {
        self.is_alive() && self.bounds().intersects(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::new(20.0, 20.0));
        let b = Rect::from_center(Vec2::new(115.0, 105.0), Vec2::new(20.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let a = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::new(20.0, 20.0));
        let b = Rect::from_center(Vec2::new(120.0, 100.0), Vec2::new(20.0, 20.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_rect_from_center() {
        let r = Rect::from_center(Vec2::new(10.0, 20.0), Vec2::new(6.0, 4.0));
        assert_eq!(r.min, Vec2::new(7.0, 18.0));
        assert_eq!(r.max, Vec2::new(13.0, 22.0));
    }

    #[test]
    fn test_off_screen_uses_margin() {
        assert!(!is_off_screen(Vec2::new(-10.0, 300.0), 20.0));
        assert!(is_off_screen(Vec2::new(-21.0, 300.0), 20.0));
        assert!(is_off_screen(Vec2::new(400.0, SCREEN_HEIGHT + 20.5), 20.0));
        assert!(!is_off_screen(Vec2::new(SCREEN_WIDTH + 20.0, 0.0), 20.0));
    }
}
