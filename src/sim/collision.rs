//! Axis-aligned collision tests
//!
//! Every collidable entity is a square box addressed by its top-left corner,
//! so all pairwise checks reduce to one AABB overlap predicate.

use glam::Vec2;

use crate::box_center;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Strict AABB overlap between two square boxes.
///
/// Boxes that merely share an edge do not overlap.
#[inline]
pub fn boxes_overlap(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    a_pos.x < b_pos.x + b_size
        && a_pos.x + a_size > b_pos.x
        && a_pos.y < b_pos.y + b_size
        && a_pos.y + a_size > b_pos.y
}

/// Midpoint between the centers of two boxes, used to place parry bursts.
#[inline]
pub fn overlap_midpoint(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> Vec2 {
    (box_center(a_pos, a_size) + box_center(b_pos, b_size)) / 2.0
}

/// Whether a box has left the arena by more than `margin` on any side.
#[inline]
pub fn out_of_bounds(pos: Vec2, size: f32, margin: f32) -> bool {
    pos.x + size < -margin
        || pos.x > ARENA_WIDTH + margin
        || pos.y + size < -margin
        || pos.y > ARENA_HEIGHT + margin
}

/// Whether a sandbag has left the play area.
///
/// The top edge is intentionally open: a lobbed bag may arc above the
/// arena and fall back in.
#[inline]
pub fn sandbag_out_of_play(pos: Vec2, size: f32) -> bool {
    pos.x <= -size || pos.x >= ARENA_WIDTH + size || pos.y >= ARENA_HEIGHT + size
}

/// Reflect the velocity of a box touching the arena edges.
///
/// Reflection just negates the offending component; position is not
/// corrected, the next integration step carries the box back inside.
#[inline]
pub fn bounce_in_arena(pos: Vec2, vel: Vec2, size: f32) -> Vec2 {
    let mut vel = vel;
    if pos.x <= 0.0 || pos.x >= ARENA_WIDTH - size {
        vel.x = -vel.x;
    }
    if pos.y <= 0.0 || pos.y >= ARENA_HEIGHT - size {
        vel.y = -vel.y;
    }
    vel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_overlap_hit() {
        // 20px bag poking into an 80px enemy at (760, 480)
        let enemy = Vec2::new(760.0, 480.0);
        let bag = Vec2::new(745.0, 500.0);
        assert!(boxes_overlap(bag, 20.0, enemy, 80.0));
    }

    #[test]
    fn test_boxes_overlap_miss() {
        let enemy = Vec2::new(760.0, 480.0);
        let bag = Vec2::new(700.0, 500.0);
        assert!(!boxes_overlap(bag, 20.0, enemy, 80.0));
    }

    #[test]
    fn test_boxes_touching_edge_is_not_overlap() {
        // Right edge of the bag exactly on the enemy's left edge
        let enemy = Vec2::new(760.0, 480.0);
        let bag = Vec2::new(740.0, 500.0);
        assert!(!boxes_overlap(bag, 20.0, enemy, 80.0));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(110.0, 110.0);
        assert!(boxes_overlap(a, 20.0, b, 20.0));
        assert!(boxes_overlap(b, 20.0, a, 20.0));
    }

    #[test]
    fn test_overlap_midpoint() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(20.0, 0.0);
        let mid = overlap_midpoint(a, 20.0, b, 20.0);
        assert!((mid.x - 20.0).abs() < 0.001);
        assert!((mid.y - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_out_of_bounds() {
        assert!(!out_of_bounds(Vec2::new(400.0, 300.0), 20.0, 20.0));
        assert!(out_of_bounds(Vec2::new(-45.0, 300.0), 20.0, 20.0));
        assert!(out_of_bounds(Vec2::new(821.0, 300.0), 20.0, 20.0));
        assert!(out_of_bounds(Vec2::new(400.0, 625.0), 20.0, 20.0));
        assert!(out_of_bounds(Vec2::new(400.0, -45.0), 20.0, 20.0));
    }

    #[test]
    fn test_sandbag_top_edge_is_open() {
        // A bag lobbed above the arena is still in play...
        assert!(!sandbag_out_of_play(Vec2::new(400.0, -200.0), 20.0));
        // ...but one past the sides or the bottom is gone
        assert!(sandbag_out_of_play(Vec2::new(-20.0, 300.0), 20.0));
        assert!(sandbag_out_of_play(Vec2::new(820.0, 300.0), 20.0));
        assert!(sandbag_out_of_play(Vec2::new(400.0, 620.0), 20.0));
    }

    #[test]
    fn test_bounce_reflects_one_component() {
        // Touching the right wall flips vx only
        let vel = bounce_in_arena(Vec2::new(720.0, 300.0), Vec2::new(2.0, 1.0), 80.0);
        assert_eq!(vel, Vec2::new(-2.0, 1.0));

        // Touching the floor flips vy only
        let vel = bounce_in_arena(Vec2::new(300.0, 520.0), Vec2::new(2.0, 1.0), 80.0);
        assert_eq!(vel, Vec2::new(2.0, -1.0));

        // Interior boxes keep their velocity
        let vel = bounce_in_arena(Vec2::new(300.0, 300.0), Vec2::new(2.0, 1.0), 80.0);
        assert_eq!(vel, Vec2::new(2.0, 1.0));
    }
}
