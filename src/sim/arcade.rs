//! Arcade physics: velocity integration, world bounds and pairwise separation
//!
//! Per-body constant gravity and AABB shapes; nothing bounces. Separation
//! reports a `Contact` so gameplay rules run only for pairs that touched.

use super::body::{Body, Faces};
use crate::consts::MAX_STEP_SECS;

/// Physics tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcadeConfig {
    /// Maximum step rate; a step never covers less than `1 / fps` seconds
    pub fps: f32,
    pub bounds: WorldBounds,
}

impl ArcadeConfig {
    pub fn min_step_secs(&self) -> f32 {
        1.0 / self.fps
    }

    /// Clamp a frame delta to a step the solver handles without tunneling
    pub fn clamp_step(dt: f32) -> f32 {
        dt.clamp(0.0, MAX_STEP_SECS)
    }
}

/// The rectangle bodies are kept inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    /// Sides that stop bodies
    pub check: Faces,
}

/// Which axis a contact was resolved on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A resolved collision between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub axis: Axis,
}

/// Who absorbs the separation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mover {
    Leading,
    Trailing,
    Both,
}

/// Advance a body by `dt` seconds
pub fn integrate(body: &mut Body, dt: f32) {
    if !body.enabled || body.is_static() {
        return;
    }
    body.prev = body.pos;
    body.blocked = Faces::NONE;
    body.vel += body.gravity * dt;
    body.pos += body.vel * dt;
}

/// Keep a body inside the world on every checked side
pub fn collide_world_bounds(body: &mut Body, bounds: &WorldBounds) {
    if !body.enabled || body.is_static() || !body.collide_world_bounds {
        return;
    }

    if bounds.check.left && body.left() < 0.0 {
        body.pos.x = 0.0;
        body.vel.x = body.vel.x.max(0.0);
        body.blocked.left = true;
    } else if bounds.check.right && body.right() > bounds.width {
        body.pos.x = bounds.width - body.size.x;
        body.vel.x = body.vel.x.min(0.0);
        body.blocked.right = true;
    }

    if bounds.check.up && body.top() < 0.0 {
        body.pos.y = 0.0;
        body.vel.y = body.vel.y.max(0.0);
        body.blocked.up = true;
    } else if bounds.check.down && body.bottom() > bounds.height {
        body.pos.y = bounds.height - body.size.y;
        body.vel.y = body.vel.y.min(0.0);
        body.blocked.down = true;
    }
}

/// Push two overlapping bodies apart
///
/// Returns `None` when they don't overlap, are both static or disabled, or
/// when the facing sides have their collision checks turned off.
pub fn separate(a: &mut Body, b: &mut Body) -> Option<Contact> {
    if !a.enabled || !b.enabled || (a.is_static() && b.is_static()) || !a.overlaps(b) {
        return None;
    }

    let axis = contact_axis(a, b);
    let resolved = match axis {
        Axis::Vertical => {
            if a.prev.y + a.size.y / 2.0 <= b.prev.y + b.size.y / 2.0 {
                separate_y(a, b)
            } else {
                separate_y(b, a)
            }
        }
        Axis::Horizontal => {
            if a.prev.x + a.size.x / 2.0 <= b.prev.x + b.size.x / 2.0 {
                separate_x(a, b)
            } else {
                separate_x(b, a)
            }
        }
    };

    resolved.then_some(Contact { axis })
}

/// Vertical if the bodies were vertically apart before this step, horizontal
/// if they were horizontally apart, otherwise the shallower penetration.
fn contact_axis(a: &Body, b: &Body) -> Axis {
    let was_apart_y = a.prev.y + a.size.y <= b.prev.y || b.prev.y + b.size.y <= a.prev.y;
    if was_apart_y {
        return Axis::Vertical;
    }
    let was_apart_x = a.prev.x + a.size.x <= b.prev.x || b.prev.x + b.size.x <= a.prev.x;
    if was_apart_x {
        return Axis::Horizontal;
    }

    let overlap_x = a.right().min(b.right()) - a.left().max(b.left());
    let overlap_y = a.bottom().min(b.bottom()) - a.top().max(b.top());
    if overlap_y <= overlap_x {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

fn choose_mover(leading: &Body, trailing: &Body, leading_speed: f32, trailing_speed: f32) -> Mover {
    if trailing.is_static() {
        return Mover::Leading;
    }
    if leading.is_static() {
        return Mover::Trailing;
    }
    match (leading.pushable, trailing.pushable) {
        (true, false) => Mover::Leading,
        (false, true) => Mover::Trailing,
        _ => {
            if leading_speed > trailing_speed {
                Mover::Leading
            } else if trailing_speed > leading_speed {
                Mover::Trailing
            } else {
                Mover::Both
            }
        }
    }
}

/// `upper` is above `lower`
fn separate_y(upper: &mut Body, lower: &mut Body) -> bool {
    if !upper.check_collision.down || !lower.check_collision.up {
        return false;
    }

    match choose_mover(upper, lower, upper.vel.y, -lower.vel.y) {
        Mover::Leading => {
            upper.pos.y = lower.top() - upper.size.y;
            upper.vel.y = upper.vel.y.min(0.0);
        }
        Mover::Trailing => {
            lower.pos.y = upper.bottom();
            lower.vel.y = lower.vel.y.max(0.0);
        }
        Mover::Both => {
            let overlap = upper.bottom() - lower.top();
            upper.pos.y -= overlap / 2.0;
            lower.pos.y = upper.bottom();
            upper.vel.y = upper.vel.y.min(0.0);
            lower.vel.y = lower.vel.y.max(0.0);
        }
    }

    upper.blocked.down = true;
    lower.blocked.up = true;
    true
}

/// `left` is left of `right`
fn separate_x(left: &mut Body, right: &mut Body) -> bool {
    if !left.check_collision.right || !right.check_collision.left {
        return false;
    }

    match choose_mover(left, right, left.vel.x, -right.vel.x) {
        Mover::Leading => {
            left.pos.x = right.left() - left.size.x;
            left.vel.x = left.vel.x.min(0.0);
        }
        Mover::Trailing => {
            right.pos.x = left.right();
            right.vel.x = right.vel.x.max(0.0);
        }
        Mover::Both => {
            let overlap = left.right() - right.left();
            left.pos.x -= overlap / 2.0;
            right.pos.x = left.right();
            left.vel.x = left.vel.x.min(0.0);
            right.vel.x = right.vel.x.max(0.0);
        }
    }

    left.blocked.right = true;
    right.blocked.left = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn block(id: u32, x: f32, y: f32) -> Body {
        let mut body = Body::from_center(id, Vec2::new(x, y), Vec2::splat(50.0));
        body.pushable = false;
        body
    }

    fn bounds() -> WorldBounds {
        WorldBounds {
            width: 800.0,
            height: 600.0,
            check: Faces {
                up: false,
                ..Faces::ALL
            },
        }
    }

    #[test]
    fn test_integrate_applies_gravity_and_velocity() {
        let mut body = Body::from_center(1, Vec2::new(100.0, 100.0), Vec2::splat(10.0));
        body.gravity = Vec2::new(0.0, 100.0);
        body.blocked.down = true;
        integrate(&mut body, 0.5);
        assert_eq!(body.vel, Vec2::new(0.0, 50.0));
        assert_eq!(body.center(), Vec2::new(100.0, 125.0));
        assert_eq!(body.prev, Vec2::new(95.0, 95.0));
        assert!(!body.blocked.down);
    }

    #[test]
    fn test_integrate_skips_static_and_disabled() {
        let mut floor = Body::new_static(1, Vec2::new(400.0, 600.0), Vec2::new(800.0, 1.0));
        floor.vel = Vec2::new(0.0, 10.0);
        integrate(&mut floor, 1.0);
        assert_eq!(floor.center(), Vec2::new(400.0, 600.0));

        let mut gone = block(2, 100.0, 100.0);
        gone.vel = Vec2::new(0.0, 300.0);
        gone.enabled = false;
        integrate(&mut gone, 1.0);
        assert_eq!(gone.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_world_bounds_bottom_and_sides() {
        let mut body = block(1, 25.0, 590.0);
        body.collide_world_bounds = true;
        body.vel = Vec2::new(-10.0, 300.0);
        body.pos.x = -5.0;
        collide_world_bounds(&mut body, &bounds());
        assert_eq!(body.left(), 0.0);
        assert_eq!(body.bottom(), 600.0);
        assert_eq!(body.vel, Vec2::ZERO);
        assert!(body.blocked.down && body.blocked.left);
    }

    #[test]
    fn test_world_bounds_top_disabled() {
        let mut body = block(1, 100.0, -100.0);
        body.collide_world_bounds = true;
        collide_world_bounds(&mut body, &bounds());
        assert_eq!(body.center().y, -100.0);
        assert!(!body.blocked.up);
    }

    #[test]
    fn test_falling_block_lands_on_resting_block() {
        let mut lower = block(1, 100.0, 575.0);
        let mut upper = block(2, 100.0, 530.0);
        upper.prev.y -= 10.0;
        upper.vel.y = 300.0;

        let contact = separate(&mut upper, &mut lower).unwrap();
        assert_eq!(contact.axis, Axis::Vertical);
        assert_eq!(upper.bottom(), lower.top());
        assert_eq!(upper.vel.y, 0.0);
        assert_eq!(lower.center().y, 575.0);
        assert!(upper.blocked.down);
        assert!(lower.blocked.up);
    }

    #[test]
    fn test_block_pushes_pushable_player_down() {
        let mut player = Body::from_center(1, Vec2::new(100.0, 500.0), Vec2::new(30.0, 100.0));
        let mut falling = block(2, 100.0, 430.0);
        falling.prev.y -= 10.0;
        falling.vel.y = 300.0;

        assert!(separate(&mut player, &mut falling).is_some());
        assert_eq!(player.top(), falling.bottom());
        assert_eq!(falling.center().y, 430.0);
    }

    #[test]
    fn test_disabled_faces_skip_separation() {
        let mut lower = block(1, 100.0, 575.0);
        let mut upper = block(2, 100.0, 530.0);
        upper.prev.y -= 10.0;
        upper.check_collision.down = false;
        assert!(separate(&mut upper, &mut lower).is_none());
        assert_eq!(upper.center().y, 530.0);
    }

    #[test]
    fn test_static_body_never_moves() {
        let mut ceiling = Body::new_static(1, Vec2::new(400.0, 0.0), Vec2::new(800.0, 1.0));
        let mut player = Body::from_center(2, Vec2::new(400.0, 50.0), Vec2::new(30.0, 100.0));
        player.prev.y += 10.0;
        player.vel.y = -500.0;

        assert!(separate(&mut ceiling, &mut player).is_some());
        assert_eq!(ceiling.center(), Vec2::new(400.0, 0.0));
        assert_eq!(player.top(), ceiling.bottom());
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_horizontal_push_moves_player_out_of_block() {
        let mut player = Body::from_center(1, Vec2::new(80.0, 575.0), Vec2::new(30.0, 50.0));
        player.prev.x -= 5.0;
        player.vel.x = 200.0;
        let mut wall = block(2, 115.0, 575.0);

        let contact = separate(&mut player, &mut wall).unwrap();
        assert_eq!(contact.axis, Axis::Horizontal);
        assert_eq!(player.right(), wall.left());
        assert_eq!(player.vel.x, 0.0);
        assert!(player.blocked.right);
    }

    #[test]
    fn test_equal_approach_splits_correction() {
        let mut a = block(1, 100.0, 100.0);
        let mut b = block(2, 100.0, 140.0);
        a.prev.y -= 20.0;
        b.prev.y += 20.0;
        separate(&mut a, &mut b).unwrap();
        assert_eq!(a.center().y, 95.0);
        assert_eq!(a.bottom(), b.top());
    }

    #[test]
    fn test_clamp_step() {
        assert_eq!(ArcadeConfig::clamp_step(1.0), MAX_STEP_SECS);
        assert_eq!(ArcadeConfig::clamp_step(-1.0), 0.0);
        assert_eq!(ArcadeConfig::clamp_step(0.016), 0.016);
    }
}
