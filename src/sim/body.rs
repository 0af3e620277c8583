//! Axis-aligned rigid bodies
//!
//! Screen coordinates: origin at the top-left of the canvas, y grows downward.
//! A body's `pos` is its top-left corner.

use glam::Vec2;

/// Per-side flags (collision checks, blocked contacts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faces {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Faces {
    pub const ALL: Faces = Faces {
        up: true,
        down: true,
        left: true,
        right: true,
    };

    pub const NONE: Faces = Faces {
        up: false,
        down: false,
        left: false,
        right: false,
    };
}

impl Default for Faces {
    fn default() -> Self {
        Faces::ALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Integrated every step
    Dynamic,
    /// Never moves; always wins separation
    Static,
}

/// A simulated rectangle
#[derive(Debug, Clone)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Position before the last integration (contact axis detection)
    pub prev: Vec2,
    pub vel: Vec2,
    pub gravity: Vec2,
    pub kind: BodyKind,
    /// Whether other bodies may push this one during separation
    pub pushable: bool,
    pub collide_world_bounds: bool,
    /// Faces that take part in separation
    pub check_collision: Faces,
    /// Faces touching something this step
    pub blocked: Faces,
    /// False once destroyed
    pub enabled: bool,
}

impl Body {
    /// Dynamic body centred at `center`
    pub fn from_center(id: u32, center: Vec2, size: Vec2) -> Self {
        let pos = center - size / 2.0;
        Self {
            id,
            pos,
            size,
            prev: pos,
            vel: Vec2::ZERO,
            gravity: Vec2::ZERO,
            kind: BodyKind::Dynamic,
            pushable: true,
            collide_world_bounds: false,
            check_collision: Faces::ALL,
            blocked: Faces::NONE,
            enabled: true,
        }
    }

    /// Immovable body centred at `center`
    pub fn new_static(id: u32, center: Vec2, size: Vec2) -> Self {
        Self {
            kind: BodyKind::Static,
            pushable: false,
            ..Self::from_center(id, center, size)
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Resting on something below
    pub fn on_floor(&self) -> bool {
        self.blocked.down
    }

    /// Strict AABB overlap; shared edges do not count
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Move to a new centre, forgetting the previous position
    pub fn reset_center(&mut self, center: Vec2) {
        self.pos = center - self.size / 2.0;
        self.prev = self.pos;
        self.vel = Vec2::ZERO;
        self.blocked = Faces::NONE;
    }

    pub fn destroy(&mut self) {
        self.enabled = false;
        self.vel = Vec2::ZERO;
    }
}
