//! Shape generation for 2D primitives
//!
//! Everything is in screen pixels, y down, matching the simulation.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::BLOCK_STROKE_WIDTH;
use crate::sim::Scene;

/// Generate vertices for a filled axis-aligned rectangle (top-left + size)
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    // Two triangles
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Filled rectangle with an outline centred on its edge
pub fn stroked_rect(
    pos: Vec2,
    size: Vec2,
    fill: [f32; 4],
    stroke: [f32; 4],
    stroke_width: f32,
) -> Vec<Vertex> {
    let mut vertices = rect(pos, size, fill);
    if stroke_width <= 0.0 {
        return vertices;
    }

    let half = stroke_width / 2.0;
    let outer = pos - Vec2::splat(half);
    let outer_size = size + Vec2::splat(stroke_width);

    // Top and bottom bands span the full outer width, sides fill the gap
    vertices.extend(rect(outer, Vec2::new(outer_size.x, stroke_width), stroke));
    vertices.extend(rect(
        Vec2::new(outer.x, pos.y + size.y - half),
        Vec2::new(outer_size.x, stroke_width),
        stroke,
    ));
    let side_height = (outer_size.y - 2.0 * stroke_width).max(0.0);
    vertices.extend(rect(
        Vec2::new(outer.x, outer.y + stroke_width),
        Vec2::new(stroke_width, side_height),
        stroke,
    ));
    vertices.extend(rect(
        Vec2::new(pos.x + size.x - half, outer.y + stroke_width),
        Vec2::new(stroke_width, side_height),
        stroke,
    ));

    vertices
}

/// All visible bodies: blocks oldest first, then the player on top
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(scene.blocks.len() * 30 + 6);
    for block in scene.blocks.iter().filter(|b| b.enabled) {
        vertices.extend(stroked_rect(
            block.pos,
            block.size,
            colors::BLOCK,
            colors::BLOCK_STROKE,
            BLOCK_STROKE_WIDTH,
        ));
    }
    vertices.extend(rect(scene.player.pos, scene.player.size, colors::PLAYER));
    vertices
}
