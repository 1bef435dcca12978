//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in simulation units; the vertex
//! shader applies the frame's transform.

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::{DrawCmd, Scene};
use super::vertex::Vertex;

/// Digit cell width relative to glyph height
const GLYPH_WIDTH: f32 = 0.55;
/// Segment thickness relative to glyph height
const GLYPH_STROKE: f32 = 0.12;
/// Advance between digit centers relative to glyph height
const GLYPH_ADVANCE: f32 = 0.75;

/// Lit segments per digit, bit order a b c d e f g (top, upper right,
/// lower right, bottom, lower left, upper left, middle)
const DIGIT_SEGMENTS: [u8; 10] = [
    0b0111111, // 0
    0b0000110, // 1
    0b1011011, // 2
    0b1001111, // 3
    0b1100110, // 4
    0b1101101, // 5
    0b1111101, // 6
    0b0000111, // 7
    0b1111111, // 8
    0b1101111, // 9
];

/// Tessellate a whole scene, preserving draw order
pub fn tessellate(scene: &Scene, circle_segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for cmd in scene.commands() {
        match *cmd {
            DrawCmd::FillRect { min, max, color } => {
                vertices.extend(rect(min, max, color));
            }
            DrawCmd::StrokeRect {
                min,
                max,
                width,
                color,
            } => {
                vertices.extend(rect_outline(min, max, width, color));
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => {
                vertices.extend(line(from, to, width, color));
            }
            DrawCmd::FillCircle {
                center,
                radius,
                color,
            } => {
                vertices.extend(circle(center, radius, color, circle_segments));
            }
            DrawCmd::StrokeCircle {
                center,
                radius,
                width,
                color,
            } => {
                let half = width * 0.5;
                vertices.extend(ring(
                    center,
                    (radius - half).max(0.0),
                    radius + half,
                    color,
                    circle_segments,
                ));
            }
            DrawCmd::Number {
                value,
                center,
                height,
                color,
            } => {
                vertices.extend(number(value, center, height, color));
            }
        }
    }
    vertices
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Generate vertices for a rectangle outline centered on its edges
pub fn rect_outline(min: Vec2, max: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let h = width * 0.5;
    let mut vertices = Vec::with_capacity(24);
    // Bottom and top span the full width including corners
    vertices.extend(rect(
        Vec2::new(min.x - h, min.y - h),
        Vec2::new(max.x + h, min.y + h),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x - h, max.y - h),
        Vec2::new(max.x + h, max.y + h),
        color,
    ));
    // Sides fill the gap between them
    vertices.extend(rect(
        Vec2::new(min.x - h, min.y + h),
        Vec2::new(min.x + h, max.y - h),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(max.x - h, min.y + h),
        Vec2::new(max.x + h, max.y - h),
        color,
    ));
    vertices
}

/// Generate vertices for a thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a non-negative integer as seven-segment digits
pub fn number(value: u32, center: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let digits: Vec<u8> = value
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect();
    let advance = height * GLYPH_ADVANCE;
    let first_x = center.x - advance * (digits.len() as f32 - 1.0) * 0.5;

    let mut vertices = Vec::new();
    for (i, digit) in digits.iter().enumerate() {
        let cell = Vec2::new(first_x + advance * i as f32, center.y);
        vertices.extend(digit_glyph(*digit, cell, height, color));
    }
    vertices
}

/// Rectangles of the lit segments of one digit
pub fn digit_segments(digit: u8, center: Vec2, height: f32) -> Vec<(Vec2, Vec2)> {
    let mask = DIGIT_SEGMENTS[(digit % 10) as usize];
    let w = height * GLYPH_WIDTH * 0.5;
    let h = height * 0.5;
    let t = height * GLYPH_STROKE;
    let (cx, cy) = (center.x, center.y);

    // Verticals stop short of the horizontals so translucent glyphs don't overlap
    let segments = [
        (Vec2::new(cx - w, cy + h - t), Vec2::new(cx + w, cy + h)),
        (Vec2::new(cx + w - t, cy + t * 0.5), Vec2::new(cx + w, cy + h - t)),
        (Vec2::new(cx + w - t, cy - h + t), Vec2::new(cx + w, cy - t * 0.5)),
        (Vec2::new(cx - w, cy - h), Vec2::new(cx + w, cy - h + t)),
        (Vec2::new(cx - w, cy - h + t), Vec2::new(cx - w + t, cy - t * 0.5)),
        (Vec2::new(cx - w, cy + t * 0.5), Vec2::new(cx - w + t, cy + h - t)),
        (Vec2::new(cx - w, cy - t * 0.5), Vec2::new(cx + w, cy + t * 0.5)),
    ];

    segments
        .into_iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, seg)| seg)
        .collect()
}

fn digit_glyph(digit: u8, center: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    digit_segments(digit, center, height)
        .into_iter()
        .flat_map(|(min, max)| rect(min, max, color))
        .collect()
}
