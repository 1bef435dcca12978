//! Frame composition
//!
//! Builds the full back-to-front list of primitives for one frame from the
//! world mirror and the field geometry. Coordinates are simulation units;
//! nothing here knows about pixels.

use glam::Vec2;

use super::vertex::colors;
use crate::field::FieldConfig;
use crate::world::{Team, WorldModel};

/// Outline width of players and the ball
const ENTITY_OUTLINE: f32 = 1.0;

/// One drawing primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    FillRect {
        min: Vec2,
        max: Vec2,
        color: [f32; 4],
    },
    StrokeRect {
        min: Vec2,
        max: Vec2,
        width: f32,
        color: [f32; 4],
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: [f32; 4],
    },
    /// Non-negative integer drawn centered at `center`
    Number {
        value: u32,
        center: Vec2,
        height: f32,
        color: [f32; 4],
    },
}

/// Ordered primitives for one full repaint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCmd>,
}

impl Scene {
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }
}

/// Compose the frame: field, score, markings, players, ball, outline
pub fn build_scene(world: &WorldModel, config: &FieldConfig) -> Scene {
    let mut scene = Scene::default();
    let half = config.half_extents();
    let lw = config.line_width();
    let goal_half = config.goal_size * 0.5;

    scene.push(DrawCmd::FillRect {
        min: -half,
        max: half,
        color: colors::FIELD,
    });

    // Score sits under the markings so it never hides anything
    let score = world.score();
    for team in Team::ALL {
        scene.push(DrawCmd::Number {
            value: score.for_team(team),
            center: Vec2::new(team.side() * 0.25 * config.field_width, 0.0),
            height: 0.25 * config.field_height,
            color: colors::SCORE,
        });
    }

    // Touch lines
    scene.push(DrawCmd::StrokeRect {
        min: -half,
        max: half,
        width: lw,
        color: colors::LINE,
    });

    scene.push(DrawCmd::StrokeCircle {
        center: Vec2::ZERO,
        radius: goal_half,
        width: lw,
        color: colors::LINE,
    });

    scene.push(DrawCmd::Line {
        from: Vec2::new(0.0, -half.y),
        to: Vec2::new(0.0, half.y),
        width: lw,
        color: colors::LINE,
    });

    // Penalty boxes, goal_half deep into each half
    for team in Team::ALL {
        let side = team.side();
        let goal_x = side * half.x;
        let inner_x = side * (half.x - goal_half);
        scene.push(DrawCmd::StrokeRect {
            min: Vec2::new(goal_x.min(inner_x), -goal_half),
            max: Vec2::new(goal_x.max(inner_x), goal_half),
            width: lw,
            color: colors::LINE,
        });
    }

    // Goal lines in the defending team's color
    let goal_line_half = (goal_half - config.edge_radius).max(0.0);
    for team in Team::ALL {
        let x = team.side() * half.x;
        scene.push(DrawCmd::Line {
            from: Vec2::new(x, -goal_line_half),
            to: Vec2::new(x, goal_line_half),
            width: lw,
            color: colors::team(team),
        });
    }

    for (_, player) in world.players() {
        scene.push(DrawCmd::FillCircle {
            center: player.pos,
            radius: config.player_radius,
            color: colors::team(player.team),
        });
        scene.push(DrawCmd::StrokeCircle {
            center: player.pos,
            radius: config.player_radius,
            width: ENTITY_OUTLINE,
            color: colors::OUTLINE,
        });
    }

    // Local marker sits above every player body
    if let Some(local) = world.local_player(config) {
        scene.push(DrawCmd::FillCircle {
            center: local.pos,
            radius: 0.5 * config.player_radius,
            color: colors::LOCAL_MARKER,
        });
    }

    if let Some(ball) = world.ball() {
        scene.push(DrawCmd::FillCircle {
            center: ball,
            radius: config.ball_radius,
            color: colors::BALL,
        });
        scene.push(DrawCmd::StrokeCircle {
            center: ball,
            radius: config.ball_radius,
            width: ENTITY_OUTLINE,
            color: colors::OUTLINE,
        });
    }

    let er = Vec2::splat(config.edge_radius);
    scene.push(DrawCmd::StrokeRect {
        min: -half - er,
        max: half + er,
        width: ENTITY_OUTLINE,
        color: colors::OUTLINE,
    });

    scene
}
