//! Level assembly
//!
//! A level is Start, `count` obstacle blocks drawn from a palette, then End,
//! laid out one segment apart toward -Z and enclosed by walls.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::catalog::{BlockKind, BoxFootprint, MotionParams};
use super::rng::RandomSource;
use crate::consts::*;
use crate::error::{CourseError, Result};
use crate::segment_offset;

/// Wall thickness and height of the enclosing bounds
pub const WALL_THICKNESS: f32 = 0.3;
pub const WALL_HEIGHT: f32 = 1.5;

/// A placed block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    /// Segment index (0 = Start)
    pub index: usize,
    pub kind: BlockKind,
    /// Block origin in course space
    pub position: Vec3,
    pub motion: MotionParams,
}

impl BlockInstance {
    /// Position the kinematic body's pose is computed from, if it has one
    pub fn body_position(&self) -> Option<Vec3> {
        self.kind
            .archetype()
            .obstacle
            .map(|body| self.position + body.body_offset)
    }
}

/// Enclosing walls and floor collider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Length in segments
    pub length: usize,
    pub left_wall: BoxFootprint,
    pub right_wall: BoxFootprint,
    pub back_wall: BoxFootprint,
    /// One floor collider spanning the whole course
    pub floor: BoxFootprint,
}

impl Bounds {
    pub fn new(length: usize) -> Self {
        let len = length as f32;
        let span = len * SEGMENT_LENGTH;
        // The course starts half a segment in front of the Start origin.
        let mid_z = -span / 2.0 + SEGMENT_LENGTH / 2.0;
        let side_x = COURSE_WIDTH / 2.0 + WALL_THICKNESS / 2.0;
        let wall_y = WALL_HEIGHT / 2.0;
        let side_size = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, span);

        Self {
            length,
            left_wall: BoxFootprint::new(Vec3::new(-side_x, wall_y, mid_z), side_size),
            right_wall: BoxFootprint::new(Vec3::new(side_x, wall_y, mid_z), side_size),
            back_wall: BoxFootprint::new(
                Vec3::new(0.0, wall_y, -span + SEGMENT_LENGTH / 2.0 + WALL_THICKNESS / 2.0),
                Vec3::new(COURSE_WIDTH, WALL_HEIGHT, WALL_THICKNESS),
            ),
            floor: BoxFootprint::new(
                Vec3::new(0.0, -0.1, mid_z),
                Vec3::new(COURSE_WIDTH, 0.2, span),
            ),
        }
    }
}

/// A generated course. Rebuilt wholesale whenever the seed changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub seed: u64,
    /// Start, middles, End in course order
    pub blocks: Vec<BlockInstance>,
    pub bounds: Bounds,
}

impl Level {
    /// Number of obstacle blocks between Start and End
    pub fn count(&self) -> usize {
        self.blocks.len().saturating_sub(2)
    }

    /// Kinds of the middle blocks in order
    pub fn obstacle_kinds(&self) -> Vec<BlockKind> {
        self.obstacles().map(|b| b.kind).collect()
    }

    /// Middle blocks in order
    pub fn obstacles(&self) -> impl Iterator<Item = &BlockInstance> {
        let end = self.blocks.len().saturating_sub(1);
        self.blocks.iter().take(end).skip(1)
    }

    /// Position of the finish block
    pub fn finish_position(&self) -> Vec3 {
        segment_offset(self.blocks.len().saturating_sub(1))
    }
}

/// Assemble a level from a block count, a seed and an obstacle palette.
///
/// Kinds are drawn one slot at a time from a generator seeded with `seed`;
/// each middle block's motion parameters are drawn right after its kind, so
/// the whole sequence depends on draw order.
pub fn generate(count: i64, seed: u64, palette: &[BlockKind]) -> Result<Level> {
    if count < 0 {
        return Err(CourseError::InvalidBlockCount(count));
    }
    if palette.is_empty() {
        return Err(CourseError::EmptyPalette);
    }

    let count = count as usize;
    let mut rng = RandomSource::new(seed);
    let mut blocks = Vec::with_capacity(count + 2);

    blocks.push(BlockInstance {
        index: 0,
        kind: BlockKind::Start,
        position: segment_offset(0),
        motion: MotionParams::None,
    });

    for i in 0..count {
        let kind = palette[rng.pick_index(palette.len())];
        let motion = kind.draw_motion(&mut rng);
        blocks.push(BlockInstance {
            index: i + 1,
            kind,
            position: segment_offset(i + 1),
            motion,
        });
    }

    blocks.push(BlockInstance {
        index: count + 1,
        kind: BlockKind::End,
        position: segment_offset(count + 1),
        motion: MotionParams::None,
    });

    log::info!("Generated level: seed={}, obstacles={}", seed, count);

    Ok(Level {
        seed,
        blocks,
        bounds: Bounds::new(count + 2),
    })
}
