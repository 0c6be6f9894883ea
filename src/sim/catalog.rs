//! Block archetypes
//!
//! Every block is a 4x4 floor slab. Obstacle blocks add one kinematic body on
//! top of the slab; the End block adds a fixed trophy. Dimensions are full box
//! extents in course units, offsets are relative to the block origin.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;

/// Block archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Start,
    End,
    Spinner,
    Limbo,
    Axe,
}

/// How a block's obstacle body moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    None,
    Spinner,
    Limbo,
    Axe,
}

/// Per-instance motion parameters, drawn once when the level is generated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionParams {
    None,
    /// Signed yaw speed (rad/s), |speed| in [2, 3)
    Spinner { speed: f32 },
    /// Phase offset (rad) in [0, 2π)
    Limbo { phase: f32 },
    /// Phase offset (rad) in [0, 2π)
    Axe { phase: f32 },
}

impl MotionParams {
    pub fn kind(&self) -> MotionKind {
        match self {
            MotionParams::None => MotionKind::None,
            MotionParams::Spinner { .. } => MotionKind::Spinner,
            MotionParams::Limbo { .. } => MotionKind::Limbo,
            MotionParams::Axe { .. } => MotionKind::Axe,
        }
    }
}

/// Floor slab shading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorStyle {
    /// Start/End slabs
    Light,
    /// Obstacle slabs
    Dark,
}

/// An axis-aligned box relative to some origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxFootprint {
    pub center: Vec3,
    pub size: Vec3,
}

impl BoxFootprint {
    pub const fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }
}

/// The moving part of an obstacle block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleBody {
    /// Rest position of the kinematic body relative to the block origin.
    /// Zero for obstacles whose translation is driven, since their targets
    /// are computed from the block origin.
    pub body_offset: Vec3,
    /// Collider/mesh box relative to the body
    pub shape: BoxFootprint,
}

/// The End block's fixed finish trophy (hull collider built from its mesh)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrophyBody {
    pub body_offset: Vec3,
    pub mesh_scale: f32,
}

/// Static description of a block archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub kind: BlockKind,
    pub motion: MotionKind,
    pub floor: FloorStyle,
    pub slab: BoxFootprint,
    pub obstacle: Option<ObstacleBody>,
    pub trophy: Option<TrophyBody>,
}

const SLAB_SIZE: Vec3 = Vec3::new(COURSE_WIDTH, 0.2, SEGMENT_LENGTH);
const SLAB: BoxFootprint = BoxFootprint::new(Vec3::new(0.0, -0.1, 0.0), SLAB_SIZE);

static START: Archetype = Archetype {
    kind: BlockKind::Start,
    motion: MotionKind::None,
    floor: FloorStyle::Light,
    slab: SLAB,
    obstacle: None,
    trophy: None,
};

// The finish slab sits flush with the block origin.
static END: Archetype = Archetype {
    kind: BlockKind::End,
    motion: MotionKind::None,
    floor: FloorStyle::Light,
    slab: BoxFootprint::new(Vec3::ZERO, SLAB_SIZE),
    obstacle: None,
    trophy: Some(TrophyBody {
        body_offset: Vec3::new(0.0, 0.25, 0.0),
        mesh_scale: 0.2,
    }),
};

static SPINNER: Archetype = Archetype {
    kind: BlockKind::Spinner,
    motion: MotionKind::Spinner,
    floor: FloorStyle::Dark,
    slab: SLAB,
    obstacle: Some(ObstacleBody {
        body_offset: Vec3::new(0.0, 0.2, 0.0),
        shape: BoxFootprint::new(Vec3::new(0.0, 0.2, 0.0), Vec3::new(3.0, 0.25, 0.25)),
    }),
    trophy: None,
};

static LIMBO: Archetype = Archetype {
    kind: BlockKind::Limbo,
    motion: MotionKind::Limbo,
    floor: FloorStyle::Dark,
    slab: SLAB,
    obstacle: Some(ObstacleBody {
        body_offset: Vec3::ZERO,
        shape: BoxFootprint::new(Vec3::new(0.0, 0.2, 0.0), Vec3::new(3.0, 0.5, 0.5)),
    }),
    trophy: None,
};

static AXE: Archetype = Archetype {
    kind: BlockKind::Axe,
    motion: MotionKind::Axe,
    floor: FloorStyle::Dark,
    slab: SLAB,
    obstacle: Some(ObstacleBody {
        body_offset: Vec3::ZERO,
        shape: BoxFootprint::new(Vec3::new(0.0, 1.2, 0.0), Vec3::new(2.0, 2.0, 0.5)),
    }),
    trophy: None,
};

impl BlockKind {
    /// Default obstacle palette
    pub const OBSTACLES: [BlockKind; 3] = [BlockKind::Spinner, BlockKind::Limbo, BlockKind::Axe];

    pub fn archetype(&self) -> &'static Archetype {
        match self {
            BlockKind::Start => &START,
            BlockKind::End => &END,
            BlockKind::Spinner => &SPINNER,
            BlockKind::Limbo => &LIMBO,
            BlockKind::Axe => &AXE,
        }
    }

    pub fn motion(&self) -> MotionKind {
        self.archetype().motion
    }

    /// True for kinds that may appear in the middle of a course
    pub fn is_obstacle(&self) -> bool {
        self.archetype().obstacle.is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Start => "start",
            BlockKind::End => "end",
            BlockKind::Spinner => "spinner",
            BlockKind::Limbo => "limbo",
            BlockKind::Axe => "axe",
        }
    }

    /// Draw this kind's per-instance motion parameters
    pub fn draw_motion(&self, rng: &mut RandomSource) -> MotionParams {
        use std::f32::consts::TAU;

        match self.motion() {
            MotionKind::None => MotionParams::None,
            MotionKind::Spinner => {
                let magnitude = rng.range_f32(SPINNER_SPEED_MIN, SPINNER_SPEED_MAX);
                MotionParams::Spinner {
                    speed: magnitude * rng.sign(),
                }
            }
            MotionKind::Limbo => MotionParams::Limbo {
                phase: rng.range_f32(0.0, TAU),
            },
            MotionKind::Axe => MotionParams::Axe {
                phase: rng.range_f32(0.0, TAU),
            },
        }
    }
}
