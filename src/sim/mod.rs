//! Deterministic simulation module
//!
//! All course logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (course order)
//! - No rendering or physics-engine dependencies

pub mod catalog;
pub mod kinematics;
pub mod level;
pub mod phase;
pub mod rng;
pub mod tick;

pub use catalog::{
    Archetype, BlockKind, BoxFootprint, FloorStyle, MotionKind, MotionParams, ObstacleBody,
    TrophyBody,
};
pub use kinematics::{TargetPose, axe_pose, limbo_pose, pose, spinner_pose};
pub use level::{BlockInstance, Bounds, Level, generate};
pub use phase::{Clock, ManualClock, RunPhase, RunPhaseController, RunTiming, SystemClock};
pub use rng::RandomSource;
pub use tick::{Course, KinematicTarget, TickInput, tick};
