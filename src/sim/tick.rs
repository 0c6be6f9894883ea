//! Fixed timestep course driver
//!
//! Applies queued phase requests, rebuilds the level when the seed changed,
//! then evaluates every obstacle pose at one shared elapsed time.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::catalog::BlockKind;
use super::kinematics::{TargetPose, pose};
use super::level::{Level, generate};
use super::phase::{Clock, RunPhase, RunPhaseController, SystemClock};
use crate::error::Result;
use crate::settings::Settings;

/// Salt that splits the restart-seed stream from the initial level seed
const RESTART_STREAM_SALT: u64 = 2654435761;

/// Phase requests for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player pressed a movement key
    pub start: bool,
    /// Marble reached the finish
    pub end: bool,
    /// Player asked for a new course (or fell off)
    pub restart: bool,
}

/// Kinematic target for one obstacle body this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicTarget {
    /// Segment index of the owning block
    pub block: usize,
    pub kind: BlockKind,
    /// Rest position of the body
    pub base: Vec3,
    pub pose: TargetPose,
}

/// Run controller plus the level it currently describes
#[derive(Debug)]
pub struct Course<C: Clock = SystemClock> {
    settings: Settings,
    controller: RunPhaseController<C>,
    level: Level,
    /// Simulation tick counter, never reset
    time_ticks: u64,
}

impl Course<SystemClock> {
    pub fn with_system_clock(settings: Settings) -> Result<Self> {
        Self::new(settings, SystemClock)
    }
}

impl<C: Clock> Course<C> {
    pub fn new(settings: Settings, clock: C) -> Result<Self> {
        settings.validate()?;
        let seed = settings.initial_seed;
        let level = generate(settings.blocks_count as i64, seed, &settings.palette)?;
        let controller = RunPhaseController::new(
            settings.blocks_count,
            seed,
            seed.wrapping_mul(RESTART_STREAM_SALT).wrapping_add(1),
            clock,
        );

        Ok(Self {
            settings,
            controller,
            level,
            time_ticks: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn controller(&self) -> &RunPhaseController<C> {
        &self.controller
    }

    pub fn phase(&self) -> RunPhase {
        self.controller.phase()
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Seconds of simulation since the course was created
    pub fn elapsed(&self) -> f32 {
        self.time_ticks as f32 * self.settings.sim_dt()
    }

    /// Run time in ms: frozen once ended, live while playing, None while ready
    pub fn run_duration_ms(&self) -> Option<f64> {
        let start = self.controller.start_time()?;
        let end = self
            .controller
            .end_time()
            .unwrap_or_else(|| self.controller.clock().now_ms());
        Some(end - start)
    }

    /// Rebuild the level if the controller's seed moved on
    fn sync_level(&mut self) -> Result<()> {
        let seed = self.controller.blocks_seed();
        if seed != self.level.seed {
            self.level = generate(
                self.controller.blocks_count() as i64,
                seed,
                &self.settings.palette,
            )?;
        }
        Ok(())
    }

    /// Obstacle targets at the current elapsed time
    pub fn targets(&self) -> Vec<KinematicTarget> {
        let elapsed = self.elapsed();
        self.level
            .obstacles()
            .filter_map(|block| {
                let base = block.body_position()?;
                Some(KinematicTarget {
                    block: block.index,
                    kind: block.kind,
                    base,
                    pose: pose(elapsed, &block.motion, base),
                })
            })
            .collect()
    }
}

/// Advance the course by one fixed timestep and return this tick's targets
pub fn tick<C: Clock>(course: &mut Course<C>, input: &TickInput) -> Result<Vec<KinematicTarget>> {
    if input.start {
        course.controller.start();
    }
    if input.end {
        course.controller.end();
    }
    if input.restart && course.controller.restart() {
        course.sync_level()?;
    }

    course.time_ticks += 1;
    Ok(course.targets())
}
