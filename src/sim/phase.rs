//! Run lifecycle
//!
//! Ready -> Playing -> Ended -> Ready (restart) -> Playing ...
//!
//! Requests made in the wrong phase are ignored rather than rejected: finish
//! triggers and key presses can fire more than once.

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Wall-clock source, in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Real time since the Unix epoch
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or_default()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Arc::new(Mutex::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: f64) {
        if let Ok(mut now) = self.now.lock() {
            *now += ms;
        }
    }

    pub fn set(&self, ms: f64) {
        if let Ok(mut now) = self.now.lock() {
            *now = ms;
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the first input
    #[default]
    Ready,
    /// Timer running
    Playing,
    /// Finish reached, timer stopped
    Ended,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Ready => "ready",
            RunPhase::Playing => "playing",
            RunPhase::Ended => "ended",
        }
    }
}

/// Phase plus timing, always replaced as one record
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunTiming {
    pub phase: RunPhase,
    pub start_ms: f64,
    pub end_ms: f64,
}

/// Owns the run phase, its timestamps and the level seed
#[derive(Debug)]
pub struct RunPhaseController<C: Clock = SystemClock> {
    timing: RunTiming,
    blocks_seed: u64,
    blocks_count: u32,
    /// Restart seeds only; never shared with level generation
    seeds: RandomSource,
    clock: C,
}

impl<C: Clock> RunPhaseController<C> {
    pub fn new(blocks_count: u32, blocks_seed: u64, seed_stream: u64, clock: C) -> Self {
        Self {
            timing: RunTiming::default(),
            blocks_seed,
            blocks_count,
            seeds: RandomSource::new(seed_stream),
            clock,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.timing.phase
    }

    pub fn timing(&self) -> RunTiming {
        self.timing
    }

    pub fn blocks_seed(&self) -> u64 {
        self.blocks_seed
    }

    pub fn blocks_count(&self) -> u32 {
        self.blocks_count
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start timestamp of the current run (Playing or Ended)
    pub fn start_time(&self) -> Option<f64> {
        match self.timing.phase {
            RunPhase::Ready => None,
            RunPhase::Playing | RunPhase::Ended => Some(self.timing.start_ms),
        }
    }

    /// End timestamp, only meaningful once Ended
    pub fn end_time(&self) -> Option<f64> {
        (self.timing.phase == RunPhase::Ended).then_some(self.timing.end_ms)
    }

    /// Ready -> Playing. Returns whether the request applied.
    pub fn start(&mut self) -> bool {
        if self.timing.phase != RunPhase::Ready {
            log::debug!("start ignored in phase {}", self.timing.phase.as_str());
            return false;
        }
        self.timing = RunTiming {
            phase: RunPhase::Playing,
            start_ms: self.clock.now_ms(),
            ..self.timing
        };
        log::info!("Run started at {:.0}", self.timing.start_ms);
        true
    }

    /// Playing -> Ended. Returns whether the request applied.
    pub fn end(&mut self) -> bool {
        if self.timing.phase != RunPhase::Playing {
            log::debug!("end ignored in phase {}", self.timing.phase.as_str());
            return false;
        }
        self.timing = RunTiming {
            phase: RunPhase::Ended,
            end_ms: self.clock.now_ms(),
            ..self.timing
        };
        log::info!(
            "Run ended after {:.0} ms",
            self.timing.end_ms - self.timing.start_ms
        );
        true
    }

    /// Playing/Ended -> Ready with a fresh level seed. Returns whether the
    /// request applied; callers rebuild the level when it did.
    pub fn restart(&mut self) -> bool {
        if self.timing.phase == RunPhase::Ready {
            log::debug!("restart ignored in phase ready");
            return false;
        }
        let previous = self.blocks_seed;
        let mut seed = self.seeds.next_seed();
        while seed == previous {
            seed = self.seeds.next_seed();
        }
        self.blocks_seed = seed;
        self.timing = RunTiming {
            phase: RunPhase::Ready,
            ..self.timing
        };
        log::info!("Run restarted with seed {}", seed);
        true
    }
}
