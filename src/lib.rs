//! Marble Race - procedural obstacle course core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level assembly, obstacle motion, run phases)
//! - `scene`: Data handed to the renderer/physics collaborator
//! - `settings`: Construction-time course configuration
//! - `error`: Error taxonomy

pub mod error;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{CourseError, Result};
pub use settings::Settings;

use glam::Vec3;

/// Course configuration constants
pub mod consts {
    /// Default fixed simulation rate
    pub const TICK_RATE_HZ: u32 = 120;

    /// Length of one block along the course axis
    pub const SEGMENT_LENGTH: f32 = 4.0;
    /// Width of the course (floor slab x extent)
    pub const COURSE_WIDTH: f32 = 4.0;
    /// Default number of obstacle blocks between Start and End
    pub const DEFAULT_BLOCKS_COUNT: u32 = 12;

    /// Spinner speed magnitude range (rad/s), [min, max)
    pub const SPINNER_SPEED_MIN: f32 = 2.0;
    pub const SPINNER_SPEED_MAX: f32 = 3.0;

    /// Limbo bar lift above its base (center of the sine swing)
    pub const LIMBO_LIFT: f32 = 1.15;
    /// Limbo swing amplitude
    pub const LIMBO_AMPLITUDE: f32 = 1.0;

    /// Axe sideways swing amplitude
    pub const AXE_AMPLITUDE: f32 = 0.9;

    /// Surface response shared by obstacles and walls
    pub const RESTITUTION: f32 = 0.2;
    pub const OBSTACLE_FRICTION: f32 = 0.0;
    pub const FLOOR_FRICTION: f32 = 1.0;
}

/// Offset of segment `index` along the course axis (the course runs toward -Z)
#[inline]
pub fn segment_offset(index: usize) -> Vec3 {
    Vec3::new(0.0, 0.0, -(index as f32) * consts::SEGMENT_LENGTH)
}

/// Unpack a 0xRRGGBB color into RGBA floats (alpha = 1)
#[inline]
pub const fn hex_rgba(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}
