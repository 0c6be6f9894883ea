//! Obstacle kinematics
//!
//! Pure pose functions, one per motion kind. Each maps the shared elapsed
//! simulation time plus an instance's fixed motion parameters to the target
//! the physics side should move the kinematic body to on its next step.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::catalog::MotionParams;
use crate::consts::*;

/// Kinematic target for one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetPose {
    /// Set the body's next rotation; translation is left alone
    Rotation(Quat),
    /// Set the body's next translation; rotation is left alone
    Translation(Vec3),
}

impl TargetPose {
    /// Resolve to a full transform, filling the untouched half from the rest pose
    pub fn resolve(&self, base: Vec3) -> (Vec3, Quat) {
        match *self {
            TargetPose::Rotation(rotation) => (base, rotation),
            TargetPose::Translation(translation) => (translation, Quat::IDENTITY),
        }
    }
}

/// Yaw about +Y by `elapsed * speed`
#[inline]
pub fn spinner_pose(elapsed: f32, speed: f32) -> TargetPose {
    TargetPose::Rotation(Quat::from_rotation_y(elapsed * speed))
}

/// Vertical swing between base.y + 0.15 and base.y + 2.15
#[inline]
pub fn limbo_pose(elapsed: f32, phase: f32, base: Vec3) -> TargetPose {
    let y = base.y + LIMBO_AMPLITUDE * (elapsed + phase).sin() + LIMBO_LIFT;
    TargetPose::Translation(Vec3::new(base.x, y, base.z))
}

/// Sideways swing of ±0.9 around base.x
#[inline]
pub fn axe_pose(elapsed: f32, phase: f32, base: Vec3) -> TargetPose {
    let x = base.x + AXE_AMPLITUDE * (elapsed + phase).sin();
    TargetPose::Translation(Vec3::new(x, base.y, base.z))
}

/// Target pose for any motion kind
pub fn pose(elapsed: f32, params: &MotionParams, base: Vec3) -> TargetPose {
    match *params {
        MotionParams::None => TargetPose::Translation(base),
        MotionParams::Spinner { speed } => spinner_pose(elapsed, speed),
        MotionParams::Limbo { phase } => limbo_pose(elapsed, phase, base),
        MotionParams::Axe { phase } => axe_pose(elapsed, phase, base),
    }
}
