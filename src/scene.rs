//! Scene data for the render/physics collaborator
//!
//! Nothing here draws or collides; it only describes what should exist.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BlockKind, BoxFootprint, FloorStyle, KinematicTarget, Level};

/// Colors for course elements
pub mod colors {
    use crate::hex_rgba;

    pub const FLOOR_LIGHT: [f32; 4] = hex_rgba(0x111111);
    pub const FLOOR_DARK: [f32; 4] = hex_rgba(0x222222);
    pub const OBSTACLE: [f32; 4] = hex_rgba(0xff0000);
    pub const WALL: [f32; 4] = hex_rgba(0x887777);
    pub const BACKGROUND: [f32; 4] = hex_rgba(0x252731);
}

/// Surface material of a scene element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    FloorLight,
    FloorDark,
    Obstacle,
    Wall,
}

impl Material {
    pub fn color(&self) -> [f32; 4] {
        match self {
            Material::FloorLight => colors::FLOOR_LIGHT,
            Material::FloorDark => colors::FLOOR_DARK,
            Material::Obstacle => colors::OBSTACLE,
            Material::Wall => colors::WALL,
        }
    }
}

impl From<FloorStyle> for Material {
    fn from(style: FloorStyle) -> Self {
        match style {
            FloorStyle::Light => Material::FloorLight,
            FloorStyle::Dark => Material::FloorDark,
        }
    }
}

/// Per-obstacle instance record, laid out for direct upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub translation: [f32; 3],
    /// Block kind tag (see `kind_tag`)
    pub kind: u32,
    /// Quaternion xyzw
    pub rotation: [f32; 4],
}

impl InstanceRaw {
    pub fn new(translation: Vec3, rotation: Quat, kind: BlockKind) -> Self {
        Self {
            translation: translation.to_array(),
            kind: kind_tag(kind),
            rotation: rotation.to_array(),
        }
    }
}

/// Stable numeric tag for a block kind
pub fn kind_tag(kind: BlockKind) -> u32 {
    match kind {
        BlockKind::Start => 0,
        BlockKind::End => 1,
        BlockKind::Spinner => 2,
        BlockKind::Limbo => 3,
        BlockKind::Axe => 4,
    }
}

/// Pack a tick's kinematic targets into instance records
pub fn instances_from_targets(targets: &[KinematicTarget]) -> Vec<InstanceRaw> {
    targets
        .iter()
        .map(|target| {
            let (translation, rotation) = target.pose.resolve(target.base);
            InstanceRaw::new(translation, rotation, target.kind)
        })
        .collect()
}

/// How the physics side should treat a collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves
    Fixed,
    /// Pose set from outside every tick
    KinematicPosition,
}

/// Collider shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Box with full extents
    Cuboid { size: Vec3 },
    /// Convex hull of a mesh asset at the given scale
    MeshHull { scale: f32 },
}

/// A collider the physics collaborator should create for a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderDecl {
    pub body: BodyType,
    /// Body origin in course space
    pub position: Vec3,
    pub shape: ColliderShape,
    /// Shape center relative to the body
    pub local_offset: Vec3,
    pub restitution: f32,
    pub friction: f32,
    /// Block that owns this collider (None for bounds)
    pub block: Option<usize>,
}

impl ColliderDecl {
    fn fixed_box(footprint: BoxFootprint, friction: f32) -> Self {
        Self {
            body: BodyType::Fixed,
            position: footprint.center,
            shape: ColliderShape::Cuboid {
                size: footprint.size,
            },
            local_offset: Vec3::ZERO,
            restitution: RESTITUTION,
            friction,
            block: None,
        }
    }
}

/// Every collider a level needs: obstacle bodies, the trophy, walls and floor.
///
/// Floor slabs are visual only; the single bounds floor collider carries the
/// marble along the whole course.
pub fn colliders(level: &Level) -> Vec<ColliderDecl> {
    let mut out = Vec::with_capacity(level.blocks.len() + 4);

    for block in &level.blocks {
        let archetype = block.kind.archetype();
        if let Some(body) = archetype.obstacle {
            out.push(ColliderDecl {
                body: BodyType::KinematicPosition,
                position: block.position + body.body_offset,
                shape: ColliderShape::Cuboid {
                    size: body.shape.size,
                },
                local_offset: body.shape.center,
                restitution: RESTITUTION,
                friction: OBSTACLE_FRICTION,
                block: Some(block.index),
            });
        }
        if let Some(trophy) = archetype.trophy {
            out.push(ColliderDecl {
                body: BodyType::Fixed,
                position: block.position + trophy.body_offset,
                shape: ColliderShape::MeshHull {
                    scale: trophy.mesh_scale,
                },
                local_offset: Vec3::ZERO,
                restitution: RESTITUTION,
                friction: OBSTACLE_FRICTION,
                block: Some(block.index),
            });
        }
    }

    let bounds = &level.bounds;
    for wall in [bounds.right_wall, bounds.left_wall, bounds.back_wall] {
        out.push(ColliderDecl::fixed_box(wall, OBSTACLE_FRICTION));
    }
    out.push(ColliderDecl::fixed_box(bounds.floor, FLOOR_FRICTION));

    out
}

/// A visual box the renderer should draw (slabs and walls)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticMesh {
    pub footprint: BoxFootprint,
    pub material: Material,
}

/// Static visual geometry of a level, in course space
pub fn static_meshes(level: &Level) -> Vec<StaticMesh> {
    let mut out: Vec<StaticMesh> = level
        .blocks
        .iter()
        .map(|block| {
            let archetype = block.kind.archetype();
            StaticMesh {
                footprint: BoxFootprint::new(
                    block.position + archetype.slab.center,
                    archetype.slab.size,
                ),
                material: archetype.floor.into(),
            }
        })
        .collect();

    let bounds = &level.bounds;
    for wall in [bounds.right_wall, bounds.left_wall, bounds.back_wall] {
        out.push(StaticMesh {
            footprint: wall,
            material: Material::Wall,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::WALL_HEIGHT;
    use crate::sim::{Course, ManualClock, TargetPose, TickInput, generate, limbo_pose, tick};
    use std::f32::consts::FRAC_PI_2;
    use crate::Settings;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 32);
        let raw = InstanceRaw::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, BlockKind::Axe);
        let bytes: &[u8] = bytemuck::bytes_of(&raw);
        assert_eq!(bytes.len(), 32);
        assert_eq!(raw.kind, 4);
    }

    #[test]
    fn test_instances_from_tick() {
        let mut course = Course::new(Settings::default(), ManualClock::new(0.0)).unwrap();
        let targets = tick(&mut course, &TickInput::default()).unwrap();
        let instances = instances_from_targets(&targets);
        assert_eq!(instances.len(), targets.len());

        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), instances.len() * 32);
        for (raw, target) in instances.iter().zip(&targets) {
            assert_eq!(raw.kind, kind_tag(target.kind));
            assert!((raw.translation[2] - target.base.z).abs() < 1e-5);
        }
    }

    #[test]
    fn test_colliders() {
        let level = generate(4, 8, &BlockKind::OBSTACLES).unwrap();
        let decls = colliders(&level);

        let kinematic = decls
            .iter()
            .filter(|d| d.body == BodyType::KinematicPosition)
            .count();
        assert_eq!(kinematic, 4);

        let trophy: Vec<_> = decls
            .iter()
            .filter(|d| matches!(d.shape, ColliderShape::MeshHull { .. }))
            .collect();
        assert_eq!(trophy.len(), 1);
        assert_eq!(trophy[0].block, Some(5));

        let floor = decls.last().unwrap();
        assert_eq!(floor.friction, FLOOR_FRICTION);
        assert_eq!(floor.block, None);
        // 4 obstacles + trophy + 3 walls + floor
        assert_eq!(decls.len(), 9);
    }

    #[test]
    fn test_static_meshes() {
        let level = generate(2, 1, &BlockKind::OBSTACLES).unwrap();
        let meshes = static_meshes(&level);
        assert_eq!(meshes.len(), 4 + 3);
        assert_eq!(meshes[0].material, Material::FloorLight);
        assert_eq!(meshes[1].material, Material::FloorDark);
        assert_eq!(meshes[3].material, Material::FloorLight);
        assert_eq!(meshes[6].material, Material::Wall);
        assert_eq!(Material::Obstacle.color(), [1.0, 0.0, 0.0, 1.0]);
    }

    fn single_obstacle_course(kind: BlockKind) -> Course<ManualClock> {
        let settings = Settings {
            blocks_count: 1,
            palette: vec![kind],
            ..Default::default()
        };
        Course::new(settings, ManualClock::new(0.0)).unwrap()
    }

    fn kinematic_collider(level: &Level) -> ColliderDecl {
        *colliders(level)
            .iter()
            .find(|d| d.body == BodyType::KinematicPosition)
            .unwrap()
    }

    #[test]
    fn test_axe_collider_sits_on_course() {
        let mut course = single_obstacle_course(BlockKind::Axe);
        let targets = tick(&mut course, &TickInput::default()).unwrap();
        let decl = kinematic_collider(course.level());

        let (body, _) = targets[0].pose.resolve(targets[0].base);
        assert!(body.y.abs() < 1e-5, "axe body y {}", body.y);
        assert_eq!(decl.position, course.level().blocks[1].position);

        let center = body.y + decl.local_offset.y;
        assert!((center - 1.2).abs() < 1e-5, "axe collider center {center}");
        let ColliderShape::Cuboid { size } = decl.shape else {
            panic!("axe collider must be a box");
        };
        assert!(center - size.y / 2.0 < WALL_HEIGHT);
    }

    #[test]
    fn test_limbo_bar_lowest_point() {
        let mut course = single_obstacle_course(BlockKind::Limbo);
        let targets = tick(&mut course, &TickInput::default()).unwrap();
        let decl = kinematic_collider(course.level());
        assert_eq!(targets[0].base, decl.position);

        let TargetPose::Translation(low) = limbo_pose(0.0, 3.0 * FRAC_PI_2, decl.position) else {
            panic!("limbo must translate");
        };
        let lowest = low.y + decl.local_offset.y;
        assert!((lowest - 0.35).abs() < 1e-5, "limbo lowest center {lowest}");
    }

    #[test]
    fn test_spinner_keeps_rest_height() {
        let mut course = single_obstacle_course(BlockKind::Spinner);
        let targets = tick(&mut course, &TickInput::default()).unwrap();
        let decl = kinematic_collider(course.level());

        let (body, _) = targets[0].pose.resolve(targets[0].base);
        assert!((body.y - 0.2).abs() < 1e-5);
        assert!((body.y + decl.local_offset.y - 0.4).abs() < 1e-5);
    }
}
