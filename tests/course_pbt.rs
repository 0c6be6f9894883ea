use std::f32::consts::TAU;

use glam::Vec3;
use marble_race::sim::{BlockKind, MotionParams, TargetPose, generate, pose};
use proptest::prelude::*;

prop_compose! {
    fn arb_palette()(
        kinds in prop::collection::vec(
            prop::sample::select(BlockKind::OBSTACLES.to_vec()),
            1..5
        )
    ) -> Vec<BlockKind> {
        kinds
    }
}

prop_compose! {
    fn arb_base()(
        x in -2.0f32..2.0,
        y in 0.0f32..2.0,
        z in -200.0f32..0.0
    ) -> Vec3 {
        Vec3::new(x, y, z)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_layout_invariant(count in 0i64..64, seed in any::<u64>(), palette in arb_palette()) {
        let level = generate(count, seed, &palette).unwrap();
        let n = count as usize;

        prop_assert_eq!(level.blocks.len(), n + 2);
        prop_assert_eq!(level.bounds.length, n + 2);
        prop_assert_eq!(level.blocks[0].kind, BlockKind::Start);
        prop_assert_eq!(level.blocks[n + 1].kind, BlockKind::End);
        for (i, block) in level.blocks.iter().enumerate() {
            prop_assert!((block.position.z + i as f32 * 4.0).abs() < 1e-4);
            prop_assert_eq!(block.position.x, 0.0);
        }
        for block in level.obstacles() {
            prop_assert!(palette.contains(&block.kind));
            prop_assert_eq!(block.motion.kind(), block.kind.motion());
        }
    }

    #[test]
    fn test_generation_is_deterministic(count in 0i64..40, seed in any::<u64>(), palette in arb_palette()) {
        let a = generate(count, seed, &palette).unwrap();
        let b = generate(count, seed, &palette).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_limbo_range(t in 0.0f32..10_000.0, phase in 0.0f32..TAU, base in arb_base()) {
        let TargetPose::Translation(p) = pose(t, &MotionParams::Limbo { phase }, base) else {
            return Err(TestCaseError::fail("limbo must translate"));
        };
        prop_assert!(p.y >= base.y + 0.15 - 1e-4, "y {} below range", p.y);
        prop_assert!(p.y <= base.y + 2.15 + 1e-4, "y {} above range", p.y);
        prop_assert_eq!(p.x, base.x);
        prop_assert_eq!(p.z, base.z);
    }

    #[test]
    fn test_axe_range(t in 0.0f32..10_000.0, phase in 0.0f32..TAU, base in arb_base()) {
        let TargetPose::Translation(p) = pose(t, &MotionParams::Axe { phase }, base) else {
            return Err(TestCaseError::fail("axe must translate"));
        };
        prop_assert!(p.x >= base.x - 0.9 - 1e-4, "x {} below range", p.x);
        prop_assert!(p.x <= base.x + 0.9 + 1e-4, "x {} above range", p.x);
        prop_assert_eq!(p.y, base.y);
        prop_assert_eq!(p.z, base.z);
    }

    #[test]
    fn test_spinner_periodicity(
        t in 0.0f32..100.0,
        magnitude in 2.0f32..3.0,
        negative in any::<bool>()
    ) {
        let speed = if negative { -magnitude } else { magnitude };
        let period = TAU / speed.abs();
        let params = MotionParams::Spinner { speed };

        let (TargetPose::Rotation(a), TargetPose::Rotation(b)) =
            (pose(t, &params, Vec3::ZERO), pose(t + period, &params, Vec3::ZERO))
        else {
            return Err(TestCaseError::fail("spinner must rotate"));
        };
        // q and -q are the same rotation
        prop_assert!(a.dot(b).abs() > 0.999, "dot {}", a.dot(b));
    }
}
